//! Configuration handling for apk-eval
//!
//! Priority: CLI flags > environment variables > config file > defaults

use anyhow::{Context, Result};
use apk_verifier_core::{Field, NativeModExp};
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::{CommonArgs, OutputFormat};

/// Resolved configuration for CLI commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub quiet: bool,
    pub json_output: bool,
    pub max_operand_bytes: usize,
}

impl Config {
    /// Load configuration from file, environment, and CLI args
    pub fn load(common: &CommonArgs) -> Result<Self> {
        let file_config = match ConfigFile::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("No config file loaded: {:#}", e);
                None
            }
        };
        Self::resolve(common, file_config.as_ref())
    }

    fn resolve(common: &CommonArgs, file: Option<&ConfigFile>) -> Result<Self> {
        let output = match common.output {
            Some(output) => output,
            None => match file.and_then(|c| c.output()) {
                Some(name) => parse_output(name)?,
                None => OutputFormat::Human,
            },
        };

        let quiet = common.quiet || file.and_then(|c| c.quiet()).unwrap_or(false);

        let max_operand_bytes = common
            .max_operand_bytes
            .or_else(|| file.and_then(|c| c.max_operand_bytes()))
            .unwrap_or(apk_verifier_core::modexp::MAX_OPERAND_BYTES);

        Ok(Self {
            quiet,
            json_output: output == OutputFormat::Json,
            max_operand_bytes,
        })
    }

    /// Field engine backed by the native modexp with the configured limit
    pub fn field(&self) -> Field<NativeModExp> {
        Field::with_modexp(NativeModExp::with_max_operand_bytes(self.max_operand_bytes))
    }

    /// Whether to print human-readable progress lines
    pub fn chatty(&self) -> bool {
        !self.quiet && !self.json_output
    }
}

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    default: Option<DefaultConfig>,
    modexp: Option<ModExpConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct DefaultConfig {
    output: Option<String>,
    quiet: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ModExpConfig {
    max_operand_bytes: Option<usize>,
}

impl ConfigFile {
    fn load() -> Result<Option<Self>> {
        let path = config_file_path()?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(Some(config))
    }

    fn output(&self) -> Option<&str> {
        self.default.as_ref().and_then(|d| d.output.as_deref())
    }

    fn quiet(&self) -> Option<bool> {
        self.default.as_ref().and_then(|d| d.quiet)
    }

    fn max_operand_bytes(&self) -> Option<usize> {
        self.modexp.as_ref().and_then(|m| m.max_operand_bytes)
    }
}

fn parse_output(name: &str) -> Result<OutputFormat> {
    match name {
        "human" => Ok(OutputFormat::Human),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("Unknown output format in config file: {}", other),
    }
}

/// Get config file path
fn config_file_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not find config directory")?;
    Ok(config_dir.join("apk-verifier").join("config.toml"))
}
