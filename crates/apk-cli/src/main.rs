//! apk-eval CLI - evaluate accountable aggregate-key proof constraints
//!
//! Loads an evaluation instance (challenges, Lagrange values, bitmask,
//! claimed evaluations and commitments) from JSON, runs the accountability
//! evaluator and reports the constraint residues.

mod commands;
mod config;
mod instance;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{eval, lagrange};
use console::style;

/// CLI for evaluating accountable aggregate-key proof constraints
#[derive(Parser)]
#[command(name = "apk-eval")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Common options shared across commands
#[derive(Args, Clone)]
pub struct CommonArgs {
    /// Output format (human, json) [default: human]
    #[arg(long, env = "APK_OUTPUT")]
    pub output: Option<OutputFormat>,

    /// Quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Largest modexp operand accepted by the native backend, in bytes
    #[arg(long, env = "APK_MAX_OPERAND_BYTES")]
    pub max_operand_bytes: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the constraint vector of an instance file
    Eval(eval::EvalArgs),

    /// Print Lagrange evaluations for a domain and point
    Lagrange(lagrange::LagrangeArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval(args) => {
            let config = config::Config::load(&args.common)?;
            eval::run(&config, args)
        }
        Commands::Lagrange(args) => {
            let config = config::Config::load(&args.common)?;
            lagrange::run(&config, args)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
