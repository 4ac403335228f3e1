//! Eval command - evaluate the constraint vector of an instance

use crate::config::Config;
use crate::instance::{Instance, InstanceFile};
use crate::CommonArgs;
use anyhow::{Context, Result};
use apk_verifier_core::{Bw6G1, CommitmentGroup, BASIC_CONSTRAINTS};
use clap::Args;
use console::style;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

const RESIDUE_NAMES: [&str; 7] = [
    "basic[0]",
    "basic[1]",
    "basic[2]",
    "basic[3]",
    "basic[4]",
    "inner_product",
    "multipacking_mask",
];

#[derive(Args)]
pub struct EvalArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to the JSON instance file
    instance: PathBuf,

    /// Exit with an error if the accountability residues do not vanish
    #[arg(long)]
    check: bool,
}

#[derive(Debug, Serialize)]
struct EvalReport {
    constraints: Vec<String>,
    accountability_holds: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    linearization_commitment: Option<String>,
}

pub fn run(config: &Config, args: EvalArgs) -> Result<()> {
    let content = fs::read_to_string(&args.instance)
        .with_context(|| format!("Failed to read instance file: {:?}", args.instance))?;
    let file: InstanceFile = serde_json::from_str(&content)
        .with_context(|| format!("Invalid instance file: {:?}", args.instance))?;

    let field = config.field();
    let group = Bw6G1;
    let instance = file.decode(&field, &group)?;

    if config.chatty() {
        println!(
            "{} Evaluating constraints over a domain of {}...",
            style("→").cyan().bold(),
            instance.domain_size
        );
        println!("  Bitmask chunks: {}", instance.bitmask.len());
        println!();
    }

    let report = evaluate(config, &instance)?;

    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !config.quiet {
        for (name, value) in RESIDUE_NAMES.iter().zip(&report.constraints) {
            println!("  {:<18} {}", name, value);
        }
        println!();
        if report.accountability_holds {
            println!("  Accountability: {}", style("residues vanish ✓").green());
        } else {
            println!("  Accountability: {}", style("residues do not vanish ✗").red());
        }
        if let Some(commitment) = &report.linearization_commitment {
            println!("  Linearization commitment: {}", commitment);
        }
    }

    if args.check && !report.accountability_holds {
        anyhow::bail!("Accountability residues do not vanish");
    }
    Ok(())
}

fn evaluate(config: &Config, instance: &Instance) -> Result<EvalReport> {
    let field = config.field();
    let group = Bw6G1;

    let constraints = instance
        .evaluations
        .evaluate_constraint_polynomials(
            &field,
            &instance.lagrange,
            &instance.r,
            &instance.bitmask,
            instance.domain_size,
        )
        .context("Constraint evaluation failed")?;
    let accountability_holds = constraints[BASIC_CONSTRAINTS..]
        .iter()
        .all(|c| c.is_zero());
    log::debug!("Accountability residues vanish: {}", accountability_holds);

    let linearization_commitment = match (&instance.commitments, &instance.phi) {
        (Some(commitments), Some(phi)) => {
            let point = instance
                .evaluations
                .restore_commitment_to_linearization_polynomial(
                    &field,
                    &group,
                    phi,
                    &instance.lagrange.zeta_minus_omega_inv,
                    commitments,
                )
                .context("Commitment restoration failed")?;
            Some(hex::encode(group.serialize(&point)?))
        }
        (Some(_), None) => {
            log::warn!("Commitments given without `phi`; skipping restoration");
            None
        }
        _ => None,
    };

    Ok(EvalReport {
        constraints: constraints.iter().map(ToString::to_string).collect(),
        accountability_holds,
        linearization_commitment,
    })
}
