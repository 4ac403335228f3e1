//! Lagrange command - evaluate boundary basis polynomials at a point

use crate::config::Config;
use crate::instance::parse_field;
use crate::CommonArgs;
use anyhow::{Context, Result};
use apk_verifier_core::{Domain, Field, FieldElement, LagrangeEvaluations, ModExp};
use clap::Args;
use console::style;
use serde::Serialize;

#[derive(Args)]
pub struct LagrangeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Domain size (a power of two, at most 2^46)
    #[arg(long)]
    domain_size: u64,

    /// Evaluation point as big-endian hex
    #[arg(long)]
    zeta: String,
}

#[derive(Debug, Serialize)]
struct LagrangeReport {
    omega: String,
    vanishing_polynomial: String,
    l_first: String,
    l_last: String,
    zeta_minus_omega_inv: String,
    zeta_omega: String,
}

pub fn run(config: &Config, args: LagrangeArgs) -> Result<()> {
    let zeta = parse_field(&args.zeta, "zeta")?;
    let field = config.field();
    let (omega, evals) = evaluate(&field, args.domain_size, &zeta)?;

    let report = LagrangeReport {
        omega: omega.to_string(),
        vanishing_polynomial: evals.vanishing_polynomial.to_string(),
        l_first: evals.l_first.to_string(),
        l_last: evals.l_last.to_string(),
        zeta_minus_omega_inv: evals.zeta_minus_omega_inv.to_string(),
        zeta_omega: evals.zeta_omega.to_string(),
    };

    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !config.quiet {
        println!(
            "{} Lagrange evaluations over a domain of {}",
            style("→").cyan().bold(),
            args.domain_size
        );
        println!();
        println!("  omega                 {}", report.omega);
        println!("  v(zeta)               {}", report.vanishing_polynomial);
        println!("  L_first(zeta)         {}", report.l_first);
        println!("  L_last(zeta)          {}", report.l_last);
        println!("  zeta - omega^-1       {}", report.zeta_minus_omega_inv);
        println!("  zeta * omega          {}", report.zeta_omega);
    } else {
        println!("{}", report.l_last);
    }
    Ok(())
}

fn evaluate<M: ModExp>(
    field: &Field<M>,
    domain_size: u64,
    zeta: &FieldElement,
) -> Result<(FieldElement, LagrangeEvaluations)> {
    let domain = Domain::new(field, domain_size)
        .with_context(|| format!("Invalid domain size {}", domain_size))?;
    let evals = domain
        .lagrange_evaluations(field, zeta)
        .context("Cannot evaluate at this point")?;
    Ok((*domain.omega(), evals))
}
