//! JSON evaluation instances
//!
//! Field elements are big-endian hex strings (optional `0x`), bitmask chunks
//! are 32-byte hex strings and points are compressed BW6-761 G1 encodings in
//! hex. Lagrange values are given either explicitly or as a point `zeta`
//! over the instance's domain.

use anyhow::{bail, Context, Result};
use apk_verifier_core::{
    AccountableCommitments, AccountableEvaluations, BitmaskChunk, Bw6G1, CommitmentGroup, Domain,
    Field, FieldElement, LagrangeEvaluations, ModExp, PrecomputedBasicEvaluations,
    BASIC_CONSTRAINTS,
};
use serde::{Deserialize, Serialize};

type Point = <Bw6G1 as CommitmentGroup>::Point;

/// Instance file as written on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceFile {
    pub domain_size: u64,
    pub r: String,
    #[serde(default)]
    pub phi: Option<String>,
    #[serde(default)]
    pub zeta: Option<String>,
    #[serde(default)]
    pub lagrange: Option<LagrangeFile>,
    pub bitmask: Vec<String>,
    pub evaluations: EvaluationsFile,
    #[serde(default)]
    pub commitments: Option<CommitmentsFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LagrangeFile {
    pub vanishing_polynomial: String,
    pub l_first: String,
    pub l_last: String,
    pub zeta_minus_omega_inv: String,
    pub zeta_omega: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationsFile {
    pub c: String,
    pub acc: String,
    /// Claimed bitmask polynomial evaluation, `b`
    pub bitmask: String,
    /// The five basic-protocol residues
    pub basic_residues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitmentsFile {
    pub acc: String,
    pub c: String,
    /// Base linearization commitment from the basic protocol
    pub basic_linearization: String,
}

/// Decoded instance, ready for evaluation
#[derive(Debug, Clone)]
pub struct Instance {
    pub domain_size: u64,
    pub r: FieldElement,
    pub phi: Option<FieldElement>,
    pub lagrange: LagrangeEvaluations,
    pub bitmask: Vec<BitmaskChunk>,
    pub evaluations: AccountableEvaluations<PrecomputedBasicEvaluations<Point>>,
    pub commitments: Option<AccountableCommitments<Point>>,
}

impl InstanceFile {
    pub fn decode<M: ModExp>(&self, field: &Field<M>, group: &Bw6G1) -> Result<Instance> {
        let lagrange = match (&self.lagrange, &self.zeta) {
            (Some(l), _) => LagrangeEvaluations {
                vanishing_polynomial: parse_field(&l.vanishing_polynomial, "vanishing_polynomial")?,
                l_first: parse_field(&l.l_first, "l_first")?,
                l_last: parse_field(&l.l_last, "l_last")?,
                zeta_minus_omega_inv: parse_field(&l.zeta_minus_omega_inv, "zeta_minus_omega_inv")?,
                zeta_omega: parse_field(&l.zeta_omega, "zeta_omega")?,
            },
            (None, Some(zeta)) => {
                let zeta = parse_field(zeta, "zeta")?;
                let domain = Domain::new(field, self.domain_size)
                    .with_context(|| format!("Invalid domain size {}", self.domain_size))?;
                log::debug!("Deriving Lagrange evaluations over a domain of {}", domain.size());
                domain.lagrange_evaluations(field, &zeta)?
            }
            (None, None) => bail!("Instance needs either `lagrange` or `zeta`"),
        };

        let bitmask = self
            .bitmask
            .iter()
            .enumerate()
            .map(|(i, chunk)| parse_chunk(chunk).with_context(|| format!("bitmask[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        let residues = self
            .evaluations
            .basic_residues
            .iter()
            .enumerate()
            .map(|(i, v)| parse_field(v, &format!("basic_residues[{}]", i)))
            .collect::<Result<Vec<_>>>()?;
        let residues: [FieldElement; BASIC_CONSTRAINTS] =
            residues.try_into().map_err(|v: Vec<FieldElement>| {
                anyhow::anyhow!(
                    "Expected {} basic residues, got {}",
                    BASIC_CONSTRAINTS,
                    v.len()
                )
            })?;

        let (basic_linearization, commitments) = match &self.commitments {
            Some(c) => (
                parse_point(group, &c.basic_linearization, "basic_linearization")?,
                Some(AccountableCommitments {
                    acc: parse_point(group, &c.acc, "commitments.acc")?,
                    c: parse_point(group, &c.c, "commitments.c")?,
                }),
            ),
            None => (group.identity(), None),
        };

        Ok(Instance {
            domain_size: self.domain_size,
            r: parse_field(&self.r, "r")?,
            phi: self
                .phi
                .as_deref()
                .map(|phi| parse_field(phi, "phi"))
                .transpose()?,
            lagrange,
            bitmask,
            evaluations: AccountableEvaluations {
                c: parse_field(&self.evaluations.c, "evaluations.c")?,
                acc: parse_field(&self.evaluations.acc, "evaluations.acc")?,
                basic: PrecomputedBasicEvaluations {
                    bitmask: parse_field(&self.evaluations.bitmask, "evaluations.bitmask")?,
                    residues,
                    linearization_commitment: basic_linearization,
                },
            },
            commitments,
        })
    }
}

pub fn parse_field(value: &str, name: &str) -> Result<FieldElement> {
    FieldElement::from_hex(value).with_context(|| format!("Invalid field element `{}`", name))
}

fn parse_chunk(value: &str) -> Result<BitmaskChunk> {
    let bytes = hex::decode(value.strip_prefix("0x").unwrap_or(value))
        .context("Invalid bitmask chunk hex")?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("Bitmask chunk must be 32 bytes, got {}", len))
}

fn parse_point(group: &Bw6G1, value: &str, name: &str) -> Result<Point> {
    let bytes = hex::decode(value.strip_prefix("0x").unwrap_or(value))
        .with_context(|| format!("Invalid hex for point `{}`", name))?;
    group
        .deserialize(&bytes)
        .with_context(|| format!("Invalid point `{}`", name))
}
