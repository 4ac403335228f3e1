//! Accountability constraints over a packed bitmask
//!
//! The bitmask is committed in 256-bit chunks. Verification recomputes:
//!
//! 1. `aggregated_bitmask = Σ chunk_i · r^i` over the m = n / 256 chunks
//! 2. the bit-count value at `zeta·omega`, once as the geometric-series
//!    closed form and once as an explicit sum (the two must agree)
//! 3. `a = 2 + (r / 2^255 - 2) · bit_count`
//! 4. the inner-product residue `-acc - b·c + aggregated_bitmask · L_last`
//!    and the multipacking-mask residue `-c·a - (1 - r^m) · L_last`
//!
//! and folds the `acc` and `c` commitments into the linearization commitment
//! with `phi^5` and `phi^6`.

extern crate alloc;
use alloc::vec::Vec;

use crate::basic::{BasicProtocolEvaluator, BASIC_CONSTRAINTS};
use crate::constants::BITS_IN_CHUNK;
use crate::errors::VerifyError;
use crate::field::{fe_add, fe_sub, Field};
use crate::lagrange::LagrangeEvaluations;
use crate::modexp::ModExp;
use crate::ops::CommitmentGroup;
use crate::types::{BitmaskChunk, FieldElement};
use crate::utils::sum;

/// Residues contributed by the accountability layer
pub const ACCOUNTABLE_CONSTRAINTS: usize = 2;

/// Length of the full constraint vector
pub const NUM_CONSTRAINTS: usize = BASIC_CONSTRAINTS + ACCOUNTABLE_CONSTRAINTS;

/// Highest power of phi used by the linearization commitment
pub const MAX_PHI_POWER: usize = 6;

/// Prover-claimed evaluations at zeta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountableEvaluations<B> {
    pub c: FieldElement,
    pub acc: FieldElement,
    pub basic: B,
}

/// Commitments to the two accountability polynomials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountableCommitments<P> {
    pub acc: P,
    pub c: P,
}

/// Read-only view of everything one evaluation needs
pub struct ProtocolInputs<'a, B: BasicProtocolEvaluator> {
    pub r: FieldElement,
    pub phi: FieldElement,
    pub domain_size: u64,
    pub lagrange: &'a LagrangeEvaluations,
    pub bitmask: &'a [BitmaskChunk],
    pub evaluations: &'a AccountableEvaluations<B>,
    pub commitments: &'a AccountableCommitments<B::Point>,
}

/// Output of a full evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation<P> {
    pub constraints: Vec<FieldElement>,
    pub linearization_commitment: P,
}

impl<P> Evaluation<P> {
    /// Whether the two accountability residues vanish
    pub fn accountability_holds(&self) -> bool {
        self.constraints[BASIC_CONSTRAINTS..]
            .iter()
            .all(FieldElement::is_zero)
    }
}

impl<'a, B: BasicProtocolEvaluator> ProtocolInputs<'a, B> {
    /// Run both halves of the evaluator.
    pub fn evaluate<M, G>(
        &self,
        field: &Field<M>,
        group: &G,
    ) -> Result<Evaluation<B::Point>, VerifyError>
    where
        M: ModExp,
        G: CommitmentGroup<Point = B::Point>,
    {
        let constraints = self.evaluations.evaluate_constraint_polynomials(
            field,
            self.lagrange,
            &self.r,
            self.bitmask,
            self.domain_size,
        )?;
        let linearization_commitment = self
            .evaluations
            .restore_commitment_to_linearization_polynomial(
                field,
                group,
                &self.phi,
                &self.lagrange.zeta_minus_omega_inv,
                self.commitments,
            )?;
        Ok(Evaluation {
            constraints,
            linearization_commitment,
        })
    }
}

impl<B: BasicProtocolEvaluator> AccountableEvaluations<B> {
    /// Evaluate the full constraint vector: the basic residues followed by
    /// the inner-product and multipacking-mask residues.
    pub fn evaluate_constraint_polynomials<M: ModExp>(
        &self,
        field: &Field<M>,
        lagrange: &LagrangeEvaluations,
        r: &FieldElement,
        bitmask: &[BitmaskChunk],
        domain_size: u64,
    ) -> Result<Vec<FieldElement>, VerifyError> {
        if domain_size == 0 || domain_size % BITS_IN_CHUNK != 0 {
            return Err(VerifyError::InvalidDomainSize(domain_size));
        }
        let chunk_count = domain_size / BITS_IN_CHUNK;
        if bitmask.len() as u64 != chunk_count {
            return Err(VerifyError::LengthMismatch {
                expected: chunk_count as usize,
                actual: bitmask.len(),
            });
        }

        let chunk_bits_inv = field.inverse(&FieldElement::from_u64(BITS_IN_CHUNK))?;

        let powers_of_r = field.powers(r, bitmask.len() - 1)?;
        let r_pow_m = field.mul(r, &powers_of_r[bitmask.len() - 1])?;

        let chunks: Vec<FieldElement> = bitmask.iter().map(FieldElement::from_chunk).collect();
        let aggregated_bitmask = field.mul_sum(&chunks, &powers_of_r)?;
        crate::dbg_fe!("aggregated_bitmask", &aggregated_bitmask);

        let bit_count = bit_count_at_zeta_omega(
            field,
            &lagrange.zeta_omega,
            chunk_count,
            &chunk_bits_inv,
        )?;

        let two = FieldElement::TWO;
        let two_pow_255_inv = field.inverse(&field.pow_u64(&two, 255)?)?;
        let mask_slope = fe_sub(&field.mul(r, &two_pow_255_inv)?, &two);
        let a = fe_add(&two, &field.mul(&mask_slope, &bit_count)?);
        crate::dbg_fe!("a", &a);

        let b = self.basic.bitmask_at_zeta();
        let l_last = &lagrange.l_last;

        let inner_product = fe_add(
            &fe_sub(
                &fe_sub(&FieldElement::ZERO, &self.acc),
                &field.mul(&b, &self.c)?,
            ),
            &field.mul(&aggregated_bitmask, l_last)?,
        );
        let multipacking_mask = fe_sub(
            &fe_sub(&FieldElement::ZERO, &field.mul(&self.c, &a)?),
            &field.mul(&fe_sub(&FieldElement::ONE, &r_pow_m), l_last)?,
        );
        crate::dbg_fe!("inner_product_residue", &inner_product);
        crate::dbg_fe!("multipacking_mask_residue", &multipacking_mask);

        let mut constraints = Vec::with_capacity(NUM_CONSTRAINTS);
        constraints.extend_from_slice(&self.basic.evaluate_constraint_polynomials(field, lagrange)?);
        constraints.push(inner_product);
        constraints.push(multipacking_mask);
        Ok(constraints)
    }

    /// Fold the `acc` and `c` commitments into the basic protocol's
    /// linearization commitment: `base + acc·phi^5 + c·phi^6`.
    pub fn restore_commitment_to_linearization_polynomial<M, G>(
        &self,
        field: &Field<M>,
        group: &G,
        phi: &FieldElement,
        zeta_minus_omega_inv: &FieldElement,
        commitments: &AccountableCommitments<B::Point>,
    ) -> Result<B::Point, VerifyError>
    where
        M: ModExp,
        G: CommitmentGroup<Point = B::Point>,
    {
        let powers_of_phi = field.powers(phi, MAX_PHI_POWER)?;
        let base = self.basic.restore_commitment_to_linearization_polynomial(
            field,
            group,
            phi,
            zeta_minus_omega_inv,
        )?;
        let extra = group.msm(
            &[commitments.acc.clone(), commitments.c.clone()],
            &[powers_of_phi[5], powers_of_phi[6]],
        )?;
        Ok(group.add(&base, &extra)?)
    }
}

/// Bit-count value at `zeta_omega`, `(1/256) · Σ_{i<256} (zeta_omega^m)^i`.
///
/// Computed as the closed form `(x^256 - 1) / (x - 1)` and as the explicit
/// sum; any disagreement is a `ConsistencyCheckFailure`. They only differ
/// when `zeta_omega^m = 1`, where the closed form degenerates.
pub fn bit_count_at_zeta_omega<M: ModExp>(
    field: &Field<M>,
    zeta_omega: &FieldElement,
    chunk_count: u64,
    chunk_bits_inv: &FieldElement,
) -> Result<FieldElement, VerifyError> {
    let zeta_omega_pow_m = field.pow_u64(zeta_omega, chunk_count)?;
    let zeta_omega_pow_n = field.pow_u64(&zeta_omega_pow_m, BITS_IN_CHUNK)?;

    let closed_form = field.mul(
        chunk_bits_inv,
        &field.div(
            &fe_sub(&zeta_omega_pow_n, &FieldElement::ONE),
            &fe_sub(&zeta_omega_pow_m, &FieldElement::ONE),
        )?,
    )?;

    let series = field.powers(&zeta_omega_pow_m, (BITS_IN_CHUNK - 1) as usize)?;
    let explicit = field.mul(chunk_bits_inv, &sum(&series))?;

    if closed_form != explicit {
        crate::trace!("bit count mismatch: closed form != explicit sum");
        return Err(VerifyError::ConsistencyCheckFailure(
            "bit count reconstructions disagree",
        ));
    }
    Ok(closed_form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::PrecomputedBasicEvaluations;

    fn fe(hex: &str) -> FieldElement {
        FieldElement::from_hex(hex).unwrap()
    }

    fn lagrange(zeta_omega: FieldElement) -> LagrangeEvaluations {
        LagrangeEvaluations {
            vanishing_polynomial: FieldElement::from_u64(11),
            l_first: FieldElement::from_u64(12),
            l_last: FieldElement::from_u64(13),
            zeta_minus_omega_inv: FieldElement::from_u64(14),
            zeta_omega,
        }
    }

    fn evaluations() -> AccountableEvaluations<PrecomputedBasicEvaluations<()>> {
        AccountableEvaluations {
            c: FieldElement::from_u64(3),
            acc: FieldElement::from_u64(4),
            basic: PrecomputedBasicEvaluations {
                bitmask: FieldElement::from_u64(5),
                residues: [FieldElement::ZERO; BASIC_CONSTRAINTS],
                linearization_commitment: (),
            },
        }
    }

    #[test]
    fn test_domain_not_multiple_of_chunk() {
        let field = Field::new();
        let evals = evaluations();
        let result = evals.evaluate_constraint_polynomials(
            &field,
            &lagrange(FieldElement::from_u64(9)),
            &FieldElement::from_u64(2),
            &[[0u8; 32]],
            300,
        );
        assert_eq!(result, Err(VerifyError::InvalidDomainSize(300)));

        let result = evals.evaluate_constraint_polynomials(
            &field,
            &lagrange(FieldElement::from_u64(9)),
            &FieldElement::from_u64(2),
            &[],
            0,
        );
        assert_eq!(result, Err(VerifyError::InvalidDomainSize(0)));
    }

    #[test]
    fn test_chunk_count_mismatch() {
        let field = Field::new();
        let result = evaluations().evaluate_constraint_polynomials(
            &field,
            &lagrange(FieldElement::from_u64(9)),
            &FieldElement::from_u64(2),
            &[[0u8; 32]; 3],
            512,
        );
        assert_eq!(
            result,
            Err(VerifyError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_degenerate_zeta_omega_fails_cross_check() {
        let field = Field::new();
        let result = evaluations().evaluate_constraint_polynomials(
            &field,
            &lagrange(FieldElement::ONE),
            &FieldElement::from_u64(2),
            &[[0u8; 32]; 2],
            512,
        );
        assert_eq!(
            result,
            Err(VerifyError::ConsistencyCheckFailure(
                "bit count reconstructions disagree"
            ))
        );
    }

    #[test]
    fn test_bit_count_vector() {
        let field = Field::new();
        let zeta_omega = fe("0x00fedcba9876543210fedcba98765432\
                             0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000");
        let inv = field.inverse(&FieldElement::from_u64(256)).unwrap();
        assert_eq!(
            inv,
            fe("0x1ac8c0bd1ad4bd9db74cabaac34a7f1\
                df08b7190df41e7b8fd46ecd8a4f3eb816f451e6ebd000008483b74000000001")
        );
        assert_eq!(
            bit_count_at_zeta_omega(&field, &zeta_omega, 2, &inv).unwrap(),
            fe("0x79e95c0275ada9e61ebc92cccec4d2\
                2aae846e8b178b03af95dfc5a7646fda8355c847785174fe8990011731cede87")
        );
    }

    #[test]
    fn test_bit_count_at_unit_is_rejected() {
        // zeta_omega^m = 1: closed form is 0, explicit sum is 1
        let field = Field::new();
        let inv = field.inverse(&FieldElement::from_u64(256)).unwrap();
        let minus_one = fe_sub(&FieldElement::ZERO, &FieldElement::ONE);
        assert!(matches!(
            bit_count_at_zeta_omega(&field, &minus_one, 2, &inv),
            Err(VerifyError::ConsistencyCheckFailure(_))
        ));
    }

    #[test]
    fn test_basic_residues_come_first() {
        let field = Field::new();
        let mut evals = evaluations();
        evals.basic.residues = [
            FieldElement::from_u64(1),
            FieldElement::from_u64(2),
            FieldElement::from_u64(3),
            FieldElement::from_u64(4),
            FieldElement::from_u64(5),
        ];
        let constraints = evals
            .evaluate_constraint_polynomials(
                &field,
                &lagrange(FieldElement::from_u64(9)),
                &FieldElement::from_u64(2),
                &[[0u8; 32]],
                256,
            )
            .unwrap();
        assert_eq!(constraints.len(), NUM_CONSTRAINTS);
        assert_eq!(&constraints[..BASIC_CONSTRAINTS], &evals.basic.residues);
    }
}
