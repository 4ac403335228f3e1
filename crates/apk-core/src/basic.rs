//! Basic-protocol evaluator capability
//!
//! The basic aggregate-key protocol contributes five constraint residues and
//! the base linearization commitment. The accountability layer treats both as
//! an opaque sub-result.

use crate::errors::VerifyError;
use crate::field::Field;
use crate::lagrange::LagrangeEvaluations;
use crate::modexp::ModExp;
use crate::ops::CommitmentGroup;
use crate::types::FieldElement;

/// Number of constraint residues produced by the basic protocol
pub const BASIC_CONSTRAINTS: usize = 5;

pub trait BasicProtocolEvaluator {
    type Point: Clone;

    /// Claimed evaluation of the bitmask polynomial at zeta.
    fn bitmask_at_zeta(&self) -> FieldElement;

    fn evaluate_constraint_polynomials<M: ModExp>(
        &self,
        field: &Field<M>,
        lagrange: &LagrangeEvaluations,
    ) -> Result<[FieldElement; BASIC_CONSTRAINTS], VerifyError>;

    fn restore_commitment_to_linearization_polynomial<M, G>(
        &self,
        field: &Field<M>,
        group: &G,
        phi: &FieldElement,
        zeta_minus_omega_inv: &FieldElement,
    ) -> Result<Self::Point, VerifyError>
    where
        M: ModExp,
        G: CommitmentGroup<Point = Self::Point>;
}

/// Basic-protocol results supplied as data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecomputedBasicEvaluations<P> {
    pub bitmask: FieldElement,
    pub residues: [FieldElement; BASIC_CONSTRAINTS],
    pub linearization_commitment: P,
}

impl<P: Clone> BasicProtocolEvaluator for PrecomputedBasicEvaluations<P> {
    type Point = P;

    fn bitmask_at_zeta(&self) -> FieldElement {
        self.bitmask
    }

    fn evaluate_constraint_polynomials<M: ModExp>(
        &self,
        _field: &Field<M>,
        _lagrange: &LagrangeEvaluations,
    ) -> Result<[FieldElement; BASIC_CONSTRAINTS], VerifyError> {
        Ok(self.residues)
    }

    fn restore_commitment_to_linearization_polynomial<M, G>(
        &self,
        _field: &Field<M>,
        _group: &G,
        _phi: &FieldElement,
        _zeta_minus_omega_inv: &FieldElement,
    ) -> Result<P, VerifyError>
    where
        M: ModExp,
        G: CommitmentGroup<Point = P>,
    {
        Ok(self.linearization_commitment.clone())
    }
}
