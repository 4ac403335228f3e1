//! Lagrange-basis evaluations over a multiplicative domain
//!
//! The evaluator only consumes a [`LagrangeEvaluations`] bundle. [`Domain`]
//! is a convenience for producing one from a point `zeta`:
//!
//! - `v(zeta) = zeta^n - 1`
//! - `L_0(zeta) = v(zeta) / (n * (zeta - 1))`
//! - `L_{n-1}(zeta) = v(zeta) * omega^{-1} / (n * (zeta - omega^{-1}))`

use crate::constants::{root_of_unity, TWO_ADICITY};
use crate::errors::VerifyError;
use crate::field::{fe_sub, Field};
use crate::modexp::ModExp;
use crate::types::FieldElement;

/// Lagrange-basis values at the evaluation point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LagrangeEvaluations {
    pub vanishing_polynomial: FieldElement,
    pub l_first: FieldElement,
    pub l_last: FieldElement,
    pub zeta_minus_omega_inv: FieldElement,
    pub zeta_omega: FieldElement,
}

/// Multiplicative subgroup of size 2^k generated by `omega`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    size: u64,
    omega: FieldElement,
    omega_inv: FieldElement,
}

impl Domain {
    /// Domain of `size` elements using the canonical root of unity.
    pub fn new<M: ModExp>(field: &Field<M>, size: u64) -> Result<Self, VerifyError> {
        let log2_size = log2_exact(size)?;
        let omega = root_of_unity(field, log2_size)?.ok_or(VerifyError::InvalidDomainSize(size))?;
        Self::with_generator(field, size, omega)
    }

    /// Domain with a caller-supplied generator. `omega^size` must be one.
    pub fn with_generator<M: ModExp>(
        field: &Field<M>,
        size: u64,
        omega: FieldElement,
    ) -> Result<Self, VerifyError> {
        log2_exact(size)?;
        if field.pow_u64(&omega, size)? != FieldElement::ONE {
            return Err(VerifyError::ConsistencyCheckFailure(
                "domain generator has wrong order",
            ));
        }
        let omega_inv = field.inverse(&omega)?;
        Ok(Self {
            size,
            omega,
            omega_inv,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn omega(&self) -> &FieldElement {
        &self.omega
    }

    pub fn omega_inv(&self) -> &FieldElement {
        &self.omega_inv
    }

    /// Evaluate the vanishing polynomial and the first/last Lagrange basis
    /// polynomials at `zeta`. Fails if `zeta` is in the domain.
    pub fn lagrange_evaluations<M: ModExp>(
        &self,
        field: &Field<M>,
        zeta: &FieldElement,
    ) -> Result<LagrangeEvaluations, VerifyError> {
        let vanishing_polynomial = fe_sub(&field.pow_u64(zeta, self.size)?, &FieldElement::ONE);
        if vanishing_polynomial.is_zero() {
            return Err(VerifyError::PointInDomain);
        }

        let n = FieldElement::from_u64(self.size);
        let zeta_minus_one = fe_sub(zeta, &FieldElement::ONE);
        let zeta_minus_omega_inv = fe_sub(zeta, &self.omega_inv);

        let l_first = field.div(
            &vanishing_polynomial,
            &field.mul(&n, &zeta_minus_one)?,
        )?;
        let l_last = field.div(
            &field.mul(&vanishing_polynomial, &self.omega_inv)?,
            &field.mul(&n, &zeta_minus_omega_inv)?,
        )?;
        let zeta_omega = field.mul(zeta, &self.omega)?;

        crate::dbg_fe!("l_first", &l_first);
        crate::dbg_fe!("l_last", &l_last);

        Ok(LagrangeEvaluations {
            vanishing_polynomial,
            l_first,
            l_last,
            zeta_minus_omega_inv,
            zeta_omega,
        })
    }
}

/// log2 of a power-of-two domain size no larger than 2^46.
fn log2_exact(size: u64) -> Result<u32, VerifyError> {
    if !size.is_power_of_two() || size.trailing_zeros() > TWO_ADICITY {
        return Err(VerifyError::InvalidDomainSize(size));
    }
    Ok(size.trailing_zeros())
}
