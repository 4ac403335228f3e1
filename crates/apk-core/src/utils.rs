//! Vector helpers on top of the field engine

extern crate alloc;
use alloc::vec::Vec;

use crate::errors::FieldError;
use crate::field::{fe_add, Field};
use crate::modexp::ModExp;
use crate::types::FieldElement;

/// Sum a list of field elements
pub fn sum(values: &[FieldElement]) -> FieldElement {
    values
        .iter()
        .fold(FieldElement::ZERO, |acc, v| fe_add(&acc, v))
}

impl<M: ModExp> Field<M> {
    /// `[1, base, base^2, ..., base^max_exponent]`
    pub fn powers(
        &self,
        base: &FieldElement,
        max_exponent: usize,
    ) -> Result<Vec<FieldElement>, FieldError> {
        let mut powers = Vec::with_capacity(max_exponent + 1);
        powers.push(FieldElement::ONE);
        if max_exponent == 0 {
            return Ok(powers);
        }
        powers.push(*base);
        for i in 2..=max_exponent {
            let next = self.mul(&powers[i - 1], base)?;
            powers.push(next);
        }
        Ok(powers)
    }

    /// Inner product `sum(xs[i] * ys[i])`
    pub fn mul_sum(
        &self,
        xs: &[FieldElement],
        ys: &[FieldElement],
    ) -> Result<FieldElement, FieldError> {
        if xs.len() != ys.len() {
            return Err(FieldError::LengthMismatch {
                expected: xs.len(),
                actual: ys.len(),
            });
        }
        let mut acc = FieldElement::ZERO;
        for (x, y) in xs.iter().zip(ys) {
            acc = fe_add(&acc, &self.mul(x, y)?);
        }
        Ok(acc)
    }

    /// Evaluate a polynomial (coefficients in ascending degree) at `point`
    /// using Horner's method.
    pub fn horner_eval(
        &self,
        coefficients: &[FieldElement],
        point: &FieldElement,
    ) -> Result<FieldElement, FieldError> {
        let mut acc = FieldElement::ZERO;
        for coeff in coefficients.iter().rev() {
            acc = fe_add(&self.mul(&acc, point)?, coeff);
        }
        Ok(acc)
    }
}
