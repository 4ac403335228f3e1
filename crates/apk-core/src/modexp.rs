//! Modular-exponentiation capability
//!
//! The field engine performs every multiplication-class operation through a
//! single primitive, `base^exponent mod modulus` over big-endian byte
//! operands (the contract of the EVM modexp precompile). [`NativeModExp`]
//! runs it locally with `num-bigint`.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::ModExpError;

/// Default operand limit for [`NativeModExp`], in bytes.
pub const MAX_OPERAND_BYTES: usize = 1024;

/// Exact-integer modular exponentiation.
pub trait ModExp {
    /// Compute `base^exponent mod modulus`.
    ///
    /// Operands are big-endian magnitudes of any length. The result is
    /// left-padded to exactly `modulus.len()` bytes.
    fn modexp(&self, base: &[u8], exponent: &[u8], modulus: &[u8])
        -> Result<Vec<u8>, ModExpError>;
}

impl<T: ModExp + ?Sized> ModExp for &T {
    fn modexp(
        &self,
        base: &[u8],
        exponent: &[u8],
        modulus: &[u8],
    ) -> Result<Vec<u8>, ModExpError> {
        (**self).modexp(base, exponent, modulus)
    }
}

/// Square-and-multiply modexp over `BigUint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeModExp {
    max_operand_bytes: usize,
}

impl NativeModExp {
    pub const fn new() -> Self {
        Self {
            max_operand_bytes: MAX_OPERAND_BYTES,
        }
    }

    /// Reject operands longer than `max_operand_bytes`.
    pub const fn with_max_operand_bytes(max_operand_bytes: usize) -> Self {
        Self { max_operand_bytes }
    }

    pub fn max_operand_bytes(&self) -> usize {
        self.max_operand_bytes
    }

    fn check_len(&self, operand: &[u8]) -> Result<(), ModExpError> {
        if operand.len() > self.max_operand_bytes {
            return Err(ModExpError::OperandTooLarge {
                len: operand.len(),
                max: self.max_operand_bytes,
            });
        }
        Ok(())
    }
}

impl Default for NativeModExp {
    fn default() -> Self {
        Self::new()
    }
}

impl ModExp for NativeModExp {
    fn modexp(
        &self,
        base: &[u8],
        exponent: &[u8],
        modulus: &[u8],
    ) -> Result<Vec<u8>, ModExpError> {
        self.check_len(base)?;
        self.check_len(exponent)?;
        self.check_len(modulus)?;

        let m = BigUint::from_bytes_be(modulus);
        if m.is_zero() {
            return Err(ModExpError::ZeroModulus);
        }

        let b = BigUint::from_bytes_be(base);
        let e = BigUint::from_bytes_be(exponent);
        let result = b.modpow(&e, &m).to_bytes_be();

        // result < m < 256^len, so the minimal encoding always fits
        let mut out = vec![0u8; modulus.len()];
        let start = out.len() - result.len();
        out[start..].copy_from_slice(&result);
        Ok(out)
    }
}
