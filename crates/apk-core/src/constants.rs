//! Constants for the BW6-761 scalar field and the accountability protocol

use crate::errors::FieldError;
use crate::field::Field;
use crate::modexp::ModExp;
use crate::types::FieldElement;

/// r - 1 = 2^46 * t with t odd
pub const TWO_ADICITY: u32 = 46;

/// Multiplicative generator of the field
pub const GENERATOR: u64 = 15;

/// Primitive 2^46-th root of unity, GENERATOR^t
/// 0x0036a92e05198a8030f152488aeffc9b40fbe05b4512a3d4b44d994a0ddff8c606df0a4306fe0bc37eca603cc563b9a1
pub const TWO_ADIC_ROOT_OF_UNITY: FieldElement = FieldElement::from_words_unchecked(
    [0x30f152488aeffc9b, 0x0036a92e05198a80, 0, 0],
    [
        0x7eca603cc563b9a1,
        0x06df0a4306fe0bc3,
        0xb44d994a0ddff8c6,
        0x40fbe05b4512a3d4,
    ],
);

/// Width of a bitmask chunk in bits
pub const BITS_IN_CHUNK: u64 = 256;

/// Domain separator for the accountable aggregate-key transcript
pub const APK_DOMAIN_SEP: &[u8] = b"apk_proof_keccak";

/// Get the root of unity for domain size 2^log2_n
///
/// ω_n = ω_{2^46}^{2^{46-n}}, computed by repeated squaring.
pub fn root_of_unity<M: ModExp>(
    field: &Field<M>,
    log2_n: u32,
) -> Result<Option<FieldElement>, FieldError> {
    if log2_n > TWO_ADICITY {
        return Ok(None);
    }
    let mut root = TWO_ADIC_ROOT_OF_UNITY;
    for _ in log2_n..TWO_ADICITY {
        root = field.square(&root)?;
    }
    Ok(Some(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::fe_neg;

    #[test]
    fn test_root_of_unity_one() {
        let field = Field::new();
        assert_eq!(root_of_unity(&field, 0).unwrap(), Some(FieldElement::ONE));
    }

    #[test]
    fn test_root_of_unity_two() {
        let field = Field::new();
        assert_eq!(
            root_of_unity(&field, 1).unwrap(),
            Some(fe_neg(&FieldElement::ONE))
        );
    }

    #[test]
    fn test_root_of_unity_order() {
        let field = Field::new();
        let omega = root_of_unity(&field, 9).unwrap().unwrap();
        assert_eq!(field.pow_u64(&omega, 512).unwrap(), FieldElement::ONE);
        assert_eq!(
            field.pow_u64(&omega, 256).unwrap(),
            fe_neg(&FieldElement::ONE)
        );
    }

    #[test]
    fn test_root_of_unity_out_of_range() {
        let field = Field::new();
        assert_eq!(root_of_unity(&field, TWO_ADICITY + 1).unwrap(), None);
    }

    #[test]
    fn test_two_adic_root_is_reduced() {
        assert!(!TWO_ADIC_ROOT_OF_UNITY.is_geq_modulus());
    }
}
