//! Scalar field arithmetic for BW6-761
//!
//! Elements are `(high, low)` pairs of 256-bit words, always reduced below
//! r = 0x01ae3a46...8508c00000000001 (377 bits).
//!
//! Addition and subtraction run directly on the carry chains in
//! [`crate::arith`]. Everything multiplicative goes through a [`ModExp`]
//! capability: squaring and powers are modexp calls against r, and a product
//! of distinct elements uses `x*y = ((x+y)^2 - (x-y)^2) / 4` with unreduced
//! squares, so no wide multiply is ever needed.

extern crate alloc;

use core::cmp::Ordering;

use crate::arith::{
    add_words, cmp_words, shr1_words, sub_words, word_from_be_bytes, word_to_be_bytes,
};
use crate::errors::{FieldError, ModExpError};
use crate::modexp::{ModExp, NativeModExp};
use crate::types::{
    BitmaskChunk, FieldElement, UnreducedPair, Word, SERIALIZED_SIZE, UNREDUCED_SIZE,
    WIDE_SIZE, WORD_ZERO,
};

/// All-ones modulus: modexp against it is a plain integer operation for any
/// result below 2^1024 - 1.
const UNREDUCED_MODULUS: [u8; UNREDUCED_SIZE] = [0xff; UNREDUCED_SIZE];

impl FieldElement {
    /// Check if a field element is zero
    pub fn is_zero(&self) -> bool {
        self.high == WORD_ZERO && self.low == WORD_ZERO
    }

    /// Lexicographic comparison on `(high, low)`. This is the integer order of
    /// the representation, not a field order.
    pub fn gt(&self, other: &Self) -> bool {
        self.cmp_raw(other) == Ordering::Greater
    }

    pub fn is_geq_modulus(&self) -> bool {
        self.cmp_raw(&Self::MODULUS) != Ordering::Less
    }

    fn cmp_raw(&self, other: &Self) -> Ordering {
        match cmp_words(&self.high, &other.high) {
            Ordering::Equal => cmp_words(&self.low, &other.low),
            ord => ord,
        }
    }

    /// Convert u64 to a field element
    pub fn from_u64(val: u64) -> Self {
        Self::from_words_unchecked(WORD_ZERO, [val, 0, 0, 0])
    }

    /// Lift 16 bytes of entropy, read as a little-endian u128, into the low
    /// word. 2^128 < r, so no rejection is needed.
    pub fn from_random_bytes(bytes: &[u8; 16]) -> Self {
        let v = u128::from_le_bytes(*bytes);
        Self::from_words_unchecked(WORD_ZERO, [v as u64, (v >> 64) as u64, 0, 0])
    }

    /// Treat a 256-bit bitmask chunk as the low word with zero high word.
    pub fn from_chunk(chunk: &BitmaskChunk) -> Self {
        Self::from_words_unchecked(WORD_ZERO, word_from_be_bytes(chunk))
    }

    /// Build from raw words, rejecting values >= r.
    pub fn from_words(high: Word, low: Word) -> Result<Self, FieldError> {
        let fe = Self::from_words_unchecked(high, low);
        if fe.is_geq_modulus() {
            return Err(FieldError::NonCanonical);
        }
        Ok(fe)
    }

    /// Big-endian `high || low`, 64 bytes.
    pub fn to_be_bytes(&self) -> [u8; WIDE_SIZE] {
        let mut out = [0u8; WIDE_SIZE];
        out[..32].copy_from_slice(&word_to_be_bytes(&self.high));
        out[32..].copy_from_slice(&word_to_be_bytes(&self.low));
        out
    }

    /// Inverse of [`Self::to_be_bytes`], without a range check.
    pub(crate) fn from_be_bytes_unchecked(bytes: &[u8]) -> Self {
        let mut high = [0u8; 32];
        let mut low = [0u8; 32];
        high.copy_from_slice(&bytes[..32]);
        low.copy_from_slice(&bytes[32..WIDE_SIZE]);
        Self::from_words_unchecked(word_from_be_bytes(&high), word_from_be_bytes(&low))
    }

    /// Parse a big-endian magnitude of at most 64 bytes, rejecting values >= r.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, FieldError> {
        if bytes.len() > WIDE_SIZE {
            return Err(FieldError::InvalidLength {
                expected: WIDE_SIZE,
                actual: bytes.len(),
            });
        }
        let mut padded = [0u8; WIDE_SIZE];
        padded[WIDE_SIZE - bytes.len()..].copy_from_slice(bytes);
        let fe = Self::from_be_bytes_unchecked(&padded);
        if fe.is_geq_modulus() {
            return Err(FieldError::NonCanonical);
        }
        Ok(fe)
    }

    /// Parse a big-endian hex string, with or without `0x`.
    pub fn from_hex(hex: &str) -> Result<Self, FieldError> {
        let digits = hex.strip_prefix("0x").unwrap_or(hex).as_bytes();
        if digits.is_empty() || digits.len() > WIDE_SIZE * 2 {
            return Err(FieldError::InvalidHex);
        }
        let mut padded = [b'0'; WIDE_SIZE * 2];
        padded[WIDE_SIZE * 2 - digits.len()..].copy_from_slice(digits);

        let mut bytes = [0u8; WIDE_SIZE];
        for (i, pair) in padded.chunks(2).enumerate() {
            let hi = hex_digit(pair[0]).ok_or(FieldError::InvalidHex)?;
            let lo = hex_digit(pair[1]).ok_or(FieldError::InvalidHex)?;
            bytes[i] = (hi << 4) | lo;
        }
        Self::from_be_slice(&bytes)
    }

    /// Canonical 48-byte encoding: the low word byte-reversed (32 bytes)
    /// followed by the bottom 16 bytes of the high word byte-reversed.
    pub fn serialize(&self) -> [u8; SERIALIZED_SIZE] {
        let mut out = [0u8; SERIALIZED_SIZE];
        let mut low = word_to_be_bytes(&self.low);
        low.reverse();
        let mut high = word_to_be_bytes(&self.high);
        high.reverse();
        out[..32].copy_from_slice(&low);
        out[32..].copy_from_slice(&high[..16]);
        out
    }

    /// Decode [`Self::serialize`] output, rejecting values >= r.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, FieldError> {
        if bytes.len() != SERIALIZED_SIZE {
            return Err(FieldError::InvalidLength {
                expected: SERIALIZED_SIZE,
                actual: bytes.len(),
            });
        }
        let mut low = [0u8; 32];
        low.copy_from_slice(&bytes[..32]);
        low.reverse();
        let mut high = [0u8; 32];
        high[..16].copy_from_slice(&bytes[32..]);
        high.reverse();
        Self::from_words(word_from_be_bytes(&high), word_from_be_bytes(&low))
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// x + y without reduction. For reduced inputs the result is below 2r.
pub fn fe_add_unreduced(x: &FieldElement, y: &FieldElement) -> FieldElement {
    let (carry, low) = add_words(&x.low, &y.low, false);
    let (_, high) = add_words(&x.high, &y.high, carry);
    FieldElement::from_words_unchecked(high, low)
}

/// Add two field elements: x + y mod r
pub fn fe_add(x: &FieldElement, y: &FieldElement) -> FieldElement {
    normalize(&fe_add_unreduced(x, y))
}

/// Subtract two field elements: x - y mod r
pub fn fe_sub(x: &FieldElement, y: &FieldElement) -> FieldElement {
    let x = if y.gt(x) {
        fe_add_unreduced(x, &FieldElement::MODULUS)
    } else {
        *x
    };
    sub_raw(&x, y)
}

/// Negate a field element: -x mod r
pub fn fe_neg(x: &FieldElement) -> FieldElement {
    fe_sub(&FieldElement::ZERO, x)
}

/// Subtract the modulus once if x >= r. Enough for anything below 2r.
fn normalize(x: &FieldElement) -> FieldElement {
    if x.is_geq_modulus() {
        sub_raw(x, &FieldElement::MODULUS)
    } else {
        *x
    }
}

/// x - y as integers (assumes x >= y)
fn sub_raw(x: &FieldElement, y: &FieldElement) -> FieldElement {
    let (borrow, low) = sub_words(&x.low, &y.low, false);
    let (_, high) = sub_words(&x.high, &y.high, borrow);
    FieldElement::from_words_unchecked(high, low)
}

impl UnreducedPair {
    /// Words most significant first.
    fn to_words(self) -> [Word; 4] {
        [self.hi.high, self.hi.low, self.lo.high, self.lo.low]
    }

    fn from_words(words: [Word; 4]) -> Self {
        Self {
            hi: FieldElement::from_words_unchecked(words[0], words[1]),
            lo: FieldElement::from_words_unchecked(words[2], words[3]),
        }
    }

    fn from_be_bytes(bytes: &[u8]) -> Self {
        Self {
            hi: FieldElement::from_be_bytes_unchecked(&bytes[..WIDE_SIZE]),
            lo: FieldElement::from_be_bytes_unchecked(&bytes[WIDE_SIZE..UNREDUCED_SIZE]),
        }
    }

    fn to_be_bytes(self) -> [u8; UNREDUCED_SIZE] {
        let mut out = [0u8; UNREDUCED_SIZE];
        out[..WIDE_SIZE].copy_from_slice(&self.hi.to_be_bytes());
        out[WIDE_SIZE..].copy_from_slice(&self.lo.to_be_bytes());
        out
    }

    /// self - other across all four words (assumes self >= other)
    fn sub(self, other: Self) -> Self {
        let a = self.to_words();
        let b = other.to_words();
        let mut out = [WORD_ZERO; 4];
        let mut borrow = false;
        for i in (0..4).rev() {
            let (b_out, d) = sub_words(&a[i], &b[i], borrow);
            out[i] = d;
            borrow = b_out;
        }
        Self::from_words(out)
    }

    fn shr1(self) -> Self {
        let mut words = self.to_words();
        shr1_words(&mut words);
        Self::from_words(words)
    }
}

/// Field engine backed by a modexp capability.
#[derive(Debug, Clone, Default)]
pub struct Field<M = NativeModExp> {
    modexp: M,
}

impl Field<NativeModExp> {
    pub fn new() -> Self {
        Self {
            modexp: NativeModExp::new(),
        }
    }
}

impl<M: ModExp> Field<M> {
    pub fn with_modexp(modexp: M) -> Self {
        Self { modexp }
    }

    pub fn modexp(&self) -> &M {
        &self.modexp
    }

    /// Multiply two field elements: x * y mod r
    pub fn mul(&self, x: &FieldElement, y: &FieldElement) -> Result<FieldElement, FieldError> {
        if x == y {
            return self.square(x);
        }

        let sum = fe_add_unreduced(x, y);
        let diff = if x.gt(y) { sub_raw(x, y) } else { sub_raw(y, x) };

        let sum_sq = self.unreduced_square(&sum)?;
        let diff_sq = self.unreduced_square(&diff)?;

        // (x+y)^2 - (x-y)^2 = 4xy, exact
        let four_xy = sum_sq.sub(diff_sq);
        let xy = four_xy.shr1().shr1();
        self.normalize_double_width(&xy)
    }

    /// Square a field element: x^2 mod r
    pub fn square(&self, x: &FieldElement) -> Result<FieldElement, FieldError> {
        self.pow(x, &FieldElement::TWO)
    }

    /// base^exponent mod r. The exponent is any two-word magnitude.
    pub fn pow(
        &self,
        base: &FieldElement,
        exponent: &FieldElement,
    ) -> Result<FieldElement, FieldError> {
        let out = self.modexp.modexp(
            &base.to_be_bytes(),
            &exponent.to_be_bytes(),
            &FieldElement::MODULUS.to_be_bytes(),
        )?;
        reduced_from_output(&out)
    }

    pub fn pow_u64(&self, base: &FieldElement, exponent: u64) -> Result<FieldElement, FieldError> {
        self.pow(base, &FieldElement::from_u64(exponent))
    }

    /// Compute the multiplicative inverse: x^(r-2) mod r.
    ///
    /// Zero maps to zero. The fixed exponent keeps the computation free of
    /// data-dependent branching.
    pub fn inverse(&self, x: &FieldElement) -> Result<FieldElement, FieldError> {
        if x.is_zero() {
            return Ok(FieldElement::ZERO);
        }
        self.pow(x, &FieldElement::MODULUS_MINUS_TWO)
    }

    /// x / y mod r (zero when y is zero)
    pub fn div(&self, x: &FieldElement, y: &FieldElement) -> Result<FieldElement, FieldError> {
        let y_inv = self.inverse(y)?;
        self.mul(x, &y_inv)
    }

    /// x^2 as a plain integer, no reduction.
    pub(crate) fn unreduced_square(&self, x: &FieldElement) -> Result<UnreducedPair, FieldError> {
        let out = self
            .modexp
            .modexp(&x.to_be_bytes(), &[2], &UNREDUCED_MODULUS)?;
        check_output_len(&out, UNREDUCED_SIZE)?;
        Ok(UnreducedPair::from_be_bytes(&out))
    }

    /// Reduce a double-width value mod r.
    pub(crate) fn normalize_double_width(
        &self,
        pair: &UnreducedPair,
    ) -> Result<FieldElement, FieldError> {
        let out = self.modexp.modexp(
            &pair.to_be_bytes(),
            &[1],
            &FieldElement::MODULUS.to_be_bytes(),
        )?;
        reduced_from_output(&out)
    }
}

fn check_output_len(out: &[u8], expected: usize) -> Result<(), FieldError> {
    if out.len() != expected {
        return Err(ModExpError::OutputLength {
            expected,
            actual: out.len(),
        }
        .into());
    }
    Ok(())
}

/// Decode a modexp result taken against r and make sure it is reduced.
fn reduced_from_output(out: &[u8]) -> Result<FieldElement, FieldError> {
    check_output_len(out, WIDE_SIZE)?;
    let fe = FieldElement::from_be_bytes_unchecked(out);
    if fe.is_geq_modulus() {
        return Err(ModExpError::OutputNotReduced.into());
    }
    Ok(fe)
}

impl core::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({})", crate::debug::fe_to_hex(self))
    }
}

impl core::fmt::Display for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::debug::fe_to_hex(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use ark_ff::PrimeField;
    use ark_serialize::CanonicalSerialize;

    type ArkFr = ark_bw6_761::Fr;

    fn fe(hex: &str) -> FieldElement {
        FieldElement::from_hex(hex).unwrap()
    }

    fn x() -> FieldElement {
        FieldElement::from_words_unchecked(
            word_from_be_bytes(&hex_literal::hex!(
                "00000000000000000000000000000000 0199e1755a3a4cdfa17454dba7fa7ac4"
            )),
            word_from_be_bytes(&hex_literal::hex!(
                "0715e575b43a4ed1f47408dc2e2c97d5433a142af15266349437b343298b4b94"
            )),
        )
    }

    fn y() -> FieldElement {
        fe("0x0192a7f9914c19174cfc3a865e64bc8d\
            a3952c1ed52e4e8f41fb45596faa52a6990f4e33da271b475122542ba8d5cf88")
    }

    fn samples() -> Vec<FieldElement> {
        alloc::vec![
            FieldElement::ZERO,
            FieldElement::ONE,
            FieldElement::from_u64(7),
            x(),
            y(),
            fe_neg(&FieldElement::ONE),
            fe_sub(&FieldElement::MODULUS, &FieldElement::from_u64(12345)),
        ]
    }

    fn to_ark(x: &FieldElement) -> ArkFr {
        ArkFr::from_be_bytes_mod_order(&x.to_be_bytes())
    }

    fn ark_bytes(x: &ArkFr) -> Vec<u8> {
        let mut bytes = Vec::new();
        x.serialize_compressed(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_fe_add_simple() {
        let c = fe_add(&FieldElement::from_u64(10), &FieldElement::from_u64(20));
        assert_eq!(c, FieldElement::from_u64(30));
    }

    #[test]
    fn test_fe_add_vector() {
        let expected = fe("0x017e4f28d3c1550c283589a199bdee16\
                           908837a1887389d2177bec05e3cda27bc53e051a9b79817b6051476ed2611b1b");
        assert_eq!(fe_add(&x(), &y()), expected);
        assert_eq!(fe_add(&y(), &x()), expected);
    }

    #[test]
    fn test_fe_sub_both_directions() {
        assert_eq!(
            fe_sub(&x(), &y()),
            fe("0x7397bc8ee33c854781a554995be36\
                6380b956df0c0042b278c382be82452eaa2ac5f7172b4aed43155f1780b57c0c")
        );
        assert_eq!(
            fe_sub(&y(), &x()),
            fe("0x1a700ca4ed6dd2271c2eb6b230b8b04\
                b6a2209c21e9134c6c7a9eacfb8702d16ce0974d18d4b51341f360e87f4a83f5")
        );
    }

    #[test]
    fn test_fe_sub_underflow() {
        let a = FieldElement::from_u64(5);
        let b = FieldElement::from_u64(10);
        let c = fe_sub(&a, &b);
        assert_eq!(
            c,
            fe("0x01ae3a4617c510eac63b05c06ca1493b\
                1a22d9f300f5138f1ef3622fba094800170b5d44300000008508bffffffffffc")
        );
        assert_eq!(fe_add(&c, &b), a);
    }

    #[test]
    fn test_add_sub_properties() {
        for a in samples() {
            assert_eq!(fe_add(&a, &FieldElement::ZERO), a);
            assert_eq!(fe_sub(&a, &a), FieldElement::ZERO);
            assert_eq!(fe_add(&a, &fe_neg(&a)), FieldElement::ZERO);
            for b in samples() {
                assert_eq!(fe_add(&a, &b), fe_add(&b, &a));
                assert_eq!(fe_sub(&fe_add(&a, &b), &b), a);
                assert!(!fe_add(&a, &b).is_geq_modulus());
                assert!(!fe_sub(&a, &b).is_geq_modulus());
            }
        }
    }

    #[test]
    fn test_fe_mul_simple() {
        let field = Field::new();
        let c = field
            .mul(&FieldElement::from_u64(6), &FieldElement::from_u64(7))
            .unwrap();
        assert_eq!(c, FieldElement::from_u64(42));
    }

    #[test]
    fn test_square_vector() {
        let field = Field::new();
        // 205713981876823471916128338707288082226
        let a = fe("0x9ac3125f5c0945f08758a6eb1406c732");
        // 42318242339618055853036318227838751709998714903245007906081872034932937115076
        let expected = fe("0x5d8f46bfb952eabcad134008e8ca626df9e57712432d12563eb79d19c156c5c4");
        assert_eq!(field.square(&a).unwrap(), expected);
        assert_eq!(field.unreduced_square(&a).unwrap().lo, expected);
    }

    #[test]
    fn test_mul_vectors() {
        let field = Field::new();
        assert_eq!(
            field.mul(&x(), &y()).unwrap(),
            fe("0x17782192b3528ac9750390a3acb857e\
                25f15cd965a1dfe7a748eb6522f2559c6ad9b0fb2bb02058fd03555ce1b151b5")
        );
        assert_eq!(
            field.mul(&x(), &x()).unwrap(),
            fe("0x11eb00d817a0b7f29496baea288664a\
                9f96769b51738614a28b2487a54f673f46cc53116cb3eea6d9e74015ba2c704d")
        );
        assert_eq!(
            field.pow_u64(&x(), 5).unwrap(),
            fe("0xda49e56721862be273fb19d5d9e066\
                727a6e8338b4b668412378d50a69fba92686c60023c4529b5e8bee31cf390c4c")
        );
    }

    #[test]
    fn test_mul_properties() {
        let field = Field::new();
        for a in samples() {
            assert_eq!(field.mul(&a, &FieldElement::ONE).unwrap(), a);
            assert_eq!(field.mul(&a, &FieldElement::ZERO).unwrap(), FieldElement::ZERO);
            assert_eq!(field.mul(&a, &a).unwrap(), field.square(&a).unwrap());
            for b in samples() {
                let ab = field.mul(&a, &b).unwrap();
                assert_eq!(ab, field.mul(&b, &a).unwrap());
                assert!(!ab.is_geq_modulus());
            }
        }
    }

    #[test]
    fn test_mul_matches_arkworks() {
        let field = Field::new();
        for a in samples() {
            for b in samples() {
                let ours = field.mul(&a, &b).unwrap();
                let theirs = to_ark(&a) * to_ark(&b);
                assert_eq!(ours.serialize().to_vec(), ark_bytes(&theirs));
            }
        }
    }

    #[test]
    fn test_fe_inv() {
        let field = Field::new();
        let a = FieldElement::from_u64(7);
        let a_inv = field.inverse(&a).unwrap();
        assert_eq!(field.mul(&a, &a_inv).unwrap(), FieldElement::ONE);

        assert_eq!(
            field.inverse(&x()).unwrap(),
            fe("0x39d1c0587d640f364a32bde7fc98\
                a2c9b3ca8c04b7194063ccf0dab69d7e178ca78cb80a7968f3f2ddbc4874ec12")
        );
        for a in samples().into_iter().filter(|a| !a.is_zero()) {
            let inv = field.inverse(&a).unwrap();
            assert_eq!(field.mul(&a, &inv).unwrap(), FieldElement::ONE);
        }
    }

    #[test]
    fn test_fe_zero_inv() {
        let field = Field::new();
        assert_eq!(field.inverse(&FieldElement::ZERO).unwrap(), FieldElement::ZERO);
    }

    #[test]
    fn test_fe_div() {
        let field = Field::new();
        let c = field
            .div(&FieldElement::from_u64(42), &FieldElement::from_u64(7))
            .unwrap();
        assert_eq!(c, FieldElement::from_u64(6));
    }

    #[test]
    fn test_comparisons() {
        assert!(FieldElement::ZERO.is_zero());
        assert!(!FieldElement::ONE.is_zero());
        assert!(FieldElement::MODULUS.is_geq_modulus());
        assert!(!FieldElement::MODULUS_MINUS_TWO.is_geq_modulus());
        // high word dominates
        let big_high = FieldElement::from_words_unchecked([1, 0, 0, 0], WORD_ZERO);
        let big_low = FieldElement::from_words_unchecked(WORD_ZERO, [u64::MAX; 4]);
        assert!(big_high.gt(&big_low));
        assert!(!big_low.gt(&big_high));
        assert!(!big_low.gt(&big_low));
    }

    #[test]
    fn test_serialize_roundtrip() {
        for a in samples() {
            let bytes = a.serialize();
            assert_eq!(FieldElement::deserialize(&bytes).unwrap(), a);
            assert_eq!(bytes.to_vec(), ark_bytes(&to_ark(&a)));
        }
        assert_eq!(
            x().serialize().to_vec(),
            hex::decode(
                "944b8b2943b33794346652f12a143a43d5972c2edc0874f4d14e3ab475e51507\
                 c47afaa7db5474a1df4c3a5a75e19901"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_deserialize_rejects() {
        assert_eq!(
            FieldElement::deserialize(&[0u8; 47]),
            Err(FieldError::InvalidLength {
                expected: 48,
                actual: 47
            })
        );
        let mut modulus_le = crate::types::MODULUS_BYTES;
        modulus_le.reverse();
        assert_eq!(
            FieldElement::deserialize(&modulus_le),
            Err(FieldError::NonCanonical)
        );
    }

    #[test]
    fn test_from_random_bytes() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0x01;
        bytes[15] = 0x80;
        let a = FieldElement::from_random_bytes(&bytes);
        assert_eq!(a.high, WORD_ZERO);
        assert_eq!(a.low, [1, 0x8000000000000000, 0, 0]);
    }

    #[test]
    fn test_from_chunk() {
        let mut chunk = [0u8; 32];
        chunk[31] = 0xff;
        chunk[0] = 0x80;
        let a = FieldElement::from_chunk(&chunk);
        assert_eq!(a.high, WORD_ZERO);
        assert_eq!(a.low, [0xff, 0, 0, 0x8000000000000000]);
    }

    #[test]
    fn test_from_hex_rejects() {
        assert_eq!(FieldElement::from_hex("0x"), Err(FieldError::InvalidHex));
        assert_eq!(FieldElement::from_hex("0xzz"), Err(FieldError::InvalidHex));
        assert_eq!(
            FieldElement::from_hex(
                "0x01ae3a4617c510eac63b05c06ca1493b1a22d9f300f5138f1ef3622fba094800170b5d44300000008508c00000000001"
            ),
            Err(FieldError::NonCanonical)
        );
    }

    struct FailingModExp;

    impl ModExp for FailingModExp {
        fn modexp(&self, _: &[u8], _: &[u8], _: &[u8]) -> Result<Vec<u8>, ModExpError> {
            Err(ModExpError::OperandTooLarge { len: 0, max: 0 })
        }
    }

    struct TruncatingModExp;

    impl ModExp for TruncatingModExp {
        fn modexp(&self, _: &[u8], _: &[u8], _: &[u8]) -> Result<Vec<u8>, ModExpError> {
            Ok(alloc::vec![0u8; 3])
        }
    }

    #[test]
    fn test_capability_failure_propagates() {
        let field = Field::with_modexp(FailingModExp);
        let err = FieldError::ModExp(ModExpError::OperandTooLarge { len: 0, max: 0 });
        assert_eq!(field.mul(&x(), &y()), Err(err.clone()));
        assert_eq!(field.square(&x()), Err(err.clone()));
        assert_eq!(field.inverse(&x()), Err(err));
        // zero never reaches the capability
        assert_eq!(field.inverse(&FieldElement::ZERO), Ok(FieldElement::ZERO));
    }

    #[test]
    fn test_malformed_capability_output_rejected() {
        let field = Field::with_modexp(TruncatingModExp);
        assert_eq!(
            field.mul(&x(), &y()),
            Err(FieldError::ModExp(ModExpError::OutputLength {
                expected: 128,
                actual: 3
            }))
        );
    }
}
