//! Core types for accountable aggregate-key verification
//!
//! Field elements of the BW6-761 scalar field (the BLS12-377 base field) are
//! stored as a pair of 256-bit words `(high, low)`. Each word is 4 x u64 limbs
//! in little-endian limb order, the same layout the limb arithmetic works on.

use hex_literal::hex;

/// A 256-bit word as 4 x u64 limbs (least significant limb first).
pub type Word = [u64; 4];

/// A 256-bit bitmask chunk, big-endian.
pub type BitmaskChunk = [u8; 32];

/// Size of the canonical serialization of a field element.
pub const SERIALIZED_SIZE: usize = 48;

/// Size of a `(high, low)` pair as big-endian bytes.
pub const WIDE_SIZE: usize = 64;

/// Size of an unreduced double-width value as big-endian bytes.
pub const UNREDUCED_SIZE: usize = 128;

pub const WORD_ZERO: Word = [0u64; 4];

/// Scalar field modulus r, big-endian
/// r = 0x01ae3a4617c510eac63b05c06ca1493b1a22d9f300f5138f1ef3622fba094800170b5d44300000008508c00000000001
pub const MODULUS_BYTES: [u8; SERIALIZED_SIZE] = hex!(
    "01ae3a4617c510eac63b05c06ca1493b1a22d9f300f5138f1ef3622fba094800170b5d44300000008508c00000000001"
);

/// An element of the scalar field, `high * 2^256 + low`.
///
/// Every value handed out by an arithmetic operation is strictly below the
/// modulus. Equality is structural on `(high, low)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement {
    pub(crate) high: Word,
    pub(crate) low: Word,
}

impl FieldElement {
    pub const ZERO: Self = Self::from_words_unchecked(WORD_ZERO, WORD_ZERO);
    pub const ONE: Self = Self::from_words_unchecked(WORD_ZERO, [1, 0, 0, 0]);
    pub const TWO: Self = Self::from_words_unchecked(WORD_ZERO, [2, 0, 0, 0]);

    /// The modulus r itself. Not a field element; used for comparisons and
    /// reductions.
    pub const MODULUS: Self = Self::from_words_unchecked(
        [0xc63b05c06ca1493b, 0x01ae3a4617c510ea, 0, 0],
        [
            0x8508c00000000001,
            0x170b5d4430000000,
            0x1ef3622fba094800,
            0x1a22d9f300f5138f,
        ],
    );

    /// r - 2, the Fermat inversion exponent.
    pub const MODULUS_MINUS_TWO: Self = Self::from_words_unchecked(
        [0xc63b05c06ca1493b, 0x01ae3a4617c510ea, 0, 0],
        [
            0x8508bfffffffffff,
            0x170b5d4430000000,
            0x1ef3622fba094800,
            0x1a22d9f300f5138f,
        ],
    );

    /// Build from raw words without checking the value against the modulus.
    pub(crate) const fn from_words_unchecked(high: Word, low: Word) -> Self {
        Self { high, low }
    }

    /// High word (bits 256..)
    pub fn high(&self) -> &Word {
        &self.high
    }

    /// Low word (bits 0..256)
    pub fn low(&self) -> &Word {
        &self.low
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub const fn one() -> Self {
        Self::ONE
    }

    pub const fn two() -> Self {
        Self::TWO
    }

    pub const fn modulus() -> Self {
        Self::MODULUS
    }
}

/// A double-width magnitude `hi * 2^512 + lo` awaiting reduction.
///
/// Only lives inside multiplication: `hi` and `lo` hold raw words and are not
/// reduced field elements.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) struct UnreducedPair {
    pub hi: FieldElement,
    pub lo: FieldElement,
}
