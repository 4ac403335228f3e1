//! Fiat-Shamir transcript using Keccak256
//!
//! Field elements are absorbed through their canonical 48-byte encoding and
//! points through the group's compressed encoding. A challenge is the first
//! 16 digest bytes read as a little-endian integer, so it is always below r.

use sha3::{Digest, Keccak256};

use crate::errors::GroupError;
use crate::ops::CommitmentGroup;
use crate::types::FieldElement;

/// Bytes of the digest used per challenge
pub const CHALLENGE_BYTES: usize = 16;

/// Transcript for Fiat-Shamir challenge generation
#[derive(Clone)]
pub struct Transcript {
    hasher: Keccak256,
}

impl Transcript {
    /// Create a transcript bound to a domain separator
    pub fn new(label: &[u8]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(label);
        Self { hasher }
    }

    /// Append a u64 value (as 32-byte big-endian)
    pub fn append_u64(&mut self, val: u64) {
        let mut bytes = [0u8; 32];
        bytes[24..32].copy_from_slice(&val.to_be_bytes());
        self.hasher.update(bytes);
    }

    pub fn append_field(&mut self, value: &FieldElement) {
        self.hasher.update(value.serialize());
    }

    pub fn append_fields(&mut self, values: &[FieldElement]) {
        for value in values {
            self.append_field(value);
        }
    }

    /// Append a commitment in the group's compressed encoding
    pub fn append_point<G: CommitmentGroup>(
        &mut self,
        group: &G,
        point: &G::Point,
    ) -> Result<(), GroupError> {
        let bytes = group.serialize(point)?;
        self.hasher.update(&bytes);
        Ok(())
    }

    /// Append raw bytes to the transcript
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Squeeze a challenge. The hasher is reset and the full digest is
    /// absorbed for chaining.
    pub fn challenge(&mut self) -> FieldElement {
        let digest = self.hasher.finalize_reset();
        crate::trace!("transcript digest = {:02x?}", &digest[0..8]);

        let mut seed = [0u8; CHALLENGE_BYTES];
        seed.copy_from_slice(&digest[..CHALLENGE_BYTES]);
        self.hasher.update(digest);

        let challenge = FieldElement::from_random_bytes(&seed);
        crate::dbg_fe!("challenge", &challenge);
        challenge
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(crate::constants::APK_DOMAIN_SEP)
    }
}
