//! Commitment group operations
//!
//! Commitments are points of the BW6-761 G1 group, whose scalar field is the
//! field implemented in [`crate::field`]. The evaluator talks to the group
//! through [`CommitmentGroup`]; [`Bw6G1`] is the arkworks-backed
//! implementation (feature `ark`).

extern crate alloc;
use alloc::vec::Vec;

use crate::errors::GroupError;
use crate::types::FieldElement;

/// Group capability used to fold commitments.
pub trait CommitmentGroup {
    type Point: Clone + PartialEq + core::fmt::Debug;

    /// Point at infinity
    fn identity(&self) -> Self::Point;

    fn add(&self, a: &Self::Point, b: &Self::Point) -> Result<Self::Point, GroupError>;

    fn scalar_mul(
        &self,
        point: &Self::Point,
        scalar: &FieldElement,
    ) -> Result<Self::Point, GroupError>;

    /// Canonical (compressed) encoding
    fn serialize(&self, point: &Self::Point) -> Result<Vec<u8>, GroupError>;

    fn deserialize(&self, bytes: &[u8]) -> Result<Self::Point, GroupError>;

    /// Multi-scalar multiplication: ∑ scalars[i] * points[i]
    fn msm(
        &self,
        points: &[Self::Point],
        scalars: &[FieldElement],
    ) -> Result<Self::Point, GroupError> {
        if points.len() != scalars.len() {
            return Err(GroupError::MsmLengthMismatch {
                points: points.len(),
                scalars: scalars.len(),
            });
        }
        let mut acc = self.identity();
        for (point, scalar) in points.iter().zip(scalars) {
            let term = self.scalar_mul(point, scalar)?;
            acc = self.add(&acc, &term)?;
        }
        Ok(acc)
    }
}

#[cfg(feature = "ark")]
pub use ark_backend::{to_ark_scalar, Bw6G1};

#[cfg(feature = "ark")]
mod ark_backend {
    use super::*;
    use alloc::format;
    use ark_bw6_761::{Fr, G1Affine};
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::PrimeField;
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

    /// BW6-761 G1 via arkworks
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Bw6G1;

    /// Convert a field element to the arkworks scalar type
    pub fn to_ark_scalar(scalar: &FieldElement) -> Fr {
        Fr::from_be_bytes_mod_order(&scalar.to_be_bytes())
    }

    impl CommitmentGroup for Bw6G1 {
        type Point = G1Affine;

        fn identity(&self) -> G1Affine {
            G1Affine::zero()
        }

        fn add(&self, a: &G1Affine, b: &G1Affine) -> Result<G1Affine, GroupError> {
            Ok((*a + *b).into_affine())
        }

        fn scalar_mul(
            &self,
            point: &G1Affine,
            scalar: &FieldElement,
        ) -> Result<G1Affine, GroupError> {
            Ok((*point * to_ark_scalar(scalar)).into_affine())
        }

        fn serialize(&self, point: &G1Affine) -> Result<Vec<u8>, GroupError> {
            let mut bytes = Vec::with_capacity(point.compressed_size());
            point
                .serialize_compressed(&mut bytes)
                .map_err(|e| GroupError::Serialization(format!("{:?}", e)))?;
            Ok(bytes)
        }

        fn deserialize(&self, bytes: &[u8]) -> Result<G1Affine, GroupError> {
            G1Affine::deserialize_compressed(bytes)
                .map_err(|e| GroupError::InvalidPoint(format!("{:?}", e)))
        }
    }
}
