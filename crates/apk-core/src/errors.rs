//! Error types for the accountable aggregate-key verifier

extern crate alloc;
use alloc::string::String;
use thiserror::Error;

/// Top-level evaluation error. Every variant is terminal: the proof must be
/// rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Field error: {0}")]
    Field(FieldError),

    #[error("Group error: {0}")]
    Group(#[from] GroupError),

    #[error("Invalid domain size: {0}")]
    InvalidDomainSize(u64),

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Consistency check failed: {0}")]
    ConsistencyCheckFailure(&'static str),

    #[error("Evaluation point lies in the domain")]
    PointInDomain,
}

impl From<FieldError> for VerifyError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::LengthMismatch { expected, actual } => {
                VerifyError::LengthMismatch { expected, actual }
            }
            other => VerifyError::Field(other),
        }
    }
}

/// Field engine errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Modexp capability failed: {0}")]
    ModExp(#[from] ModExpError),

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid encoding length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Value is not below the field modulus")]
    NonCanonical,

    #[error("Invalid hex string")]
    InvalidHex,
}

/// Failures of the modular-exponentiation capability
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModExpError {
    #[error("Modulus is zero")]
    ZeroModulus,

    #[error("Operand too large: {len} bytes (max {max})")]
    OperandTooLarge { len: usize, max: usize },

    #[error("Unexpected output length: expected {expected}, got {actual}")]
    OutputLength { expected: usize, actual: usize },

    #[error("Output not reduced below the modulus")]
    OutputNotReduced,
}

/// Commitment group errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("Invalid point encoding: {0}")]
    InvalidPoint(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Length mismatch: {points} points, {scalars} scalars")]
    MsmLengthMismatch { points: usize, scalars: usize },
}
