//! Verifier-side evaluation for accountable aggregate-key proofs on BW6-761
//!
//! The crate has two layers:
//!
//! - a scalar-field engine ([`FieldElement`], [`Field`]) for the 377-bit
//!   BW6-761 scalar field, built on 256-bit word carry chains and a
//!   [`ModExp`] capability for everything multiplicative
//! - the accountability evaluator ([`AccountableEvaluations`]), which checks
//!   the packed-bitmask constraints and restores the linearization
//!   commitment on top of a [`BasicProtocolEvaluator`]
//!
//! # Example
//!
//! ```ignore
//! use apk_verifier_core::{Domain, Field, FieldElement};
//!
//! let field = Field::new();
//! let domain = Domain::new(&field, 512)?;
//! let lagrange = domain.lagrange_evaluations(&field, &zeta)?;
//! let constraints = evaluations.evaluate_constraint_polynomials(
//!     &field, &lagrange, &r, &bitmask, 512,
//! )?;
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod accountable;
pub mod arith;
pub mod basic;
pub mod constants;
pub mod debug;
pub mod errors;
pub mod field;
pub mod lagrange;
pub mod modexp;
pub mod ops;
#[cfg(feature = "sha3")]
pub mod transcript;
pub mod types;
pub mod utils;

pub use accountable::{
    AccountableCommitments, AccountableEvaluations, Evaluation, ProtocolInputs, NUM_CONSTRAINTS,
};
pub use basic::{BasicProtocolEvaluator, PrecomputedBasicEvaluations, BASIC_CONSTRAINTS};
pub use errors::{FieldError, GroupError, ModExpError, VerifyError};
pub use field::{fe_add, fe_neg, fe_sub, Field};
pub use lagrange::{Domain, LagrangeEvaluations};
pub use modexp::{ModExp, NativeModExp};
pub use ops::CommitmentGroup;
#[cfg(feature = "ark")]
pub use ops::Bw6G1;
#[cfg(feature = "sha3")]
pub use transcript::Transcript;
pub use types::{BitmaskChunk, FieldElement};
