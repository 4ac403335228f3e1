pub mod eval;
pub mod lagrange;
