//! The pure decision functions of the platform: compensation formulas,
//! attribute matching, and assistance eligibility. Every function here is
//! deterministic over its arguments; the wall clock enters only as an
//! explicit parameter supplied by the caller.

pub mod compensation;
pub mod eligibility;
pub mod verification;
