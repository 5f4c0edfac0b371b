//! Read-decide-write facades around the pure rules. Each service composes a
//! storage trait with one or more engine functions; the storage traits carry
//! the atomic conditional operations that keep the quarter-quota and
//! inventory invariants under concurrent submissions.

pub mod assistance;
pub mod claims;
pub mod repository;
pub mod verification;

#[cfg(test)]
mod tests;

pub use assistance::{
    AssistanceService, AssistanceServiceError, RejectedSubmission, SubmissionOutcome,
};
pub use claims::{ClaimIntake, ClaimService, ClaimServiceError};
pub use repository::{ApplicationStore, ClaimStore, ProgramInventory, StoreError};
pub use verification::verify_and_apply;
