use crate::domain::assistance::{
    ApplicationId, AssistanceApplication, AssistanceProgram, ProgramId, Quarter,
};
use crate::domain::claim::Claim;
use crate::domain::farmer::FarmerId;

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: f64, requested: f64 },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for assistance applications.
///
/// `insert_unique` must atomically combine the quota existence check with the
/// insert: it fails with [`StoreError::Conflict`] when another application for
/// the same farmer, program, and quarter already holds a quota-counting
/// status. A separate read followed by a plain insert would let two
/// concurrent submissions both pass the check.
pub trait ApplicationStore: Send + Sync {
    fn insert_unique(
        &self,
        application: AssistanceApplication,
    ) -> Result<AssistanceApplication, StoreError>;
    fn update(&self, application: AssistanceApplication) -> Result<(), StoreError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<AssistanceApplication>, StoreError>;
    /// Prior applications for the farmer + program + quarter whose status
    /// counts against the once-per-quarter quota.
    fn quota_applications(
        &self,
        farmer_id: &FarmerId,
        program_id: &ProgramId,
        quarter: &Quarter,
    ) -> Result<Vec<AssistanceApplication>, StoreError>;
}

/// Storage abstraction for program inventory.
///
/// `deduct` must be an atomic conditional decrement: it refuses to draw the
/// quantity below zero (returning [`StoreError::InsufficientStock`]) and
/// flips the program to `out_of_stock` exactly when the remainder reaches
/// zero, in the same operation.
pub trait ProgramInventory: Send + Sync {
    fn fetch(&self, id: &ProgramId) -> Result<Option<AssistanceProgram>, StoreError>;
    fn deduct(&self, id: &ProgramId, quantity: f64) -> Result<AssistanceProgram, StoreError>;
}

/// Storage abstraction for claims, including the claim-number existence
/// lookup consumed by the bounded retry loop.
pub trait ClaimStore: Send + Sync {
    fn exists(&self, claim_number: &str) -> Result<bool, StoreError>;
    fn insert(&self, claim: Claim) -> Result<Claim, StoreError>;
    fn update(&self, claim: Claim) -> Result<(), StoreError>;
    fn fetch(&self, claim_number: &str) -> Result<Option<Claim>, StoreError>;
}
