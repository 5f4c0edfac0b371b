//! Shared entities referenced across the rules modules. All four engines
//! operate on these values; loading and persisting them belongs to the
//! storage collaborators.

pub mod assistance;
pub mod claim;
pub mod farmer;
pub mod insurance;

pub use assistance::{
    ApplicationId, ApplicationStatus, AssistanceApplication, AssistanceProgram, FiledBy,
    ProgramId, ProgramStatus, Quarter,
};
pub use claim::{Claim, ClaimStatus};
pub use farmer::{Farmer, FarmerId, FarmerVerificationStatus, VerificationMethod};
pub use insurance::{
    CoverageRequest, CropInsuranceRecord, InsuranceDetails, InsuranceError, InsuranceWindowState,
};
