use serde::{Deserialize, Serialize};

use super::farmer::FarmerId;

/// Lifecycle of a disaster-damage claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Disaster-damage claim filed against a farmer's parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Globally unique, generated by the claim service's bounded retry loop.
    pub claim_number: String,
    pub farmer_id: FarmerId,
    pub crop: String,
    /// Hectares.
    pub area_damaged: f64,
    /// Percent; the engine does not clamp this to [0, 100].
    pub degree_of_damage: f64,
    /// Informational only; the compensation formula ignores it.
    pub damage_type: String,
    pub status: ClaimStatus,
    /// Set by the compensation calculator on approval, or supplied manually.
    pub compensation: Option<f64>,
}
