use serde::{Deserialize, Serialize};

use crate::rules::verification::ParcelAttributes;

/// Identifier wrapper for registered farmers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FarmerId(pub String);

/// Review state of a farmer's profile against submitted insurance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FarmerVerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl FarmerVerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

/// How the current verification status was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    Auto,
    Manual,
    Pending,
}

/// Identity and agronomic profile for a registered farmer.
///
/// Verification fields are mutated by the matcher side effects
/// (`services::verification`) and by manual admin review; the engine never
/// deletes a farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: FarmerId,
    pub first_name: String,
    pub last_name: String,
    /// Single declared crop from registration.
    pub crop_type: Option<String>,
    pub rsbsa_registered: bool,
    pub is_certified: bool,
    pub lot_number: Option<String>,
    /// Hectares.
    pub lot_area: Option<f64>,
    pub is_verified: bool,
    pub verification_status: FarmerVerificationStatus,
    pub verification_method: VerificationMethod,
    pub verification_notes: Option<String>,
    pub matched_insurance_count: u32,
}

impl Farmer {
    /// Attributes the verification matcher compares against a submission.
    pub fn parcel_attributes(&self) -> ParcelAttributes {
        ParcelAttributes {
            lot_number: self.lot_number.clone(),
            crop_type: self.crop_type.clone(),
            lot_area: self.lot_area,
        }
    }
}
