use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::EligibilityFactors;
use crate::domain::assistance::{AssistanceProgram, Quarter};

/// Keys for the per-factor rejection reasons.
///
/// The variant order is the documented display priority for callers that can
/// only show a single reason: RSBSA first, then crop type, the quarter
/// quota, certification, and finally stock. `BTreeMap` iteration follows
/// this order, which is what makes `primary_reason` deterministic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityFactor {
    Rsbsa,
    CropType,
    AlreadyApplied,
    Certification,
    Stock,
}

impl EligibilityFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rsbsa => "rsbsa",
            Self::CropType => "crop_type",
            Self::AlreadyApplied => "already_applied",
            Self::Certification => "certification",
            Self::Stock => "stock",
        }
    }
}

/// One rejection reason per failed factor, keyed in priority order.
pub(crate) fn rejection_reasons(
    factors: &EligibilityFactors,
    program: &AssistanceProgram,
    quarter: Quarter,
) -> BTreeMap<EligibilityFactor, String> {
    let mut reasons = BTreeMap::new();

    if !factors.rsbsa_eligible {
        reasons.insert(
            EligibilityFactor::Rsbsa,
            "Program requires RSBSA registration".to_string(),
        );
    }
    if !factors.crop_type_match {
        let crop = program.crop_type.as_deref().unwrap_or("the required crop");
        reasons.insert(
            EligibilityFactor::CropType,
            format!("Program is limited to {crop} growers"),
        );
    }
    if factors.already_applied {
        reasons.insert(
            EligibilityFactor::AlreadyApplied,
            format!("An application for this program already exists for {quarter}"),
        );
    }
    if !factors.certification_eligible {
        reasons.insert(
            EligibilityFactor::Certification,
            "Program requires certified farmers".to_string(),
        );
    }
    if !factors.stock_available {
        reasons.insert(
            EligibilityFactor::Stock,
            "Program has no remaining stock".to_string(),
        );
    }

    reasons
}
