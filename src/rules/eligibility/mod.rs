mod policy;
mod rules;

pub use policy::EligibilityFactor;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::assistance::{AssistanceApplication, AssistanceProgram, Quarter};
use crate::domain::farmer::Farmer;
use crate::domain::insurance::CropInsuranceRecord;

/// The five independent gate factors. Each is true when the corresponding
/// requirement is satisfied; `already_applied` is the one negative signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityFactors {
    pub already_applied: bool,
    pub crop_type_match: bool,
    pub rsbsa_eligible: bool,
    pub certification_eligible: bool,
    pub stock_available: bool,
}

/// Full evaluator output, stored verbatim on the application as its audit
/// snapshot. `reasons` holds one human-readable rejection reason per failed
/// factor; the key order encodes the documented display priority, so the
/// first entry is the one to show when only a single reason fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub quarter: Quarter,
    pub requested_quantity: f64,
    pub crop_set: Vec<String>,
    pub factors: EligibilityFactors,
    pub reasons: BTreeMap<EligibilityFactor, String>,
}

impl EligibilityResult {
    /// Highest-priority rejection reason, if any.
    pub fn primary_reason(&self) -> Option<&str> {
        self.reasons.values().next().map(String::as_str)
    }
}

/// Evaluate a farmer's eligibility for an assistance program.
///
/// The quarter is derived from `today`, never from a stored field. The
/// farmer's crop set is the case-insensitive union of crops on insurance
/// records inside their window, crops on all records, and the registered
/// crop. The stock factor is a bare existence check; the stricter
/// quantity-sufficiency test happens at submission time in the service
/// layer. Malformed or missing data never raises here; it surfaces as an
/// unmet factor with a reason.
pub fn evaluate(
    farmer: &Farmer,
    insurance_records: &[CropInsuranceRecord],
    program: &AssistanceProgram,
    requested_quantity: f64,
    prior_applications: &[AssistanceApplication],
    today: NaiveDate,
) -> EligibilityResult {
    let quarter = Quarter::from_date(today);
    let crop_set = rules::crop_set(farmer, insurance_records, today);
    let factors = rules::evaluate_factors(farmer, &crop_set, program, prior_applications, quarter);

    let eligible = !factors.already_applied
        && factors.crop_type_match
        && factors.rsbsa_eligible
        && factors.certification_eligible
        && factors.stock_available;

    let reasons = policy::rejection_reasons(&factors, program, quarter);

    EligibilityResult {
        eligible,
        quarter,
        requested_quantity,
        crop_set: crop_set.into_iter().collect(),
        factors,
        reasons,
    }
}
