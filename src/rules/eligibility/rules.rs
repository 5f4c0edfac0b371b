use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::EligibilityFactors;
use crate::domain::assistance::{AssistanceApplication, AssistanceProgram, Quarter};
use crate::domain::farmer::Farmer;
use crate::domain::insurance::CropInsuranceRecord;

/// Union of the farmer's insured and registered crop types, normalized to
/// lowercase for case-insensitive membership tests.
pub(crate) fn crop_set(
    farmer: &Farmer,
    insurance_records: &[CropInsuranceRecord],
    today: NaiveDate,
) -> BTreeSet<String> {
    let mut crops = BTreeSet::new();

    for record in insurance_records {
        if record.remaining_days(today) >= 0 {
            insert_crop(&mut crops, &record.crop_type);
        }
    }
    for record in insurance_records {
        insert_crop(&mut crops, &record.crop_type);
    }
    if let Some(declared) = &farmer.crop_type {
        insert_crop(&mut crops, declared);
    }

    crops
}

fn insert_crop(crops: &mut BTreeSet<String>, crop: &str) {
    let normalized = crop.trim().to_lowercase();
    if !normalized.is_empty() {
        crops.insert(normalized);
    }
}

pub(crate) fn evaluate_factors(
    farmer: &Farmer,
    crops: &BTreeSet<String>,
    program: &AssistanceProgram,
    prior_applications: &[AssistanceApplication],
    quarter: Quarter,
) -> EligibilityFactors {
    let already_applied = prior_applications.iter().any(|application| {
        application.farmer_id == farmer.id
            && application.program_id == program.id
            && application.quarter == quarter
            && application.status.counts_against_quota()
    });

    let crop_type_match = match &program.crop_type {
        Some(required) => crops.contains(&required.trim().to_lowercase()),
        None => true,
    };

    let rsbsa_eligible = !program.requires_rsbsa || farmer.rsbsa_registered;
    let certification_eligible = !program.requires_certification || farmer.is_certified;
    let stock_available = program.available_quantity > 0.0;

    EligibilityFactors {
        already_applied,
        crop_type_match,
        rsbsa_eligible,
        certification_eligible,
        stock_available,
    }
}
