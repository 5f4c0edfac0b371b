use tracing::info;

use crate::domain::farmer::{Farmer, FarmerVerificationStatus, VerificationMethod};
use crate::domain::insurance::CropInsuranceRecord;
use crate::rules::verification::{verify_parcel, MatchStatus, VerificationReport};

/// Run the verification matcher over a farmer and one of their insurance
/// records, store the outcome on the record, and apply the farmer-side
/// effects.
///
/// A full match auto-verifies the farmer and bumps the matched-record
/// counter; a mismatch flags the profile for manual review with the notes
/// attached. A warning leaves the farmer untouched — only the record carries
/// the outcome. That asymmetry mirrors the observed production behavior and
/// is pinned by the test suite rather than smoothed over.
pub fn verify_and_apply(
    farmer: &mut Farmer,
    record: &mut CropInsuranceRecord,
) -> VerificationReport {
    let report = verify_parcel(&farmer.parcel_attributes(), &record.parcel_attributes());

    record.verification_status = Some(report.status);
    record.verification_notes = Some(report.notes.clone());

    match report.status {
        MatchStatus::Matched => {
            farmer.is_verified = true;
            farmer.verification_status = FarmerVerificationStatus::Verified;
            farmer.verification_method = VerificationMethod::Auto;
            farmer.matched_insurance_count += 1;
            info!(farmer = %farmer.id.0, "farmer auto-verified against insurance record");
        }
        MatchStatus::Mismatch => {
            farmer.verification_status = FarmerVerificationStatus::Pending;
            farmer.verification_notes = Some(report.notes.clone());
            info!(farmer = %farmer.id.0, "farmer flagged for manual review");
        }
        MatchStatus::Warning => {}
    }

    report
}
