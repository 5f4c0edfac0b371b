use serde::{Deserialize, Serialize};

/// Relative tolerance applied to lot-area comparisons, as a fraction of the
/// farmer's registered figure.
const LOT_AREA_TOLERANCE: f64 = 0.10;

/// The three comparable parcel attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelAttribute {
    LotNumber,
    CropType,
    LotArea,
}

impl ParcelAttribute {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LotNumber => "Lot Number",
            Self::CropType => "Crop Type",
            Self::LotArea => "Lot Area",
        }
    }
}

/// Attribute snapshot from either side of a comparison. An attribute is only
/// compared when both sides provide it; otherwise it is silently skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParcelAttributes {
    pub lot_number: Option<String>,
    pub crop_type: Option<String>,
    pub lot_area: Option<f64>,
}

/// Outcome bucket for a verification run. Zero mismatches is a match even
/// when nothing was comparable; a single mismatch is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    Mismatch,
    Warning,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Mismatch => "mismatch",
            Self::Warning => "warning",
        }
    }
}

/// One attribute that disagreed between the farmer profile and the
/// submission, with both raw values for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeMismatch {
    pub attribute: ParcelAttribute,
    pub farmer_value: String,
    pub submitted_value: String,
}

impl AttributeMismatch {
    fn note(&self) -> String {
        format!(
            "{}: Farmer \"{}\" vs Insurance \"{}\"",
            self.attribute.label(),
            self.farmer_value,
            self.submitted_value
        )
    }
}

/// Result of matching a farmer profile against submitted insurance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub status: MatchStatus,
    pub matches: Vec<ParcelAttribute>,
    pub mismatches: Vec<AttributeMismatch>,
    pub notes: String,
}

/// Compare the farmer's registered parcel attributes against a submission.
///
/// Strings are trimmed and compared case-insensitively; the lot area matches
/// when the submitted figure is within 10 % of the farmer's. The status
/// depends only on the mismatch count, so a run with nothing comparable
/// reports `Matched`.
pub fn verify_parcel(
    farmer: &ParcelAttributes,
    submission: &ParcelAttributes,
) -> VerificationReport {
    let mut matches = Vec::new();
    let mut mismatches = Vec::new();

    compare_text(
        ParcelAttribute::LotNumber,
        farmer.lot_number.as_deref(),
        submission.lot_number.as_deref(),
        &mut matches,
        &mut mismatches,
    );
    compare_text(
        ParcelAttribute::CropType,
        farmer.crop_type.as_deref(),
        submission.crop_type.as_deref(),
        &mut matches,
        &mut mismatches,
    );

    if let (Some(registered), Some(submitted)) = (farmer.lot_area, submission.lot_area) {
        if (registered - submitted).abs() <= LOT_AREA_TOLERANCE * registered {
            matches.push(ParcelAttribute::LotArea);
        } else {
            mismatches.push(AttributeMismatch {
                attribute: ParcelAttribute::LotArea,
                farmer_value: registered.to_string(),
                submitted_value: submitted.to_string(),
            });
        }
    }

    let status = match mismatches.len() {
        0 => MatchStatus::Matched,
        1 => MatchStatus::Warning,
        _ => MatchStatus::Mismatch,
    };

    let notes = build_notes(&matches, &mismatches);

    VerificationReport {
        status,
        matches,
        mismatches,
        notes,
    }
}

fn compare_text(
    attribute: ParcelAttribute,
    registered: Option<&str>,
    submitted: Option<&str>,
    matches: &mut Vec<ParcelAttribute>,
    mismatches: &mut Vec<AttributeMismatch>,
) {
    let (Some(registered), Some(submitted)) = (registered, submitted) else {
        return;
    };

    let left = registered.trim();
    let right = submitted.trim();
    if left.eq_ignore_ascii_case(right) {
        matches.push(attribute);
    } else {
        mismatches.push(AttributeMismatch {
            attribute,
            farmer_value: left.to_string(),
            submitted_value: right.to_string(),
        });
    }
}

fn build_notes(matches: &[ParcelAttribute], mismatches: &[AttributeMismatch]) -> String {
    let mut parts = Vec::new();
    if !matches.is_empty() {
        let names: Vec<&str> = matches.iter().map(|attribute| attribute.label()).collect();
        parts.push(format!("Matched: {}", names.join(", ")));
    }
    for mismatch in mismatches {
        parts.push(mismatch.note());
    }
    parts.join("; ")
}
