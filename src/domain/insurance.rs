use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::farmer::FarmerId;
use crate::rules::verification::{MatchStatus, ParcelAttributes};

/// One insurance record per declared crop parcel.
///
/// The deadline and the cached `can_insure` flag are recomputed on every
/// write through [`CropInsuranceRecord::refresh`]; there is no background
/// sweep. Readers that need an authoritative answer must use the live
/// [`CropInsuranceRecord::can_still_insure`] / [`CropInsuranceRecord::remaining_days`]
/// queries, never the cached flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInsuranceRecord {
    pub farmer_id: FarmerId,
    pub crop_type: String,
    pub lot_number: Option<String>,
    /// Hectares.
    pub lot_area: Option<f64>,
    pub planting_date: Option<NaiveDate>,
    /// Crop-specific number of days after planting during which the parcel
    /// may still be insured.
    pub insurance_day_limit: Option<i64>,
    /// Derived on write from planting date + day limit.
    pub insurance_deadline: Option<NaiveDate>,
    pub is_insured: bool,
    /// Write-time hint only; stale by design between writes.
    pub can_insure: bool,
    pub verification_status: Option<MatchStatus>,
    pub verification_notes: Option<String>,
    pub insurance: Option<InsuranceDetails>,
}

/// Coverage details stamped exactly once when a record is insured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceDetails {
    pub insured_on: NaiveDate,
    pub insurance_type: String,
    pub agency: String,
    pub premium_amount: f64,
}

/// Inbound request to insure a record; the insurance date defaults to the
/// current day when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRequest {
    pub insured_on: Option<NaiveDate>,
    pub insurance_type: String,
    pub agency: String,
    pub premium_amount: f64,
}

/// Descriptive window state for display; decisions use the live queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceWindowState {
    Insurable,
    Insured,
    Expired,
}

impl InsuranceWindowState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Insurable => "insurable",
            Self::Insured => "insured",
            Self::Expired => "expired",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InsuranceError {
    #[error("record is already insured")]
    AlreadyInsured,
    #[error("insurance window closed on {deadline:?}; a new record is required")]
    WindowExpired { deadline: Option<NaiveDate> },
}

impl CropInsuranceRecord {
    pub fn new(farmer_id: FarmerId, crop_type: impl Into<String>) -> Self {
        Self {
            farmer_id,
            crop_type: crop_type.into(),
            lot_number: None,
            lot_area: None,
            planting_date: None,
            insurance_day_limit: None,
            insurance_deadline: None,
            is_insured: false,
            can_insure: true,
            verification_status: None,
            verification_notes: None,
            insurance: None,
        }
    }

    /// Write hook: recompute the deadline and refresh the cached flag.
    ///
    /// The cached `can_insure` is only ever flipped to `false` here; callers
    /// that extend a deadline on edit are responsible for resetting it.
    pub fn refresh(&mut self, today: NaiveDate) {
        self.insurance_deadline = match (self.planting_date, self.insurance_day_limit) {
            (Some(planted), Some(limit)) => Some(planted + Duration::days(limit)),
            _ => None,
        };

        if !self.is_insured {
            if let Some(deadline) = self.insurance_deadline {
                if today > deadline {
                    self.can_insure = false;
                }
            }
        }
    }

    /// Live insurability query; a record without a computed deadline is not
    /// insurable.
    pub fn can_still_insure(&self, today: NaiveDate) -> bool {
        if self.is_insured {
            return false;
        }
        match self.insurance_deadline {
            Some(deadline) => today <= deadline,
            None => false,
        }
    }

    /// Whole days left in the window, floored at zero.
    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        match self.insurance_deadline {
            Some(deadline) => (deadline - today).num_days().max(0),
            None => 0,
        }
    }

    pub fn window_state(&self, today: NaiveDate) -> InsuranceWindowState {
        if self.is_insured {
            InsuranceWindowState::Insured
        } else if self.can_still_insure(today) {
            InsuranceWindowState::Insurable
        } else {
            InsuranceWindowState::Expired
        }
    }

    /// Insure the record. Fails for an already-insured record and for one
    /// whose window has closed; expired records require a new record rather
    /// than a transition back.
    pub fn mark_insured(
        &mut self,
        coverage: CoverageRequest,
        today: NaiveDate,
    ) -> Result<(), InsuranceError> {
        if self.is_insured {
            return Err(InsuranceError::AlreadyInsured);
        }
        if !self.can_still_insure(today) {
            return Err(InsuranceError::WindowExpired {
                deadline: self.insurance_deadline,
            });
        }

        self.is_insured = true;
        self.insurance = Some(InsuranceDetails {
            insured_on: coverage.insured_on.unwrap_or(today),
            insurance_type: coverage.insurance_type,
            agency: coverage.agency,
            premium_amount: coverage.premium_amount,
        });
        Ok(())
    }

    /// Attributes the verification matcher compares against the farmer.
    pub fn parcel_attributes(&self) -> ParcelAttributes {
        ParcelAttributes {
            lot_number: self.lot_number.clone(),
            crop_type: Some(self.crop_type.clone()),
            lot_area: self.lot_area,
        }
    }
}
