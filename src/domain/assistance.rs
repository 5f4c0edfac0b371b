use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::farmer::FarmerId;
use crate::rules::eligibility::EligibilityResult;

/// Identifier wrapper for assistance programs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub String);

/// Identifier wrapper for assistance applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Fiscal quarter used as the deduplication window for applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quarter {
    pub number: u32,
    pub year: i32,
}

impl Quarter {
    /// Derive the quarter from a calendar date (months 1-3 map to Q1).
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            number: (date.month() - 1) / 3 + 1,
            year: date.year(),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}-{}", self.number, self.year)
    }
}

/// Stock status of a program. `OutOfStock` holds exactly when the available
/// quantity is zero; whoever mutates the quantity keeps the pair in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    Active,
    Inactive,
    OutOfStock,
}

impl ProgramStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OutOfStock => "out_of_stock",
        }
    }
}

/// Inventory unit for a government assistance program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistanceProgram {
    pub id: ProgramId,
    pub name: String,
    /// `None` means the program is open to any crop.
    pub crop_type: Option<String>,
    pub available_quantity: f64,
    pub requires_rsbsa: bool,
    pub requires_certification: bool,
    pub max_quantity_per_farmer: Option<f64>,
    pub status: ProgramStatus,
}

/// Lifecycle of an assistance application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Distributed,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Distributed => "distributed",
        }
    }

    /// Statuses that occupy the farmer's once-per-quarter slot.
    pub const fn counts_against_quota(self) -> bool {
        matches!(self, Self::Pending | Self::Approved | Self::Distributed)
    }
}

/// Who filed the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiledBy {
    Farmer,
    Admin,
}

/// One assistance request. `eligibility_check` is the evaluator's full output
/// at submission time, kept as an immutable audit trail even when factors
/// such as stock change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistanceApplication {
    pub id: ApplicationId,
    pub farmer_id: FarmerId,
    pub program_id: ProgramId,
    pub requested_quantity: f64,
    pub quarter: Quarter,
    pub status: ApplicationStatus,
    pub eligibility_check: EligibilityResult,
    pub filed_by: FiledBy,
}
