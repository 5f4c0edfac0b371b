use std::sync::Arc;

use chrono::{Datelike, Utc};
use rand::Rng;
use tracing::{info, warn};

use super::repository::{ClaimStore, StoreError};
use crate::domain::claim::{Claim, ClaimStatus};
use crate::domain::farmer::FarmerId;
use crate::rules::compensation::compute_compensation;

/// Default bound on claim-number generation attempts before giving up.
pub const DEFAULT_CLAIM_NUMBER_ATTEMPTS: u32 = 10;

/// New claim as received from intake, before a number is assigned.
#[derive(Debug, Clone)]
pub struct ClaimIntake {
    pub farmer_id: FarmerId,
    pub crop: String,
    pub area_damaged: f64,
    pub degree_of_damage: f64,
    pub damage_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClaimServiceError {
    #[error("claim {0} not found")]
    NotFound(String),
    #[error("could not allocate a unique claim number after {attempts} attempts")]
    NumberExhausted { attempts: u32 },
    #[error("cannot move claim from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service handling claim intake and approval.
pub struct ClaimService<S> {
    store: Arc<S>,
    number_attempts: u32,
}

impl<S> ClaimService<S>
where
    S: ClaimStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_attempts(store, DEFAULT_CLAIM_NUMBER_ATTEMPTS)
    }

    pub fn with_attempts(store: Arc<S>, number_attempts: u32) -> Self {
        Self {
            store,
            number_attempts: number_attempts.max(1),
        }
    }

    /// File a new claim, allocating a globally unique claim number.
    ///
    /// The number is optimistic: generate a candidate, check the store, and
    /// insert. A collision between the check and the insert is tolerated by
    /// retrying with a fresh candidate, up to the configured bound; only an
    /// exhausted bound is a hard failure.
    pub fn submit(&self, intake: ClaimIntake) -> Result<Claim, ClaimServiceError> {
        for _ in 0..self.number_attempts {
            let claim_number = claim_number_candidate();
            if self.store.exists(&claim_number)? {
                continue;
            }

            let claim = Claim {
                claim_number,
                farmer_id: intake.farmer_id.clone(),
                crop: intake.crop.clone(),
                area_damaged: intake.area_damaged,
                degree_of_damage: intake.degree_of_damage,
                damage_type: intake.damage_type.clone(),
                status: ClaimStatus::Pending,
                compensation: None,
            };

            match self.store.insert(claim) {
                Ok(stored) => {
                    info!(claim = %stored.claim_number, farmer = %stored.farmer_id.0, "claim filed");
                    return Ok(stored);
                }
                Err(StoreError::Conflict) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        warn!(
            attempts = self.number_attempts,
            "claim number allocation exhausted"
        );
        Err(ClaimServiceError::NumberExhausted {
            attempts: self.number_attempts,
        })
    }

    /// Approve a claim. A manually supplied compensation always wins;
    /// otherwise the award is computed from the claim's damage figures.
    pub fn approve(
        &self,
        claim_number: &str,
        manual_compensation: Option<f64>,
    ) -> Result<Claim, ClaimServiceError> {
        let mut claim = self
            .store
            .fetch(claim_number)?
            .ok_or_else(|| ClaimServiceError::NotFound(claim_number.to_string()))?;

        if !matches!(claim.status, ClaimStatus::Pending | ClaimStatus::UnderReview) {
            return Err(ClaimServiceError::InvalidTransition {
                from: claim.status.label(),
                to: ClaimStatus::Approved.label(),
            });
        }

        let compensation = match manual_compensation {
            Some(amount) => amount,
            None => {
                compute_compensation(claim.area_damaged, claim.degree_of_damage, &claim.crop)
                    .final_compensation
            }
        };

        claim.status = ClaimStatus::Approved;
        claim.compensation = Some(compensation);
        self.store.update(claim.clone())?;

        info!(claim = %claim.claim_number, compensation, "claim approved");
        Ok(claim)
    }

    /// Reject a claim under review or pending.
    pub fn reject(&self, claim_number: &str) -> Result<Claim, ClaimServiceError> {
        let mut claim = self
            .store
            .fetch(claim_number)?
            .ok_or_else(|| ClaimServiceError::NotFound(claim_number.to_string()))?;

        if !matches!(claim.status, ClaimStatus::Pending | ClaimStatus::UnderReview) {
            return Err(ClaimServiceError::InvalidTransition {
                from: claim.status.label(),
                to: ClaimStatus::Rejected.label(),
            });
        }

        claim.status = ClaimStatus::Rejected;
        self.store.update(claim.clone())?;
        Ok(claim)
    }
}

/// Candidate identifier: year, a six-digit slice of the millisecond clock,
/// and a three-digit random suffix.
fn claim_number_candidate() -> String {
    let now = Utc::now();
    let timestamp_slice = now.timestamp_millis().rem_euclid(1_000_000);
    let suffix = rand::thread_rng().gen_range(0..1_000);
    format!("CLM-{}-{timestamp_slice:06}{suffix:03}", now.year())
}
