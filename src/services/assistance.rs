use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::repository::{ApplicationStore, ProgramInventory, StoreError};
use crate::domain::assistance::{
    ApplicationId, ApplicationStatus, AssistanceApplication, FiledBy, ProgramId, ProgramStatus,
    Quarter,
};
use crate::domain::farmer::Farmer;
use crate::domain::insurance::CropInsuranceRecord;
use crate::rules::eligibility::{evaluate, EligibilityResult};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("asst-{id:06}"))
}

/// Accepted submission or a business rejection with the evaluation attached.
/// Rejections are normal values; the caller surfaces `reason` to the user.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    Accepted(AssistanceApplication),
    Rejected(RejectedSubmission),
}

#[derive(Debug, Clone)]
pub struct RejectedSubmission {
    pub evaluation: EligibilityResult,
    pub reason: String,
}

/// Error raised by the assistance service. Ineligibility is not an error;
/// these cover malformed requests, invalid transitions, and storage faults.
#[derive(Debug, thiserror::Error)]
pub enum AssistanceServiceError {
    #[error("requested quantity must be positive, got {0}")]
    InvalidQuantity(f64),
    #[error("application {0:?} not found")]
    ApplicationNotFound(ApplicationId),
    #[error("program {0:?} not found")]
    ProgramNotFound(ProgramId),
    #[error("cannot move application from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service composing the eligibility evaluator with the application and
/// inventory stores.
pub struct AssistanceService<S, P> {
    store: Arc<S>,
    inventory: Arc<P>,
}

impl<S, P> AssistanceService<S, P>
where
    S: ApplicationStore + 'static,
    P: ProgramInventory + 'static,
{
    pub fn new(store: Arc<S>, inventory: Arc<P>) -> Self {
        Self { store, inventory }
    }

    /// Submit an assistance application for the quarter containing `today`.
    ///
    /// Runs the evaluator, then the stricter submission-time checks (program
    /// accepting, per-farmer cap, quantity-sufficient stock), and finally
    /// inserts through the store's atomic uniqueness check. The full
    /// evaluation is snapshotted onto the stored application as its audit
    /// record.
    pub fn submit(
        &self,
        farmer: &Farmer,
        insurance_records: &[CropInsuranceRecord],
        program_id: &ProgramId,
        requested_quantity: f64,
        filed_by: FiledBy,
        today: NaiveDate,
    ) -> Result<SubmissionOutcome, AssistanceServiceError> {
        if !(requested_quantity > 0.0) {
            return Err(AssistanceServiceError::InvalidQuantity(requested_quantity));
        }

        let program = self
            .inventory
            .fetch(program_id)?
            .ok_or_else(|| AssistanceServiceError::ProgramNotFound(program_id.clone()))?;

        let quarter = Quarter::from_date(today);
        let prior = self
            .store
            .quota_applications(&farmer.id, program_id, &quarter)?;

        let evaluation = evaluate(
            farmer,
            insurance_records,
            &program,
            requested_quantity,
            &prior,
            today,
        );

        if !evaluation.eligible {
            let reason = evaluation
                .primary_reason()
                .unwrap_or("Farmer is not eligible for this program")
                .to_string();
            return Ok(SubmissionOutcome::Rejected(RejectedSubmission {
                evaluation,
                reason,
            }));
        }

        if program.status == ProgramStatus::Inactive {
            return Ok(SubmissionOutcome::Rejected(RejectedSubmission {
                evaluation,
                reason: "Program is not accepting applications".to_string(),
            }));
        }

        if let Some(cap) = program.max_quantity_per_farmer {
            if requested_quantity > cap {
                return Ok(SubmissionOutcome::Rejected(RejectedSubmission {
                    evaluation,
                    reason: format!(
                        "Requested quantity {requested_quantity} exceeds the per-farmer limit of {cap}"
                    ),
                }));
            }
        }

        if program.available_quantity < requested_quantity {
            return Ok(SubmissionOutcome::Rejected(RejectedSubmission {
                evaluation,
                reason: format!(
                    "Requested quantity {requested_quantity} exceeds the {} remaining in stock",
                    program.available_quantity
                ),
            }));
        }

        let application = AssistanceApplication {
            id: next_application_id(),
            farmer_id: farmer.id.clone(),
            program_id: program_id.clone(),
            requested_quantity,
            quarter,
            status: ApplicationStatus::Pending,
            eligibility_check: evaluation.clone(),
            filed_by,
        };

        match self.store.insert_unique(application) {
            Ok(stored) => {
                info!(
                    application = %stored.id.0,
                    farmer = %stored.farmer_id.0,
                    program = %stored.program_id.0,
                    quarter = %stored.quarter,
                    "assistance application accepted"
                );
                Ok(SubmissionOutcome::Accepted(stored))
            }
            // A concurrent submission won the quarter slot between our read
            // and the insert; report it the same way as a seen duplicate.
            Err(StoreError::Conflict) => Ok(SubmissionOutcome::Rejected(RejectedSubmission {
                evaluation,
                reason: format!("An application for this program already exists for {quarter}"),
            })),
            Err(err) => Err(err.into()),
        }
    }

    /// Approve a pending application.
    pub fn approve(
        &self,
        application_id: &ApplicationId,
    ) -> Result<AssistanceApplication, AssistanceServiceError> {
        self.transition(application_id, ApplicationStatus::Pending, ApplicationStatus::Approved)
    }

    /// Reject a pending application, releasing its quarter slot.
    pub fn reject(
        &self,
        application_id: &ApplicationId,
    ) -> Result<AssistanceApplication, AssistanceServiceError> {
        self.transition(application_id, ApplicationStatus::Pending, ApplicationStatus::Rejected)
    }

    /// Distribute an approved application: deduct the inventory through the
    /// store's conditional decrement, then mark the application distributed.
    /// The decrement itself flips the program to `out_of_stock` when the
    /// remainder hits zero.
    pub fn distribute(
        &self,
        application_id: &ApplicationId,
    ) -> Result<AssistanceApplication, AssistanceServiceError> {
        let mut application = self
            .store
            .fetch(application_id)?
            .ok_or_else(|| AssistanceServiceError::ApplicationNotFound(application_id.clone()))?;

        if application.status != ApplicationStatus::Approved {
            return Err(AssistanceServiceError::InvalidTransition {
                from: application.status.label(),
                to: ApplicationStatus::Distributed.label(),
            });
        }

        let program = self
            .inventory
            .deduct(&application.program_id, application.requested_quantity)?;

        application.status = ApplicationStatus::Distributed;
        self.store.update(application.clone())?;

        info!(
            application = %application.id.0,
            program = %program.id.0,
            remaining = program.available_quantity,
            status = program.status.label(),
            "assistance distributed"
        );

        Ok(application)
    }

    fn transition(
        &self,
        application_id: &ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<AssistanceApplication, AssistanceServiceError> {
        let mut application = self
            .store
            .fetch(application_id)?
            .ok_or_else(|| AssistanceServiceError::ApplicationNotFound(application_id.clone()))?;

        if application.status != from {
            return Err(AssistanceServiceError::InvalidTransition {
                from: application.status.label(),
                to: to.label(),
            });
        }

        application.status = to;
        self.store.update(application.clone())?;
        Ok(application)
    }
}
