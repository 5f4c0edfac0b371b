use super::common::*;
use crate::domain::assistance::{ApplicationStatus, FiledBy, ProgramStatus};
use crate::domain::farmer::FarmerId;
use crate::services::assistance::{AssistanceServiceError, SubmissionOutcome};
use crate::services::repository::StoreError;

fn accepted(outcome: SubmissionOutcome) -> crate::domain::AssistanceApplication {
    match outcome {
        SubmissionOutcome::Accepted(application) => application,
        SubmissionOutcome::Rejected(rejection) => {
            panic!("expected acceptance, got rejection: {}", rejection.reason)
        }
    }
}

fn rejected(outcome: SubmissionOutcome) -> crate::services::RejectedSubmission {
    match outcome {
        SubmissionOutcome::Rejected(rejection) => rejection,
        SubmissionOutcome::Accepted(application) => {
            panic!("expected rejection, got acceptance: {:?}", application.id)
        }
    }
}

#[test]
fn eligible_submission_is_accepted_with_an_audit_snapshot() {
    let (service, _store, _inventory) = build_assistance_service();
    let farmer = farmer();
    let records = vec![insurance_record(&farmer.id, "Rice")];

    let application = accepted(
        service
            .submit(
                &farmer,
                &records,
                &program().id,
                5.0,
                FiledBy::Farmer,
                date(2026, 8, 30),
            )
            .expect("submission succeeds"),
    );

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.quarter.to_string(), "Q3-2026");
    assert!(application.eligibility_check.eligible);
    assert!(application.eligibility_check.reasons.is_empty());
    assert_eq!(application.eligibility_check.requested_quantity, 5.0);
}

#[test]
fn second_submission_in_the_same_quarter_is_rejected() {
    let (service, _store, _inventory) = build_assistance_service();
    let farmer = farmer();
    let today = date(2026, 8, 30);

    accepted(
        service
            .submit(&farmer, &[], &program().id, 5.0, FiledBy::Farmer, today)
            .expect("first submission succeeds"),
    );

    let rejection = rejected(
        service
            .submit(&farmer, &[], &program().id, 5.0, FiledBy::Farmer, today)
            .expect("second submission evaluates"),
    );

    assert!(rejection.evaluation.factors.already_applied);
    assert_eq!(
        rejection.reason,
        "An application for this program already exists for Q3-2026"
    );
}

#[test]
fn next_quarter_reopens_the_slot() {
    let (service, _store, _inventory) = build_assistance_service();
    let farmer = farmer();

    accepted(
        service
            .submit(&farmer, &[], &program().id, 5.0, FiledBy::Farmer, date(2026, 8, 30))
            .expect("first submission succeeds"),
    );
    accepted(
        service
            .submit(&farmer, &[], &program().id, 5.0, FiledBy::Admin, date(2026, 10, 2))
            .expect("second submission succeeds"),
    );
}

#[test]
fn ineligible_farmer_gets_a_reasoned_rejection() {
    let (service, _store, _inventory) = build_assistance_service();
    let mut farmer = farmer();
    farmer.rsbsa_registered = false;

    let rejection = rejected(
        service
            .submit(&farmer, &[], &program().id, 5.0, FiledBy::Farmer, date(2026, 8, 30))
            .expect("submission evaluates"),
    );

    assert_eq!(rejection.reason, "Program requires RSBSA registration");
    assert!(!rejection.evaluation.eligible);
}

#[test]
fn request_above_remaining_stock_is_rejected_even_when_stock_exists() {
    let mut low_stock = program();
    low_stock.available_quantity = 3.0;
    low_stock.max_quantity_per_farmer = None;
    let (service, _store, _inventory) = build_with_program(low_stock);

    let rejection = rejected(
        service
            .submit(&farmer(), &[], &program().id, 5.0, FiledBy::Farmer, date(2026, 8, 30))
            .expect("submission evaluates"),
    );

    // The existence factor passes; the stricter submission check does not.
    assert!(rejection.evaluation.factors.stock_available);
    assert_eq!(
        rejection.reason,
        "Requested quantity 5 exceeds the 3 remaining in stock"
    );
}

#[test]
fn request_above_the_per_farmer_cap_is_rejected() {
    let (service, _store, _inventory) = build_assistance_service();

    let rejection = rejected(
        service
            .submit(&farmer(), &[], &program().id, 25.0, FiledBy::Farmer, date(2026, 8, 30))
            .expect("submission evaluates"),
    );

    assert_eq!(
        rejection.reason,
        "Requested quantity 25 exceeds the per-farmer limit of 10"
    );
}

#[test]
fn inactive_program_refuses_submissions() {
    let mut inactive = program();
    inactive.status = ProgramStatus::Inactive;
    let (service, _store, _inventory) = build_with_program(inactive);

    let rejection = rejected(
        service
            .submit(&farmer(), &[], &program().id, 5.0, FiledBy::Farmer, date(2026, 8, 30))
            .expect("submission evaluates"),
    );

    assert_eq!(rejection.reason, "Program is not accepting applications");
}

#[test]
fn non_positive_quantity_is_a_service_error() {
    let (service, _store, _inventory) = build_assistance_service();

    let result = service.submit(
        &farmer(),
        &[],
        &program().id,
        0.0,
        FiledBy::Farmer,
        date(2026, 8, 30),
    );

    assert!(matches!(
        result,
        Err(AssistanceServiceError::InvalidQuantity(_))
    ));
}

#[test]
fn distribution_deducts_stock_and_flags_out_of_stock_at_zero() {
    let mut scarce = program();
    scarce.available_quantity = 5.0;
    let (service, _store, inventory) = build_with_program(scarce);

    let application = accepted(
        service
            .submit(&farmer(), &[], &program().id, 5.0, FiledBy::Farmer, date(2026, 8, 30))
            .expect("submission succeeds"),
    );

    service.approve(&application.id).expect("approval succeeds");
    let distributed = service
        .distribute(&application.id)
        .expect("distribution succeeds");

    assert_eq!(distributed.status, ApplicationStatus::Distributed);
    let program = inventory.snapshot(&program().id).expect("program present");
    assert_eq!(program.available_quantity, 0.0);
    assert_eq!(program.status, ProgramStatus::OutOfStock);
}

#[test]
fn distribution_never_draws_stock_negative() {
    let mut scarce = program();
    scarce.available_quantity = 8.0;
    scarce.max_quantity_per_farmer = None;
    let (service, _store, inventory) = build_with_program(scarce);

    let mut second_farmer = farmer();
    second_farmer.id = FarmerId("f-002".to_string());
    let today = date(2026, 8, 30);

    let first = accepted(
        service
            .submit(&farmer(), &[], &program().id, 6.0, FiledBy::Farmer, today)
            .expect("first submission"),
    );
    let second = accepted(
        service
            .submit(&second_farmer, &[], &program().id, 6.0, FiledBy::Farmer, today)
            .expect("second submission"),
    );

    service.approve(&first.id).expect("first approval");
    service.approve(&second.id).expect("second approval");

    service.distribute(&first.id).expect("first distribution");
    let result = service.distribute(&second.id);

    assert!(matches!(
        result,
        Err(AssistanceServiceError::Store(StoreError::InsufficientStock {
            available,
            requested,
        })) if available == 2.0 && requested == 6.0
    ));

    // The failed distribution touched neither the stock nor the application.
    let program = inventory.snapshot(&program().id).expect("program present");
    assert_eq!(program.available_quantity, 2.0);
    let untouched = service
        .distribute(&second.id)
        .expect_err("still short of stock");
    assert!(matches!(
        untouched,
        AssistanceServiceError::Store(StoreError::InsufficientStock { .. })
    ));
}

#[test]
fn distribution_requires_an_approved_application() {
    let (service, _store, _inventory) = build_assistance_service();

    let application = accepted(
        service
            .submit(&farmer(), &[], &program().id, 5.0, FiledBy::Farmer, date(2026, 8, 30))
            .expect("submission succeeds"),
    );

    let result = service.distribute(&application.id);
    assert!(matches!(
        result,
        Err(AssistanceServiceError::InvalidTransition {
            from: "pending",
            to: "distributed",
        })
    ));
}

#[test]
fn rejecting_frees_the_quarter_for_a_new_submission() {
    let (service, _store, _inventory) = build_assistance_service();
    let farmer = farmer();
    let today = date(2026, 8, 30);

    let application = accepted(
        service
            .submit(&farmer, &[], &program().id, 5.0, FiledBy::Farmer, today)
            .expect("submission succeeds"),
    );

    service.reject(&application.id).expect("rejection succeeds");

    accepted(
        service
            .submit(&farmer, &[], &program().id, 5.0, FiledBy::Farmer, today)
            .expect("retry evaluates"),
    );
}
