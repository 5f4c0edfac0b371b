use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::domain::assistance::{
    ApplicationId, AssistanceApplication, AssistanceProgram, ProgramId, ProgramStatus, Quarter,
};
use crate::domain::claim::Claim;
use crate::domain::farmer::{Farmer, FarmerId, FarmerVerificationStatus, VerificationMethod};
use crate::domain::insurance::CropInsuranceRecord;
use crate::services::repository::{ApplicationStore, ClaimStore, ProgramInventory, StoreError};
use crate::services::{AssistanceService, ClaimService};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn farmer() -> Farmer {
    Farmer {
        id: FarmerId("f-001".to_string()),
        first_name: "Elena".to_string(),
        last_name: "Reyes".to_string(),
        crop_type: Some("Rice".to_string()),
        rsbsa_registered: true,
        is_certified: true,
        lot_number: Some("L-14".to_string()),
        lot_area: Some(2.5),
        is_verified: false,
        verification_status: FarmerVerificationStatus::Pending,
        verification_method: VerificationMethod::Pending,
        verification_notes: None,
        matched_insurance_count: 0,
    }
}

pub(super) fn program() -> AssistanceProgram {
    AssistanceProgram {
        id: ProgramId("p-001".to_string()),
        name: "Rice Seed Subsidy".to_string(),
        crop_type: Some("Rice".to_string()),
        available_quantity: 100.0,
        requires_rsbsa: true,
        requires_certification: false,
        max_quantity_per_farmer: Some(10.0),
        status: ProgramStatus::Active,
    }
}

pub(super) fn insurance_record(farmer_id: &FarmerId, crop: &str) -> CropInsuranceRecord {
    let mut record = CropInsuranceRecord::new(farmer_id.clone(), crop);
    record.lot_number = Some("L-14".to_string());
    record.lot_area = Some(2.5);
    record.planting_date = Some(date(2026, 7, 1));
    record.insurance_day_limit = Some(90);
    record.refresh(date(2026, 7, 1));
    record
}

#[derive(Default)]
pub(super) struct MemoryApplications {
    records: Mutex<HashMap<ApplicationId, AssistanceApplication>>,
}

impl ApplicationStore for MemoryApplications {
    fn insert_unique(
        &self,
        application: AssistanceApplication,
    ) -> Result<AssistanceApplication, StoreError> {
        // Quota check and insert under one lock, the in-memory stand-in for
        // a conditional insert at the persistence boundary.
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let occupied = guard.values().any(|existing| {
            existing.farmer_id == application.farmer_id
                && existing.program_id == application.program_id
                && existing.quarter == application.quarter
                && existing.status.counts_against_quota()
        });
        if occupied {
            return Err(StoreError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(&self, application: AssistanceApplication) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<AssistanceApplication>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn quota_applications(
        &self,
        farmer_id: &FarmerId,
        program_id: &ProgramId,
        quarter: &Quarter,
    ) -> Result<Vec<AssistanceApplication>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| {
                application.farmer_id == *farmer_id
                    && application.program_id == *program_id
                    && application.quarter == *quarter
                    && application.status.counts_against_quota()
            })
            .cloned()
            .collect())
    }
}

pub(super) struct MemoryInventory {
    programs: Mutex<HashMap<ProgramId, AssistanceProgram>>,
}

impl MemoryInventory {
    pub(super) fn with_programs(programs: Vec<AssistanceProgram>) -> Self {
        Self {
            programs: Mutex::new(
                programs
                    .into_iter()
                    .map(|program| (program.id.clone(), program))
                    .collect(),
            ),
        }
    }

    pub(super) fn snapshot(&self, id: &ProgramId) -> Option<AssistanceProgram> {
        self.programs
            .lock()
            .expect("inventory mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl ProgramInventory for MemoryInventory {
    fn fetch(&self, id: &ProgramId) -> Result<Option<AssistanceProgram>, StoreError> {
        let guard = self.programs.lock().expect("inventory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn deduct(&self, id: &ProgramId, quantity: f64) -> Result<AssistanceProgram, StoreError> {
        let mut guard = self.programs.lock().expect("inventory mutex poisoned");
        let program = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        if program.available_quantity < quantity {
            return Err(StoreError::InsufficientStock {
                available: program.available_quantity,
                requested: quantity,
            });
        }
        program.available_quantity -= quantity;
        program.status = if program.available_quantity == 0.0 {
            ProgramStatus::OutOfStock
        } else {
            ProgramStatus::Active
        };
        Ok(program.clone())
    }
}

#[derive(Default)]
pub(super) struct MemoryClaims {
    records: Mutex<HashMap<String, Claim>>,
}

impl MemoryClaims {
    pub(super) fn count(&self) -> usize {
        self.records.lock().expect("claims mutex poisoned").len()
    }
}

impl ClaimStore for MemoryClaims {
    fn exists(&self, claim_number: &str) -> Result<bool, StoreError> {
        let guard = self.records.lock().expect("claims mutex poisoned");
        Ok(guard.contains_key(claim_number))
    }

    fn insert(&self, claim: Claim) -> Result<Claim, StoreError> {
        let mut guard = self.records.lock().expect("claims mutex poisoned");
        if guard.contains_key(&claim.claim_number) {
            return Err(StoreError::Conflict);
        }
        guard.insert(claim.claim_number.clone(), claim.clone());
        Ok(claim)
    }

    fn update(&self, claim: Claim) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("claims mutex poisoned");
        guard.insert(claim.claim_number.clone(), claim);
        Ok(())
    }

    fn fetch(&self, claim_number: &str) -> Result<Option<Claim>, StoreError> {
        let guard = self.records.lock().expect("claims mutex poisoned");
        Ok(guard.get(claim_number).cloned())
    }
}

/// Claim store where every candidate collides, to exercise the retry bound.
#[derive(Default)]
pub(super) struct SaturatedClaims {
    pub(super) exist_checks: Mutex<u32>,
}

impl ClaimStore for SaturatedClaims {
    fn exists(&self, _claim_number: &str) -> Result<bool, StoreError> {
        *self.exist_checks.lock().expect("counter mutex poisoned") += 1;
        Ok(true)
    }

    fn insert(&self, _claim: Claim) -> Result<Claim, StoreError> {
        Err(StoreError::Conflict)
    }

    fn update(&self, _claim: Claim) -> Result<(), StoreError> {
        Ok(())
    }

    fn fetch(&self, _claim_number: &str) -> Result<Option<Claim>, StoreError> {
        Ok(None)
    }
}

pub(super) fn build_assistance_service() -> (
    AssistanceService<MemoryApplications, MemoryInventory>,
    Arc<MemoryApplications>,
    Arc<MemoryInventory>,
) {
    build_with_program(program())
}

pub(super) fn build_with_program(
    program: AssistanceProgram,
) -> (
    AssistanceService<MemoryApplications, MemoryInventory>,
    Arc<MemoryApplications>,
    Arc<MemoryInventory>,
) {
    let store = Arc::new(MemoryApplications::default());
    let inventory = Arc::new(MemoryInventory::with_programs(vec![program]));
    let service = AssistanceService::new(store.clone(), inventory.clone());
    (service, store, inventory)
}

pub(super) fn build_claim_service() -> (ClaimService<MemoryClaims>, Arc<MemoryClaims>) {
    let store = Arc::new(MemoryClaims::default());
    let service = ClaimService::new(store.clone());
    (service, store)
}
