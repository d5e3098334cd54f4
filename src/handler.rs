use crate::clock::Clock;
use crate::error::{ServiceError, StoreError};
use crate::record::{MarksInput, StudentInput, StudentRecord};
use crate::scoring::{validate_and_score_for_create, validate_and_score_for_update};
use crate::store::RecordStore;
use crate::utils::logs;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl StudentService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn create_student(&self, input: StudentInput) -> Result<StudentRecord, ServiceError> {
        let record = validate_and_score_for_create(&input, self.clock.today())
            .inspect_err(|reason| {
                logs::log_student_rejected(input.first_name.as_deref(), &reason.to_string());
            })?;

        let stored = self.store.create(record).inspect_err(store_failed)?;
        logs::log_student_created(&stored);
        Ok(stored)
    }

    /// Unknown ids are reported before the marks are looked at.
    pub fn update_marks(&self, id: i64, marks: MarksInput) -> Result<StudentRecord, ServiceError> {
        let Some(existing) = self.store.find_by_id(id).inspect_err(store_failed)? else {
            logs::log_student_not_found(id);
            return Err(ServiceError::NotFound(id));
        };

        let updated = validate_and_score_for_update(&existing, &marks).inspect_err(|reason| {
            logs::log_marks_rejected(id, &reason.to_string());
        })?;

        let saved = self.store.save(&updated).inspect_err(store_failed)?;
        logs::log_marks_updated(&saved);
        Ok(saved)
    }

    pub fn find_student(&self, id: i64) -> Result<StudentRecord, ServiceError> {
        self.store
            .find_by_id(id)
            .inspect_err(store_failed)?
            .ok_or(ServiceError::NotFound(id))
    }
}

fn store_failed(err: &StoreError) {
    tracing::error!(error = %err, "record store failure");
    logs::log_store_error(&err.to_string());
}
