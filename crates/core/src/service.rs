//! Patient store operations.
//!
//! [`PatientService`] is the only place that loads, mutates and saves the store. Every
//! operation holds the service lock from load to save, so concurrent writers in the same
//! process are serialised and cannot overwrite each other's changes.

use crate::patient::{Patient, PatientStore};
use crate::sort::{parse_sort_params, sort_patients};
use crate::storage::PatientStorage;
use crate::validation::{validate_patient_id, PatientInput, PatientUpdate};
use crate::{PatientError, PatientResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    storage: Arc<dyn PatientStorage>,
    lock: Arc<Mutex<()>>,
}

impl PatientService {
    /// Creates a service over the given storage backend.
    pub fn new(storage: Arc<dyn PatientStorage>) -> Self {
        Self {
            storage,
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // A panic while holding the lock cannot leave the store half-written (saves are
        // atomic), so a poisoned lock is still safe to reuse.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ids are trimmed on create, so lookups trim too.
    fn store_key(id: &str) -> &str {
        id.trim()
    }

    /// Returns every record keyed by patient id, in store order.
    pub fn list(&self) -> PatientResult<PatientStore> {
        let _guard = self.guard();
        self.storage.load()
    }

    /// Returns the record stored under `id`.
    ///
    /// # Errors
    /// `PatientError::NotFound` if no record has that id.
    pub fn get(&self, id: &str) -> PatientResult<Patient> {
        let id = Self::store_key(id);
        let _guard = self.guard();
        let store = self.storage.load()?;
        store
            .get(id)
            .cloned()
            .ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    /// Returns all records ordered by `sort_by` (`height`, `weight` or `bmi`).
    ///
    /// `order` is `asc` or `desc` and defaults to `asc`. Parameters are checked before the
    /// store is read.
    ///
    /// # Errors
    /// `PatientError::InvalidQuery` for an unknown field or order.
    pub fn sort(&self, sort_by: &str, order: Option<&str>) -> PatientResult<Vec<Patient>> {
        let (field, order) = parse_sort_params(sort_by, order)?;
        let _guard = self.guard();
        let store = self.storage.load()?;
        Ok(sort_patients(&store, field, order))
    }

    /// Validates and stores a new record under `id`.
    ///
    /// # Errors
    /// - `PatientError::InvalidInput` if the id or any field is invalid
    /// - `PatientError::AlreadyExists` if `id` is taken; the stored record is untouched
    pub fn create(&self, id: &str, input: PatientInput) -> PatientResult<()> {
        let id = validate_patient_id(id)?;
        let patient = Patient::from_input(input)?;

        let _guard = self.guard();
        let mut store = self.storage.load()?;
        if store.contains_key(id.as_str()) {
            tracing::warn!("create rejected, patient {} already exists", id);
            return Err(PatientError::AlreadyExists(id.into_string()));
        }

        store.insert(id.as_str(), patient);
        self.storage.save(&store)?;
        tracing::info!("created patient {}", id);
        Ok(())
    }

    /// Applies the fields present in `update` to the record under `id`.
    ///
    /// `bmi` and `verdict` are recomputed from the merged height and weight.
    ///
    /// # Errors
    /// - `PatientError::NotFound` if no record has that id
    /// - `PatientError::InvalidInput` if a supplied field is invalid
    pub fn update(&self, id: &str, update: PatientUpdate) -> PatientResult<()> {
        let id = Self::store_key(id);
        let _guard = self.guard();
        let mut store = self.storage.load()?;

        let merged = store
            .get(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))?
            .merged_with(update)?;

        store.insert(id, merged);
        self.storage.save(&store)?;
        tracing::info!("updated patient {}", id);
        Ok(())
    }

    /// Removes the record under `id`.
    ///
    /// # Errors
    /// `PatientError::NotFound` if no record has that id.
    pub fn delete(&self, id: &str) -> PatientResult<()> {
        let id = Self::store_key(id);
        let _guard = self.guard();
        let mut store = self.storage.load()?;

        if store.remove(id).is_none() {
            return Err(PatientError::NotFound(id.to_string()));
        }

        self.storage.save(&store)?;
        tracing::info!("deleted patient {}", id);
        Ok(())
    }
}
