//! Employee lifecycle service.
//!
//! Business rules on top of an [`EmployeeStore`]:
//! - `create` rejects an email that is already stored (`Conflict`)
//! - `update` never inserts; an unknown id is `NotFound`
//! - `delete_by_id` is idempotent
//!
//! The service keeps no state of its own; every call goes to the store.

use std::sync::Arc;

use crate::error::{is_unique_violation, EmployeeError};
use crate::model::Employee;
use crate::repository::EmployeeStore;

/// Shared handle to the record store.
pub type SharedStore = Arc<dyn EmployeeStore + Send + Sync>;

pub struct EmployeeService {
    store: SharedStore,
}

impl EmployeeService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Persist a new employee unless its email is already taken.
    ///
    /// The lookup and the insert are separate statements; a concurrent
    /// create that slips between them is caught by the unique index and
    /// reported as the same `Conflict`.
    pub async fn create(&self, candidate: Employee) -> Result<Employee, EmployeeError> {
        if self.store.find_by_email(&candidate.email).await?.is_some() {
            tracing::warn!(email = %candidate.email, "Rejecting create: email already exists");
            return Err(EmployeeError::conflict(candidate.email));
        }

        let saved = self
            .store
            .insert(&candidate)
            .await
            .map_err(|err| conflict_or_store(err, &candidate.email))?;

        tracing::info!(id = ?saved.id, "Employee created");
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Employee>, EmployeeError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Overwrite the row identified by `candidate.id`.
    ///
    /// Email uniqueness is not re-checked here; if the new email belongs
    /// to another row the store's unique index rejects it as `Conflict`.
    pub async fn update(&self, candidate: Employee) -> Result<Employee, EmployeeError> {
        let id = candidate.id.ok_or(EmployeeError::MissingId)?;

        let updated = self
            .store
            .update(id, &candidate)
            .await
            .map_err(|err| conflict_or_store(err, &candidate.email))?
            .ok_or_else(|| EmployeeError::not_found(id))?;

        tracing::info!(id, "Employee updated");
        Ok(updated)
    }

    /// Remove the row if present. Deleting an absent id succeeds.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), EmployeeError> {
        let removed = self.store.delete_by_id(id).await?;
        if removed == 0 {
            tracing::debug!(id, "Delete on absent employee");
        } else {
            tracing::info!(id, "Employee deleted");
        }
        Ok(())
    }
}

fn conflict_or_store(err: sqlx::Error, email: &str) -> EmployeeError {
    if is_unique_violation(&err) {
        EmployeeError::conflict(email)
    } else {
        EmployeeError::Store(err)
    }
}
