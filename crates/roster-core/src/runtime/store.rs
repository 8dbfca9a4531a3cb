// crates/roster-core/src/runtime/store.rs
// ============================================================================
// Module: Employee Store
// Description: In-memory employee collection with filtered queries.
// Purpose: Own every employee record for the process lifetime.
// Dependencies: crate::{interfaces, model}, uuid
// ============================================================================

//! ## Overview
//! [`EmployeeStore`] keeps records in insertion order behind a single mutex.
//! Every operation completes inside one guard scope, so callers never observe
//! a partial write, and no guard is ever held across an `.await`.
//! Email addresses are unique across the store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use thiserror::Error;
use uuid::Uuid;

use crate::interfaces::Clock;
use crate::model::Employee;
use crate::model::EmployeeFilter;
use crate::model::EmployeePatch;
use crate::model::NewEmployee;
use crate::runtime::sample::sample_employees;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Employee store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Another record already uses the email address.
    #[error("email already in use: {0}")]
    DuplicateEmail(String),
    /// The store mutex was poisoned by a panicking writer.
    #[error("employee store mutex poisoned")]
    Poisoned,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Records plus lookup indexes, guarded as one unit.
#[derive(Debug, Default)]
struct StoreState {
    /// Records keyed by insertion sequence.
    records: BTreeMap<u64, Employee>,
    /// Insertion sequence by employee id.
    by_id: HashMap<String, u64>,
    /// Next insertion sequence.
    next_seq: u64,
}

impl StoreState {
    /// Returns true when `email` belongs to a record other than `except_id`.
    fn email_taken(&self, email: &str, except_id: Option<&str>) -> bool {
        self.records
            .values()
            .any(|employee| employee.email == email && Some(employee.id.as_str()) != except_id)
    }

    /// Appends a record at the end of the insertion order.
    fn insert(&mut self, employee: Employee) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_id.insert(employee.id.clone(), seq);
        self.records.insert(seq, employee);
    }
}

/// In-memory employee store.
pub struct EmployeeStore {
    /// Record state protected by a mutex.
    state: Mutex<StoreState>,
    /// Timestamp source for created/updated stamps.
    clock: Arc<dyn Clock>,
}

impl EmployeeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    /// Creates a store preloaded with the demo employees.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a sample record cannot be inserted.
    pub fn with_sample_data(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let store = Self::new(clock);
        for employee in sample_employees() {
            store.create(employee)?;
        }
        Ok(store)
    }

    /// Returns the employee with `id`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when the store lock is unusable.
    pub fn get(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        let state = self.lock()?;
        Ok(state.by_id.get(id).and_then(|seq| state.records.get(seq)).cloned())
    }

    /// Returns every employee matching `filter`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when the store lock is unusable.
    pub fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, StoreError> {
        let state = self.lock()?;
        Ok(state.records.values().filter(|employee| filter.matches(employee)).cloned().collect())
    }

    /// Inserts a new employee with a fresh id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateEmail`] when the email is already used.
    pub fn create(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let mut state = self.lock()?;
        if state.email_taken(&new.email, None) {
            return Err(StoreError::DuplicateEmail(new.email));
        }
        let employee = Employee::from_new(Uuid::new_v4().to_string(), new, self.clock.now());
        state.insert(employee.clone());
        drop(state);
        Ok(employee)
    }

    /// Merges `patch` over the employee with `id`.
    ///
    /// Returns `Ok(None)` when no such employee exists; absent ids are never
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateEmail`] when the patch moves the email
    /// onto another record's address.
    pub fn update(&self, id: &str, patch: EmployeePatch) -> Result<Option<Employee>, StoreError> {
        let mut state = self.lock()?;
        let Some(seq) = state.by_id.get(id).copied() else {
            return Ok(None);
        };
        if let Some(email) = &patch.email
            && state.email_taken(email, Some(id))
        {
            return Err(StoreError::DuplicateEmail(email.clone()));
        }
        let now = self.clock.now();
        let Some(employee) = state.records.get_mut(&seq) else {
            return Ok(None);
        };
        employee.apply(patch, now);
        Ok(Some(employee.clone()))
    }

    /// Removes the employee with `id`, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when the store lock is unusable.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.lock()?;
        let Some(seq) = state.by_id.remove(id) else {
            return Ok(false);
        };
        Ok(state.records.remove(&seq).is_some())
    }

    /// Returns the number of stored employees.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when the store lock is unusable.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.records.len())
    }

    /// Returns true when the store holds no employees.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when the store lock is unusable.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.records.is_empty())
    }

    /// Acquires the state guard.
    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
