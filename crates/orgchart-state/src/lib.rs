//! Org chart state - persistence contracts for designations and employees
//!
//! The hierarchy engine never talks to a storage engine directly. It
//! consumes the two store traits defined here:
//! - `DesignationStore`: lookup by id, title and level, ordered listing
//! - `EmployeeStore`: lookup by id, designation and manager, save and delete
//!
//! Absence is always an explicit `Ok(None)` or empty vector; `Err` is
//! reserved for genuine storage failures.

pub mod memory;
pub mod store;

pub use memory::{InMemoryDesignationStore, InMemoryEmployeeStore};
pub use store::{DesignationStore, EmployeeStore};

use thiserror::Error;

/// Errors originating from the state layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}
