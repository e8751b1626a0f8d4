//! Org chart hierarchy - the consistency engine behind every mutation
//!
//! Keeps the manager/subordinate tree valid:
//! - Designation catalog queries, root-rank resolution and level insertion
//! - Validation of create, update, replace and delete against the live tree
//! - Mutation with cascading re-parenting of orphaned subordinates
//! - Deterministic ordering of subordinate and colleague views
//!
//! Invariants held after every accepted mutation:
//! 1. At most one employee holds the root designation, and it has no manager.
//! 2. Every manager strictly outranks each of its direct subordinates.
//! 3. The manager relation is acyclic.

pub mod catalog;
pub mod mutator;
pub mod ordering;
pub mod validator;

pub use catalog::DesignationCatalog;
pub use mutator::HierarchyMutator;
pub use ordering::{RankedEmployee, SiblingOrdering};
pub use validator::{
    HierarchyValidator, ValidatedCreate, ValidatedDelete, ValidatedReplace, ValidatedUpdate,
};

use orgchart_protocol::{DesignationId, EmployeeId};
use orgchart_state::StateError;
use thiserror::Error;

/// A terminal validation outcome: the requested mutation breaks a rule.
///
/// Every variant has a stable `code()` so outer layers can map it to a
/// distinct response without matching on messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Name cannot be empty")]
    NameEmpty,

    #[error("Required parameters missing: name and job title")]
    MissingRequiredFields,

    #[error("Designation not found: {0}")]
    DesignationNotFound(String),

    #[error("Only one root employee can be present at one time")]
    RootAlreadyExists,

    #[error("Unable to verify if a root employee is present at this time")]
    RootUnverifiable,

    #[error("Root designation cannot be assigned or changed by an update")]
    RootDesignationImmutable,

    #[error("Root employee cannot be deleted while it has subordinates")]
    RootDeletionBlocked,

    #[error("Manager not found")]
    ManagerNotFound,

    #[error("Manager cannot be designated lower or equal level to subordinate")]
    ManagerRankTooLow,

    #[error("Root employee cannot have a manager")]
    ManagerForbiddenForRoot,

    #[error("Employee cannot be its own manager")]
    ManagerIsSelf,

    #[error("Employee designation cannot be lower than its subordinates")]
    SubordinateRankConflict,
}

impl Rejection {
    /// All rejections, in the order their RPC error codes are allocated.
    pub const ALL: [Rejection; 12] = [
        Rejection::NameEmpty,
        Rejection::MissingRequiredFields,
        Rejection::DesignationNotFound(String::new()),
        Rejection::RootAlreadyExists,
        Rejection::RootUnverifiable,
        Rejection::RootDesignationImmutable,
        Rejection::RootDeletionBlocked,
        Rejection::ManagerNotFound,
        Rejection::ManagerRankTooLow,
        Rejection::ManagerForbiddenForRoot,
        Rejection::ManagerIsSelf,
        Rejection::SubordinateRankConflict,
    ];

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::NameEmpty => "name_empty",
            Rejection::MissingRequiredFields => "missing_required_fields",
            Rejection::DesignationNotFound(_) => "designation_not_found",
            Rejection::RootAlreadyExists => "root_already_exists",
            Rejection::RootUnverifiable => "root_unverifiable",
            Rejection::RootDesignationImmutable => "root_designation_immutable",
            Rejection::RootDeletionBlocked => "root_deletion_blocked",
            Rejection::ManagerNotFound => "manager_not_found",
            Rejection::ManagerRankTooLow => "manager_rank_too_low",
            Rejection::ManagerForbiddenForRoot => "manager_forbidden_for_root",
            Rejection::ManagerIsSelf => "manager_is_self",
            Rejection::SubordinateRankConflict => "subordinate_rank_conflict",
        }
    }

    /// Position of this rejection in [`Rejection::ALL`].
    pub fn ordinal(&self) -> usize {
        match self {
            Rejection::NameEmpty => 0,
            Rejection::MissingRequiredFields => 1,
            Rejection::DesignationNotFound(_) => 2,
            Rejection::RootAlreadyExists => 3,
            Rejection::RootUnverifiable => 4,
            Rejection::RootDesignationImmutable => 5,
            Rejection::RootDeletionBlocked => 6,
            Rejection::ManagerNotFound => 7,
            Rejection::ManagerRankTooLow => 8,
            Rejection::ManagerForbiddenForRoot => 9,
            Rejection::ManagerIsSelf => 10,
            Rejection::SubordinateRankConflict => 11,
        }
    }
}

/// Errors originating from the hierarchy layer.
#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("Store error: {0}")]
    Store(#[from] StateError),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("Employee {employee} references unknown designation {designation}")]
    DanglingDesignation {
        employee: EmployeeId,
        designation: DesignationId,
    },

    #[error("Invalid designation: {0}")]
    InvalidDesignation(String),
}

impl HierarchyError {
    /// The rejection behind this error, if it is a validation outcome.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            HierarchyError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
