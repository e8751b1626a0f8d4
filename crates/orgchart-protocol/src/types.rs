use serde::{Deserialize, Serialize};

use crate::identity::{DesignationId, EmployeeId};

/// A rank in the organization.
///
/// Lower `level` values denote higher authority. The designation holding
/// the minimum level in the catalog is the root rank; it is derived on
/// demand and never stored as a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Designation {
    pub id: DesignationId,
    pub title: String,
    pub level: f64,
}

impl Designation {
    /// Whether this designation strictly outranks `other`.
    pub fn outranks(&self, other: &Designation) -> bool {
        self.level < other.level
    }
}

/// A designation not yet assigned an identifier by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDesignation {
    pub title: String,
    pub level: f64,
}

/// An employee record as held by the employee store.
///
/// The manager link is one-way: subordinates and colleagues are derived
/// by querying the store, never stored on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub designation_id: DesignationId,
    /// `None` only for the root employee.
    pub manager_id: Option<EmployeeId>,
}

impl Employee {
    pub fn is_root(&self) -> bool {
        self.manager_id.is_none()
    }
}

/// An employee record not yet assigned an identifier by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub designation_id: DesignationId,
    pub manager_id: Option<EmployeeId>,
}

// ── Mutation inputs ──

/// Attributes for a new employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    #[serde(alias = "jobTitle")]
    pub job_title: String,
    #[serde(default, alias = "managerId", skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EmployeeId>,
}

/// Partial, in-place update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "jobTitle", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, alias = "managerId", skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EmployeeId>,
}

impl UpdateEmployee {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.job_title.is_none() && self.manager_id.is_none()
    }
}

/// Wholesale identity replacement.
///
/// `name` and `job_title` are required, but they are decoded as optional so
/// that their absence reaches the validator as a distinct rejection rather
/// than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceEmployee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "jobTitle", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, alias = "managerId", skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EmployeeId>,
}

impl From<UpdateEmployee> for ReplaceEmployee {
    fn from(update: UpdateEmployee) -> Self {
        Self {
            name: update.name,
            job_title: update.job_title,
            manager_id: update.manager_id,
        }
    }
}

/// Snapshot of directory-wide counters reported by `directory.status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryStatus {
    pub employee_count: usize,
    pub designation_count: usize,
    pub root_employee: Option<EmployeeId>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub uptime_secs: i64,
}
