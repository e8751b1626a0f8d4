//! The OrgDirectory struct that ties the catalog, the tree and the engine
//! together.
//!
//! Every operation follows the same path: look up the addressed record,
//! validate against the catalog and the current tree, mutate through the
//! store, then project the result into a view. The directory itself is
//! synchronous; the RPC server shares it behind a single `RwLock`, and a
//! mutation holds the write guard from validation through commit so the
//! read-then-write rule checks cannot race.

use std::sync::Arc;

use tokio::sync::RwLock;

use orgchart_hierarchy::{
    DesignationCatalog, HierarchyError, HierarchyMutator, HierarchyValidator, SiblingOrdering,
};
use orgchart_protocol::{
    CreateEmployee, Designation, DirectoryStatus, Employee, EmployeeId, ReplaceEmployee,
    UpdateEmployee,
};
use orgchart_state::{
    DesignationStore, EmployeeStore, InMemoryDesignationStore, InMemoryEmployeeStore,
};

use crate::config::CatalogConfig;
use crate::views::{employee_view, EmployeeView};

/// Directory shared between RPC connections.
pub type SharedDirectory = Arc<RwLock<OrgDirectory>>;

/// Designation catalog plus employee tree.
pub struct OrgDirectory<D = InMemoryDesignationStore, E = InMemoryEmployeeStore> {
    catalog: DesignationCatalog<D>,
    employees: E,
    started_at: chrono::DateTime<chrono::Utc>,
}

impl OrgDirectory {
    /// Build an in-memory directory with the configured designations.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, HierarchyError> {
        let mut catalog = DesignationCatalog::new(InMemoryDesignationStore::new());
        for seed in &config.designations {
            catalog.add(&seed.title, seed.level)?;
        }

        tracing::info!(
            designations = config.designations.len(),
            "Designation catalog seeded"
        );

        Ok(Self::with_catalog(catalog, InMemoryEmployeeStore::new()))
    }

    /// Wrap the directory for sharing across connections.
    pub fn into_shared(self) -> SharedDirectory {
        Arc::new(RwLock::new(self))
    }
}

impl<D: DesignationStore, E: EmployeeStore> OrgDirectory<D, E> {
    pub fn new(designations: D, employees: E) -> Self {
        Self::with_catalog(DesignationCatalog::new(designations), employees)
    }

    fn with_catalog(catalog: DesignationCatalog<D>, employees: E) -> Self {
        Self {
            catalog,
            employees,
            started_at: chrono::Utc::now(),
        }
    }

    pub fn catalog(&self) -> &DesignationCatalog<D> {
        &self.catalog
    }

    pub fn employees(&self) -> &E {
        &self.employees
    }

    // ── Employees ──

    /// Every employee, in id order.
    pub fn list_employees(&self) -> Result<Vec<EmployeeView>, HierarchyError> {
        self.employees
            .find_all()?
            .into_iter()
            .map(|e| self.view(e))
            .collect()
    }

    pub fn get_employee(&self, id: EmployeeId) -> Result<EmployeeView, HierarchyError> {
        let employee = self.require(id)?;
        self.view(employee)
    }

    pub fn create_employee(&mut self, input: &CreateEmployee) -> Result<EmployeeView, HierarchyError> {
        let validated = self.validator().validate_create(input).inspect_err(|e| {
            tracing::debug!(name = %input.name, error = %e, "Create rejected");
        })?;
        let employee = HierarchyMutator::new(&mut self.employees).create(validated)?;
        self.view(employee)
    }

    pub fn update_employee(
        &mut self,
        id: EmployeeId,
        changes: &UpdateEmployee,
    ) -> Result<EmployeeView, HierarchyError> {
        let employee = self.require(id)?;
        let validated = self
            .validator()
            .validate_update(&employee, changes)
            .inspect_err(|e| {
                tracing::debug!(employee = %id, error = %e, "Update rejected");
            })?;
        let employee = HierarchyMutator::new(&mut self.employees).update(validated)?;
        self.view(employee)
    }

    pub fn replace_employee(
        &mut self,
        id: EmployeeId,
        input: &ReplaceEmployee,
    ) -> Result<EmployeeView, HierarchyError> {
        let employee = self.require(id)?;
        let validated = self
            .validator()
            .validate_replace(&employee, input)
            .inspect_err(|e| {
                tracing::debug!(employee = %id, error = %e, "Replace rejected");
            })?;
        let employee = HierarchyMutator::new(&mut self.employees).replace(validated)?;
        self.view(employee)
    }

    pub fn delete_employee(&mut self, id: EmployeeId) -> Result<(), HierarchyError> {
        let employee = self.require(id)?;
        let validated = self.validator().validate_delete(&employee).inspect_err(|e| {
            tracing::debug!(employee = %id, error = %e, "Delete rejected");
        })?;
        HierarchyMutator::new(&mut self.employees).delete(validated)
    }

    // ── Designations ──

    pub fn list_designations(&self) -> Result<Vec<Designation>, HierarchyError> {
        self.catalog.all_ordered_by_level_ascending()
    }

    /// Add `title` ranked directly below the `after` designation.
    pub fn insert_designation(
        &mut self,
        title: &str,
        after: &str,
    ) -> Result<Designation, HierarchyError> {
        self.catalog.insert_after(after, title)
    }

    // ── Status ──

    pub fn status(&self) -> Result<DirectoryStatus, HierarchyError> {
        let employees = self.employees.find_all()?;
        let now = chrono::Utc::now();

        Ok(DirectoryStatus {
            employee_count: employees.len(),
            designation_count: self.catalog.len()?,
            root_employee: employees.iter().find(|e| e.is_root()).map(|e| e.id),
            started_at: self.started_at,
            uptime_secs: now.signed_duration_since(self.started_at).num_seconds(),
        })
    }

    // ── Helpers ──

    fn validator(&self) -> HierarchyValidator<'_, D, E> {
        HierarchyValidator::new(&self.catalog, &self.employees)
    }

    fn require(&self, id: EmployeeId) -> Result<Employee, HierarchyError> {
        self.employees
            .find_by_id(id)?
            .ok_or(HierarchyError::EmployeeNotFound(id))
    }

    fn view(&self, employee: Employee) -> Result<EmployeeView, HierarchyError> {
        let ordering = SiblingOrdering::new(&self.catalog, &self.employees);
        employee_view(&ordering, &self.employees, employee)
    }
}
