//! Store contracts consumed by the hierarchy engine.

use orgchart_protocol::{
    Designation, DesignationId, Employee, EmployeeId, NewDesignation, NewEmployee,
};

use crate::StateError;

/// Read and insert access to the designation catalog.
pub trait DesignationStore {
    fn find_by_id(&self, id: DesignationId) -> Result<Option<Designation>, StateError>;

    /// Exact, case-sensitive title match.
    fn find_by_title(&self, title: &str) -> Result<Option<Designation>, StateError>;

    /// All designations whose level equals `level` exactly.
    fn find_by_level(&self, level: f64) -> Result<Vec<Designation>, StateError>;

    fn find_all(&self) -> Result<Vec<Designation>, StateError>;

    /// All designations, lowest level (highest authority) first.
    ///
    /// Designations sharing a level keep a stable order by id.
    fn find_all_ordered_by_level(&self) -> Result<Vec<Designation>, StateError> {
        let mut all = self.find_all()?;
        all.sort_by(|a, b| a.level.total_cmp(&b.level).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    /// Insert a designation, assigning it a fresh id.
    ///
    /// Fails with `StateError::UniqueViolation` if the title is taken.
    fn insert(&mut self, designation: NewDesignation) -> Result<Designation, StateError>;
}

/// Read and write access to employee records.
pub trait EmployeeStore {
    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, StateError>;

    fn find_all(&self) -> Result<Vec<Employee>, StateError>;

    fn find_by_designation(&self, id: DesignationId) -> Result<Vec<Employee>, StateError>;

    /// Direct subordinates of `manager`, in no particular order.
    fn find_by_manager(&self, manager: EmployeeId) -> Result<Vec<Employee>, StateError>;

    /// Insert a new record, assigning it a fresh id that is never reused.
    fn insert(&mut self, employee: NewEmployee) -> Result<Employee, StateError>;

    /// Overwrite an existing record.
    ///
    /// Fails with `StateError::RecordNotFound` if no record has that id.
    fn save(&mut self, employee: Employee) -> Result<Employee, StateError>;

    /// Remove a record. Fails with `StateError::RecordNotFound` if absent.
    fn delete(&mut self, id: EmployeeId) -> Result<(), StateError>;

    fn count(&self) -> Result<usize, StateError> {
        Ok(self.find_all()?.len())
    }
}
