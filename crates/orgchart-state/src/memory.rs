//! In-memory stores backing the directory server and the test suites.
//!
//! Records live in `BTreeMap`s keyed by id so listings come back in id
//! order. Ids are taken from a monotonically increasing counter starting at
//! 1 and are never handed out twice, even after a delete.

use std::collections::BTreeMap;

use orgchart_protocol::{
    Designation, DesignationId, Employee, EmployeeId, NewDesignation, NewEmployee,
};

use crate::store::{DesignationStore, EmployeeStore};
use crate::StateError;

/// Designation catalog held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDesignationStore {
    data: BTreeMap<DesignationId, Designation>,
    next_id: u64,
}

impl InMemoryDesignationStore {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Get the total number of stored designations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for InMemoryDesignationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignationStore for InMemoryDesignationStore {
    fn find_by_id(&self, id: DesignationId) -> Result<Option<Designation>, StateError> {
        Ok(self.data.get(&id).cloned())
    }

    fn find_by_title(&self, title: &str) -> Result<Option<Designation>, StateError> {
        Ok(self.data.values().find(|d| d.title == title).cloned())
    }

    fn find_by_level(&self, level: f64) -> Result<Vec<Designation>, StateError> {
        Ok(self
            .data
            .values()
            .filter(|d| d.level == level)
            .cloned()
            .collect())
    }

    fn find_all(&self) -> Result<Vec<Designation>, StateError> {
        Ok(self.data.values().cloned().collect())
    }

    fn insert(&mut self, designation: NewDesignation) -> Result<Designation, StateError> {
        if self.data.values().any(|d| d.title == designation.title) {
            return Err(StateError::UniqueViolation(format!(
                "designation title '{}' already exists",
                designation.title
            )));
        }

        let id = DesignationId::new(self.next_id);
        self.next_id += 1;

        let record = Designation {
            id,
            title: designation.title,
            level: designation.level,
        };
        self.data.insert(id, record.clone());

        tracing::trace!(designation = %id, title = %record.title, level = record.level, "Designation stored");
        Ok(record)
    }
}

/// Employee records held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryEmployeeStore {
    data: BTreeMap<EmployeeId, Employee>,
    next_id: u64,
}

impl InMemoryEmployeeStore {
    /// Create a new empty employee store.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for InMemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, StateError> {
        Ok(self.data.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Employee>, StateError> {
        Ok(self.data.values().cloned().collect())
    }

    fn find_by_designation(&self, id: DesignationId) -> Result<Vec<Employee>, StateError> {
        Ok(self
            .data
            .values()
            .filter(|e| e.designation_id == id)
            .cloned()
            .collect())
    }

    fn find_by_manager(&self, manager: EmployeeId) -> Result<Vec<Employee>, StateError> {
        Ok(self
            .data
            .values()
            .filter(|e| e.manager_id == Some(manager))
            .cloned()
            .collect())
    }

    fn insert(&mut self, employee: NewEmployee) -> Result<Employee, StateError> {
        let id = EmployeeId::new(self.next_id);
        self.next_id += 1;

        let record = Employee {
            id,
            name: employee.name,
            designation_id: employee.designation_id,
            manager_id: employee.manager_id,
        };
        self.data.insert(id, record.clone());
        Ok(record)
    }

    fn save(&mut self, employee: Employee) -> Result<Employee, StateError> {
        match self.data.get_mut(&employee.id) {
            Some(slot) => {
                *slot = employee.clone();
                Ok(employee)
            }
            None => Err(StateError::RecordNotFound(format!(
                "employee {}",
                employee.id
            ))),
        }
    }

    fn delete(&mut self, id: EmployeeId) -> Result<(), StateError> {
        self.data
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StateError::RecordNotFound(format!("employee {}", id)))
    }

    fn count(&self) -> Result<usize, StateError> {
        Ok(self.data.len())
    }
}
