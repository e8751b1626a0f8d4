//! Applies validated mutations to the employee store.
//!
//! The mutator trusts its input: it can only be handed `Validated*` values
//! produced by the validator. It never re-checks rules. Any store failure
//! is surfaced as-is and not retried.
//!
//! Re-parenting always happens before the record it hangs off is removed,
//! so no subordinate ever points at a deleted manager. Callers that share
//! the store across requests must hold one exclusive guard across
//! validation and mutation for the whole sequence to be atomic.

use orgchart_protocol::{Employee, EmployeeId, NewEmployee};
use orgchart_state::EmployeeStore;

use crate::validator::{ValidatedCreate, ValidatedDelete, ValidatedReplace, ValidatedUpdate};
use crate::HierarchyError;

/// Writes accepted mutations through an employee store.
pub struct HierarchyMutator<'a, E> {
    store: &'a mut E,
}

impl<'a, E: EmployeeStore> HierarchyMutator<'a, E> {
    pub fn new(store: &'a mut E) -> Self {
        Self { store }
    }

    /// Persist a new employee.
    pub fn create(&mut self, input: ValidatedCreate) -> Result<Employee, HierarchyError> {
        let employee = self.store.insert(NewEmployee {
            name: input.name,
            designation_id: input.designation.id,
            manager_id: input.manager_id,
        })?;

        tracing::info!(
            employee = %employee.id,
            name = %employee.name,
            designation = %input.designation.title,
            manager = ?employee.manager_id,
            "Employee created"
        );

        Ok(employee)
    }

    /// Apply the fields present in the change set and persist.
    pub fn update(&mut self, changes: ValidatedUpdate) -> Result<Employee, HierarchyError> {
        let mut employee = changes.employee;

        if let Some(name) = changes.name {
            employee.name = name;
        }
        if let Some(designation) = &changes.designation {
            employee.designation_id = designation.id;
        }
        if let Some(manager_id) = changes.manager_id {
            employee.manager_id = Some(manager_id);
        }

        let employee = self.store.save(employee)?;

        tracing::info!(
            employee = %employee.id,
            name = %employee.name,
            designation = %employee.designation_id,
            manager = ?employee.manager_id,
            "Employee updated"
        );

        Ok(employee)
    }

    /// Replace an employee with a new identity.
    ///
    /// Inserts the new record, points every direct subordinate of the old
    /// record at it, and only then deletes the old record.
    pub fn replace(&mut self, input: ValidatedReplace) -> Result<Employee, HierarchyError> {
        let old = input.replaced;

        let employee = self.store.insert(NewEmployee {
            name: input.name,
            designation_id: input.designation.id,
            manager_id: input.manager_id,
        })?;

        let moved = self.reparent(old.id, Some(employee.id))?;
        self.store.delete(old.id)?;

        tracing::info!(
            old = %old.id,
            new = %employee.id,
            name = %employee.name,
            designation = %input.designation.title,
            reparented = moved,
            "Employee replaced"
        );

        Ok(employee)
    }

    /// Delete an employee, handing its direct subordinates to its manager.
    pub fn delete(&mut self, input: ValidatedDelete) -> Result<(), HierarchyError> {
        let successor = input.successor();
        let employee = input.employee;

        let moved = self.reparent(employee.id, successor)?;
        self.store.delete(employee.id)?;

        tracing::info!(
            employee = %employee.id,
            name = %employee.name,
            successor = ?successor,
            reparented = moved,
            "Employee deleted"
        );

        Ok(())
    }

    /// Point every direct subordinate of `from` at `to`.
    ///
    /// Returns how many records were moved.
    fn reparent(&mut self, from: EmployeeId, to: Option<EmployeeId>) -> Result<usize, HierarchyError> {
        let subordinates = self.store.find_by_manager(from)?;
        let count = subordinates.len();

        for mut subordinate in subordinates {
            subordinate.manager_id = to;
            tracing::debug!(
                employee = %subordinate.id,
                from = %from,
                to = ?to,
                "Re-parenting subordinate"
            );
            self.store.save(subordinate)?;
        }

        Ok(count)
    }
}
