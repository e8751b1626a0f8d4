//! Rule checks for every hierarchy mutation.
//!
//! The validator only reads. Each check either returns a `Validated*`
//! value, which is the only way to obtain input the mutator will accept,
//! or rejects with the first rule the request breaks. Checks run in a
//! fixed order so a request violating several rules always gets the same
//! rejection.
//!
//! Rank comparisons are strict throughout: a manager must have a level
//! strictly lower than each of its direct subordinates.

use orgchart_protocol::{
    CreateEmployee, Designation, Employee, EmployeeId, ReplaceEmployee, UpdateEmployee,
};
use orgchart_state::{DesignationStore, EmployeeStore};

use crate::catalog::DesignationCatalog;
use crate::{HierarchyError, Rejection};

/// An accepted create request.
#[derive(Debug, Clone)]
pub struct ValidatedCreate {
    pub(crate) name: String,
    pub(crate) designation: Designation,
    pub(crate) manager_id: Option<EmployeeId>,
}

impl ValidatedCreate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn designation(&self) -> &Designation {
        &self.designation
    }

    pub fn manager_id(&self) -> Option<EmployeeId> {
        self.manager_id
    }
}

/// An accepted partial update. `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct ValidatedUpdate {
    pub(crate) employee: Employee,
    pub(crate) name: Option<String>,
    pub(crate) designation: Option<Designation>,
    pub(crate) manager_id: Option<EmployeeId>,
}

impl ValidatedUpdate {
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn designation(&self) -> Option<&Designation> {
        self.designation.as_ref()
    }

    pub fn manager_id(&self) -> Option<EmployeeId> {
        self.manager_id
    }
}

/// An accepted identity replacement.
#[derive(Debug, Clone)]
pub struct ValidatedReplace {
    pub(crate) replaced: Employee,
    pub(crate) name: String,
    pub(crate) designation: Designation,
    pub(crate) manager_id: Option<EmployeeId>,
}

impl ValidatedReplace {
    pub fn replaced(&self) -> &Employee {
        &self.replaced
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn designation(&self) -> &Designation {
        &self.designation
    }

    pub fn manager_id(&self) -> Option<EmployeeId> {
        self.manager_id
    }
}

/// An accepted deletion.
#[derive(Debug, Clone)]
pub struct ValidatedDelete {
    pub(crate) employee: Employee,
}

impl ValidatedDelete {
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Manager that inherits the deleted employee's direct subordinates.
    pub fn successor(&self) -> Option<EmployeeId> {
        self.employee.manager_id
    }
}

/// Checks proposed mutations against the catalog and the current tree.
pub struct HierarchyValidator<'a, D, E> {
    catalog: &'a DesignationCatalog<D>,
    tree: &'a E,
}

impl<'a, D: DesignationStore, E: EmployeeStore> HierarchyValidator<'a, D, E> {
    pub fn new(catalog: &'a DesignationCatalog<D>, tree: &'a E) -> Self {
        Self { catalog, tree }
    }

    /// Validate a new employee.
    ///
    /// Order: name, designation, root rules, manager existence, manager rank.
    /// A root-rank employee is accepted without a manager; every other
    /// employee needs an existing manager that strictly outranks it.
    pub fn validate_create(&self, input: &CreateEmployee) -> Result<ValidatedCreate, HierarchyError> {
        let name = non_blank(&input.name)?;
        let designation = self.resolve_title(&input.job_title)?;

        if self.catalog.holds_root_rank(&designation)? {
            let root = self.catalog.root_designation()?;
            if !self.tree.find_by_designation(root.id)?.is_empty() {
                return Err(Rejection::RootAlreadyExists.into());
            }
            if input.manager_id.is_some() {
                return Err(Rejection::ManagerForbiddenForRoot.into());
            }
            return Ok(ValidatedCreate {
                name,
                designation: root,
                manager_id: None,
            });
        }

        let manager = self.resolve_manager(input.manager_id)?;
        self.require_outranks(&manager, &designation)?;

        Ok(ValidatedCreate {
            name,
            designation,
            manager_id: Some(manager.id),
        })
    }

    /// Validate a partial update of `employee`.
    ///
    /// A designation change must keep the employee strictly above every
    /// direct subordinate and strictly below its manager (the new one if
    /// the same request also changes manager). The root designation can
    /// neither be handed to another employee nor taken from the root.
    pub fn validate_update(
        &self,
        employee: &Employee,
        changes: &UpdateEmployee,
    ) -> Result<ValidatedUpdate, HierarchyError> {
        let name = changes.name.as_deref().map(non_blank).transpose()?;

        let current = self.designation_of(employee)?;
        let mut effective = current.clone();
        let mut designation = None;

        if let Some(title) = changes.job_title.as_deref() {
            let target = self.resolve_title(title)?;

            if target.id != current.id {
                let target_is_root = self.catalog.holds_root_rank(&target)?;
                let employee_is_root = self.catalog.holds_root_rank(&current)?;

                if target_is_root || employee_is_root {
                    self.catalog.root_designation()?;
                }
                if target_is_root {
                    return Err(Rejection::RootDesignationImmutable.into());
                }

                if let Some(highest) = self.highest_subordinate_designation(employee.id)? {
                    if !target.outranks(&highest) {
                        tracing::debug!(
                            employee = %employee.id,
                            target = %target.title,
                            subordinate = %highest.title,
                            "Designation change would be outranked by a subordinate"
                        );
                        return Err(Rejection::SubordinateRankConflict.into());
                    }
                }

                if employee_is_root {
                    return Err(Rejection::RootDesignationImmutable.into());
                }

                effective = target.clone();
                designation = Some(target);
            }
        }

        let manager_id = match changes.manager_id {
            Some(candidate) => {
                if employee.is_root() {
                    return Err(Rejection::ManagerForbiddenForRoot.into());
                }
                if candidate == employee.id {
                    return Err(Rejection::ManagerIsSelf.into());
                }
                let manager = self.resolve_manager(Some(candidate))?;
                self.require_outranks(&manager, &effective)?;
                Some(manager.id)
            }
            None => {
                if designation.is_some() {
                    if let Some(current_manager) = employee.manager_id {
                        let manager = self.resolve_manager(Some(current_manager))?;
                        self.require_outranks(&manager, &effective)?;
                    }
                }
                None
            }
        };

        Ok(ValidatedUpdate {
            employee: employee.clone(),
            name,
            designation,
            manager_id,
        })
    }

    /// Validate replacing `old` with a new identity.
    ///
    /// Besides the create rules, the new record inherits `old`'s direct
    /// subordinates, so it must strictly outrank every one of them.
    pub fn validate_replace(
        &self,
        old: &Employee,
        input: &ReplaceEmployee,
    ) -> Result<ValidatedReplace, HierarchyError> {
        let (Some(name), Some(title)) = (input.name.as_deref(), input.job_title.as_deref()) else {
            return Err(Rejection::MissingRequiredFields.into());
        };
        let name = non_blank(name)?;
        let designation = self.resolve_title(title)?;

        let manager_id = if self.catalog.holds_root_rank(&designation)? {
            let root = self.catalog.root_designation()?;
            if input.manager_id.is_some() {
                return Err(Rejection::ManagerForbiddenForRoot.into());
            }
            let other_root = self
                .tree
                .find_by_designation(root.id)?
                .into_iter()
                .any(|e| e.id != old.id);
            if other_root {
                return Err(Rejection::RootAlreadyExists.into());
            }
            None
        } else {
            if input.manager_id == Some(old.id) {
                return Err(Rejection::ManagerIsSelf.into());
            }
            let manager = self.resolve_manager(input.manager_id)?;
            self.require_outranks(&manager, &designation)?;
            Some(manager.id)
        };

        if let Some(highest) = self.highest_subordinate_designation(old.id)? {
            if !designation.outranks(&highest) {
                return Err(Rejection::SubordinateRankConflict.into());
            }
        }

        Ok(ValidatedReplace {
            replaced: old.clone(),
            name,
            designation,
            manager_id,
        })
    }

    /// Validate deleting `employee`.
    ///
    /// The root may only be deleted once it has no direct reports; anyone
    /// else hands its subordinates to its own manager.
    pub fn validate_delete(&self, employee: &Employee) -> Result<ValidatedDelete, HierarchyError> {
        if employee.is_root() && !self.tree.find_by_manager(employee.id)?.is_empty() {
            return Err(Rejection::RootDeletionBlocked.into());
        }

        Ok(ValidatedDelete {
            employee: employee.clone(),
        })
    }

    // ── Helpers ──

    fn resolve_title(&self, title: &str) -> Result<Designation, HierarchyError> {
        self.catalog
            .find_by_title(title)?
            .ok_or_else(|| Rejection::DesignationNotFound(title.to_string()).into())
    }

    fn resolve_manager(&self, id: Option<EmployeeId>) -> Result<Employee, HierarchyError> {
        let Some(id) = id else {
            return Err(Rejection::ManagerNotFound.into());
        };
        self.tree
            .find_by_id(id)?
            .ok_or_else(|| Rejection::ManagerNotFound.into())
    }

    fn designation_of(&self, employee: &Employee) -> Result<Designation, HierarchyError> {
        self.catalog
            .find_by_id(employee.designation_id)?
            .ok_or(HierarchyError::DanglingDesignation {
                employee: employee.id,
                designation: employee.designation_id,
            })
    }

    fn require_outranks(
        &self,
        manager: &Employee,
        designation: &Designation,
    ) -> Result<(), HierarchyError> {
        let manager_designation = self.designation_of(manager)?;
        if manager_designation.outranks(designation) {
            Ok(())
        } else {
            Err(Rejection::ManagerRankTooLow.into())
        }
    }

    /// The highest-ranked (minimum level) designation among `manager`'s
    /// direct subordinates.
    fn highest_subordinate_designation(
        &self,
        manager: EmployeeId,
    ) -> Result<Option<Designation>, HierarchyError> {
        let mut highest: Option<Designation> = None;
        for subordinate in self.tree.find_by_manager(manager)? {
            let designation = self.designation_of(&subordinate)?;
            if highest.as_ref().map_or(true, |h| designation.outranks(h)) {
                highest = Some(designation);
            }
        }
        Ok(highest)
    }
}

fn non_blank(name: &str) -> Result<String, Rejection> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(Rejection::NameEmpty)
    } else {
        Ok(trimmed.to_string())
    }
}
