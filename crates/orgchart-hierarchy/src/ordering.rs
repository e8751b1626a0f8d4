//! Deterministic ordering of subordinate and colleague views.
//!
//! Siblings are ordered by designation level ascending, then name, then id.
//! Views are rebuilt from the store on every call: designation levels can
//! change under an employee, so a cached sorted collection would go stale.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use orgchart_protocol::{Designation, Employee, EmployeeId};
use orgchart_state::{DesignationStore, EmployeeStore};

use crate::catalog::DesignationCatalog;
use crate::HierarchyError;

/// An employee joined with its resolved designation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEmployee {
    pub id: EmployeeId,
    pub name: String,
    pub designation: Designation,
    pub manager_id: Option<EmployeeId>,
}

/// Total order over ranked employees: level, then name, then id.
pub fn sibling_order(a: &RankedEmployee, b: &RankedEmployee) -> Ordering {
    a.designation
        .level
        .total_cmp(&b.designation.level)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Drop repeated ids (first occurrence wins) and sort by [`sibling_order`].
pub fn sorted_siblings(employees: Vec<RankedEmployee>) -> Vec<RankedEmployee> {
    let mut seen = HashSet::new();
    let mut siblings: Vec<RankedEmployee> = employees
        .into_iter()
        .filter(|e| seen.insert(e.id))
        .collect();
    siblings.sort_by(sibling_order);
    siblings
}

/// Builds ordered subordinate and colleague views from the live tree.
pub struct SiblingOrdering<'a, D, E> {
    catalog: &'a DesignationCatalog<D>,
    tree: &'a E,
}

impl<'a, D: DesignationStore, E: EmployeeStore> SiblingOrdering<'a, D, E> {
    pub fn new(catalog: &'a DesignationCatalog<D>, tree: &'a E) -> Self {
        Self { catalog, tree }
    }

    /// Join an employee with its designation.
    pub fn rank(&self, employee: Employee) -> Result<RankedEmployee, HierarchyError> {
        let designation = self.catalog.find_by_id(employee.designation_id)?.ok_or(
            HierarchyError::DanglingDesignation {
                employee: employee.id,
                designation: employee.designation_id,
            },
        )?;

        Ok(RankedEmployee {
            id: employee.id,
            name: employee.name,
            designation,
            manager_id: employee.manager_id,
        })
    }

    /// Direct subordinates of `manager`, ordered and duplicate-free.
    pub fn subordinates(&self, manager: EmployeeId) -> Result<Vec<RankedEmployee>, HierarchyError> {
        let ranked = self
            .tree
            .find_by_manager(manager)?
            .into_iter()
            .map(|e| self.rank(e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sorted_siblings(ranked))
    }

    /// The other direct subordinates of `employee`'s manager.
    ///
    /// Empty for an employee without a manager.
    pub fn colleagues(&self, employee: &Employee) -> Result<Vec<RankedEmployee>, HierarchyError> {
        let Some(manager) = employee.manager_id else {
            return Ok(Vec::new());
        };
        let mut colleagues = self.subordinates(manager)?;
        colleagues.retain(|c| c.id != employee.id);
        Ok(colleagues)
    }
}
