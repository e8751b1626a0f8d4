//! Response projections of employee records.
//!
//! A full view nests the manager, colleagues and subordinates as flat
//! summaries. Summaries never carry their own manager, colleagues or
//! subordinates, which keeps every response bounded in size.

use serde::{Deserialize, Serialize};

use orgchart_hierarchy::{HierarchyError, RankedEmployee, SiblingOrdering};
use orgchart_protocol::{Employee, EmployeeId};
use orgchart_state::{DesignationStore, EmployeeStore};

/// An employee with its resolved relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeView {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colleagues: Vec<EmployeeSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subordinates: Vec<EmployeeSummary>,
}

/// A nested reference to another employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
}

impl From<RankedEmployee> for EmployeeSummary {
    fn from(ranked: RankedEmployee) -> Self {
        Self {
            id: ranked.id,
            name: ranked.name,
            job_title: ranked.designation.title,
        }
    }
}

/// Project `employee` into a full view using the live tree.
pub fn employee_view<D: DesignationStore, E: EmployeeStore>(
    ordering: &SiblingOrdering<'_, D, E>,
    tree: &E,
    employee: Employee,
) -> Result<EmployeeView, HierarchyError> {
    let manager = match employee.manager_id {
        Some(manager_id) => tree
            .find_by_id(manager_id)?
            .map(|m| ordering.rank(m))
            .transpose()?
            .map(EmployeeSummary::from),
        None => None,
    };

    let colleagues = summaries(ordering.colleagues(&employee)?);
    let subordinates = summaries(ordering.subordinates(employee.id)?);
    let ranked = ordering.rank(employee)?;

    Ok(EmployeeView {
        id: ranked.id,
        name: ranked.name,
        job_title: ranked.designation.title,
        manager,
        colleagues,
        subordinates,
    })
}

fn summaries(ranked: Vec<RankedEmployee>) -> Vec<EmployeeSummary> {
    ranked.into_iter().map(EmployeeSummary::from).collect()
}
