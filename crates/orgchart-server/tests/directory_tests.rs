//! Tests for the OrgDirectory service.
//!
//! Verifies:
//! - The Director/Manager walkthrough through the public service API
//! - Employee views carry ordered manager, colleague and subordinate summaries
//! - Designation insertion and listing
//! - Status counters

use orgchart_hierarchy::{HierarchyError, Rejection};
use orgchart_protocol::*;
use orgchart_server::config::{CatalogConfig, DesignationSeed};
use orgchart_server::{EmployeeView, OrgDirectory};

fn directory(entries: &[(&str, f64)]) -> OrgDirectory {
    let config = CatalogConfig {
        designations: entries
            .iter()
            .map(|(title, level)| DesignationSeed {
                title: title.to_string(),
                level: *level,
            })
            .collect(),
    };
    OrgDirectory::from_config(&config).unwrap()
}

fn hire(dir: &mut OrgDirectory, name: &str, title: &str, manager: Option<EmployeeId>) -> EmployeeView {
    dir.create_employee(&CreateEmployee {
        name: name.into(),
        job_title: title.into(),
        manager_id: manager,
    })
    .unwrap()
}

fn rejection<T: std::fmt::Debug>(result: Result<T, HierarchyError>) -> Rejection {
    match result {
        Err(HierarchyError::Rejected(r)) => r,
        other => panic!("expected rejection, got {:?}", other),
    }
}

fn names(view: &[orgchart_server::EmployeeSummary]) -> Vec<&str> {
    view.iter().map(|s| s.name.as_str()).collect()
}

// ═══════════════════════════════════════════════════════════════
// Walkthrough
// ═══════════════════════════════════════════════════════════════

#[test]
fn director_manager_walkthrough_through_service() {
    let mut dir = directory(&[("Director", 1.0), ("Manager", 2.0)]);

    let alice = hire(&mut dir, "Alice", "Director", None);
    assert!(alice.manager.is_none());

    let bob = dir.create_employee(&CreateEmployee {
        name: "Bob".into(),
        job_title: "Director".into(),
        manager_id: None,
    });
    assert_eq!(rejection(bob), Rejection::RootAlreadyExists);

    let carol = hire(&mut dir, "Carol", "Manager", Some(alice.id));
    assert_eq!(carol.manager.as_ref().map(|m| m.id), Some(alice.id));

    let demote = dir.update_employee(
        alice.id,
        &UpdateEmployee {
            job_title: Some("Manager".into()),
            ..Default::default()
        },
    );
    assert_eq!(rejection(demote), Rejection::SubordinateRankConflict);

    assert_eq!(
        rejection(dir.delete_employee(alice.id)),
        Rejection::RootDeletionBlocked
    );

    dir.delete_employee(carol.id).unwrap();
    dir.delete_employee(alice.id).unwrap();
    assert!(dir.list_employees().unwrap().is_empty());
}

#[test]
fn unknown_employee_is_not_a_rejection() {
    let mut dir = directory(&[("Director", 1.0)]);
    let missing = EmployeeId::new(42);

    assert!(matches!(
        dir.get_employee(missing),
        Err(HierarchyError::EmployeeNotFound(id)) if id == missing
    ));
    assert!(matches!(
        dir.delete_employee(missing),
        Err(HierarchyError::EmployeeNotFound(_))
    ));
    assert!(matches!(
        dir.update_employee(missing, &UpdateEmployee::default()),
        Err(HierarchyError::EmployeeNotFound(_))
    ));
}

// ═══════════════════════════════════════════════════════════════
// Views
// ═══════════════════════════════════════════════════════════════

#[test]
fn view_lists_ordered_colleagues_and_subordinates() {
    let mut dir = directory(&[
        ("Director", 1.0),
        ("Manager", 2.0),
        ("Lead", 3.0),
        ("Developer", 4.0),
    ]);
    let root = hire(&mut dir, "Root", "Director", None);
    let zed = hire(&mut dir, "Zed", "Manager", Some(root.id));
    hire(&mut dir, "Dan", "Developer", Some(root.id));
    hire(&mut dir, "Amy", "Lead", Some(root.id));
    hire(&mut dir, "Abe", "Manager", Some(root.id));

    let root_view = dir.get_employee(root.id).unwrap();
    assert_eq!(names(&root_view.subordinates), vec!["Abe", "Zed", "Amy", "Dan"]);
    assert!(root_view.colleagues.is_empty());

    let zed_view = dir.get_employee(zed.id).unwrap();
    assert_eq!(names(&zed_view.colleagues), vec!["Abe", "Amy", "Dan"]);
    assert_eq!(zed_view.job_title, "Manager");
    assert_eq!(zed_view.manager.as_ref().map(|m| m.name.as_str()), Some("Root"));
}

#[test]
fn view_omits_empty_relationships_when_serialized() {
    let mut dir = directory(&[("Director", 1.0)]);
    let root = hire(&mut dir, "Root", "Director", None);

    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["name"], "Root");
    assert_eq!(json["job_title"], "Director");
    assert!(json.get("manager").is_none());
    assert!(json.get("colleagues").is_none());
    assert!(json.get("subordinates").is_none());
}

#[test]
fn delete_moves_subordinates_into_managers_view() {
    let mut dir = directory(&[("Director", 1.0), ("Manager", 2.0), ("Lead", 3.0)]);
    let root = hire(&mut dir, "Root", "Director", None);
    let mid = hire(&mut dir, "Mid", "Manager", Some(root.id));
    hire(&mut dir, "Leaf", "Lead", Some(mid.id));

    dir.delete_employee(mid.id).unwrap();

    let root_view = dir.get_employee(root.id).unwrap();
    assert_eq!(names(&root_view.subordinates), vec!["Leaf"]);
}

#[test]
fn replace_returns_view_under_new_id() {
    let mut dir = directory(&[("Director", 1.0), ("Manager", 2.0), ("Lead", 3.0)]);
    let root = hire(&mut dir, "Root", "Director", None);
    let old = hire(&mut dir, "Old", "Manager", Some(root.id));
    hire(&mut dir, "Leaf", "Lead", Some(old.id));

    let new = dir
        .replace_employee(
            old.id,
            &ReplaceEmployee {
                name: Some("New".into()),
                job_title: Some("Manager".into()),
                manager_id: Some(root.id),
            },
        )
        .unwrap();

    assert_ne!(new.id, old.id);
    assert_eq!(names(&new.subordinates), vec!["Leaf"]);
    assert!(matches!(
        dir.get_employee(old.id),
        Err(HierarchyError::EmployeeNotFound(_))
    ));
}

// ═══════════════════════════════════════════════════════════════
// Designations and status
// ═══════════════════════════════════════════════════════════════

#[test]
fn inserted_designation_is_listed_between_neighbours() {
    let mut dir = directory(&[("Director", 1.0), ("Manager", 2.0)]);

    let vp = dir.insert_designation("Vice President", "Director").unwrap();
    assert_eq!(vp.level, 1.5);

    let titles: Vec<String> = dir
        .list_designations()
        .unwrap()
        .into_iter()
        .map(|d| d.title)
        .collect();
    assert_eq!(titles, vec!["Director", "Vice President", "Manager"]);
}

#[test]
fn insert_after_unknown_anchor_rejected() {
    let mut dir = directory(&[("Director", 1.0)]);
    let result = dir.insert_designation("Intern", "Janitor");
    assert_eq!(
        rejection(result),
        Rejection::DesignationNotFound("Janitor".into())
    );
}

#[test]
fn status_reports_counts_and_root() {
    let mut dir = directory(&[("Director", 1.0), ("Manager", 2.0)]);
    let empty = dir.status().unwrap();
    assert_eq!(empty.employee_count, 0);
    assert_eq!(empty.designation_count, 2);
    assert_eq!(empty.root_employee, None);

    let root = hire(&mut dir, "Root", "Director", None);
    hire(&mut dir, "Mgr", "Manager", Some(root.id));

    let status = dir.status().unwrap();
    assert_eq!(status.employee_count, 2);
    assert_eq!(status.root_employee, Some(root.id));
    assert!(status.uptime_secs >= 0);
}

#[test]
fn duplicate_seed_titles_fail_startup() {
    let config = CatalogConfig {
        designations: vec![
            DesignationSeed {
                title: "Director".into(),
                level: 1.0,
            },
            DesignationSeed {
                title: "Director".into(),
                level: 2.0,
            },
        ],
    };
    assert!(matches!(
        OrgDirectory::from_config(&config),
        Err(HierarchyError::InvalidDesignation(_))
    ));
}
