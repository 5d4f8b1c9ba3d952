use chrono::{DateTime, Utc};

use super::common::*;
use crate::clock::{Clock, FixedClock};
use crate::workflows::personnel::domain::{EmployeeImportRow, EmployeeStatus};
use crate::workflows::personnel::registry::{EmployeeRegistry, RegistryError, RosterQuery};

fn now() -> DateTime<Utc> {
    FixedClock::on(today()).now()
}

#[test]
fn create_stamps_probation_end_and_active_status() {
    let mut registry = EmployeeRegistry::default();
    let employee = registry.create(draft("L-001"), now()).clone();

    assert_eq!(employee.status, EmployeeStatus::Active);
    assert_eq!(employee.probation_end, date(2025, 7, 15));
    assert!(employee.termination_date.is_none());
    assert_eq!(registry.find_by_legajo("L-001"), Some(&employee));
}

#[test]
fn ids_stay_unique_within_the_same_millisecond() {
    let mut registry = EmployeeRegistry::default();
    let first = registry.create(draft("L-001"), now()).id;
    let second = registry.create(draft("L-002"), now()).id;
    assert_ne!(first, second);
}

#[test]
fn update_recomputes_probation_end() {
    let mut registry = EmployeeRegistry::default();
    let id = registry.create(draft("L-001"), now()).id;

    let mut changes = draft("L-001");
    changes.hire_date = date(2024, 8, 31);
    let updated = registry.update(id, changes).expect("update succeeds");

    assert_eq!(updated.hire_date, date(2024, 8, 31));
    assert_eq!(updated.probation_end, date(2025, 3, 3));
    assert_eq!(updated.status, EmployeeStatus::Active);
}

#[test]
fn terminated_employee_cannot_be_edited_or_terminated_again() {
    let mut registry = EmployeeRegistry::default();
    let id = registry.create(draft("L-001"), now()).id;

    let terminated = registry
        .terminate(id, "  Renuncia  ", today())
        .expect("termination succeeds");
    assert_eq!(terminated.status, EmployeeStatus::Terminated);
    assert_eq!(terminated.termination_date, Some(today()));
    assert_eq!(terminated.termination_reason.as_deref(), Some("Renuncia"));

    match registry.terminate(id, "Otra vez", today()) {
        Err(RegistryError::AlreadyTerminated(found)) => assert_eq!(found, id),
        other => panic!("expected already terminated, got {other:?}"),
    }
    match registry.update(id, draft("L-001")) {
        Err(RegistryError::Terminated(found)) => assert_eq!(found, id),
        other => panic!("expected terminated error, got {other:?}"),
    }
}

#[test]
fn termination_requires_a_reason() {
    let mut registry = EmployeeRegistry::default();
    let id = registry.create(draft("L-001"), now()).id;

    assert!(matches!(
        registry.terminate(id, "   ", today()),
        Err(RegistryError::MissingTerminationReason)
    ));
    assert!(registry.get(id).expect("employee present").is_active());
}

#[test]
fn pending_employee_can_be_terminated() {
    let mut registry = EmployeeRegistry::default();
    let mut pending = registry.create(draft("L-001"), now()).clone();
    pending.status = EmployeeStatus::Pending;
    let mut registry = EmployeeRegistry::new(vec![pending.clone()]);

    let terminated = registry
        .terminate(pending.id, "No se presentó", today())
        .expect("pending can be terminated");
    assert!(terminated.is_terminated());
}

#[test]
fn bulk_import_skips_existing_and_repeated_legajos() {
    let mut registry = EmployeeRegistry::default();
    registry.create(draft("L-001"), now());

    let rows = vec![
        import_row("L-001", "Existente"),
        import_row("L-002", "Nuevo"),
        import_row("L-003", "Otro"),
        import_row("L-002", "Repetido"),
    ];
    let outcome = registry.bulk_import(rows, today(), now());

    assert_eq!(outcome.inserted_count(), 2);
    assert_eq!(outcome.skipped, vec!["L-001".to_string(), "L-002".to_string()]);
    assert_eq!(registry.employees().len(), 3);
    assert_eq!(
        registry
            .find_by_legajo("L-002")
            .map(|employee| employee.last_name.as_str()),
        Some("Nuevo")
    );
}

#[test]
fn bulk_import_fills_missing_fields() {
    let mut registry = EmployeeRegistry::default();
    let outcome = registry.bulk_import(vec![EmployeeImportRow::default()], today(), now());

    let employee = registry
        .get(outcome.inserted[0])
        .expect("imported employee present");
    assert!(employee.legajo.starts_with("IMP-"));
    assert!(employee.legajo.ends_with("-0"));
    assert_eq!(employee.first_name, "N/A");
    assert_eq!(employee.last_name, "N/A");
    assert_eq!(employee.hire_date, today());
    assert_eq!(employee.probation_end, date(2025, 9, 10));
    assert_eq!(employee.status, EmployeeStatus::Active);
}

#[test]
fn roster_query_matches_across_identity_fields() {
    let mut registry = EmployeeRegistry::default();
    registry.create(draft("L-001"), now());
    let mut other = draft("X-900");
    other.first_name = "Carlos".to_string();
    other.last_name = "Méndez".to_string();
    other.dni = "22333444".to_string();
    other.cuil = "20-22333444-1".to_string();
    let other_id = registry.create(other, now()).id;
    registry
        .terminate(other_id, "Despido", today())
        .expect("terminate");

    let by_name = RosterQuery {
        search: Some("SUÁREZ".to_string()),
        status: None,
    };
    let by_dni = RosterQuery {
        search: Some("22333".to_string()),
        status: None,
    };
    let active_only = RosterQuery {
        search: None,
        status: Some(EmployeeStatus::Active),
    };

    let matches = |query: &RosterQuery| {
        registry
            .employees()
            .iter()
            .filter(|employee| query.matches(employee))
            .map(|employee| employee.legajo.clone())
            .collect::<Vec<_>>()
    };

    assert_eq!(matches(&by_name), vec!["L-001".to_string()]);
    assert_eq!(matches(&by_dni), vec!["X-900".to_string()]);
    assert_eq!(matches(&active_only), vec!["L-001".to_string()]);
    assert_eq!(matches(&RosterQuery::default()).len(), 2);
}
