use std::sync::Arc;

use super::common::*;
use crate::storage::{CollectionKey, KeyValueStore, StorageError};
use crate::workflows::personnel::catalog::DocumentTypeChanges;
use crate::workflows::personnel::compliance::{DocumentStatus, Semaphore};
use crate::workflows::personnel::domain::{
    AuditAction, AuditEntity, DocumentTypeId, EmployeeId, EmployeeStatus,
};
use crate::workflows::personnel::registry::RosterQuery;
use crate::workflows::personnel::{
    PersonnelService, PersonnelServiceError, UNKNOWN_DOCUMENT_TYPE_LABEL,
};

#[test]
fn fresh_store_seeds_default_document_types() {
    let (service, store) = build_service();

    let names: Vec<&str> = service
        .catalog()
        .types()
        .iter()
        .map(|document_type| document_type.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "DNI",
            "CUIL/CUIT",
            "Alta Temprana",
            "Apto Médico",
            "ART",
            "Constancia Domicilio"
        ]
    );
    assert!(service.registry().employees().is_empty());
    assert!(service.audit_log().is_empty());
    assert!(store.raw(CollectionKey::DocumentTypes).is_none());
}

#[test]
fn create_employee_persists_and_audits() {
    let (mut service, store) = build_service();

    let employee = service
        .create_employee(draft("L-001"))
        .expect("employee created");

    let entry = &service.audit_log().entries()[0];
    assert_eq!(entry.action, AuditAction::Create);
    assert_eq!(entry.entity, AuditEntity::Employee);
    assert_eq!(entry.entity_id, Some(employee.id.0));
    assert_eq!(entry.detail, "Creado legajo: L-001");

    let raw = store
        .raw(CollectionKey::Employees)
        .expect("employees persisted");
    assert!(raw.contains("\"legajo\":\"L-001\""));
    assert!(raw.contains("\"estado_empleado\":\"Activo\""));
    assert!(store.raw(CollectionKey::AuditLogs).is_some());
}

#[test]
fn update_and_terminate_are_audited_newest_first() {
    let (mut service, _store) = build_service();
    let id = service.create_employee(draft("L-001")).expect("create").id;

    let mut changes = draft("L-001B");
    changes.hire_date = date(2024, 8, 31);
    let updated = service.update_employee(id, changes).expect("update");
    assert_eq!(updated.probation_end, date(2025, 3, 3));

    let terminated = service
        .terminate_employee(id, "Renuncia")
        .expect("terminate");
    assert_eq!(terminated.status, EmployeeStatus::Terminated);

    let details: Vec<&str> = service
        .audit_log()
        .entries()
        .iter()
        .map(|entry| entry.detail.as_str())
        .collect();
    assert_eq!(
        details,
        vec![
            "Baja de legajo. Motivo: Renuncia",
            "Editado legajo: L-001B",
            "Creado legajo: L-001",
        ]
    );
    assert_eq!(service.audit_log().entries()[0].action, AuditAction::Delete);

    match service.terminate_employee(id, "Otra vez") {
        Err(PersonnelServiceError::Registry(_)) => {}
        other => panic!("expected registry error, got {other:?}"),
    }
    assert_eq!(service.audit_log().len(), 3);
}

#[test]
fn import_inserts_new_rows_and_records_a_single_entry() {
    let (mut service, _store) = build_service();
    service.create_employee(draft("L-001")).expect("create");
    let audit_before = service.audit_log().len();

    let outcome = service
        .import_employees(vec![
            import_row("L-001", "Duplicado"),
            import_row("L-010", "Nuevo"),
            import_row("L-011", "Nueva"),
        ])
        .expect("import succeeds");

    assert_eq!(outcome.inserted_count(), 2);
    assert_eq!(service.registry().employees().len(), 3);
    assert_eq!(service.audit_log().len(), audit_before + 1);

    let entry = &service.audit_log().entries()[0];
    assert_eq!(entry.action, AuditAction::Import);
    assert_eq!(entry.entity_id, None);
    assert_eq!(entry.detail, "Importados 2 empleados desde Excel");
}

#[test]
fn upload_requires_known_employee_and_type() {
    let (mut service, _store) = build_service();

    match service.upload_document(upload(EmployeeId(1), DocumentTypeId(1), None)) {
        Err(PersonnelServiceError::EmployeeNotFound(id)) => assert_eq!(id, EmployeeId(1)),
        other => panic!("expected missing employee, got {other:?}"),
    }

    let id = service.create_employee(draft("L-001")).expect("create").id;
    match service.upload_document(upload(id, DocumentTypeId(77), None)) {
        Err(PersonnelServiceError::UnknownDocumentType(found)) => {
            assert_eq!(found, DocumentTypeId(77))
        }
        other => panic!("expected unknown type, got {other:?}"),
    }
}

#[test]
fn document_lifecycle_drives_semaphore_and_history() {
    let (mut service, store) = build_service();
    let id = service.create_employee(draft("L-001")).expect("create").id;
    assert_eq!(service.semaphore(id), Semaphore::Critical);

    for type_id in 1..=3 {
        service
            .upload_document(upload(id, DocumentTypeId(type_id), None))
            .expect("identity documents upload");
    }
    service
        .upload_document(upload(id, DocumentTypeId(4), Some(date(2026, 1, 1))))
        .expect("medical upload");
    let art = service
        .upload_document(upload(id, DocumentTypeId(5), Some(date(2025, 3, 20))))
        .expect("art upload");

    assert_eq!(service.semaphore(id), Semaphore::Attention);
    let art_type = service
        .document_type(DocumentTypeId(5))
        .expect("ART present")
        .clone();
    assert_eq!(
        service.document_status(id, &art_type),
        DocumentStatus::ExpiringSoon
    );

    let checklist = service.checklist(id);
    assert_eq!(checklist.entries.len(), 6);
    assert_eq!(checklist.missing, 1);
    assert_eq!(checklist.expiring_soon, 1);
    assert_eq!(checklist.expired, 0);

    let deleted = service.delete_document(art.id).expect("delete succeeds");
    assert_eq!(deleted.id, art.id);
    assert_eq!(service.semaphore(id), Semaphore::Critical);

    let entry = &service.audit_log().entries()[0];
    assert_eq!(entry.action, AuditAction::Delete);
    assert_eq!(entry.entity, AuditEntity::Document);
    assert_eq!(entry.entity_id, Some(id.0));
    assert_eq!(entry.detail, "Eliminado documento: ART (apto.pdf)");

    let profile = service.profile(id).expect("profile");
    assert_eq!(profile.history.len(), 7);
    assert_eq!(profile.semaphore, Semaphore::Critical);
    assert!(store.raw(CollectionKey::EmployeeDocuments).is_some());
}

#[test]
fn removing_a_type_keeps_documents_as_orphans() {
    let (mut service, _store) = build_service();
    let id = service.create_employee(draft("L-001")).expect("create").id;
    let custom = service
        .add_document_type("Carnet Manipulador")
        .expect("type added");
    assert!(!custom.mandatory);
    assert_eq!(custom.alert_days, 30);

    service
        .configure_document_type(
            custom.id,
            DocumentTypeChanges {
                mandatory: Some(true),
                ..DocumentTypeChanges::default()
            },
        )
        .expect("type configured");
    service
        .upload_document(upload(id, custom.id, None))
        .expect("upload");

    service
        .remove_document_type(custom.id)
        .expect("type removed");
    assert_eq!(service.documents().documents().len(), 1);

    let profile = service.profile(id).expect("profile");
    assert_eq!(profile.orphaned_documents.len(), 1);
    assert_eq!(
        profile.orphaned_documents[0].document_type,
        UNKNOWN_DOCUMENT_TYPE_LABEL
    );
    assert!(profile
        .checklist
        .entries
        .iter()
        .all(|entry| entry.document_type_id != custom.id));
}

#[test]
fn blank_type_name_is_rejected() {
    let (mut service, _store) = build_service();
    assert!(matches!(
        service.add_document_type("   "),
        Err(PersonnelServiceError::Catalog(_))
    ));
    assert_eq!(service.catalog().types().len(), 6);
}

#[test]
fn roster_filters_by_semaphore() {
    let (mut service, _store) = build_service();
    let complete = service.create_employee(draft("L-001")).expect("create").id;
    service.create_employee(draft("L-002")).expect("create");
    for document_type in service.catalog().clone().mandatory() {
        let expires_on = document_type
            .requires_expiration
            .then(|| date(2026, 6, 30));
        service
            .upload_document(upload(complete, document_type.id, expires_on))
            .expect("upload");
    }

    let green = service.roster(&RosterQuery::default(), Some(Semaphore::Complete));
    assert_eq!(green.len(), 1);
    assert_eq!(green[0].employee.id, complete);
    assert_eq!(green[0].semaphore_label, "Completo");

    let red = service.roster(&RosterQuery::default(), Some(Semaphore::Critical));
    assert_eq!(red.len(), 1);
    assert_eq!(red[0].employee.legajo, "L-002");

    assert_eq!(service.roster(&RosterQuery::default(), None).len(), 2);
}

#[test]
fn reload_restores_collections_in_order() {
    let (mut service, store) = build_service();
    service.create_employee(draft("L-001")).expect("create");
    service.create_employee(draft("L-002")).expect("create");
    service.add_document_type("Libreta Sanitaria").expect("add");

    let reloaded = PersonnelService::load(store, clock()).expect("reload");
    assert_eq!(reloaded.registry(), service.registry());
    assert_eq!(reloaded.catalog(), service.catalog());
    assert_eq!(reloaded.audit_log(), service.audit_log());
}

#[test]
fn failed_save_leaves_state_untouched() {
    let store = Arc::new(UnavailableStore);
    let mut service = PersonnelService::load(store, clock()).expect("load succeeds");

    match service.create_employee(draft("L-001")) {
        Err(PersonnelServiceError::Storage(StorageError::Unavailable(_))) => {}
        other => panic!("expected storage failure, got {other:?}"),
    }
    assert!(service.registry().employees().is_empty());
    assert!(service.audit_log().is_empty());

    assert!(service.add_document_type("Libreta").is_err());
    assert_eq!(service.catalog().types().len(), 6);
}

#[test]
fn audit_save_failure_rolls_back_the_written_collection() {
    let store = Arc::new(AuditRejectingStore::default());
    let mut service = PersonnelService::load(store.clone(), clock()).expect("load succeeds");
    let kept = service.create_employee(draft("L-001")).expect("create");
    let document_type = DocumentTypeId(1);
    service
        .upload_document(upload(kept.id, document_type, None))
        .expect("upload");

    store
        .reject_audit
        .store(true, std::sync::atomic::Ordering::SeqCst);
    assert!(service.create_employee(draft("L-002")).is_err());
    assert!(service
        .upload_document(upload(kept.id, DocumentTypeId(2), None))
        .is_err());
    let existing = service.documents().documents()[0].id;
    assert!(service.delete_document(existing).is_err());

    let reloaded = PersonnelService::load(store.clone(), clock()).expect("reload");
    let legajos: Vec<&str> = reloaded
        .registry()
        .employees()
        .iter()
        .map(|employee| employee.legajo.as_str())
        .collect();
    assert_eq!(legajos, vec!["L-001"]);
    assert_eq!(reloaded.documents().documents().len(), 1);
    assert_eq!(reloaded.audit_log().len(), 2);
    assert_eq!(service.registry().employees().len(), 1);
}

#[test]
fn corrupt_collection_fails_to_load() {
    let (_service, store) = build_service();
    store
        .save(CollectionKey::Employees, "[{\"id\": ")
        .expect("raw save");

    match PersonnelService::load(store, clock()) {
        Err(StorageError::Corrupt { key, .. }) => assert_eq!(key, CollectionKey::Employees),
        Err(other) => panic!("expected corrupt collection, got {other:?}"),
        Ok(_) => panic!("expected corrupt collection"),
    }
}
