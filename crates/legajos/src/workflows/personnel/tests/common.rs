use chrono::NaiveDate;
use std::sync::Arc;

use crate::clock::FixedClock;
use crate::storage::{CollectionKey, KeyValueStore, MemoryStore, StorageError};
use crate::workflows::field::domain::{ServiceId, SupervisorId};
use crate::workflows::personnel::domain::{
    DocumentId, DocumentType, DocumentTypeId, EmployeeDocument, EmployeeDraft, EmployeeId,
    EmployeeImportRow,
};
use crate::workflows::personnel::documents::DocumentUpload;
use crate::workflows::personnel::PersonnelService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2025, 3, 10)
}

pub(super) fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(today()))
}

pub(super) fn draft(legajo: &str) -> EmployeeDraft {
    EmployeeDraft {
        legajo: legajo.to_string(),
        first_name: "Rosa".to_string(),
        last_name: "Suárez".to_string(),
        dni: "30111222".to_string(),
        cuil: "27-30111222-4".to_string(),
        hire_date: date(2025, 1, 15),
        service_id: Some(ServiceId(3)),
        supervisor_id: Some(SupervisorId(2)),
    }
}

pub(super) fn import_row(legajo: &str, last_name: &str) -> EmployeeImportRow {
    EmployeeImportRow {
        legajo: Some(legajo.to_string()),
        first_name: Some("Importado".to_string()),
        last_name: Some(last_name.to_string()),
        dni: Some("40123456".to_string()),
        cuil: None,
        hire_date: Some(date(2025, 2, 1)),
        service_id: None,
        supervisor_id: None,
    }
}

pub(super) fn document_type(
    id: u64,
    requires_expiration: bool,
    alert_days: u32,
    mandatory: bool,
) -> DocumentType {
    DocumentType {
        id: DocumentTypeId(id),
        name: format!("Tipo {id}"),
        requires_expiration,
        alert_days,
        mandatory,
    }
}

pub(super) fn stored_document(
    id: u64,
    employee_id: EmployeeId,
    document_type_id: DocumentTypeId,
    expires_on: Option<NaiveDate>,
) -> EmployeeDocument {
    EmployeeDocument {
        id: DocumentId(id),
        employee_id,
        document_type_id,
        content_url: "data:application/pdf;base64,JVBERi0=".to_string(),
        file_name: format!("documento-{id}.pdf"),
        uploaded_on: date(2025, 1, 20),
        expires_on,
    }
}

pub(super) fn upload(
    employee_id: EmployeeId,
    document_type_id: DocumentTypeId,
    expires_on: Option<NaiveDate>,
) -> DocumentUpload {
    DocumentUpload {
        employee_id,
        document_type_id,
        file_name: "apto.pdf".to_string(),
        bytes: b"%PDF-1.4".to_vec(),
        expires_on,
    }
}

pub(super) fn build_service() -> (PersonnelService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = PersonnelService::load(store.clone(), clock()).expect("service loads");
    (service, store)
}

/// Reads succeed with nothing stored; every write fails.
pub(super) struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn load(&self, _key: CollectionKey) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&self, _key: CollectionKey, _payload: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }
}

/// Memory-backed store whose audit-log writes fail once `reject_audit` is set.
#[derive(Default)]
pub(super) struct AuditRejectingStore {
    pub(super) inner: MemoryStore,
    pub(super) reject_audit: std::sync::atomic::AtomicBool,
}

impl KeyValueStore for AuditRejectingStore {
    fn load(&self, key: CollectionKey) -> Result<Option<String>, StorageError> {
        self.inner.load(key)
    }

    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), StorageError> {
        if key == CollectionKey::AuditLogs
            && self.reject_audit.load(std::sync::atomic::Ordering::SeqCst)
        {
            return Err(StorageError::Unavailable("audit log locked".to_string()));
        }
        self.inner.save(key, payload)
    }
}
