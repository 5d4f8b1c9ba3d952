use chrono::NaiveDate;
use serde::Serialize;

use super::compliance::{DocumentStatus, Semaphore};
use super::domain::{AuditEntry, DocumentId, DocumentTypeId, Employee};

/// Label shown for documents whose type was removed from the catalog.
pub const UNKNOWN_DOCUMENT_TYPE_LABEL: &str = "Tipo desconocido";

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub employee: Employee,
    pub semaphore: Semaphore,
    pub semaphore_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistEntry {
    pub document_type_id: DocumentTypeId,
    pub document_type: String,
    pub mandatory: bool,
    pub status: DocumentStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
}

/// One row per catalog type, plus counts across all types (mandatory or not).
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentChecklist {
    pub entries: Vec<ChecklistEntry>,
    pub missing: usize,
    pub expired: usize,
    pub expiring_soon: usize,
}

/// Documents on file whose type no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct OrphanedDocumentView {
    pub document_id: DocumentId,
    pub document_type_id: DocumentTypeId,
    pub document_type: &'static str,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeProfile {
    pub employee: Employee,
    pub semaphore: Semaphore,
    pub semaphore_label: &'static str,
    pub checklist: DocumentChecklist,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned_documents: Vec<OrphanedDocumentView>,
    pub history: Vec<AuditEntry>,
}
