//! Employee files, their documents, and the compliance view built on top of them.
//!
//! The registry, document store, type catalog and audit log are plain in-memory
//! collections; [`PersonnelService`] ties them to a [`crate::storage::KeyValueStore`]
//! and records every mutation in the audit log.

pub mod audit;
pub mod catalog;
pub mod compliance;
pub mod documents;
pub mod domain;
pub mod registry;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use audit::AuditLog;
pub use catalog::{default_document_types, CatalogError, DocumentTypeCatalog, DocumentTypeChanges};
pub use compliance::{days_until, DocumentStatus, Semaphore};
pub use documents::{encode_data_url, ContentKind, DocumentError, DocumentStore, DocumentUpload};
pub use domain::{
    probation_end, AuditAction, AuditEntity, AuditEntry, AuditEntryId, DocumentId, DocumentType,
    DocumentTypeId, Employee, EmployeeDocument, EmployeeDraft, EmployeeId, EmployeeImportRow,
    EmployeeStatus,
};
pub use registry::{EmployeeRegistry, ImportOutcome, RegistryError, RosterQuery};
pub use service::{PersonnelService, PersonnelServiceError};
pub use views::{
    ChecklistEntry, DocumentChecklist, EmployeeProfile, OrphanedDocumentView, RosterEntry,
    UNKNOWN_DOCUMENT_TYPE_LABEL,
};
