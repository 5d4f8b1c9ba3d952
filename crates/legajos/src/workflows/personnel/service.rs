use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use super::audit::AuditLog;
use super::catalog::{default_document_types, CatalogError, DocumentTypeCatalog, DocumentTypeChanges};
use super::compliance::{self, DocumentStatus, Semaphore};
use super::documents::{DocumentError, DocumentStore, DocumentUpload};
use super::domain::{
    AuditAction, AuditEntity, AuditEntry, DocumentId, DocumentType, DocumentTypeId, Employee,
    EmployeeDocument, EmployeeDraft, EmployeeId, EmployeeImportRow,
};
use super::registry::{EmployeeRegistry, ImportOutcome, RegistryError, RosterQuery};
use super::views::{
    ChecklistEntry, DocumentChecklist, EmployeeProfile, OrphanedDocumentView, RosterEntry,
    UNKNOWN_DOCUMENT_TYPE_LABEL,
};
use crate::clock::Clock;
use crate::storage::{load_collection, save_collection, CollectionKey, KeyValueStore, StorageError};

/// Error raised by the personnel service.
#[derive(Debug, thiserror::Error)]
pub enum PersonnelServiceError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),
    #[error("document type {0} not found")]
    UnknownDocumentType(DocumentTypeId),
}

/// Employee roster, document store, document-type catalog and audit log, kept
/// in sync with a [`KeyValueStore`].
///
/// Every mutation runs against copies of the affected collections, persists
/// them, and only then replaces the in-memory state, so a failed save leaves
/// the service unchanged. Registry and document mutations also append to the
/// audit log.
pub struct PersonnelService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    registry: EmployeeRegistry,
    documents: DocumentStore,
    catalog: DocumentTypeCatalog,
    audit: AuditLog,
}

impl<S> PersonnelService<S>
where
    S: KeyValueStore + 'static,
{
    pub fn load(store: Arc<S>, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        let registry = EmployeeRegistry::new(load_collection(
            store.as_ref(),
            CollectionKey::Employees,
            Vec::new,
        )?);
        let catalog = DocumentTypeCatalog::new(load_collection(
            store.as_ref(),
            CollectionKey::DocumentTypes,
            default_document_types,
        )?);
        let documents = DocumentStore::new(load_collection(
            store.as_ref(),
            CollectionKey::EmployeeDocuments,
            Vec::new,
        )?);
        let audit = AuditLog::new(load_collection(
            store.as_ref(),
            CollectionKey::AuditLogs,
            Vec::new,
        )?);

        for (employee_id, document_type_id) in documents.duplicate_pairs() {
            warn!(
                %employee_id,
                %document_type_id,
                "several documents stored for one slot; only the first is considered"
            );
        }
        let orphaned = documents.orphaned(&catalog).count();
        if orphaned > 0 {
            warn!(orphaned, "documents reference removed document types");
        }

        Ok(Self {
            store,
            clock,
            registry,
            documents,
            catalog,
            audit,
        })
    }

    pub fn registry(&self) -> &EmployeeRegistry {
        &self.registry
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn catalog(&self) -> &DocumentTypeCatalog {
        &self.catalog
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn employee(&self, id: EmployeeId) -> Result<&Employee, PersonnelServiceError> {
        self.registry
            .get(id)
            .ok_or(PersonnelServiceError::EmployeeNotFound(id))
    }

    pub fn create_employee(&mut self, draft: EmployeeDraft) -> Result<Employee, PersonnelServiceError> {
        let now = self.clock.now();
        let mut registry = self.registry.clone();
        let employee = registry.create(draft, now).clone();

        let mut audit = self.audit.clone();
        audit.record(
            AuditAction::Create,
            AuditEntity::Employee,
            Some(employee.id.0),
            format!("Creado legajo: {}", employee.legajo),
            now,
        );

        self.commit_employees(registry, audit)?;
        info!(employee_id = %employee.id, legajo = %employee.legajo, "employee created");
        Ok(employee)
    }

    pub fn update_employee(
        &mut self,
        id: EmployeeId,
        draft: EmployeeDraft,
    ) -> Result<Employee, PersonnelServiceError> {
        let now = self.clock.now();
        let mut registry = self.registry.clone();
        let employee = registry.update(id, draft)?.clone();

        let mut audit = self.audit.clone();
        audit.record(
            AuditAction::Update,
            AuditEntity::Employee,
            Some(employee.id.0),
            format!("Editado legajo: {}", employee.legajo),
            now,
        );

        self.commit_employees(registry, audit)?;
        info!(employee_id = %employee.id, legajo = %employee.legajo, "employee updated");
        Ok(employee)
    }

    /// Soft termination (status becomes Baja). Audited as `BORRAR`.
    pub fn terminate_employee(
        &mut self,
        id: EmployeeId,
        reason: &str,
    ) -> Result<Employee, PersonnelServiceError> {
        let now = self.clock.now();
        let today = self.clock.today();
        let mut registry = self.registry.clone();
        let employee = registry.terminate(id, reason, today)?.clone();

        let mut audit = self.audit.clone();
        audit.record(
            AuditAction::Delete,
            AuditEntity::Employee,
            Some(employee.id.0),
            format!(
                "Baja de legajo. Motivo: {}",
                employee.termination_reason.as_deref().unwrap_or_default()
            ),
            now,
        );

        self.commit_employees(registry, audit)?;
        info!(employee_id = %employee.id, legajo = %employee.legajo, "employee terminated");
        Ok(employee)
    }

    /// Bulk insert from spreadsheet rows, recorded as a single `IMPORTAR` entry.
    pub fn import_employees(
        &mut self,
        rows: Vec<EmployeeImportRow>,
    ) -> Result<ImportOutcome, PersonnelServiceError> {
        let now = self.clock.now();
        let today = self.clock.today();
        let total = rows.len();
        let mut registry = self.registry.clone();
        let outcome = registry.bulk_import(rows, today, now);

        let mut audit = self.audit.clone();
        audit.record(
            AuditAction::Import,
            AuditEntity::Employee,
            None,
            format!(
                "Importados {} empleados desde Excel",
                outcome.inserted_count()
            ),
            now,
        );

        self.commit_employees(registry, audit)?;
        info!(
            rows = total,
            inserted = outcome.inserted_count(),
            skipped = outcome.skipped.len(),
            "employee import applied"
        );
        Ok(outcome)
    }

    pub fn upload_document(
        &mut self,
        upload: DocumentUpload,
    ) -> Result<EmployeeDocument, PersonnelServiceError> {
        let employee_id = upload.employee_id;
        self.employee(employee_id)?;
        let document_type = self.document_type(upload.document_type_id)?.clone();

        let now = self.clock.now();
        let today = self.clock.today();
        let mut documents = self.documents.clone();
        let document = documents
            .upload(upload, &document_type, today, now)?
            .clone();

        let mut audit = self.audit.clone();
        audit.record(
            AuditAction::Create,
            AuditEntity::Document,
            Some(employee_id.0),
            format!(
                "Cargado documento: {} ({})",
                document_type.name, document.file_name
            ),
            now,
        );

        self.commit_documents(documents, audit)?;
        info!(
            document_id = %document.id,
            %employee_id,
            document_type = %document_type.name,
            "document uploaded"
        );
        Ok(document)
    }

    /// Hard delete of an uploaded document.
    pub fn delete_document(&mut self, id: DocumentId) -> Result<EmployeeDocument, PersonnelServiceError> {
        let now = self.clock.now();
        let mut documents = self.documents.clone();
        let document = documents.delete(id)?;
        let type_label = self
            .catalog
            .get(document.document_type_id)
            .map(|document_type| document_type.name.as_str())
            .unwrap_or(UNKNOWN_DOCUMENT_TYPE_LABEL);

        let mut audit = self.audit.clone();
        audit.record(
            AuditAction::Delete,
            AuditEntity::Document,
            Some(document.employee_id.0),
            format!("Eliminado documento: {} ({})", type_label, document.file_name),
            now,
        );

        self.commit_documents(documents, audit)?;
        info!(document_id = %document.id, employee_id = %document.employee_id, "document deleted");
        Ok(document)
    }

    pub fn document_type(&self, id: DocumentTypeId) -> Result<&DocumentType, PersonnelServiceError> {
        self.catalog
            .get(id)
            .ok_or(PersonnelServiceError::UnknownDocumentType(id))
    }

    pub fn add_document_type(&mut self, name: &str) -> Result<DocumentType, PersonnelServiceError> {
        let now = self.clock.now();
        let mut catalog = self.catalog.clone();
        let document_type = catalog.add(name, now)?.clone();
        self.commit_catalog(catalog)?;
        info!(document_type_id = %document_type.id, name = %document_type.name, "document type added");
        Ok(document_type)
    }

    pub fn configure_document_type(
        &mut self,
        id: DocumentTypeId,
        changes: DocumentTypeChanges,
    ) -> Result<DocumentType, PersonnelServiceError> {
        let mut catalog = self.catalog.clone();
        let document_type = catalog.configure(id, changes)?.clone();
        self.commit_catalog(catalog)?;
        info!(
            document_type_id = %document_type.id,
            mandatory = document_type.mandatory,
            requires_expiration = document_type.requires_expiration,
            alert_days = document_type.alert_days,
            "document type configured"
        );
        Ok(document_type)
    }

    /// Remove a type. Documents already uploaded for it stay on file as orphans.
    pub fn remove_document_type(&mut self, id: DocumentTypeId) -> Result<DocumentType, PersonnelServiceError> {
        let mut catalog = self.catalog.clone();
        let removed = catalog.remove(id)?;
        self.commit_catalog(catalog)?;

        let orphaned = self
            .documents
            .documents()
            .iter()
            .filter(|document| document.document_type_id == id)
            .count();
        info!(document_type_id = %removed.id, orphaned, "document type removed");
        Ok(removed)
    }

    pub fn document_status(
        &self,
        employee_id: EmployeeId,
        document_type: &DocumentType,
    ) -> DocumentStatus {
        compliance::document_status(&self.documents, employee_id, document_type, self.today())
    }

    pub fn semaphore(&self, employee_id: EmployeeId) -> Semaphore {
        compliance::semaphore(&self.documents, &self.catalog, employee_id, self.today())
    }

    pub fn checklist(&self, employee_id: EmployeeId) -> DocumentChecklist {
        let today = self.today();
        let mut checklist = DocumentChecklist::default();

        for document_type in self.catalog.types() {
            let document = self.documents.find_current(employee_id, document_type.id);
            let status = compliance::evaluate(document, document_type, today);
            match status {
                DocumentStatus::Missing => checklist.missing += 1,
                DocumentStatus::Expired => checklist.expired += 1,
                DocumentStatus::ExpiringSoon => checklist.expiring_soon += 1,
                DocumentStatus::Valid => {}
            }

            checklist.entries.push(ChecklistEntry {
                document_type_id: document_type.id,
                document_type: document_type.name.clone(),
                mandatory: document_type.mandatory,
                status,
                status_label: status.label(),
                document_id: document.map(|document| document.id),
                file_name: document.map(|document| document.file_name.clone()),
                expires_on: document.and_then(|document| document.expires_on),
            });
        }

        checklist
    }

    pub fn profile(&self, employee_id: EmployeeId) -> Result<EmployeeProfile, PersonnelServiceError> {
        let employee = self.employee(employee_id)?.clone();
        let semaphore = self.semaphore(employee_id);
        let orphaned_documents = self
            .documents
            .orphaned(&self.catalog)
            .filter(|document| document.employee_id == employee_id)
            .map(|document| OrphanedDocumentView {
                document_id: document.id,
                document_type_id: document.document_type_id,
                document_type: UNKNOWN_DOCUMENT_TYPE_LABEL,
                file_name: document.file_name.clone(),
            })
            .collect();

        Ok(EmployeeProfile {
            semaphore,
            semaphore_label: semaphore.label(),
            checklist: self.checklist(employee_id),
            orphaned_documents,
            history: self
                .audit
                .for_entity(employee_id.0)
                .cloned()
                .collect::<Vec<AuditEntry>>(),
            employee,
        })
    }

    /// Employees matching the query and, when given, the semáforo color.
    pub fn roster(&self, query: &RosterQuery, semaphore: Option<Semaphore>) -> Vec<RosterEntry> {
        self.registry
            .employees()
            .iter()
            .filter(|employee| query.matches(employee))
            .filter_map(|employee| {
                let current = self.semaphore(employee.id);
                if semaphore.map_or(true, |wanted| wanted == current) {
                    Some(RosterEntry {
                        employee: employee.clone(),
                        semaphore: current,
                        semaphore_label: current.label(),
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    fn commit_employees(
        &mut self,
        registry: EmployeeRegistry,
        audit: AuditLog,
    ) -> Result<(), StorageError> {
        save_collection(self.store.as_ref(), CollectionKey::Employees, registry.employees())?;
        if let Err(err) = save_collection(self.store.as_ref(), CollectionKey::AuditLogs, audit.entries()) {
            self.restore(CollectionKey::Employees, self.registry.employees());
            return Err(err);
        }
        self.registry = registry;
        self.audit = audit;
        Ok(())
    }

    fn commit_documents(&mut self, documents: DocumentStore, audit: AuditLog) -> Result<(), StorageError> {
        save_collection(
            self.store.as_ref(),
            CollectionKey::EmployeeDocuments,
            documents.documents(),
        )?;
        if let Err(err) = save_collection(self.store.as_ref(), CollectionKey::AuditLogs, audit.entries()) {
            self.restore(CollectionKey::EmployeeDocuments, self.documents.documents());
            return Err(err);
        }
        self.documents = documents;
        self.audit = audit;
        Ok(())
    }

    /// Put back the collection written before a failed audit save, so the
    /// store never holds a mutation without its audit entry.
    fn restore<T: serde::Serialize>(&self, key: CollectionKey, items: &[T]) {
        if let Err(err) = save_collection(self.store.as_ref(), key, items) {
            warn!(%key, error = %err, "failed to restore collection after audit save error");
        }
    }

    fn commit_catalog(&mut self, catalog: DocumentTypeCatalog) -> Result<(), StorageError> {
        save_collection(self.store.as_ref(), CollectionKey::DocumentTypes, catalog.types())?;
        self.catalog = catalog;
        Ok(())
    }
}
