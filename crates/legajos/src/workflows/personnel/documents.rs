use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

use super::catalog::DocumentTypeCatalog;
use super::domain::{DocumentId, DocumentType, DocumentTypeId, EmployeeDocument, EmployeeId};
use crate::clock::next_timestamp_id;

/// File handed in for an (employee, document type) slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub employee_id: EmployeeId,
    pub document_type_id: DocumentTypeId,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document type {0} requires an expiration date")]
    ExpirationRequired(DocumentTypeId),
    #[error("upload targets document type {found}, expected {expected}")]
    TypeMismatch {
        expected: DocumentTypeId,
        found: DocumentTypeId,
    },
    #[error("employee {employee_id} already has document {existing} for type {document_type_id}; delete it before uploading a replacement")]
    AlreadyUploaded {
        employee_id: EmployeeId,
        document_type_id: DocumentTypeId,
        existing: DocumentId,
    },
    #[error("uploaded file needs a name")]
    MissingFileName,
    #[error("document {0} not found")]
    NotFound(DocumentId),
    #[error("document {0} does not hold base64 data URL content")]
    InvalidContent(DocumentId),
}

/// How stored content should be previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Pdf,
    Image,
    Other,
}

impl ContentKind {
    pub fn of(content_url: &str) -> Self {
        if content_url.starts_with("data:application/pdf") {
            Self::Pdf
        } else if content_url.starts_with("data:image/") {
            Self::Image
        } else {
            Self::Other
        }
    }
}

/// `data:<mime>;base64,<payload>` with the MIME type guessed from the file name.
pub fn encode_data_url(file_name: &str, bytes: &[u8]) -> String {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes))
}

impl EmployeeDocument {
    pub fn content_kind(&self) -> ContentKind {
        ContentKind::of(&self.content_url)
    }

    pub fn decode_content(&self) -> Result<Vec<u8>, DocumentError> {
        let payload = self
            .content_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, payload)| payload)
            .ok_or(DocumentError::InvalidContent(self.id))?;

        STANDARD
            .decode(payload)
            .map_err(|_| DocumentError::InvalidContent(self.id))
    }
}

/// Uploaded documents. At most one current document per (employee, type) is
/// accepted on write; lookups use the first match so legacy duplicates resolve
/// the same way they always have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    documents: Vec<EmployeeDocument>,
}

impl DocumentStore {
    pub fn new(documents: Vec<EmployeeDocument>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[EmployeeDocument] {
        &self.documents
    }

    pub fn get(&self, id: DocumentId) -> Option<&EmployeeDocument> {
        self.documents.iter().find(|document| document.id == id)
    }

    pub fn find_current(
        &self,
        employee_id: EmployeeId,
        document_type_id: DocumentTypeId,
    ) -> Option<&EmployeeDocument> {
        self.documents.iter().find(|document| {
            document.employee_id == employee_id && document.document_type_id == document_type_id
        })
    }

    pub fn for_employee(&self, employee_id: EmployeeId) -> impl Iterator<Item = &EmployeeDocument> {
        self.documents
            .iter()
            .filter(move |document| document.employee_id == employee_id)
    }

    /// Store a new document. The expiration date is kept only for types that expire.
    pub fn upload(
        &mut self,
        upload: DocumentUpload,
        document_type: &DocumentType,
        uploaded_on: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<&EmployeeDocument, DocumentError> {
        if upload.document_type_id != document_type.id {
            return Err(DocumentError::TypeMismatch {
                expected: document_type.id,
                found: upload.document_type_id,
            });
        }

        let file_name = upload.file_name.trim();
        if file_name.is_empty() {
            return Err(DocumentError::MissingFileName);
        }

        let expires_on = if document_type.requires_expiration {
            Some(
                upload
                    .expires_on
                    .ok_or(DocumentError::ExpirationRequired(document_type.id))?,
            )
        } else {
            None
        };

        if let Some(existing) = self.find_current(upload.employee_id, upload.document_type_id) {
            return Err(DocumentError::AlreadyUploaded {
                employee_id: upload.employee_id,
                document_type_id: upload.document_type_id,
                existing: existing.id,
            });
        }

        let current_max = self.documents.iter().map(|document| document.id.0).max();
        self.documents.push(EmployeeDocument {
            id: DocumentId(next_timestamp_id(now, current_max)),
            employee_id: upload.employee_id,
            document_type_id: upload.document_type_id,
            content_url: encode_data_url(file_name, &upload.bytes),
            file_name: file_name.to_string(),
            uploaded_on,
            expires_on,
        });

        Ok(&self.documents[self.documents.len() - 1])
    }

    /// Hard delete.
    pub fn delete(&mut self, id: DocumentId) -> Result<EmployeeDocument, DocumentError> {
        let position = self
            .documents
            .iter()
            .position(|document| document.id == id)
            .ok_or(DocumentError::NotFound(id))?;
        Ok(self.documents.remove(position))
    }

    /// Pairs holding more than one document; only the first is ever consulted.
    pub fn duplicate_pairs(&self) -> Vec<(EmployeeId, DocumentTypeId)> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for document in &self.documents {
            let pair = (document.employee_id, document.document_type_id);
            if !seen.insert(pair) && !duplicates.contains(&pair) {
                duplicates.push(pair);
            }
        }

        duplicates
    }

    /// Documents whose type has been removed from the catalog.
    pub fn orphaned<'a>(
        &'a self,
        catalog: &'a DocumentTypeCatalog,
    ) -> impl Iterator<Item = &'a EmployeeDocument> + 'a {
        self.documents
            .iter()
            .filter(move |document| !catalog.contains(document.document_type_id))
    }

    pub fn into_documents(self) -> Vec<EmployeeDocument> {
        self.documents
    }
}
