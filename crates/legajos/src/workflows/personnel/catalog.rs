use chrono::{DateTime, Utc};

use super::domain::{DocumentType, DocumentTypeId};
use crate::clock::next_timestamp_id;

pub const DEFAULT_ALERT_DAYS: u32 = 30;

/// Configured document kinds. Removing a type never touches uploaded documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTypeCatalog {
    types: Vec<DocumentType>,
}

/// Partial update applied by the admin screen. `None` leaves a setting untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentTypeChanges {
    pub mandatory: Option<bool>,
    pub requires_expiration: Option<bool>,
    pub alert_days: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("document type name must not be empty")]
    EmptyName,
    #[error("document type {0} not found")]
    NotFound(DocumentTypeId),
}

impl DocumentTypeCatalog {
    pub fn new(types: Vec<DocumentType>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &[DocumentType] {
        &self.types
    }

    pub fn get(&self, id: DocumentTypeId) -> Option<&DocumentType> {
        self.types.iter().find(|document_type| document_type.id == id)
    }

    pub fn contains(&self, id: DocumentTypeId) -> bool {
        self.get(id).is_some()
    }

    pub fn mandatory(&self) -> impl Iterator<Item = &DocumentType> {
        self.types.iter().filter(|document_type| document_type.mandatory)
    }

    /// New types start optional, without expiration, and with a 30-day alert window.
    pub fn add(&mut self, name: &str, now: DateTime<Utc>) -> Result<&DocumentType, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let current_max = self.types.iter().map(|document_type| document_type.id.0).max();
        let id = DocumentTypeId(next_timestamp_id(now, current_max));
        self.types.push(DocumentType {
            id,
            name: name.to_string(),
            requires_expiration: false,
            alert_days: DEFAULT_ALERT_DAYS,
            mandatory: false,
        });

        Ok(&self.types[self.types.len() - 1])
    }

    pub fn configure(
        &mut self,
        id: DocumentTypeId,
        changes: DocumentTypeChanges,
    ) -> Result<&DocumentType, CatalogError> {
        let document_type = self
            .types
            .iter_mut()
            .find(|document_type| document_type.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        if let Some(mandatory) = changes.mandatory {
            document_type.mandatory = mandatory;
        }
        if let Some(requires_expiration) = changes.requires_expiration {
            document_type.requires_expiration = requires_expiration;
        }
        if let Some(alert_days) = changes.alert_days {
            document_type.alert_days = alert_days;
        }

        Ok(&*document_type)
    }

    pub fn remove(&mut self, id: DocumentTypeId) -> Result<DocumentType, CatalogError> {
        let position = self
            .types
            .iter()
            .position(|document_type| document_type.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        Ok(self.types.remove(position))
    }

    pub fn into_types(self) -> Vec<DocumentType> {
        self.types
    }
}

pub fn default_document_types() -> Vec<DocumentType> {
    const DEFAULTS: &[(&str, bool, u32, bool)] = &[
        ("DNI", false, 30, true),
        ("CUIL/CUIT", false, 30, true),
        ("Alta Temprana", false, 30, true),
        ("Apto Médico", true, 30, true),
        ("ART", true, 15, true),
        ("Constancia Domicilio", false, 30, false),
    ];

    DEFAULTS
        .iter()
        .zip(1u64..)
        .map(
            |(&(name, requires_expiration, alert_days, mandatory), id)| DocumentType {
                id: DocumentTypeId(id),
                name: name.to_string(),
                requires_expiration,
                alert_days,
                mandatory,
            },
        )
        .collect()
}
