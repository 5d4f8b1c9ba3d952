//! Document compliance status per (employee, document type) and the aggregate
//! traffic light ("semáforo") per employee.
//!
//! Nothing here is cached: callers evaluate against the current stores every time.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::catalog::DocumentTypeCatalog;
use super::documents::DocumentStore;
use super::domain::{DocumentType, EmployeeDocument, EmployeeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentStatus {
    #[serde(rename = "Falta")]
    Missing,
    #[serde(rename = "Vigente")]
    Valid,
    #[serde(rename = "Vencido")]
    Expired,
    #[serde(rename = "Por vencer")]
    ExpiringSoon,
}

impl DocumentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "Falta",
            Self::Valid => "Vigente",
            Self::Expired => "Vencido",
            Self::ExpiringSoon => "Por vencer",
        }
    }

    /// Statuses that turn the semáforo red when they hit a mandatory type.
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Missing | Self::Expired)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Semaphore {
    Complete,
    Attention,
    Critical,
}

impl Semaphore {
    pub const fn ordered() -> [Self; 3] {
        [Self::Complete, Self::Attention, Self::Critical]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Complete => "Completo",
            Self::Attention => "Atención",
            Self::Critical => "Crítico",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Complete => "🟢",
            Self::Attention => "🟡",
            Self::Critical => "🔴",
        }
    }
}

impl fmt::Display for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color(), self.label())
    }
}

impl FromStr for Semaphore {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "completo" | "complete" | "verde" | "green" => Ok(Self::Complete),
            "atención" | "atencion" | "attention" | "amarillo" | "yellow" => Ok(Self::Attention),
            "crítico" | "critico" | "critical" | "rojo" | "red" => Ok(Self::Critical),
            other => Err(format!(
                "unknown semáforo '{other}' (expected Completo, Atención or Crítico)"
            )),
        }
    }
}

/// Whole calendar days from `today` until `date` (negative once past).
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Status of one document slot given the current document, if any.
///
/// A type that requires expiration but whose document carries no date is
/// treated as expired.
pub fn evaluate(
    document: Option<&EmployeeDocument>,
    document_type: &DocumentType,
    today: NaiveDate,
) -> DocumentStatus {
    let Some(document) = document else {
        return DocumentStatus::Missing;
    };

    if !document_type.requires_expiration {
        return DocumentStatus::Valid;
    }

    let Some(expires_on) = document.expires_on else {
        return DocumentStatus::Expired;
    };

    let remaining = days_until(expires_on, today);
    if remaining < 0 {
        DocumentStatus::Expired
    } else if remaining <= i64::from(document_type.alert_days) {
        DocumentStatus::ExpiringSoon
    } else {
        DocumentStatus::Valid
    }
}

pub fn document_status(
    documents: &DocumentStore,
    employee_id: EmployeeId,
    document_type: &DocumentType,
    today: NaiveDate,
) -> DocumentStatus {
    evaluate(
        documents.find_current(employee_id, document_type.id),
        document_type,
        today,
    )
}

/// Aggregate over mandatory types only. No mandatory types means `Complete`.
pub fn semaphore(
    documents: &DocumentStore,
    catalog: &DocumentTypeCatalog,
    employee_id: EmployeeId,
    today: NaiveDate,
) -> Semaphore {
    let mut attention = false;

    for document_type in catalog.mandatory() {
        match document_status(documents, employee_id, document_type, today) {
            status if status.is_critical() => return Semaphore::Critical,
            DocumentStatus::ExpiringSoon => attention = true,
            _ => {}
        }
    }

    if attention {
        Semaphore::Attention
    } else {
        Semaphore::Complete
    }
}

/// Number of mandatory types with no document on file for the employee.
pub fn missing_mandatory(
    documents: &DocumentStore,
    catalog: &DocumentTypeCatalog,
    employee_id: EmployeeId,
) -> usize {
    catalog
        .mandatory()
        .filter(|document_type| {
            documents
                .find_current(employee_id, document_type.id)
                .is_none()
        })
        .count()
}
