use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::workflows::field::domain::{
    optional_service_id, optional_supervisor_id, ServiceId, SupervisorId,
};

/// Length of the statutory probation period counted from the hire date.
pub const PROBATION_MONTHS: u32 = 6;

macro_rules! record_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(EmployeeId);
record_id!(DocumentId);
record_id!(DocumentTypeId);
record_id!(AuditEntryId);

/// Employment state. `Baja` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[serde(rename = "Activo")]
    Active,
    #[serde(rename = "Baja")]
    Terminated,
    #[serde(rename = "Pendiente")]
    Pending,
}

impl EmployeeStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Active, Self::Terminated, Self::Pending]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Activo",
            Self::Terminated => "Baja",
            Self::Pending => "Pendiente",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "activo" | "active" => Ok(Self::Active),
            "baja" | "terminated" => Ok(Self::Terminated),
            "pendiente" | "pending" => Ok(Self::Pending),
            other => Err(format!(
                "unknown employee status '{other}' (expected Activo, Baja or Pendiente)"
            )),
        }
    }
}

/// An employee file ("legajo").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub legajo: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub dni: String,
    pub cuil: String,
    #[serde(rename = "fecha_ingreso")]
    pub hire_date: NaiveDate,
    /// Stored at write time; see [`probation_end`].
    #[serde(rename = "fecha_fin_prueba")]
    pub probation_end: NaiveDate,
    #[serde(rename = "servicio_id", default, with = "optional_service_id")]
    pub service_id: Option<ServiceId>,
    #[serde(rename = "supervisor_id", default, with = "optional_supervisor_id")]
    pub supervisor_id: Option<SupervisorId>,
    #[serde(rename = "estado_empleado")]
    pub status: EmployeeStatus,
    #[serde(rename = "fecha_baja", default)]
    pub termination_date: Option<NaiveDate>,
    #[serde(rename = "motivo_baja", default)]
    pub termination_reason: Option<String>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    pub fn is_terminated(&self) -> bool {
        self.status == EmployeeStatus::Terminated
    }
}

/// Editable fields of an employee, as captured by the entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub legajo: String,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub cuil: String,
    pub hire_date: NaiveDate,
    pub service_id: Option<ServiceId>,
    pub supervisor_id: Option<SupervisorId>,
}

/// One spreadsheet row after header normalization. Every column is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeImportRow {
    pub legajo: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dni: Option<String>,
    pub cuil: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub service_id: Option<ServiceId>,
    pub supervisor_id: Option<SupervisorId>,
}

/// Configured kind of document employees must (or may) hand in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    pub id: DocumentTypeId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "requiere_vencimiento")]
    pub requires_expiration: bool,
    #[serde(rename = "dias_alerta")]
    pub alert_days: u32,
    #[serde(rename = "obligatorio")]
    pub mandatory: bool,
}

/// An uploaded document with its content inlined as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDocument {
    pub id: DocumentId,
    #[serde(rename = "empleado_id")]
    pub employee_id: EmployeeId,
    #[serde(rename = "documento_tipo_id")]
    pub document_type_id: DocumentTypeId,
    #[serde(rename = "archivo_url")]
    pub content_url: String,
    #[serde(rename = "archivo_nombre")]
    pub file_name: String,
    #[serde(rename = "fecha_carga")]
    pub uploaded_on: NaiveDate,
    #[serde(rename = "fecha_vencimiento", default)]
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "CREAR")]
    Create,
    #[serde(rename = "EDITAR")]
    Update,
    /// Also used for terminations, which are soft status changes.
    #[serde(rename = "BORRAR")]
    Delete,
    #[serde(rename = "IMPORTAR")]
    Import,
}

impl AuditAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "CREAR",
            Self::Update => "EDITAR",
            Self::Delete => "BORRAR",
            Self::Import => "IMPORTAR",
        }
    }
}

/// Kind of record an audit entry refers to. Tags this build does not write are
/// kept verbatim so they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuditEntity {
    Employee,
    Document,
    Other(String),
}

impl AuditEntity {
    pub fn label(&self) -> &str {
        match self {
            Self::Employee => "Empleado",
            Self::Document => "Documento",
            Self::Other(tag) => tag,
        }
    }
}

impl Serialize for AuditEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for AuditEntity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "Empleado" => Self::Employee,
            "Documento" => Self::Document,
            _ => Self::Other(tag),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "accion")]
    pub action: AuditAction,
    #[serde(rename = "entidad")]
    pub entity: AuditEntity,
    /// Employee id for both employee and document entries, so profile history picks both up.
    #[serde(rename = "entidad_id", default)]
    pub entity_id: Option<u64>,
    #[serde(rename = "detalle")]
    pub detail: String,
}

/// `hire_date` plus six calendar months. A day past the end of the target month
/// rolls over into the next one (2024-08-31 ends on 2025-03-03).
pub fn probation_end(hire_date: NaiveDate) -> NaiveDate {
    let months = hire_date.month0() + PROBATION_MONTHS;
    let year = hire_date.year() + (months / 12) as i32;
    let month = months % 12 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(hire_date.day0()))))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn probation_end_keeps_day_of_month() {
        assert_eq!(probation_end(date(2024, 1, 31)), date(2024, 7, 31));
        assert_eq!(probation_end(date(2024, 3, 15)), date(2024, 9, 15));
    }

    #[test]
    fn probation_end_crosses_year_boundary() {
        assert_eq!(probation_end(date(2024, 7, 1)), date(2025, 1, 1));
        assert_eq!(probation_end(date(2024, 12, 10)), date(2025, 6, 10));
    }

    #[test]
    fn probation_end_rolls_short_months_over() {
        assert_eq!(probation_end(date(2024, 8, 31)), date(2025, 3, 3));
        assert_eq!(probation_end(date(2023, 8, 31)), date(2024, 3, 2));
        assert_eq!(probation_end(date(2024, 12, 31)), date(2025, 7, 1));
    }

    #[test]
    fn employee_reads_browser_layout() {
        let json = r#"{
            "id": 1718000000000,
            "legajo": "L-100",
            "nombre": "Rosa",
            "apellido": "Suárez",
            "dni": "30111222",
            "cuil": "27-30111222-4",
            "fecha_ingreso": "2024-02-01",
            "fecha_fin_prueba": "2024-08-01",
            "servicio_id": "12",
            "supervisor_id": "",
            "estado_empleado": "Activo"
        }"#;
        let employee: Employee = serde_json::from_str(json).expect("employee parses");
        assert_eq!(employee.id, EmployeeId(1_718_000_000_000));
        assert_eq!(employee.service_id, Some(ServiceId(12)));
        assert_eq!(employee.supervisor_id, None);
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert!(employee.termination_date.is_none());
        assert_eq!(employee.display_name(), "Suárez, Rosa");

        let encoded = serde_json::to_value(&employee).expect("encode");
        assert_eq!(encoded["servicio_id"], 12);
        assert_eq!(encoded["estado_empleado"], "Activo");
        assert_eq!(encoded["fecha_fin_prueba"], "2024-08-01");
    }

    #[test]
    fn audit_entry_uses_spanish_tags() {
        let json = r#"{"id":5,"timestamp":"2025-01-10T13:45:00.000Z","accion":"IMPORTAR","entidad":"Empleado","entidad_id":null,"detalle":"Importados 3 empleados desde Excel"}"#;
        let entry: AuditEntry = serde_json::from_str(json).expect("entry parses");
        assert_eq!(entry.action, AuditAction::Import);
        assert_eq!(entry.entity, AuditEntity::Employee);
        assert!(entry.entity_id.is_none());
    }

    #[test]
    fn unknown_audit_entity_round_trips_verbatim() {
        let json = r#"{"id":6,"timestamp":"2025-01-10T13:45:00.000Z","accion":"EDITAR","entidad":"Servicio","entidad_id":12,"detalle":"Editado servicio"}"#;
        let entry: AuditEntry = serde_json::from_str(json).expect("entry parses");
        assert_eq!(entry.entity, AuditEntity::Other("Servicio".to_string()));
        assert_eq!(entry.entity.label(), "Servicio");

        let encoded = serde_json::to_value(&entry).expect("encode");
        assert_eq!(encoded["entidad"], "Servicio");
        let documento = serde_json::to_value(AuditEntity::Document).expect("encode");
        assert_eq!(documento, "Documento");
    }

    #[test]
    fn status_parses_from_cli_input() {
        assert_eq!("activo".parse::<EmployeeStatus>(), Ok(EmployeeStatus::Active));
        assert_eq!("Baja".parse::<EmployeeStatus>(), Ok(EmployeeStatus::Terminated));
        assert!("retired".parse::<EmployeeStatus>().is_err());
    }
}
