use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::views::{ProbationReportSummary, StatusCountEntry};
use crate::workflows::field::domain::ServiceSite;
use crate::workflows::personnel::compliance::days_until;
use crate::workflows::personnel::domain::{Employee, EmployeeId};

/// Sheet name used for the exported workbook.
pub const REPORT_SHEET_NAME: &str = "Vencimientos";

/// Shown when an employee has no service or points at an unknown one.
pub const UNKNOWN_SERVICE_LABEL: &str = "---";

pub const REPORT_COLUMNS: [&str; 10] = [
    "Legajo",
    "Apellido",
    "Nombre",
    "DNI",
    "CUIL",
    "Servicio",
    "Fecha Ingreso",
    "Vencimiento Prueba",
    "Días Restantes",
    "Estado",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbationStatus {
    Expired,
    DueSoon,
    InProgress,
}

impl ProbationStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Expired, Self::DueSoon, Self::InProgress]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Vencido",
            Self::DueSoon => "Próximo a Vencer",
            Self::InProgress => "En Curso",
        }
    }

    pub fn classify(days_remaining: i64, alert_days: u32) -> Self {
        if days_remaining < 0 {
            Self::Expired
        } else if days_remaining <= i64::from(alert_days) {
            Self::DueSoon
        } else {
            Self::InProgress
        }
    }
}

impl fmt::Display for ProbationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbationRow {
    pub employee_id: EmployeeId,
    pub legajo: String,
    pub last_name: String,
    pub first_name: String,
    pub dni: String,
    pub cuil: String,
    pub service: String,
    pub hire_date: NaiveDate,
    pub probation_end: NaiveDate,
    pub days_remaining: i64,
    pub status: ProbationStatus,
    pub status_label: &'static str,
}

impl ProbationRow {
    /// Cell values in [`REPORT_COLUMNS`] order. Dates are ISO formatted.
    pub fn cells(&self) -> [String; 10] {
        [
            self.legajo.clone(),
            self.last_name.clone(),
            self.first_name.clone(),
            self.dni.clone(),
            self.cuil.clone(),
            self.service.clone(),
            self.hire_date.to_string(),
            self.probation_end.to_string(),
            self.days_remaining.to_string(),
            self.status_label.to_string(),
        ]
    }
}

/// Active employees ordered by probation end, soonest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbationReport {
    pub generated_on: NaiveDate,
    pub alert_days: u32,
    pub rows: Vec<ProbationRow>,
}

impl ProbationReport {
    pub fn build<'a, I>(
        employees: I,
        services: &[ServiceSite],
        today: NaiveDate,
        alert_days: u32,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        let mut active: Vec<&Employee> = employees
            .into_iter()
            .filter(|employee| employee.is_active())
            .collect();
        active.sort_by_key(|employee| employee.probation_end);

        let rows = active
            .into_iter()
            .map(|employee| {
                let days_remaining = days_until(employee.probation_end, today);
                let status = ProbationStatus::classify(days_remaining, alert_days);
                let service = employee
                    .service_id
                    .and_then(|id| services.iter().find(|service| service.id == id))
                    .map(|service| service.name.clone())
                    .unwrap_or_else(|| UNKNOWN_SERVICE_LABEL.to_string());

                ProbationRow {
                    employee_id: employee.id,
                    legajo: employee.legajo.clone(),
                    last_name: employee.last_name.clone(),
                    first_name: employee.first_name.clone(),
                    dni: employee.dni.clone(),
                    cuil: employee.cuil.clone(),
                    service,
                    hire_date: employee.hire_date,
                    probation_end: employee.probation_end,
                    days_remaining,
                    status,
                    status_label: status.label(),
                }
            })
            .collect();

        Self {
            generated_on: today,
            alert_days,
            rows,
        }
    }

    /// `Reporte_Prueba_LASIA_<date>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("Reporte_Prueba_LASIA_{}.{extension}", self.generated_on)
    }

    pub fn count(&self, status: ProbationStatus) -> usize {
        self.rows.iter().filter(|row| row.status == status).count()
    }

    pub fn summary(&self) -> ProbationReportSummary {
        let counts = ProbationStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(),
                count: self.count(status),
            })
            .collect();

        ProbationReportSummary {
            generated_on: self.generated_on,
            alert_days: self.alert_days,
            counts,
            rows: self.rows.clone(),
        }
    }
}
