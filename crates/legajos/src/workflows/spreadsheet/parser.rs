use chrono::{DateTime, Days, NaiveDate};

use super::normalizer::{column_for, ImportColumn};
use crate::workflows::field::domain::{ServiceId, SupervisorId};
use crate::workflows::personnel::domain::EmployeeImportRow;

/// A sheet as plain text cells: the header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawSheet {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

/// Map each non-blank data row onto the recognised columns. Unknown columns are ignored.
pub(crate) fn import_rows(sheet: RawSheet) -> Vec<EmployeeImportRow> {
    let columns: Vec<Option<ImportColumn>> =
        sheet.headers.iter().map(|header| column_for(header)).collect();

    sheet
        .rows
        .into_iter()
        .filter(|cells| cells.iter().any(|cell| !cell.trim().is_empty()))
        .map(|cells| {
            let mut row = EmployeeImportRow::default();
            for (column, cell) in columns.iter().zip(cells) {
                let Some(column) = column else {
                    continue;
                };
                let value = cell.trim();
                if value.is_empty() {
                    continue;
                }
                apply(&mut row, *column, value);
            }
            row
        })
        .collect()
}

fn apply(row: &mut EmployeeImportRow, column: ImportColumn, value: &str) {
    // First non-empty value wins when a header appears twice.
    match column {
        ImportColumn::Legajo => fill(&mut row.legajo, value),
        ImportColumn::FirstName => fill(&mut row.first_name, value),
        ImportColumn::LastName => fill(&mut row.last_name, value),
        ImportColumn::Dni => fill(&mut row.dni, value),
        ImportColumn::Cuil => fill(&mut row.cuil, value),
        ImportColumn::HireDate => {
            if row.hire_date.is_none() {
                row.hire_date = parse_date(value);
            }
        }
        ImportColumn::ServiceId => {
            if row.service_id.is_none() {
                row.service_id = parse_key(value).map(ServiceId);
            }
        }
        ImportColumn::SupervisorId => {
            if row.supervisor_id.is_none() {
                row.supervisor_id = parse_key(value).map(SupervisorId);
            }
        }
    }
}

fn fill(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(numeric_text(value));
    }
}

/// Spreadsheets hand integers back as `12345.0`; keep identifiers as typed.
fn numeric_text(value: &str) -> String {
    match value.strip_suffix(".0") {
        Some(integer) if !integer.is_empty() && integer.chars().all(|ch| ch.is_ascii_digit()) => {
            integer.to_string()
        }
        _ => value.to_string(),
    }
}

/// Accepts ISO dates, RFC 3339 timestamps, `DD/MM/YYYY` and Excel serial numbers.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date);
    }

    trimmed.parse::<f64>().ok().and_then(excel_serial_date)
}

/// Excel's day zero is 1899-12-30 (the 1900 leap-year bug included).
fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.trunc() as u64))
}

fn parse_key(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    trimmed.parse::<u64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite() && *number >= 0.0 && number.fract() == 0.0)
            .map(|number| number as u64)
    })
}
