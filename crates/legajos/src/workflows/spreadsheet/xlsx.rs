use std::path::Path;

use super::parser::RawSheet;
use super::SpreadsheetError;
use crate::workflows::probation::{ProbationReport, REPORT_COLUMNS, REPORT_SHEET_NAME};

/// First worksheet of the workbook; row one is the header.
pub(crate) fn read_first_sheet(path: &Path) -> Result<RawSheet, SpreadsheetError> {
    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|err| SpreadsheetError::Xlsx(err.to_string()))?;
    let sheet = book.get_sheet(&0).ok_or(SpreadsheetError::EmptyWorkbook)?;

    let (max_column, max_row) = sheet.get_highest_column_and_row();
    if max_row == 0 || max_column == 0 {
        return Ok(RawSheet::default());
    }

    let read_row = |row: u32| -> Vec<String> {
        (1..=max_column)
            .map(|column| sheet.get_value((column, row)))
            .collect()
    };

    Ok(RawSheet {
        headers: read_row(1),
        rows: (2..=max_row).map(read_row).collect(),
    })
}

pub(crate) fn write_report(report: &ProbationReport, path: &Path) -> Result<(), SpreadsheetError> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(REPORT_SHEET_NAME)
        .map_err(|err| SpreadsheetError::Xlsx(err.to_string()))?;

    for (column, title) in (1u32..).zip(REPORT_COLUMNS) {
        sheet.get_cell_mut((column, 1)).set_value(title);
    }

    for (row, entry) in (2u32..).zip(&report.rows) {
        for (column, value) in (1u32..).zip(entry.cells()) {
            sheet.get_cell_mut((column, row)).set_value(value);
        }
        // Días Restantes is a number cell.
        sheet
            .get_cell_mut((9, row))
            .set_value_number(entry.days_remaining as f64);
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|err| SpreadsheetError::Xlsx(err.to_string()))
}
