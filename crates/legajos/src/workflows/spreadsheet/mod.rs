//! Employee import from CSV/XLSX sheets and probation report export.

mod export;
mod normalizer;
mod parser;
mod xlsx;

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::workflows::personnel::domain::EmployeeImportRow;
use parser::RawSheet;

pub use export::ReportExporter;

#[derive(Debug)]
pub enum SpreadsheetError {
    Io(std::io::Error),
    Csv(csv::Error),
    Xlsx(String),
    EmptyWorkbook,
    UnsupportedFormat(String),
}

impl fmt::Display for SpreadsheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadsheetError::Io(err) => write!(f, "failed to access spreadsheet: {}", err),
            SpreadsheetError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            SpreadsheetError::Xlsx(err) => write!(f, "invalid XLSX workbook: {}", err),
            SpreadsheetError::EmptyWorkbook => write!(f, "workbook has no worksheets"),
            SpreadsheetError::UnsupportedFormat(extension) => write!(
                f,
                "unsupported spreadsheet format '{}' (expected .xlsx or .csv)",
                extension
            ),
        }
    }
}

impl std::error::Error for SpreadsheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpreadsheetError::Io(err) => Some(err),
            SpreadsheetError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SpreadsheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SpreadsheetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Output format of the probation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown report format '{other}' (expected xlsx or csv)")),
        }
    }
}

pub struct EmployeeImporter;

impl EmployeeImporter {
    /// Dispatch on the file extension (`.xlsx` or `.csv`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EmployeeImportRow>, SpreadsheetError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let rows = match extension.as_str() {
            "xlsx" => parser::import_rows(xlsx::read_first_sheet(path)?),
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?)?,
            _ => return Err(SpreadsheetError::UnsupportedFormat(extension)),
        };

        debug!(path = %path.display(), rows = rows.len(), "import sheet parsed");
        Ok(rows)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<EmployeeImportRow>, SpreadsheetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        Ok(parser::import_rows(RawSheet { headers, rows }))
    }
}
