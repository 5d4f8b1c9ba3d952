use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{xlsx, ReportFormat, SpreadsheetError};
use crate::workflows::probation::{ProbationReport, REPORT_COLUMNS};

pub struct ReportExporter;

impl ReportExporter {
    /// Write the report into `directory` under its dated file name and return the path.
    pub fn export(
        report: &ProbationReport,
        directory: &Path,
        format: ReportFormat,
    ) -> Result<PathBuf, SpreadsheetError> {
        fs::create_dir_all(directory)?;
        let path = directory.join(report.file_name(format.extension()));

        match format {
            ReportFormat::Xlsx => xlsx::write_report(report, &path)?,
            ReportFormat::Csv => {
                let file = fs::File::create(&path)?;
                Self::write_csv(report, file)?;
            }
        }

        info!(
            path = %path.display(),
            rows = report.rows.len(),
            format = format.extension(),
            "probation report exported"
        );
        Ok(path)
    }

    pub fn write_csv<W: Write>(report: &ProbationReport, writer: W) -> Result<(), SpreadsheetError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(REPORT_COLUMNS)?;
        for row in &report.rows {
            csv_writer.write_record(row.cells())?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
