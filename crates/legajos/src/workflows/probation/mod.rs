//! Probation-period ("período de prueba") tracking and the dashboard numbers
//! derived from the roster.

mod dashboard;
mod report;
pub mod views;


pub use dashboard::{DashboardMetrics, UPCOMING_LIMIT};
pub use report::{
    ProbationReport, ProbationRow, ProbationStatus, REPORT_COLUMNS, REPORT_SHEET_NAME,
    UNKNOWN_SERVICE_LABEL,
};
