use chrono::NaiveDate;
use serde::Serialize;

use super::report::{ProbationRow, ProbationStatus};

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: ProbationStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbationReportSummary {
    pub generated_on: NaiveDate,
    pub alert_days: u32,
    pub counts: Vec<StatusCountEntry>,
    pub rows: Vec<ProbationRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingProbationView {
    pub legajo: String,
    pub display_name: String,
    pub probation_end: NaiveDate,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generated_on: NaiveDate,
    pub active_employees: usize,
    pub critical_files: usize,
    pub expiring_probations: usize,
    pub missing_mandatory_documents: usize,
    pub alert_days: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub upcoming: Vec<UpcomingProbationView>,
}
