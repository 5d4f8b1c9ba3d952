//! Back-office core for a cleaning-services company: employee files ("legajos"),
//! mandatory-document compliance, probation-period tracking, supervisor site
//! visits, and spreadsheet import/export.

pub mod clock;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod workflows;
