use chrono::NaiveDate;

use super::views::{DashboardView, UpcomingProbationView};
use crate::storage::KeyValueStore;
use crate::workflows::personnel::compliance::{self, days_until, Semaphore};
use crate::workflows::personnel::domain::Employee;
use crate::workflows::personnel::PersonnelService;

/// Number of upcoming probation ends listed on the dashboard.
pub const UPCOMING_LIMIT: usize = 5;

/// Headline numbers over active employees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub generated_on: NaiveDate,
    pub alert_days: u32,
    pub active_employees: usize,
    /// Active employees whose semáforo is red.
    pub critical_files: usize,
    /// Active employees whose probation ends within `0..=alert_days` days.
    pub expiring_probations: usize,
    /// Mandatory slots with no document on file, summed over active employees.
    pub missing_mandatory_documents: usize,
    /// Probation ends not yet passed, soonest first.
    pub upcoming: Vec<Employee>,
}

impl DashboardMetrics {
    pub fn compute<S>(personnel: &PersonnelService<S>, alert_days: u32) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let today = personnel.today();
        let active: Vec<&Employee> = personnel.registry().active().collect();

        let critical_files = active
            .iter()
            .filter(|employee| personnel.semaphore(employee.id) == Semaphore::Critical)
            .count();

        let expiring_probations = active
            .iter()
            .filter(|employee| {
                let days = days_until(employee.probation_end, today);
                (0..=i64::from(alert_days)).contains(&days)
            })
            .count();

        let missing_mandatory_documents = active
            .iter()
            .map(|employee| {
                compliance::missing_mandatory(personnel.documents(), personnel.catalog(), employee.id)
            })
            .sum();

        let mut upcoming: Vec<Employee> = active
            .iter()
            .filter(|employee| employee.probation_end >= today)
            .map(|employee| (*employee).clone())
            .collect();
        upcoming.sort_by_key(|employee| employee.probation_end);
        upcoming.truncate(UPCOMING_LIMIT);

        Self {
            generated_on: today,
            alert_days,
            active_employees: active.len(),
            critical_files,
            expiring_probations,
            missing_mandatory_documents,
            upcoming,
        }
    }

    pub fn to_view(&self) -> DashboardView {
        DashboardView {
            generated_on: self.generated_on,
            active_employees: self.active_employees,
            critical_files: self.critical_files,
            expiring_probations: self.expiring_probations,
            missing_mandatory_documents: self.missing_mandatory_documents,
            alert_days: self.alert_days,
            upcoming: self
                .upcoming
                .iter()
                .map(|employee| UpcomingProbationView {
                    legajo: employee.legajo.clone(),
                    display_name: employee.display_name(),
                    probation_end: employee.probation_end,
                    days_remaining: days_until(employee.probation_end, self.generated_on),
                })
                .collect(),
        }
    }
}
