use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

use super::domain::{
    probation_end, Employee, EmployeeDraft, EmployeeId, EmployeeImportRow, EmployeeStatus,
};
use crate::clock::next_timestamp_id;

const IMPORT_PLACEHOLDER_NAME: &str = "N/A";

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("employee {0} not found")]
    NotFound(EmployeeId),
    #[error("employee {0} is already terminated")]
    AlreadyTerminated(EmployeeId),
    #[error("employee {0} is terminated and can no longer be edited")]
    Terminated(EmployeeId),
    #[error("a termination reason is required")]
    MissingTerminationReason,
}

/// Result of a spreadsheet import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub inserted: Vec<EmployeeId>,
    /// Legajos that already existed (or repeated within the batch) and were dropped.
    pub skipped: Vec<String>,
}

impl ImportOutcome {
    pub fn inserted_count(&self) -> usize {
        self.inserted.len()
    }
}

/// Employee files. Records are never physically removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeRegistry {
    employees: Vec<Employee>,
}

impl EmployeeRegistry {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn active(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|employee| employee.is_active())
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn find_by_legajo(&self, legajo: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|employee| employee.legajo == legajo)
    }

    fn next_id(&self, now: DateTime<Utc>) -> EmployeeId {
        let current_max = self.employees.iter().map(|employee| employee.id.0).max();
        EmployeeId(next_timestamp_id(now, current_max))
    }

    pub fn create(&mut self, draft: EmployeeDraft, now: DateTime<Utc>) -> &Employee {
        let id = self.next_id(now);
        self.employees.push(Employee {
            id,
            legajo: draft.legajo,
            first_name: draft.first_name,
            last_name: draft.last_name,
            dni: draft.dni,
            cuil: draft.cuil,
            probation_end: probation_end(draft.hire_date),
            hire_date: draft.hire_date,
            service_id: draft.service_id,
            supervisor_id: draft.supervisor_id,
            status: EmployeeStatus::Active,
            termination_date: None,
            termination_reason: None,
        });

        &self.employees[self.employees.len() - 1]
    }

    /// Replace the editable fields and recompute the probation end. Status and
    /// termination data are carried over.
    pub fn update(&mut self, id: EmployeeId, draft: EmployeeDraft) -> Result<&Employee, RegistryError> {
        let employee = self.get_mut(id)?;
        if employee.is_terminated() {
            return Err(RegistryError::Terminated(id));
        }

        employee.legajo = draft.legajo;
        employee.first_name = draft.first_name;
        employee.last_name = draft.last_name;
        employee.dni = draft.dni;
        employee.cuil = draft.cuil;
        employee.hire_date = draft.hire_date;
        employee.probation_end = probation_end(draft.hire_date);
        employee.service_id = draft.service_id;
        employee.supervisor_id = draft.supervisor_id;

        Ok(&*employee)
    }

    pub fn terminate(
        &mut self,
        id: EmployeeId,
        reason: &str,
        today: NaiveDate,
    ) -> Result<&Employee, RegistryError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(RegistryError::MissingTerminationReason);
        }

        let employee = self.get_mut(id)?;
        if employee.is_terminated() {
            return Err(RegistryError::AlreadyTerminated(id));
        }

        employee.status = EmployeeStatus::Terminated;
        employee.termination_date = Some(today);
        employee.termination_reason = Some(reason.to_string());

        Ok(&*employee)
    }

    /// Insert rows whose legajo is new. Existing legajos win; so does the first
    /// row when a legajo repeats inside the batch. Missing fields are defaulted.
    pub fn bulk_import(
        &mut self,
        rows: Vec<EmployeeImportRow>,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> ImportOutcome {
        let mut known: HashSet<String> = self
            .employees
            .iter()
            .map(|employee| employee.legajo.clone())
            .collect();
        let mut outcome = ImportOutcome::default();
        let batch_stamp = now.timestamp_millis();

        for (index, row) in rows.into_iter().enumerate() {
            let legajo = non_empty(row.legajo)
                .unwrap_or_else(|| format!("IMP-{batch_stamp}-{index}"));
            if !known.insert(legajo.clone()) {
                outcome.skipped.push(legajo);
                continue;
            }

            let hire_date = row.hire_date.unwrap_or(today);
            let id = self.next_id(now);
            self.employees.push(Employee {
                id,
                legajo,
                first_name: non_empty(row.first_name)
                    .unwrap_or_else(|| IMPORT_PLACEHOLDER_NAME.to_string()),
                last_name: non_empty(row.last_name)
                    .unwrap_or_else(|| IMPORT_PLACEHOLDER_NAME.to_string()),
                dni: row.dni.unwrap_or_default().trim().to_string(),
                cuil: row.cuil.unwrap_or_default().trim().to_string(),
                hire_date,
                probation_end: probation_end(hire_date),
                service_id: row.service_id,
                supervisor_id: row.supervisor_id,
                status: EmployeeStatus::Active,
                termination_date: None,
                termination_reason: None,
            });
            outcome.inserted.push(id);
        }

        outcome
    }

    pub fn into_employees(self) -> Vec<Employee> {
        self.employees
    }

    fn get_mut(&mut self, id: EmployeeId) -> Result<&mut Employee, RegistryError> {
        self.employees
            .iter_mut()
            .find(|employee| employee.id == id)
            .ok_or(RegistryError::NotFound(id))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Roster narrowing by free text and employee status. Semáforo filtering needs
/// document data and lives in the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterQuery {
    pub search: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl RosterQuery {
    pub fn matches(&self, employee: &Employee) -> bool {
        let status_matches = self.status.map_or(true, |status| employee.status == status);
        status_matches && self.matches_search(employee)
    }

    /// Case-insensitive substring match over nombre, apellido, DNI, legajo and CUIL.
    fn matches_search(&self, employee: &Employee) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if term.is_empty() {
            return true;
        }

        let haystack = format!(
            "{}{}{}{}{}",
            employee.first_name, employee.last_name, employee.dni, employee.legajo, employee.cuil
        )
        .to_lowercase();
        haystack.contains(&term.to_lowercase())
    }
}
