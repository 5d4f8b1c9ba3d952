use chrono::{DateTime, Utc};

use super::domain::{ServiceId, SupervisorId, Visit};

#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    #[error("a visit needs a supplies note")]
    MissingSupplies,
}

/// Supervisor visits in the order they were recorded. Re-visiting a service
/// appends, so history accumulates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitLog {
    visits: Vec<Visit>,
}

impl VisitLog {
    pub fn new(visits: Vec<Visit>) -> Self {
        Self { visits }
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn record(
        &mut self,
        service_id: ServiceId,
        supervisor_id: SupervisorId,
        supplies: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<&Visit, VisitError> {
        let supplies = supplies.trim();
        if supplies.is_empty() {
            return Err(VisitError::MissingSupplies);
        }

        self.visits.push(Visit {
            service_id,
            supervisor_id,
            timestamp,
            supplies: supplies.to_string(),
        });
        Ok(&self.visits[self.visits.len() - 1])
    }

    /// Whether any supervisor has visited the service.
    pub fn is_visited(&self, service_id: ServiceId) -> bool {
        self.visits
            .iter()
            .any(|visit| visit.service_id == service_id)
    }

    /// Oldest visit for the pair.
    pub fn find_visit(&self, service_id: ServiceId, supervisor_id: SupervisorId) -> Option<&Visit> {
        self.for_pair(service_id, supervisor_id).next()
    }

    /// Most recent visit for the pair.
    pub fn latest_visit(
        &self,
        service_id: ServiceId,
        supervisor_id: SupervisorId,
    ) -> Option<&Visit> {
        self.for_pair(service_id, supervisor_id)
            .max_by_key(|visit| visit.timestamp)
    }

    pub fn visits_for(&self, supervisor_id: SupervisorId) -> impl Iterator<Item = &Visit> {
        self.visits
            .iter()
            .filter(move |visit| visit.supervisor_id == supervisor_id)
    }

    pub fn into_visits(self) -> Vec<Visit> {
        self.visits
    }

    fn for_pair(
        &self,
        service_id: ServiceId,
        supervisor_id: SupervisorId,
    ) -> impl Iterator<Item = &Visit> {
        self.visits.iter().filter(move |visit| {
            visit.service_id == service_id && visit.supervisor_id == supervisor_id
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn record_trims_supplies_and_rejects_blank_notes() {
        let mut log = VisitLog::default();
        let visit = log
            .record(ServiceId(3), SupervisorId(1), "  Lavandina x2 ", at(9))
            .expect("visit recorded");
        assert_eq!(visit.supplies, "Lavandina x2");

        assert!(matches!(
            log.record(ServiceId(3), SupervisorId(1), "   ", at(10)),
            Err(VisitError::MissingSupplies)
        ));
        assert_eq!(log.visits().len(), 1);
    }

    #[test]
    fn revisits_append_and_lookups_pick_first_or_latest() {
        let mut log = VisitLog::default();
        log.record(ServiceId(3), SupervisorId(1), "Trapos", at(9))
            .expect("first");
        log.record(ServiceId(3), SupervisorId(2), "Guantes", at(10))
            .expect("other supervisor");
        log.record(ServiceId(3), SupervisorId(1), "Bolsas", at(9) + Duration::days(2))
            .expect("revisit");

        assert_eq!(log.visits().len(), 3);
        assert!(log.is_visited(ServiceId(3)));
        assert!(!log.is_visited(ServiceId(4)));
        assert_eq!(
            log.find_visit(ServiceId(3), SupervisorId(1))
                .map(|visit| visit.supplies.as_str()),
            Some("Trapos")
        );
        assert_eq!(
            log.latest_visit(ServiceId(3), SupervisorId(1))
                .map(|visit| visit.supplies.as_str()),
            Some("Bolsas")
        );
        assert!(log.find_visit(ServiceId(3), SupervisorId(5)).is_none());
        assert_eq!(log.visits_for(SupervisorId(1)).count(), 2);
    }
}
