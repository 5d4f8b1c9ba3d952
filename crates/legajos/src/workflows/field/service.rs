use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::domain::{
    default_services, default_supervisors, ServiceId, ServiceSite, Supervisor, SupervisorId,
    Visit,
};
use super::visits::{VisitError, VisitLog};
use crate::clock::Clock;
use crate::storage::{load_collection, save_collection, CollectionKey, KeyValueStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum FieldServiceError {
    #[error(transparent)]
    Visit(#[from] VisitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("supervisor {0} not found")]
    UnknownSupervisor(SupervisorId),
    #[error("service {0} not found")]
    UnknownService(ServiceId),
}

/// A service as seen from one supervisor's visit board.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceVisitStatus {
    pub service: ServiceSite,
    pub visited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit: Option<Visit>,
}

/// Supervisor and service catalogs plus the visit log.
pub struct FieldVisitService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    supervisors: Vec<Supervisor>,
    services: Vec<ServiceSite>,
    visits: VisitLog,
}

impl<S> FieldVisitService<S>
where
    S: KeyValueStore + 'static,
{
    pub fn load(store: Arc<S>, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        let supervisors =
            load_collection(store.as_ref(), CollectionKey::Supervisors, default_supervisors)?;
        let services = load_collection(store.as_ref(), CollectionKey::Services, default_services)?;
        let visits = VisitLog::new(load_collection(
            store.as_ref(),
            CollectionKey::Visits,
            Vec::new,
        )?);

        Ok(Self {
            store,
            clock,
            supervisors,
            services,
            visits,
        })
    }

    pub fn supervisors(&self) -> &[Supervisor] {
        &self.supervisors
    }

    pub fn services(&self) -> &[ServiceSite] {
        &self.services
    }

    pub fn visit_log(&self) -> &VisitLog {
        &self.visits
    }

    pub fn supervisor(&self, id: SupervisorId) -> Option<&Supervisor> {
        self.supervisors.iter().find(|supervisor| supervisor.id == id)
    }

    pub fn service(&self, id: ServiceId) -> Option<&ServiceSite> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn service_name(&self, id: ServiceId) -> Option<&str> {
        self.service(id).map(|service| service.name.as_str())
    }

    /// Case-insensitive substring match on the service name. A blank term lists everything.
    pub fn search_services(&self, term: &str) -> Vec<&ServiceSite> {
        let term = term.trim().to_lowercase();
        self.services
            .iter()
            .filter(|service| term.is_empty() || service.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Services matching `term` with the supervisor's first recorded visit to each.
    pub fn supervisor_board(
        &self,
        supervisor_id: SupervisorId,
        term: &str,
    ) -> Result<Vec<ServiceVisitStatus>, FieldServiceError> {
        if self.supervisor(supervisor_id).is_none() {
            return Err(FieldServiceError::UnknownSupervisor(supervisor_id));
        }

        Ok(self
            .search_services(term)
            .into_iter()
            .map(|service| {
                let visit = self.visits.find_visit(service.id, supervisor_id).cloned();
                ServiceVisitStatus {
                    service: service.clone(),
                    visited: visit.is_some(),
                    visit,
                }
            })
            .collect())
    }

    pub fn record_visit(
        &mut self,
        service_id: ServiceId,
        supervisor_id: SupervisorId,
        supplies: &str,
    ) -> Result<Visit, FieldServiceError> {
        if self.supervisor(supervisor_id).is_none() {
            return Err(FieldServiceError::UnknownSupervisor(supervisor_id));
        }
        if self.service(service_id).is_none() {
            return Err(FieldServiceError::UnknownService(service_id));
        }

        let mut visits = self.visits.clone();
        let visit = visits
            .record(service_id, supervisor_id, supplies, self.clock.now())?
            .clone();
        save_collection(self.store.as_ref(), CollectionKey::Visits, visits.visits())?;
        self.visits = visits;

        info!(%service_id, %supervisor_id, "visit recorded");
        Ok(visit)
    }
}
