//! Supervisors, client services, and the site visits supervisors record.

pub mod domain;
pub mod service;
pub mod visits;

pub use domain::{ServiceId, ServiceSite, Supervisor, SupervisorId, Visit};
pub use service::{FieldServiceError, FieldVisitService, ServiceVisitStatus};
pub use visits::{VisitError, VisitLog};
