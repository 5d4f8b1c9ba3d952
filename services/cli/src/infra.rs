use chrono::NaiveDate;
use legajos::clock::{Clock, SystemClock};
use legajos::config::AppConfig;
use legajos::error::AppError;
use legajos::storage::JsonDirectoryStore;
use legajos::telemetry;
use legajos::workflows::field::{FieldVisitService, ServiceId, SupervisorId};
use legajos::workflows::personnel::PersonnelService;
use legajos::workflows::probation::UNKNOWN_SERVICE_LABEL;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Configuration plus the two services, opened over the configured data directory.
pub(crate) struct Workspace {
    pub(crate) config: AppConfig,
    pub(crate) personnel: PersonnelService<JsonDirectoryStore>,
    pub(crate) field: FieldVisitService<JsonDirectoryStore>,
    pub(crate) json: bool,
}

impl Workspace {
    pub(crate) fn open(global: GlobalArgs) -> Result<Self, AppError> {
        let mut config = AppConfig::load()?;

        if let Some(data_dir) = global.data_dir {
            config.storage.data_dir = data_dir;
        }
        if let Some(export_dir) = global.export_dir {
            config.reporting.export_dir = export_dir;
        }

        telemetry::init(&config.telemetry, config.environment)?;

        let store = Arc::new(JsonDirectoryStore::new(config.storage.data_dir.clone()));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let personnel = PersonnelService::load(store.clone(), clock.clone())?;
        let field = FieldVisitService::load(store, clock)?;

        debug!(
            ?config.environment,
            data_dir = %config.storage.data_dir.display(),
            "workspace opened"
        );

        Ok(Self {
            config,
            personnel,
            field,
            json: global.json,
        })
    }

    pub(crate) fn service_label(&self, id: Option<ServiceId>) -> String {
        id.and_then(|id| self.field.service_name(id))
            .unwrap_or(UNKNOWN_SERVICE_LABEL)
            .to_string()
    }

    pub(crate) fn supervisor_label(&self, id: Option<SupervisorId>) -> String {
        id.and_then(|id| self.field.supervisor(id))
            .map(|supervisor| supervisor.full_name())
            .unwrap_or_else(|| UNKNOWN_SERVICE_LABEL.to_string())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Printed instead of running a destructive command that lacks `--confirm`.
pub(crate) fn confirmation_notice(action: &str) {
    println!("{action}: nothing changed. Re-run with --confirm to apply.");
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
    println!("{json}");
    Ok(())
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Usage(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
