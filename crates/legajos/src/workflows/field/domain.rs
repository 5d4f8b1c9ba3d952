use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupervisorId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub u64);

impl fmt::Display for SupervisorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supervisor {
    pub id: SupervisorId,
    pub name: String,
    pub surname: String,
}

impl Supervisor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// A client site where cleaning staff are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSite {
    pub id: ServiceId,
    pub name: String,
    pub address: String,
}

/// A supervisor's recorded visit to a service, with the supplies they found missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    #[serde(rename = "serviceId")]
    pub service_id: ServiceId,
    #[serde(rename = "supervisorId")]
    pub supervisor_id: SupervisorId,
    pub timestamp: DateTime<Utc>,
    pub supplies: String,
}

pub fn default_supervisors() -> Vec<Supervisor> {
    const NAMES: &[(&str, &str)] = &[
        ("Juana", "Pérez"),
        ("Carlos", "García"),
        ("María", "López"),
        ("Pedro", "Martínez"),
        ("Ana", "Rodríguez"),
    ];

    NAMES
        .iter()
        .zip(1u64..)
        .map(|((name, surname), id)| Supervisor {
            id: SupervisorId(id),
            name: (*name).to_string(),
            surname: (*surname).to_string(),
        })
        .collect()
}

pub fn default_services() -> Vec<ServiceSite> {
    (1..=100u64)
        .map(|id| ServiceSite {
            id: ServiceId(id),
            name: format!("Servicio {id}"),
            address: format!("Dirección del Servicio {id}"),
        })
        .collect()
}

/// Accepts `12`, `"12"`, `""` and `null`; forms in the browser build stored these keys as strings.
pub(crate) fn deserialize_optional_key<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKey {
        Number(u64),
        Text(String),
    }

    match Option::<RawKey>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawKey::Number(value)) => Ok(Some(value)),
        Some(RawKey::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<u64>()
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

pub(crate) mod optional_service_id {
    use super::ServiceId;
    use serde::{Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S: Serializer>(
        value: &Option<ServiceId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ServiceId>, D::Error> {
        super::deserialize_optional_key(deserializer).map(|key| key.map(ServiceId))
    }
}

pub(crate) mod optional_supervisor_id {
    use super::SupervisorId;
    use serde::{Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S: Serializer>(
        value: &Option<SupervisorId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SupervisorId>, D::Error> {
        super::deserialize_optional_key(deserializer).map(|key| key.map(SupervisorId))
    }
}
