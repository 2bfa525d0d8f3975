use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Health classification the double attaches to a record on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Up,
    Down,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Up => "UP",
            ServiceStatus::Down => "DOWN",
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how the double health checks a registered service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheck {
    /// URL scheme used for the health check, e.g. `http`.
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One registered service instance.
///
/// Fields the double does not interpret are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Registration {
    pub service_id: String,
    pub host: String,
    /// Kept wide so an out-of-range port is stored and only fails the health check.
    pub port: i64,
    pub health_check: HealthCheck,
    /// `None` when the caller sent no status or `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Registration {
    pub fn new(service_id: impl Into<String>, host: impl Into<String>, port: impl Into<i64>) -> Self {
        Self {
            service_id: service_id.into(),
            host: host.into(),
            port: port.into(),
            ..Default::default()
        }
    }

    pub fn with_health_check(mut self, kind: impl Into<String>, path: impl Into<String>) -> Self {
        self.health_check.kind = kind.into();
        self.health_check.path = path.into();
        self
    }

    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Body of a create or update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddRegistrationRequest {
    pub registration: Registration,
}
