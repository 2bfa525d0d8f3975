use crate::error::{DoubleError, Result};
use crate::registration::{Registration, ServiceStatus};
use axum::http::StatusCode;
use tracing::{debug, warn};
use url::Url;

/// Checks a registration's advertised health endpoint.
#[derive(Debug, Clone, Default)]
pub struct HealthChecker {
    client: reqwest::Client,
}

impl HealthChecker {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Issue one GET against the health endpoint and classify the answer.
    ///
    /// Only a 200 counts as UP. Malformed URLs, transport failures and every
    /// other status are DOWN; none of them is returned to the caller.
    pub async fn check(&self, registration: &Registration) -> ServiceStatus {
        let url = match health_check_url(registration) {
            Ok(url) => url,
            Err(e) => {
                warn!("Error health checking {:?}: {}", registration.service_id, e);
                return ServiceStatus::Down;
            }
        };

        match self.fetch_status(&url).await {
            Ok(StatusCode::OK) => {
                debug!("Health check for {:?} at {} is UP", registration.service_id, url);
                ServiceStatus::Up
            }
            Ok(status) => {
                warn!(
                    "Health check for {:?} at {} returned {}",
                    registration.service_id, url, status
                );
                ServiceStatus::Down
            }
            Err(e) => {
                warn!("Error health checking {:?}: {}", registration.service_id, e);
                ServiceStatus::Down
            }
        }
    }

    async fn fetch_status(&self, url: &Url) -> Result<StatusCode> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
    }
}

/// `type://host:port` followed by the health check path.
pub fn health_check_url(registration: &Registration) -> Result<Url> {
    let raw = format!(
        "{}://{}:{}{}",
        registration.health_check.kind,
        registration.host,
        registration.port,
        registration.health_check.path
    );
    Url::parse(&raw).map_err(|source| DoubleError::InvalidHealthCheckUrl { url: raw, source })
}
