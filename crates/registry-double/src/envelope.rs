//! Versioned JSON envelopes wrapped around every JSON response.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::registration::Registration;
use crate::routes::{API_VERSION, CONTENT_TYPE_JSON};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    pub api_version: String,
    pub request_id: String,
    pub message: String,
    pub status_code: u16,
}

impl BaseResponse {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            request_id: String::new(),
            message: message.into(),
            status_code: status.as_u16(),
        }
    }

    pub fn ok() -> Self {
        Self::new("", StatusCode::OK)
    }

    pub fn not_found() -> Self {
        Self::new("not found", StatusCode::NOT_FOUND)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub registration: Registration,
}

impl RegistrationResponse {
    pub fn new(registration: Registration) -> Self {
        Self {
            base: BaseResponse::ok(),
            registration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiRegistrationsResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub total_count: u32,
    pub registrations: Vec<Registration>,
}

impl MultiRegistrationsResponse {
    pub fn new(registrations: Vec<Registration>) -> Self {
        Self {
            base: BaseResponse::ok(),
            total_count: registrations.len() as u32,
            registrations,
        }
    }
}

/// Serialize `body` and reply with the status code the envelope carries.
fn json_response<T: Serialize>(status_code: u16, body: &T) -> Response {
    let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], bytes).into_response(),
        Err(e) => {
            warn!("Failed to encode response envelope: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

impl IntoResponse for BaseResponse {
    fn into_response(self) -> Response {
        json_response(self.status_code, &self)
    }
}

impl IntoResponse for RegistrationResponse {
    fn into_response(self) -> Response {
        json_response(self.base.status_code, &self)
    }
}

impl IntoResponse for MultiRegistrationsResponse {
    fn into_response(self) -> Response {
        json_response(self.base.status_code, &self)
    }
}
