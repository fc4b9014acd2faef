//! Structured errors for the meal planner API.
//!
//! Every failure that leaves the client, whether reported by the backend,
//! caused by an unreadable body, or raised by the transport, is an [`ApiError`].
//! Callers branch on [`ApiError::code`] and [`ApiError::status`] rather than
//! on the kind of failure that produced it.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Error codes the backend is known to emit, plus the client's own fallback.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
}

pub const GENERIC_ERROR_MESSAGE: &str = "An unknown error occurred";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Error body returned by the backend on any non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// The single error shape every failed call normalizes to.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{code} (HTTP {status}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub code: String,
    pub message: String,
    pub details: Option<Map<String, Value>>,
    pub trace_id: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
            trace_id: None,
        }
    }

    /// Fallback for failures that did not come from a backend error body:
    /// status 500, code `UNKNOWN_ERROR`.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            codes::UNKNOWN_ERROR,
            message,
        )
    }

    /// Build the error for a non-2xx response from its status and raw body.
    ///
    /// A body that is not a well-formed [`ErrorResponse`] yields
    /// `UNKNOWN_ERROR` with the status text as the message.
    pub fn from_response_body(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(payload) => Self::from_payload(status.as_u16(), payload),
            Err(e) => {
                tracing::debug!("Error body for status {} was not structured: {}", status, e);
                Self::new(
                    status.as_u16(),
                    codes::UNKNOWN_ERROR,
                    status.canonical_reason().unwrap_or(GENERIC_ERROR_MESSAGE),
                )
            }
        }
    }

    pub fn from_payload(status: u16, payload: ErrorResponse) -> Self {
        Self {
            status,
            code: payload.code,
            message: payload.message,
            details: payload.details,
            trace_id: payload.trace_id,
        }
    }

    /// A 2xx response whose body could not be decoded into the expected type.
    pub(crate) fn decode(status: StatusCode, err: &serde_json::Error) -> Self {
        Self::new(
            status.as_u16(),
            codes::UNKNOWN_ERROR,
            format!("Invalid response body: {}", err),
        )
    }

    /// The request never produced a response.
    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        let status = err
            .status()
            .map(|s| s.as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
        let message = if err.is_timeout() {
            format!("Request timed out: {}", err)
        } else {
            format!("Failed to reach the meal planner API: {}", err)
        };
        Self::new(status, codes::UNKNOWN_ERROR, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16() || self.code == codes::NOT_FOUND
    }

    pub fn is_validation_error(&self) -> bool {
        self.code == codes::VALIDATION_ERROR
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Message for a single field from a `VALIDATION_ERROR` details map.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.details.as_ref()?.get(field)?.as_str()
    }
}
