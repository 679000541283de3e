//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`UserDirectoryError`] into Actix responses here. The only modelled
//! failure is the upstream list call, which surfaces as `500` with the
//! upstream message under `error`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UserDirectoryError;
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// JSON body returned when listing users fails.
///
/// # Examples
/// ```
/// use user_directory::inbound::http::ErrorPayload;
///
/// let payload = ErrorPayload { error: "unauthorized".into() };
/// assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"error":"unauthorized"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ErrorPayload {
    /// Message reported by the identity backend.
    #[schema(example = "unauthorized")]
    pub error: String,
}

/// Error returned by HTTP handlers.
///
/// Captures the ambient trace identifier at construction so the response
/// carries it as a header; the body stays exactly `{"error": message}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    message: String,
    trace_id: Option<String>,
}

impl ApiError {
    /// Build the error for a failed upstream user listing.
    pub fn upstream_list_failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Human readable message forwarded to the caller.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier propagated into the response header.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Response body for this error.
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.message.clone(),
        }
    }
}

impl From<UserDirectoryError> for ApiError {
    fn from(value: UserDirectoryError) -> Self {
        Self::upstream_list_failure(value.message())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        builder.json(self.payload())
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
