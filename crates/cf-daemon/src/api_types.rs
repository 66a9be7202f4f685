//! Request and response types for the cf-daemon HTTP endpoints.
//!
//! Entity payloads live in cf-schemas and are reused directly; this module
//! only adds the daemon-specific envelopes. No business logic lives here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cf_core::CoreError;
use cf_schemas::LoadStatus;
use serde::{Deserialize, Serialize};
use tracing::error;

// ---------------------------------------------------------------------------
// /v1/health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Orchestration failure mapped onto an HTTP status:
/// validation → 400, unknown id/code → 404, backend → 500.
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoreError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            CoreError::Store(e) => {
                error!(error = %e, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Small request bodies
// ---------------------------------------------------------------------------

/// Body of PUT /v1/locations/:code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityUpdate {
    pub capacity: i32,
}

/// Body of PUT /v1/loads/:id/status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOverride {
    pub status: LoadStatus,
}

// ---------------------------------------------------------------------------
// Location response (adds the derived freeSpace field)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    #[serde(flatten)]
    pub location: cf_schemas::Location,
    pub free_space: i32,
}

impl From<cf_schemas::Location> for LocationResponse {
    fn from(location: cf_schemas::Location) -> Self {
        Self {
            free_space: location.free_space(),
            location,
        }
    }
}
