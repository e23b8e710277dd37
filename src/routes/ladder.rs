//! Ladder generation and tracing routes.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use ladder::LadderError;

use crate::services::ladder::{
    self as service, DiagramRequest, GenerateRequest, GenerateResponse, PermutationResponse, TraceRequest,
    TraceResponse,
};
use crate::state::AppState;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Ladder(#[from] LadderError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedInput(_) | Self::Ladder(LadderError::InvalidParameter(_)) => StatusCode::BAD_REQUEST,
            Self::Ladder(LadderError::Unsatisfiable { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "E_MALFORMED_INPUT",
            Self::Ladder(err) => err.error_code(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error_code(), "message": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

fn rejected(route: &'static str, err: impl Into<ApiError>) -> ApiError {
    let err = err.into();
    tracing::warn!(route, code = err.error_code(), error = %err, "request rejected");
    err
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/generate`: build a new ladder.
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(req) = body.map_err(|e| rejected("generate", e))?;
    let ladder = service::generate(&req, &state.config.ladder).map_err(|e| rejected("generate", e))?;
    Ok(Json(GenerateResponse { ladder }))
}

/// `POST /api/trace`: trace one start column.
pub async fn trace(
    State(state): State<AppState>,
    body: Result<Json<TraceRequest>, JsonRejection>,
) -> Result<Json<TraceResponse>, ApiError> {
    let Json(req) = body.map_err(|e| rejected("trace", e))?;
    let traced = service::trace(&req, &state.config.ladder).map_err(|e| rejected("trace", e))?;
    Ok(Json(traced))
}

/// `POST /api/trace/all`: end column for every start column.
pub async fn trace_all(
    State(state): State<AppState>,
    body: Result<Json<DiagramRequest>, JsonRejection>,
) -> Result<Json<PermutationResponse>, ApiError> {
    let Json(req) = body.map_err(|e| rejected("trace_all", e))?;
    let ends = service::permutation(&req, &state.config.ladder).map_err(|e| rejected("trace_all", e))?;
    Ok(Json(ends))
}

#[cfg(test)]
#[path = "ladder_test.rs"]
mod tests;
