use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error};

use super::domain::{CandidateId, DecisionAction};
use super::error::{ErrorCode, ValidationError, INTERNAL_ERROR_MESSAGE};
use super::repository::CandidateRepository;
use super::service::{CandidateService, CandidateServiceError};

/// Body accepted by `POST /api/candidates`. A missing name is treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCandidateRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Body accepted by `POST /api/candidates/:id/decision`.
#[derive(Debug, Default, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// JSON error payload returned for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
}

/// Router builder exposing the candidate endpoints.
pub fn candidate_router<R>(service: Arc<CandidateService<R>>) -> Router
where
    R: CandidateRepository + 'static,
{
    Router::new()
        .route(
            "/api/candidates",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/candidates/:candidate_id/decision",
            post(decision_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<CandidateService<R>>>) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.list_candidates() {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    body: Bytes,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let request: CreateCandidateRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let name = request.name.unwrap_or_default();
    match service.create_candidate(&name) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
    body: Bytes,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let request: DecisionRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let Some(action) = request
        .decision
        .as_deref()
        .and_then(|raw| raw.parse::<DecisionAction>().ok())
    else {
        return CandidateServiceError::from(ValidationError::DecisionRequired).into_response();
    };

    let id = CandidateId(candidate_id);
    let reason = request.reason.unwrap_or_default();
    match service.apply_decision(&id, action, &reason) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Bodies are parsed as JSON whatever `Content-Type` the client sent.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "rejected malformed request body");
        CandidateServiceError::from(ValidationError::MalformedBody).into_response()
    })
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidTransition => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for CandidateServiceError {
    fn into_response(self) -> Response {
        let code = self.code();
        let message = match &self {
            CandidateServiceError::Candidate(err) => err.to_string(),
            CandidateServiceError::Repository(err) => {
                error!(error = %err, "candidate request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        let body = ErrorBody {
            error: message,
            code,
        };
        (status_for(code), Json(body)).into_response()
    }
}
