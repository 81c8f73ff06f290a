use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateStatus};

/// Message reported for every failure outside the domain taxonomy.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Domain failures raised by the candidate entity and the service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition {
        from: CandidateStatus,
        to: CandidateStatus,
    },
    #[error("Candidate with id '{0}' not found")]
    NotFound(CandidateId),
}

impl CandidateError {
    pub const fn code(&self) -> ErrorCode {
        match self {
            CandidateError::Validation(_) => ErrorCode::ValidationError,
            CandidateError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            CandidateError::NotFound(_) => ErrorCode::NotFound,
        }
    }
}

/// Malformed input. The caller can always fix these by resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Candidate name is required")]
    NameRequired,
    #[error("Reason must be at least {minimum} characters")]
    ReasonTooShort { minimum: usize },
    #[error("Decision must be SHORTLIST or REJECT")]
    DecisionRequired,
    #[error("Request body must be valid JSON")]
    MalformedBody,
}

/// Stable machine-readable tag attached to every error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidTransition,
    NotFound,
    InternalError,
}

impl ErrorCode {
    pub const fn label(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidTransition => "INVALID_TRANSITION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}
