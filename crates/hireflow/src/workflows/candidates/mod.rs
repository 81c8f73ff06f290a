//! Candidate intake and decision workflow.
//!
//! [`Candidate`] owns the name and transition invariants and never mutates in place;
//! [`CandidateService`] sequences repository calls around it; [`candidate_router`] exposes the
//! service over HTTP.

pub mod domain;
pub mod error;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Candidate, CandidateId, CandidateStatus, CandidateView, Decision, DecisionAction,
    MINIMUM_REASON_LENGTH,
};
pub use error::{CandidateError, ErrorCode, ValidationError, INTERNAL_ERROR_MESSAGE};
pub use repository::{
    CandidateRecord, CandidateRepository, InMemoryCandidateRepository, RepositoryError,
};
pub use router::{candidate_router, ErrorBody};
pub use service::{CandidateService, CandidateServiceError};
