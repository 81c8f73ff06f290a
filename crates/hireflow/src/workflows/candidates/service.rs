use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Candidate, CandidateId, CandidateView, Decision, DecisionAction};
use super::error::{CandidateError, ErrorCode, ValidationError};
use super::repository::{CandidateRepository, RepositoryError};

/// Sequences repository calls around the candidate entity.
pub struct CandidateService<R> {
    repository: Arc<R>,
}

impl<R> Clone for CandidateService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> CandidateService<R>
where
    R: CandidateRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// All candidates in repository order.
    pub fn list_candidates(&self) -> Result<Vec<CandidateView>, CandidateServiceError> {
        let candidates = self.repository.find_all()?;
        Ok(candidates.iter().map(Candidate::to_view).collect())
    }

    /// Create a candidate in `NEW` status. Nothing is written when the name is invalid.
    pub fn create_candidate(&self, name: &str) -> Result<CandidateView, CandidateServiceError> {
        self.repository.serialized(|| {
            let id = self.repository.next_id()?;
            let candidate = Candidate::create(id, name).inspect_err(|err| {
                debug!(error = %err, "candidate creation rejected");
            })?;

            self.repository.save(&candidate)?;
            info!(candidate_id = %candidate.id(), "candidate created");
            Ok(candidate.to_view())
        })
    }

    /// Apply a decision to a stored candidate and persist the result on success only.
    ///
    /// The fetch and the save run inside the repository's serialized section, so two
    /// concurrent decisions on one `NEW` candidate cannot both succeed.
    pub fn apply_decision(
        &self,
        id: &CandidateId,
        action: DecisionAction,
        reason: &str,
    ) -> Result<CandidateView, CandidateServiceError> {
        self.repository.serialized(|| {
            let candidate = self
                .repository
                .find_by_id(id)?
                .ok_or_else(|| CandidateError::NotFound(id.clone()))?;

            let updated = candidate
                .apply_decision(action, reason)
                .inspect_err(|err| {
                    debug!(candidate_id = %id, %action, error = %err, "decision rejected");
                })?;

            self.repository.save(&updated)?;
            info!(
                candidate_id = %id,
                from = %candidate.status(),
                to = %updated.status(),
                "decision applied"
            );
            Ok(updated.to_view())
        })
    }

    pub fn decide(
        &self,
        id: &CandidateId,
        decision: &Decision,
    ) -> Result<CandidateView, CandidateServiceError> {
        self.apply_decision(id, decision.action, &decision.reason)
    }
}

/// Error raised by the candidate service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error(transparent)]
    Candidate(#[from] CandidateError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CandidateServiceError {
    pub const fn code(&self) -> ErrorCode {
        match self {
            CandidateServiceError::Candidate(err) => err.code(),
            CandidateServiceError::Repository(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for CandidateServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Candidate(CandidateError::Validation(value))
    }
}
