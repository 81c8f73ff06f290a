use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::candidates::domain::{Candidate, CandidateId, CandidateStatus};
use crate::workflows::candidates::repository::{
    CandidateRecord, CandidateRepository, InMemoryCandidateRepository, RepositoryError,
};
use crate::workflows::candidates::{candidate_router, CandidateService};

pub(super) const STRONG_REASON: &str = "Strong technical background";
pub(super) const REJECT_REASON: &str = "Does not meet the minimum requirements";

pub(super) fn candidate(id: &str, name: &str, status: CandidateStatus) -> Candidate {
    Candidate::reconstitute(CandidateId::from(id), name.to_string(), status)
}

pub(super) fn new_candidate() -> Candidate {
    Candidate::create(CandidateId::from("c_1"), "Alice Johnson").expect("valid name")
}

pub(super) fn build_service() -> (
    CandidateService<RecordingRepository>,
    Arc<RecordingRepository>,
) {
    let repository = Arc::new(RecordingRepository::seeded());
    let service = CandidateService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: CandidateService<RecordingRepository>) -> axum::Router {
    candidate_router(Arc::new(service))
}

/// In-memory store that counts writes so tests can assert nothing was persisted.
#[derive(Default)]
pub(super) struct RecordingRepository {
    inner: InMemoryCandidateRepository,
    saves: AtomicUsize,
}

impl RecordingRepository {
    pub(super) fn seeded() -> Self {
        Self {
            inner: InMemoryCandidateRepository::seeded(),
            saves: AtomicUsize::new(0),
        }
    }

    pub(super) fn with_records(records: Vec<CandidateRecord>) -> Self {
        Self {
            inner: InMemoryCandidateRepository::with_records(records),
            saves: AtomicUsize::new(0),
        }
    }

    pub(super) fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub(super) fn status_of(&self, id: &str) -> Option<CandidateStatus> {
        self.inner
            .find_by_id(&CandidateId::from(id))
            .expect("in-memory store readable")
            .map(|candidate| candidate.status())
    }
}

impl CandidateRepository for RecordingRepository {
    fn find_all(&self) -> Result<Vec<Candidate>, RepositoryError> {
        self.inner.find_all()
    }

    fn find_by_id(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        self.inner.find_by_id(id)
    }

    fn save(&self, candidate: &Candidate) -> Result<(), RepositoryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(candidate)
    }

    fn next_id(&self) -> Result<CandidateId, RepositoryError> {
        self.inner.next_id()
    }

    fn serialized<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepositoryError>,
    {
        self.inner.serialized(work)
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn find_all(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_id(&self, _id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _candidate: &Candidate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn next_id(&self) -> Result<CandidateId, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Readable store whose writes always fail.
pub(super) struct ReadOnlyRepository {
    inner: InMemoryCandidateRepository,
}

impl ReadOnlyRepository {
    pub(super) fn seeded() -> Self {
        Self {
            inner: InMemoryCandidateRepository::seeded(),
        }
    }
}

impl CandidateRepository for ReadOnlyRepository {
    fn find_all(&self) -> Result<Vec<Candidate>, RepositoryError> {
        self.inner.find_all()
    }

    fn find_by_id(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        self.inner.find_by_id(id)
    }

    fn save(&self, _candidate: &Candidate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn next_id(&self) -> Result<CandidateId, RepositoryError> {
        self.inner.next_id()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
