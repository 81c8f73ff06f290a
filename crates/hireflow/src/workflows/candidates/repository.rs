use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, CandidateStatus};

/// Prefix shared by every id the in-memory store hands out.
pub const CANDIDATE_ID_PREFIX: &str = "c_";

/// Persisted shape of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: String,
    pub status: CandidateStatus,
}

impl CandidateRecord {
    pub fn into_candidate(self) -> Candidate {
        Candidate::reconstitute(self.id, self.name, self.status)
    }
}

impl From<&Candidate> for CandidateRecord {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id().clone(),
            name: candidate.name().to_string(),
            status: candidate.status(),
        }
    }
}

/// Storage abstraction so the service can be exercised against any backing store.
pub trait CandidateRepository: Send + Sync {
    /// Every stored candidate, in insertion order.
    fn find_all(&self) -> Result<Vec<Candidate>, RepositoryError>;
    fn find_by_id(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    /// Insert or replace by id.
    fn save(&self, candidate: &Candidate) -> Result<(), RepositoryError>;
    /// An id not currently in use and never handed out before.
    fn next_id(&self) -> Result<CandidateId, RepositoryError>;

    /// Run a read-modify-write sequence with exclusive access to the store's writes.
    ///
    /// Stores shared across threads must override this; the default runs `work` unguarded.
    fn serialized<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepositoryError>,
    {
        work()
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("candidate id space exhausted")]
    IdsExhausted,
}

#[derive(Debug, Default)]
struct Store {
    records: Vec<CandidateRecord>,
    last_issued: u64,
}

impl Store {
    fn upsert(&mut self, record: CandidateRecord) {
        match self.records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }
}

/// Process-local store. Clones share the same records and the same write gate.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCandidateRepository {
    store: Arc<Mutex<Store>>,
    write_gate: Arc<Mutex<()>>,
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = CandidateRecord>) -> Self {
        let mut store = Store::default();
        for record in records {
            store.upsert(record);
        }
        Self {
            store: Arc::new(Mutex::new(store)),
            write_gate: Arc::default(),
        }
    }

    /// Store pre-populated with the demo roster.
    pub fn seeded() -> Self {
        Self::with_records([
            CandidateRecord {
                id: CandidateId::from("c_1"),
                name: "Alice Johnson".to_string(),
                status: CandidateStatus::New,
            },
            CandidateRecord {
                id: CandidateId::from("c_2"),
                name: "Bob Williams".to_string(),
                status: CandidateStatus::New,
            },
        ])
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("candidate store lock poisoned".to_string()))
    }
}

/// Numeric part of an id such as `c_12`. Trailing non-digits are ignored; ids with no
/// leading digits after the first underscore have no suffix.
fn numeric_suffix(id: &CandidateId) -> Option<u64> {
    let (_, rest) = id.as_str().split_once('_')?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn find_all(&self) -> Result<Vec<Candidate>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .records
            .iter()
            .cloned()
            .map(CandidateRecord::into_candidate)
            .collect())
    }

    fn find_by_id(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .records
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .map(CandidateRecord::into_candidate))
    }

    fn save(&self, candidate: &Candidate) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.upsert(CandidateRecord::from(candidate));
        Ok(())
    }

    fn next_id(&self) -> Result<CandidateId, RepositoryError> {
        let mut guard = self.lock()?;
        let highest = guard
            .records
            .iter()
            .filter_map(|record| numeric_suffix(&record.id))
            .max()
            .unwrap_or(0)
            .max(guard.last_issued);
        let next = highest.checked_add(1).ok_or(RepositoryError::IdsExhausted)?;
        guard.last_issued = next;
        Ok(CandidateId(format!("{CANDIDATE_ID_PREFIX}{next}")))
    }

    fn serialized<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let _gate = self.write_gate.lock().map_err(|_| {
            RepositoryError::Unavailable("candidate write gate poisoned".to_string())
        })?;
        work()
    }
}
