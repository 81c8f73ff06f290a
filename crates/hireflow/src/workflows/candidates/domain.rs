use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{CandidateError, ValidationError};

/// Minimum number of characters a trimmed decision reason must contain.
pub const MINIMUM_REASON_LENGTH: usize = 10;

/// Opaque identifier assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle status. SHORTLISTED and REJECTED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    New,
    Shortlisted,
    Rejected,
}

impl CandidateStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::New, Self::Shortlisted, Self::Rejected]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Shortlisted => "SHORTLISTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Statuses a candidate may move to from `self`.
    pub const fn reachable(self) -> &'static [CandidateStatus] {
        match self {
            Self::New => &[Self::Shortlisted, Self::Rejected],
            Self::Shortlisted | Self::Rejected => &[],
        }
    }

    pub fn can_transition_to(self, target: CandidateStatus) -> bool {
        self.reachable().contains(&target)
    }

    pub const fn is_terminal(self) -> bool {
        self.reachable().is_empty()
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Action a reviewer can take on a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionAction {
    Shortlist,
    Reject,
}

impl DecisionAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shortlist => "SHORTLIST",
            Self::Reject => "REJECT",
        }
    }

    pub const fn target_status(self) -> CandidateStatus {
        match self {
            Self::Shortlist => CandidateStatus::Shortlisted,
            Self::Reject => CandidateStatus::Rejected,
        }
    }
}

impl FromStr for DecisionAction {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SHORTLIST" => Ok(Self::Shortlist),
            "REJECT" => Ok(Self::Reject),
            _ => Err(ValidationError::DecisionRequired),
        }
    }
}

impl fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A requested action together with its justification. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: DecisionAction,
    pub reason: String,
}

impl Decision {
    pub fn new(action: DecisionAction, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
        }
    }
}

/// A candidate under evaluation.
///
/// Fields are private: the name is validated once at creation and the status only changes
/// through [`Candidate::apply_decision`], which hands back a new value and leaves the receiver
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    id: CandidateId,
    name: String,
    status: CandidateStatus,
}

impl Candidate {
    /// Build a fresh candidate in `NEW` status from an untrusted name.
    pub fn create(id: CandidateId, name: &str) -> Result<Self, CandidateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired.into());
        }

        Ok(Self {
            id,
            name: name.to_string(),
            status: CandidateStatus::New,
        })
    }

    /// Rebuild a candidate from stored fields. The store is trusted, so the name is not
    /// re-validated.
    pub fn reconstitute(id: CandidateId, name: String, status: CandidateStatus) -> Self {
        Self { id, name, status }
    }

    pub fn id(&self) -> &CandidateId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> CandidateStatus {
        self.status
    }

    /// Apply a decision, returning the candidate in its new status.
    ///
    /// The reason is checked before the transition table, so a short reason is reported even
    /// when the transition itself would also be refused.
    pub fn apply_decision(
        &self,
        action: DecisionAction,
        reason: &str,
    ) -> Result<Self, CandidateError> {
        if reason.trim().chars().count() < MINIMUM_REASON_LENGTH {
            return Err(ValidationError::ReasonTooShort {
                minimum: MINIMUM_REASON_LENGTH,
            }
            .into());
        }

        let target = action.target_status();
        if !self.status.can_transition_to(target) {
            return Err(CandidateError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        Ok(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            status: target,
        })
    }

    pub fn apply(&self, decision: &Decision) -> Result<Self, CandidateError> {
        self.apply_decision(decision.action, &decision.reason)
    }

    pub fn to_view(&self) -> CandidateView {
        CandidateView {
            id: self.id.clone(),
            name: self.name.clone(),
            status: self.status,
        }
    }
}

/// Externally visible projection of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateView {
    pub id: CandidateId,
    pub name: String,
    pub status: CandidateStatus,
}
