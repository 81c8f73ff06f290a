//! Candidate lifecycle tracking: a closed NEW → SHORTLISTED / REJECTED state machine where
//! every decision carries a written justification.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
