use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::FormState;
use super::validation::ErrorMap;

/// Reference handed back once a submission has been acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub fn next_submission_id() -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("sub-{id:06}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: SubmissionId,
    pub received_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    /// Receipt stamped with a fresh sequence id and the current time.
    pub fn issue() -> Self {
        Self {
            submission_id: next_submission_id(),
            received_at: Utc::now(),
        }
    }
}

/// Outbound hook receiving a finalized application. Serialization, delivery and retries
/// belong to the implementation.
pub trait SubmissionGateway: Send + Sync {
    fn deliver(&self, application: &FormState) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Delivery failure reported by a gateway.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission transport unavailable: {0}")]
    Transport(String),
    #[error("submission refused: {0}")]
    Refused(String),
}

/// Result of asking a session to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The final step validated and the gateway acknowledged the payload.
    Accepted(SubmissionReceipt),
    /// The final step failed validation; nothing was delivered.
    Rejected(ErrorMap),
    /// Submit was requested before reaching the declaration step.
    NotAtFinalStep { current_step: usize },
    /// The session was already submitted; the original receipt is returned.
    AlreadySubmitted(SubmissionReceipt),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}
