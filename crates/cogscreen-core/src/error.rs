//! Engine error types.
//!
//! Defined in `cogscreen-core` so callers can match on the failure class
//! without string matching: unknown-test and invalid-answer errors are
//! surfaced to the user for corrective action, state errors indicate a
//! caller bug.

use thiserror::Error;

/// Errors produced by the catalog, session, and scoring layers.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested test id does not exist in the catalog.
    #[error("test not found: {0}")]
    TestNotFound(String),

    /// An answer failed the type-specific validity rule for its question.
    #[error("invalid answer for question '{question_id}': {reason}")]
    InvalidAnswer { question_id: String, reason: String },

    /// The session was driven in an order its state machine does not allow.
    #[error("invalid session state: {0}")]
    SessionState(String),
}

impl EngineError {
    /// Returns `true` if the error is something the end user can fix by
    /// changing their input (as opposed to a programming error).
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            EngineError::TestNotFound(_) | EngineError::InvalidAnswer { .. }
        )
    }
}
