//! Error types for the session engine and its collaborators.
//!
//! Defined in `mockwise-core` so the engine can classify provider failures
//! (recoverable via local fallback vs fatal) without string matching.

use thiserror::Error;

/// Errors that can occur when calling the external question/evaluation service.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request exceeded the hard timeout and was cancelled.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network-level failure occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The service returned a non-success HTTP status.
    #[error("service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The service responded, but the payload could not be interpreted.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors surfaced by the session state machine.
///
/// Only configuration, empty-answer, and question-generation failures ever
/// reach the caller; evaluation-service failures are recovered internally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The session configuration failed validation. Lists every failing field.
    #[error("invalid configuration: {}", .0.join(", "))]
    InvalidConfig(Vec<String>),

    /// The submitted answer was empty or whitespace-only.
    #[error("answer cannot be empty")]
    EmptyAnswer,

    /// The operation requires an in-progress session.
    #[error("no active session")]
    NoActiveSession,

    /// Question generation failed. Fatal: a session cannot start without
    /// questions.
    #[error("failed to generate questions: {0}")]
    QuestionGeneration(#[source] ProviderError),
}

/// Errors from the persistent state store.
///
/// The engine logs and swallows these; they never interrupt an operation.
#[derive(Debug, Error)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_field() {
        let err = EngineError::InvalidConfig(vec![
            "role is required".into(),
            "number of questions must be between 1 and 10".into(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("role is required"));
        assert!(msg.contains("between 1 and 10"));
    }

    #[test]
    fn question_generation_wraps_cause() {
        let err = EngineError::QuestionGeneration(ProviderError::Timeout(20));
        assert!(err.to_string().contains("timed out after 20s"));
    }
}
