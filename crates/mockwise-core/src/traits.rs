//! Trait definitions for the engine's external collaborators.
//!
//! The async provider trait is implemented by `mockwise-providers` and the
//! state-store trait by `mockwise-store`; the engine depends only on these
//! seams.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::TextAnalysis;
use crate::error::{ProviderError, StoreError};
use crate::model::SessionConfig;

/// Backend that generates interview questions and evaluates answers.
///
/// Question generation has no fallback: its failure is fatal to starting a
/// session. Evaluation failures are recovered by the local scoring pipeline.
#[async_trait]
pub trait InterviewProvider: Send + Sync {
    /// Human-readable provider name (e.g. "http").
    fn name(&self) -> &str;

    /// Generate an ordered question list sized to `config.num_questions`.
    async fn generate_questions(
        &self,
        config: &SessionConfig,
    ) -> Result<Vec<String>, ProviderError>;

    /// Evaluate one answer. Every response field is optional; the evaluation
    /// service substitutes documented defaults.
    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
        config: &SessionConfig,
    ) -> Result<RemoteEvaluation, ProviderError>;
}

/// Evaluation payload returned by the remote service. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteEvaluation {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub breakdown: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub improvements: Option<Vec<String>>,
    #[serde(default)]
    pub resources: Option<Vec<String>>,
    #[serde(default)]
    pub analysis: Option<TextAnalysis>,
}

/// Key-value store for session snapshots and answer drafts.
///
/// Implementations must not panic on I/O failure; the engine logs store
/// errors and continues without persistence.
pub trait StateStore: Send {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`, if any.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_evaluation_accepts_sparse_payloads() {
        let remote: RemoteEvaluation = serde_json::from_str("{}").unwrap();
        assert!(remote.score.is_none());
        assert!(remote.feedback.is_none());

        let remote: RemoteEvaluation =
            serde_json::from_str(r#"{"score": 7.5, "feedback": "Solid."}"#).unwrap();
        assert_eq!(remote.score, Some(7.5));
        assert_eq!(remote.feedback.as_deref(), Some("Solid."));
    }
}
