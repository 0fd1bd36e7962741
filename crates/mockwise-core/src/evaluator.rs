//! Answer evaluation service.
//!
//! Tries the remote provider first under a hard timeout; on any failure
//! (timeout, network, malformed payload) falls back to the local
//! analyze → score → feedback pipeline. The fallback is silent to the caller
//! apart from a disclosure prefixed to the feedback text: the returned
//! `Evaluation` has the same shape either way, and provider errors never
//! propagate.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::analysis::{analyze, TextAnalysis};
use crate::feedback;
use crate::model::{Evaluation, SessionConfig};
use crate::rubric::{score_breakdown, total_score, Rubric};
use crate::traits::{InterviewProvider, RemoteEvaluation};

/// Hard bound on remote question-generation and evaluation calls. The call
/// is cancelled once the bound elapses.
pub const REMOTE_TIMEOUT_SECS: u64 = 20;

/// Prefix added to feedback when the local pipeline substituted for the
/// remote evaluator.
pub const FALLBACK_PREFIX: &str = "Remote evaluator unavailable, used local scoring.";

/// Default score when the remote payload omits one.
const DEFAULT_REMOTE_SCORE: f64 = 6.0;

/// Evaluates answers, remote-first with local fallback.
pub struct Evaluator {
    provider: Arc<dyn InterviewProvider>,
}

impl Evaluator {
    pub fn new(provider: Arc<dyn InterviewProvider>) -> Self {
        Self { provider }
    }

    /// Evaluate one answer. Always yields an `Evaluation`, never an error.
    pub async fn evaluate(
        &self,
        question: &str,
        answer: &str,
        config: &SessionConfig,
    ) -> Evaluation {
        let remote = tokio::time::timeout(
            Duration::from_secs(REMOTE_TIMEOUT_SECS),
            self.provider.evaluate_answer(question, answer, config),
        )
        .await;

        match remote {
            Ok(Ok(payload)) => from_remote(question, answer, payload),
            Ok(Err(e)) => {
                tracing::warn!("remote evaluation failed, scoring locally: {e}");
                fallback(question, answer, config)
            }
            Err(_) => {
                tracing::warn!(
                    "remote evaluation timed out after {REMOTE_TIMEOUT_SECS}s, scoring locally"
                );
                fallback(question, answer, config)
            }
        }
    }
}

fn fallback(question: &str, answer: &str, config: &SessionConfig) -> Evaluation {
    let mut evaluation = evaluate_locally(question, answer, config);
    evaluation.feedback = format!("{FALLBACK_PREFIX} {}", evaluation.feedback);
    evaluation
}

/// Build an evaluation from a remote payload, substituting documented
/// defaults for any missing field.
fn from_remote(question: &str, answer: &str, payload: RemoteEvaluation) -> Evaluation {
    Evaluation {
        question_id: Uuid::new_v4().to_string(),
        question_text: question.to_string(),
        candidate_answer: answer.to_string(),
        score: payload.score.unwrap_or(DEFAULT_REMOTE_SCORE),
        breakdown: payload.breakdown.unwrap_or_default(),
        feedback: payload
            .feedback
            .unwrap_or_else(|| "No feedback provided.".to_string()),
        improvements: payload.improvements.unwrap_or_default(),
        resources: payload.resources.unwrap_or_default(),
        analysis: payload.analysis.unwrap_or_else(TextAnalysis::default),
    }
}

/// The local rubric pipeline: analyze, score, generate feedback.
pub fn evaluate_locally(question: &str, answer: &str, config: &SessionConfig) -> Evaluation {
    let analysis = analyze(answer, config.mode);
    let rubric = Rubric::for_mode(config.mode);
    let breakdown = score_breakdown(&analysis, &rubric, config.difficulty);
    let bundle = feedback::generate(&breakdown, &analysis, config.mode, config.difficulty);

    Evaluation {
        question_id: Uuid::new_v4().to_string(),
        question_text: question.to_string(),
        candidate_answer: answer.to_string(),
        score: total_score(&breakdown),
        breakdown,
        feedback: bundle.summary,
        improvements: bundle.improvements,
        resources: bundle.resources,
        analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::model::{Difficulty, Mode};
    use async_trait::async_trait;

    fn config() -> SessionConfig {
        SessionConfig {
            role: "Backend Engineer".into(),
            domain: None,
            mode: Mode::Technical,
            difficulty: Difficulty::Medium,
            num_questions: 3,
        }
    }

    /// Returns the scripted payload, or a network error when `None`.
    struct ScriptedProvider {
        evaluation: Option<RemoteEvaluation>,
    }

    #[async_trait]
    impl InterviewProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate_questions(
            &self,
            _config: &SessionConfig,
        ) -> Result<Vec<String>, ProviderError> {
            Ok(vec!["Q1".into()])
        }

        async fn evaluate_answer(
            &self,
            _question: &str,
            _answer: &str,
            _config: &SessionConfig,
        ) -> Result<RemoteEvaluation, ProviderError> {
            self.evaluation
                .clone()
                .ok_or_else(|| ProviderError::Network("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn remote_success_fills_defaults() {
        let evaluator = Evaluator::new(Arc::new(ScriptedProvider {
            evaluation: Some(RemoteEvaluation {
                feedback: Some("Nicely reasoned.".into()),
                ..RemoteEvaluation::default()
            }),
        }));

        let evaluation = evaluator.evaluate("Q1", "my answer", &config()).await;
        assert_eq!(evaluation.score, 6.0);
        assert_eq!(evaluation.feedback, "Nicely reasoned.");
        assert!(evaluation.improvements.is_empty());
        assert!(evaluation.resources.is_empty());
        assert_eq!(evaluation.candidate_answer, "my answer");
    }

    #[tokio::test]
    async fn remote_missing_feedback_uses_placeholder() {
        let evaluator = Evaluator::new(Arc::new(ScriptedProvider {
            evaluation: Some(RemoteEvaluation {
                score: Some(8.2),
                ..RemoteEvaluation::default()
            }),
        }));

        let evaluation = evaluator.evaluate("Q1", "my answer", &config()).await;
        assert_eq!(evaluation.score, 8.2);
        assert_eq!(evaluation.feedback, "No feedback provided.");
    }

    #[tokio::test]
    async fn provider_failure_falls_back_with_disclosure() {
        let evaluator = Evaluator::new(Arc::new(ScriptedProvider {
            evaluation: None,
        }));

        let evaluation = evaluator
            .evaluate("Q1", "a local answer about the system design", &config())
            .await;
        assert!(evaluation.feedback.starts_with(FALLBACK_PREFIX));
        // Fallback score comes from the rubric, so it stays in range.
        assert!((0.0..=10.0).contains(&evaluation.score));
        let sum: f64 = evaluation.breakdown.values().sum();
        assert!((evaluation.score - sum).abs() <= 0.05 + 1e-9);
    }

    #[tokio::test]
    async fn local_pipeline_matches_rubric_totals() {
        let evaluation = evaluate_locally("Q1", "An answer of modest length here", &config());
        let sum: f64 = evaluation.breakdown.values().sum();
        assert_eq!(evaluation.score, crate::rubric::round_to_tenth(sum));
        assert!(!evaluation.feedback.starts_with(FALLBACK_PREFIX));
    }
}
