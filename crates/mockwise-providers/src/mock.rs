//! Mock provider for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mockwise_core::error::ProviderError;
use mockwise_core::model::SessionConfig;
use mockwise_core::traits::{InterviewProvider, RemoteEvaluation};

/// A mock interview provider for exercising the engine without a proxy.
///
/// Returns role-templated questions and a configurable evaluation; can be
/// told to fail either operation.
pub struct MockProvider {
    questions: Vec<String>,
    evaluation: Option<RemoteEvaluation>,
    fail_questions: bool,
    fail_evaluations: bool,
    call_count: AtomicU32,
    last_answer: Mutex<Option<String>>,
}

impl MockProvider {
    /// Mock that serves `count` generic questions and a fixed-score
    /// evaluation.
    pub fn new(count: usize) -> Self {
        Self {
            questions: (1..=count)
                .map(|i| format!("Mock question {i}: describe a relevant experience."))
                .collect(),
            evaluation: Some(RemoteEvaluation {
                score: Some(7.0),
                feedback: Some("Mock feedback.".to_string()),
                ..RemoteEvaluation::default()
            }),
            fail_questions: false,
            fail_evaluations: false,
            call_count: AtomicU32::new(0),
            last_answer: Mutex::new(None),
        }
    }

    /// Serve an explicit question list.
    pub fn with_questions(questions: Vec<String>) -> Self {
        Self {
            questions,
            ..Self::new(0)
        }
    }

    /// Return this payload from every evaluation call.
    pub fn with_evaluation(mut self, evaluation: RemoteEvaluation) -> Self {
        self.evaluation = Some(evaluation);
        self
    }

    /// Fail every `generate_questions` call.
    pub fn failing_questions(mut self) -> Self {
        self.fail_questions = true;
        self
    }

    /// Fail every `evaluate_answer` call, forcing the local fallback.
    pub fn failing_evaluations(mut self) -> Self {
        self.fail_evaluations = true;
        self
    }

    /// Number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last answer submitted for evaluation.
    pub fn last_answer(&self) -> Option<String> {
        self.last_answer.lock().unwrap().clone()
    }
}

#[async_trait]
impl InterviewProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_questions(
        &self,
        config: &SessionConfig,
    ) -> Result<Vec<String>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_questions {
            return Err(ProviderError::Network("mock question failure".into()));
        }

        // Personalize the generic templates with the requested role.
        Ok(self
            .questions
            .iter()
            .map(|q| q.replace("relevant", &config.role.to_lowercase()))
            .collect())
    }

    async fn evaluate_answer(
        &self,
        _question: &str,
        answer: &str,
        _config: &SessionConfig,
    ) -> Result<RemoteEvaluation, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_answer.lock().unwrap() = Some(answer.to_string());

        if self.fail_evaluations {
            return Err(ProviderError::Network("mock evaluation failure".into()));
        }
        self.evaluation
            .clone()
            .ok_or_else(|| ProviderError::MalformedResponse("no evaluation configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockwise_core::model::{Difficulty, Mode};

    fn config() -> SessionConfig {
        SessionConfig {
            role: "SRE".into(),
            domain: None,
            mode: Mode::Behavioral,
            difficulty: Difficulty::Easy,
            num_questions: 3,
        }
    }

    #[tokio::test]
    async fn serves_templated_questions() {
        let provider = MockProvider::new(3);
        let questions = provider.generate_questions(&config()).await.unwrap();
        assert_eq!(questions.len(), 3);
        assert!(questions[0].contains("sre"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn records_the_last_answer() {
        let provider = MockProvider::new(1);
        provider
            .evaluate_answer("Q", "my answer", &config())
            .await
            .unwrap();
        assert_eq!(provider.last_answer().as_deref(), Some("my answer"));
    }

    #[tokio::test]
    async fn failure_injection() {
        let provider = MockProvider::new(2).failing_questions();
        assert!(provider.generate_questions(&config()).await.is_err());

        let provider = MockProvider::new(2).failing_evaluations();
        assert!(provider.evaluate_answer("Q", "A", &config()).await.is_err());
    }
}
