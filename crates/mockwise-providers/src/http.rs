//! HTTP client for the LLM proxy.
//!
//! The proxy exposes two JSON endpoints: `POST /api/questions` takes the
//! session configuration and returns `{ ok, questions }`, and `POST /api/llm`
//! takes `{ question, answer, config }` and returns `{ ok, evaluation }`.
//! Errors come back as `{ error, details? }` with a 4xx/5xx status.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mockwise_core::error::ProviderError;
use mockwise_core::evaluator::REMOTE_TIMEOUT_SECS;
use mockwise_core::model::SessionConfig;
use mockwise_core::traits::{InterviewProvider, RemoteEvaluation};

const DEFAULT_BASE_URL: &str = "http://localhost:8787";

/// Provider backed by the LLM proxy server.
pub struct HttpProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(base_url: &str) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REMOTE_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[derive(Serialize)]
struct EvaluateRequest<'a> {
    question: &'a str,
    answer: &'a str,
    config: &'a SessionConfig,
}

#[derive(Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    questions: Vec<String>,
}

#[derive(Deserialize)]
struct EvaluateResponse {
    evaluation: Option<RemoteEvaluation>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

fn map_send_error(e: reqwest::Error, base_url: &str) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(REMOTE_TIMEOUT_SECS)
    } else if e.is_connect() {
        ProviderError::Network(format!(
            "LLM proxy not reachable at {base_url}. Is the server running?"
        ))
    } else {
        ProviderError::Network(e.to_string())
    }
}

/// Read the proxy's `{ error, details? }` body into an Api error.
async fn api_error(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => match parsed.details {
            Some(details) => format!("{}: {details}", parsed.error),
            None => parsed.error,
        },
        Err(_) => body,
    };
    ProviderError::Api { status, message }
}

#[async_trait]
impl InterviewProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, config), fields(role = %config.role, mode = %config.mode))]
    async fn generate_questions(
        &self,
        config: &SessionConfig,
    ) -> Result<Vec<String>, ProviderError> {
        let response = self
            .client
            .post(format!("{}/api/questions", self.base_url))
            .json(config)
            .send()
            .await
            .map_err(|e| map_send_error(e, &self.base_url))?;

        if response.status().as_u16() >= 400 {
            return Err(api_error(response).await);
        }

        let payload: QuestionsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        if payload.questions.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "proxy returned no questions".into(),
            ));
        }

        Ok(payload.questions)
    }

    #[instrument(skip_all)]
    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
        config: &SessionConfig,
    ) -> Result<RemoteEvaluation, ProviderError> {
        let body = EvaluateRequest {
            question,
            answer,
            config,
        };

        let response = self
            .client
            .post(format!("{}/api/llm", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(e, &self.base_url))?;

        if response.status().as_u16() >= 400 {
            return Err(api_error(response).await);
        }

        let payload: EvaluateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        payload.evaluation.ok_or_else(|| {
            ProviderError::MalformedResponse("response missing evaluation".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockwise_core::model::{Difficulty, Mode};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config() -> SessionConfig {
        SessionConfig {
            role: "Backend Engineer".into(),
            domain: Some("Databases".into()),
            mode: Mode::Technical,
            difficulty: Difficulty::Medium,
            num_questions: 3,
        }
    }

    #[tokio::test]
    async fn fetches_questions() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "ok": true,
            "questions": ["Q1", "Q2", "Q3"]
        });

        Mock::given(method("POST"))
            .and(path("/api/questions"))
            .and(body_partial_json(serde_json::json!({
                "role": "Backend Engineer",
                "numQuestions": 3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri());
        let questions = provider.generate_questions(&config()).await.unwrap();
        assert_eq!(questions, vec!["Q1", "Q2", "Q3"]);
    }

    #[tokio::test]
    async fn empty_question_list_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/questions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "questions": []})),
            )
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri());
        let err = provider.generate_questions(&config()).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn proxy_error_body_is_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/questions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({"error": "Missing OPENAI_API_KEY on server"}),
            ))
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri());
        let err = provider.generate_questions(&config()).await.unwrap_err();
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("OPENAI_API_KEY"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn evaluates_an_answer() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "ok": true,
            "evaluation": {
                "score": 7.5,
                "feedback": "Solid reasoning with concrete detail.",
                "improvements": ["Mention trade-offs"],
                "resources": []
            }
        });

        Mock::given(method("POST"))
            .and(path("/api/llm"))
            .and(body_partial_json(serde_json::json!({
                "question": "Explain indexing",
                "answer": "B-trees keep lookups logarithmic"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri());
        let evaluation = provider
            .evaluate_answer(
                "Explain indexing",
                "B-trees keep lookups logarithmic",
                &config(),
            )
            .await
            .unwrap();
        assert_eq!(evaluation.score, Some(7.5));
        assert_eq!(
            evaluation.feedback.as_deref(),
            Some("Solid reasoning with concrete detail.")
        );
    }

    #[tokio::test]
    async fn missing_evaluation_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/llm"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
            )
            .mount(&server)
            .await;

        let provider = HttpProvider::new(&server.uri());
        let err = provider
            .evaluate_answer("Q", "A", &config())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let provider = HttpProvider::new("http://localhost:9999/");
        assert_eq!(provider.base_url, "http://localhost:9999");
    }
}
