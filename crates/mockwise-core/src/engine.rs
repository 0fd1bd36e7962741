//! The interview session state machine.
//!
//! `InterviewEngine` owns the session and its collaborators: the question/
//! evaluation provider, the evaluation service with its local fallback, the
//! persistent state store, and the event bus. Every mutating operation
//! persists the full session snapshot; store failures are logged and never
//! interrupt the caller.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::analytics;
use crate::error::{EngineError, ProviderError};
use crate::evaluator::{Evaluator, REMOTE_TIMEOUT_SECS};
use crate::events::{EventBus, QuestionChanged, SessionEvent, SessionStarted};
use crate::model::{
    Evaluation, Progress, QuestionView, Session, SessionConfig, SessionExport, SessionPhase,
    Summary,
};
use crate::recommend;
use crate::rubric::round_to_tenth;
use crate::traits::{InterviewProvider, StateStore};

/// Fixed store key for the session snapshot.
pub const STATE_KEY: &str = "interview_state";

fn draft_key(index: usize) -> String {
    format!("draft_{index}")
}

/// Result of advancing past the current question.
#[derive(Debug)]
pub enum Advance {
    /// The next question is up.
    Next(QuestionView),
    /// That was the last question; the session is complete.
    Completed(Summary),
}

/// Drives one interview session from configuration to completion.
pub struct InterviewEngine {
    session: Session,
    provider: Arc<dyn InterviewProvider>,
    evaluator: Evaluator,
    store: Box<dyn StateStore>,
    events: EventBus,
}

impl InterviewEngine {
    /// Create an engine, restoring any persisted session from the store.
    pub fn new(provider: Arc<dyn InterviewProvider>, store: Box<dyn StateStore>) -> Self {
        let mut session = Session::new();
        match store.get(STATE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(saved) if !saved.session_id.is_empty() => {
                    tracing::debug!(session_id = %saved.session_id, "restored persisted session");
                    session = saved;
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("ignoring unreadable persisted session: {e}"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("state store unavailable on startup: {e}"),
        }

        Self {
            session,
            evaluator: Evaluator::new(Arc::clone(&provider)),
            provider,
            store,
            events: EventBus::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Subscription point for session events.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Validate the config, fetch questions, and start the session.
    ///
    /// Question generation has no fallback: any provider failure here is
    /// fatal and the session stays idle.
    pub async fn start_interview(
        &mut self,
        config: SessionConfig,
    ) -> Result<Vec<String>, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        let fetched = tokio::time::timeout(
            Duration::from_secs(REMOTE_TIMEOUT_SECS),
            self.provider.generate_questions(&config),
        )
        .await
        .map_err(|_| EngineError::QuestionGeneration(ProviderError::Timeout(REMOTE_TIMEOUT_SECS)))?
        .map_err(EngineError::QuestionGeneration)?;

        if fetched.is_empty() {
            return Err(EngineError::QuestionGeneration(
                ProviderError::MalformedResponse("empty question list".into()),
            ));
        }

        let mut questions = fetched;
        questions.truncate(config.num_questions as usize);

        self.session.config = Some(config.clone());
        self.session.questions = questions.clone();
        self.session.current_index = 0;
        self.session.answers.clear();
        self.session.evaluations.clear();
        self.session.start_time = Some(Utc::now());
        self.session.end_time = None;

        self.persist();
        tracing::info!(
            session_id = %self.session.session_id,
            questions = questions.len(),
            "interview started"
        );
        self.events.emit(&SessionEvent::Started(SessionStarted {
            config,
            questions: questions.clone(),
        }));

        Ok(questions)
    }

    /// Evaluate and record an answer to the current question. Does not
    /// advance the question pointer.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<Evaluation, EngineError> {
        if answer.trim().is_empty() {
            return Err(EngineError::EmptyAnswer);
        }
        let (question, config) = self.current_question_and_config()?;

        let evaluation = self.evaluator.evaluate(&question, answer, &config).await;

        self.session.answers.push(answer.to_string());
        self.session.evaluations.push(evaluation.clone());
        self.discard_draft(self.session.current_index);
        self.persist();
        self.events
            .emit(&SessionEvent::AnswerEvaluated(evaluation.clone()));

        Ok(evaluation)
    }

    /// Record the sentinel evaluation for the current question.
    pub fn skip_question(&mut self) -> Result<Evaluation, EngineError> {
        let (question, _) = self.current_question_and_config()?;

        let evaluation = Evaluation::skipped(&question);
        self.session
            .answers
            .push(evaluation.candidate_answer.clone());
        self.session.evaluations.push(evaluation.clone());
        self.discard_draft(self.session.current_index);
        self.persist();
        self.events
            .emit(&SessionEvent::QuestionSkipped(evaluation.clone()));

        Ok(evaluation)
    }

    /// Advance the question pointer, completing the session when it moves
    /// past the last question.
    pub fn next_question(&mut self) -> Result<Advance, EngineError> {
        if self.session.phase() != SessionPhase::InProgress {
            return Err(EngineError::NoActiveSession);
        }

        self.session.current_index += 1;

        if self.session.current_index >= self.session.questions.len() {
            let summary = self.end_interview()?;
            return Ok(Advance::Completed(summary));
        }

        self.persist();
        let view = self
            .get_current_question()
            .expect("index bounded by questions.len()");
        self.events
            .emit(&SessionEvent::QuestionChanged(QuestionChanged {
                index: view.index,
                question: view.question.clone(),
                progress: self.get_progress(),
            }));

        Ok(Advance::Next(view))
    }

    /// Finalize the session: record the end time, build the summary,
    /// persist, and announce completion.
    pub fn end_interview(&mut self) -> Result<Summary, EngineError> {
        if self.session.config.is_none() {
            return Err(EngineError::NoActiveSession);
        }

        self.session.end_time = Some(Utc::now());
        let summary = self.build_summary().expect("config checked above");

        self.persist();
        tracing::info!(
            session_id = %self.session.session_id,
            total_score = summary.total_score,
            "interview completed"
        );
        self.events
            .emit(&SessionEvent::Completed(summary.clone()));

        Ok(summary)
    }

    /// The current question, while one remains.
    pub fn get_current_question(&self) -> Option<QuestionView> {
        self.session
            .questions
            .get(self.session.current_index)
            .map(|question| QuestionView {
                index: self.session.current_index,
                question: question.clone(),
                total: self.session.questions.len(),
            })
    }

    pub fn get_progress(&self) -> Progress {
        let current = self.session.current_index;
        let total = self.session.questions.len();
        let percentage = if total == 0 {
            0
        } else {
            (current as f64 / total as f64 * 100.0).round() as u32
        };

        Progress {
            current,
            total,
            percentage,
        }
    }

    /// Full session snapshot with the summary when completed.
    pub fn export_data(&self) -> SessionExport {
        SessionExport {
            session: self.session.clone(),
            summary: match self.session.phase() {
                SessionPhase::Completed => self.build_summary(),
                _ => None,
            },
            exported_at: Utc::now(),
        }
    }

    /// Clear in-memory state and erase the persisted record.
    pub fn reset(&mut self) {
        for index in 0..self.session.questions.len() {
            self.discard_draft(index);
        }
        if let Err(e) = self.store.remove(STATE_KEY) {
            tracing::warn!("failed to erase persisted session: {e}");
        }
        self.session = Session::new();
    }

    /// Persist an in-progress answer draft for the current question.
    pub fn save_draft(&mut self, text: &str) {
        let key = draft_key(self.session.current_index);
        if let Err(e) = self.store.set(&key, text) {
            tracing::warn!("failed to save draft: {e}");
        }
    }

    /// Load the draft for the current question, if any.
    pub fn load_draft(&self) -> Option<String> {
        let key = draft_key(self.session.current_index);
        match self.store.get(&key) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("failed to load draft: {e}");
                None
            }
        }
    }

    fn current_question_and_config(&self) -> Result<(String, SessionConfig), EngineError> {
        if self.session.phase() != SessionPhase::InProgress {
            return Err(EngineError::NoActiveSession);
        }
        let config = self
            .session
            .config
            .clone()
            .ok_or(EngineError::NoActiveSession)?;
        let question = self
            .session
            .questions
            .get(self.session.current_index)
            .cloned()
            .ok_or(EngineError::NoActiveSession)?;
        Ok((question, config))
    }

    fn build_summary(&self) -> Option<Summary> {
        let config = self.session.config.clone()?;
        let evaluations = &self.session.evaluations;

        let average = if evaluations.is_empty() {
            0.0
        } else {
            evaluations.iter().map(|e| e.score).sum::<f64>() / evaluations.len() as f64
        };

        let duration_minutes = match (self.session.start_time, self.session.end_time) {
            (Some(start), Some(end)) => {
                ((end - start).num_milliseconds() as f64 / 60_000.0).round() as i64
            }
            _ => 0,
        };

        let skipped_count = evaluations.iter().filter(|e| e.is_skipped()).count();

        Some(Summary {
            session_id: self.session.session_id.clone(),
            config: config.clone(),
            total_score: round_to_tenth(average),
            question_count: self.session.questions.len(),
            answered_count: evaluations.len() - skipped_count,
            skipped_count,
            duration_minutes,
            analysis: analytics::analyze(evaluations),
            recommendations: recommend::generate(evaluations, average, &config),
        })
    }

    fn discard_draft(&mut self, index: usize) {
        if let Err(e) = self.store.remove(&draft_key(index)) {
            tracing::warn!("failed to discard draft: {e}");
        }
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.session) {
            Ok(json) => {
                if let Err(e) = self.store.set(STATE_KEY, &json) {
                    tracing::warn!("failed to persist session, continuing without: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize session: {e}"),
        }
    }
}

impl std::fmt::Debug for InterviewEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewEngine")
            .field("session_id", &self.session.session_id)
            .field("phase", &self.session.phase())
            .field("provider", &self.provider.name())
            .finish()
    }
}
