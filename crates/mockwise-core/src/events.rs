//! Typed session events and the subscription bus.
//!
//! The event set is closed: each lifecycle moment has its own variant with a
//! specific payload, and subscribers register per-variant handlers. There is
//! no stringly-keyed dispatch.

use crate::model::{Evaluation, Progress, SessionConfig, Summary};

/// Payload for the session-started event.
#[derive(Debug, Clone)]
pub struct SessionStarted {
    pub config: SessionConfig,
    pub questions: Vec<String>,
}

/// Payload for the question-changed event.
#[derive(Debug, Clone)]
pub struct QuestionChanged {
    pub index: usize,
    pub question: String,
    pub progress: Progress,
}

/// Everything the engine announces over one session's lifetime.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Started(SessionStarted),
    AnswerEvaluated(Evaluation),
    QuestionChanged(QuestionChanged),
    QuestionSkipped(Evaluation),
    Completed(Summary),
}

type Handler<T> = Box<dyn Fn(&T) + Send>;

/// Per-variant subscriber lists.
#[derive(Default)]
pub struct EventBus {
    started: Vec<Handler<SessionStarted>>,
    evaluated: Vec<Handler<Evaluation>>,
    question_changed: Vec<Handler<QuestionChanged>>,
    skipped: Vec<Handler<Evaluation>>,
    completed: Vec<Handler<Summary>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_session_started(&mut self, handler: impl Fn(&SessionStarted) + Send + 'static) {
        self.started.push(Box::new(handler));
    }

    pub fn on_answer_evaluated(&mut self, handler: impl Fn(&Evaluation) + Send + 'static) {
        self.evaluated.push(Box::new(handler));
    }

    pub fn on_question_changed(&mut self, handler: impl Fn(&QuestionChanged) + Send + 'static) {
        self.question_changed.push(Box::new(handler));
    }

    pub fn on_question_skipped(&mut self, handler: impl Fn(&Evaluation) + Send + 'static) {
        self.skipped.push(Box::new(handler));
    }

    pub fn on_session_completed(&mut self, handler: impl Fn(&Summary) + Send + 'static) {
        self.completed.push(Box::new(handler));
    }

    /// Dispatch an event to its variant's handlers.
    pub fn emit(&self, event: &SessionEvent) {
        match event {
            SessionEvent::Started(payload) => {
                for handler in &self.started {
                    handler(payload);
                }
            }
            SessionEvent::AnswerEvaluated(payload) => {
                for handler in &self.evaluated {
                    handler(payload);
                }
            }
            SessionEvent::QuestionChanged(payload) => {
                for handler in &self.question_changed {
                    handler(payload);
                }
            }
            SessionEvent::QuestionSkipped(payload) => {
                for handler in &self.skipped {
                    handler(payload);
                }
            }
            SessionEvent::Completed(payload) => {
                for handler in &self.completed {
                    handler(payload);
                }
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("started", &self.started.len())
            .field("evaluated", &self.evaluated.len())
            .field("question_changed", &self.question_changed.len())
            .field("skipped", &self.skipped.len())
            .field("completed", &self.completed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Mode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn started_event() -> SessionEvent {
        SessionEvent::Started(SessionStarted {
            config: SessionConfig {
                role: "QA".into(),
                domain: None,
                mode: Mode::Technical,
                difficulty: Difficulty::Easy,
                num_questions: 1,
            },
            questions: vec!["Q1".into()],
        })
    }

    #[test]
    fn handlers_fire_only_for_their_variant() {
        let started = Arc::new(AtomicUsize::new(0));
        let skipped = Arc::new(AtomicUsize::new(0));

        let mut bus = EventBus::new();
        let started_count = Arc::clone(&started);
        bus.on_session_started(move |_| {
            started_count.fetch_add(1, Ordering::Relaxed);
        });
        let skipped_count = Arc::clone(&skipped);
        bus.on_question_skipped(move |_| {
            skipped_count.fetch_add(1, Ordering::Relaxed);
        });

        bus.emit(&started_event());
        bus.emit(&started_event());

        assert_eq!(started.load(Ordering::Relaxed), 2);
        assert_eq!(skipped.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn multiple_handlers_per_variant() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();
        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            bus.on_session_started(move |payload| {
                assert_eq!(payload.questions.len(), 1);
                hits.fetch_add(1, Ordering::Relaxed);
            });
        }

        bus.emit(&started_event());
        assert_eq!(hits.load(Ordering::Relaxed), 3);
    }
}
