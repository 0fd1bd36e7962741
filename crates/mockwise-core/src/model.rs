//! Core data model types for mockwise.
//!
//! These are the fundamental types that the entire mockwise system uses to
//! represent an interview session, its configuration, and the evaluation
//! records produced for each answer.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::TextAnalysis;
use crate::analytics::PerformanceAnalysis;
use crate::recommend::RecommendationSet;

/// The answer recorded in place of a real one when a question is skipped.
pub const SKIP_SENTINEL: &str = "[SKIPPED]";

/// Score assigned to a skipped question.
pub const SKIP_SCORE: f64 = 2.0;

/// Interview mode. Selects the rubric and the mode-specific text analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Technical,
    Behavioral,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Technical => write!(f, "Technical"),
            Mode::Behavioral => write!(f, "Behavioral"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "technical" => Ok(Mode::Technical),
            "behavioral" | "behavioural" => Ok(Mode::Behavioral),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Question difficulty. Scales the rubric scorer's raw criterion scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplier applied to raw criterion scores before clamping.
    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Configuration for one interview session. Immutable once the session starts.
///
/// Serialized in camelCase to match the LLM proxy's wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Target role, e.g. "Backend Engineer".
    pub role: String,
    /// Optional focus domain, e.g. "Distributed Systems".
    #[serde(default)]
    pub domain: Option<String>,
    /// Technical or Behavioral.
    pub mode: Mode,
    /// Question difficulty.
    pub difficulty: Difficulty,
    /// Number of questions, 1 through 10.
    pub num_questions: u8,
}

impl SessionConfig {
    /// Validate the configuration, collecting every failing field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.role.trim().is_empty() {
            errors.push("role is required".to_string());
        }
        if self.num_questions < 1 || self.num_questions > 10 {
            errors.push("number of questions must be between 1 and 10".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Lifecycle phase of a session, derived from its timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No configuration yet; nothing has happened.
    Idle,
    /// Questions fetched, answers being collected.
    InProgress,
    /// End time recorded; summary available.
    Completed,
}

/// One complete interview attempt from configuration to completion or reset.
///
/// Invariants: `answers.len() == evaluations.len() <= questions.len()` and
/// `current_index <= questions.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque unique identifier.
    pub session_id: String,
    /// Fixed configuration; `None` while idle.
    pub config: Option<SessionConfig>,
    /// Ordered question list, fixed length `num_questions` once started.
    pub questions: Vec<String>,
    /// 0-based pointer into `questions`.
    pub current_index: usize,
    /// One entry per answered or skipped question.
    pub answers: Vec<String>,
    /// One evaluation per entry in `answers`.
    pub evaluations: Vec<Evaluation>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a fresh idle session with a new identifier.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            config: None,
            questions: Vec::new(),
            current_index: 0,
            answers: Vec::new(),
            evaluations: Vec::new(),
            start_time: None,
            end_time: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if self.end_time.is_some() {
            SessionPhase::Completed
        } else if self.start_time.is_some() {
            SessionPhase::InProgress
        } else {
            SessionPhase::Idle
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// The evaluation record produced for a single answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Unique identifier for this evaluation.
    pub question_id: String,
    /// The question that was asked.
    pub question_text: String,
    /// The candidate's answer, or [`SKIP_SENTINEL`].
    pub candidate_answer: String,
    /// Overall score, 0–10, one decimal.
    pub score: f64,
    /// Per-criterion sub-scores.
    pub breakdown: BTreeMap<String, f64>,
    /// Prose feedback.
    pub feedback: String,
    /// Up to three improvement suggestions.
    pub improvements: Vec<String>,
    /// Up to four resource recommendations.
    pub resources: Vec<String>,
    /// Structural/lexical signals derived from the answer text.
    pub analysis: TextAnalysis,
}

impl Evaluation {
    /// The fixed sentinel evaluation recorded when a question is skipped.
    pub fn skipped(question: &str) -> Self {
        Self {
            question_id: Uuid::new_v4().to_string(),
            question_text: question.to_string(),
            candidate_answer: SKIP_SENTINEL.to_string(),
            score: SKIP_SCORE,
            breakdown: BTreeMap::new(),
            feedback: "Question was skipped. Consider practicing similar questions to build \
                       confidence."
                .to_string(),
            improvements: vec![
                "Practice similar questions".to_string(),
                "Build confidence in this topic area".to_string(),
            ],
            resources: vec!["Review fundamental concepts".to_string()],
            analysis: TextAnalysis::default(),
        }
    }

    /// Whether this evaluation records a skipped question.
    pub fn is_skipped(&self) -> bool {
        self.candidate_answer == SKIP_SENTINEL
    }
}

/// View of the current question returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub index: usize,
    pub question: String,
    pub total: usize,
}

/// Progress through the question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Questions advanced past so far.
    pub current: usize,
    /// Total questions in the session.
    pub total: usize,
    /// `round(current / total * 100)`.
    pub percentage: u32,
}

/// Session-level results produced on completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub session_id: String,
    pub config: SessionConfig,
    /// Mean of all evaluation scores (skips included), one decimal.
    pub total_score: f64,
    pub question_count: usize,
    pub answered_count: usize,
    pub skipped_count: usize,
    pub duration_minutes: i64,
    pub analysis: PerformanceAnalysis,
    pub recommendations: RecommendationSet,
}

/// A full session snapshot for export, with the summary when completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub session: Session,
    pub summary: Option<Summary>,
    pub exported_at: DateTime<Utc>,
}
