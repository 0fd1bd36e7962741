//! Tiered recommendation generation for a completed session.
//!
//! Immediate guidance is keyed by the average score band, short-term by the
//! interview mode (and difficulty), long-term by the target role; the
//! resource list reuses the per-answer resource logic at session scope.

use serde::{Deserialize, Serialize};

use crate::feedback;
use crate::model::{Difficulty, Evaluation, Mode, SessionConfig};

/// Tiered guidance produced alongside the session summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSet {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub resources: Vec<String>,
}

/// Generate recommendations from the session's evaluations, its average
/// score (over all evaluations, skips included), and its configuration.
///
/// The evaluation list is part of the contract for future per-question
/// tailoring; today the tiers key off the aggregate score and config alone.
pub fn generate(
    _evaluations: &[Evaluation],
    average_score: f64,
    config: &SessionConfig,
) -> RecommendationSet {
    let mut immediate = Vec::new();
    if average_score < 6.0 {
        immediate.push(
            "Focus on understanding fundamental concepts before advanced topics".to_string(),
        );
        immediate.push(
            "Practice structuring your responses with clear beginning, middle, and end"
                .to_string(),
        );
    } else if average_score < 8.0 {
        immediate.push("Work on providing more comprehensive and detailed answers".to_string());
        immediate.push("Include specific examples to support your points".to_string());
    }

    let mut short_term = Vec::new();
    match config.mode {
        Mode::Technical => {
            short_term.push("Practice coding problems daily for 30-45 minutes".to_string());
            short_term.push("Study system design principles and common patterns".to_string());
            if config.difficulty == Difficulty::Hard {
                short_term
                    .push("Focus on scalability and performance optimization topics".to_string());
            }
        }
        Mode::Behavioral => {
            short_term.push("Practice the STAR method with various scenarios".to_string());
            short_term.push("Prepare quantified examples of your achievements".to_string());
        }
    }

    let long_term = vec![
        format!("Deepen expertise in {} domain knowledge", config.role),
        "Develop leadership and mentoring skills".to_string(),
        "Build a portfolio of challenging projects".to_string(),
    ];

    let mut resources = Vec::new();
    if average_score < 5.0 {
        resources.push("Fundamental computer science concepts review".to_string());
        resources.push("Basic interview preparation courses".to_string());
    }
    resources.extend(feedback::resources(
        config.mode,
        config.difficulty,
        average_score,
    ));

    RecommendationSet {
        immediate,
        short_term,
        long_term,
        resources,
    }
}
