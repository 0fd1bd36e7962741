//! Rubric definitions and the criterion-level scorer.
//!
//! Two fixed rubrics, selected once from the interview mode: Technical
//! (correctness 4, efficiency 2, completeness 2, clarity 2) and Behavioral
//! (situation 2, actions 4, results 2, reflection 2). Each rubric's maxima
//! sum to 10, so the total score is in [0, 10] by construction.

use std::collections::BTreeMap;

use crate::analysis::{ComplexityLevel, SentimentLabel, TextAnalysis};
use crate::model::{Difficulty, Mode};

/// One scoring criterion within a rubric.
#[derive(Debug, Clone, Copy)]
pub struct Criterion {
    pub name: &'static str,
    pub kind: CriterionKind,
    pub max_score: f64,
    pub weight: f64,
    pub description: &'static str,
}

/// Which heuristic scores this criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    Correctness,
    Efficiency,
    Completeness,
    Clarity,
    Situation,
    Actions,
    Results,
    Reflection,
}

const TECHNICAL_CRITERIA: [Criterion; 4] = [
    Criterion {
        name: "correctness",
        kind: CriterionKind::Correctness,
        max_score: 4.0,
        weight: 0.4,
        description: "Technical accuracy and correctness of solution",
    },
    Criterion {
        name: "efficiency",
        kind: CriterionKind::Efficiency,
        max_score: 2.0,
        weight: 0.2,
        description: "Time/space complexity and optimization",
    },
    Criterion {
        name: "completeness",
        kind: CriterionKind::Completeness,
        max_score: 2.0,
        weight: 0.2,
        description: "Coverage of all requirements and edge cases",
    },
    Criterion {
        name: "clarity",
        kind: CriterionKind::Clarity,
        max_score: 2.0,
        weight: 0.2,
        description: "Code readability and explanation quality",
    },
];

const BEHAVIORAL_CRITERIA: [Criterion; 4] = [
    Criterion {
        name: "situation",
        kind: CriterionKind::Situation,
        max_score: 2.0,
        weight: 0.2,
        description: "Context and background setup",
    },
    Criterion {
        name: "actions",
        kind: CriterionKind::Actions,
        max_score: 4.0,
        weight: 0.4,
        description: "Specific actions taken and decision-making",
    },
    Criterion {
        name: "results",
        kind: CriterionKind::Results,
        max_score: 2.0,
        weight: 0.2,
        description: "Outcomes and measurable impact",
    },
    Criterion {
        name: "reflection",
        kind: CriterionKind::Reflection,
        max_score: 2.0,
        weight: 0.2,
        description: "Lessons learned and future improvements",
    },
];

/// A named set of scoring criteria, tagged by interview mode.
#[derive(Debug, Clone, Copy)]
pub enum Rubric {
    Technical(&'static [Criterion]),
    Behavioral(&'static [Criterion]),
}

impl Rubric {
    /// Select the rubric for an interview mode.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Technical => Rubric::Technical(&TECHNICAL_CRITERIA),
            Mode::Behavioral => Rubric::Behavioral(&BEHAVIORAL_CRITERIA),
        }
    }

    pub fn criteria(&self) -> &'static [Criterion] {
        match self {
            Rubric::Technical(criteria) | Rubric::Behavioral(criteria) => criteria,
        }
    }
}

/// Round to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score each criterion: heuristic base value, difficulty multiplier, then
/// clamp to `[0, max_score]`.
pub fn score_breakdown(
    analysis: &TextAnalysis,
    rubric: &Rubric,
    difficulty: Difficulty,
) -> BTreeMap<String, f64> {
    let multiplier = difficulty.multiplier();

    rubric
        .criteria()
        .iter()
        .map(|criterion| {
            let raw = score_criterion(criterion.kind, analysis);
            let scored = (raw * multiplier).clamp(0.0, criterion.max_score);
            (criterion.name.to_string(), scored)
        })
        .collect()
}

/// Total score: sum of criterion scores, one decimal.
pub fn total_score(breakdown: &BTreeMap<String, f64>) -> f64 {
    round_to_tenth(breakdown.values().sum())
}

fn score_criterion(kind: CriterionKind, analysis: &TextAnalysis) -> f64 {
    match kind {
        CriterionKind::Correctness => score_correctness(analysis),
        CriterionKind::Efficiency => score_efficiency(analysis),
        CriterionKind::Completeness => score_completeness(analysis),
        CriterionKind::Clarity => score_clarity(analysis),
        CriterionKind::Situation => score_situation(analysis),
        CriterionKind::Actions => score_actions(analysis),
        CriterionKind::Results => score_results(analysis),
        CriterionKind::Reflection => score_reflection(analysis),
    }
}

fn score_correctness(analysis: &TextAnalysis) -> f64 {
    let mut score = 1.0;

    if analysis.word_count > 50 {
        score += 1.0;
    }
    if analysis.has_technical_terms {
        score += 1.0;
    }
    if analysis.has_examples {
        score += 0.5;
    }
    if analysis.code_quality.map_or(false, |c| c.has_code) {
        score += 0.5;
    }

    score
}

fn score_efficiency(analysis: &TextAnalysis) -> f64 {
    let mut score = 0.5;

    if analysis.has_structure {
        score += 0.5;
    }
    if analysis.word_count > 30 && analysis.word_count < 300 {
        score += 0.5;
    }
    if analysis.complexity.level == ComplexityLevel::Medium {
        score += 0.5;
    }

    score
}

fn score_completeness(analysis: &TextAnalysis) -> f64 {
    let mut score = 0.5;

    if analysis.word_count > 100 {
        score += 0.5;
    }
    if analysis.has_examples {
        score += 0.5;
    }
    if analysis.has_technical_terms {
        score += 0.5;
    }

    score
}

fn score_clarity(analysis: &TextAnalysis) -> f64 {
    let mut score = 0.5;

    if analysis.has_structure {
        score += 0.5;
    }
    if analysis.complexity.avg_words_per_sentence < 25.0 {
        score += 0.5;
    }
    if analysis.word_count > 30 {
        score += 0.5;
    }

    score
}

fn score_situation(analysis: &TextAnalysis) -> f64 {
    let mut score = 0.5;

    if analysis.star.situation {
        score += 1.0;
    }
    if analysis.star.task {
        score += 0.5;
    }

    score
}

fn score_actions(analysis: &TextAnalysis) -> f64 {
    let mut score = 1.0;

    if analysis.star.action {
        score += 1.5;
    }
    if analysis.word_count > 80 {
        score += 1.0;
    }
    if analysis.has_examples {
        score += 0.5;
    }

    score
}

fn score_results(analysis: &TextAnalysis) -> f64 {
    let mut score = 0.5;

    if analysis.star.result {
        score += 1.0;
    }
    if analysis.has_quantification {
        score += 0.5;
    }

    score
}

fn score_reflection(analysis: &TextAnalysis) -> f64 {
    let mut score = 0.5;

    if analysis.sentiment.overall == SentimentLabel::Positive {
        score += 0.5;
    }

    score
}
