//! Session-level performance analytics.
//!
//! Computes score trend, consistency, and strength/weakness lists across all
//! evaluations in a session. Skipped questions carry the sentinel score and
//! are excluded from the statistical measures.

use serde::{Deserialize, Serialize};

use crate::model::{Evaluation, SKIP_SCORE};

/// Direction of scores over the course of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Consistent,
    /// Every question was skipped.
    AllSkipped,
    /// No scorable attempts, but not everything was skipped.
    Incomplete,
}

/// Spread of valid scores, by population standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consistency {
    High,
    Moderate,
    Low,
    /// Nothing was attempted.
    NoAttempts,
    /// Attempts exist but none were scorable.
    MixedAttempts,
}

/// Analyzer output for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub trend: Trend,
    pub consistency: Consistency,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Mean of valid scores; 0 when none exist.
    pub average_score: f64,
    /// Population standard deviation of valid scores.
    pub standard_deviation: Option<f64>,
}

/// Margin by which the half-means must differ to call a trend.
const TREND_MARGIN: f64 = 0.5;

/// Analyze all evaluations of a session.
pub fn analyze(evaluations: &[Evaluation]) -> PerformanceAnalysis {
    let valid_scores: Vec<f64> = evaluations
        .iter()
        .filter(|e| !e.is_skipped() && e.score > SKIP_SCORE)
        .map(|e| e.score)
        .collect();

    if valid_scores.is_empty() {
        return no_valid_scores(evaluations);
    }

    // Compare first- and second-half means; the second half takes the extra
    // element on odd counts.
    let mid = valid_scores.len() / 2;
    let (first, second) = valid_scores.split_at(mid);
    let trend = if first.is_empty() {
        Trend::Consistent
    } else {
        let first_avg = mean(first);
        let second_avg = mean(second);
        if second_avg > first_avg + TREND_MARGIN {
            Trend::Improving
        } else if first_avg > second_avg + TREND_MARGIN {
            Trend::Declining
        } else {
            Trend::Consistent
        }
    };

    let average = mean(&valid_scores);
    let std_dev = population_std_dev(&valid_scores, average);
    let consistency = if std_dev < 1.0 {
        Consistency::High
    } else if std_dev < 2.0 {
        Consistency::Moderate
    } else {
        Consistency::Low
    };

    let (strengths, weaknesses) = strengths_and_weaknesses(evaluations);

    PerformanceAnalysis {
        trend,
        consistency,
        strengths,
        weaknesses,
        average_score: average,
        standard_deviation: Some(std_dev),
    }
}

/// Coarse analysis when nothing scorable exists.
fn no_valid_scores(evaluations: &[Evaluation]) -> PerformanceAnalysis {
    let skipped = evaluations.iter().filter(|e| e.is_skipped()).count();
    let attempted = evaluations.len() - skipped;

    let mut strengths = Vec::new();
    if attempted > 0 {
        strengths.push("Showed willingness to attempt questions".to_string());
    }
    if evaluations
        .iter()
        .any(|e| e.candidate_answer.len() > 20)
    {
        strengths.push("Provided detailed responses when attempting questions".to_string());
    }

    PerformanceAnalysis {
        trend: if skipped == evaluations.len() {
            Trend::AllSkipped
        } else {
            Trend::Incomplete
        },
        consistency: if attempted == 0 {
            Consistency::NoAttempts
        } else {
            Consistency::MixedAttempts
        },
        strengths,
        weaknesses: vec!["Multiple questions skipped".to_string()],
        average_score: 0.0,
        standard_deviation: None,
    }
}

fn strengths_and_weaknesses(evaluations: &[Evaluation]) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    let total = evaluations.len();
    let high = evaluations.iter().filter(|e| e.score >= 7.5).count();
    let low = evaluations.iter().filter(|e| e.score < 5.5).count();
    let attempted: Vec<&Evaluation> = evaluations.iter().filter(|e| !e.is_skipped()).collect();

    if high as f64 >= total as f64 * 0.6 {
        strengths.push("Consistently strong performance across questions".to_string());
    }
    if evaluations.iter().any(|e| e.analysis.has_structure) {
        strengths.push("Good answer structure and organization".to_string());
    }
    if evaluations.iter().any(|e| e.analysis.has_examples) {
        strengths.push("Effective use of examples and illustrations".to_string());
    }

    if !attempted.is_empty() {
        let avg_len = attempted
            .iter()
            .map(|e| e.candidate_answer.len())
            .sum::<usize>() as f64
            / attempted.len() as f64;
        if avg_len > 50.0 {
            strengths.push("Provided comprehensive and detailed answers".to_string());
        }
        if attempted
            .iter()
            .any(|e| e.candidate_answer.contains("example"))
        {
            strengths.push("Used examples to illustrate points".to_string());
        }
        if attempted
            .iter()
            .any(|e| e.candidate_answer.contains("because"))
        {
            strengths.push("Demonstrated reasoning and explanation skills".to_string());
        }
    }

    if low as f64 >= total as f64 * 0.4 {
        weaknesses.push("Needs improvement in answer depth and detail".to_string());
    }
    if attempted.len() < total {
        weaknesses.push("Some questions skipped - work on building confidence".to_string());
    }

    // Anyone who attempted something gets at least one strength.
    if strengths.is_empty() && !attempted.is_empty() {
        strengths.push("Completed the interview process".to_string());
    }

    (strengths, weaknesses)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze as analyze_text, TextAnalysis};
    use crate::model::Mode;
    use std::collections::BTreeMap;

    fn eval_with_score(score: f64, answer: &str) -> Evaluation {
        Evaluation {
            question_id: "q".into(),
            question_text: "Q".into(),
            candidate_answer: answer.into(),
            score,
            breakdown: BTreeMap::new(),
            feedback: String::new(),
            improvements: vec![],
            resources: vec![],
            analysis: if answer == crate::model::SKIP_SENTINEL {
                TextAnalysis::default()
            } else {
                analyze_text(answer, Mode::Technical)
            },
        }
    }

    fn skipped() -> Evaluation {
        Evaluation::skipped("Q")
    }

    #[test]
    fn all_skipped_session() {
        let evaluations = vec![skipped(), skipped(), skipped()];
        let analysis = analyze(&evaluations);
        assert_eq!(analysis.trend, Trend::AllSkipped);
        assert_eq!(analysis.consistency, Consistency::NoAttempts);
        assert_eq!(analysis.average_score, 0.0);
        assert!(analysis.standard_deviation.is_none());
        assert!(analysis
            .weaknesses
            .contains(&"Multiple questions skipped".to_string()));
    }

    #[test]
    fn unscorable_attempts_are_incomplete_mixed() {
        // An attempted answer that still scored at or below the sentinel.
        let mut low = eval_with_score(1.5, "i tried a little");
        low.score = 1.5;
        let evaluations = vec![low, skipped()];
        let analysis = analyze(&evaluations);
        assert_eq!(analysis.trend, Trend::Incomplete);
        assert_eq!(analysis.consistency, Consistency::MixedAttempts);
        assert!(analysis
            .strengths
            .contains(&"Showed willingness to attempt questions".to_string()));
    }

    #[test]
    fn improving_trend() {
        let evaluations = vec![
            eval_with_score(5.0, "first answer text"),
            eval_with_score(5.2, "second answer text"),
            eval_with_score(7.8, "third answer text"),
            eval_with_score(8.4, "fourth answer text"),
        ];
        let analysis = analyze(&evaluations);
        assert_eq!(analysis.trend, Trend::Improving);
    }

    #[test]
    fn declining_trend() {
        let evaluations = vec![
            eval_with_score(9.0, "a"),
            eval_with_score(8.8, "b"),
            eval_with_score(6.0, "c"),
            eval_with_score(5.5, "d"),
        ];
        assert_eq!(analyze(&evaluations).trend, Trend::Declining);
    }

    #[test]
    fn consistent_within_margin() {
        let evaluations = vec![
            eval_with_score(7.0, "a"),
            eval_with_score(7.3, "b"),
            eval_with_score(7.1, "c"),
        ];
        let analysis = analyze(&evaluations);
        assert_eq!(analysis.trend, Trend::Consistent);
        assert_eq!(analysis.consistency, Consistency::High);
    }

    #[test]
    fn odd_count_gives_second_half_the_extra_score() {
        // First half [4.0], second half [4.0, 9.0]: second mean 6.5 beats
        // 4.0 by more than the margin.
        let evaluations = vec![
            eval_with_score(4.0, "a"),
            eval_with_score(4.0, "b"),
            eval_with_score(9.0, "c"),
        ];
        assert_eq!(analyze(&evaluations).trend, Trend::Improving);
    }

    #[test]
    fn low_consistency_for_wide_spread() {
        let evaluations = vec![
            eval_with_score(3.0, "a"),
            eval_with_score(9.0, "b"),
            eval_with_score(3.5, "c"),
            eval_with_score(8.5, "d"),
        ];
        assert_eq!(analyze(&evaluations).consistency, Consistency::Low);
    }

    #[test]
    fn strengths_from_signals_and_skip_weakness() {
        let detailed = "For example, the database design worked because we sharded the \
                        system.\n\n- benchmarked the api\n- tuned the cache for performance";
        let evaluations = vec![eval_with_score(8.0, detailed), skipped()];
        let analysis = analyze(&evaluations);
        assert!(analysis
            .strengths
            .contains(&"Good answer structure and organization".to_string()));
        assert!(analysis
            .strengths
            .contains(&"Effective use of examples and illustrations".to_string()));
        assert!(analysis
            .strengths
            .contains(&"Used examples to illustrate points".to_string()));
        assert!(analysis
            .weaknesses
            .contains(&"Some questions skipped - work on building confidence".to_string()));
    }

    #[test]
    fn at_least_one_strength_when_attempted() {
        let evaluations = vec![eval_with_score(3.0, "short"), eval_with_score(3.2, "meh")];
        let analysis = analyze(&evaluations);
        assert!(!analysis.strengths.is_empty());
        assert!(analysis
            .weaknesses
            .contains(&"Needs improvement in answer depth and detail".to_string()));
    }
}
