//! Prose feedback, improvement suggestions, and resource recommendations.
//!
//! The summary line is drawn from a fixed per-band template set; which
//! template within the matched band is chosen is deliberately unspecified,
//! so tests assert band membership rather than exact strings.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::analysis::TextAnalysis;
use crate::model::{Difficulty, Mode};
use crate::rubric::total_score;

/// Feedback produced for one evaluated answer.
#[derive(Debug, Clone)]
pub struct FeedbackBundle {
    pub summary: String,
    /// At most three, in priority order.
    pub improvements: Vec<String>,
    /// At most four.
    pub resources: Vec<String>,
}

static EXCELLENT: [&str; 3] = [
    "Outstanding response! Your answer demonstrates exceptional understanding and communication \
     skills.",
    "Excellent work! You've shown deep knowledge and structured your response very effectively.",
    "Impressive answer! Your technical depth and clarity are exactly what interviewers look for.",
];

static GOOD: [&str; 3] = [
    "Good solid answer! You demonstrate strong understanding with room for minor improvements.",
    "Well-structured response showing good competence in the subject matter.",
    "Nice work! Your answer shows good technical knowledge and communication skills.",
];

static DECENT: [&str; 3] = [
    "Decent response that addresses the key points. Consider adding more depth and examples.",
    "Your answer shows understanding but could benefit from more structure and detail.",
    "Good foundation, but expanding on your points would strengthen your response.",
];

static NEEDS_IMPROVEMENT: [&str; 3] = [
    "Your answer needs more development. Focus on providing comprehensive details and clear \
     structure.",
    "Consider expanding your response with more specific examples and deeper analysis.",
    "Work on structuring your answer more clearly and providing additional supporting details.",
];

/// The template set for a score band. Exposed so callers can assert band
/// membership without pinning a specific template.
pub fn templates_for(score: f64) -> &'static [&'static str] {
    if score >= 8.5 {
        &EXCELLENT
    } else if score >= 7.0 {
        &GOOD
    } else if score >= 5.5 {
        &DECENT
    } else {
        &NEEDS_IMPROVEMENT
    }
}

/// Generate the feedback bundle for a scored answer.
pub fn generate(
    breakdown: &BTreeMap<String, f64>,
    analysis: &TextAnalysis,
    mode: Mode,
    difficulty: Difficulty,
) -> FeedbackBundle {
    let score = total_score(breakdown);

    FeedbackBundle {
        summary: summary_feedback(score),
        improvements: improvements(breakdown, analysis, mode),
        resources: resources(mode, difficulty, score),
    }
}

fn summary_feedback(score: f64) -> String {
    let templates = templates_for(score);
    let pick = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as usize)
        .unwrap_or(0)
        % templates.len();
    templates[pick].to_string()
}

/// Improvement suggestions gated by analysis gaps, general gaps before
/// mode-specific ones, capped to the first three found.
fn improvements(
    breakdown: &BTreeMap<String, f64>,
    analysis: &TextAnalysis,
    mode: Mode,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if analysis.word_count < 50 {
        suggestions
            .push("Provide more detailed explanations and elaborate on your key points".to_string());
    }
    if !analysis.has_structure {
        suggestions.push(
            "Structure your response with clear paragraphs or bullet points for better \
             readability"
                .to_string(),
        );
    }
    if !analysis.has_examples {
        suggestions.push(
            "Include specific examples to illustrate your points and make them more concrete"
                .to_string(),
        );
    }

    match mode {
        Mode::Technical => {
            if !analysis.has_technical_terms {
                suggestions
                    .push("Use more technical terminology to demonstrate your expertise".to_string());
            }
            if breakdown.get("efficiency").copied().unwrap_or(0.0) < 1.5 {
                suggestions.push(
                    "Discuss time and space complexity to show algorithmic thinking".to_string(),
                );
            }
            if analysis.code_quality.map_or(false, |c| !c.has_comments) {
                suggestions
                    .push("Add comments to your code examples for better clarity".to_string());
            }
        }
        Mode::Behavioral => {
            if !analysis.star.situation {
                suggestions.push(
                    "Start with a clear description of the situation or context".to_string(),
                );
            }
            if !analysis.star.action {
                suggestions.push(
                    "Focus more on the specific actions you took to address the situation"
                        .to_string(),
                );
            }
            if !analysis.star.result {
                suggestions.push("Include the outcomes and results of your actions".to_string());
            }
            if !analysis.has_quantification {
                suggestions.push(
                    "Quantify your impact with specific metrics and numbers where possible"
                        .to_string(),
                );
            }
        }
    }

    suggestions.truncate(3);
    suggestions
}

/// Resource list for a mode/difficulty/score combination, capped to four.
///
/// Also reused by the recommendation generator for the session-level list.
pub fn resources(mode: Mode, difficulty: Difficulty, score: f64) -> Vec<String> {
    let mut resources: Vec<String> = match mode {
        Mode::Technical => vec![
            "LeetCode for algorithm practice".to_string(),
            "System Design Interview by Alex Xu".to_string(),
            "Cracking the Coding Interview by Gayle McDowell".to_string(),
        ],
        Mode::Behavioral => vec![
            "The STAR Method for Behavioral Interviews".to_string(),
            "Behavioral Interview Questions Database".to_string(),
            "Leadership and Communication Skills Development".to_string(),
        ],
    };

    if difficulty == Difficulty::Hard || score < 6.0 {
        match mode {
            Mode::Technical => {
                resources.push(
                    "Design Patterns: Elements of Reusable Object-Oriented Software".to_string(),
                );
                resources.push("High-Performance Computing resources".to_string());
            }
            Mode::Behavioral => {
                resources.push("Executive Leadership Development Programs".to_string());
                resources.push("Conflict Resolution and Team Management".to_string());
            }
        }
    }

    if score < 5.0 {
        resources.insert(0, "Fundamental concepts review materials".to_string());
        resources.push("Practice interview platforms (Pramp, InterviewBuddy)".to_string());
    }

    resources.truncate(4);
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::rubric::{score_breakdown, Rubric};

    fn bundle_for(answer: &str, mode: Mode, difficulty: Difficulty) -> FeedbackBundle {
        let analysis = analyze(answer, mode);
        let rubric = Rubric::for_mode(mode);
        let breakdown = score_breakdown(&analysis, &rubric, difficulty);
        generate(&breakdown, &analysis, mode, difficulty)
    }

    #[test]
    fn summary_comes_from_matching_band() {
        let bundle = bundle_for("tiny", Mode::Technical, Difficulty::Medium);
        assert!(templates_for(3.0).contains(&bundle.summary.as_str()));
    }

    #[test]
    fn band_boundaries() {
        assert!(std::ptr::eq(templates_for(8.5), &EXCELLENT as &[_]));
        assert!(std::ptr::eq(templates_for(7.0), &GOOD as &[_]));
        assert!(std::ptr::eq(templates_for(5.5), &DECENT as &[_]));
        assert!(std::ptr::eq(
            templates_for(5.4),
            &NEEDS_IMPROVEMENT as &[_]
        ));
    }

    #[test]
    fn improvements_capped_at_three_general_first() {
        // Short, unstructured, example-free technical answer trips the three
        // general gaps before any mode-specific suggestion.
        let bundle = bundle_for("brief words", Mode::Technical, Difficulty::Medium);
        assert_eq!(bundle.improvements.len(), 3);
        assert!(bundle.improvements[0].contains("more detailed explanations"));
        assert!(bundle.improvements[1].contains("Structure your response"));
        assert!(bundle.improvements[2].contains("specific examples"));
    }

    #[test]
    fn behavioral_improvements_flag_missing_star_parts() {
        // Long and structured with an example, so the general gaps pass and
        // the STAR gaps surface.
        let answer = "For instance, the tricky situation called for care.\n\nMy goal was clear and the \
                      team needed a plan, which we talked through in a long meeting covering \
                      every angle of the rollout plan and the training schedule for everyone \
                      involved in the effort across both offices during the spring cycle.";
        let bundle = bundle_for(answer, Mode::Behavioral, Difficulty::Medium);
        assert!(bundle
            .improvements
            .iter()
            .any(|s| s.contains("specific actions")));
    }

    #[test]
    fn resources_capped_at_four_with_fundamentals_first_when_weak() {
        let resources = resources(Mode::Technical, Difficulty::Easy, 3.0);
        assert_eq!(resources.len(), 4);
        assert_eq!(resources[0], "Fundamental concepts review materials");

        let strong = super::resources(Mode::Behavioral, Difficulty::Medium, 9.0);
        assert_eq!(strong.len(), 3);
        assert!(strong[0].contains("STAR Method"));
    }

    #[test]
    fn hard_difficulty_adds_advanced_resources() {
        let resources = resources(Mode::Technical, Difficulty::Hard, 8.0);
        assert_eq!(resources.len(), 4);
        assert!(resources
            .iter()
            .any(|r| r.contains("Design Patterns")));
    }
}
