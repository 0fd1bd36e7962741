//! Text feature extraction for answer evaluation.
//!
//! Derives structural and lexical signals from free-form answer text: word
//! counts, structure markers, example/technical-term/quantification presence,
//! STAR coverage (behavioral mode), rough code-quality flags (technical
//! mode), sentence complexity, and keyword sentiment.
//!
//! All keyword lists are English. Non-English input is out of scope; its
//! flags simply come out false/low.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::Mode;

static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•\-*]\s").unwrap());
static NUMBERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s").unwrap());
static EXAMPLES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(example|for instance|such as|like|consider|imagine|suppose)\b").unwrap()
});
static TECHNICAL_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(algorithm|complexity|performance|scale|optimize|architecture|design|implement|framework|library|database|api|system|server|client|cache|queue|hash|tree|graph|stack|heap)\b",
    )
    .unwrap()
});
static STAR_SITUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(situation|context|background|scenario|project|challenge)\b").unwrap()
});
static STAR_TASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(task|goal|objective|responsibility|role|needed)\b").unwrap());
static STAR_ACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(action|did|approach|solution|implemented|decided|strategy)\b").unwrap()
});
static STAR_RESULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(result|outcome|impact|achieved|improved|success|learned)\b").unwrap()
});
static QUANTIFICATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d+%|\$\d+|reduced|increased|improved|saved|\d+x|times|faster|slower|more|less)\b",
    )
    .unwrap()
});
static CODE_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"```|`[^`]+`").unwrap());
static CODE_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function|class|def |var |let |const ").unwrap());
static CODE_COMMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"//|/\*|#").unwrap());
static CODE_IDENTIFIERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z_][a-zA-Z0-9_]*\b").unwrap());
static CODE_ERROR_HANDLING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"try|catch|except|error|throw").unwrap());
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static POSITIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(success|achieved|improved|good|great|excellent|effective|efficient)\b")
        .unwrap()
});
static NEGATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(failed|problem|difficult|challenge|issue|mistake|wrong)\b").unwrap()
});

/// Structural and lexical signals extracted from one answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextAnalysis {
    pub word_count: usize,
    pub char_count: usize,
    /// Multiple paragraphs, bullets, or numbered lines.
    pub has_structure: bool,
    pub has_examples: bool,
    /// Requires more than two technical-term matches, not mere presence.
    pub has_technical_terms: bool,
    /// STAR coverage; all false outside Behavioral mode.
    pub star: StarFlags,
    pub has_quantification: bool,
    /// Only set in Technical mode when code-like content is detected.
    pub code_quality: Option<CodeQuality>,
    pub complexity: Complexity,
    pub sentiment: Sentiment,
}

/// Independent keyword tests for the four STAR components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFlags {
    pub situation: bool,
    pub task: bool,
    pub action: bool,
    pub result: bool,
}

/// Rough code-quality flags for answers containing code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeQuality {
    pub has_code: bool,
    pub has_comments: bool,
    pub has_variable_names: bool,
    pub has_error_handling: bool,
}

/// Sentence-length complexity of the answer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Complexity {
    pub sentences: usize,
    pub avg_words_per_sentence: f64,
    pub level: ComplexityLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// Keyword-count sentiment of the answer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sentiment {
    pub positive_hits: usize,
    pub negative_hits: usize,
    pub overall: SentimentLabel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Extract all signals from an answer. Pure; mode selects the STAR and
/// code-quality branches.
pub fn analyze(answer: &str, mode: Mode) -> TextAnalysis {
    let word_count = answer.split_whitespace().count();

    TextAnalysis {
        word_count,
        char_count: answer.chars().count(),
        has_structure: has_structure(answer),
        has_examples: EXAMPLES.is_match(answer),
        has_technical_terms: TECHNICAL_TERMS.find_iter(answer).count() > 2,
        star: match mode {
            Mode::Behavioral => star_flags(answer),
            Mode::Technical => StarFlags::default(),
        },
        has_quantification: QUANTIFICATION.is_match(answer),
        code_quality: match mode {
            Mode::Technical => code_quality(answer),
            Mode::Behavioral => None,
        },
        complexity: complexity(answer, word_count),
        sentiment: sentiment(answer),
    }
}

fn has_structure(answer: &str) -> bool {
    let paragraphs = answer.split("\n\n").count();
    let bullets = BULLET.find_iter(answer).count();
    let numbering = NUMBERING.find_iter(answer).count();

    paragraphs > 1 || bullets > 1 || numbering > 1
}

fn star_flags(answer: &str) -> StarFlags {
    StarFlags {
        situation: STAR_SITUATION.is_match(answer),
        task: STAR_TASK.is_match(answer),
        action: STAR_ACTION.is_match(answer),
        result: STAR_RESULT.is_match(answer),
    }
}

fn code_quality(answer: &str) -> Option<CodeQuality> {
    let has_code = CODE_MARKERS.is_match(answer) || CODE_KEYWORDS.is_match(answer);
    if !has_code {
        return None;
    }

    Some(CodeQuality {
        has_code,
        has_comments: CODE_COMMENTS.is_match(answer),
        has_variable_names: CODE_IDENTIFIERS.is_match(answer),
        has_error_handling: CODE_ERROR_HANDLING.is_match(answer),
    })
}

fn complexity(answer: &str, word_count: usize) -> Complexity {
    // Splitting keeps the segment after a trailing terminator, matching how
    // sentence counts were tuned.
    let sentences = SENTENCE_BREAK.split(answer).count();
    let avg_words_per_sentence = word_count as f64 / sentences as f64;

    let level = if avg_words_per_sentence > 20.0 {
        ComplexityLevel::High
    } else if avg_words_per_sentence > 12.0 {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::Low
    };

    Complexity {
        sentences,
        avg_words_per_sentence,
        level,
    }
}

fn sentiment(answer: &str) -> Sentiment {
    let positive_hits = POSITIVE.find_iter(answer).count();
    let negative_hits = NEGATIVE.find_iter(answer).count();

    let overall = if positive_hits > negative_hits {
        SentimentLabel::Positive
    } else if negative_hits > positive_hits {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    Sentiment {
        positive_hits,
        negative_hits,
        overall,
    }
}
