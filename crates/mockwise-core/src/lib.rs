//! mockwise-core — Session engine, rubric scoring, and analytics.
//!
//! This crate defines the interview data model, the session state machine,
//! the local answer-evaluation pipeline (text analysis, rubric scoring,
//! feedback), and the session-level analytics that the rest of the mockwise
//! system builds on.

pub mod analysis;
pub mod analytics;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod feedback;
pub mod model;
pub mod recommend;
pub mod rubric;
pub mod traits;
