//! Interactive interview session.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use comfy_table::{Cell, Table};

use mockwise_core::engine::{Advance, InterviewEngine};
use mockwise_core::model::{Evaluation, SessionConfig, Summary};

/// What the candidate typed for one question.
enum AnswerInput {
    Text(String),
    Skip,
    Quit,
}

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    role: String,
    domain: Option<String>,
    mode: String,
    difficulty: String,
    questions: u8,
    server: Option<String>,
    state_file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), state_file, server)?;
    let provider = super::provider_for(&config);
    let store = super::open_store(&config);

    let session_config = SessionConfig {
        role,
        domain,
        mode: mode.parse().map_err(|e: String| anyhow!(e))?,
        difficulty: difficulty.parse().map_err(|e: String| anyhow!(e))?,
        num_questions: questions,
    };

    let mut engine = InterviewEngine::new(provider, Box::new(store));
    let question_list = engine
        .start_interview(session_config)
        .await
        .map_err(|e| anyhow!("could not start the interview: {e}"))?;

    println!(
        "Interview started: {} questions. Finish each answer with a line containing only '.',",
        question_list.len()
    );
    println!("type ':skip' to skip a question, ':quit' to end early.\n");

    loop {
        let Some(view) = engine.get_current_question() else {
            break;
        };
        println!("Question {}/{}: {}", view.index + 1, view.total, view.question);

        match read_answer()? {
            AnswerInput::Quit => {
                let summary = engine
                    .end_interview()
                    .map_err(|e| anyhow!("could not end the interview: {e}"))?;
                print_summary(&summary);
                return Ok(());
            }
            AnswerInput::Skip => {
                engine
                    .skip_question()
                    .map_err(|e| anyhow!("could not skip: {e}"))?;
                println!("Skipped.\n");
            }
            AnswerInput::Text(answer) => {
                match engine.submit_answer(&answer).await {
                    Ok(evaluation) => print_evaluation(&evaluation),
                    Err(mockwise_core::error::EngineError::EmptyAnswer) => {
                        println!("Answer was empty; the question stays open.\n");
                        continue;
                    }
                    Err(e) => return Err(anyhow!("could not submit the answer: {e}")),
                }
            }
        }

        match engine
            .next_question()
            .map_err(|e| anyhow!("could not advance: {e}"))?
        {
            Advance::Next(_) => {}
            Advance::Completed(summary) => {
                print_summary(&summary);
                return Ok(());
            }
        }
    }

    Ok(())
}

/// Read one answer from stdin. `:skip` / `:quit` are only recognized as the
/// first line; a lone `.` terminates the answer; EOF quits.
fn read_answer() -> Result<AnswerInput> {
    let stdin = std::io::stdin();
    let mut lines: Vec<String> = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if lines.is_empty() {
            match trimmed {
                ":skip" => return Ok(AnswerInput::Skip),
                ":quit" => return Ok(AnswerInput::Quit),
                _ => {}
            }
        }
        if trimmed == "." {
            return Ok(AnswerInput::Text(lines.join("\n")));
        }
        lines.push(line);
    }

    // EOF before the terminator.
    if lines.is_empty() {
        Ok(AnswerInput::Quit)
    } else {
        Ok(AnswerInput::Text(lines.join("\n")))
    }
}

fn print_evaluation(evaluation: &Evaluation) {
    println!("\nScore: {:.1}/10", evaluation.score);
    println!("{}", evaluation.feedback);

    if !evaluation.breakdown.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Criterion", "Score"]);
        for (criterion, score) in &evaluation.breakdown {
            table.add_row(vec![Cell::new(criterion), Cell::new(format!("{score:.1}"))]);
        }
        println!("{table}");
    }

    if !evaluation.improvements.is_empty() {
        println!("Improvements:");
        for item in &evaluation.improvements {
            println!("  - {item}");
        }
    }
    println!();
}

fn print_summary(summary: &Summary) {
    println!("\nInterview complete.");

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total score"),
        Cell::new(format!("{:.1}/10", summary.total_score)),
    ]);
    table.add_row(vec![
        Cell::new("Questions"),
        Cell::new(summary.question_count),
    ]);
    table.add_row(vec![
        Cell::new("Answered"),
        Cell::new(summary.answered_count),
    ]);
    table.add_row(vec![Cell::new("Skipped"), Cell::new(summary.skipped_count)]);
    table.add_row(vec![
        Cell::new("Duration"),
        Cell::new(format!("{} min", summary.duration_minutes)),
    ]);
    table.add_row(vec![
        Cell::new("Trend"),
        Cell::new(format!("{:?}", summary.analysis.trend)),
    ]);
    table.add_row(vec![
        Cell::new("Consistency"),
        Cell::new(format!("{:?}", summary.analysis.consistency)),
    ]);
    println!("{table}");

    print_list("Strengths", &summary.analysis.strengths);
    print_list("Areas to work on", &summary.analysis.weaknesses);
    print_list("Do now", &summary.recommendations.immediate);
    print_list("Next few weeks", &summary.recommendations.short_term);
    print_list("Longer term", &summary.recommendations.long_term);
    print_list("Resources", &summary.recommendations.resources);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}
