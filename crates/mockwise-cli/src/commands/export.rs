//! Export the persisted session as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mockwise_core::engine::InterviewEngine;
use mockwise_core::model::SessionPhase;

pub fn execute(
    output: PathBuf,
    state_file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), state_file, None)?;
    let provider = super::provider_for(&config);
    let store = super::open_store(&config);

    let engine = InterviewEngine::new(provider, Box::new(store));
    if engine.session().phase() == SessionPhase::Idle && engine.session().questions.is_empty() {
        anyhow::bail!("no persisted session to export");
    }

    let export = engine.export_data();
    let json = serde_json::to_string_pretty(&export).context("failed to serialize export")?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write export to {}", output.display()))?;

    println!("Exported session to {}", output.display());
    Ok(())
}
