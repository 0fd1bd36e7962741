//! Clear the persisted session.

use std::path::PathBuf;

use anyhow::Result;

use mockwise_core::engine::InterviewEngine;

pub fn execute(state_file: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), state_file, None)?;
    let provider = super::provider_for(&config);
    let store = super::open_store(&config);

    let mut engine = InterviewEngine::new(provider, Box::new(store));
    engine.reset();

    println!("Session state cleared.");
    Ok(())
}
