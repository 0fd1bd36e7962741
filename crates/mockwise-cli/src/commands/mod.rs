//! CLI command implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use mockwise_core::traits::InterviewProvider;
use mockwise_providers::{create_provider, load_config_from, MockwiseConfig, ProviderConfig};
use mockwise_store::JsonFileStore;

pub mod export;
pub mod reset;
pub mod start;

/// Resolve configuration with CLI flag overrides applied.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    state_file: Option<PathBuf>,
    server: Option<String>,
) -> Result<MockwiseConfig> {
    let mut config = load_config_from(config_path)?;
    if let Some(path) = state_file {
        config.state_file = path;
    }
    if let Some(base_url) = server {
        config.provider = ProviderConfig::Http { base_url };
    }
    Ok(config)
}

pub(crate) fn open_store(config: &MockwiseConfig) -> JsonFileStore {
    JsonFileStore::open(&config.state_file)
}

pub(crate) fn provider_for(config: &MockwiseConfig) -> Arc<dyn InterviewProvider> {
    create_provider(&config.provider)
}
