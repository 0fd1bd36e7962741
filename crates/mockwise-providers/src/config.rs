//! Configuration loading and the provider factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mockwise_core::traits::InterviewProvider;

use crate::http::HttpProvider;
use crate::mock::MockProvider;

/// Which provider backs the interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// The LLM proxy server.
    Http {
        #[serde(default = "default_server_url")]
        base_url: String,
    },
    /// Offline mock, for trying the tool without a proxy.
    Mock {
        #[serde(default = "default_mock_questions")]
        questions: usize,
    },
}

fn default_server_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_mock_questions() -> usize {
    5
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Http {
            base_url: default_server_url(),
        }
    }
}

/// Top-level mockwise configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockwiseConfig {
    /// Provider backing question generation and evaluation.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Where the session snapshot is persisted.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("mockwise-state.json")
}

impl Default for MockwiseConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            state_file: default_state_file(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mockwise.toml` in the current directory
/// 2. `~/.config/mockwise/config.toml`
///
/// `MOCKWISE_SERVER_URL` overrides the HTTP provider's base URL.
pub fn load_config() -> Result<MockwiseConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MockwiseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mockwise.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MockwiseConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MockwiseConfig::default(),
    };

    if let Ok(url) = std::env::var("MOCKWISE_SERVER_URL") {
        config.provider = ProviderConfig::Http { base_url: url };
    }

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mockwise"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn InterviewProvider> {
    match config {
        ProviderConfig::Http { base_url } => Arc::new(HttpProvider::new(base_url)),
        ProviderConfig::Mock { questions } => Arc::new(MockProvider::new(*questions)),
    }
}
