//! mockwise-providers — interview provider integrations.
//!
//! Implements the `InterviewProvider` trait against the external LLM proxy,
//! plus a scriptable mock provider for tests and offline use, and the TOML
//! configuration loader.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{create_provider, load_config, load_config_from, MockwiseConfig, ProviderConfig};
pub use http::HttpProvider;
pub use mock::MockProvider;
