//! # skillrun-backend
//!
//! Abstraction over the inference backend. The dispatcher treats inference
//! as an opaque call — fully rendered prompt in, generated text out — so the
//! trait is deliberately small. One HTTP adapter (Anthropic messages API)
//! plus a deterministic mock for tests.

pub mod anthropic;
pub mod backend;
pub mod mock;

pub use anthropic::AnthropicBackend;
pub use backend::InferenceBackend;
pub use mock::MockBackend;

use std::sync::Arc;

use skillrun_config::BackendConfig;
use skillrun_core::{Result, SkillError};

/// Build the configured inference backend.
pub fn from_config(config: &BackendConfig) -> Result<Arc<dyn InferenceBackend>> {
    match config.provider.as_str() {
        "anthropic" => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                SkillError::Config(
                    "no API key: set backend.api_key in skillrun.toml or the ANTHROPIC_API_KEY \
                     env var"
                        .into(),
                )
            })?;
            let mut backend =
                AnthropicBackend::new(api_key, config.model.clone(), config.max_tokens);
            if let Some(ref url) = config.base_url {
                backend = backend.with_base_url(url.clone());
            }
            Ok(Arc::new(backend))
        }
        other => Err(SkillError::Config(format!(
            "unknown backend provider '{other}'"
        ))),
    }
}
