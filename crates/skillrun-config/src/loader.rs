use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::schema::SkillrunConfig;

/// Loads the skillrun configuration from disk.
///
/// An invocation is one-shot, so there is no hot reload: the config is read
/// once at startup and handed out by value.
#[derive(Debug)]
pub struct ConfigLoader {
    config: SkillrunConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > SKILLRUN_CONFIG env >
    /// `~/.skillrun/skillrun.toml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SKILLRUN_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillrun")
            .join("skillrun.toml")
    }

    /// Load the config from disk, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: Option<&Path>) -> skillrun_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            debug!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<SkillrunConfig>(&raw).map_err(|e| {
                skillrun_core::SkillError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            debug!(?config_path, "config file not found, using defaults");
            SkillrunConfig::default()
        };

        let config = Self::apply_env_overrides(config);

        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(skillrun_core::SkillError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get a copy of the loaded config.
    pub fn get(&self) -> SkillrunConfig {
        self.config.clone()
    }

    /// Path the config was (or would have been) loaded from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (SKILLRUN_MODEL, SKILLRUN_LOG_LEVEL, and the
    /// ANTHROPIC_API_KEY fallback). Config file values take priority for the
    /// API key; env is the fallback.
    fn apply_env_overrides(mut config: SkillrunConfig) -> SkillrunConfig {
        if let Ok(v) = std::env::var("SKILLRUN_MODEL") {
            config.backend.model = v;
        }
        if let Ok(v) = std::env::var("SKILLRUN_LOG_LEVEL") {
            config.logging.level = v;
        }
        if config.backend.api_key.is_none() {
            if let Ok(v) = std::env::var("ANTHROPIC_API_KEY") {
                config.backend.api_key = Some(v);
            }
        }
        config
    }
}
