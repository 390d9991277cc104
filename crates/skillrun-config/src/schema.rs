use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration — maps to `skillrun.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillrunConfig {
    pub skills: SkillsConfig,
    pub backend: BackendConfig,
    pub resolve: ResolveConfig,
    pub logging: LoggingConfig,
}

impl SkillrunConfig {
    /// Validate the config. Returns human-readable warnings for suspicious
    /// but workable settings; errors only for settings that cannot work.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();

        if self.backend.provider != "anthropic" {
            return Err(format!(
                "backend.provider '{}' is not supported (expected \"anthropic\")",
                self.backend.provider
            ));
        }
        if self.backend.api_key.is_none() {
            warnings.push(
                "no API key configured — set backend.api_key or the ANTHROPIC_API_KEY env var \
                 before running a skill"
                    .to_string(),
            );
        }
        if self.resolve.command_timeout_secs == 0 {
            warnings.push(
                "resolve.command_timeout_secs is 0 — auto-gather commands that hang will block \
                 the invocation indefinitely"
                    .to_string(),
            );
        }

        Ok(warnings)
    }
}

// ── Skills ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Project-local skills root, resolved relative to the working directory.
    pub project_dir: PathBuf,
    /// User-global skills root. Defaults to `~/.skillrun/skills` when unset.
    pub user_dir: Option<PathBuf>,
    /// Additional search roots, tried after the project and user roots.
    pub extra_roots: Vec<PathBuf>,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from(".skillrun/skills"),
            user_dir: None,
            extra_roots: vec![],
        }
    }
}

impl SkillsConfig {
    /// Search roots in precedence order: project-local first, then the
    /// user-global root, then any extra roots.
    pub fn search_roots(&self, cwd: &Path) -> Vec<PathBuf> {
        let project = if self.project_dir.is_absolute() {
            self.project_dir.clone()
        } else {
            cwd.join(&self.project_dir)
        };

        let user = self.user_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".skillrun")
                .join("skills")
        });

        let mut roots = vec![project, user];
        roots.extend(self.extra_roots.iter().cloned());
        roots
    }
}

// ── Backend ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend provider. Only "anthropic" is supported.
    pub provider: String,
    /// Model identifier passed to the backend.
    pub model: String,
    /// Maximum tokens per response.
    pub max_tokens: u32,
    /// Override for the API base URL (tests, proxies).
    pub base_url: Option<String>,
    /// API key. Falls back to the ANTHROPIC_API_KEY env var when unset.
    pub api_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".into(),
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 4096,
            base_url: None,
            api_key: None,
        }
    }
}

// ── Resolve ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Wall-clock bound for one auto-gather command. Expiry counts as a
    /// resolution failure for that input, not a hard error.
    pub command_timeout_secs: u64,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: 30,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no --log-level / RUST_LOG override is given.
    pub level: String,
    /// Log format: "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
