//! Orchestration of the run pipeline: lookup, pipe-target check, input
//! resolution, rendering, and a single backend call.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use skillrun_backend::InferenceBackend;
use skillrun_config::SkillrunConfig;
use skillrun_core::{Result, SkillError};
use skillrun_skills::{template, Registry, SkillDefinition, SkillSummary};

/// Result of a successful run: the skill that ran, the prompt that was sent,
/// and the backend's response text.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub skill: String,
    pub prompt: String,
    pub text: String,
}

/// Shared entry point for every surface. CLI and tool-protocol invocations
/// both go through the same `run`/`list`/`show` calls, so a skill behaves
/// identically no matter who invoked it.
pub struct Dispatcher {
    registry: Registry,
    backend: Option<Arc<dyn InferenceBackend>>,
    cwd: PathBuf,
    command_timeout_secs: u64,
}

impl Dispatcher {
    pub fn new(
        registry: Registry,
        backend: Option<Arc<dyn InferenceBackend>>,
        cwd: PathBuf,
        command_timeout_secs: u64,
    ) -> Self {
        Self {
            registry,
            backend,
            cwd,
            command_timeout_secs,
        }
    }

    /// Build a dispatcher from loaded configuration, rooted at the current
    /// working directory. The backend is optional so that `list` and `show`
    /// work without credentials.
    pub fn from_config(
        config: &SkillrunConfig,
        backend: Option<Arc<dyn InferenceBackend>>,
    ) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let registry = Registry::new(config.skills.search_roots(&cwd));
        Ok(Self::new(
            registry,
            backend,
            cwd,
            config.resolve.command_timeout_secs,
        ))
    }

    /// Run a skill end to end. Exactly one backend call is made, after all
    /// inputs resolve and the template renders; any earlier failure means
    /// the backend is never invoked.
    pub async fn run(
        &self,
        name: &str,
        overrides: &HashMap<String, String>,
        piped: Option<&str>,
    ) -> Result<RunOutcome> {
        let skill = self.registry.find(name)?;

        if piped.is_some() && skill.inputs.len() != 1 {
            return Err(SkillError::AmbiguousPipeTarget {
                skill: skill.name.clone(),
                inputs: skill.inputs.len(),
            });
        }

        let resolved =
            crate::resolver::resolve(&skill, overrides, piped, &self.cwd, self.command_timeout_secs)
                .await?;
        let prompt = template::render(&skill.template, &resolved);
        debug!(skill = %skill.name, prompt_len = prompt.len(), "prompt rendered");

        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| SkillError::Config("no inference backend configured".into()))?;

        info!(skill = %skill.name, backend = backend.name(), "dispatching run");
        let text = backend.infer(&prompt).await?;

        Ok(RunOutcome {
            skill: skill.name,
            prompt,
            text,
        })
    }

    /// All discoverable skills across the search roots, shadowed and sorted.
    pub fn list(&self) -> Result<Vec<SkillSummary>> {
        self.registry.list()
    }

    /// Full definition of one skill, without running it.
    pub fn show(&self, name: &str) -> Result<SkillDefinition> {
        self.registry.find(name)
    }
}
