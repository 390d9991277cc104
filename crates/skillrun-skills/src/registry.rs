use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use skillrun_core::{Result, SkillError};

use crate::definition::SkillDefinition;

/// Fixed name of the definition file inside a skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

/// One row of `list` output: enough to pick a skill without loading its
/// full template.
#[derive(Debug, Clone, Serialize)]
pub struct SkillSummary {
    pub name: String,
    pub description: String,
    pub inputs: Vec<String>,
    pub path: PathBuf,
}

/// Finds skills across an ordered list of search roots.
///
/// Lookup is lazy: `find` probes `<root>/<name>/SKILL.md` per root and parses
/// on first hit. Nothing is cached — a skill invocation is one-shot, and
/// re-parsing keeps the registry free of shared mutable state.
pub struct Registry {
    roots: Vec<PathBuf>,
}

impl Registry {
    /// Create a registry. Roots are in precedence order: the first root
    /// containing a skill directory wins.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Search roots, highest precedence first.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Find a skill by name.
    ///
    /// A root where the skill directory is *absent* falls through to the
    /// next root. A root where the document exists but fails to parse stops
    /// the search with `Malformed` — a broken project-local skill must not
    /// silently resolve to a user-global one of the same name.
    pub fn find(&self, name: &str) -> Result<SkillDefinition> {
        for root in &self.roots {
            let path = root.join(name).join(SKILL_FILE);
            if !path.exists() {
                debug!(?path, "skill not present in root, trying next");
                continue;
            }
            return SkillDefinition::from_file(&path);
        }
        Err(SkillError::NotFound(name.to_string()))
    }

    /// Enumerate all discoverable skills across every root, de-duplicated by
    /// name with the first (highest-precedence) root winning, sorted by name.
    ///
    /// A malformed document is skipped with a warning rather than aborting
    /// the listing, but it still shadows same-named skills in later roots —
    /// consistent with `find`.
    pub fn list(&self) -> Result<Vec<SkillSummary>> {
        let mut summaries: Vec<SkillSummary> = Vec::new();
        let mut seen: Vec<String> = Vec::new();

        for root in &self.roots {
            if !root.is_dir() {
                debug!(?root, "skills root does not exist, skipping");
                continue;
            }
            for entry in std::fs::read_dir(root)? {
                let entry = entry?;
                let dir = entry.path();
                if !dir.is_dir() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().into_owned();
                let skill_file = dir.join(SKILL_FILE);
                if !skill_file.exists() || seen.contains(&name) {
                    continue;
                }
                seen.push(name.clone());
                match SkillDefinition::from_file(&skill_file) {
                    Ok(def) => summaries.push(SkillSummary {
                        name: def.name,
                        description: def.description,
                        inputs: def.inputs.into_iter().map(|(n, _)| n).collect(),
                        path: skill_file,
                    }),
                    Err(e) => {
                        warn!(path = ?skill_file, error = %e, "skipping malformed skill");
                    }
                }
            }
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }
}
