use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};

use skillrun_core::{Result, SkillError};

use crate::template;

/// Declared shape of one named input slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSpec {
    /// Shell command that auto-gathers this input's value when the caller
    /// does not supply one.
    pub command: Option<String>,
    pub description: String,
    pub required: bool,
}

/// Declared output format. Informational only — it does not change how the
/// skill is resolved or rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    pub format: String,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            format: "text".into(),
        }
    }
}

/// A skill definition parsed from a SKILL.md file.
///
/// Inputs keep their declaration order — the resolver walks them in order,
/// and piped-value binding depends on the declared-input count.
#[derive(Debug, Clone)]
pub struct SkillDefinition {
    /// Lookup key; always equals the containing directory's name.
    pub name: String,
    pub description: String,
    pub inputs: Vec<(String, InputSpec)>,
    pub output: OutputSpec,
    /// Prompt template body with `{{input}}` placeholders.
    pub template: String,
    /// Absolute path to the SKILL.md file.
    pub path: PathBuf,
}

/// Frontmatter block as written in SKILL.md. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct FrontMatter {
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    inputs: serde_yaml::Mapping,
    #[serde(default)]
    output: OutputSpec,
}

impl SkillDefinition {
    /// Load and validate a SKILL.md file. The skill's name is taken from the
    /// containing directory and must match the frontmatter `name`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let dir_name = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = std::fs::read_to_string(path).map_err(|e| SkillError::Malformed {
            skill: dir_name.clone(),
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        Self::parse(&content, &dir_name, path.to_path_buf())
    }

    /// Parse SKILL.md content. `expected_name` is the directory name the
    /// document was found under.
    pub fn parse(content: &str, expected_name: &str, path: PathBuf) -> Result<Self> {
        let malformed = |reason: String| SkillError::Malformed {
            skill: expected_name.to_string(),
            reason,
        };

        let (frontmatter, body) = split_frontmatter(content)
            .ok_or_else(|| malformed("missing YAML frontmatter block (--- ... ---)".into()))?;

        let meta: FrontMatter = serde_yaml::from_str(frontmatter)
            .map_err(|e| malformed(format!("invalid frontmatter: {e}")))?;

        let name = meta.name.unwrap_or_default();
        if name.is_empty() {
            return Err(malformed("missing 'name' in frontmatter".into()));
        }
        if name != expected_name {
            return Err(malformed(format!(
                "frontmatter name '{name}' does not match directory name '{expected_name}'"
            )));
        }

        let mut inputs: Vec<(String, InputSpec)> = Vec::with_capacity(meta.inputs.len());
        for (key, value) in meta.inputs {
            let input_name = key
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| malformed("input names must be strings".into()))?;
            let spec = match value {
                // Shorthand: `diff: the staged diff` declares an optional
                // input with only a description.
                serde_yaml::Value::String(description) => InputSpec {
                    description,
                    ..Default::default()
                },
                serde_yaml::Value::Null => InputSpec::default(),
                other => serde_yaml::from_value(other).map_err(|e| {
                    malformed(format!("invalid spec for input '{input_name}': {e}"))
                })?,
            };
            inputs.push((input_name, spec));
        }

        let template = body.trim().to_string();
        for placeholder in template::placeholders(&template) {
            if !inputs.iter().any(|(n, _)| *n == placeholder) {
                return Err(malformed(format!(
                    "template references undeclared input '{placeholder}'"
                )));
            }
        }

        Ok(Self {
            name,
            description: meta.description,
            inputs,
            output: meta.output,
            template,
            path,
        })
    }

    /// Look up a declared input by name.
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Declared input names, in declaration order.
    pub fn input_names(&self) -> Vec<&str> {
        self.inputs.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Structured view of the full definition, used by the tool-protocol
    /// surface and `--json` output. Inputs stay in declaration order.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputs": self.inputs.iter().map(|(name, spec)| json!({
                "name": name,
                "description": spec.description,
                "command": spec.command,
                "required": spec.required,
            })).collect::<Vec<_>>(),
            "output": { "format": self.output.format },
            "template": self.template,
            "path": self.path.display().to_string(),
        })
    }
}

/// Split a SKILL.md document into its frontmatter and body. Returns `None`
/// when there is no opening/closing `---` fence.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let trimmed = content.trim_start();
    let after_open = trimmed.strip_prefix("---")?;
    let end = after_open.find("\n---")?;
    let frontmatter = &after_open[..end];
    let body = &after_open[end + 4..];
    Some((frontmatter, body))
}
