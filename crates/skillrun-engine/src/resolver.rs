//! Input resolution.
//!
//! Each declared input is resolved independently, in declaration order:
//!
//! 1. an explicit override is used verbatim;
//! 2. a piped value binds to the sole input of a single-input skill;
//! 3. an auto-gather command supplies the value when it exits zero;
//! 4. a still-unresolved required input is an error;
//! 5. everything else binds to the empty string.

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use skillrun_core::{Result, SkillError};
use skillrun_skills::SkillDefinition;

use crate::gather;

/// Final mapping of input name to value. Computed once per invocation and
/// immutable afterwards.
pub type ResolvedInputs = HashMap<String, String>;

/// Resolve every declared input of a skill.
///
/// Gather commands run synchronously in declaration order with the
/// invocation's working directory and inherited environment; their failures
/// are soft (see [`crate::gather`]). Whether piping to this skill is legal
/// at all is the dispatcher's concern — here the piped value is only
/// consulted for single-input skills, per rule 2.
pub async fn resolve(
    skill: &SkillDefinition,
    overrides: &HashMap<String, String>,
    piped: Option<&str>,
    cwd: &Path,
    command_timeout_secs: u64,
) -> Result<ResolvedInputs> {
    let mut resolved = ResolvedInputs::with_capacity(skill.inputs.len());
    let single_input = skill.inputs.len() == 1;

    for (name, spec) in &skill.inputs {
        if let Some(value) = overrides.get(name) {
            debug!(input = %name, "using explicit override");
            resolved.insert(name.clone(), value.clone());
            continue;
        }

        if single_input {
            if let Some(value) = piped {
                debug!(input = %name, "binding piped value");
                resolved.insert(name.clone(), value.to_string());
                continue;
            }
        }

        if let Some(command) = &spec.command {
            if let Some(value) = gather::gather(name, command, cwd, command_timeout_secs).await {
                resolved.insert(name.clone(), value);
                continue;
            }
        }

        if spec.required {
            return Err(SkillError::MissingRequiredInput {
                skill: skill.name.clone(),
                input: name.clone(),
            });
        }

        resolved.insert(name.clone(), String::new());
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillrun_skills::{InputSpec, OutputSpec};
    use std::path::PathBuf;

    fn skill(inputs: Vec<(&str, InputSpec)>) -> SkillDefinition {
        SkillDefinition {
            name: "test-skill".into(),
            description: String::new(),
            inputs: inputs
                .into_iter()
                .map(|(n, s)| (n.to_string(), s))
                .collect(),
            output: OutputSpec::default(),
            template: String::new(),
            path: PathBuf::new(),
        }
    }

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn cwd() -> PathBuf {
        std::env::temp_dir()
    }

    #[tokio::test]
    async fn no_required_no_commands_binds_all_empty() {
        let skill = skill(vec![
            ("a", InputSpec::default()),
            ("b", InputSpec::default()),
        ]);
        let resolved = resolve(&skill, &HashMap::new(), None, &cwd(), 10)
            .await
            .unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["a"], "");
        assert_eq!(resolved["b"], "");
    }

    #[tokio::test]
    async fn override_beats_command() {
        let skill = skill(vec![(
            "x",
            InputSpec {
                command: Some("echo from-command".into()),
                ..Default::default()
            },
        )]);
        let resolved = resolve(&skill, &overrides(&[("x", "from-caller")]), None, &cwd(), 10)
            .await
            .unwrap();
        assert_eq!(resolved["x"], "from-caller");
    }

    #[tokio::test]
    async fn override_beats_piped_value() {
        let skill = skill(vec![("x", InputSpec::default())]);
        let resolved = resolve(
            &skill,
            &overrides(&[("x", "explicit")]),
            Some("piped"),
            &cwd(),
            10,
        )
        .await
        .unwrap();
        assert_eq!(resolved["x"], "explicit");
    }

    #[tokio::test]
    async fn piped_value_binds_to_sole_input() {
        let skill = skill(vec![("x", InputSpec::default())]);
        let resolved = resolve(&skill, &HashMap::new(), Some("piped text"), &cwd(), 10)
            .await
            .unwrap();
        assert_eq!(resolved["x"], "piped text");
    }

    #[tokio::test]
    async fn piped_value_skips_the_gather_command() {
        // Command would fail; the piped value must win before it runs.
        let skill = skill(vec![(
            "x",
            InputSpec {
                command: Some("false".into()),
                required: true,
                ..Default::default()
            },
        )]);
        let resolved = resolve(&skill, &HashMap::new(), Some("piped"), &cwd(), 10)
            .await
            .unwrap();
        assert_eq!(resolved["x"], "piped");
    }

    #[tokio::test]
    async fn command_supplies_value() {
        let skill = skill(vec![
            (
                "x",
                InputSpec {
                    command: Some("echo gathered".into()),
                    ..Default::default()
                },
            ),
            ("y", InputSpec::default()),
        ]);
        let resolved = resolve(&skill, &HashMap::new(), None, &cwd(), 10)
            .await
            .unwrap();
        assert_eq!(resolved["x"], "gathered");
        assert_eq!(resolved["y"], "");
    }

    #[tokio::test]
    async fn failed_command_on_optional_input_binds_empty() {
        let skill = skill(vec![(
            "x",
            InputSpec {
                command: Some("false".into()),
                required: false,
                ..Default::default()
            },
        )]);
        // Two inputs would disable pipe binding; keep one input but no pipe.
        let resolved = resolve(&skill, &HashMap::new(), None, &cwd(), 10)
            .await
            .unwrap();
        assert_eq!(resolved["x"], "");
    }

    #[tokio::test]
    async fn failed_command_on_required_input_is_missing() {
        let skill = skill(vec![
            (
                "x",
                InputSpec {
                    command: Some("false".into()),
                    required: true,
                    ..Default::default()
                },
            ),
            ("pad", InputSpec::default()),
        ]);
        let err = resolve(&skill, &HashMap::new(), None, &cwd(), 10)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SkillError::MissingRequiredInput { ref input, .. } if input == "x"
        ));
    }

    #[tokio::test]
    async fn required_without_any_source_is_missing() {
        let skill = skill(vec![(
            "x",
            InputSpec {
                required: true,
                ..Default::default()
            },
        )]);
        let err = resolve(&skill, &HashMap::new(), None, &cwd(), 10)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SkillError::MissingRequiredInput { ref input, ref skill } if input == "x" && skill == "test-skill"
        ));
    }

    #[tokio::test]
    async fn empty_command_output_resolves_optional_input() {
        // `git diff --cached` with nothing staged: success, empty stdout.
        let skill = skill(vec![(
            "diff",
            InputSpec {
                command: Some("true".into()),
                required: false,
                ..Default::default()
            },
        )]);
        let resolved = resolve(&skill, &HashMap::new(), None, &cwd(), 10)
            .await
            .unwrap();
        assert_eq!(resolved["diff"], "");
    }

    #[tokio::test]
    async fn piped_value_not_consulted_for_multi_input_skills() {
        let skill = skill(vec![
            ("a", InputSpec::default()),
            ("b", InputSpec::default()),
        ]);
        // The dispatcher rejects this combination before calling resolve;
        // if called anyway, the pipe must simply be ignored.
        let resolved = resolve(&skill, &HashMap::new(), Some("piped"), &cwd(), 10)
            .await
            .unwrap();
        assert_eq!(resolved["a"], "");
        assert_eq!(resolved["b"], "");
    }
}
