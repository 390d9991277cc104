use thiserror::Error;

/// Unified error type for the skillrun workspace.
#[derive(Error, Debug)]
pub enum SkillError {
    // ── Lookup errors ──────────────────────────────────────────
    #[error("skill not found: {0}")]
    NotFound(String),

    #[error("malformed skill '{skill}': {reason}")]
    Malformed { skill: String, reason: String },

    // ── Resolution errors ──────────────────────────────────────
    #[error("missing required input '{input}' for skill '{skill}' and no way to auto-gather it")]
    MissingRequiredInput { skill: String, input: String },

    #[error(
        "cannot bind piped value: skill '{skill}' declares {inputs} inputs, piping requires exactly one"
    )]
    AmbiguousPipeTarget { skill: String, inputs: usize },

    // ── Backend errors ─────────────────────────────────────────
    #[error("inference backend error: {0}")]
    Backend(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl SkillError {
    /// Short machine-readable kind tag, used in structured tool-protocol
    /// error results.
    pub fn kind(&self) -> &'static str {
        match self {
            SkillError::NotFound(_) => "not_found",
            SkillError::Malformed { .. } => "malformed_skill",
            SkillError::MissingRequiredInput { .. } => "missing_required_input",
            SkillError::AmbiguousPipeTarget { .. } => "ambiguous_pipe_target",
            SkillError::Backend(_) => "backend_failure",
            SkillError::Config(_) => "config",
            SkillError::Io(_) => "io",
            SkillError::Serialization(_) => "serialization",
            SkillError::Other(_) => "other",
        }
    }

    /// Stable process exit code for the command-line surface.
    ///
    /// - `2` — skill not found
    /// - `3` — input or resolution error (malformed skill, missing required
    ///   input, ambiguous pipe target)
    /// - `4` — inference backend failure
    /// - `1` — anything else
    pub fn exit_code(&self) -> i32 {
        match self {
            SkillError::NotFound(_) => 2,
            SkillError::Malformed { .. }
            | SkillError::MissingRequiredInput { .. }
            | SkillError::AmbiguousPipeTarget { .. } => 3,
            SkillError::Backend(_) => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SkillError::NotFound("x".into()).exit_code(), 2);
        assert_eq!(
            SkillError::MissingRequiredInput {
                skill: "s".into(),
                input: "i".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            SkillError::AmbiguousPipeTarget {
                skill: "s".into(),
                inputs: 3
            }
            .exit_code(),
            3
        );
        assert_eq!(SkillError::Backend("boom".into()).exit_code(), 4);
        assert_eq!(SkillError::Config("bad".into()).exit_code(), 1);
    }

    #[test]
    fn error_messages_name_the_offender() {
        let err = SkillError::MissingRequiredInput {
            skill: "commit-messager".into(),
            input: "diff".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("diff"));
        assert!(msg.contains("commit-messager"));
    }
}
