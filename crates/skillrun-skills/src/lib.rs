//! # skillrun-skills
//!
//! Skill definitions and the registry that finds them.
//!
//! A skill is a directory containing a `SKILL.md` file: YAML frontmatter
//! declaring the skill's name, description, and typed input slots, followed
//! by a prompt template body with `{{input}}` placeholders.
//!
//! ## SKILL.md format
//!
//! ```markdown
//! ---
//! name: commit-messager
//! description: Write a commit message for the staged changes
//! inputs:
//!   diff:
//!     command: git diff --cached
//!     description: The staged diff
//!     required: false
//! output:
//!   format: text
//! ---
//!
//! Write a conventional commit message for this diff:
//!
//! {{diff}}
//! ```
//!
//! Skills are looked up by name across an ordered list of roots
//! (project-local first, then user-global) under the fixed convention
//! `<root>/<name>/SKILL.md`. A root that *has* the skill but cannot parse it
//! stops the search — the registry only falls through on absence.

pub mod definition;
pub mod registry;
pub mod template;

pub use definition::{InputSpec, OutputSpec, SkillDefinition};
pub use registry::{Registry, SkillSummary, SKILL_FILE};
