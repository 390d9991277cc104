//! # skillrun-config
//!
//! Configuration system for skillrun. Reads from `skillrun.toml`, then
//! environment variables, then CLI overrides — in that precedence order.
//! Every section has defaults, so a missing config file is not an error.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{BackendConfig, LoggingConfig, ResolveConfig, SkillrunConfig, SkillsConfig};
