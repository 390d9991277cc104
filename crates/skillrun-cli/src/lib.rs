//! # skillrun-cli
//!
//! Command-line interface for the skill runner.
//!
//! ## Commands
//!
//! - `skillrun run <name>` — Resolve inputs, render the prompt, call the model
//! - `skillrun list` — List discoverable skills across search roots
//! - `skillrun show <name>` — Inspect a skill without running it
//! - `skillrun create <name>` — Scaffold a new SKILL.md in the project root
//! - `skillrun serve` — Run the tool-protocol server over stdio
//! - `skillrun config` — Show the effective configuration

pub mod commands;

pub use commands::Cli;
