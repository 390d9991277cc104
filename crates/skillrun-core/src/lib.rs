//! # skillrun-core
//!
//! Shared error type and result alias for the skillrun workspace. This crate
//! defines the vocabulary of failure used by every other crate: skill lookup,
//! input resolution, and the inference backend all report through [`SkillError`].

pub mod error;

pub use error::{Result, SkillError};
