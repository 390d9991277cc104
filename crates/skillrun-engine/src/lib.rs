//! # skillrun-engine
//!
//! The shared pipeline behind both front ends: look up a skill, resolve its
//! inputs, render the prompt, call the inference backend. The CLI and the
//! tool-protocol server are thin adapters over [`Dispatcher`] — no run/list/
//! show logic lives in either surface.

mod gather;

pub mod dispatcher;
pub mod resolver;

pub use dispatcher::{Dispatcher, RunOutcome};
pub use resolver::{resolve, ResolvedInputs};
