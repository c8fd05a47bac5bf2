//! Snapshot collection.
//!
//! Runs read-only git commands against a working copy and condenses the
//! answers into a [`gitnext_core::Snapshot`]. Output parsing lives in
//! [`parse`] and [`heuristics`] so it can be tested without a repository.

mod collect;
mod error;
mod git;
pub mod heuristics;
pub mod parse;

pub use collect::{collect, CollectSettings};
pub use error::CollectError;
