//! Shared types used across all modules.
//!
//! This module defines the core data structures for change sets and
//! analysis results. Other modules import from here rather than
//! reaching into each other's internals.

pub mod analysis;
pub mod changeset;

pub use analysis::{Analysis, TokenUsage};
pub use changeset::ChangeSet;
