//! CLI support for tree-selector
//!
//! Provides programmatic access to the `treesel` commands so they can be
//! embedded in other tools without going through a process boundary.

mod check;
mod convert;
mod demo;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check, execute_tree};
pub use convert::{NodeSpec, matches_to_json, tree_from_json, tree_from_spec};
pub use demo::{DEMO_SELECTORS, run_demo, sample_tree};
pub use docs::get_syntax_reference;

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Selector text failed to parse
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Input is not valid JSON or not shaped like a tree
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is valid JSON but breaks a tree invariant
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe a JSON tree to stdin.")]
    NoInput,
}
