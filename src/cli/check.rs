//! Run selectors against JSON trees

use super::{CliError, matches_to_json, tree_from_json};
use crate::{Evaluator, TreeSelector, output::render_tree};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The selector to run
    pub selector: String,
    /// JSON tree input
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed; carries the selector in canonical form
    SyntaxValid(String),
    /// Selector evaluated, matches rendered as JSON text
    Success(String),
}

/// Execute a check operation.
///
/// Unlike [`TreeSelector::select`], which swallows malformed selectors, the
/// CLI reports them so the user can fix the text.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let ast = TreeSelector::parse(&options.selector)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid(ast.to_string()));
    }

    let input = options.input.as_deref().ok_or(CliError::NoInput)?;
    let tree = tree_from_json(input)?;

    let matches = Evaluator::new(&tree).evaluate(&ast);
    tracing::debug!(selector = %ast, matches = matches.len(), "check complete");

    let output = matches_to_json(&tree, &matches);
    let rendered = if options.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    Ok(CheckResult::Success(rendered))
}

/// Render a JSON tree for humans.
pub fn execute_tree(input: Option<&str>) -> Result<String, CliError> {
    let input = input.ok_or(CliError::NoInput)?;
    let tree = tree_from_json(input)?;
    Ok(render_tree(&tree))
}
