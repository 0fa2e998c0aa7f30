//! # Tree Selector Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for the
//! tree selector language, a path-expression language for picking nodes out
//! of a labeled tree, in the spirit of XPath or CSS selectors.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[selector]** - Selector expressions, segments and attribute filters
//!
//! ## Quick Start
//!
//! ```text
//! /Root/*{type=component}/GrandChild1
//! ```
//!
//! Starting at the root named `Root`, take every child whose type is
//! `component`, then every child of those named `GrandChild1`.
//!
//! ## Core Concepts
//!
//! ### Anchored Paths
//!
//! A selector starts with `/` and names the root, then walks down one level
//! per `/`-separated segment:
//!
//! ```text
//! /Root/Child2/GrandChild2
//! ```
//!
//! ### Segment Kinds
//!
//! - **Name** `Child1` - direct children with that name
//! - **Wildcard** `*` - all direct children
//! - **Placeholder** `~~` - all descendants
//! - **Current** `.` - stay on the current level
//! - **Parent** `..` - move up one level
//!
//! ### Deep Selectors
//!
//! A selector starting with `**/` matches its first segment against every
//! node in the tree instead of only the root:
//!
//! ```text
//! **/*{variant=secondary}
//! ```
//!
//! ### Attribute Filters
//!
//! A `{key=value, ...}` block directly after a segment keeps only the nodes
//! matching every pair. `type`, `variant` and `version` address the node's
//! built-in properties; any other key addresses a free-form attribute. A
//! value of `*` matches anything, including an absent property.
//!
//! ### Alternation
//!
//! `|` joins independent selectors; their results are unioned and
//! deduplicated by node identity:
//!
//! ```text
//! /Root/Child1|/Root/*{variant=secondary}
//! ```
pub mod selector;
pub mod tokens;

pub use selector::{
    AttributeExpr, AttributeFilter, AttributeValue, DeepSelector, MultiSelector, Segment,
    SegmentKind, Selector, SelectorExpression,
};
pub use tokens::Token;
