//! Query facade: selector text in, matching nodes out.
//!
//! [`TreeSelector::select`] sequences lex, parse and evaluation. Malformed
//! selector text is never an error for the caller: it is reported as a
//! `tracing` warning and produces no matches. The only error is absent
//! selector text.

use tracing::warn;

use crate::{
    ast::MultiSelector,
    evaluator::Evaluator,
    lexer::Lexer,
    parser::{ParseError, Parser},
    tree::{Node, NodeId, Tree},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// A required argument was not provided
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Selects nodes of one tree.
///
/// # Examples
///
/// ```
/// use tree_selector::{Node, Tree, TreeSelector};
///
/// let mut tree = Tree::new(Node::new("Root").with_kind("container"));
/// let root = tree.root();
/// let child1 = tree.add_child(root, Node::new("Child1").with_variant("primary"));
/// let child2 = tree.add_child(root, Node::new("Child2").with_variant("secondary"));
///
/// let selector = TreeSelector::new(&tree);
/// assert_eq!(selector.select(Some("/Root/*")).unwrap(), vec![child1, child2]);
/// assert_eq!(selector.select(Some("/Root/*{variant=primary}")).unwrap(), vec![child1]);
/// assert!(selector.select(Some("Root")).unwrap().is_empty());
/// assert!(selector.select(None).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeSelector<'t> {
    tree: &'t Tree,
}

impl<'t> TreeSelector<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        TreeSelector { tree }
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    /// Returns the nodes designated by `text`, deduplicated by identity.
    ///
    /// Callers must not rely on the order of the result.
    ///
    /// # Errors
    ///
    /// [`SelectError::InvalidArgument`] if `text` is `None`. Empty or
    /// malformed text yields `Ok` with no matches.
    pub fn select(&self, text: Option<&str>) -> Result<Vec<NodeId>, SelectError> {
        let text = text.ok_or(SelectError::InvalidArgument("selector text is absent"))?;
        Ok(self.query(text))
    }

    /// Like [`TreeSelector::select`] for text that is known to be present.
    pub fn query(&self, text: &str) -> Vec<NodeId> {
        if text.is_empty() {
            return vec![];
        }

        match Self::parse(text) {
            Ok(ast) => Evaluator::new(self.tree).evaluate(&ast),
            Err(e) => {
                warn!(selector = text, error = %e, "invalid selector, no nodes selected");
                vec![]
            }
        }
    }

    /// Like [`TreeSelector::select`], resolving ids to nodes.
    pub fn select_nodes(&self, text: Option<&str>) -> Result<Vec<&'t Node>, SelectError> {
        let ids = self.select(text)?;
        Ok(ids.into_iter().map(|id| self.tree.node(id)).collect())
    }

    /// Parses selector text without evaluating it.
    ///
    /// Alternatives of a `|`-joined selector that fail to parse are skipped
    /// with a warning.
    pub fn parse(text: &str) -> Result<MultiSelector, ParseError> {
        let mut parser = Parser::new(Lexer::new(text))?;
        let ast = parser.parse_multi_selector()?;

        for skipped in parser.recovered() {
            warn!(selector = text, error = %skipped, "skipped invalid alternative");
        }

        Ok(ast)
    }
}
