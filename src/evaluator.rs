use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::{
    ast::{
        AttributeExpr, AttributeFilter, AttributeValue, DeepSelector, MultiSelector, Segment,
        SegmentKind, Selector, SelectorExpression,
    },
    tree::{Node, NodeId, Tree},
};

/// A position in the working set of a selector pipeline.
///
/// Stepping to the parent of the root lands on [`Cursor::VirtualRootParent`],
/// a level whose only child is the root. It lets `/Root/../*` surface the
/// root again and is never part of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Node(NodeId),
    VirtualRootParent,
}

impl Cursor {
    pub fn node(self) -> Option<NodeId> {
        match self {
            Cursor::Node(id) => Some(id),
            Cursor::VirtualRootParent => None,
        }
    }
}

/// Traversal state owned by a single evaluation.
///
/// `visited` is indexed by arena position and holds the traversal stamp a
/// node was last reached in, so starting a fresh traversal is a counter bump
/// instead of clearing the whole table.
#[derive(Debug)]
pub struct EvalContext {
    visited: Vec<u32>,
    stamp: u32,
}

impl EvalContext {
    pub fn new(tree: &Tree) -> Self {
        EvalContext {
            visited: vec![0; tree.len()],
            stamp: 0,
        }
    }

    /// Forget every node visited so far.
    fn begin_traversal(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.visited.fill(0);
            self.stamp = 1;
        }
    }

    /// Marks `id` as visited; false if it already was in this traversal.
    fn visit(&mut self, id: NodeId) -> bool {
        match self.visited.get_mut(id.index()) {
            Some(slot) if *slot == self.stamp => false,
            Some(slot) => {
                *slot = self.stamp;
                true
            }
            None => false,
        }
    }
}

/// Walks a [`Tree`] to find the nodes a parsed selector designates.
///
/// The evaluator itself is stateless; every call builds its own
/// [`EvalContext`], so one evaluator can serve concurrent callers.
///
/// # Examples
///
/// ```
/// use tree_selector::{Evaluator, Node, Tree};
/// use tree_selector::parser::parse;
///
/// let mut tree = Tree::new(Node::new("Root"));
/// let child = tree.add_child(tree.root(), Node::new("Child1").with_kind("component"));
///
/// let ast = parse("/Root/*{type=component}").unwrap();
/// let matches = Evaluator::new(&tree).evaluate(&ast);
/// assert_eq!(matches, vec![child]);
/// ```
pub struct Evaluator<'t> {
    tree: &'t Tree,
}

impl<'t> Evaluator<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        Evaluator { tree }
    }

    /// Evaluates every alternative and returns their union.
    ///
    /// Duplicates are removed by node identity, keeping the order in which
    /// nodes were first produced.
    pub fn evaluate(&self, selector: &MultiSelector) -> Vec<NodeId> {
        let mut ctx = EvalContext::new(self.tree);
        let mut matches = IndexSet::new();

        for alternative in &selector.alternatives {
            let found = self.eval_expression(alternative, &mut ctx);
            debug!(selector = %alternative, matches = found.len(), "evaluated alternative");
            matches.extend(found);
        }

        matches.into_iter().collect()
    }

    /// Evaluates one alternative. The result may contain duplicates.
    pub fn eval_expression(&self, expr: &SelectorExpression, ctx: &mut EvalContext) -> Vec<NodeId> {
        let cursors = match expr {
            SelectorExpression::Selector(selector) => self.eval_selector(selector, ctx),
            SelectorExpression::Deep(deep) => self.eval_deep(deep, ctx),
        };
        cursors.into_iter().filter_map(Cursor::node).collect()
    }

    fn eval_selector(&self, selector: &Selector, ctx: &mut EvalContext) -> Vec<Cursor> {
        let initial = self.root_step(&selector.root.kind, ctx);
        let current = self.apply_filter(initial, selector.root.filter.as_ref());
        self.eval_path(current, &selector.path, ctx)
    }

    fn eval_deep(&self, deep: &DeepSelector, ctx: &mut EvalContext) -> Vec<Cursor> {
        let root = self.tree.root();
        let mut everything = vec![];
        ctx.begin_traversal();
        self.collect_subtree(root, ctx, &mut everything);

        let candidates = everything
            .into_iter()
            .filter(|&id| match &deep.first.kind {
                SegmentKind::Named(name) => self.tree.node(id).name() == name,
                SegmentKind::Wildcard | SegmentKind::Current => true,
                SegmentKind::Placeholder => id != root,
                SegmentKind::Parent => !self.tree.children(id).is_empty(),
            })
            .map(Cursor::Node)
            .collect();

        let current = self.apply_filter(candidates, deep.first.filter.as_ref());
        self.eval_path(current, &deep.path, ctx)
    }

    fn eval_path(
        &self,
        mut current: Vec<Cursor>,
        path: &[Segment],
        ctx: &mut EvalContext,
    ) -> Vec<Cursor> {
        for segment in path {
            if current.is_empty() {
                break;
            }
            let next = self.step(&current, &segment.kind, ctx);
            current = self.apply_filter(next, segment.filter.as_ref());
            trace!(segment = %segment, size = current.len(), "applied segment");
        }
        current
    }

    /// Initial working set for the first segment of an anchored selector.
    fn root_step(&self, kind: &SegmentKind, ctx: &mut EvalContext) -> Vec<Cursor> {
        let root = self.tree.root();
        match kind {
            SegmentKind::Named(name) => {
                if self.tree.node(root).name() == name {
                    vec![Cursor::Node(root)]
                } else {
                    vec![]
                }
            }
            SegmentKind::Wildcard | SegmentKind::Current => vec![Cursor::Node(root)],
            SegmentKind::Placeholder => {
                let mut descendants = vec![];
                ctx.begin_traversal();
                self.collect_descendants(root, ctx, &mut descendants);
                descendants.into_iter().map(Cursor::Node).collect()
            }
            // The root has no parent
            SegmentKind::Parent => vec![],
        }
    }

    /// Transforms the working set by one path segment.
    fn step(&self, current: &[Cursor], kind: &SegmentKind, ctx: &mut EvalContext) -> Vec<Cursor> {
        let mut next = vec![];

        for &cursor in current {
            let id = match cursor {
                Cursor::Node(id) => id,
                Cursor::VirtualRootParent => {
                    self.step_from_virtual_parent(kind, ctx, &mut next);
                    continue;
                }
            };

            match kind {
                SegmentKind::Named(name) => next.extend(
                    self.tree
                        .children(id)
                        .iter()
                        .filter(|&&child| self.tree.node(child).name() == name)
                        .map(|&child| Cursor::Node(child)),
                ),
                SegmentKind::Wildcard => {
                    next.extend(self.tree.children(id).iter().map(|&child| Cursor::Node(child)));
                }
                SegmentKind::Placeholder => {
                    let mut descendants = vec![];
                    ctx.begin_traversal();
                    self.collect_descendants(id, ctx, &mut descendants);
                    next.extend(descendants.into_iter().map(Cursor::Node));
                }
                SegmentKind::Current => next.push(cursor),
                SegmentKind::Parent => next.push(match self.tree.parent(id) {
                    Some(parent) => Cursor::Node(parent),
                    None => Cursor::VirtualRootParent,
                }),
            }
        }

        next
    }

    /// The virtual level above the root has the root as its only child.
    fn step_from_virtual_parent(
        &self,
        kind: &SegmentKind,
        ctx: &mut EvalContext,
        next: &mut Vec<Cursor>,
    ) {
        let root = self.tree.root();
        match kind {
            SegmentKind::Named(name) => {
                if self.tree.node(root).name() == name {
                    next.push(Cursor::Node(root));
                }
            }
            SegmentKind::Wildcard => next.push(Cursor::Node(root)),
            SegmentKind::Placeholder => {
                let mut everything = vec![];
                ctx.begin_traversal();
                self.collect_subtree(root, ctx, &mut everything);
                next.extend(everything.into_iter().map(Cursor::Node));
            }
            SegmentKind::Current => next.push(Cursor::VirtualRootParent),
            SegmentKind::Parent => {}
        }
    }

    fn apply_filter(&self, cursors: Vec<Cursor>, filter: Option<&AttributeFilter>) -> Vec<Cursor> {
        let Some(filter) = filter else {
            return cursors;
        };

        cursors
            .into_iter()
            .filter(|cursor| match cursor {
                Cursor::Node(id) => matches_filter(self.tree.node(*id), filter),
                Cursor::VirtualRootParent => filter.is_wildcard_only(),
            })
            .collect()
    }

    /// Pre-order walk of `start` and everything below it.
    fn collect_subtree(&self, start: NodeId, ctx: &mut EvalContext, out: &mut Vec<NodeId>) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if !ctx.visit(id) {
                continue;
            }
            out.push(id);
            stack.extend(self.tree.children(id).iter().rev());
        }
    }

    /// Pre-order walk of everything below `start`, excluding `start`.
    fn collect_descendants(&self, start: NodeId, ctx: &mut EvalContext, out: &mut Vec<NodeId>) {
        for &child in self.tree.children(start) {
            self.collect_subtree(child, ctx, out);
        }
    }
}

/// True if `node` satisfies every expression in `filter`.
pub fn matches_filter(node: &Node, filter: &AttributeFilter) -> bool {
    filter.exprs.iter().all(|expr| matches_expr(node, expr))
}

fn matches_expr(node: &Node, expr: &AttributeExpr) -> bool {
    let expected = match &expr.value {
        AttributeValue::Any => return true,
        AttributeValue::Literal(value) => value.as_str(),
    };

    let actual = match expr.key.as_str() {
        "type" => node.kind(),
        "variant" => node.variant(),
        "version" => node.version(),
        key => node.attribute(key),
    };

    actual == Some(expected)
}
