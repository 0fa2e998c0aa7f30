use indexmap::IndexMap;

/// Handle to a node stored in a [`Tree`].
///
/// Node identity is handle identity: two nodes with identical fields are
/// still distinct matches if their ids differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A labeled tree node.
///
/// Nodes are built by the owning application and never mutated by the
/// selector engine. `children` and `parent` are maintained by [`Tree`].
///
/// # Examples
///
/// ```
/// use tree_selector::Node;
///
/// let node = Node::new("Child1")
///     .with_kind("component")
///     .with_variant("primary")
///     .with_version("2.0.0")
///     .with_attribute("visible", "true");
///
/// assert_eq!(node.kind(), Some("component"));
/// assert_eq!(node.attribute("visible"), Some("true"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    kind: Option<String>,
    variant: Option<String>,
    version: Option<String>,
    attributes: IndexMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            kind: None,
            variant: None,
            version: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a free-form attribute. A repeated key replaces the earlier value.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's classifier, matched by `type=` in attribute filters.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// An arena-backed, single-rooted tree.
///
/// The arena only grows and a child is always attached to an existing node,
/// so every tree built through this API is acyclic.
///
/// # Examples
///
/// ```
/// use tree_selector::{Node, Tree};
///
/// let mut tree = Tree::new(Node::new("Root"));
/// let child = tree.add_child(tree.root(), Node::new("Child1"));
/// let grandchild = tree.add_child(child, Node::new("GrandChild1"));
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.parent(grandchild), Some(child));
/// assert_eq!(tree.path_of(grandchild), "/Root/Child1/GrandChild1");
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(mut root: Node) -> Self {
        root.parent = None;
        root.children.clear();
        Tree { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attaches `child` as the last child of `parent` and returns its id.
    ///
    /// Any children or parent already recorded on `child` are discarded; the
    /// tree is the only owner of structure.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, mut child: Node) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "parent {parent:?} is not in this tree");

        let id = NodeId(self.nodes.len());
        child.parent = Some(parent);
        child.children.clear();
        self.nodes.push(child);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Looks up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or_default()
    }

    /// Absolute path of a node, built from names along its parent chain.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            let Some(node) = self.get(node_id) else {
                break;
            };
            names.push(node.name());
            current = node.parent();
        }

        names.iter().rev().fold(String::new(), |mut path, name| {
            path.push('/');
            path.push_str(name);
            path
        })
    }
}
