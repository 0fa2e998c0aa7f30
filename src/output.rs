//! Human-readable rendering of trees and nodes.
//!
//! # Examples
//!
//! ```
//! use tree_selector::{Node, Tree};
//! use tree_selector::output::render_tree;
//!
//! let mut tree = Tree::new(Node::new("Root").with_kind("container"));
//! let child = tree.add_child(tree.root(), Node::new("Child1").with_attribute("visible", "true"));
//! tree.add_child(child, Node::new("GrandChild1"));
//! tree.add_child(tree.root(), Node::new("Child2"));
//!
//! assert_eq!(
//!     render_tree(&tree),
//!     "Root [type=container]\n\
//!      ├── Child1 {visible=true}\n\
//!      │   └── GrandChild1\n\
//!      └── Child2\n"
//! );
//! ```

use crate::tree::{Node, NodeId, Tree};

pub struct TreePrinter<'t> {
    tree: &'t Tree,
}

impl<'t> TreePrinter<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        TreePrinter { tree }
    }

    pub fn print(&self) -> String {
        let root = self.tree.root();
        let mut out = describe_node(self.tree.node(root));
        out.push('\n');
        self.print_children(root, "", &mut out);
        out
    }

    fn print_children(&self, id: NodeId, prefix: &str, out: &mut String) {
        let children = self.tree.children(id);

        for (i, &child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let (branch, continuation) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };

            out.push_str(prefix);
            out.push_str(branch);
            out.push_str(&describe_node(self.tree.node(child)));
            out.push('\n');

            self.print_children(child, &format!("{prefix}{continuation}"), out);
        }
    }
}

/// Renders the whole tree, one node per line.
pub fn render_tree(tree: &Tree) -> String {
    TreePrinter::new(tree).print()
}

/// One-line summary: name, built-in properties, then free-form attributes.
pub fn describe_node(node: &Node) -> String {
    let mut line = node.name().to_string();

    let properties: Vec<String> = [
        ("type", node.kind()),
        ("variant", node.variant()),
        ("version", node.version()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
    .collect();

    if !properties.is_empty() {
        line.push_str(&format!(" [{}]", properties.join(", ")));
    }

    if !node.attributes().is_empty() {
        let attributes: Vec<String> = node
            .attributes()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        line.push_str(&format!(" {{{}}}", attributes.join(", ")));
    }

    line
}

#[test]
fn test_describe_node_with_everything() {
    let node = Node::new("Child1")
        .with_kind("component")
        .with_variant("primary")
        .with_version("2.0.0")
        .with_attribute("visible", "true")
        .with_attribute("role", "nav");

    assert_eq!(
        describe_node(&node),
        "Child1 [type=component, variant=primary, version=2.0.0] {visible=true, role=nav}"
    );
}

#[test]
fn test_describe_bare_node() {
    assert_eq!(describe_node(&Node::new("Leaf")), "Leaf");
}
