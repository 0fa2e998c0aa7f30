//! JSON <-> Tree conversion utilities

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::json;

use super::CliError;
use crate::{Node, NodeId, Tree};

/// Serialized form of a node and its subtree.
///
/// ```json
/// {
///   "name": "Root",
///   "type": "container",
///   "variant": "default",
///   "version": "1.0.0",
///   "attributes": {"visible": "true"},
///   "children": []
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Splits a serialized node into the node itself and its serialized children.
    fn into_parts(self) -> Result<(Node, Vec<NodeSpec>), CliError> {
        if self.name.is_empty() {
            return Err(CliError::InvalidTree("node name must not be empty".to_string()));
        }

        let mut node = Node::new(self.name);
        if let Some(kind) = self.kind {
            node = node.with_kind(kind);
        }
        if let Some(variant) = self.variant {
            node = node.with_variant(variant);
        }
        if let Some(version) = self.version {
            node = node.with_version(version);
        }
        for (key, value) in self.attributes {
            node = node.with_attribute(key, value);
        }

        Ok((node, self.children))
    }
}

/// Build a tree from its serialized root.
pub fn tree_from_spec(spec: NodeSpec) -> Result<Tree, CliError> {
    let (root, children) = spec.into_parts()?;
    let mut tree = Tree::new(root);

    let mut pending: Vec<(NodeId, Vec<NodeSpec>)> = vec![(tree.root(), children)];
    while let Some((parent, specs)) = pending.pop() {
        for spec in specs {
            let (node, grandchildren) = spec.into_parts()?;
            let id = tree.add_child(parent, node);
            pending.push((id, grandchildren));
        }
    }

    Ok(tree)
}

/// Parse a JSON document into a tree.
pub fn tree_from_json(input: &str) -> Result<Tree, CliError> {
    let spec: NodeSpec = serde_json::from_str(input)?;
    tree_from_spec(spec)
}

/// Convert matches to a JSON array, one object per node.
pub fn matches_to_json(tree: &Tree, matches: &[NodeId]) -> serde_json::Value {
    let records = matches
        .iter()
        .map(|&id| {
            let node = tree.node(id);
            json!({
                "path": tree.path_of(id),
                "name": node.name(),
                "type": node.kind(),
                "variant": node.variant(),
                "version": node.version(),
                "attributes": node.attributes(),
            })
        })
        .collect();

    serde_json::Value::Array(records)
}
