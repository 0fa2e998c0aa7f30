//! Built-in sample tree and walkthrough for `treesel demo`

use crate::{
    Node, Tree, TreeSelector,
    output::{describe_node, render_tree},
};

/// Selectors shown by the demo, one per language feature.
pub const DEMO_SELECTORS: &[&str] = &[
    "/Root",
    "/Root/Child1",
    "/Root/*",
    "/Root/Child2/GrandChild2",
    "/*/Child2",
    "/*/*/*",
    "/Root/*/GrandChild1",
    "/Root/*{type=component,version=2.0.0}",
    "/Root/*/*{variant='button-alt'}",
    "/Root/Child2/~~",
    "/Root/Child2/../Child1",
    "/Root/../*",
    "**/*{type=element,variant=button}",
    "**/GrandChild1|**/GrandChild2",
];

/// The sample tree:
///
/// ```text
/// Root (container, default, 1.0.0)
/// ├── Child1 (component, primary, 2.0.0) {visible=true}
/// │   └── GrandChild1 (element, button, 3.0.0)
/// └── Child2 (component, secondary, 2.1.0) {visible=true}
///     ├── GrandChild1 (element, button-alt, 3.2.0)
///     ├── GrandChild2 (element, text, 3.0.0)
///     └── GrandChild3 (element, input, 3.1.0)
/// ```
pub fn sample_tree() -> Tree {
    let mut tree = Tree::new(
        Node::new("Root")
            .with_kind("container")
            .with_variant("default")
            .with_version("1.0.0"),
    );
    let root = tree.root();

    let child1 = tree.add_child(
        root,
        Node::new("Child1")
            .with_kind("component")
            .with_variant("primary")
            .with_version("2.0.0")
            .with_attribute("visible", "true"),
    );
    let child2 = tree.add_child(
        root,
        Node::new("Child2")
            .with_kind("component")
            .with_variant("secondary")
            .with_version("2.1.0")
            .with_attribute("visible", "true"),
    );

    tree.add_child(child1, element("GrandChild1", "button", "3.0.0"));
    tree.add_child(child2, element("GrandChild1", "button-alt", "3.2.0"));
    tree.add_child(child2, element("GrandChild2", "text", "3.0.0"));
    tree.add_child(child2, element("GrandChild3", "input", "3.1.0"));

    tree
}

fn element(name: &str, variant: &str, version: &str) -> Node {
    Node::new(name)
        .with_kind("element")
        .with_variant(variant)
        .with_version(version)
}

/// Render the sample tree followed by the result of every demo selector.
pub fn run_demo() -> String {
    let tree = sample_tree();
    let selector = TreeSelector::new(&tree);

    let mut out = String::from("SAMPLE TREE\n\n");
    out.push_str(&render_tree(&tree));

    for &text in DEMO_SELECTORS {
        let matches = selector.query(text);
        out.push_str(&format!("\n{text}\n  {} match(es)\n", matches.len()));
        for id in matches {
            out.push_str(&format!(
                "  - {}  {}\n",
                tree.path_of(id),
                describe_node(tree.node(id))
            ));
        }
    }

    out
}
