use rstest::rstest;
use tree_selector::{Node, NodeId, SelectError, Tree, TreeSelector, cli::sample_tree};

/// Absolute paths of the matches, sorted so order does not matter.
fn select_paths(tree: &Tree, selector: &str) -> Vec<String> {
    let matches = TreeSelector::new(tree).select(Some(selector)).unwrap();
    let mut paths: Vec<String> = matches.iter().map(|&id| tree.path_of(id)).collect();
    paths.sort();
    paths
}

fn assert_selects(selector: &str, expected: &[&str]) {
    let tree = sample_tree();
    let mut expected = expected.to_vec();
    expected.sort();
    assert_eq!(
        select_paths(&tree, selector),
        expected,
        "Failed for selector: {}",
        selector
    );
}

fn sorted(mut ids: Vec<NodeId>) -> Vec<NodeId> {
    ids.sort();
    ids
}

// ============================================================================
// Basic paths
// ============================================================================

#[rstest]
#[case("/Root", &["/Root"])]
#[case("/Root/Child1", &["/Root/Child1"])]
#[case("/Root/NonExistentChild", &[])]
#[case("/Root/Child2/GrandChild2", &["/Root/Child2/GrandChild2"])]
#[case("/NotRoot", &[])]
fn test_basic_paths(#[case] selector: &str, #[case] expected: &[&str]) {
    assert_selects(selector, expected);
}

#[test]
fn test_same_name_children_are_distinct_matches() {
    let mut tree = sample_tree();
    let root = tree.root();
    tree.add_child(root, Node::new("Child1").with_kind("component"));

    let matches = TreeSelector::new(&tree).select(Some("/Root/Child1")).unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|&id| tree.node(id).name() == "Child1"));
}

#[test]
fn test_root_name_selects_exactly_root() {
    for tree in [sample_tree(), Tree::new(Node::new("Solo"))] {
        let root_name = tree.node(tree.root()).name().to_string();
        let matches = TreeSelector::new(&tree)
            .select(Some(format!("/{}", root_name).as_str()))
            .unwrap();
        assert_eq!(matches, vec![tree.root()]);
    }
}

// ============================================================================
// Error and empty-result contract
// ============================================================================

#[test]
fn test_absent_selector_is_invalid_argument() {
    let tree = sample_tree();
    let result = TreeSelector::new(&tree).select(None);
    assert!(matches!(result, Err(SelectError::InvalidArgument(_))));
}

#[test]
fn test_empty_selector_selects_nothing() {
    let tree = sample_tree();
    assert_eq!(TreeSelector::new(&tree).select(Some("")), Ok(vec![]));
}

#[rstest]
#[case("Root/Child1")]
#[case("NoSlashPrefix")]
#[case("/Root/")]
#[case("/Root/*{type}")]
#[case("/Root/*{}")]
#[case("/Root/~")]
#[case("/Root/*{variant='unterminated}")]
#[case("**Child1")]
#[case("|")]
fn test_malformed_selector_selects_nothing(#[case] selector: &str) {
    let tree = sample_tree();
    assert_eq!(TreeSelector::new(&tree).select(Some(selector)), Ok(vec![]));
}

// ============================================================================
// Wildcards
// ============================================================================

#[rstest]
#[case("/Root/*", &["/Root/Child1", "/Root/Child2"])]
#[case("/*/Child2", &["/Root/Child2"])]
#[case("/*/*/GrandChild2", &["/Root/Child2/GrandChild2"])]
#[case("/*", &["/Root"])]
#[case(
    "/*/*/*",
    &[
        "/Root/Child1/GrandChild1",
        "/Root/Child2/GrandChild1",
        "/Root/Child2/GrandChild2",
        "/Root/Child2/GrandChild3",
    ]
)]
#[case("/Root/*/GrandChild1", &["/Root/Child1/GrandChild1", "/Root/Child2/GrandChild1"])]
fn test_wildcards(#[case] selector: &str, #[case] expected: &[&str]) {
    assert_selects(selector, expected);
}

// ============================================================================
// Attribute filters
// ============================================================================

#[rstest]
#[case("/Root/*{type=component}", &["/Root/Child1", "/Root/Child2"])]
#[case("/Root/Child2{type=component}", &["/Root/Child2"])]
#[case("/Root/Child2{type=foo}", &[])]
#[case("/Root/*{'type'='component'}", &["/Root/Child1", "/Root/Child2"])]
#[case("/Root/*{variant=primary}", &["/Root/Child1"])]
#[case("/Root/*{visible=true}", &["/Root/Child1", "/Root/Child2"])]
#[case("/Root/*{hidden=true}", &[])]
#[case(
    "/Root/*{type=component}/GrandChild1",
    &["/Root/Child1/GrandChild1", "/Root/Child2/GrandChild1"]
)]
#[case("/*{type=container}/*/*{variant=button}", &["/Root/Child1/GrandChild1"])]
fn test_attribute_filters(#[case] selector: &str, #[case] expected: &[&str]) {
    assert_selects(selector, expected);
}

#[rstest]
#[case("/Root/*{type=component, variant=primary}", &["/Root/Child1"])]
#[case("/Root/*{type=component, variant=unknown}", &[])]
#[case("/Root/*{type=component, visible=true, variant=secondary}", &["/Root/Child2"])]
#[case("/Root/*{version=2.0.0, type=component}", &["/Root/Child1"])]
#[case("/Root/*{'type'='component', 'variant'='primary'}", &["/Root/Child1"])]
#[case("/Root/*{type=component,version=2.0.0}", &["/Root/Child1"])]
#[case(
    "/*{type=container}/Child2/*{type=element, version=3.0.0}",
    &["/Root/Child2/GrandChild2"]
)]
#[case(
    "/Root{type=container}/Child2{type=component,version='2.1.0'}/GrandChild1{variant='button-alt'}",
    &["/Root/Child2/GrandChild1"]
)]
fn test_multiple_attribute_filters(#[case] selector: &str, #[case] expected: &[&str]) {
    assert_selects(selector, expected);
}

#[rstest]
#[case("/Root/*{version=2.0.0}", &["/Root/Child1"])]
#[case("/Root/*{version=2.1.0}", &["/Root/Child2"])]
#[case("/Root/*{version=2}", &[])]
#[case("/*/*{version=2.1.0}/*{version=3.0.0}", &["/Root/Child2/GrandChild2"])]
#[case("/Root/*{'version'='2.0.0'}", &["/Root/Child1"])]
#[case("/*/*/*{version=3.0.0}", &["/Root/Child1/GrandChild1", "/Root/Child2/GrandChild2"])]
#[case(
    "/Root{version=1.0.0}/Child2{version=2.1.0}/GrandChild1{version=3.2.0}",
    &["/Root/Child2/GrandChild1"]
)]
fn test_version_filters(#[case] selector: &str, #[case] expected: &[&str]) {
    assert_selects(selector, expected);
}

#[test]
fn test_version_requires_node_version() {
    let mut tree = Tree::new(Node::new("Root"));
    tree.add_child(tree.root(), Node::new("Unversioned"));
    let child = tree.add_child(tree.root(), Node::new("Versioned").with_version("3.5.0"));

    let selector = TreeSelector::new(&tree);
    assert_eq!(selector.query("/Root/*{version=3.5.0}"), vec![child]);
    assert_eq!(selector.query("/Root/*{version=*}").len(), 2);
}

#[test]
fn test_bare_value_with_leading_dash() {
    let mut tree = Tree::new(Node::new("Root"));
    let shifted = tree.add_child(tree.root(), Node::new("C").with_attribute("offset", "-1"));
    tree.add_child(tree.root(), Node::new("D").with_attribute("offset", "1"));

    let selector = TreeSelector::new(&tree);
    assert_eq!(selector.query("/Root/*{offset=-1}"), vec![shifted]);
    assert_eq!(selector.query("/Root/*{offset='-1'}"), vec![shifted]);
    assert_eq!(selector.query("/Root/-1"), vec![]);
}

#[rstest]
#[case("/Root/*{type=*}", "/Root/*")]
#[case("/Root/*{type=component,version=*}", "/Root/*{type=component}")]
#[case("/Root/*{type=*,variant=*,version=*}", "/Root/*")]
#[case("/Root/*{'type'='*','variant'='primary'}", "/Root/*{variant=primary}")]
fn test_wildcard_value_is_idempotent(#[case] with_wildcard: &str, #[case] without: &str) {
    let tree = sample_tree();
    assert_eq!(
        select_paths(&tree, with_wildcard),
        select_paths(&tree, without)
    );
}

#[rstest]
#[case("/Root/*{type=component,variant=*,version=2.0.0}", &["/Root/Child1"])]
#[case("/*{type=*}/Child1/GrandChild1{version=3.0.0}", &["/Root/Child1/GrandChild1"])]
fn test_wildcard_values_with_other_filters(#[case] selector: &str, #[case] expected: &[&str]) {
    assert_selects(selector, expected);
}

// ============================================================================
// Alternation
// ============================================================================

#[rstest]
#[case("/Root/Child1|/Root/Child2", &["/Root/Child1", "/Root/Child2"])]
#[case("/Root/Child1|/Root/*", &["/Root/Child1", "/Root/Child2"])]
#[case("/Root/Child1|/NonExistent", &["/Root/Child1"])]
#[case("/NonExistent1|/NonExistent2", &[])]
#[case(
    "/Root/*{type=component,variant=primary}|/Root/*{type=component,variant=secondary}",
    &["/Root/Child1", "/Root/Child2"]
)]
#[case("/Root|/Root/Child1/GrandChild1", &["/Root", "/Root/Child1/GrandChild1"])]
#[case(
    "/Root/*{type=component}/GrandChild1|/*{type=container}/Child2/*{version=3.0.0}|/Root/*/*{variant='button-alt'}",
    &["/Root/Child1/GrandChild1", "/Root/Child2/GrandChild1", "/Root/Child2/GrandChild2"]
)]
fn test_alternation(#[case] selector: &str, #[case] expected: &[&str]) {
    assert_selects(selector, expected);
}

#[test]
fn test_alternation_skips_malformed_alternative() {
    assert_selects("/Root/Child1|Root/Child2", &["/Root/Child1"]);
    assert_selects("/Root/Child1{type}|/Root/Child2", &["/Root/Child2"]);
    assert_selects("Root/Child2|Root/Child1", &[]);
}

#[test]
fn test_alternation_is_union_by_identity() {
    let tree = sample_tree();
    let selector = TreeSelector::new(&tree);
    let pairs = [
        ("/Root/*", "/Root/Child2/~~"),
        ("**/GrandChild1", "/Root/*/*"),
        ("/Root", "**/*{type=container}"),
    ];

    for (left, right) in pairs {
        let mut expected = selector.query(left);
        for id in selector.query(right) {
            if !expected.contains(&id) {
                expected.push(id);
            }
        }

        let combined = selector.query(&format!("{}|{}", left, right));
        assert_eq!(sorted(combined), sorted(expected), "{}|{}", left, right);
    }
}

#[test]
fn test_results_contain_no_duplicates() {
    let tree = sample_tree();
    let matches = TreeSelector::new(&tree).query("/Root/Child2/*/../*|**/GrandChild2");
    let mut deduped = matches.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(matches.len(), deduped.len());
    assert_eq!(matches.len(), 3);
}

#[test]
fn test_select_nodes_resolves_ids() {
    let tree = sample_tree();
    let nodes = TreeSelector::new(&tree)
        .select_nodes(Some("**/*{type=element,variant=button}"))
        .unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name(), "GrandChild1");
    assert_eq!(nodes[0].variant(), Some("button"));
}

#[test]
fn test_concurrent_selects_share_tree() {
    let tree = sample_tree();
    let selector = TreeSelector::new(&tree);

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["**/*", "/Root/~~", "/Root/*/GrandChild1"]
            .into_iter()
            .map(|text| scope.spawn(move || selector.query(text).len()))
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![7, 6, 2]);
    });
}
