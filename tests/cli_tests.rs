use serde_json::json;
use tree_selector::TreeSelector;
use tree_selector::cli::{
    CheckOptions, CheckResult, CliError, DEMO_SELECTORS, execute_check, execute_tree, run_demo,
    tree_from_json,
};

const TREE_JSON: &str = r#"{
    "name": "Root",
    "type": "container",
    "version": "1.0.0",
    "children": [
        {
            "name": "Child1",
            "type": "component",
            "variant": "primary",
            "attributes": {"visible": "true"},
            "children": [{"name": "GrandChild1", "type": "element"}]
        },
        {"name": "Child2", "type": "component", "variant": "secondary"}
    ]
}"#;

fn check(selector: &str) -> Result<CheckResult, CliError> {
    execute_check(&CheckOptions {
        selector: selector.to_string(),
        input: Some(TREE_JSON.to_string()),
        ..Default::default()
    })
}

// ============================================================================
// JSON trees
// ============================================================================

#[test]
fn test_tree_from_json_preserves_structure() {
    let tree = tree_from_json(TREE_JSON).unwrap();
    assert_eq!(tree.len(), 4);

    let root = tree.node(tree.root());
    assert_eq!(root.kind(), Some("container"));
    assert_eq!(root.variant(), None);

    let names: Vec<&str> = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.node(id).name())
        .collect();
    assert_eq!(names, vec!["Child1", "Child2"]);

    let matches = TreeSelector::new(&tree).query("/Root/Child1/GrandChild1");
    assert_eq!(matches.len(), 1);
    assert_eq!(tree.path_of(matches[0]), "/Root/Child1/GrandChild1");
}

#[test]
fn test_tree_from_json_rejects_bad_input() {
    assert!(matches!(tree_from_json("not json"), Err(CliError::Json(_))));
    assert!(matches!(
        tree_from_json(r#"{"name": "Root", "attributes": {"visible": true}}"#),
        Err(CliError::Json(_))
    ));
    assert!(matches!(
        tree_from_json(r#"{"name": "Root", "colour": "red"}"#),
        Err(CliError::Json(_))
    ));
    assert!(matches!(
        tree_from_json(r#"{"name": "Root", "children": [{"name": ""}]}"#),
        Err(CliError::InvalidTree(_))
    ));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_outputs_matches() {
    let CheckResult::Success(output) = check("/Root/*{visible=true}").unwrap() else {
        panic!("Expected evaluation result");
    };

    assert!(!output.contains('\n'));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&output).unwrap(),
        json!([{
            "path": "/Root/Child1",
            "name": "Child1",
            "type": "component",
            "variant": "primary",
            "version": null,
            "attributes": {"visible": "true"},
        }])
    );
}

#[test]
fn test_check_reports_parse_errors() {
    assert!(matches!(check("Root/Child1"), Err(CliError::Parse(_))));
}

#[test]
fn test_check_no_matches_is_empty_array() {
    let CheckResult::Success(output) = check("/Root/Missing").unwrap() else {
        panic!("Expected evaluation result");
    };
    assert_eq!(output, "[]");
}

#[test]
fn test_check_pretty_output() {
    let result = execute_check(&CheckOptions {
        selector: "/Root/Child2".to_string(),
        input: Some(TREE_JSON.to_string()),
        pretty: true,
        ..Default::default()
    })
    .unwrap();

    let CheckResult::Success(output) = result else {
        panic!("Expected evaluation result");
    };
    assert!(output.starts_with("[\n  {\n"));
    assert!(output.contains("\"path\": \"/Root/Child2\""));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&output).unwrap()[0]["variant"],
        json!("secondary")
    );
}

#[test]
fn test_check_syntax_only_needs_no_input() {
    let result = execute_check(&CheckOptions {
        selector: "**/*{ type = element }".to_string(),
        syntax_only: true,
        ..Default::default()
    })
    .unwrap();

    match result {
        CheckResult::SyntaxValid(canonical) => assert_eq!(canonical, "**/*{type=element}"),
        other => panic!("Expected syntax result, got {:?}", other),
    }
}

#[test]
fn test_check_requires_input() {
    let result = execute_check(&CheckOptions {
        selector: "/Root".to_string(),
        ..Default::default()
    });
    assert!(matches!(result, Err(CliError::NoInput)));
}

// ============================================================================
// tree and demo
// ============================================================================

#[test]
fn test_execute_tree_renders() {
    let rendered = execute_tree(Some(TREE_JSON)).unwrap();
    assert_eq!(
        rendered,
        "Root [type=container, version=1.0.0]\n\
         ├── Child1 [type=component, variant=primary] {visible=true}\n\
         │   └── GrandChild1 [type=element]\n\
         └── Child2 [type=component, variant=secondary]\n"
    );
    assert!(matches!(execute_tree(None), Err(CliError::NoInput)));
}

#[test]
fn test_demo_runs_every_selector() {
    let output = run_demo();
    assert!(output.starts_with("SAMPLE TREE"));
    for selector in DEMO_SELECTORS {
        assert!(output.contains(selector), "Missing demo selector: {}", selector);
    }
    assert!(output.contains("\n/Root/Child2/~~\n  3 match(es)\n  - /Root/Child2/GrandChild1  "));
    assert!(output.contains("/Root/Child2/GrandChild1  GrandChild1 [type=element, variant=button-alt, version=3.2.0]"));
}
