//! Test fixture generators for integration tests.
#![allow(dead_code)]

use labeled_tree::domain::document::{GraphDocument, NodeRecord};
use labeled_tree::domain::node::Node;

pub fn record(id: &str, name: &str, children: &[Option<&str>]) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        name: name.to_string(),
        children: children.iter().map(|c| c.map(str::to_string)).collect(),
    }
}

/// `if (x < 10) { y = x } else { y = 0 }` as a parse tree
pub fn create_if_else_tree() -> Node {
    Node::ternary(
        "if",
        Node::binary("<", Node::new("x"), Node::new("10")),
        Node::binary("=", Node::new("y"), Node::new("x")),
        Node::binary("=", Node::new("y"), Node::new("0")),
    )
}

/// A quadtree cell with one subdivided quadrant and one empty quadrant
pub fn create_quadtree() -> Node {
    Node::quaternary(
        "cell",
        Node::new("nw"),
        Node::quaternary(
            "ne",
            Node::new("ne.nw"),
            Node::new("ne.ne"),
            Node::new("ne.sw"),
            Node::new("ne.se"),
        ),
        None,
        Node::new("se"),
    )
}

/// Two parents sharing one child, no cycles
pub fn create_graph_with_sharing() -> GraphDocument {
    GraphDocument {
        root: Some("sum".into()),
        nodes: vec![
            record("sum", "+", &[Some("sq"), Some("sq2")]),
            record("sq", "square", &[Some("x")]),
            record("sq2", "double", &[Some("x")]),
            record("x", "x", &[]),
        ],
    }
}

/// a -> b -> c -> a
pub fn create_graph_with_cycle() -> GraphDocument {
    GraphDocument {
        root: None,
        nodes: vec![
            record("a", "A", &[Some("b")]),
            record("b", "B", &[None, Some("c")]),
            record("c", "C", &[Some("a")]),
        ],
    }
}

pub const TREE_JSON: &str = r#"{
  "name": "quad",
  "children": [
    {"name": "A"},
    null,
    {"name": "C", "children": [null, {"name": "C.right"}]},
    {"name": "D"}
  ]
}"#;

pub const GRAPH_JSON: &str = r#"{
  "root": "top",
  "nodes": [
    {"id": "top", "name": "Top", "children": ["left", "right"]},
    {"id": "left", "name": "Left", "children": ["shared"]},
    {"id": "right", "name": "Right", "children": [null, "shared"]},
    {"id": "shared", "name": "Shared"}
  ]
}"#;

pub const CYCLIC_JSON: &str = r#"{
  "nodes": [
    {"id": "a", "name": "A", "children": ["b"]},
    {"id": "b", "name": "B", "children": ["a"]}
  ]
}"#;
