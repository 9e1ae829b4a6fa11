//! On-disk document formats.
//!
//! A document is either a nested tree (the serde form of [`Node`]) or a flat
//! graph whose vertices refer to their children by id. The graph form is the
//! only one able to express shared children and cycles.
//!
//! Tree documents nest two JSON levels per tree level, so reading and writing
//! run without serde_json's recursion limit and on a growable stack.

use crate::domain::graph::NodeId;
use crate::domain::node::Node;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::io;

/// Flat graph document: vertices plus an optional designated root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeId>,
    pub nodes: Vec<NodeRecord>,
}

/// One vertex of a [`GraphDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    /// Child ids by slot; `null` marks an absent slot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Option<NodeId>>,
}

/// Any document `treetool` accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Graph(GraphDocument),
    Tree(Node),
}

/// Top-level keys that decide which form a document has
#[derive(Deserialize)]
struct Shape {
    #[serde(default)]
    nodes: Option<IgnoredAny>,
}

impl Document {
    /// Parse either form. A top-level `nodes` key selects the graph form, so
    /// field errors inside it are reported as they are.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let shape: Shape = from_str_unbounded(json)?;
        if shape.nodes.is_some() {
            Ok(Document::Graph(from_str_unbounded(json)?))
        } else {
            Ok(Document::Tree(from_str_unbounded(json)?))
        }
    }
}

/// Write `tree` as a compact tree document.
///
/// Compact output keeps deep chains linear in size; indentation would grow
/// quadratically with depth.
pub fn write_tree<W: io::Write>(writer: W, tree: &Node) -> serde_json::Result<()> {
    let mut serializer = serde_json::Serializer::new(writer);
    tree.serialize(serde_stacker::Serializer::new(&mut serializer))
}

pub fn tree_to_string(tree: &Node) -> serde_json::Result<String> {
    let mut out = Vec::new();
    write_tree(&mut out, tree)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn from_str_unbounded<T: DeserializeOwned>(json: &str) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_document_detected() {
        let doc = Document::from_json(r#"{"name": "root", "children": [null, {"name": "r"}]}"#)
            .unwrap();
        let Document::Tree(tree) = doc else {
            panic!("expected a tree document");
        };
        assert!(tree.left().is_none());
        assert_eq!(tree.right().map(Node::name), Some("r"));
    }

    #[test]
    fn test_graph_document_detected() {
        let doc = Document::from_json(
            r#"{
                "root": "a",
                "nodes": [
                    {"id": "a", "name": "A", "children": ["b", null, "b"]},
                    {"id": "b", "name": "B"}
                ]
            }"#,
        )
        .unwrap();
        let Document::Graph(graph) = doc else {
            panic!("expected a graph document");
        };
        assert_eq!(graph.root.as_deref(), Some("a"));
        assert_eq!(
            graph.nodes[0].children,
            vec![Some("b".to_string()), None, Some("b".to_string())]
        );
        assert!(graph.nodes[1].children.is_empty());
    }

    #[test]
    fn test_malformed_document_rejected() {
        assert!(Document::from_json(r#"{"label": "x"}"#).is_err());
        assert!(Document::from_json("[1, 2]").is_err());
        assert!(Document::from_json(r#"{"name": "x"} trailing"#).is_err());
    }

    #[test]
    fn test_graph_record_error_reported() {
        let err = Document::from_json(
            r#"{"nodes": [{"id": "a", "name": "A"}, {"name": "no id"}]}"#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing field `id`"), "{}", message);
    }

    fn chain(depth: usize) -> Node {
        let mut node = Node::new("bottom");
        for i in 0..depth {
            node = Node::unary(format!("n{}", i), node);
        }
        node
    }

    #[test]
    fn test_deep_tree_document_round_trips() {
        let tree = chain(500);
        let json = tree_to_string(&tree).unwrap();
        let Document::Tree(back) = Document::from_json(&json).unwrap() else {
            panic!("expected a tree document");
        };
        assert_eq!(back.height(), 500);
        assert_eq!(back.find(|n| n.is_leaf()).map(Node::name), Some("bottom"));
    }

    #[test]
    fn test_very_deep_tree_serializes() {
        let json = tree_to_string(&chain(100_000)).unwrap();
        assert!(json.contains("\"bottom\""));
    }
}
