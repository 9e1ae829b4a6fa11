//! Construction contract of `Node`: positional children, absent slots, labels.

mod common;

use labeled_tree::domain::node::{Node, Slot};

fn slot_names(node: &Node) -> [Option<&str>; 4] {
    [
        node.left().map(Node::name),
        node.right().map(Node::name),
        node.third().map(Node::name),
        node.fourth().map(Node::name),
    ]
}

#[test]
fn test_leaf_has_all_slots_absent() {
    let node = Node::new("leaf");
    assert_eq!(node.name, "leaf");
    assert_eq!(slot_names(&node), [None, None, None, None]);
}

#[test]
fn test_unary_populates_left_only() {
    let node = Node::unary("unary", Node::new("A"));
    assert_eq!(slot_names(&node), [Some("A"), None, None, None]);
}

#[test]
fn test_binary_populates_left_and_right() {
    let node = Node::binary("binary", Node::new("A"), Node::new("B"));
    assert_eq!(slot_names(&node), [Some("A"), Some("B"), None, None]);
}

#[test]
fn test_ternary_populates_first_three() {
    let node = Node::ternary("ternary", Node::new("A"), Node::new("B"), Node::new("C"));
    assert_eq!(slot_names(&node), [Some("A"), Some("B"), Some("C"), None]);
}

#[test]
fn test_quad_populates_all_four() {
    let node = Node::quaternary(
        "quad",
        Node::new("A"),
        Node::new("B"),
        Node::new("C"),
        Node::new("D"),
    );
    assert_eq!(slot_names(&node), [Some("A"), Some("B"), Some("C"), Some("D")]);
    assert_eq!(node.degree(), 4);
}

#[test]
fn test_first_k_slots_follow_argument_order() {
    let labels = ["w", "x", "y", "z"];
    for k in 0..=4 {
        let node = Node::with_children(
            "k",
            labels[..k].iter().map(|label| Some(Node::new(*label))),
        );
        for (i, slot) in Slot::ALL.iter().enumerate() {
            let expected = (i < k).then(|| labels[i]);
            assert_eq!(node.slot(*slot).map(Node::name), expected, "k={} slot={}", k, slot);
        }
    }
}

#[test]
fn test_absent_arguments_stay_absent() {
    let node = Node::quaternary("gaps", None, Node::new("B"), None, Node::new("D"));
    assert_eq!(slot_names(&node), [None, Some("B"), None, Some("D")]);
}

#[test]
fn test_label_not_normalized() {
    for label in ["", " padded ", "MiXeD", "multi\nline", "ünïcödé"] {
        assert_eq!(Node::new(label).name, label);
    }
}

#[test]
fn test_equal_inputs_compare_equal_but_are_distinct_values() {
    let a = Node::binary("op", Node::new("l"), Node::new("r"));
    let mut b = Node::binary("op", Node::new("l"), Node::new("r"));
    assert_eq!(a, b);

    b.name.push('!');
    assert_ne!(a, b);
    assert_eq!(a.name, "op");
}

#[test]
fn test_children_owned_by_parent() {
    let child = Node::unary("child", Node::new("grandchild"));
    let mut parent = Node::unary("parent", child);

    let taken = parent.take_child(0);
    assert!(parent.is_leaf());
    assert_eq!(
        taken.as_ref().and_then(Node::left).map(Node::name),
        Some("grandchild")
    );
}

#[test]
fn test_fixture_trees_measure() {
    let quad = common::fixtures::create_quadtree();
    assert_eq!(quad.size(), 8);
    assert_eq!(quad.height(), 2);
    assert_eq!(quad.leaf_count(), 6);
    assert!(quad.third().is_none());
}
