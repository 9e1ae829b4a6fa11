use crate::domain::node::Node;
use anyhow::{Result, anyhow, bail};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Stable identifier of a vertex within a document
pub type NodeId = String;

/// Position of a child under its parent (0 = left, 1 = right, ...)
pub type SlotIndex = usize;

/// Vertex payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    pub name: String,
}

/// Labeled vertices whose children are shared references.
///
/// Unlike [`Node`], a vertex may sit in the slots of several parents, and
/// cycles (self loops included) are allowed. Each outgoing edge carries the
/// slot it occupies; a parent has at most one edge per slot.
#[derive(Debug, Default)]
pub struct NodeGraph {
    /// The directed graph; edge weights are slot indices
    pub graph: DiGraph<GraphNode, SlotIndex>,

    /// Mapping from id to node index
    pub id_to_node: HashMap<NodeId, NodeIndex>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<NodeId>, name: impl Into<String>) -> Result<NodeIndex> {
        let id = id.into();
        if self.id_to_node.contains_key(&id) {
            bail!("Duplicate node id: {}", id);
        }
        let idx = self.graph.add_node(GraphNode {
            id: id.clone(),
            name: name.into(),
        });
        self.id_to_node.insert(id, idx);
        Ok(idx)
    }

    /// Point `slot` of `parent` at `child` (or clear it), returning the
    /// previous occupant. Fails if either index is not in this graph.
    pub fn set_child(
        &mut self,
        parent: NodeIndex,
        slot: SlotIndex,
        child: Option<NodeIndex>,
    ) -> Result<Option<NodeIndex>> {
        for idx in std::iter::once(parent).chain(child) {
            if self.graph.node_weight(idx).is_none() {
                bail!("Node index {} is not in the graph", idx.index());
            }
        }

        let previous = self
            .graph
            .edges(parent)
            .find(|edge| *edge.weight() == slot)
            .map(|edge| (edge.id(), edge.target()));

        if let Some((edge, _)) = previous {
            self.graph.remove_edge(edge);
        }
        if let Some(child) = child {
            self.graph.add_edge(parent, child, slot);
        }
        Ok(previous.map(|(_, target)| target))
    }

    pub fn child(&self, parent: NodeIndex, slot: SlotIndex) -> Option<NodeIndex> {
        self.graph
            .edges(parent)
            .find(|edge| *edge.weight() == slot)
            .map(|edge| edge.target())
    }

    /// Slots of `parent` in order, up to its last populated one.
    pub fn slots(&self, parent: NodeIndex) -> Vec<Option<NodeIndex>> {
        let mut slots = Vec::new();
        for edge in self.graph.edges(parent) {
            let slot = *edge.weight();
            if slot >= slots.len() {
                slots.resize(slot + 1, None);
            }
            slots[slot] = Some(edge.target());
        }
        slots
    }

    pub fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_node.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn parent_count(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Vertices nobody points at, in insertion order.
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.parent_count(idx) == 0)
            .collect()
    }

    /// Vertices reachable through more than one slot.
    pub fn shared_nodes(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.parent_count(idx) > 1)
            .collect()
    }

    pub fn is_acyclic(&self) -> bool {
        petgraph::algo::toposort(&self.graph, None).is_ok()
    }

    /// Copy a tree into a fresh graph. Ids follow pre-order position (`n0`, `n1`, ...).
    pub fn from_tree(tree: &Node) -> (NodeGraph, NodeIndex) {
        let mut graph = NodeGraph::new();
        let mut pending: Vec<(&Node, Option<(NodeIndex, SlotIndex)>)> = vec![(tree, None)];
        let mut root = None;

        while let Some((node, link)) = pending.pop() {
            let id = format!("n{}", graph.node_count());
            let idx = graph.graph.add_node(GraphNode {
                id: id.clone(),
                name: node.name.clone(),
            });
            graph.id_to_node.insert(id, idx);

            match link {
                Some((parent, slot)) => {
                    graph.graph.add_edge(parent, idx, slot);
                }
                None => root = Some(idx),
            }

            let children: Vec<(SlotIndex, &Node)> = node
                .slots()
                .enumerate()
                .filter_map(|(slot, child)| child.map(|child| (slot, child)))
                .collect();
            for (slot, child) in children.into_iter().rev() {
                pending.push((child, Some((idx, slot))));
            }
        }

        // The first vertex pushed is always the root.
        let root = root.unwrap_or_else(|| NodeIndex::new(0));
        (graph, root)
    }

    /// Unfold the structure reachable from `root` into an owned tree.
    ///
    /// Shared vertices are copied once per occurrence, so stacked shared
    /// vertices grow the result exponentially. Fails if a cycle is reachable
    /// from `root`.
    pub fn to_tree(&self, root: NodeIndex) -> Result<Node> {
        enum Step {
            Enter(NodeIndex),
            Exit(NodeIndex),
        }

        if self.graph.node_weight(root).is_none() {
            bail!("Node index {} is not in the graph", root.index());
        }

        let mut steps = vec![Step::Enter(root)];
        let mut on_path: HashSet<NodeIndex> = HashSet::new();
        let mut built: Vec<Node> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(idx) => {
                    if !on_path.insert(idx) {
                        bail!("Cycle detected through node '{}'", self.node(idx).id);
                    }
                    steps.push(Step::Exit(idx));
                    for child in self.slots(idx).into_iter().rev().flatten() {
                        steps.push(Step::Enter(child));
                    }
                }
                Step::Exit(idx) => {
                    on_path.remove(&idx);
                    let slots = self.slots(idx);
                    let populated = slots.iter().flatten().count();
                    let mut children = built.split_off(built.len() - populated).into_iter();
                    let node = Node::with_children(
                        self.node(idx).name.clone(),
                        slots
                            .into_iter()
                            .map(|slot| slot.and_then(|_| children.next())),
                    );
                    built.push(node);
                }
            }
        }

        built
            .pop()
            .ok_or_else(|| anyhow!("Failed to unfold node '{}'", self.node(root).id))
    }
}
