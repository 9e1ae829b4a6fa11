use crate::domain::document::GraphDocument;
use crate::domain::graph::NodeGraph;
use anyhow::{Context as _, Result, anyhow};
use petgraph::graph::NodeIndex;
use tracing::debug;

/// Result of building a [`GraphDocument`]
#[derive(Debug)]
pub struct BuiltGraph {
    pub graph: NodeGraph,
    /// The document's explicit root, if it named one
    pub root: Option<NodeIndex>,
}

/// Turns graph documents into a [`NodeGraph`]
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Two-pass build: allocate every vertex, then wire slots by id
    pub fn build(&self, document: GraphDocument) -> Result<BuiltGraph> {
        let mut graph = NodeGraph::new();

        // Pass 1: Node Allocation
        for record in &document.nodes {
            graph
                .add_node(record.id.clone(), record.name.clone())
                .context("Failed to allocate graph node")?;
        }

        // Pass 2: Slot Wiring
        for record in &document.nodes {
            let parent = graph
                .get_node_by_id(&record.id)
                .ok_or_else(|| anyhow!("Node not found: {}", record.id))?;
            for (slot, child_id) in record.children.iter().enumerate() {
                let Some(child_id) = child_id else {
                    continue;
                };
                let child = graph.get_node_by_id(child_id).ok_or_else(|| {
                    anyhow!(
                        "Node '{}' references unknown child '{}' in slot {}",
                        record.id,
                        child_id,
                        slot
                    )
                })?;
                graph.set_child(parent, slot, Some(child))?;
            }
        }

        let root = document
            .root
            .as_deref()
            .map(|id| {
                graph
                    .get_node_by_id(id)
                    .ok_or_else(|| anyhow!("Root node not found: {}", id))
            })
            .transpose()?;

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built node graph"
        );

        Ok(BuiltGraph { graph, root })
    }
}
