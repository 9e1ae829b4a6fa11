use crate::app::dto::*;
use crate::domain::builder::GraphBuilder;
use crate::domain::document::Document;
use crate::domain::graph::NodeGraph;
use crate::domain::node::{Node, slot_label};
use anyhow::{Context as _, Result, anyhow, bail};
use petgraph::graph::NodeIndex;
use regex::RegexBuilder;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Largest unfolded tree `export` will build. Stacked shared vertices double
/// the unfolded size per layer.
pub const MAX_EXPORT_NODES: u64 = 1_000_000;

/// Answers questions about one loaded document.
pub struct TreeEngine {
    source: Option<PathBuf>,
    graph: NodeGraph,
    root: Option<NodeIndex>,
}

impl TreeEngine {
    pub fn load_from_json(json_path: &Path) -> Result<Self> {
        let json_content = std::fs::read_to_string(json_path)
            .with_context(|| format!("Failed to read document: {}", json_path.display()))?;
        let document =
            Document::from_json(&json_content).context("Failed to parse document JSON")?;

        let mut engine = Self::from_document(document)?;
        engine.source = Some(json_path.to_path_buf());
        debug!(path = %json_path.display(), nodes = engine.graph.node_count(), "loaded document");
        Ok(engine)
    }

    pub fn from_document(document: Document) -> Result<Self> {
        match document {
            Document::Graph(document) => {
                let built = GraphBuilder::new()
                    .build(document)
                    .context("Failed to build node graph")?;
                Ok(Self {
                    source: None,
                    graph: built.graph,
                    root: built.root,
                })
            }
            Document::Tree(tree) => Ok(Self::from_tree(&tree)),
        }
    }

    pub fn from_tree(tree: &Node) -> Self {
        let (graph, root) = NodeGraph::from_tree(tree);
        Self {
            source: None,
            graph,
            root: Some(root),
        }
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    /// Explicit root, else the first parentless vertex, else the first vertex.
    pub fn primary_root(&self) -> Option<NodeIndex> {
        self.root
            .or_else(|| self.graph.roots().first().copied())
            .or_else(|| self.graph.graph.node_indices().next())
    }

    fn resolve_root(&self, id: Option<&str>) -> Result<NodeIndex> {
        match id {
            Some(id) => self
                .graph
                .get_node_by_id(id)
                .ok_or_else(|| anyhow!("Node not found: {}", id)),
            None => self
                .primary_root()
                .ok_or_else(|| anyhow!("Document has no nodes")),
        }
    }

    pub fn stats(&self) -> Result<StatsResponse> {
        let graph = &self.graph;
        let is_acyclic = graph.is_acyclic();
        let primary_root = self.primary_root();

        let tree = match primary_root {
            Some(root) => {
                let measured = self.measure(root);
                if measured.is_none() {
                    warn!(
                        root = %graph.node(root).id,
                        "cycle reachable from root; tree measurements skipped"
                    );
                }
                measured
            }
            None => None,
        };

        Ok(StatsResponse {
            source: self
                .source
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            roots: graph
                .roots()
                .into_iter()
                .map(|idx| graph.node(idx).id.clone())
                .collect(),
            shared_node_count: graph.shared_nodes().len(),
            is_acyclic,
            primary_root: primary_root.map(|idx| graph.node(idx).id.clone()),
            tree,
        })
    }

    /// Post-order pass over the vertices reachable from `root`, memoized per
    /// vertex. Returns `None` when a cycle is reachable.
    fn measure(&self, root: NodeIndex) -> Option<TreeStats> {
        struct Measure {
            size: u64,
            height: usize,
            leaves: u64,
        }

        let graph = &self.graph;
        let mut memo: HashMap<NodeIndex, Measure> = HashMap::new();
        let mut in_progress: HashSet<NodeIndex> = HashSet::new();
        let mut max_degree = 0;
        let mut stack = vec![(root, false)];

        while let Some((idx, expanded)) = stack.pop() {
            if memo.contains_key(&idx) {
                continue;
            }
            let children: Vec<NodeIndex> = graph.slots(idx).into_iter().flatten().collect();

            if expanded {
                let mut measure = Measure {
                    size: 1,
                    height: 0,
                    leaves: if children.is_empty() { 1 } else { 0 },
                };
                for child in &children {
                    let child = memo.get(child)?;
                    measure.size = measure.size.saturating_add(child.size);
                    measure.height = measure.height.max(child.height + 1);
                    measure.leaves = measure.leaves.saturating_add(child.leaves);
                }
                max_degree = max_degree.max(children.len());
                memo.insert(idx, measure);
            } else {
                if !in_progress.insert(idx) {
                    // Still waiting on its own descendants
                    return None;
                }
                stack.push((idx, true));
                stack.extend(
                    children
                        .into_iter()
                        .filter(|child| !memo.contains_key(child))
                        .map(|child| (child, false)),
                );
            }
        }

        let top = memo.get(&root)?;
        Some(TreeStats {
            distinct_nodes: memo.len(),
            unfolded_size: top.size,
            height: top.height,
            leaf_count: top.leaves,
            max_degree,
        })
    }

    /// Case-insensitive regex search over labels, in document order.
    pub fn search(&self, pattern: &str, limit: Option<usize>) -> Result<SearchResponse> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid search pattern: {}", pattern))?;

        let graph = &self.graph;
        let matches: Vec<SearchItem> = graph
            .graph
            .node_indices()
            .filter(|&idx| regex.is_match(&graph.node(idx).name))
            .map(|idx| {
                let node = graph.node(idx);
                SearchItem {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    parent_count: graph.parent_count(idx),
                    degree: graph.slots(idx).into_iter().flatten().count(),
                }
            })
            .collect();

        let total_matches = matches.len();
        let items = match limit {
            Some(limit) => matches.into_iter().take(limit).collect(),
            None => matches,
        };

        Ok(SearchResponse {
            pattern: pattern.to_string(),
            items,
            total_matches,
        })
    }

    /// Indented drawing of the structure below `root`.
    ///
    /// Vertices with several parents carry a `[shared]` marker. A shared
    /// vertex is expanded at its first occurrence only; later occurrences
    /// with children are printed with `(repeat)`. A vertex already on the
    /// current path is printed with `(cycle)` and not expanded again.
    pub fn render(&self, root: Option<&str>) -> Result<String> {
        enum Frame {
            Visit {
                line_prefix: String,
                child_prefix: String,
                slot: Option<usize>,
                target: Option<NodeIndex>,
            },
            Leave(NodeIndex),
        }

        let graph = &self.graph;
        let root = self.resolve_root(root)?;
        let mut out = String::new();
        let mut path: HashSet<NodeIndex> = HashSet::new();
        let mut expanded: HashSet<NodeIndex> = HashSet::new();
        let mut stack = vec![Frame::Visit {
            line_prefix: String::new(),
            child_prefix: String::new(),
            slot: None,
            target: Some(root),
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Visit {
                    line_prefix,
                    child_prefix,
                    slot,
                    target,
                } => {
                    let label = slot
                        .map(|slot| format!("{}: ", slot_label(slot)))
                        .unwrap_or_default();
                    let Some(idx) = target else {
                        writeln!(out, "{}{}(absent)", line_prefix, label)?;
                        continue;
                    };

                    let node = graph.node(idx);
                    let shared = if graph.parent_count(idx) > 1 {
                        " [shared]"
                    } else {
                        ""
                    };
                    if path.contains(&idx) {
                        writeln!(out, "{}{}{}{} (cycle)", line_prefix, label, node.name, shared)?;
                        continue;
                    }
                    let slots = graph.slots(idx);
                    if !slots.is_empty() && !expanded.insert(idx) {
                        writeln!(out, "{}{}{}{} (repeat)", line_prefix, label, node.name, shared)?;
                        continue;
                    }
                    writeln!(out, "{}{}{}{}", line_prefix, label, node.name, shared)?;

                    path.insert(idx);
                    stack.push(Frame::Leave(idx));
                    let count = slots.len();
                    for (slot, child) in slots.into_iter().enumerate().rev() {
                        let last = slot + 1 == count;
                        stack.push(Frame::Visit {
                            line_prefix: format!(
                                "{}{}",
                                child_prefix,
                                if last { "└── " } else { "├── " }
                            ),
                            child_prefix: format!(
                                "{}{}",
                                child_prefix,
                                if last { "    " } else { "│   " }
                            ),
                            slot: Some(slot),
                            target: child,
                        });
                    }
                }
                Frame::Leave(idx) => {
                    path.remove(&idx);
                }
            }
        }

        Ok(out)
    }

    /// Owned tree below `root`, shared vertices copied per occurrence.
    ///
    /// Refuses structures whose unfolded size exceeds [`MAX_EXPORT_NODES`].
    pub fn export(&self, root: Option<&str>) -> Result<Node> {
        let root = self.resolve_root(root)?;
        if let Some(measured) = self.measure(root) {
            if measured.unfolded_size > MAX_EXPORT_NODES {
                warn!(
                    root = %self.graph.node(root).id,
                    unfolded_size = measured.unfolded_size,
                    "unfolded tree too large to export"
                );
                bail!(
                    "Tree below '{}' unfolds to {} nodes, more than the export limit of {}",
                    self.graph.node(root).id,
                    measured.unfolded_size,
                    MAX_EXPORT_NODES
                );
            }
        }
        self.graph
            .to_tree(root)
            .with_context(|| format!("Failed to export from node '{}'", self.graph.node(root).id))
    }
}
