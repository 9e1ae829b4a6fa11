use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Document the engine was loaded from, if any.
    pub source: Option<String>,
    pub node_count: usize,
    pub edge_count: usize,
    /// Ids of vertices without a parent, in document order.
    pub roots: Vec<String>,
    pub shared_node_count: usize,
    pub is_acyclic: bool,
    pub primary_root: Option<String>,
    /// Present only when the structure below the primary root is acyclic.
    pub tree: Option<TreeStats>,
}

/// Measurements of the structure reachable from one root, with shared
/// vertices counted once per occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Distinct vertices reachable from the root.
    pub distinct_nodes: usize,
    /// Node count after unfolding shared vertices (saturating).
    pub unfolded_size: u64,
    pub height: usize,
    pub leaf_count: u64,
    pub max_degree: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub pattern: String,
    pub items: Vec<SearchItem>,
    pub total_matches: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: String,
    pub name: String,
    pub parent_count: usize,
    pub degree: usize,
}
