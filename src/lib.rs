//! labeled-tree library — labeled N-ary nodes, shared node graphs, and the
//! engine behind `treetool`.

pub mod app;
pub mod cli;
pub mod domain;

pub use domain::graph::NodeGraph;
pub use domain::node::{Node, Slot};
