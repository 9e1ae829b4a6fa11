pub mod node;
pub mod walk;
pub mod graph;
pub mod document;
pub mod builder;
