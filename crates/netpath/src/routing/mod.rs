//! Routing module - Graph model and the shortest-path engine

pub mod engine;
pub mod graph;

pub use engine::{Distance, DistanceMap, PathError, PredecessorMap, ShortestPathEngine, ShortestPaths};
pub use graph::{Edge, Graph, DEFAULT_WEIGHT};
