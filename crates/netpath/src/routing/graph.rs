//! Graph model consumed by the shortest-path engine

use std::hash::Hash;

use indexmap::IndexSet;

/// Weight used when a caller adds an edge without an explicit cost
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A directed, weighted edge
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<N> {
    pub from: N,
    pub to: N,
    pub weight: f64,
}

impl<N> Edge<N> {
    pub fn new(from: N, to: N) -> Self {
        Self {
            from,
            to,
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A set of nodes and an ordered list of directed edges between them.
///
/// Both nodes and edges keep insertion order. The engine scans edges in that
/// order, which is what makes tie-breaking between equal-cost paths
/// reproducible.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: IndexSet<N>,
    edges: Vec<Edge<N>>,
}

impl<N: Clone + Eq + Hash> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash> Graph<N> {
    pub fn new() -> Self {
        Self {
            nodes: IndexSet::new(),
            edges: Vec::new(),
        }
    }

    /// Add a node; returns false if it was already present
    pub fn add_node(&mut self, node: N) -> bool {
        self.nodes.insert(node)
    }

    /// Add a directed edge, inserting missing endpoints as nodes
    pub fn add_edge(&mut self, edge: Edge<N>) {
        self.nodes.insert(edge.from.clone());
        self.nodes.insert(edge.to.clone());
        self.edges.push(edge);
    }

    /// Add a weighted edge in both directions
    pub fn add_undirected_edge(&mut self, a: N, b: N, weight: f64) {
        self.add_edge(Edge::new(a.clone(), b.clone()).with_weight(weight));
        self.add_edge(Edge::new(b, a).with_weight(weight));
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Position of a node in insertion order
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.nodes.get_index_of(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> &[Edge<N>] {
        &self.edges
    }

    /// Get all edges leaving a node
    pub fn edges_from<'a>(&'a self, node: &'a N) -> impl Iterator<Item = &'a Edge<N>> + 'a {
        self.edges.iter().filter(move |e| &e.from == node)
    }

    /// Find the first edge between two nodes
    pub fn find_edge(&self, from: &N, to: &N) -> Option<&Edge<N>> {
        self.edges.iter().find(|e| &e.from == from && &e.to == to)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_defaults_to_unit_weight() {
        let edge = Edge::new("a", "b");
        assert_eq!(edge.weight, 1.0);
        assert_eq!(edge.with_weight(4.5).weight, 4.5);
    }

    #[test]
    fn test_add_edge_inserts_endpoints() {
        let mut graph = Graph::new();
        graph.add_node("a");
        graph.add_edge(Edge::new("b", "c"));

        assert_eq!(graph.node_count(), 3);
        assert!(graph.contains_node(&"b"));
        assert!(graph.contains_node(&"c"));
        assert_eq!(graph.index_of(&"c"), Some(2));
    }

    #[test]
    fn test_undirected_edge_adds_both_directions() {
        let mut graph = Graph::new();
        graph.add_undirected_edge(1, 2, 3.0);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.find_edge(&1, &2).map(|e| e.weight), Some(3.0));
        assert_eq!(graph.find_edge(&2, &1).map(|e| e.weight), Some(3.0));
        assert_eq!(graph.edges_from(&1).count(), 1);
    }

    #[test]
    fn test_duplicate_node_is_ignored() {
        let mut graph: Graph<u32> = Graph::new();
        assert!(graph.add_node(7));
        assert!(!graph.add_node(7));
        assert_eq!(graph.node_count(), 1);
    }
}
