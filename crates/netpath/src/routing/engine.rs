//! Shortest-path engine - Bellman-Ford distances, predecessors and path reconstruction

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use super::graph::Graph;

/// Best-known distance from the source to a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Reached(f64),
    Unreached,
}

impl Distance {
    pub fn value(self) -> Option<f64> {
        match self {
            Distance::Reached(d) => Some(d),
            Distance::Unreached => None,
        }
    }

    pub fn is_reached(self) -> bool {
        matches!(self, Distance::Reached(_))
    }

    /// Distance after following an edge of `weight`.
    ///
    /// Unreached stays unreached, and a sum that is not finite never counts
    /// as an improvement.
    fn extend(self, weight: f64) -> Option<f64> {
        match self {
            Distance::Reached(d) => Some(d + weight).filter(|c| c.is_finite()),
            Distance::Unreached => None,
        }
    }

    fn is_improved_by(self, candidate: f64) -> bool {
        match self {
            Distance::Reached(d) => candidate < d,
            Distance::Unreached => true,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Reached(d) => write!(f, "{}", d),
            Distance::Unreached => write!(f, "unreachable"),
        }
    }
}

/// Node -> best distance from the source
pub type DistanceMap<N> = IndexMap<N, Distance>;

/// Node -> previous node on its shortest path (None for the source and unreached nodes)
pub type PredecessorMap<N> = IndexMap<N, Option<N>>;

/// Errors raised while computing distances
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError<N> {
    #[error("Source node {0:?} is not in the graph")]
    UnknownSource(N),

    #[error("Graph contains a negative weight cycle reachable from the source (edge {from:?} -> {to:?})")]
    NegativeCycle { from: N, to: N },
}

/// Distances and predecessor tree for one source
#[derive(Debug, Clone)]
pub struct ShortestPaths<N> {
    source: N,
    distances: DistanceMap<N>,
    predecessors: PredecessorMap<N>,
}

impl<N: Eq + Hash> PartialEq for ShortestPaths<N> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.distances == other.distances
            && self.predecessors == other.predecessors
    }
}

impl<N: Clone + Eq + Hash> ShortestPaths<N> {
    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn distances(&self) -> &DistanceMap<N> {
        &self.distances
    }

    pub fn predecessors(&self) -> &PredecessorMap<N> {
        &self.predecessors
    }

    /// Distance to a node; nodes outside the graph are unreached
    pub fn distance(&self, node: &N) -> Distance {
        self.distances
            .get(node)
            .copied()
            .unwrap_or(Distance::Unreached)
    }

    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.predecessors.get(node).and_then(Option::as_ref)
    }

    /// Path from the source to `target`, empty if unreachable
    pub fn path_to(&self, target: &N) -> Vec<N> {
        ShortestPathEngine::reconstruct_path(&self.predecessors, &self.source, target)
    }

    pub fn into_parts(self) -> (DistanceMap<N>, PredecessorMap<N>) {
        (self.distances, self.predecessors)
    }
}

/// Single-source shortest paths over a [`Graph`].
///
/// Edges are relaxed in graph insertion order on every pass. When several
/// paths share the minimum cost, the predecessor recorded is whichever edge
/// relaxed first in that order; the choice is arbitrary but the same on
/// every run.
pub struct ShortestPathEngine;

impl ShortestPathEngine {
    /// Compute distances and predecessors from `source` using Bellman-Ford.
    ///
    /// Runs exactly `|nodes| - 1` relaxation passes, then one detection pass.
    /// Only negative cycles reachable from the source are reported.
    pub fn compute_distances<N>(
        graph: &Graph<N>,
        source: &N,
    ) -> Result<ShortestPaths<N>, PathError<N>>
    where
        N: Clone + Eq + Hash + fmt::Debug,
    {
        let source_idx = graph
            .index_of(source)
            .ok_or_else(|| PathError::UnknownSource(source.clone()))?;

        let nodes: Vec<&N> = graph.nodes().collect();
        let edges: Vec<(usize, usize, f64)> = graph
            .edges()
            .iter()
            .filter_map(|e| Some((graph.index_of(&e.from)?, graph.index_of(&e.to)?, e.weight)))
            .collect();

        debug!(
            source = ?source,
            nodes = nodes.len(),
            edges = edges.len(),
            "Computing shortest paths"
        );

        let mut dist = vec![Distance::Unreached; nodes.len()];
        let mut pred: Vec<Option<usize>> = vec![None; nodes.len()];
        dist[source_idx] = Distance::Reached(0.0);

        for pass in 1..nodes.len() {
            let mut relaxed = 0usize;
            for &(u, v, w) in &edges {
                if let Some(candidate) = dist[u].extend(w) {
                    if dist[v].is_improved_by(candidate) {
                        dist[v] = Distance::Reached(candidate);
                        pred[v] = Some(u);
                        relaxed += 1;
                    }
                }
            }
            trace!(pass, relaxed, "Relaxation pass complete");
        }

        let still_relaxes = edges.iter().find(|&&(u, v, w)| {
            dist[u]
                .extend(w)
                .is_some_and(|candidate| dist[v].is_improved_by(candidate))
        });

        if let Some(&(u, v, _)) = still_relaxes {
            let (from, to) = (nodes[u], nodes[v]);
            warn!(?from, ?to, "Negative weight cycle detected");
            return Err(PathError::NegativeCycle {
                from: from.clone(),
                to: to.clone(),
            });
        }

        let distances = nodes
            .iter()
            .zip(&dist)
            .map(|(node, d)| ((*node).clone(), *d))
            .collect();
        let predecessors = nodes
            .iter()
            .zip(&pred)
            .map(|(node, p)| ((*node).clone(), p.map(|i| nodes[i].clone())))
            .collect();

        Ok(ShortestPaths {
            source: source.clone(),
            distances,
            predecessors,
        })
    }

    /// Walk predecessor links back from `target` and return the path from `source`.
    ///
    /// Returns an empty path when the walk does not end at `source`. A
    /// predecessor map containing a loop also yields an empty path.
    pub fn reconstruct_path<N>(predecessors: &PredecessorMap<N>, source: &N, target: &N) -> Vec<N>
    where
        N: Clone + Eq + Hash,
    {
        let mut path = Vec::new();
        let mut current = Some(target.clone());

        while let Some(node) = current {
            if path.len() > predecessors.len() {
                debug!("Predecessor map contains a loop, no path reconstructed");
                return Vec::new();
            }
            current = predecessors.get(&node).cloned().flatten();
            path.push(node);
        }

        path.reverse();

        match path.first() {
            Some(first) if first == source => path,
            _ => Vec::new(),
        }
    }
}
