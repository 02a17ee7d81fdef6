use netpath::{Distance, Edge, Graph, PathError, ShortestPathEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(rng: &mut StdRng, nodes: usize, edges: usize) -> Graph<usize> {
    let mut graph = Graph::new();
    for n in 0..nodes {
        graph.add_node(n);
    }
    for _ in 0..edges {
        let from = rng.gen_range(0..nodes);
        let to = rng.gen_range(0..nodes);
        let weight = rng.gen_range(1..=9) as f64;
        graph.add_edge(Edge::new(from, to).with_weight(weight));
    }
    graph
}

/// All-pairs distances; `None` means unreachable
fn floyd_warshall(graph: &Graph<usize>) -> Vec<Vec<Option<f64>>> {
    let n = graph.node_count();
    let mut dist = vec![vec![None; n]; n];

    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = Some(0.0);
    }
    for edge in graph.edges() {
        let current = dist[edge.from][edge.to];
        if current.map_or(true, |d| edge.weight < d) {
            dist[edge.from][edge.to] = Some(edge.weight);
        }
    }

    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(ik), Some(kj)) = (dist[i][k], dist[k][j]) {
                    if dist[i][j].map_or(true, |d| ik + kj < d) {
                        dist[i][j] = Some(ik + kj);
                    }
                }
            }
        }
    }

    dist
}

/// Acyclic graph with negative weights; edges only run from lower to higher index
fn random_dag(rng: &mut StdRng, nodes: usize, edges: usize) -> Graph<usize> {
    let mut graph = Graph::new();
    for n in 0..nodes {
        graph.add_node(n);
    }
    for _ in 0..edges {
        let a = rng.gen_range(0..nodes);
        let b = rng.gen_range(0..nodes);
        if a == b {
            continue;
        }
        let weight = rng.gen_range(-9..=9) as f64;
        graph.add_edge(Edge::new(a.min(b), a.max(b)).with_weight(weight));
    }
    graph
}

fn assert_matches_floyd_warshall(graph: &Graph<usize>, round: usize) {
    let nodes = graph.node_count();
    let expected = floyd_warshall(graph);

    for source in 0..nodes {
        let result = ShortestPathEngine::compute_distances(graph, &source).unwrap();

        for target in 0..nodes {
            assert_eq!(
                result.distance(&target).value(),
                expected[source][target],
                "round {} source {} target {}",
                round,
                source,
                target
            );

            let path = result.path_to(&target);
            match expected[source][target] {
                None => assert!(path.is_empty()),
                Some(cost) => {
                    assert_eq!(path.first(), Some(&source));
                    assert_eq!(path.last(), Some(&target));
                    let walked: f64 = path
                        .windows(2)
                        .map(|w| {
                            graph
                                .edges()
                                .iter()
                                .filter(|e| e.from == w[0] && e.to == w[1])
                                .map(|e| e.weight)
                                .fold(f64::INFINITY, f64::min)
                        })
                        .sum();
                    assert_eq!(walked, cost);
                }
            }
        }
    }
}

#[test]
fn test_matches_floyd_warshall_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..50 {
        let nodes = rng.gen_range(1..12);
        let edges = rng.gen_range(0..30);
        let graph = random_graph(&mut rng, nodes, edges);
        assert_matches_floyd_warshall(&graph, round);
    }
}

#[test]
fn test_matches_floyd_warshall_with_negative_weights() {
    let mut rng = StdRng::seed_from_u64(0xda6);
    let mut negative_edges = 0;

    for round in 0..50 {
        let nodes = rng.gen_range(2..12);
        let edges = rng.gen_range(0..30);
        let graph = random_dag(&mut rng, nodes, edges);
        negative_edges += graph.edges().iter().filter(|e| e.weight < 0.0).count();
        assert_matches_floyd_warshall(&graph, round);
    }

    assert!(negative_edges > 0);
}

#[test]
fn test_predecessor_tree_is_consistent_with_distances() {
    let mut rng = StdRng::seed_from_u64(42);
    let graph = random_graph(&mut rng, 10, 25);
    let result = ShortestPathEngine::compute_distances(&graph, &0).unwrap();

    for (node, distance) in result.distances() {
        match (result.predecessor(node), distance) {
            (Some(pred), Distance::Reached(d)) => {
                let via = result.distance(pred).value().unwrap();
                let edge_ok = graph
                    .edges()
                    .iter()
                    .any(|e| &e.from == pred && &e.to == node && via + e.weight == *d);
                assert!(edge_ok, "no tight edge {} -> {}", pred, node);
            }
            (None, Distance::Reached(d)) => {
                assert_eq!(*node, 0);
                assert_eq!(*d, 0.0);
            }
            (None, Distance::Unreached) => {}
            (Some(_), Distance::Unreached) => panic!("unreached node {} has a predecessor", node),
        }
    }
}

#[test]
fn test_concrete_scenario_and_unknown_source() {
    let mut graph = Graph::new();
    graph.add_undirected_edge("A", "B", 1.0);
    graph.add_undirected_edge("B", "C", 2.0);
    graph.add_undirected_edge("A", "C", 5.0);
    graph.add_undirected_edge("C", "D", 1.0);

    let result = ShortestPathEngine::compute_distances(&graph, &"A").unwrap();
    let distances: Vec<_> = ["A", "B", "C", "D"]
        .iter()
        .map(|n| result.distance(n).value().unwrap())
        .collect();
    assert_eq!(distances, vec![0.0, 1.0, 3.0, 4.0]);

    let (_, predecessors) = result.into_parts();
    assert_eq!(
        ShortestPathEngine::reconstruct_path(&predecessors, &"A", &"D"),
        vec!["A", "B", "C", "D"]
    );

    assert_eq!(
        ShortestPathEngine::compute_distances(&graph, &"Q"),
        Err(PathError::UnknownSource("Q"))
    );
}

#[test]
fn test_three_node_negative_cycle() {
    let mut graph = Graph::new();
    graph.add_edge(Edge::new('A', 'B').with_weight(-1.0));
    graph.add_edge(Edge::new('B', 'C').with_weight(-1.0));
    graph.add_edge(Edge::new('C', 'A').with_weight(-1.0));

    let err = ShortestPathEngine::compute_distances(&graph, &'A').unwrap_err();
    assert!(matches!(err, PathError::NegativeCycle { .. }));
    assert!(err.to_string().contains("negative weight cycle"));
}
