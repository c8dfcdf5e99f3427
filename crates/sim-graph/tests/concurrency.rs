//! Concurrent access tests
//!
//! Many threads mutating and reading one graph must leave it consistent.

use sim_graph::{EdgeId, Graph, GraphError, Identifiable};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
struct Site(String);

impl Identifiable for Site {
    fn id(&self) -> &str {
        &self.0
    }
}

fn site(name: impl Into<String>) -> Site {
    Site(name.into())
}

/// Writers add disjoint chains while readers poll counts and lookups.
#[test]
fn test_concurrent_writers_and_readers() {
    let graph: Arc<Graph<Site, u32>> = Arc::new(Graph::new());
    let writers = 8;
    let per_writer = 50;

    thread::scope(|scope| {
        for w in 0..writers {
            let graph = Arc::clone(&graph);
            scope.spawn(move || {
                for i in 0..per_writer {
                    graph.add_vertex(site(format!("w{w}-{i}")));
                    if i > 0 {
                        graph
                            .add_edge(format!("w{w}-{}", i - 1), format!("w{w}-{i}"), i as u32)
                            .expect("both endpoints were inserted by this thread");
                    }
                }
            });
        }
        for _ in 0..4 {
            let graph = Arc::clone(&graph);
            scope.spawn(move || {
                for _ in 0..200 {
                    assert!(graph.vertex_count() <= writers * per_writer);
                    if let Some(first) = graph.vertex_by_str("w0-0") {
                        assert_eq!(first.in_degree(), 0);
                    }
                }
            });
        }
    });

    assert_eq!(graph.vertex_count(), writers * per_writer);
    assert_eq!(graph.edge_count(), writers * (per_writer - 1));
}

/// Only one of many racing inserts of the same ordered pair may win.
#[test]
fn test_duplicate_edge_race_has_single_winner() {
    let graph: Arc<Graph<Site, u32>> = Arc::new(Graph::new());
    graph.add_vertex(site("a"));
    graph.add_vertex(site("b"));

    let results: Vec<Result<EdgeId, GraphError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|n| {
                let graph = Arc::clone(&graph);
                scope.spawn(move || graph.add_edge("a", "b", n))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("writer thread panicked"))
            .collect()
    });

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, GraphError::EdgeAlreadyExists(_))));
    assert_eq!(graph.edge_count(), 1);
}

/// Removing a hub while other threads add spokes never leaves dangling edges.
#[test]
fn test_remove_vertex_during_edge_inserts() {
    let graph: Arc<Graph<Site, u32>> = Arc::new(Graph::new());
    graph.add_vertex(site("hub"));
    for i in 0..32 {
        graph.add_vertex(site(format!("s{i}")));
    }

    thread::scope(|scope| {
        for i in 0..32u32 {
            let graph = Arc::clone(&graph);
            scope.spawn(move || {
                // Either lands before the removal or fails on the missing hub
                match graph.add_edge(format!("s{i}"), "hub", i) {
                    Ok(_) | Err(GraphError::VertexNotFound(_)) => {}
                    Err(other) => panic!("unexpected error: {other}"),
                }
            });
        }
        let graph = Arc::clone(&graph);
        scope.spawn(move || {
            graph.remove_vertex_by_id("hub").expect("hub exists until removed");
        });
    });

    assert!(!graph.contains_vertex("hub"));
    assert!(graph.edge_ids().iter().all(|id| !id.touches("hub")));
    for i in 0..32 {
        let out_degree = graph.with_vertex(format!("s{i}"), |v| v.out_degree());
        assert_eq!(out_degree, Some(0));
    }
}
