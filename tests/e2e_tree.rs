//! End-to-end tests for spanning-tree construction.
//!
//! Each test exercises: raw rows -> validation -> SpanningTree::build, plus
//! the session-level surface (`root`, `is_tree_edge`) where relevant.

use infograph_rs::{Error, InformationGraph, MemorySource, MiMatrix, SpanningTree, VarId};

// ============================================================================
// Helper: BFS reachability over tree edges.
// ============================================================================

fn reachable_from_root(tree: &SpanningTree, n: usize) -> usize {
    let mut seen = vec![false; n];
    let mut queue = vec![tree.root().0];
    seen[tree.root().0] = true;
    while let Some(v) = queue.pop() {
        for u in 0..n {
            if !seen[u] && tree.contains(VarId(v), VarId(u)) {
                seen[u] = true;
                queue.push(u);
            }
        }
    }
    seen.iter().filter(|s| **s).count()
}

fn matrix_4x4() -> Vec<Vec<f64>> {
    vec![
        vec![5.0, 0.1, 0.4, 0.9],
        vec![0.1, 3.0, 0.6, 0.2],
        vec![0.4, 0.6, 2.0, 0.3],
        vec![0.9, 0.2, 0.3, 4.0],
    ]
}

// ============================================================================
// 1. Root selection: maximal diagonal wins
// ============================================================================

#[test]
fn test_root_is_max_entropy_variable() {
    let m = MiMatrix::from_rows(matrix_4x4()).unwrap();
    let tree = SpanningTree::build(&m);
    assert_eq!(tree.root(), VarId(0));
}

// ============================================================================
// 2. Exactly N−1 edges, all nodes reachable from the root
// ============================================================================

#[test]
fn test_tree_spans_all_variables() {
    let m = MiMatrix::from_rows(matrix_4x4()).unwrap();
    let tree = SpanningTree::build(&m);
    assert_eq!(tree.len(), 3);
    assert_eq!(reachable_from_root(&tree, 4), 4);
}

#[test]
fn test_larger_tree_spans_all_variables() {
    // 6 variables, entropies descending so the root is index 0.
    let n = 6;
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        (n - i) as f64
                    } else {
                        // Deterministic asymmetry-free off-diagonal pattern.
                        0.1 + ((i * j) % 5) as f64 / 10.0
                    }
                })
                .collect()
        })
        .collect();
    let m = MiMatrix::from_rows(rows).unwrap();
    let tree = SpanningTree::build(&m);
    assert_eq!(tree.len(), n - 1);
    assert_eq!(reachable_from_root(&tree, n), n);
}

// ============================================================================
// 3. Membership is symmetric in its arguments
// ============================================================================

#[test]
fn test_membership_ignores_endpoint_order() {
    let m = MiMatrix::from_rows(matrix_4x4()).unwrap();
    let tree = SpanningTree::build(&m);
    for (lo, hi) in tree.edges() {
        assert!(tree.contains(VarId(lo), VarId(hi)));
        assert!(tree.contains(VarId(hi), VarId(lo)));
    }
}

// ============================================================================
// 4. The strongest crossing relation is chosen at every step
// ============================================================================

#[test]
fn test_known_tree_shape() {
    // Root 0; 0–3 (0.9) first, then 0–2 (0.4), then 2–1 (0.6).
    let m = MiMatrix::from_rows(matrix_4x4()).unwrap();
    let tree = SpanningTree::build(&m);
    assert!(tree.contains(VarId(0), VarId(3)));
    assert!(tree.contains(VarId(0), VarId(2)));
    assert!(tree.contains(VarId(1), VarId(2)));
    assert!(!tree.contains(VarId(0), VarId(1)));
    assert!(!tree.contains(VarId(1), VarId(3)));
    assert!(!tree.contains(VarId(2), VarId(3)));
}

// ============================================================================
// 5. Degenerate and invalid inputs
// ============================================================================

#[test]
fn test_single_variable_tree_is_empty() {
    let m = MiMatrix::from_rows(vec![vec![3.0]]).unwrap();
    let tree = SpanningTree::build(&m);
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.root(), VarId(0));
}

#[test]
fn test_non_square_matrix_rejected() {
    let rows = vec![vec![1.0, 0.2, 0.3], vec![0.2, 1.0, 0.1]];
    let err = MiMatrix::from_rows(rows).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(matches!(err, Error::NotSquare { .. }));
}

#[test]
fn test_session_refresh_rejects_invalid_matrix() {
    let source = MemorySource::new(["a", "b"], vec![vec![1.0, 0.2]]);
    let mut graph = InformationGraph::with_source(source);
    let err = graph.refresh().unwrap_err();
    assert!(err.is_invalid_input());
    assert!(graph.nodes().is_empty());
}

// ============================================================================
// 6. Session surface mirrors the tree
// ============================================================================

#[test]
fn test_session_tree_queries() {
    let source = MemorySource::new(["w", "x", "y", "z"], matrix_4x4());
    let mut graph = InformationGraph::with_source(source);
    graph.refresh().unwrap();

    assert_eq!(graph.root(), Some(VarId(0)));
    assert!(graph.is_tree_edge(VarId(3), VarId(0)));
    assert!(!graph.is_tree_edge(VarId(0), VarId(1)));
}
