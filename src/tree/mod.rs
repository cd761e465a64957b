//! Maximum-information spanning tree.
//!
//! The tree anchors the visible graph: whatever the threshold, every variable
//! stays reachable from the root through its strongest relations. The root is
//! the variable with the highest self-information; children are attached by
//! repeatedly taking the highest mutual information joining any connected
//! variable to any not-yet-connected one (Prim over the complete graph).
//!
//! Membership is stored as smaller-endpoint → set of larger endpoints, so
//! `contains(a, b)` is a single map lookup regardless of edge direction.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::model::{MiMatrix, VarId};

/// Immutable spanning-tree membership over one matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    root: usize,
    /// smaller endpoint → larger endpoints attached to it, sorted ascending.
    children: HashMap<usize, SmallVec<[usize; 4]>>,
    edge_count: usize,
}

impl SpanningTree {
    /// Build the maximum-information spanning tree for a validated matrix.
    ///
    /// O(N²). Deterministic for a fixed input: weight ties resolve to the
    /// lowest connected index, then the lowest frontier index, and the root
    /// tie resolves to the lowest row index.
    pub fn build(matrix: &MiMatrix) -> Self {
        let n = matrix.len();

        // I. Root: maximum diagonal, lowest index on ties.
        let mut root = 0;
        let mut best = matrix.self_information(0);
        for i in 1..n {
            if matrix.self_information(i) > best {
                best = matrix.self_information(i);
                root = i;
            }
        }
        debug!(root, entropy = best, "spanning tree root selected");

        // II. Grow: always attach the frontier variable with the strongest
        // relation to the connected set.
        let mut connected = vec![false; n];
        connected[root] = true;
        let mut children: HashMap<usize, SmallVec<[usize; 4]>> = HashMap::new();
        let mut edge_count = 0;

        for _ in 1..n {
            let mut max = -1.0;
            let mut from = usize::MAX;
            let mut to = usize::MAX;
            for (i, _) in connected.iter().enumerate().filter(|(_, c)| **c) {
                for (j, _) in connected.iter().enumerate().filter(|(_, c)| !**c) {
                    let v = matrix.get(i, j);
                    if v > max {
                        max = v;
                        from = i;
                        to = j;
                    }
                }
            }
            trace!(from, to, weight = max, "attach");
            connected[to] = true;
            let (a, b) = if from < to { (from, to) } else { (to, from) };
            let set = children.entry(a).or_default();
            match set.binary_search(&b) {
                Ok(_) => {}
                Err(pos) => set.insert(pos, b),
            }
            edge_count += 1;
        }

        debug!(nodes = n, edges = edge_count, "spanning tree built");
        Self { root, children, edge_count }
    }

    /// The root variable (highest self-information).
    pub fn root(&self) -> VarId {
        VarId(self.root)
    }

    /// O(1) membership test, endpoint order irrelevant.
    pub fn contains(&self, a: VarId, b: VarId) -> bool {
        let (lo, hi) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        self.children
            .get(&lo)
            .is_some_and(|set| set.binary_search(&hi).is_ok())
    }

    /// Number of tree edges: N−1, or 0 for a single variable.
    pub fn len(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Iterate tree edges as `(smaller, larger)` index pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.children
            .iter()
            .flat_map(|(&lo, set)| set.iter().map(move |&hi| (lo, hi)))
    }
}
