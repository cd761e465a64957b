//! Threshold-driven incremental edge maintenance.
//!
//! The engine owns the visible edge set for one analysis. A slider fraction
//! in [0,1] is translated through a pre-sorted quantile table into a concrete
//! mutual-information cutoff; each change produces the minimal add/remove
//! delta so the renderer can animate transitions instead of redrawing.
//!
//! Two invariants hold at every threshold:
//! - spanning-tree edges are always visible (the connectivity guarantee),
//! - a non-tree edge is visible iff its mutual information is strictly below
//!   the applied cutoff.
//!
//! Within one update the removal pass completes before the addition pass, and
//! the addition band is half-open, so no edge is ever reported on both sides
//! of one delta.

use std::sync::Arc;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::model::{Edge, EdgeDelta, EdgeId, MiMatrix, VarId};
use crate::tree::SpanningTree;

/// Initial slider position hosts start from: just the strongest relations.
pub const DEFAULT_FRACTION: f64 = 0.025;

// ============================================================================
// QuantileTable
// ============================================================================

/// Sorted ascending off-diagonal mutual-information values; length N(N−1)/2.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileTable {
    values: Vec<f64>,
}

impl QuantileTable {
    /// Flatten the upper triangle of a validated matrix and sort ascending.
    pub fn new(matrix: &MiMatrix) -> Self {
        let mut values: Vec<f64> = matrix.pairs().map(|(_, _, v)| v).collect();
        // Entries are validated finite, so total order exists.
        values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
        Self { values }
    }

    /// Nearest-rank lookup. The fraction is clamped to [0,1]; `None` only for
    /// the degenerate single-variable table.
    pub fn value_at(&self, fraction: f64) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let f = fraction.clamp(0.0, 1.0);
        let rank = (f * (self.values.len() - 1) as f64).round() as usize;
        Some(self.values[rank])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest pairwise values, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.values.first()?, *self.values.last()?))
    }
}

// ============================================================================
// ThresholdEngine
// ============================================================================

/// Sole owner and writer of the visible edge set.
///
/// The matrix and spanning tree are shared read-only with the rest of the
/// session; `set_threshold` takes `&mut self`, so concurrent updates are
/// unrepresentable and callers serialize by construction.
pub struct ThresholdEngine {
    matrix: Arc<MiMatrix>,
    tree: Arc<SpanningTree>,
    quantiles: QuantileTable,
    /// (smaller, larger) pair → visible edge.
    visible: HashMap<(usize, usize), Edge>,
    /// Cutoff currently applied to `visible`; `None` until the first update.
    applied: Option<f64>,
    next_edge_id: u64,
}

impl ThresholdEngine {
    /// Build the quantile table for one matrix/tree pair. O(N² log N).
    pub fn new(matrix: Arc<MiMatrix>, tree: Arc<SpanningTree>) -> Self {
        let quantiles = QuantileTable::new(&matrix);
        if let Some((lo, hi)) = quantiles.range() {
            debug!(pairs = quantiles.len(), lo, hi, "quantile table built");
        }
        Self {
            matrix,
            tree,
            quantiles,
            visible: HashMap::new(),
            applied: None,
            next_edge_id: 1,
        }
    }

    /// Apply a new threshold fraction and report the edge delta.
    ///
    /// Out-of-range fractions are clamped. Landing on the same quantile
    /// bucket as the previous call is a no-op. Degenerate graphs (no pairs)
    /// always produce an empty delta.
    pub fn set_threshold(&mut self, fraction: f64) -> EdgeDelta {
        let Some(new_value) = self.quantiles.value_at(fraction) else {
            return EdgeDelta::default();
        };
        if self.applied == Some(new_value) {
            trace!(new_value, "threshold unchanged");
            return EdgeDelta::default();
        }
        let prev_value = self.applied.unwrap_or(0.0);

        // Removal pass: visible non-tree edges no longer under the cutoff.
        let mut removed = Vec::new();
        self.visible.retain(|&(i, j), edge| {
            let keep = self.tree.contains(VarId(i), VarId(j))
                || self.matrix.get(i, j) < new_value;
            if !keep {
                removed.push(edge.id);
            }
            keep
        });

        // Addition pass: tree edges plus pairs newly inside the band.
        // The band [prev, new) is empty when the threshold decreases.
        let mut added = Vec::new();
        for (i, j, value) in self.matrix.pairs() {
            if self.visible.contains_key(&(i, j)) {
                continue;
            }
            let in_band = value >= prev_value && value < new_value;
            if in_band || self.tree.contains(VarId(i), VarId(j)) {
                let edge = Edge {
                    id: EdgeId(self.next_edge_id),
                    source: VarId(i),
                    target: VarId(j),
                    length: Edge::length_for(value),
                };
                self.next_edge_id += 1;
                self.visible.insert((i, j), edge.clone());
                added.push(edge);
            }
        }

        debug!(
            new_value,
            added = added.len(),
            removed = removed.len(),
            visible = self.visible.len(),
            "threshold applied"
        );
        self.applied = Some(new_value);
        EdgeDelta { added, removed }
    }

    /// The mutual-information cutoff currently in force, if any update ran.
    pub fn applied_value(&self) -> Option<f64> {
        self.applied
    }

    /// Read-only view of the current visible edges (arbitrary order).
    pub fn visible_edges(&self) -> impl Iterator<Item = &Edge> {
        self.visible.values()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn quantiles(&self) -> &QuantileTable {
        &self.quantiles
    }
}
