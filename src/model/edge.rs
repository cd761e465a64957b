//! Visible edge DTOs and the per-update delta handed to the renderer.

use serde::{Deserialize, Serialize};

use super::VarId;

/// Base layout length an independent pair would get. Edges shrink toward zero
/// as mutual information grows.
pub const BASE_LENGTH: f64 = 75.0;

/// Opaque edge identifier. Strictly increasing within one analysis, never
/// reused, so renderers can key scene elements across threshold updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A currently-visible edge between two variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: VarId,
    pub target: VarId,
    /// Layout length: monotone decreasing in mutual information.
    pub length: f64,
}

impl Edge {
    /// Map mutual information to a layout length in `(0, BASE_LENGTH]`.
    ///
    /// Strictly decreasing: stronger relation ⇒ shorter edge.
    pub fn length_for(mi: f64) -> f64 {
        BASE_LENGTH / (1.0 + mi)
    }
}

/// The minimal add/remove set produced by one threshold update.
///
/// `added` carries full edges (the renderer has never seen them); `removed`
/// carries only ids. An edge never appears on both sides of one delta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeDelta {
    pub added: Vec<Edge>,
    pub removed: Vec<EdgeId>,
}

impl EdgeDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_decreasing() {
        assert_eq!(Edge::length_for(0.0), BASE_LENGTH);
        assert!(Edge::length_for(1.0) < Edge::length_for(0.5));
        assert!(Edge::length_for(10.0) > 0.0);
    }
}
