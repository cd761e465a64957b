//! Variable node in the dependence graph.

use serde::{Deserialize, Serialize};

/// Stable variable identifier: the matrix row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One variable of the analysis: a matrix row plus its display name.
///
/// Legend metadata (color/shape) is not stored here; it is resolved lazily
/// by name through `LegendProvider` and cached on the session, so nodes stay
/// cheap to rebuild when a new matrix arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarNode {
    pub id: VarId,
    pub name: String,
}

impl VarNode {
    pub fn new(id: VarId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}
