//! Rendering/layout boundary.
//!
//! The layout engine is external (force-directed, iterative, drag-aware);
//! the core only pushes edge deltas into it and reads positions back on
//! demand. No position is ever stored on this side of the boundary, so
//! simulation ticks arriving between threshold changes cannot invalidate
//! core state.

use serde::{Deserialize, Serialize};

use crate::model::{Edge, EdgeId, VarId};

/// A node position produced by the layout simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// What the core expects from the hosting layout/rendering component.
pub trait LayoutSink {
    /// Called after each non-empty threshold update with the same delta the
    /// renderer keys on: removals were computed before additions.
    fn edges_changed(&mut self, added: &[Edge], removed: &[EdgeId]);

    /// Current simulated position of a variable, if the simulation has
    /// placed it yet.
    fn position(&self, id: VarId) -> Option<Position>;
}
