//! # Provider Boundary
//!
//! THE contract between the graph core and the hosting application.
//! The host owns data production (mutual-information computation, legend
//! styling); the core owns everything downstream of a delivered matrix.
//!
//! ## Implementations
//!
//! | Provider | Module | Description |
//! |----------|--------|-------------|
//! | `MemorySource` | here | In-memory source for testing/embedding |
//!
//! All traits are synchronous: the core runs to completion once invoked and
//! performs no I/O, so there is nothing to await. The "data ready"
//! notification is realized by the host calling
//! [`InformationGraph::refresh`](crate::InformationGraph::refresh) after its
//! source has fresh data.

use hashbrown::HashMap;

use crate::Result;
use crate::model::Legend;

// ============================================================================
// Source traits
// ============================================================================

/// Supplies the mutual-information matrix and per-variable names.
///
/// The matrix is delivered as raw rows; the core validates at the boundary
/// (`MiMatrix::from_rows`), so implementations stay trivial.
pub trait DependenceSource {
    /// Display names, one per matrix row, in row order.
    fn variable_names(&self) -> Vec<String>;

    /// The full N×N matrix: diagonal = self-information, off-diagonal =
    /// pairwise mutual information.
    fn mutual_information(&self) -> Result<Vec<Vec<f64>>>;
}

/// Resolves a variable name to its rendering legend.
///
/// Total function: unknown names get a default legend rather than an error,
/// so a missing style entry can never break an analysis.
pub trait LegendProvider {
    fn legend(&self, name: &str) -> Legend;
}

// ============================================================================
// MemorySource
// ============================================================================

/// In-memory source: fixed names, matrix rows, and an optional legend map.
///
/// This is the reference implementation of both provider traits, used by the
/// test suites and by hosts that already hold their data in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
    legends: HashMap<String, Legend>,
}

impl MemorySource {
    pub fn new(
        names: impl IntoIterator<Item = impl Into<String>>,
        rows: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            rows,
            legends: HashMap::new(),
        }
    }

    pub fn with_legend(mut self, name: impl Into<String>, legend: Legend) -> Self {
        self.legends.insert(name.into(), legend);
        self
    }

    /// Replace the matrix rows, e.g. when the host recomputes.
    pub fn set_rows(&mut self, rows: Vec<Vec<f64>>) {
        self.rows = rows;
    }
}

impl DependenceSource for MemorySource {
    fn variable_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn mutual_information(&self) -> Result<Vec<Vec<f64>>> {
        Ok(self.rows.clone())
    }
}

impl LegendProvider for MemorySource {
    fn legend(&self, name: &str) -> Legend {
        self.legends.get(name).cloned().unwrap_or_default()
    }
}
