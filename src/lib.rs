//! # infograph-rs — Mutual-Information Dependence Graph
//!
//! The computational core of an interactive variable-dependence
//! visualization: variables are nodes, statistical dependence is edge
//! presence/length, and a slider threshold reveals more or fewer relations.
//!
//! ## Design Principles
//!
//! 1. **Pure core**: tree building and threshold maintenance are plain
//!    synchronous functions over a validated matrix, with no rendering state
//! 2. **Clean DTOs**: `VarNode`, `Edge`, `EdgeDelta` cross all boundaries
//! 3. **Trait-first seams**: `DependenceSource`/`LegendProvider` upstream,
//!    `LayoutSink` downstream; the host owns both sides
//! 4. **Minimal deltas**: each threshold change reports only what appeared
//!    and disappeared, so the renderer animates instead of redrawing
//!
//! ## Quick Start
//!
//! ```rust
//! use infograph_rs::{InformationGraph, MemorySource};
//!
//! # fn main() -> infograph_rs::Result<()> {
//! let source = MemorySource::new(
//!     ["pressure", "temperature", "velocity"],
//!     vec![
//!         vec![2.0, 0.3, 0.9],
//!         vec![0.3, 3.0, 0.5],
//!         vec![0.9, 0.5, 1.5],
//!     ],
//! );
//! let mut graph = InformationGraph::with_source(source);
//! graph.refresh()?;
//!
//! // The spanning tree is visible at any threshold.
//! let delta = graph.set_threshold(0.0);
//! assert_eq!(delta.added.len(), 2);
//!
//! // Raising the threshold only adds edges.
//! let delta = graph.set_threshold(1.0);
//! assert!(delta.removed.is_empty());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod tree;
pub mod threshold;
pub mod provider;
pub mod layout;
pub mod export;

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::debug;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Edge, EdgeDelta, EdgeId, Legend, MiMatrix, VarId, VarNode};

// ============================================================================
// Re-exports: Algorithms
// ============================================================================

pub use threshold::{DEFAULT_FRACTION, QuantileTable, ThresholdEngine};
pub use tree::SpanningTree;

// ============================================================================
// Re-exports: Boundaries
// ============================================================================

pub use layout::{LayoutSink, Position};
pub use provider::{DependenceSource, LegendProvider, MemorySource};

// ============================================================================
// Top-level session handle
// ============================================================================

/// The primary entry point. An `InformationGraph` wraps a dependence source
/// and owns one analysis at a time: the validated matrix, the node list, the
/// spanning tree, and the threshold engine.
pub struct InformationGraph<S: DependenceSource> {
    source: S,
    analysis: Option<Analysis>,
    /// Lazily resolved name → legend cache; cleared on every refresh.
    legend_cache: RwLock<HashMap<String, Legend>>,
}

/// Everything derived from one matrix delivery. Replaced wholesale by
/// `refresh`; only the engine's edge set changes between deliveries.
struct Analysis {
    matrix: Arc<MiMatrix>,
    nodes: Vec<VarNode>,
    tree: Arc<SpanningTree>,
    engine: ThresholdEngine,
}

impl<S: DependenceSource> InformationGraph<S> {
    /// Create a session around a source. No data is pulled until `refresh`.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            analysis: None,
            legend_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Pull fresh data from the source and rebuild the analysis.
    ///
    /// This is the "data ready" entry point: the host calls it whenever its
    /// provider has recomputed the matrix. Nodes, tree, and engine are
    /// replaced wholesale; edge visibility restarts from the tree once the
    /// next threshold is applied.
    ///
    /// Fails with the invalid-input variants if the delivered matrix is
    /// empty, non-square, or carries non-finite/negative values; the previous
    /// analysis is left untouched in that case.
    pub fn refresh(&mut self) -> Result<()> {
        let rows = self.source.mutual_information()?;
        let matrix = Arc::new(MiMatrix::from_rows(rows)?);
        let names = self.source.variable_names();

        let nodes: Vec<VarNode> = (0..matrix.len())
            .map(|i| {
                let name = names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("var{i}"));
                VarNode::new(VarId(i), name)
            })
            .collect();

        let tree = Arc::new(SpanningTree::build(&matrix));
        let engine = ThresholdEngine::new(Arc::clone(&matrix), Arc::clone(&tree));

        debug!(variables = matrix.len(), tree_edges = tree.len(), "analysis rebuilt");
        self.legend_cache.write().clear();
        self.analysis = Some(Analysis { matrix, nodes, tree, engine });
        Ok(())
    }

    /// Apply a threshold fraction (clamped to [0,1]) and return the delta.
    ///
    /// Never fails: with no analysis loaded, or a single-variable matrix,
    /// the delta is simply empty.
    pub fn set_threshold(&mut self, fraction: f64) -> EdgeDelta {
        match &mut self.analysis {
            Some(analysis) => analysis.engine.set_threshold(fraction),
            None => EdgeDelta::default(),
        }
    }

    /// Apply a threshold and forward any non-empty delta to the layout sink.
    pub fn push_threshold(&mut self, fraction: f64, sink: &mut dyn LayoutSink) -> EdgeDelta {
        let delta = self.set_threshold(fraction);
        if !delta.is_empty() {
            sink.edges_changed(&delta.added, &delta.removed);
        }
        delta
    }

    /// Current node list (stable identity = matrix row index). Empty before
    /// the first successful `refresh`.
    pub fn nodes(&self) -> &[VarNode] {
        self.analysis.as_ref().map_or(&[], |a| a.nodes.as_slice())
    }

    /// Root of the spanning tree: the variable with maximal self-information.
    pub fn root(&self) -> Option<VarId> {
        self.analysis.as_ref().map(|a| a.tree.root())
    }

    /// O(1) spanning-tree membership test for the rendering layer.
    pub fn is_tree_edge(&self, a: VarId, b: VarId) -> bool {
        self.analysis
            .as_ref()
            .is_some_and(|an| an.tree.contains(a, b))
    }

    /// The currently visible edges, in arbitrary order.
    pub fn visible_edges(&self) -> impl Iterator<Item = &Edge> {
        self.analysis.iter().flat_map(|a| a.engine.visible_edges())
    }

    pub fn visible_edge_count(&self) -> usize {
        self.analysis.as_ref().map_or(0, |a| a.engine.visible_count())
    }

    /// The mutual-information cutoff in force, if a threshold was applied.
    pub fn threshold_value(&self) -> Option<f64> {
        self.analysis.as_ref().and_then(|a| a.engine.applied_value())
    }

    /// The validated matrix of the current analysis.
    pub fn matrix(&self) -> Option<&MiMatrix> {
        self.analysis.as_ref().map(|a| a.matrix.as_ref())
    }

    /// Access the underlying source (for advanced use).
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: DependenceSource + LegendProvider> InformationGraph<S> {
    /// Resolve a variable's legend, caching per name until the next refresh.
    pub fn legend(&self, name: &str) -> Legend {
        if let Some(hit) = self.legend_cache.read().get(name) {
            return hit.clone();
        }
        let legend = self.source.legend(name);
        self.legend_cache
            .write()
            .insert(name.to_string(), legend.clone());
        legend
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: matrix has no rows")]
    EmptyMatrix,

    #[error("invalid input: matrix is not square ({rows} rows, row {row} has {cols} columns)")]
    NotSquare { rows: usize, row: usize, cols: usize },

    #[error("invalid input: non-finite value at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    #[error("invalid input: negative value {value} at ({row}, {col})")]
    Negative { row: usize, col: usize, value: f64 },

    #[error("source error: {0}")]
    Source(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the malformed-matrix class, fatal to the analysis session.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::EmptyMatrix
                | Error::NotSquare { .. }
                | Error::NonFinite { .. }
                | Error::Negative { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
