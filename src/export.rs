//! JSON snapshot export — serialize the current graph state for the host.
//!
//! Produces one JSON object the browser-side renderer can ingest directly:
//!
//! ```text
//! InformationGraph → write_snapshot() → {"root": …, "nodes": […], "edges": […]}
//!   → hand to the SVG/canvas layer, or persist for inspection
//! ```
//!
//! Edges are ordered by creation id so repeated exports of the same state are
//! byte-identical.

use std::io::Write;

use serde::Serialize;

use crate::model::{Edge, VarId, VarNode};
use crate::provider::DependenceSource;
use crate::{InformationGraph, Result};

#[derive(Serialize)]
struct Snapshot<'a> {
    root: Option<VarId>,
    nodes: &'a [VarNode],
    edges: Vec<&'a Edge>,
}

fn snapshot<S: DependenceSource>(graph: &InformationGraph<S>) -> Snapshot<'_> {
    let mut edges: Vec<&Edge> = graph.visible_edges().collect();
    edges.sort_unstable_by_key(|e| e.id);
    Snapshot { root: graph.root(), nodes: graph.nodes(), edges }
}

/// Write the current nodes and visible edges as a JSON object, newline
/// terminated.
///
/// An unrefreshed session exports an empty graph rather than failing.
pub fn write_snapshot<S, W>(graph: &InformationGraph<S>, writer: &mut W) -> Result<()>
where
    S: DependenceSource,
    W: Write,
{
    serde_json::to_writer(&mut *writer, &snapshot(graph))?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Convenience: the snapshot as an owned JSON string.
pub fn snapshot_json<S: DependenceSource>(graph: &InformationGraph<S>) -> Result<String> {
    Ok(serde_json::to_string(&snapshot(graph))?)
}
