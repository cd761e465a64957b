//! Per-variable legend metadata resolved from the hosting application.

use serde::{Deserialize, Serialize};

/// Opaque rendering tokens for one variable: a CSS-style color and a glyph
/// shape reference. The core never interprets either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Legend {
    pub color: String,
    pub shape: String,
}

impl Legend {
    pub fn new(color: impl Into<String>, shape: impl Into<String>) -> Self {
        Self { color: color.into(), shape: shape.into() }
    }
}

impl Default for Legend {
    /// Fallback for variables the host has no legend entry for.
    fn default() -> Self {
        Self { color: "#888888".into(), shape: "#circle".into() }
    }
}
