//! Structured error types for the typesetter.
//!
//! The layout-planning variants (`UnmeasurableStyle`, `UnplaceableItem`) are
//! raised before any page is drawn, so a failed run leaves no partial
//! artifact. `Write` is surfaced as-is after layout; the computed plan
//! itself is never corrupted by a failed write, so a caller may retry.

use thiserror::Error;

use crate::metrics::RowKind;

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum TarifaError {
    /// The metrics probe read back a zero or non-finite height. Packing with
    /// a guessed height would either overflow the column or under-pack, so
    /// the whole run aborts before any page exists.
    #[error("style produced no measurable height for a {kind} row")]
    UnmeasurableStyle { kind: RowKind },

    /// A single item row is taller than a full empty column. No number of
    /// pages would ever fit it.
    #[error(
        "item '{name}' cannot be placed: row height {row_height:.1}pt exceeds \
         the usable column height {column_height:.1}pt"
    )]
    UnplaceableItem {
        name: String,
        row_height: f64,
        column_height: f64,
    },

    /// JSON input failed to parse as a valid catalog. The hint classifies
    /// the failure (syntax, schema mismatch, truncation) for the caller.
    #[error("failed to parse catalog: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },

    /// The finished document could not be persisted.
    #[error("failed to write document: {0}")]
    Write(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for TarifaError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the catalog schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input — is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        TarifaError::Parse { source: e, hint }
    }
}
