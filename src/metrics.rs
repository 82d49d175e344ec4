//! # Metrics Probe
//!
//! The packer's arithmetic runs on exactly two scalar heights: one item row
//! and one category header. Rather than hard-coding constants that would
//! drift the moment the row styling changes, the probe renders one
//! representative row of each kind through the real drawing routines onto a
//! scratch surface, and reads back the height consumed. The scratch surface
//! is never the real output surface and is discarded immediately.
//!
//! The probe runs exactly once per layout run — row styling is uniform for
//! the whole document, so there is nothing to re-measure per category.

use std::fmt;

use crate::error::TarifaError;
use crate::font::FontContext;
use crate::model::{LineItem, TextStyle};
use crate::render;
use crate::surface::PageSurface;

/// The two repeated row kinds a price list is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Item,
    CategoryHeader,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Item => write!(f, "item"),
            RowKind::CategoryHeader => write!(f, "category header"),
        }
    }
}

/// The probed heights. Computed once, read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub item_row_height: f64,
    pub category_header_height: f64,
}

/// Injectable measurement capability. The packer's tests supply a fixed
/// implementation so every packing branch can be exercised without
/// rendering anything.
pub trait RowMetrics {
    /// Height in points one row of `kind` consumes under `style`.
    fn measure(&self, style: &TextStyle, kind: RowKind) -> f64;
}

/// The production probe: a throwaway render against a scratch surface.
pub struct SurfaceProbe<'a> {
    ctx: &'a FontContext,
}

impl<'a> SurfaceProbe<'a> {
    pub fn new(ctx: &'a FontContext) -> Self {
        Self { ctx }
    }
}

impl RowMetrics for SurfaceProbe<'_> {
    fn measure(&self, style: &TextStyle, kind: RowKind) -> f64 {
        let mut scratch = PageSurface::new(200.0, 200.0);
        match kind {
            RowKind::Item => {
                let sample = LineItem {
                    name: "Sample item".to_string(),
                    category: String::new(),
                    display_price: 0.0,
                };
                render::draw_item_row(
                    &mut scratch, 0.0, 0.0, 180.0, &sample, "$", false, self.ctx, style,
                )
            }
            RowKind::CategoryHeader => {
                render::draw_category_header(&mut scratch, 0.0, 0.0, 180.0, "Sample", self.ctx, style)
            }
        }
    }
}

/// Measure both row kinds once. A zero or non-finite height aborts the run:
/// packing with a wrong height guarantees either overflow past the column
/// bottom or pathological under-packing.
pub fn probe(source: &impl RowMetrics, style: &TextStyle) -> Result<Metrics, TarifaError> {
    let item_row_height = checked(source.measure(style, RowKind::Item), RowKind::Item)?;
    let category_header_height = checked(
        source.measure(style, RowKind::CategoryHeader),
        RowKind::CategoryHeader,
    )?;
    Ok(Metrics {
        item_row_height,
        category_header_height,
    })
}

fn checked(height: f64, kind: RowKind) -> Result<f64, TarifaError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(TarifaError::UnmeasurableStyle { kind });
    }
    Ok(height)
}
