//! # Tarifa
//!
//! A page-native price-list typesetter.
//!
//! A price list is hundreds of short priced rows grouped under category
//! headers, typeset into two columns per fixed-size page. Laying that out on
//! an infinite canvas and slicing afterwards loses rows at slice points,
//! orphans headers at column bottoms, and leaves columns of wildly uneven
//! height. Tarifa does the opposite: **the column bottom is a hard
//! constraint on every placement decision.** Categories split across columns
//! and pages without losing or duplicating a single row, headers are never
//! stranded, and a new page opens only when both columns are genuinely full.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — Catalog: items, geometry, styling, branding
//!       ↓
//!   [group]    — Ordered category buckets, items sorted
//!       ↓
//!   [metrics]  — One-time probe of the two row heights
//!       ↓
//!   [layout]   — Two-column greedy packer, emits placement chunks
//!       ↓
//!   [render]   — Chunks drawn onto page surfaces (+ [chrome] bands)
//!       ↓
//!   [pdf]      — Serialize surfaces to PDF bytes
//! ```
//!
//! Everything is single-threaded and deterministic: the same catalog and
//! options always produce byte-identical placement.

pub mod chrome;
pub mod error;
pub mod font;
pub mod group;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod pdf;
pub mod render;
pub mod surface;

use chrono::Local;

use error::TarifaError;
use font::FontContext;
use group::group_items;
use metrics::SurfaceProbe;
use model::{Catalog, LineItem};
use pdf::PdfWriter;
use surface::PageSurface;

/// Lay out a catalog into finished page surfaces.
///
/// This is the whole pipeline short of serialization: group, probe, pack,
/// draw chunks, stamp page numbers. Planning errors (unmeasurable style,
/// unplaceable item) surface before any page exists.
pub fn typeset(catalog: &Catalog) -> Result<Vec<PageSurface>, TarifaError> {
    let options = &catalog.options;
    let geom = &options.geometry;
    let ctx = FontContext::new();

    let items: Vec<LineItem> = catalog
        .items
        .iter()
        .map(|item| LineItem::from_catalog(item, options.price_source))
        .collect();
    let mut buckets = group_items(items, options);

    let row_metrics = metrics::probe(&SurfaceProbe::new(&ctx), &options.style)?;

    let issued = Local::now().format("%d %b %Y").to_string();
    let mut pages: Vec<PageSurface> = Vec::new();
    let chunks = layout::pack(&mut buckets, &row_metrics, geom, |page_number| {
        let mut surface = PageSurface::new(geom.page_width, geom.page_height);
        chrome::draw_page_chrome(&mut surface, page_number, &catalog.info, geom, &ctx, &issued);
        pages.push(surface);
    })?;

    for chunk in &chunks {
        render::draw_chunk(&mut pages[chunk.page - 1], chunk, &buckets, &ctx, options);
    }

    chrome::stamp_page_numbers(&mut pages, geom);
    Ok(pages)
}

/// Render a catalog to PDF bytes.
///
/// This is the primary entry point: call with the full item list, receive a
/// finished document or an error. No partial or streaming output.
pub fn render(catalog: &Catalog) -> Result<Vec<u8>, TarifaError> {
    let pages = typeset(catalog)?;
    let writer = PdfWriter::new();
    Ok(writer.write(&pages, &catalog.info))
}

/// Render a catalog described as JSON to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>, TarifaError> {
    let catalog: Catalog = serde_json::from_str(json)?;
    render(&catalog)
}

/// Render a catalog and persist the document at `path`.
///
/// The layout plan is computed before the write; a write failure leaves the
/// plan intact, so the caller may retry against a different destination.
pub fn render_to_file(catalog: &Catalog, path: &std::path::Path) -> Result<(), TarifaError> {
    let bytes = render(catalog)?;
    std::fs::write(path, &bytes)?;
    Ok(())
}
