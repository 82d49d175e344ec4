//! Integration tests for the Tarifa typesetting pipeline.
//!
//! These tests exercise the full path from JSON input to PDF output.
//! They verify:
//! - JSON deserialization works correctly
//! - The packer produces the right number of pages
//! - PDF output is structurally valid
//! - Planning errors surface before anything is drawn
//! - Every item in the catalog ends up on exactly one page

use tarifa::font::{FontContext, StandardFont};
use tarifa::group::group_items;
use tarifa::layout::{pack, RenderChunk};
use tarifa::metrics::{probe, SurfaceProbe};
use tarifa::model::*;
use tarifa::surface::DrawOp;

// ─── Helpers ────────────────────────────────────────────────────

fn make_item(name: &str, category: &str, price: f64) -> CatalogItem {
    CatalogItem {
        name: name.to_string(),
        category: category.to_string(),
        unit_price: price,
        sale_price: None,
    }
}

fn make_catalog(items: Vec<CatalogItem>) -> Catalog {
    Catalog {
        items,
        info: DocInfo {
            company: "Acme Corp".to_string(),
            title: "Price List".to_string(),
            contact: vec!["sales@acme.example".to_string()],
        },
        options: RenderOptions::default(),
    }
}

fn big_catalog(categories: usize, items_per_category: usize) -> Catalog {
    let mut items = Vec::new();
    for c in 0..categories {
        for i in 0..items_per_category {
            items.push(make_item(
                &format!("Product {:02}-{:03}", c, i),
                &format!("Category {:02}", c),
                (c * 100 + i) as f64 * 0.75,
            ));
        }
    }
    make_catalog(items)
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 50, "PDF too small to be valid");
    assert!(bytes.starts_with(b"%PDF-1.7"), "missing PDF header");
    assert!(
        bytes.windows(5).any(|w| w == b"%%EOF"),
        "missing %%EOF marker"
    );
}

fn count_pdf_pages(bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(bytes);
    text.matches("/Type /Page ").count()
}

/// All chunks a full typeset run would place, via the public pieces.
fn plan_chunks(catalog: &Catalog) -> (Vec<RenderChunk>, usize) {
    let ctx = FontContext::new();
    let options = &catalog.options;
    let items: Vec<LineItem> = catalog
        .items
        .iter()
        .map(|i| LineItem::from_catalog(i, options.price_source))
        .collect();
    let mut buckets = group_items(items, options);
    let metrics = probe(&SurfaceProbe::new(&ctx), &options.style).unwrap();
    let mut pages = 0usize;
    let chunks = pack(&mut buckets, &metrics, &options.geometry, |_| pages += 1).unwrap();
    (chunks, pages)
}

// ─── End to end ─────────────────────────────────────────────────

#[test]
fn test_small_catalog_renders_valid_pdf() {
    let catalog = make_catalog(vec![
        make_item("Anvil", "Hardware", 99.5),
        make_item("Bolt cutter", "Hardware", 34.0),
        make_item("Tape measure", "Hand Tools", 8.75),
    ]);
    let bytes = tarifa::render(&catalog).unwrap();
    assert_valid_pdf(&bytes);
    assert_eq!(count_pdf_pages(&bytes), 1);
}

#[test]
fn test_empty_catalog_renders_chrome_only_page() {
    let catalog = make_catalog(vec![]);
    let pages = tarifa::typeset(&catalog).unwrap();
    assert_eq!(pages.len(), 1);
    // The single page has chrome ops (rules, branding, page number) but no
    // header bars or item rows.
    assert!(!pages[0].ops().is_empty());
    let bytes = tarifa::render(&catalog).unwrap();
    assert_valid_pdf(&bytes);
    assert_eq!(count_pdf_pages(&bytes), 1);
}

#[test]
fn test_large_catalog_spills_onto_multiple_pages() {
    let catalog = big_catalog(12, 40);
    let (chunks, pages) = plan_chunks(&catalog);
    assert!(pages > 1, "480 items must not fit one page");
    let placed: usize = chunks.iter().map(|c| c.items.len()).sum();
    assert_eq!(placed, 480, "every item placed exactly once");

    let bytes = tarifa::render(&catalog).unwrap();
    assert_valid_pdf(&bytes);
    assert_eq!(count_pdf_pages(&bytes), pages);
}

#[test]
fn test_chunks_target_existing_pages_only() {
    let (chunks, pages) = plan_chunks(&big_catalog(6, 55));
    for chunk in &chunks {
        assert!(chunk.page >= 1 && chunk.page <= pages);
    }
}

#[test]
fn test_typeset_is_deterministic() {
    let catalog = big_catalog(8, 33);
    let (a, pages_a) = plan_chunks(&catalog);
    let (b, pages_b) = plan_chunks(&catalog);
    assert_eq!(a, b);
    assert_eq!(pages_a, pages_b);
}

#[test]
fn test_render_json_roundtrip() {
    let json = r#"{
        "info": { "company": "Acme Corp" },
        "options": { "categoryOrder": ["Hand Tools"] },
        "items": [
            { "name": "Claw hammer", "category": "Hand Tools", "unitPrice": 14.25 },
            { "name": "Anvil", "category": "Hardware", "unitPrice": 99.5 }
        ]
    }"#;
    let bytes = tarifa::render_json(json).unwrap();
    assert_valid_pdf(&bytes);
}

#[test]
fn test_render_json_rejects_malformed_input() {
    let err = tarifa::render_json("{ not json").unwrap_err();
    assert!(matches!(err, tarifa::error::TarifaError::Parse { .. }));
    // The message classifies the failure for the caller.
    assert!(err.to_string().contains("Hint:"), "message: {}", err);
}

#[test]
fn test_parse_hint_classifies_schema_mismatch() {
    // Valid JSON, wrong shape: items must be an array of objects.
    let err = tarifa::render_json(r#"{ "items": [42] }"#).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("catalog schema"), "message: {}", msg);
}

#[test]
fn test_sale_price_source_changes_printed_price() {
    let mut catalog = make_catalog(vec![CatalogItem {
        name: "Orbital sander".to_string(),
        category: "Power Tools".to_string(),
        unit_price: 61.0,
        sale_price: Some(49.99),
    }]);

    let find_price = |catalog: &Catalog, needle: &str| -> bool {
        let pages = tarifa::typeset(catalog).unwrap();
        pages.iter().any(|p| {
            p.ops()
                .iter()
                .any(|op| matches!(op, DrawOp::Text { text, .. } if text.contains(needle)))
        })
    };

    catalog.options.price_source = PriceSource::Unit;
    assert!(find_price(&catalog, "61.00"));
    catalog.options.price_source = PriceSource::Sale;
    assert!(find_price(&catalog, "49.99"));
}

#[test]
fn test_every_page_carries_page_number() {
    let catalog = big_catalog(10, 45);
    let pages = tarifa::typeset(&catalog).unwrap();
    let total = pages.len();
    for (i, page) in pages.iter().enumerate() {
        let label = format!("Page {} of {}", i + 1, total);
        let stamped = page
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == &label));
        assert!(stamped, "missing '{}'", label);
    }
}

#[test]
fn test_category_headers_drawn_once_each() {
    let catalog = big_catalog(7, 20);
    let pages = tarifa::typeset(&catalog).unwrap();
    for c in 0..7 {
        let name = format!("Category {:02}", c);
        let bars = pages
            .iter()
            .flat_map(|p| p.ops())
            .filter(|op| {
                matches!(
                    op,
                    DrawOp::Text { text, font: StandardFont::HelveticaBold, size, .. }
                        if text == &name && *size == catalog.options.style.header_font_size
                )
            })
            .count();
        assert_eq!(bars, 1, "category '{}' header drawn {} times", name, bars);
    }
}

#[test]
fn test_unplaceable_item_aborts_cleanly() {
    let mut catalog = make_catalog(vec![make_item("Anvil", "Hardware", 99.5)]);
    // Shrink the page until not even one header + row fits a column.
    catalog.options.geometry = PageGeometry {
        page_height: 160.0,
        margin: 40.0,
        header_reserved: 50.0,
        footer_reserved: 20.0,
        ..PageGeometry::default()
    };
    let err = tarifa::render(&catalog).unwrap_err();
    assert!(matches!(
        err,
        tarifa::error::TarifaError::UnplaceableItem { .. }
    ));
}

#[test]
fn test_render_to_file_persists_document() {
    let catalog = make_catalog(vec![make_item("Anvil", "Hardware", 99.5)]);
    let dir = std::env::temp_dir();
    let path = dir.join("tarifa_integration_test.pdf");
    tarifa::render_to_file(&catalog, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_valid_pdf(&bytes);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_write_failure_is_surfaced() {
    let catalog = make_catalog(vec![make_item("Anvil", "Hardware", 99.5)]);
    let path = std::path::Path::new("/nonexistent-dir/out.pdf");
    let err = tarifa::render_to_file(&catalog, path).unwrap_err();
    assert!(matches!(err, tarifa::error::TarifaError::Write(_)));
}
