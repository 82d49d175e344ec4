//! # Page Chrome
//!
//! The repeating header and footer bands. The packer calls
//! [`draw_page_chrome`] through its new-page callback exactly once per page,
//! before any content chunk lands there; this module knows nothing about
//! columns or categories, only page geometry and the page number.
//!
//! "Page X of N" can only be stamped once the packer has finished and the
//! total is known, so [`stamp_page_numbers`] runs as a final pass over every
//! created page.

use crate::font::{FontContext, StandardFont};
use crate::model::{DocInfo, PageGeometry};
use crate::render::HEADER_BAR_COLOR;
use crate::surface::{Color, DrawOp, PageSurface, TextAnchor};

const COMPANY_SIZE: f64 = 16.0;
const TITLE_SIZE: f64 = 11.0;
const CONTACT_SIZE: f64 = 8.0;
const FOOTER_SIZE: f64 = 8.0;

const MUTED: Color = Color {
    r: 0.42,
    g: 0.45,
    b: 0.48,
};

/// Draw the branding/contact header band and the footer rule for one page.
/// `issued` is the pre-formatted issue date shown under the title.
pub fn draw_page_chrome(
    surface: &mut PageSurface,
    _page_number: usize,
    info: &DocInfo,
    geom: &PageGeometry,
    ctx: &FontContext,
    issued: &str,
) {
    let left = geom.margin;
    let right = geom.page_width - geom.margin;
    let top = geom.margin;

    if !info.company.is_empty() {
        surface.push(DrawOp::Text {
            x: left,
            y: top,
            text: ctx.truncate_to_width(
                &info.company,
                StandardFont::HelveticaBold,
                COMPANY_SIZE,
                geom.page_width - 2.0 * geom.margin,
            ),
            font: StandardFont::HelveticaBold,
            size: COMPANY_SIZE,
            color: HEADER_BAR_COLOR,
            anchor: TextAnchor::Left,
        });
    }

    surface.push(DrawOp::Text {
        x: left,
        y: top + COMPANY_SIZE * 1.3,
        text: info.title.clone(),
        font: StandardFont::Helvetica,
        size: TITLE_SIZE,
        color: Color::BLACK,
        anchor: TextAnchor::Left,
    });
    surface.push(DrawOp::Text {
        x: left,
        y: top + COMPANY_SIZE * 1.3 + TITLE_SIZE * 1.4,
        text: format!("Issued {}", issued),
        font: StandardFont::Helvetica,
        size: CONTACT_SIZE,
        color: MUTED,
        anchor: TextAnchor::Left,
    });

    // Contact block, right-aligned, one line per entry.
    let mut contact_y = top;
    for line in &info.contact {
        surface.push(DrawOp::Text {
            x: right,
            y: contact_y,
            text: line.clone(),
            font: StandardFont::Helvetica,
            size: CONTACT_SIZE,
            color: MUTED,
            anchor: TextAnchor::Right,
        });
        contact_y += CONTACT_SIZE * 1.4;
    }

    // Rule separating the band from column content.
    surface.push(DrawOp::Rule {
        x: left,
        y: geom.start_y() - 6.0,
        width: right - left,
        stroke: 0.8,
        color: HEADER_BAR_COLOR,
    });

    // Footer rule above the reserved band; the page number is stamped later.
    surface.push(DrawOp::Rule {
        x: left,
        y: geom.max_y() + 6.0,
        width: right - left,
        stroke: 0.5,
        color: MUTED,
    });
}

/// Final pass: write "Page X of N" into every page's footer band. Only
/// possible after packing, when the total page count is known.
pub fn stamp_page_numbers(pages: &mut [PageSurface], geom: &PageGeometry) {
    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        page.push(DrawOp::Text {
            x: geom.page_width / 2.0,
            y: geom.max_y() + 10.0,
            text: format!("Page {} of {}", index + 1, total),
            font: StandardFont::Helvetica,
            size: FOOTER_SIZE,
            color: MUTED,
            anchor: TextAnchor::Center,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_info() -> DocInfo {
        DocInfo {
            company: "Acme Corp".to_string(),
            title: "Price List".to_string(),
            contact: vec!["sales@acme.example".to_string(), "+1 555 0100".to_string()],
        }
    }

    #[test]
    fn test_chrome_stays_inside_reserved_bands() {
        let geom = PageGeometry::default();
        let ctx = FontContext::new();
        let mut surface = PageSurface::new(geom.page_width, geom.page_height);
        draw_page_chrome(&mut surface, 1, &doc_info(), &geom, &ctx, "26 Aug 2026");

        for op in surface.ops() {
            let top = match op {
                DrawOp::Rect { y, .. } | DrawOp::Rule { y, .. } | DrawOp::Text { y, .. } => *y,
            };
            assert!(
                top < geom.start_y() || top >= geom.max_y(),
                "chrome op at y={} inside the column area",
                top
            );
        }
    }

    #[test]
    fn test_page_numbers_stamped_on_every_page() {
        let geom = PageGeometry::default();
        let mut pages = vec![
            PageSurface::new(geom.page_width, geom.page_height),
            PageSurface::new(geom.page_width, geom.page_height),
            PageSurface::new(geom.page_width, geom.page_height),
        ];
        stamp_page_numbers(&mut pages, &geom);
        for (i, page) in pages.iter().enumerate() {
            let stamped = page.ops().iter().any(|op| {
                matches!(op, DrawOp::Text { text, .. } if text == &format!("Page {} of 3", i + 1))
            });
            assert!(stamped);
        }
    }

    #[test]
    fn test_empty_company_draws_no_company_line() {
        let geom = PageGeometry::default();
        let ctx = FontContext::new();
        let mut surface = PageSurface::new(geom.page_width, geom.page_height);
        let info = DocInfo::default();
        draw_page_chrome(&mut surface, 1, &info, &geom, &ctx, "26 Aug 2026");
        let bold_lines = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { font: StandardFont::HelveticaBold, .. }))
            .count();
        assert_eq!(bold_lines, 0);
    }
}
