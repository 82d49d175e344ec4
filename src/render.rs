//! # Row Renderer
//!
//! Draws the two row kinds the document is made of: the filled category
//! header bar and the two-field item row (name left, price right). The
//! packer never calls this directly — it emits [`RenderChunk`] placement
//! instructions, and this module consumes them after packing finishes.
//!
//! The metrics probe renders through these same functions, so the heights
//! the packer plans with are exactly the heights these functions consume.

use std::fmt::Write as FmtWrite;

use crate::font::{FontContext, StandardFont};
use crate::group::CategoryBucket;
use crate::layout::RenderChunk;
use crate::model::{LineItem, RenderOptions, TextStyle};
use crate::surface::{Color, DrawOp, PageSurface, TextAnchor};

/// Fill behind the category header text.
pub const HEADER_BAR_COLOR: Color = Color {
    r: 0.18,
    g: 0.25,
    b: 0.34,
};

/// Tint for every other item row.
const ZEBRA_COLOR: Color = Color {
    r: 0.955,
    g: 0.96,
    b: 0.97,
};

/// Horizontal inset for text inside a row.
const TEXT_INSET: f64 = 4.0;

/// Minimum gap kept between a name and its price.
const NAME_PRICE_GAP: f64 = 8.0;

/// Draw one category header bar. Returns the vertical space consumed.
pub fn draw_category_header(
    surface: &mut PageSurface,
    x: f64,
    y: f64,
    width: f64,
    name: &str,
    ctx: &FontContext,
    style: &TextStyle,
) -> f64 {
    let text_h = style.header_font_size * style.line_height;
    let height = text_h + 2.0 * style.header_padding;

    surface.push(DrawOp::Rect {
        x,
        y,
        width,
        height,
        color: HEADER_BAR_COLOR,
    });

    let label = if name.is_empty() { "Uncategorized" } else { name };
    let label = ctx.truncate_to_width(
        label,
        StandardFont::HelveticaBold,
        style.header_font_size,
        width - 2.0 * TEXT_INSET,
    );
    surface.push(DrawOp::Text {
        x: x + TEXT_INSET,
        y: y + style.header_padding,
        text: label,
        font: StandardFont::HelveticaBold,
        size: style.header_font_size,
        color: Color::WHITE,
        anchor: TextAnchor::Left,
    });

    height
}

/// Draw one item row. `zebra` tints the row background for readability.
/// Returns the vertical space consumed.
pub fn draw_item_row(
    surface: &mut PageSurface,
    x: f64,
    y: f64,
    width: f64,
    item: &LineItem,
    currency: &str,
    zebra: bool,
    ctx: &FontContext,
    style: &TextStyle,
) -> f64 {
    let text_h = style.item_font_size * style.line_height;
    let height = text_h + 2.0 * style.row_padding;

    if zebra {
        surface.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color: ZEBRA_COLOR,
        });
    }

    let price = format_price(item.display_price, currency);
    let price_w = ctx.measure_string(&price, StandardFont::Helvetica, style.item_font_size);

    let name_max = width - 2.0 * TEXT_INSET - price_w - NAME_PRICE_GAP;
    let name = ctx.truncate_to_width(
        &item.name,
        StandardFont::Helvetica,
        style.item_font_size,
        name_max.max(0.0),
    );

    surface.push(DrawOp::Text {
        x: x + TEXT_INSET,
        y: y + style.row_padding,
        text: name,
        font: StandardFont::Helvetica,
        size: style.item_font_size,
        color: Color::BLACK,
        anchor: TextAnchor::Left,
    });
    surface.push(DrawOp::Text {
        x: x + width - TEXT_INSET,
        y: y + style.row_padding,
        text: price,
        font: StandardFont::Helvetica,
        size: style.item_font_size,
        color: Color::BLACK,
        anchor: TextAnchor::Right,
    });

    height
}

/// Draw a placed chunk: the header bar when the chunk opens its category,
/// then the chunk's run of item rows.
pub fn draw_chunk(
    surface: &mut PageSurface,
    chunk: &RenderChunk,
    buckets: &[CategoryBucket],
    ctx: &FontContext,
    options: &RenderOptions,
) {
    let bucket = &buckets[chunk.bucket];
    let width = options.geometry.column_width();
    let mut y = chunk.y;

    if chunk.include_header {
        y += draw_category_header(surface, chunk.x, y, width, &bucket.name, ctx, &options.style);
    }

    for index in chunk.items.clone() {
        let item = &bucket.items[index];
        // Parity follows the bucket-wide index so striping stays continuous
        // when a category splits across columns or pages.
        let zebra = index % 2 == 1;
        y += draw_item_row(
            surface,
            chunk.x,
            y,
            width,
            item,
            &options.currency,
            zebra,
            ctx,
            &options.style,
        );
    }
}

/// Format a price with the currency symbol, thousands separators, and two
/// decimals.
pub fn format_price(value: f64, currency: &str) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(currency);
    let _ = write!(out, "{}.{:02}", grouped, frac);
    out
}
