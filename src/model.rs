//! # Catalog Model
//!
//! The input representation for the typesetter. A catalog is a flat list of
//! priced items plus the configuration that shapes the output: page geometry,
//! row styling, branding for the page chrome, and the category ordering
//! table. This is designed to be easily produced by an inventory export, a
//! CRM data layer, or direct JSON construction.
//!
//! Everything here is immutable once loaded. One `Catalog` feeds exactly one
//! layout run.

use serde::{Deserialize, Serialize};

/// A complete catalog ready for typesetting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// The flat item list. Order is irrelevant; the grouper re-orders.
    pub items: Vec<CatalogItem>,

    /// Branding and contact block drawn in the page header band.
    #[serde(default)]
    pub info: DocInfo,

    /// Rendering options (price field, category ranking, geometry, style).
    #[serde(default)]
    pub options: RenderOptions,
}

/// One raw catalog entry as supplied by the data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub name: String,
    /// Category label. An empty string is kept as its own category,
    /// never silently dropped.
    #[serde(default)]
    pub category: String,
    /// Regular unit price.
    pub unit_price: f64,
    /// Discounted price, if the item is on sale.
    #[serde(default)]
    pub sale_price: Option<f64>,
}

/// Which price field the document should display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    #[default]
    Unit,
    /// Sale price where present, unit price otherwise.
    Sale,
}

impl CatalogItem {
    /// Resolve the price this run will print for the item.
    pub fn display_price(&self, source: PriceSource) -> f64 {
        match source {
            PriceSource::Unit => self.unit_price,
            PriceSource::Sale => self.sale_price.unwrap_or(self.unit_price),
        }
    }
}

/// One line of the finished document: an item with its resolved price.
/// Produced from `CatalogItem` before grouping; immutable for the rest of
/// the run.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub category: String,
    pub display_price: f64,
}

impl LineItem {
    pub fn from_catalog(item: &CatalogItem, source: PriceSource) -> Self {
        LineItem {
            name: item.name.clone(),
            category: item.category.clone(),
            display_price: item.display_price(source),
        }
    }
}

/// Branding/contact block for the repeating page header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocInfo {
    pub company: String,
    /// Document title printed under the company name.
    #[serde(default = "default_title")]
    pub title: String,
    /// Contact lines drawn on the right-hand side of the header band.
    #[serde(default)]
    pub contact: Vec<String>,
}

fn default_title() -> String {
    "Price List".to_string()
}

impl Default for DocInfo {
    fn default() -> Self {
        DocInfo {
            company: String::new(),
            title: default_title(),
            contact: Vec::new(),
        }
    }
}

/// Caller-facing options for a layout run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Which price field to print.
    pub price_source: PriceSource,
    /// Currency symbol prefixed to every printed price.
    pub currency: String,
    /// Categories in the order they should appear. Unlisted categories sort
    /// after every listed one.
    pub category_order: Vec<String>,
    pub geometry: PageGeometry,
    pub style: TextStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            price_source: PriceSource::default(),
            currency: "$".to_string(),
            category_order: Vec::new(),
            geometry: PageGeometry::default(),
            style: TextStyle::default(),
        }
    }
}

impl RenderOptions {
    /// Priority rank for a category: its position in `category_order`, or a
    /// large fallback so unlisted categories sort last.
    pub fn category_rank(&self, category: &str) -> usize {
        self.category_order
            .iter()
            .position(|c| c == category)
            .unwrap_or(usize::MAX)
    }
}

/// Fixed page geometry for a layout run. Never mutated during layout; every
/// packing decision derives from these numbers plus the probed row metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometry {
    /// Page size in points (1/72 inch). Defaults to A4.
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    /// Vertical band reserved at the top of every page for the chrome.
    pub header_reserved: f64,
    /// Band reserved at the bottom for the footer rule and page number.
    pub footer_reserved: f64,
    /// Horizontal gap between the two columns.
    pub column_gap: f64,
    /// Vertical gap appended below every placed chunk.
    pub chunk_gap: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            page_width: 595.28,
            page_height: 841.89,
            margin: 40.0,
            header_reserved: 78.0,
            footer_reserved: 30.0,
            column_gap: 18.0,
            chunk_gap: 8.0,
        }
    }
}

impl PageGeometry {
    /// Width of one column.
    pub fn column_width(&self) -> f64 {
        (self.page_width - 2.0 * self.margin - self.column_gap) / 2.0
    }

    /// Top edge of column content: below the margin and the header band.
    pub fn start_y(&self) -> f64 {
        self.margin + self.header_reserved
    }

    /// Bottom limit for column content: above the margin and footer band.
    pub fn max_y(&self) -> f64 {
        self.page_height - self.margin - self.footer_reserved
    }

    /// Left edge of a column.
    pub fn column_x(&self, left: bool) -> f64 {
        if left {
            self.margin
        } else {
            self.margin + self.column_width() + self.column_gap
        }
    }
}

/// Text styling for the two repeated row kinds. The metrics probe renders
/// against exactly these values, so the packer's arithmetic can never drift
/// from what the renderer actually draws.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub item_font_size: f64,
    pub header_font_size: f64,
    /// Multiple of font size, CSS-style.
    pub line_height: f64,
    /// Vertical padding above and below each row's text.
    pub row_padding: f64,
    pub header_padding: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            item_font_size: 9.0,
            header_font_size: 10.5,
            line_height: 1.3,
            row_padding: 1.5,
            header_padding: 3.0,
        }
    }
}
