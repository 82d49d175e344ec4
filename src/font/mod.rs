//! # Font Metrics
//!
//! Text measurement for the two standard PDF fonts the typesetter uses:
//! Helvetica for item rows and Helvetica-Bold for category headers. Standard
//! fonts need no embedding, so the PDF writer only references them by name;
//! this module supplies the advance widths the layout side needs for
//! right-aligning prices and truncating overlong names.

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// The standard PDF fonts this engine draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The PDF BaseFont name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams (`/F1`, `/F2`).
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
        }
    }
}

/// Shared measurement context used by the metrics probe and the row
/// renderer.
pub struct FontContext;

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: StandardFont, font_size: f64) -> f64 {
        font.metrics().char_width(ch, font_size)
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font: StandardFont, font_size: f64) -> f64 {
        font.metrics().measure_string(text, font_size)
    }

    /// Truncate `text` with a trailing ellipsis so it fits in `max_width`
    /// points. Returns the text unchanged when it already fits.
    pub fn truncate_to_width(
        &self,
        text: &str,
        font: StandardFont,
        font_size: f64,
        max_width: f64,
    ) -> String {
        if self.measure_string(text, font, font_size) <= max_width {
            return text.to_string();
        }
        let ellipsis_w = self.measure_string("\u{2026}", font, font_size);
        if ellipsis_w > max_width {
            return String::new();
        }
        let mut out = String::new();
        let mut width = 0.0;
        for ch in text.chars() {
            let w = self.char_width(ch, font, font_size);
            if width + w + ellipsis_w > max_width {
                break;
            }
            width += w;
            out.push(ch);
        }
        // Drop trailing whitespace before the ellipsis
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\u{2026}');
        out
    }
}
