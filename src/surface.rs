//! # Page Surface
//!
//! The in-memory drawing surface the layout side writes to. A surface is an
//! ordered list of primitive draw ops in top-left page coordinates; the PDF
//! writer flips them into PDF's bottom-left space at serialization time.
//!
//! Surfaces are cheap to create, which matters twice: the metrics probe
//! renders one throwaway row onto a scratch surface that is discarded
//! immediately, and the chrome pass appends the page-number op to every
//! surface after the packer has finished.

use crate::font::StandardFont;

/// An RGB color, channels 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

/// Horizontal anchoring for a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// `x` is the left edge of the run.
    Left,
    /// `x` is the right edge; the run extends leftward.
    Right,
    /// `x` is the center of the run.
    Center,
}

/// A primitive drawing operation.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// A filled rectangle. `y` is the top edge.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    /// A horizontal rule.
    Rule {
        x: f64,
        y: f64,
        width: f64,
        stroke: f64,
        color: Color,
    },
    /// A single-line text run. `y` is the top of the line box; the writer
    /// derives the baseline from the font size.
    Text {
        x: f64,
        y: f64,
        text: String,
        font: StandardFont,
        size: f64,
        color: Color,
        anchor: TextAnchor,
    },
}

/// One page's worth of draw ops.
#[derive(Debug, Clone)]
pub struct PageSurface {
    pub width: f64,
    pub height: f64,
    ops: Vec<DrawOp>,
}

impl PageSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// The bottom-most extent any op reaches, measured from the top of the
    /// surface. This is what the metrics probe reads back after a throwaway
    /// render.
    pub fn extent(&self) -> f64 {
        self.ops
            .iter()
            .map(|op| match op {
                DrawOp::Rect { y, height, .. } => y + height,
                DrawOp::Rule { y, stroke, .. } => y + stroke,
                DrawOp::Text { y, size, .. } => y + size,
            })
            .fold(0.0, f64::max)
    }
}
