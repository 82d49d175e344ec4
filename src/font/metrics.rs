//! AFM advance widths for the standard fonts.
//!
//! Widths are in 1/1000 em units, straight from the Adobe AFM files, indexed
//! by ASCII code from 0x20. Characters outside the table fall back to the
//! space width, which is close enough for truncation and right-alignment of
//! the occasional accented character (drawn via WinAnsi in the PDF writer).

use super::StandardFont;

/// Helvetica, codes 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30-0x3F
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50-0x5F
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60-0x6F
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70-0x7E
];

/// Helvetica-Bold, codes 0x20..=0x7E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30-0x3F
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50-0x5F
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60-0x6F
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70-0x7E
];

/// Width lookup for one standard font.
pub struct StandardFontMetrics {
    widths: &'static [u16; 95],
}

impl StandardFont {
    pub fn metrics(&self) -> StandardFontMetrics {
        let widths = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        StandardFontMetrics { widths }
    }
}

impl StandardFontMetrics {
    /// Advance width of one character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let cp = ch as u32;
        let units = if (0x20..=0x7E).contains(&cp) {
            self.widths[(cp - 0x20) as usize]
        } else {
            self.widths[0]
        };
        units as f64 / 1000.0 * font_size
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_widths_uniform() {
        let m = StandardFont::Helvetica.metrics();
        let w0 = m.char_width('0', 10.0);
        for d in '1'..='9' {
            assert_eq!(m.char_width(d, 10.0), w0);
        }
    }

    #[test]
    fn test_non_ascii_falls_back_to_space() {
        let m = StandardFont::Helvetica.metrics();
        assert_eq!(m.char_width('é', 10.0), m.char_width(' ', 10.0));
    }

    #[test]
    fn test_measure_scales_with_size() {
        let m = StandardFont::HelveticaBold.metrics();
        let small = m.measure_string("Total", 8.0);
        let large = m.measure_string("Total", 16.0);
        assert!((large - 2.0 * small).abs() < 1e-9);
    }
}
