//! # PDF Serializer
//!
//! Takes finished page surfaces and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. We write the raw bytes ourselves
//! because the subset a price list needs — filled rectangles, rules, and
//! single-line text in the two standard Helvetica fonts — is small, and
//! owning the output keeps the engine self-contained.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (catalog, page tree, fonts, pages, streams)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Standard fonts need no embedding: each is a simple Type1 reference with
//! WinAnsiEncoding, which also gives us accented characters for free.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::{FontContext, StandardFont};
use crate::model::DocInfo;
use crate::surface::{DrawOp, PageSurface, TextAnchor};

/// Fraction of the font size from the top of a line box down to the
/// baseline. Matches the ascent of the standard Helvetica faces closely
/// enough for single-line rows.
const BASELINE_RATIO: f64 = 0.8;

pub struct PdfWriter {
    ctx: FontContext,
}

struct PdfObject {
    data: Vec<u8>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            ctx: FontContext::new(),
        }
    }

    /// Serialize finished pages to PDF bytes.
    pub fn write(&self, pages: &[PageSurface], info: &DocInfo) -> Vec<u8> {
        // Object IDs: 0 is the mandatory free-list placeholder, 1 the
        // Catalog, 2 the page tree root, 3/4 the two fonts, then per page a
        // content stream and a page object.
        let mut objects: Vec<PdfObject> = Vec::new();
        objects.push(PdfObject { data: vec![] });
        objects.push(PdfObject { data: vec![] });
        objects.push(PdfObject { data: vec![] });

        let mut font_ids: Vec<(StandardFont, usize)> = Vec::new();
        for font in [StandardFont::Helvetica, StandardFont::HelveticaBold] {
            let id = objects.len();
            let dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            objects.push(PdfObject {
                data: dict.into_bytes(),
            });
            font_ids.push((font, id));
        }

        let font_resources: String = font_ids
            .iter()
            .map(|(font, id)| format!("/{} {} 0 R", font.resource_name(), id))
            .collect::<Vec<_>>()
            .join(" ");

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in pages {
            let content = self.build_content_stream(page);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            objects.push(PdfObject { data: content_data });

            let page_obj_id = objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                page.width, page.height, content_obj_id, font_resources
            );
            objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        // Info dictionary
        let info_obj_id = {
            let id = objects.len();
            let mut dict = String::from("<< ");
            let _ = write!(dict, "/Title ({}) ", escape_pdf_string(&info.title));
            if !info.company.is_empty() {
                let _ = write!(dict, "/Author ({}) ", escape_pdf_string(&info.company));
            }
            let _ = write!(dict, "/Producer (Tarifa 0.3) /Creator (Tarifa) >>");
            objects.push(PdfObject {
                data: dict.into_bytes(),
            });
            id
        };

        serialize(&objects, info_obj_id)
    }

    /// Translate one page's draw ops into PDF content-stream operators,
    /// flipping from top-left into PDF's bottom-left coordinate space.
    fn build_content_stream(&self, page: &PageSurface) -> String {
        let mut stream = String::new();
        let page_h = page.height;

        for op in page.ops() {
            match op {
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    let pdf_y = page_h - y - height;
                    let _ = write!(
                        stream,
                        "q\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                        color.r, color.g, color.b, x, pdf_y, width, height
                    );
                }

                DrawOp::Rule {
                    x,
                    y,
                    width,
                    stroke,
                    color,
                } => {
                    let pdf_y = page_h - y;
                    let _ = write!(
                        stream,
                        "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        color.r,
                        color.g,
                        color.b,
                        stroke,
                        x,
                        pdf_y,
                        x + width,
                        pdf_y
                    );
                }

                DrawOp::Text {
                    x,
                    y,
                    text,
                    font,
                    size,
                    color,
                    anchor,
                } => {
                    let text_w = self.ctx.measure_string(text, *font, *size);
                    let x_left = match anchor {
                        TextAnchor::Left => *x,
                        TextAnchor::Right => x - text_w,
                        TextAnchor::Center => x - text_w / 2.0,
                    };
                    let baseline = page_h - (y + size * BASELINE_RATIO);
                    let _ = write!(
                        stream,
                        "BT\n/{} {:.2} Tf\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        font.resource_name(),
                        size,
                        color.r,
                        color.g,
                        color.b,
                        x_left,
                        baseline,
                        encode_winansi_string(text)
                    );
                }
            }
        }

        stream
    }
}

/// Escape a PDF literal string (used for the Info dictionary, which stays
/// ASCII-ish).
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Encode a text run as a WinAnsi PDF string with escapes, octal-escaping
/// bytes outside the printable ASCII range and substituting `?` for
/// characters WinAnsi cannot represent.
fn encode_winansi_string(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let b = unicode_to_winansi(ch).unwrap_or(b'?');
        match b {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte value.
///
/// WinAnsiEncoding is based on Windows-1252. Most codepoints in 0x20..=0x7E
/// and 0xA0..=0xFF map directly; the 0x80..=0x9F range holds special
/// mappings for smart quotes, bullets, dashes, the euro sign, etc.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// Serialize all objects into the final PDF byte stream.
fn serialize(objects: &[PdfObject], info_obj_id: usize) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = vec![0; objects.len()];

    output.extend_from_slice(b"%PDF-1.7\n");
    output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

    for (i, obj) in objects.iter().enumerate().skip(1) {
        offsets[i] = output.len();
        let header = format!("{} 0 obj\n", i);
        output.extend_from_slice(header.as_bytes());
        output.extend_from_slice(&obj.data);
        output.extend_from_slice(b"\nendobj\n\n");
    }

    let xref_offset = output.len();
    let _ = write!(output, "xref\n0 {}\n", objects.len());
    let _ = write!(output, "0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        let _ = write!(output, "{:010} 00000 n \n", offset);
    }

    let _ = write!(
        output,
        "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len(),
        info_obj_id,
        xref_offset
    );

    output
}
