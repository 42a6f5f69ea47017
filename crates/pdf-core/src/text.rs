//! Text encoding and rendering utilities

use crate::document::Color;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text color (RGB)
    pub color: Color,
}

/// Encode text for a WinAnsi-encoded standard font
///
/// Latin-1 code points map to themselves and the typographic characters
/// WinAnsi keeps in 0x80..=0x9F (curly quotes, dashes, the euro sign and so
/// on) map to their Windows-1252 codes. Control characters become spaces so
/// multi-line values stay on one baseline, and anything the encoding cannot
/// represent becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x00..=0x1F | 0x7F..=0x9F => b' ',
            code @ 0x20..=0xFF => code as u8,
            _ => cp1252_upper(c).unwrap_or(b'?'),
        })
        .collect()
}

/// Windows-1252 code for a character outside Latin-1, if it has one
fn cp1252_upper(c: char) -> Option<u8> {
    let code = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Wrap encoded bytes in a PDF literal string, escaping delimiters
///
/// # Example
/// `a(b)` becomes `(a\(b\))`
pub fn escape_literal(encoded: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded.len() + 2);
    out.push(b'(');
    for &byte in encoded {
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
    out
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, rg, Tf, Td, Tj, ET) that render a
/// literal string with its baseline starting at `x`/`y`.
///
/// # Arguments
/// * `literal` - Escaped literal string including parentheses
/// * `x` - X coordinate in points (from left)
/// * `y` - Y coordinate in points (from bottom)
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    literal: &[u8],
    x: f64,
    y: f64,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = Vec::new();
    ops.extend_from_slice(b"BT\n");
    ops.extend_from_slice(
        format!("{} {} {} rg\n", ctx.color.r, ctx.color.g, ctx.color.b).as_bytes(),
    );
    ops.extend_from_slice(format!("/{} {} Tf\n", ctx.font_name, ctx.font_size).as_bytes());
    ops.extend_from_slice(format!("{x} {y} Td\n").as_bytes());
    ops.extend_from_slice(literal);
    ops.extend_from_slice(b" Tj\nET\n");
    ops
}
