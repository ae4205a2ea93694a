//! On-disk layout of the streamed grayscale font format
//!
//! ```text
//! header      24 bytes   count, version, line advance, reserved, ascent, descent
//! records     28 bytes   x count: code, height, width, x advance, y delta, x offset, reserved
//! bitmaps     w*h bytes  x count, one coverage byte per pixel, table order
//! ```
//!
//! All fields are big-endian 32-bit words.

use pixfont_core::codec::{be_i32, be_u32, narrow_i16, narrow_i8, narrow_u16, narrow_u8};

pub const HEADER_LEN: usize = 24;
pub const RECORD_LEN: usize = 28;

/// Absolute offset of glyph record `index`
pub fn record_offset(index: usize) -> u32 {
    (HEADER_LEN + index * RECORD_LEN) as u32
}

/// Decoded font header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontHeader {
    pub glyph_count: u32,
    pub version: u32,
    pub line_advance: u32,
    pub ascent: i32,
    pub descent: i32,
}

impl FontHeader {
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Self {
        let word = |i: usize| be_u32(bytes, i * 4).unwrap_or(0);
        Self {
            glyph_count: word(0),
            version: word(1),
            line_advance: word(2),
            ascent: be_i32(bytes, 16).unwrap_or(0),
            descent: be_i32(bytes, 20).unwrap_or(0),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.glyph_count.to_be_bytes());
        out[4..8].copy_from_slice(&self.version.to_be_bytes());
        out[8..12].copy_from_slice(&self.line_advance.to_be_bytes());
        out[16..20].copy_from_slice(&self.ascent.to_be_bytes());
        out[20..24].copy_from_slice(&self.descent.to_be_bytes());
        out
    }
}

/// Decoded per-glyph record, narrowed to the widths the engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub code: u16,
    pub height: u16,
    pub width: u8,
    pub x_advance: u8,
    /// Distance from the baseline up to the top of the bitmap
    pub y_delta: i16,
    pub x_offset: i8,
}

impl GlyphRecord {
    pub fn parse(bytes: &[u8; RECORD_LEN]) -> Self {
        let word = |i: usize| be_u32(bytes, i * 4).unwrap_or(0);
        Self {
            code: narrow_u16(word(0)),
            height: narrow_u16(word(1)),
            width: narrow_u8(word(2)),
            x_advance: narrow_u8(word(3)),
            y_delta: narrow_i16(word(4)),
            x_offset: narrow_i8(word(5)),
        }
    }

    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let fields = [
            self.code as u32,
            self.height as u32,
            self.width as u32,
            self.x_advance as u32,
            self.y_delta as i32 as u32,
            self.x_offset as i32 as u32,
            0,
        ];
        let mut out = [0u8; RECORD_LEN];
        for (chunk, field) in out.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        out
    }

    /// Size of this glyph's bitmap in bytes
    pub fn bitmap_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Descent below the baseline implied by the bitmap extent
    pub fn descent(&self) -> i32 {
        self.height as i32 - self.y_delta as i32
    }

    /// Whether this glyph is representative when measuring the font's
    /// real ascent and descent
    ///
    /// Everything above Latin-1 counts, plus the printable band
    /// 0x21..0x9F minus DEL. The ideographic space is excluded; its
    /// box is routinely oversized.
    pub fn counts_toward_extent(&self) -> bool {
        let code = self.code;
        let in_band = code > 0xFF || (code > 0x20 && code < 0xA0 && code != 0x7F);
        in_band && code != 0x3000
    }
}

/// Serialise a complete font image; used by tests and tooling that
/// produce fonts
pub fn encode_font(header: &FontHeader, glyphs: &[(GlyphRecord, Vec<u8>)]) -> Vec<u8> {
    let bitmap_total: usize = glyphs.iter().map(|(_, px)| px.len()).sum();
    let mut out = Vec::with_capacity(HEADER_LEN + glyphs.len() * RECORD_LEN + bitmap_total);
    out.extend_from_slice(&header.to_bytes());
    for (record, _) in glyphs {
        out.extend_from_slice(&record.to_bytes());
    }
    for (_, pixels) in glyphs {
        out.extend_from_slice(pixels);
    }
    out
}
