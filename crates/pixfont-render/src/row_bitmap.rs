//! Row-packed 1-bit fonts covering printable ASCII
//!
//! Each glyph row is packed MSB first and padded to a byte boundary. The
//! rightmost column of every glyph is a spacing margin that carries no bits.

use pixfont_core::{DrawSurface, FontFace, FontKind, Metrics, Rect, TextStyle};

use crate::blit::{bit_runs, choose_strategy, BlitStrategy, Pen, RunStream};

/// First code point stored by the ASCII-range fonts
pub const FIRST_CODE: u16 = 32;
/// Glyphs stored by the ASCII-range fonts
pub const GLYPH_COUNT: usize = 96;

/// Slot of `code` in an ASCII-range table
pub(crate) fn ascii_slot(code: u16) -> Option<usize> {
    let slot = code.wrapping_sub(FIRST_CODE) as usize;
    (slot < GLYPH_COUNT).then_some(slot)
}

/// Proportional font with one packed bitmap per printable ASCII glyph
#[derive(Debug, Clone, Copy)]
pub struct RowBitmapFont {
    /// Advance per glyph, margin column included
    pub widths: &'static [u8],
    pub glyphs: &'static [&'static [u8]],
    pub height: u8,
    pub baseline: u8,
}

impl RowBitmapFont {
    /// Bytes per packed row of a glyph `width` columns wide
    pub const fn row_bytes(width: u8) -> usize {
        (width as usize + 6) >> 3
    }

    fn glyph(&self, code: u16) -> Option<(i32, &'static [u8])> {
        let slot = ascii_slot(code)?;
        Some((*self.widths.get(slot)? as i32, *self.glyphs.get(slot)?))
    }

    /// Draw one glyph; returns the scaled advance, or 0 outside printable
    /// ASCII
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, x: i32, y: i32, code: u16, style: &TextStyle) -> i32 {
        let Some((width, bits)) = self.glyph(code) else {
            return 0;
        };
        let layout = PackedRows {
            bits,
            width,
            height: self.height as i32,
            stride: Self::row_bytes(width as u8),
            margin: 1,
        };
        layout.draw(surface, x, y, style)
    }
}

impl FontFace for RowBitmapFont {
    fn kind(&self) -> FontKind {
        FontKind::RowBitmap
    }

    fn default_metrics(&self) -> Metrics {
        let space = self.widths.first().copied().unwrap_or(0) as i32;
        Metrics {
            width: space,
            x_advance: space,
            x_offset: 0,
            y_offset: 0,
            baseline: self.baseline as i32,
            y_advance: self.height as i32,
            height: self.height as i32,
        }
    }

    fn metrics_for(&self, code: u16) -> Option<Metrics> {
        let (width, _) = self.glyph(code)?;
        Some(Metrics {
            width,
            x_advance: width,
            ..self.default_metrics()
        })
    }
}

/// Bits of one packed row, read by shifting a working byte and fetching
/// a new one every 8 columns
pub(crate) struct RowBits<'a> {
    row: &'a [u8],
    line: u8,
    col: usize,
    end: usize,
}

impl<'a> RowBits<'a> {
    pub fn new(row: &'a [u8], end: usize) -> Self {
        Self {
            row,
            line: 0,
            col: 0,
            end,
        }
    }
}

impl Iterator for RowBits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.col >= self.end {
            return None;
        }
        if self.col & 7 == 0 {
            self.line = self.row.get(self.col >> 3).copied().unwrap_or(0);
        } else {
            self.line <<= 1;
        }
        self.col += 1;
        Some(self.line & 0x80 != 0)
    }
}

/// A 1-bit glyph stored as byte-padded rows
pub(crate) struct PackedRows<'a> {
    pub bits: &'a [u8],
    /// Advance width in columns, margin included
    pub width: i32,
    pub height: i32,
    pub stride: usize,
    /// Trailing background-only columns
    pub margin: i32,
}

impl PackedRows<'_> {
    fn row(&self, row: i32) -> RowBits<'_> {
        let start = (row as usize * self.stride).min(self.bits.len());
        let ink = (self.width - self.margin).max(0) as usize;
        RowBits::new(&self.bits[start..], ink)
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, x: i32, y: i32, style: &TextStyle) -> i32 {
        let pen = Pen::new(surface, style);
        let advance = self.width * pen.sx;
        if self.width <= 0 || self.height <= 0 {
            return advance.max(0);
        }
        let ink = (self.width - self.margin).max(0);
        let bounds = Rect::new(x, y, advance, self.height * pen.sy);

        match choose_strategy(&pen.clip, style, bounds) {
            BlitStrategy::Skip => {},
            BlitStrategy::RectRuns => {
                surface.begin_write();
                if pen.fill_bg && ink < self.width {
                    pen.run(
                        surface,
                        false,
                        x + ink * pen.sx,
                        y,
                        (self.width - ink) * pen.sx,
                        self.height * pen.sy,
                    );
                }
                for row in 0..self.height {
                    let ry = y + row * pen.sy;
                    if ry > pen.clip.bottom || ry + pen.sy <= pen.clip.top {
                        continue;
                    }
                    let mut col = 0;
                    for (on, len) in bit_runs(self.row(row)) {
                        pen.run(surface, on, x + col * pen.sx, ry, len * pen.sx, pen.sy);
                        col += len;
                    }
                }
                surface.end_write();
            },
            BlitStrategy::Stream => {
                surface.begin_write();
                surface.set_window(x, y, advance, self.height);
                let mut stream = RunStream::default();
                for row in 0..self.height {
                    for on in self.row(row) {
                        stream.push(surface, pen.color(on), pen.sx as u32);
                    }
                    stream.push(surface, pen.back, ((self.width - ink) * pen.sx) as u32);
                }
                stream.finish(surface);
                surface.end_write();
            },
        }
        advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_bits_refetch_every_eight_columns() {
        let row = [0b1000_0001, 0b0100_0000];
        let bits: Vec<bool> = RowBits::new(&row, 10).collect();
        let mut expected = vec![false; 10];
        expected[0] = true;
        expected[7] = true;
        expected[9] = true;
        assert_eq!(bits, expected);
    }

    #[test]
    fn ascii_slots() {
        assert_eq!(ascii_slot(32), Some(0));
        assert_eq!(ascii_slot(127), Some(95));
        assert_eq!(ascii_slot(128), None);
        assert_eq!(ascii_slot(31), None);
        assert_eq!(RowBitmapFont::row_bytes(9), 1);
        assert_eq!(RowBitmapFont::row_bytes(10), 2);
    }
}
