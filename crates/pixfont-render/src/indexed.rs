//! Sparse bitmap fonts: a sorted code point index over fixed-size cells
//!
//! Code points below 0x100 use the half-width cell, everything else the
//! full width. Every cell occupies `height` rows of `(width + 7) / 8` bytes
//! whichever width applies.

use pixfont_core::{DrawSurface, FontFace, FontKind, Metrics, Rect, TextStyle};

use crate::blit::{choose_strategy, fill_clipped, BlitStrategy};
use crate::row_bitmap::PackedRows;

#[derive(Debug, Clone, Copy)]
pub struct IndexedFont {
    /// Strictly ascending code points, one per stored cell
    pub index: &'static [u16],
    pub bitmaps: &'static [u8],
    pub width: u8,
    pub half_width: u8,
    pub height: u8,
    pub baseline: u8,
}

impl IndexedFont {
    pub fn glyph_width(&self, code: u16) -> i32 {
        if code < 0x100 {
            self.half_width as i32
        } else {
            self.width as i32
        }
    }

    fn row_bytes(&self) -> usize {
        (self.width as usize + 7) >> 3
    }

    fn cell(&self, slot: usize) -> &'static [u8] {
        let size = self.row_bytes() * self.height as usize;
        let start = (slot * size).min(self.bitmaps.len());
        let end = (start + size).min(self.bitmaps.len());
        &self.bitmaps[start..end]
    }

    /// Draw one glyph; a missing code point paints its advance box in the
    /// background color (when filling) and still advances
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, x: i32, y: i32, code: u16, style: &TextStyle) -> i32 {
        let width = self.glyph_width(code);
        match self.index.binary_search(&code) {
            Ok(slot) => PackedRows {
                bits: self.cell(slot),
                width,
                height: self.height as i32,
                stride: self.row_bytes(),
                margin: 0,
            }
            .draw(surface, x, y, style),
            Err(_) => {
                let advance = width * style.sx();
                if style.fills_background() {
                    let clip = surface.clip_rect();
                    let blank = Rect::new(x, y, advance, self.height as i32 * style.sy());
                    if choose_strategy(&clip, style, blank) != BlitStrategy::Skip {
                        let back = surface.convert(style.back);
                        surface.begin_write();
                        fill_clipped(surface, &clip, blank, back);
                        surface.end_write();
                    }
                }
                advance
            },
        }
    }
}

impl FontFace for IndexedFont {
    fn kind(&self) -> FontKind {
        FontKind::Indexed
    }

    fn default_metrics(&self) -> Metrics {
        Metrics {
            width: self.half_width as i32,
            x_advance: self.half_width as i32,
            x_offset: 0,
            y_offset: 0,
            baseline: self.baseline as i32,
            y_advance: self.height as i32,
            height: self.height as i32,
        }
    }

    /// Every code point has metrics: absent ones advance by a blank cell
    fn metrics_for(&self, code: u16) -> Option<Metrics> {
        let width = self.glyph_width(code);
        Some(Metrics {
            width,
            x_advance: width,
            ..self.default_metrics()
        })
    }
}
