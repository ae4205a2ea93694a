//! Proportional 1-bit fonts in the Adafruit GFX layout
//!
//! Every glyph is a tight bounding box placed against the baseline by its
//! own offsets. Bits run MSB first and carry on from one row into the next
//! without padding, so a glyph's bitmap is `(width * height + 7) / 8` bytes.
//!
//! With a background color the whole line band behind a glyph is painted,
//! from its left extent (never left of the line's filled-x watermark) to
//! the larger of its advance and its ink.

use pixfont_core::{DrawSurface, FontFace, FontKind, Metrics, Rect, TextStyle};

use crate::blit::{bit_runs, choose_strategy, BlitStrategy, Pen, RunStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GfxGlyph {
    /// Offset of the glyph's first byte in the font bitmap
    pub bitmap_offset: u32,
    pub width: u8,
    pub height: u8,
    pub x_advance: u8,
    /// Left edge relative to the pen
    pub x_offset: i8,
    /// Top edge relative to the baseline, negative above it
    pub y_offset: i8,
}

impl GfxGlyph {
    pub const fn new(bitmap_offset: u32, width: u8, height: u8, x_advance: u8, x_offset: i8, y_offset: i8) -> Self {
        Self {
            bitmap_offset,
            width,
            height,
            x_advance,
            x_offset,
            y_offset,
        }
    }
}

/// A contiguous range of code points starting at `first`
#[derive(Debug, Clone, Copy)]
pub struct GfxFont {
    pub bitmap: &'static [u8],
    pub glyphs: &'static [GfxGlyph],
    pub first: u16,
    /// Line advance in pixels
    pub y_advance: u8,
    ascent: i32,
    descent: i32,
    widest: i32,
}

impl GfxFont {
    /// The line band spans the tallest ascent and the deepest descent of
    /// any glyph
    pub const fn new(bitmap: &'static [u8], glyphs: &'static [GfxGlyph], first: u16, y_advance: u8) -> Self {
        let (mut ascent, mut descent, mut widest) = (0, 0, 0);
        let mut i = 0;
        while i < glyphs.len() {
            let g = &glyphs[i];
            let above = -(g.y_offset as i32);
            let below = g.y_offset as i32 + g.height as i32;
            if above > ascent {
                ascent = above;
            }
            if below > descent {
                descent = below;
            }
            if g.x_advance as i32 > widest {
                widest = g.x_advance as i32;
            }
            i += 1;
        }
        Self {
            bitmap,
            glyphs,
            first,
            y_advance,
            ascent,
            descent,
            widest,
        }
    }

    pub fn glyph(&self, code: u16) -> Option<GfxGlyph> {
        let index = code.checked_sub(self.first)?;
        self.glyphs.get(index as usize).copied()
    }

    pub fn ascent(&self) -> i32 {
        self.ascent
    }

    pub fn line_height(&self) -> i32 {
        self.ascent + self.descent
    }

    fn row_bits(&self, g: GfxGlyph, row: usize) -> impl Iterator<Item = bool> + '_ {
        let width = g.width as usize;
        let base = g.bitmap_offset as usize;
        (row * width..(row + 1) * width).map(move |bit| {
            self.bitmap
                .get(base + bit / 8)
                .is_some_and(|byte| byte & (0x80 >> (bit % 8)) != 0)
        })
    }

    /// Draw one glyph with the line's top-left corner at `x`, `y`
    ///
    /// Returns the scaled advance, or 0 when the font has no glyph for
    /// `code`. When filling, `filled_x` moves to the right edge of the
    /// painted band.
    pub fn draw<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        x: i32,
        y: i32,
        code: u16,
        style: &TextStyle,
        filled_x: &mut i32,
    ) -> i32 {
        let Some(g) = self.glyph(code) else {
            return 0;
        };
        let pen = Pen::new(surface, style);
        let advance = g.x_advance as i32 * pen.sx;
        let (w, h) = (g.width as i32, g.height as i32);
        let gx = x + g.x_offset as i32 * pen.sx;
        let gy = y + (self.ascent + g.y_offset as i32) * pen.sy;
        let ink = Rect::new(gx, gy, w * pen.sx, h * pen.sy);

        let (left, right) = if pen.fill_bg {
            ((*filled_x).max(x.min(gx)), (gx + w * pen.sx).max(x + advance))
        } else {
            (0, 0)
        };
        let band = Rect::new(left, y, right - left, self.line_height() * pen.sy);

        // streaming needs the ink inside the band
        let strategy = if !pen.clip.intersects(band) && !pen.clip.intersects(ink) {
            BlitStrategy::Skip
        } else if gx >= left && choose_strategy(&pen.clip, style, band) == BlitStrategy::Stream {
            BlitStrategy::Stream
        } else {
            BlitStrategy::RectRuns
        };

        match strategy {
            BlitStrategy::Skip => {},
            BlitStrategy::RectRuns => {
                surface.begin_write();
                let below = gy + h * pen.sy;
                pen.run(surface, false, band.x, band.y, band.w, gy - band.y);
                pen.run(surface, false, band.x, below, band.w, band.y + band.h - below);
                for row in 0..h {
                    let ry = gy + row * pen.sy;
                    let mut px = gx;
                    // first background pixel of the row not yet painted
                    let mut bg_from = left;
                    for (on, len) in bit_runs(self.row_bits(g, row as usize)) {
                        let end = px + len * pen.sx;
                        if on {
                            if px > bg_from {
                                pen.run(surface, false, bg_from, ry, px - bg_from, pen.sy);
                            }
                            pen.run(surface, true, px, ry, end - px, pen.sy);
                            bg_from = bg_from.max(end);
                        }
                        px = end;
                    }
                    if right > bg_from {
                        pen.run(surface, false, bg_from, ry, right - bg_from, pen.sy);
                    }
                }
                surface.end_write();
            },
            BlitStrategy::Stream => {
                surface.begin_write();
                surface.set_window(band.x, band.y, band.w, band.h);
                let mut stream = RunStream::default();
                let span = band.w as u32;
                for r in 0..band.h {
                    let row = r - (gy - band.y);
                    if !(0..h).contains(&row) {
                        stream.push(surface, pen.back, span);
                        continue;
                    }
                    stream.push(surface, pen.back, (gx - left) as u32);
                    for (on, len) in bit_runs(self.row_bits(g, row as usize)) {
                        stream.push(surface, pen.color(on), (len * pen.sx) as u32);
                    }
                    stream.push(surface, pen.back, (right - ink.x - ink.w) as u32);
                }
                stream.finish(surface);
                surface.end_write();
            },
        }

        if pen.fill_bg {
            *filled_x = right;
        }
        advance
    }
}

impl FontFace for GfxFont {
    fn kind(&self) -> FontKind {
        FontKind::Gfx
    }

    fn default_metrics(&self) -> Metrics {
        Metrics {
            width: self.widest,
            x_advance: self.widest,
            x_offset: 0,
            y_offset: 0,
            baseline: self.ascent,
            y_advance: self.y_advance as i32,
            height: self.line_height(),
        }
    }

    /// Blank glyphs such as the space report their advance as width, so
    /// that streamed text does not skip them
    fn metrics_for(&self, code: u16) -> Option<Metrics> {
        let g = self.glyph(code)?;
        let width = if g.width == 0 { g.x_advance } else { g.width };
        Some(Metrics {
            width: width as i32,
            x_advance: g.x_advance as i32,
            x_offset: g.x_offset as i32,
            ..self.default_metrics()
        })
    }
}
