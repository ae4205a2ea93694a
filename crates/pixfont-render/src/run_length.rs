//! Run-length fonts covering printable ASCII
//!
//! A glyph is one byte stream. Each byte is a run: bit 7 selects
//! foreground, the low 7 bits hold the run length minus one. Runs flow
//! across row ends within the glyph.

use pixfont_core::{DrawSurface, FontFace, FontKind, Metrics, Rect, TextStyle};

use crate::blit::{choose_strategy, BlitStrategy, Pen, RunStream};
use crate::row_bitmap::ascii_slot;

#[derive(Debug, Clone, Copy)]
pub struct RunLengthFont {
    pub widths: &'static [u8],
    pub glyphs: &'static [&'static [u8]],
    pub height: u8,
    pub baseline: u8,
}

/// Decode run bytes; a stream that ends early is padded with background
fn runs(data: &[u8]) -> impl Iterator<Item = (bool, i32)> + '_ {
    data.iter()
        .map(|&b| (b & 0x80 != 0, (b & 0x7F) as i32 + 1))
        .chain(std::iter::repeat((false, i32::MAX)))
}

impl RunLengthFont {
    fn glyph(&self, code: u16) -> Option<(i32, &'static [u8])> {
        let slot = ascii_slot(code)?;
        Some((*self.widths.get(slot)? as i32, *self.glyphs.get(slot)?))
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, x: i32, y: i32, code: u16, style: &TextStyle) -> i32 {
        let Some((width, data)) = self.glyph(code) else {
            return 0;
        };
        let pen = Pen::new(surface, style);
        let advance = width * pen.sx;
        let height = self.height as i32;
        if width <= 0 || height <= 0 {
            return advance.max(0);
        }
        let bounds = Rect::new(x, y, advance, height * pen.sy);

        match choose_strategy(&pen.clip, style, bounds) {
            BlitStrategy::Skip => {},
            BlitStrategy::RectRuns => {
                surface.begin_write();
                let (mut row, mut col) = (0, 0);
                for (on, mut left) in runs(data) {
                    while left > 0 && row < height {
                        let len = left.min(width - col);
                        pen.run(surface, on, x + col * pen.sx, y + row * pen.sy, len * pen.sx, pen.sy);
                        left -= len;
                        col += len;
                        if col == width {
                            col = 0;
                            row += 1;
                        }
                    }
                    if row >= height {
                        break;
                    }
                }
                surface.end_write();
            },
            BlitStrategy::Stream => {
                surface.begin_write();
                surface.set_window(x, y, advance, height);
                let mut stream = RunStream::default();
                let mut remaining = width * height;
                for (on, len) in runs(data) {
                    let len = len.min(remaining);
                    stream.push(surface, pen.color(on), (len * pen.sx) as u32);
                    remaining -= len;
                    if remaining == 0 {
                        break;
                    }
                }
                stream.finish(surface);
                surface.end_write();
            },
        }
        advance
    }
}

impl FontFace for RunLengthFont {
    fn kind(&self) -> FontKind {
        FontKind::RunLength
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
