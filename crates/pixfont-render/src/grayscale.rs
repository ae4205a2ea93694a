//! Anti-aliased glyphs streamed from a runtime font
//!
//! Coverage bytes are read from the font's source per draw. With a
//! background color the glyph is composed opaquely: every cell of the
//! line band between the fill watermark and the glyph's right edge is
//! painted once, either as background, a blended pixel, or part of a
//! full-coverage foreground run. With foreground equal to background the
//! glyph is blended onto whatever the surface already shows.

use pixfont_core::{ClipRect, DrawSurface, Metrics, Rect, Rgb888, SourceError, TextStyle};
use pixfont_loader::RuntimeFont;

use crate::blit::fill_clipped;

/// A glyph placed on the surface, in destination pixels
struct Placed<'a> {
    pixels: &'a [u8],
    /// Unscaled bitmap size
    w: i32,
    h: i32,
    /// Top-left of the scaled bitmap
    gx: i32,
    gy: i32,
    sx: i32,
    sy: i32,
}

impl Placed<'_> {
    fn row(&self, r: i32) -> &[u8] {
        let start = (r * self.w) as usize;
        self.pixels.get(start..start + self.w as usize).unwrap_or(&[])
    }

    /// Source columns that can touch the clip
    fn visible_columns(&self, clip: &ClipRect) -> (i32, i32) {
        let first = if self.gx < clip.left {
            (clip.left - self.gx) / self.sx
        } else {
            0
        };
        let end = (clip.right + 1 - self.gx + self.sx - 1).div_euclid(self.sx).clamp(0, self.w);
        (first.min(end), end)
    }

    fn row_visible(&self, ry: i32, clip: &ClipRect) -> bool {
        ry <= clip.bottom && ry + self.sy > clip.top
    }
}

/// Draw `code` from a runtime font with its top-left line corner at `x`, `y`
///
/// `line` is the engine's line metrics (band offset and height);
/// `filled_x` is the background watermark, updated to this glyph's right
/// edge. Returns the scaled advance, or 0 when the font lacks the glyph.
#[allow(clippy::too_many_arguments)]
pub fn draw_streamed<S: DrawSurface + ?Sized>(
    font: &mut RuntimeFont,
    surface: &mut S,
    x: i32,
    y: i32,
    code: u16,
    style: &TextStyle,
    line: &Metrics,
    filled_x: &mut i32,
) -> Result<i32, SourceError> {
    let Some(index) = font.glyph_index(code) else {
        return Ok(0);
    };
    let max_ascent = font.max_ascent();
    let image = font.load_glyph(index)?;
    let record = image.record;

    let (sx, sy) = (style.sx(), style.sy());
    let x_advance = record.x_advance as i32 * sx;
    let x_offset = record.x_offset as i32 * sx;
    let placed = Placed {
        pixels: image.pixels,
        w: record.width as i32,
        h: record.height as i32,
        gx: x + x_offset,
        gy: y + (max_ascent - record.y_delta as i32) * sy,
        sx,
        sy,
    };

    surface.begin_write();
    if style.fills_background() {
        let left = (*filled_x).max(x + x_offset.min(0));
        let right = x + (placed.w * sx + x_offset).max(x_advance);
        *filled_x = right;
        log::trace!("opaque glyph U+{code:04X} over [{left}, {right})");
        paint_opaque(surface, &placed, style, line, y, left, right);
    } else {
        *filled_x = 0;
        log::trace!("alpha glyph U+{code:04X}");
        paint_alpha(surface, &placed, style.fore);
    }
    surface.end_write();

    Ok(x_advance)
}

fn paint_opaque<S: DrawSurface + ?Sized>(
    surface: &mut S,
    g: &Placed<'_>,
    style: &TextStyle,
    line: &Metrics,
    line_y: i32,
    left: i32,
    right: i32,
) {
    let clip = surface.clip_rect();
    let fore = surface.convert(style.fore);
    let back = surface.convert(style.back);

    // line band above and below the bitmap
    if right > left {
        let band_top = line_y + line.y_offset * g.sy;
        let band_bottom = band_top + line.height * g.sy;
        let glyph_bottom = g.gy + g.h * g.sy;
        fill_clipped(surface, &clip, Rect::new(left, band_top, right - left, g.gy - band_top), back);
        fill_clipped(
            surface,
            &clip,
            Rect::new(left, glyph_bottom, right - left, band_bottom - glyph_bottom),
            back,
        );
    }

    let ink_right = g.gx + g.w * g.sx;
    let (first, end) = g.visible_columns(&clip);
    for r in 0..g.h {
        let ry = g.gy + r * g.sy;
        if !g.row_visible(ry, &clip) {
            continue;
        }

        if left < g.gx {
            fill_clipped(surface, &clip, Rect::new(left, ry, g.gx - left, g.sy), back);
        }

        let row = g.row(r);
        let mut i = first;
        while i < end {
            let start = i;
            match row.get(i as usize).copied().unwrap_or(0) {
                0 => {
                    while i < end && row.get(i as usize) == Some(&0) {
                        i += 1;
                    }
                    // cells left of the watermark are already background
                    let from = (g.gx + start * g.sx).max(left);
                    let to = g.gx + i * g.sx;
                    if to > from {
                        fill_clipped(surface, &clip, Rect::new(from, ry, to - from, g.sy), back);
                    }
                    i = i.max(start + 1);
                },
                0xFF => {
                    while i < end && row.get(i as usize) == Some(&0xFF) {
                        i += 1;
                    }
                    let rect = Rect::new(g.gx + start * g.sx, ry, (i - start) * g.sx, g.sy);
                    fill_clipped(surface, &clip, rect, fore);
                },
                v => {
                    let color = surface.convert(style.fore.blend_over(style.back, v));
                    fill_clipped(surface, &clip, Rect::new(g.gx + start * g.sx, ry, g.sx, g.sy), color);
                    i += 1;
                },
            }
        }

        let tail = ink_right.max(left);
        if right > tail {
            fill_clipped(surface, &clip, Rect::new(tail, ry, right - tail, g.sy), back);
        }
    }
}

fn paint_alpha<S: DrawSurface + ?Sized>(surface: &mut S, g: &Placed<'_>, fore: Rgb888) {
    let clip = surface.clip_rect();
    let x0 = g.gx.max(clip.left);
    let x1 = (g.gx + g.w * g.sx).min(clip.right + 1);
    let bw = x1 - x0;
    if bw <= 0 || g.h <= 0 {
        return;
    }

    let mut buf = vec![Rgb888::default(); (bw * g.sy) as usize];
    for r in 0..g.h {
        let ry = g.gy + r * g.sy;
        let y0 = ry.max(clip.top);
        let y1 = (ry + g.sy).min(clip.bottom + 1);
        if y1 <= y0 {
            continue;
        }
        let bh = y1 - y0;
        let block = &mut buf[..(bw * bh) as usize];
        surface.read_rect_rgb(x0, y0, bw, bh, block);

        let row = g.row(r);
        for dx in 0..bw {
            // source column counted from the clipped left edge
            let col = ((x0 - g.gx + dx) / g.sx) as usize;
            let coverage = row.get(col).copied().unwrap_or(0);
            for dy in 0..bh {
                let px = &mut block[(dy * bw + dx) as usize];
                *px = fore.blend_over(*px, coverage);
            }
        }
        surface.push_rect_rgb(x0, y0, bw, bh, block);
    }
}
