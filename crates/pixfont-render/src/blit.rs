//! Getting runs onto the surface
//!
//! Every rasterizer reduces a glyph to runs of one color and hands them to
//! one of two emitters. Rectangle runs go through [`fill_clipped`], which
//! bounds each rectangle by the clip before the surface sees it. Streamed
//! runs go through [`RunStream`] into an address window that is known to
//! lie wholly inside the clip.

use pixfont_core::{ClipRect, DrawSurface, RawColor, Rect, TextStyle};

/// How one glyph gets onto the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitStrategy {
    /// Nothing of the glyph is visible
    Skip,
    /// One clipped rectangle per run
    RectRuns,
    /// One address window, colors streamed as (color, length) pairs
    Stream,
}

/// Pick the emitter for a glyph occupying `bounds` (already scaled)
///
/// Streaming needs every cell painted (background fill on), a window that
/// maps one source row to one destination row (`size_y == 1`) and no
/// clipping at all.
pub fn choose_strategy(clip: &ClipRect, style: &TextStyle, bounds: Rect) -> BlitStrategy {
    let strategy = if !clip.intersects(bounds) {
        BlitStrategy::Skip
    } else if style.fills_background() && style.sy() == 1 && clip.contains(bounds) {
        BlitStrategy::Stream
    } else {
        BlitStrategy::RectRuns
    };
    log::trace!("{strategy:?} for glyph box {bounds:?}");
    strategy
}

/// Fill the part of `r` inside `clip`
pub fn fill_clipped<S: DrawSurface + ?Sized>(surface: &mut S, clip: &ClipRect, r: Rect, color: RawColor) {
    let r = clip.intersect(r);
    if !r.is_empty() {
        surface.fill_rect(r.x, r.y, r.w, r.h, color);
    }
}

/// Resolved colors, scale and clip for one glyph draw
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pen {
    pub fore: RawColor,
    pub back: RawColor,
    pub fill_bg: bool,
    pub sx: i32,
    pub sy: i32,
    pub clip: ClipRect,
}

impl Pen {
    pub fn new<S: DrawSurface + ?Sized>(surface: &S, style: &TextStyle) -> Self {
        Self {
            fore: surface.convert(style.fore),
            back: surface.convert(style.back),
            fill_bg: style.fills_background(),
            sx: style.sx(),
            sy: style.sy(),
            clip: surface.clip_rect(),
        }
    }

    pub fn color(&self, on: bool) -> RawColor {
        if on {
            self.fore
        } else {
            self.back
        }
    }

    /// Emit one rectangle run; background runs only when filling
    pub fn run<S: DrawSurface + ?Sized>(&self, surface: &mut S, on: bool, x: i32, y: i32, w: i32, h: i32) {
        if on || self.fill_bg {
            fill_clipped(surface, &self.clip, Rect::new(x, y, w, h), self.color(on));
        }
    }
}

/// Accumulates same-colored pixels and writes them as one run
#[derive(Debug, Default)]
pub(crate) struct RunStream {
    color: RawColor,
    len: u32,
}

impl RunStream {
    pub fn push<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, color: RawColor, len: u32) {
        if len == 0 {
            return;
        }
        if self.len > 0 && color != self.color {
            surface.write_color_run(self.color, self.len);
            self.len = 0;
        }
        self.color = color;
        self.len += len;
    }

    pub fn finish<S: DrawSurface + ?Sized>(self, surface: &mut S) {
        if self.len > 0 {
            surface.write_color_run(self.color, self.len);
        }
    }
}

/// Collapse a bit sequence into `(value, length)` runs
pub(crate) fn bit_runs(bits: impl Iterator<Item = bool>) -> impl Iterator<Item = (bool, i32)> {
    let mut bits = bits.peekable();
    std::iter::from_fn(move || {
        let on = bits.next()?;
        let mut len = 1;
        while bits.next_if_eq(&on).is_some() {
            len += 1;
        }
        Some((on, len))
    })
}
