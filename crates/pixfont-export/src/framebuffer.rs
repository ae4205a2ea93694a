//! An RGB888 surface in memory
//!
//! Stands in for a display: it honours the clip the way a panel driver
//! would, and it keeps a write counter per pixel so tests can see gaps,
//! double paints and anything emitted outside the clip.

use pixfont_core::{ClipRect, DrawSurface, RawColor, Rect, Rgb888};

/// Counters for the primitives a surface received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub fills: usize,
    pub windows: usize,
    pub runs: usize,
    pub reads: usize,
    pub pushes: usize,
    /// Pixels addressed outside the clip (or outside an address window)
    pub out_of_clip: usize,
}

impl SurfaceStats {
    /// Primitives that change pixels
    pub fn paint_ops(&self) -> usize {
        self.fills + self.runs + self.pushes
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    rect: Rect,
    cursor: i64,
}

#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<Rgb888>,
    writes: Vec<u32>,
    clip: ClipRect,
    scroll_region: Rect,
    scroll_fill: Rgb888,
    window: Option<Window>,
    depth: u32,
    batches: u32,
    stats: SurfaceStats,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Rgb888::BLACK)
    }

    pub fn with_background(width: u32, height: u32, color: Rgb888) -> Self {
        let width = width.min(i32::MAX as u32) as i32;
        let height = height.min(i32::MAX as u32) as i32;
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![color; len],
            writes: vec![0; len],
            clip: ClipRect::full(width, height),
            scroll_region: Rect::new(0, 0, width, height),
            scroll_fill: color,
            window: None,
            depth: 0,
            batches: 0,
            stats: SurfaceStats::default(),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    fn in_clip(&self, x: i32, y: i32) -> bool {
        x >= self.clip.left && x <= self.clip.right && y >= self.clip.top && y <= self.clip.bottom
    }

    fn plot(&mut self, x: i32, y: i32, color: Rgb888) {
        if !self.in_clip(x, y) {
            self.stats.out_of_clip += 1;
            return;
        }
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
            self.writes[i] += 1;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }

    /// How many times a pixel was painted since the last reset
    pub fn write_count(&self, x: i32, y: i32) -> u32 {
        self.index(x, y).map_or(0, |i| self.writes[i])
    }

    pub fn write_counts(&self) -> &[u32] {
        &self.writes
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    /// Clear write counters and primitive stats, keeping the pixels
    pub fn reset_counters(&mut self) {
        self.writes.iter_mut().for_each(|w| *w = 0);
        self.stats = SurfaceStats::default();
        self.batches = 0;
    }

    /// Fill the whole surface, bypassing clip and counters
    pub fn clear(&mut self, color: Rgb888) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }

    /// Restrict drawing; the clip is intersected with the surface bounds
    pub fn set_clip_rect(&mut self, clip: ClipRect) {
        self.clip = ClipRect::new(
            clip.left.max(0),
            clip.top.max(0),
            clip.right.min(self.width - 1),
            clip.bottom.min(self.height - 1),
        );
    }

    pub fn clear_clip_rect(&mut self) {
        self.clip = ClipRect::full(self.width, self.height);
    }

    pub fn set_scroll_region(&mut self, region: Rect) {
        self.scroll_region = region;
    }

    /// Color exposed by scrolling
    pub fn set_scroll_fill(&mut self, color: Rgb888) {
        self.scroll_fill = color;
    }

    /// Current `begin_write` nesting depth
    pub fn batch_depth(&self) -> u32 {
        self.depth
    }

    /// Outermost `begin_write` calls since the last reset
    pub fn batches(&self) -> u32 {
        self.batches
    }

    /// Rows of the image as RGB triples
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb888]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }
}

impl DrawSurface for Framebuffer {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clip_rect(&self) -> ClipRect {
        self.clip
    }

    fn scroll_region(&self) -> Rect {
        self.scroll_region
    }

    fn begin_write(&mut self) {
        if self.depth == 0 {
            self.batches += 1;
        }
        self.depth += 1;
    }

    fn end_write(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn convert(&self, color: Rgb888) -> RawColor {
        color.0 & 0xFF_FFFF
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: RawColor) {
        self.stats.fills += 1;
        let color = Rgb888(color & 0xFF_FFFF);
        for py in y..y.saturating_add(h) {
            for px in x..x.saturating_add(w) {
                self.plot(px, py, color);
            }
        }
    }

    fn set_window(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.stats.windows += 1;
        self.window = Some(Window {
            rect: Rect::new(x, y, w, h),
            cursor: 0,
        });
    }

    fn write_color_run(&mut self, color: RawColor, len: u32) {
        self.stats.runs += 1;
        let color = Rgb888(color & 0xFF_FFFF);
        let Some(mut window) = self.window else {
            self.stats.out_of_clip += len as usize;
            return;
        };
        let area = window.rect.area();
        for _ in 0..len {
            if window.cursor >= area {
                self.stats.out_of_clip += 1;
                continue;
            }
            let w = window.rect.w as i64;
            let px = window.rect.x + (window.cursor % w) as i32;
            let py = window.rect.y + (window.cursor / w) as i32;
            self.plot(px, py, color);
            window.cursor += 1;
        }
        self.window = Some(window);
    }

    fn read_rect_rgb(&mut self, x: i32, y: i32, w: i32, h: i32, buf: &mut [Rgb888]) {
        self.stats.reads += 1;
        for (i, slot) in buf.iter_mut().take((w.max(0) * h.max(0)) as usize).enumerate() {
            let (dx, dy) = (i as i32 % w, i as i32 / w);
            *slot = self.pixel(x + dx, y + dy).unwrap_or_default();
        }
    }

    fn push_rect_rgb(&mut self, x: i32, y: i32, w: i32, h: i32, buf: &[Rgb888]) {
        self.stats.pushes += 1;
        for (i, &color) in buf.iter().take((w.max(0) * h.max(0)) as usize).enumerate() {
            let (dx, dy) = (i as i32 % w, i as i32 / w);
            self.plot(x + dx, y + dy, color);
        }
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        let region = ClipRect::full(self.width, self.height).intersect(self.scroll_region);
        if region.is_empty() {
            return;
        }
        log::trace!("scroll {region:?} by ({dx}, {dy})");
        let snapshot = self.pixels.clone();
        let inside = |x: i32, y: i32| x >= region.x && y >= region.y && x < region.x + region.w && y < region.y + region.h;
        for y in region.y..region.y + region.h {
            for x in region.x..region.x + region.w {
                let (sx, sy) = (x - dx, y - dy);
                let color = if inside(sx, sy) {
                    snapshot[(sy * self.width + sx) as usize]
                } else {
                    self.scroll_fill
                };
                self.pixels[(y * self.width + x) as usize] = color;
            }
        }
    }
}
