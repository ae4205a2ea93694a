//! The value types that flow between fonts, rasterizers and the layout engine

/// Device-native color as produced by [`crate::DrawSurface::convert`]
pub type RawColor = u32;

/// Which glyph storage encoding a font uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKind {
    /// 5-column cells addressed directly by code point, column-packed bits
    FixedCell,
    /// Printable ASCII, per-glyph widths, rows packed to byte boundaries
    RowBitmap,
    /// Printable ASCII, bitmap stored as run-length bytes
    RunLength,
    /// Sorted code point index, half/full-width cells
    Indexed,
    /// Proportional glyph boxes placed against the baseline, bits packed
    /// across rows
    Gfx,
    /// Anti-aliased grayscale glyphs streamed from a loaded font file
    Streamed,
}

impl FontKind {
    pub fn name(self) -> &'static str {
        match self {
            FontKind::FixedCell => "fixed-cell",
            FontKind::RowBitmap => "row-bitmap",
            FontKind::RunLength => "run-length",
            FontKind::Indexed => "indexed",
            FontKind::Gfx => "gfx-proportional",
            FontKind::Streamed => "streamed-grayscale",
        }
    }
}

/// Per-glyph measurements in unscaled pixels
///
/// `x_advance` and `width + x_offset` together bound the horizontal
/// footprint of a glyph; layout always takes the larger of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub width: i32,
    pub x_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub baseline: i32,
    pub y_advance: i32,
    pub height: i32,
}

impl Metrics {
    /// Horizontal footprint: the larger of the advance and the inked extent
    pub fn footprint(&self) -> i32 {
        self.x_advance.max(self.width + self.x_offset)
    }
}

/// 24-bit RGB color, `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb888(pub u32);

impl Rgb888 {
    pub const BLACK: Rgb888 = Rgb888(0x000000);
    pub const WHITE: Rgb888 = Rgb888(0xFFFFFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Mix `self` over `base` by an 8-bit coverage value
    ///
    /// Coverage 0 returns `base`, 255 returns `self`. The weight is
    /// `coverage + 1` out of 257 in 8-bit fixed point.
    pub fn blend_over(self, base: Rgb888, coverage: u8) -> Rgb888 {
        let p = 1 + coverage as u32;
        let mix = |fore: u8, back: u8| ((fore as u32 * p + back as u32 * (257 - p)) >> 8) as u8;
        Rgb888::new(
            mix(self.r(), base.r()),
            mix(self.g(), base.g()),
            mix(self.b(), base.b()),
        )
    }
}

/// Horizontal half of a [`Datum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical half of a [`Datum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
    Baseline,
}

/// The reference point a drawn string is positioned relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Datum {
    pub h: HAlign,
    pub v: VAlign,
}

impl Datum {
    pub const TOP_LEFT: Datum = Datum::new(HAlign::Left, VAlign::Top);
    pub const TOP_CENTER: Datum = Datum::new(HAlign::Center, VAlign::Top);
    pub const TOP_RIGHT: Datum = Datum::new(HAlign::Right, VAlign::Top);
    pub const MIDDLE_LEFT: Datum = Datum::new(HAlign::Left, VAlign::Middle);
    pub const MIDDLE_CENTER: Datum = Datum::new(HAlign::Center, VAlign::Middle);
    pub const MIDDLE_RIGHT: Datum = Datum::new(HAlign::Right, VAlign::Middle);
    pub const BOTTOM_LEFT: Datum = Datum::new(HAlign::Left, VAlign::Bottom);
    pub const BOTTOM_CENTER: Datum = Datum::new(HAlign::Center, VAlign::Bottom);
    pub const BOTTOM_RIGHT: Datum = Datum::new(HAlign::Right, VAlign::Bottom);
    pub const BASELINE_LEFT: Datum = Datum::new(HAlign::Left, VAlign::Baseline);
    pub const BASELINE_CENTER: Datum = Datum::new(HAlign::Center, VAlign::Baseline);
    pub const BASELINE_RIGHT: Datum = Datum::new(HAlign::Right, VAlign::Baseline);

    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }

    /// Decode the packed bit form: bit 0 center, bit 1 right,
    /// bit 2 middle, bit 3 bottom, bit 4 baseline
    pub const fn from_bits(bits: u8) -> Self {
        let h = if bits & 0x01 != 0 {
            HAlign::Center
        } else if bits & 0x02 != 0 {
            HAlign::Right
        } else {
            HAlign::Left
        };
        let v = if bits & 0x04 != 0 {
            VAlign::Middle
        } else if bits & 0x08 != 0 {
            VAlign::Bottom
        } else if bits & 0x10 != 0 {
            VAlign::Baseline
        } else {
            VAlign::Top
        };
        Self { h, v }
    }

    pub const fn bits(self) -> u8 {
        let h = match self.h {
            HAlign::Left => 0,
            HAlign::Center => 0x01,
            HAlign::Right => 0x02,
        };
        let v = match self.v {
            VAlign::Top => 0,
            VAlign::Middle => 0x04,
            VAlign::Bottom => 0x08,
            VAlign::Baseline => 0x10,
        };
        h | v
    }

    /// Left edge of a run `width` pixels wide anchored at `x`
    pub fn align_x(self, x: i32, width: i32) -> i32 {
        match self.h {
            HAlign::Left => x,
            HAlign::Center => x - (width >> 1),
            HAlign::Right => x - width,
        }
    }

    /// Vertical shift applied to the top of a `height` tall line whose
    /// baseline sits `baseline` pixels below its top
    pub fn y_shift(self, height: i32, baseline: i32) -> i32 {
        match self.v {
            VAlign::Top => 0,
            VAlign::Middle => -(height >> 1),
            VAlign::Bottom => -height,
            VAlign::Baseline => -baseline,
        }
    }
}

/// Colors, scale and decoding switches for drawn text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub fore: Rgb888,
    pub back: Rgb888,
    pub size_x: u8,
    pub size_y: u8,
    pub datum: Datum,
    pub utf8: bool,
    /// Use the code page 437 layout of the fixed-cell font instead of the
    /// classic one that skips a cell at 0xB0
    pub cp437: bool,
}

impl TextStyle {
    /// Background is painted only when it differs from the foreground
    pub fn fills_background(&self) -> bool {
        self.fore != self.back
    }

    pub fn sx(&self) -> i32 {
        self.size_x.max(1) as i32
    }

    pub fn sy(&self) -> i32 {
        self.size_y.max(1) as i32
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fore: Rgb888::WHITE,
            back: Rgb888::WHITE,
            size_x: 1,
            size_y: 1,
            datum: Datum::TOP_LEFT,
            utf8: true,
            cp437: false,
        }
    }
}

/// Axis-aligned rectangle by origin and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.w as i64 * self.h as i64
        }
    }
}

/// Inclusive clip bounds held by a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Clip covering a whole `width` x `height` surface
    pub const fn full(width: i32, height: i32) -> Self {
        Self::new(0, 0, width - 1, height - 1)
    }

    /// Does any pixel of the box fall inside the clip?
    pub fn intersects(&self, r: Rect) -> bool {
        !r.is_empty()
            && r.x <= self.right
            && self.left < r.x + r.w
            && r.y <= self.bottom
            && self.top < r.y + r.h
    }

    /// Does every pixel of the box fall inside the clip?
    pub fn contains(&self, r: Rect) -> bool {
        r.x >= self.left
            && r.y >= self.top
            && r.x + r.w - 1 <= self.right
            && r.y + r.h - 1 <= self.bottom
    }

    /// The part of `r` inside the clip (possibly empty)
    pub fn intersect(&self, r: Rect) -> Rect {
        let x0 = r.x.max(self.left);
        let y0 = r.y.max(self.top);
        let x1 = (r.x + r.w).min(self.right + 1);
        let y1 = (r.y + r.h).min(self.bottom + 1);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datum_bits_round_trip() {
        for bits in [0u8, 1, 2, 4, 5, 6, 8, 9, 10, 16, 17, 18] {
            assert_eq!(Datum::from_bits(bits).bits(), bits);
        }
        assert_eq!(Datum::from_bits(5), Datum::MIDDLE_CENTER);
        assert_eq!(Datum::from_bits(18), Datum::BASELINE_RIGHT);
    }

    #[test]
    fn blend_endpoints() {
        let fore = Rgb888::new(200, 100, 50);
        let back = Rgb888::new(10, 20, 30);
        assert_eq!(fore.blend_over(back, 0), back);
        assert_eq!(fore.blend_over(back, 255), fore);
        let mid = fore.blend_over(back, 128);
        assert!(mid.r() > back.r() && mid.r() < fore.r());
    }

    #[test]
    fn clip_intersection_and_containment() {
        let clip = ClipRect::new(10, 10, 19, 19);
        assert!(clip.contains(Rect::new(10, 10, 10, 10)));
        assert!(!clip.contains(Rect::new(10, 10, 11, 10)));
        assert!(clip.intersects(Rect::new(19, 19, 5, 5)));
        assert!(!clip.intersects(Rect::new(20, 10, 5, 5)));
        assert_eq!(clip.intersect(Rect::new(5, 15, 10, 10)), Rect::new(10, 15, 5, 5));
        assert!(clip.intersect(Rect::new(0, 0, 5, 5)).is_empty());
    }

    #[test]
    fn footprint_takes_wider_extent() {
        let m = Metrics {
            width: 7,
            x_advance: 6,
            x_offset: 1,
            ..Metrics::default()
        };
        assert_eq!(m.footprint(), 8);
    }
}
