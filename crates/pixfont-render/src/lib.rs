//! Glyph rasterizers: where glyph data meets the display
//!
//! Six storage encodings, six decoders, one contract. Each rasterizer
//! takes absolute coordinates and a [`TextStyle`], emits fills or streamed
//! color runs to a [`DrawSurface`] inside one `begin_write`/`end_write`
//! batch, and returns the scaled advance. A glyph wholly outside the clip
//! emits nothing and still advances.
//!
//! When the background differs from the foreground, foreground and
//! background runs tile the glyph box exactly: no gaps, no pixel painted
//! twice.
//!
//! The 1-bit encodings live behind [`BitmapFont`]; the runtime-loaded
//! grayscale format is drawn by [`draw_streamed`].

pub mod blit;
mod fixed_cell;
mod gfx;
mod grayscale;
mod indexed;
mod row_bitmap;
mod run_length;

pub use blit::{choose_strategy, BlitStrategy};
pub use fixed_cell::{FixedCellFont, CELL_COLUMNS};
pub use gfx::{GfxFont, GfxGlyph};
pub use grayscale::draw_streamed;
pub use indexed::IndexedFont;
pub use row_bitmap::{RowBitmapFont, FIRST_CODE, GLYPH_COUNT};
pub use run_length::RunLengthFont;

use pixfont_core::{DrawSurface, FontFace, FontKind, Metrics, TextStyle};

/// The built-in 1-bit font encodings
#[derive(Debug, Clone, Copy)]
pub enum BitmapFont {
    FixedCell(FixedCellFont),
    RowBitmap(RowBitmapFont),
    RunLength(RunLengthFont),
    Indexed(IndexedFont),
    Gfx(GfxFont),
}

impl BitmapFont {
    /// Draw one code point with its top-left corner at `x`, `y`
    ///
    /// Returns the scaled advance; 0 when the encoding has no slot for the
    /// code point at all.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, x: i32, y: i32, code: u16, style: &TextStyle) -> i32 {
        let mut filled_x = i32::MIN;
        self.draw_after(surface, x, y, code, style, &mut filled_x)
    }

    /// Like [`draw`](Self::draw), continuing a line whose background is
    /// already painted up to `filled_x`
    ///
    /// Only the proportional encoding paints a line band and reads or
    /// moves the watermark; the cell encodings fill their own box.
    pub fn draw_after<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        x: i32,
        y: i32,
        code: u16,
        style: &TextStyle,
        filled_x: &mut i32,
    ) -> i32 {
        match self {
            BitmapFont::FixedCell(f) => f.draw(surface, x, y, code, style),
            BitmapFont::RowBitmap(f) => f.draw(surface, x, y, code, style),
            BitmapFont::RunLength(f) => f.draw(surface, x, y, code, style),
            BitmapFont::Indexed(f) => f.draw(surface, x, y, code, style),
            BitmapFont::Gfx(f) => f.draw(surface, x, y, code, style, filled_x),
        }
    }

    fn face(&self) -> &dyn FontFace {
        match self {
            BitmapFont::FixedCell(f) => f,
            BitmapFont::RowBitmap(f) => f,
            BitmapFont::RunLength(f) => f,
            BitmapFont::Indexed(f) => f,
            BitmapFont::Gfx(f) => f,
        }
    }
}

impl FontFace for BitmapFont {
    fn kind(&self) -> FontKind {
        self.face().kind()
    }

    fn default_metrics(&self) -> Metrics {
        self.face().default_metrics()
    }

    fn metrics_for(&self, code: u16) -> Option<Metrics> {
        self.face().metrics_for(code)
    }
}

impl From<FixedCellFont> for BitmapFont {
    fn from(f: FixedCellFont) -> Self {
        BitmapFont::FixedCell(f)
    }
}

impl From<RowBitmapFont> for BitmapFont {
    fn from(f: RowBitmapFont) -> Self {
        BitmapFont::RowBitmap(f)
    }
}

impl From<RunLengthFont> for BitmapFont {
    fn from(f: RunLengthFont) -> Self {
        BitmapFont::RunLength(f)
    }
}

impl From<IndexedFont> for BitmapFont {
    fn from(f: IndexedFont) -> Self {
        BitmapFont::Indexed(f)
    }
}

impl From<GfxFont> for BitmapFont {
    fn from(f: GfxFont) -> Self {
        BitmapFont::Gfx(f)
    }
}
