//! The contracts between the engine and the things it does not own
//!
//! - [`ByteSource`] - where font bytes come from (flash, file, bus)
//! - [`DrawSurface`] - where pixels go
//! - [`FontFace`] - what every font encoding can tell about its glyphs

use crate::error::SourceError;
use crate::types::{ClipRect, FontKind, Metrics, RawColor, Rect, Rgb888};

/// Random-access byte storage for font data
///
/// Every seek+read sequence is bracketed by `begin_read`/`end_read`, so a
/// source that shares a transport (an SPI bus with the display, say) can
/// acquire and release it around each access.
pub trait ByteSource {
    /// Enter a read transaction
    fn begin_read(&mut self) {}

    /// Leave a read transaction
    fn end_read(&mut self) {}

    /// Move to an absolute byte offset
    fn seek(&mut self, offset: u32) -> Result<(), SourceError>;

    /// Fill `buf` completely from the current position
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError>;

    /// Release the underlying storage; later reads fail with `Closed`
    fn close(&mut self) {}
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn begin_read(&mut self) {
        (**self).begin_read()
    }

    fn end_read(&mut self) {
        (**self).end_read()
    }

    fn seek(&mut self, offset: u32) -> Result<(), SourceError> {
        (**self).seek(offset)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        (**self).read_exact(buf)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// A pixel-addressable display or off-screen buffer
///
/// The engine only consumes these primitives. Writes for one character or
/// one string are bracketed by `begin_write`/`end_write`; implementations
/// must tolerate nesting.
pub trait DrawSurface {
    /// Surface width in pixels
    fn width(&self) -> i32;

    /// Surface height in pixels
    fn height(&self) -> i32;

    /// Current inclusive clip bounds
    fn clip_rect(&self) -> ClipRect;

    /// Window used by scrolling text output
    fn scroll_region(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    fn begin_write(&mut self) {}

    fn end_write(&mut self) {}

    /// Map a 24-bit color to the device's native (possibly palette) form
    fn convert(&self, color: Rgb888) -> RawColor;

    /// Fill a rectangle with one native color
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: RawColor);

    /// Set the destination window for streamed writes; pixels then arrive
    /// row-major, left to right
    fn set_window(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Stream `len` pixels of one color into the current window
    fn write_color_run(&mut self, color: RawColor, len: u32);

    /// Read back a block as RGB, row-major, `w * h` entries
    fn read_rect_rgb(&mut self, x: i32, y: i32, w: i32, h: i32, buf: &mut [Rgb888]);

    /// Write a block of RGB pixels, row-major, `w * h` entries
    fn push_rect_rgb(&mut self, x: i32, y: i32, w: i32, h: i32, buf: &[Rgb888]);

    /// Shift the scroll region contents by `dx`, `dy` pixels
    fn scroll(&mut self, dx: i32, dy: i32);
}

/// What every glyph encoding can report about itself
pub trait FontFace {
    fn kind(&self) -> FontKind;

    /// Line-level metrics used before any glyph has been resolved
    fn default_metrics(&self) -> Metrics;

    /// Metrics for one code point, or `None` when the font lacks it
    ///
    /// The result starts from [`FontFace::default_metrics`] with the
    /// glyph's width, advance and offset filled in.
    fn metrics_for(&self, code: u16) -> Option<Metrics>;
}
