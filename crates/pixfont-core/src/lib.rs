//! pixfont core: the shared vocabulary of the text engine
//!
//! Text goes in as bytes, comes out as rectangle fills and color runs on a
//! display. This crate holds the pieces every other pixfont crate agrees
//! on:
//!
//! - [`types`] - metrics, colors, datum, style, clip rectangles
//! - [`traits`] - [`ByteSource`], [`DrawSurface`], [`FontFace`]
//! - [`codec`] - big-endian field decoding for the streamed font format
//! - [`utf8`] - the incremental UTF-8 decoder
//! - [`error`] - the error taxonomy

pub mod codec;
pub mod error;
pub mod traits;
pub mod types;
pub mod utf8;

#[cfg(test)]
mod proptests;

pub use error::{ExportError, FontLoadError, PixfontError, Result, SourceError};
pub use traits::{ByteSource, DrawSurface, FontFace};
pub use types::{
    ClipRect, Datum, FontKind, HAlign, Metrics, RawColor, Rect, Rgb888, TextStyle, VAlign,
};
pub use utf8::Utf8Decoder;
