//! Runtime font loading for the streamed anti-aliased format
//!
//! A font file is a 24-byte header, a table of 28-byte glyph records and a
//! block of 8-bit coverage bitmaps (see [`format`]). [`RuntimeFont::load`]
//! reads the header and records once, keeps the lookup columns in memory
//! and leaves the bitmaps in the [`ByteSource`](pixfont_core::ByteSource)
//! to be read glyph by glyph at draw time.
//!
//! ```
//! use pixfont_loader::{format, LoadOptions, RuntimeFont};
//! use pixfont_core::FontFace;
//!
//! let header = format::FontHeader { glyph_count: 1, version: 11, line_advance: 0, ascent: 0, descent: 0 };
//! let glyph = format::GlyphRecord { code: 0x41, height: 7, width: 5, x_advance: 6, y_delta: 6, x_offset: 0 };
//! let bytes = format::encode_font(&header, &[(glyph, vec![0xFF; 35])]);
//!
//! let font = RuntimeFont::from_bytes(bytes, &LoadOptions::default())?;
//! assert_eq!(font.y_advance(), 7);
//! assert_eq!(font.metrics_for(0x41).map(|m| m.width), Some(5));
//! assert!(font.metrics_for(0x42).is_none());
//! # Ok::<(), pixfont_core::FontLoadError>(())
//! ```

mod font;
pub mod format;
pub mod source;
mod table;

#[cfg(test)]
mod proptests;

pub use font::{GlyphEntry, GlyphImage, LoadOptions, RuntimeFont};
pub use format::{FontHeader, GlyphRecord};
pub use source::{FileSource, MemorySource};
