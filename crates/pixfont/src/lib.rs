//! pixfont: text for pixel displays
//!
//! A [`TextEngine`] turns bytes and strings into glyph draws on any
//! [`DrawSurface`](pixfont_core::DrawSurface). It handles:
//!
//! 1. UTF-8 decoding, one byte at a time
//! 2. Cursor advance, line wrap and scroll-region reflow
//! 3. Anchored string placement with background padding
//! 4. Dispatch to the rasterizer of the active font
//!
//! Fonts are either 1-bit [`BitmapFont`](pixfont_render::BitmapFont)s kept
//! in a [`FontRegistry`], or anti-aliased runtime fonts loaded from a byte
//! source.
//!
//! # Example
//!
//! ```
//! use pixfont::prelude::*;
//! use pixfont::export::Framebuffer;
//!
//! let registry = FontRegistry::with_builtins();
//! let mut engine = TextEngine::new(&registry);
//! engine.set_text_colors(Rgb888::WHITE, Rgb888::BLACK);
//!
//! let mut fb = Framebuffer::new(64, 16);
//! let width = engine.draw_string(&mut fb, "Hi", 0, 0);
//! assert_eq!(width, 12);
//! ```
//!
//! # Feature Flags
//!
//! - `export-pnm`: the in-memory framebuffer and PPM/PGM export (default)

mod engine;
mod glcd;
mod registry;
mod writer;

#[cfg(test)]
mod proptests;

pub use engine::TextEngine;
pub use glcd::GLCD;
pub use registry::{FontId, FontRegistry};
pub use writer::TextWriter;

pub use pixfont_core::{error, traits, types};
pub use pixfont_loader as loader;
pub use pixfont_render as render;

#[cfg(feature = "export-pnm")]
pub use pixfont_export as export;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{FontId, FontRegistry, TextEngine, GLCD};
    pub use pixfont_core::{
        error::{FontLoadError, PixfontError, Result},
        traits::{ByteSource, DrawSurface, FontFace},
        types::{Datum, FontKind, HAlign, Metrics, Rgb888, TextStyle, VAlign},
    };
    pub use pixfont_loader::{FileSource, LoadOptions, MemorySource, RuntimeFont};
    pub use pixfont_render::BitmapFont;
}
