//! `fmt::Write` on top of the engine's streamed output
//!
//! ```
//! use std::fmt::Write;
//! use pixfont::{FontRegistry, TextEngine};
//! use pixfont_export::Framebuffer;
//!
//! let registry = FontRegistry::with_builtins();
//! let mut engine = TextEngine::new(&registry);
//! let mut fb = Framebuffer::new(64, 16);
//! write!(engine.writer(&mut fb), "t={}", 42).unwrap();
//! assert_eq!(engine.cursor(), (4 * 6, 0));
//! ```

use std::fmt;

use pixfont_core::DrawSurface;

use crate::engine::TextEngine;

/// Prints formatted text at the engine's cursor
pub struct TextWriter<'a, 'r, S: ?Sized> {
    engine: &'a mut TextEngine<'r>,
    surface: &'a mut S,
}

impl<'a, 'r, S: DrawSurface + ?Sized> TextWriter<'a, 'r, S> {
    pub(crate) fn new(engine: &'a mut TextEngine<'r>, surface: &'a mut S) -> Self {
        Self { engine, surface }
    }
}

impl<S: DrawSurface + ?Sized> fmt::Write for TextWriter<'_, '_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.engine.write_str(&mut *self.surface, s);
        Ok(())
    }
}
