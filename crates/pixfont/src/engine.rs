//! The text layout engine
//!
//! Owns the cursor, the style, the UTF-8 decoder and the active font, and
//! turns bytes and strings into positioned glyph draws. Fonts come from a
//! borrowed [`FontRegistry`] or are loaded at runtime; at most one runtime
//! font is alive per engine, and it is released whenever the font changes.

use std::borrow::Cow;
use std::path::Path;

use pixfont_core::{
    ByteSource, Datum, DrawSurface, FontFace, FontKind, FontLoadError, HAlign, Metrics, Rect, Rgb888,
    SourceError, TextStyle, Utf8Decoder,
};
use pixfont_loader::{FileSource, GlyphEntry, LoadOptions, MemorySource, RuntimeFont};
use pixfont_render::blit::fill_clipped;
use pixfont_render::{draw_streamed, BitmapFont};

use crate::registry::{FontId, FontRegistry};
use crate::writer::TextWriter;

/// The font glyphs are currently drawn with
#[derive(Debug)]
enum ActiveFont<'r> {
    Bitmap(&'r BitmapFont),
    Runtime(Box<RuntimeFont>),
}

impl ActiveFont<'_> {
    fn face(&self) -> &dyn FontFace {
        match self {
            ActiveFont::Bitmap(font) => *font,
            ActiveFont::Runtime(font) => &**font,
        }
    }
}

/// Code points of `bytes` as the engine draws them
///
/// With UTF-8 on, partial sequences and control codes below 0x20 are
/// dropped; with it off every byte is a code point.
fn decode_codes(bytes: &[u8], utf8: bool) -> impl Iterator<Item = u16> + '_ {
    let mut decoder = Utf8Decoder::new();
    bytes.iter().filter_map(move |&b| {
        if utf8 {
            decoder.feed(b).filter(|&code| code >= 0x20)
        } else {
            Some(b as u16)
        }
    })
}

#[derive(Debug)]
pub struct TextEngine<'r> {
    registry: &'r FontRegistry,
    font: ActiveFont<'r>,
    /// Metrics of the most recently resolved code point
    metrics: Metrics,
    style: TextStyle,
    cursor_x: i32,
    cursor_y: i32,
    /// Right edge of the background already painted on this line
    filled_x: i32,
    padding_x: i32,
    wrap_x: bool,
    wrap_y: bool,
    scroll: bool,
    decoder: Utf8Decoder,
}

impl<'r> TextEngine<'r> {
    /// An engine drawing with the registry's default font
    pub fn new(registry: &'r FontRegistry) -> Self {
        let font = registry.default_font();
        Self {
            registry,
            font: ActiveFont::Bitmap(font),
            metrics: font.default_metrics(),
            style: TextStyle::default(),
            cursor_x: 0,
            cursor_y: 0,
            filled_x: 0,
            padding_x: 0,
            wrap_x: true,
            wrap_y: false,
            scroll: false,
            decoder: Utf8Decoder::new(),
        }
    }

    pub fn registry(&self) -> &'r FontRegistry {
        self.registry
    }

    // ---- fonts ----

    /// Switch to a bitmap font, releasing any runtime font
    pub fn set_font(&mut self, font: &'r BitmapFont) {
        if let ActiveFont::Runtime(old) = &self.font {
            log::debug!("Releasing runtime font with {} glyphs", old.glyph_count());
        }
        self.font = ActiveFont::Bitmap(font);
        self.metrics = font.default_metrics();
    }

    /// Switch to a registered font by name; false when it is unknown
    pub fn select_font(&mut self, name: &str) -> bool {
        let registry = self.registry;
        match registry.get(name) {
            Some(font) => {
                self.set_font(font);
                true
            },
            None => false,
        }
    }

    pub fn select_font_id(&mut self, id: FontId) -> bool {
        let registry = self.registry;
        match registry.by_id(id) {
            Some(font) => {
                self.set_font(font);
                true
            },
            None => false,
        }
    }

    /// Release the runtime font, if any, and fall back to the default font
    pub fn unload_font(&mut self) {
        let registry = self.registry;
        self.set_font(registry.default_font());
    }

    pub fn load_font(&mut self, source: impl ByteSource + 'static) -> Result<(), FontLoadError> {
        self.load_font_with(source, &LoadOptions::default())
    }

    /// Load a runtime font from `source` and make it active
    ///
    /// The previous font is released first. On failure the engine is left
    /// on the registry's default font.
    pub fn load_font_with(
        &mut self,
        source: impl ByteSource + 'static,
        options: &LoadOptions,
    ) -> Result<(), FontLoadError> {
        self.unload_font();
        let font = RuntimeFont::load(source, options)?;
        log::debug!(
            "Runtime font active: {} glyphs, line height {}",
            font.glyph_count(),
            font.y_advance()
        );
        self.metrics = font.default_metrics();
        self.font = ActiveFont::Runtime(Box::new(font));
        Ok(())
    }

    /// Load a runtime font image held in memory
    pub fn load_font_bytes(&mut self, bytes: impl Into<Cow<'static, [u8]>>) -> Result<(), FontLoadError> {
        self.load_font(MemorySource::new(bytes))
    }

    /// Load a runtime font file, trying `<path>.vlw` when `path` has no
    /// extension and does not open
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<(), FontLoadError> {
        self.unload_font();
        let source = FileSource::open_font(path).map_err(SourceError::from)?;
        self.load_font(source)
    }

    pub fn runtime_font(&self) -> Option<&RuntimeFont> {
        match &self.font {
            ActiveFont::Runtime(font) => Some(font.as_ref()),
            ActiveFont::Bitmap(_) => None,
        }
    }

    pub fn font_kind(&self) -> FontKind {
        self.font.face().kind()
    }

    /// Metrics of the most recently resolved code point
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    // ---- style and cursor ----

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: TextStyle) {
        if style.utf8 != self.style.utf8 {
            self.decoder.reset();
        }
        self.style = style;
    }

    /// Foreground only: text is drawn without background
    pub fn set_text_color(&mut self, fore: Rgb888) {
        self.style.fore = fore;
        self.style.back = fore;
    }

    pub fn set_text_colors(&mut self, fore: Rgb888, back: Rgb888) {
        self.style.fore = fore;
        self.style.back = back;
    }

    /// Integer magnification; 0 is treated as 1
    pub fn set_text_size(&mut self, size_x: u8, size_y: u8) {
        self.style.size_x = size_x.max(1);
        self.style.size_y = size_y.max(1);
    }

    pub fn text_size(&self) -> (u8, u8) {
        (self.style.size_x, self.style.size_y)
    }

    pub fn set_text_datum(&mut self, datum: Datum) {
        self.style.datum = datum;
    }

    pub fn text_datum(&self) -> Datum {
        self.style.datum
    }

    /// Minimum background width painted by `draw_string`
    pub fn set_text_padding(&mut self, padding_x: u16) {
        self.padding_x = padding_x as i32;
    }

    pub fn text_padding(&self) -> u16 {
        self.padding_x as u16
    }

    pub fn set_text_wrap(&mut self, wrap_x: bool, wrap_y: bool) {
        self.wrap_x = wrap_x;
        self.wrap_y = wrap_y;
    }

    pub fn text_wrap(&self) -> (bool, bool) {
        (self.wrap_x, self.wrap_y)
    }

    /// Confine streamed text to the surface's scroll region, scrolling it
    /// when a line would fall off the bottom
    pub fn set_text_scroll<S: DrawSurface + ?Sized>(&mut self, surface: &S, scroll: bool) {
        self.scroll = scroll;
        let region = surface.scroll_region();
        self.cursor_x = self.cursor_x.max(region.x);
        self.cursor_y = self.cursor_y.max(region.y);
    }

    pub fn text_scroll(&self) -> bool {
        self.scroll
    }

    pub fn set_cp437(&mut self, enable: bool) {
        self.style.cp437 = enable;
    }

    pub fn cp437(&self) -> bool {
        self.style.cp437
    }

    /// Switch UTF-8 decoding; any partial sequence is dropped
    pub fn set_utf8(&mut self, enable: bool) {
        self.style.utf8 = enable;
        self.decoder.reset();
    }

    pub fn utf8(&self) -> bool {
        self.style.utf8
    }

    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.filled_x = 0;
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.cursor_x, self.cursor_y)
    }

    // ---- measuring ----

    /// Scaled line height of the active font
    pub fn font_height(&self) -> i32 {
        self.metrics.height * self.style.sy()
    }

    /// Scaled advance of one code point, `None` when the font lacks it
    pub fn glyph_advance(&self, code: u16) -> Option<i32> {
        self.font.face().metrics_for(code).map(|m| m.x_advance * self.style.sx())
    }

    /// Scaled pixel width `text` occupies when drawn as one string
    ///
    /// Advances are summed; the last glyph contributes its full footprint,
    /// and a negative offset on the first glyph widens the start.
    pub fn text_width(&self, text: &str) -> i32 {
        let face = self.font.face();
        let (mut left, mut right) = (0, 0);
        for code in decode_codes(text.as_bytes(), self.style.utf8) {
            let Some(m) = face.metrics_for(code) else {
                continue;
            };
            if left == 0 && right == 0 && m.x_offset < 0 {
                left = -m.x_offset;
                right = left;
            }
            right = left + m.footprint();
            left += m.x_advance;
        }
        right * self.style.sx()
    }

    // ---- drawing ----

    fn draw_glyph<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        x: i32,
        y: i32,
        code: u16,
        style: &TextStyle,
    ) -> i32 {
        match &mut self.font {
            ActiveFont::Bitmap(font) => font.draw_after(surface, x, y, code, style, &mut self.filled_x),
            ActiveFont::Runtime(font) => {
                match draw_streamed(font, surface, x, y, code, style, &self.metrics, &mut self.filled_x) {
                    Ok(advance) => advance,
                    Err(e) => {
                        log::warn!("Glyph U+{code:04X} not drawn: {e}");
                        let advance = font.metrics_for(code).map_or(self.metrics.x_advance, |m| m.x_advance);
                        advance * style.sx()
                    },
                }
            },
        }
    }

    /// Draw `text` anchored at `x`, `y` by the style's datum
    pub fn draw_string<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, text: &str, x: i32, y: i32) -> i32 {
        let datum = self.style.datum;
        self.draw_string_with_datum(surface, text, x, y, datum)
    }

    /// Draw `text` anchored at `x`, `y` by `datum`; returns the width drawn
    ///
    /// With a background color and a padding wider than the text, the
    /// padding beside the text is painted as background too.
    pub fn draw_string_with_datum<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: &str,
        mut x: i32,
        mut y: i32,
        datum: Datum,
    ) -> i32 {
        let bytes = text.as_bytes();
        let utf8 = self.style.utf8;
        let (sx, sy) = (self.style.sx(), self.style.sy());
        let cwidth = self.text_width(text);

        let mut sum_x = 0;
        let face = self.font.face();
        if let Some(first) = decode_codes(bytes, utf8).find_map(|code| face.metrics_for(code)) {
            self.metrics = first;
            if first.x_offset < 0 {
                sum_x = -first.x_offset * sx;
            }
        }
        let cheight = self.metrics.height * sy;
        y += datum.y_shift(cheight, self.metrics.baseline * sy);

        surface.begin_write();
        let padx = self.padding_x;
        if self.style.fills_background() && padx > cwidth {
            let clip = surface.clip_rect();
            let back = surface.convert(self.style.back);
            match datum.h {
                HAlign::Center => {
                    let (half_c, half_p) = (cwidth >> 1, padx >> 1);
                    fill_clipped(surface, &clip, Rect::new(x - half_p, y, half_p - half_c, cheight), back);
                    let (half_c, half_p) = (cwidth - half_c, padx - half_p);
                    fill_clipped(surface, &clip, Rect::new(x + half_c, y, half_p - half_c, cheight), back);
                },
                HAlign::Right => {
                    fill_clipped(surface, &clip, Rect::new(x - padx, y, padx - cwidth, cheight), back);
                },
                HAlign::Left => {
                    fill_clipped(surface, &clip, Rect::new(x + cwidth, y, padx - cwidth, cheight), back);
                },
            }
        }

        x = datum.align_x(x, cwidth);
        y -= self.metrics.y_offset * sy;

        self.filled_x = 0;
        let style = self.style;
        for code in decode_codes(bytes, utf8) {
            sum_x += self.draw_glyph(surface, x + sum_x, y, code, &style);
        }
        surface.end_write();
        sum_x
    }

    /// Draw one code point with its top-left corner at `x`, `y`
    pub fn draw_char<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, code: u16, x: i32, y: i32) -> i32 {
        self.filled_x = 0;
        let style = self.style;
        self.draw_glyph(surface, x, y, code, &style)
    }

    /// Draw one code point with one-off colors and magnification
    #[allow(clippy::too_many_arguments)]
    pub fn draw_char_with<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        code: u16,
        x: i32,
        y: i32,
        fore: Rgb888,
        back: Rgb888,
        size_x: u8,
        size_y: u8,
    ) -> i32 {
        let style = TextStyle {
            fore,
            back,
            size_x: size_x.max(1),
            size_y: size_y.max(1),
            ..self.style
        };
        self.filled_x = 0;
        self.draw_glyph(surface, x, y, code, &style)
    }

    /// Feed one byte of streamed text at the cursor
    ///
    /// `\n` starts a new line, `\r` is ignored. Wrapping, vertical
    /// wrap-around and scrolling follow the engine's flags.
    pub fn write_byte<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, byte: u8) {
        match byte {
            b'\r' => {},
            b'\n' => {
                self.filled_x = if self.scroll { surface.scroll_region().x } else { 0 };
                self.cursor_x = self.filled_x;
                self.cursor_y += self.metrics.y_advance * self.style.sy();
            },
            _ => {
                let code = if self.style.utf8 {
                    match self.decoder.feed(byte) {
                        Some(code) if code >= 0x20 => code,
                        _ => return,
                    }
                } else {
                    byte as u16
                };
                self.put_code(surface, code);
            },
        }
    }

    fn put_code<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, code: u16) {
        let Some(m) = self.font.face().metrics_for(code) else {
            return;
        };
        self.metrics = m;
        if m.width == 0 {
            return;
        }

        let (sx, sy) = (self.style.sx(), self.style.sy());
        let region = surface.scroll_region();
        let xo = m.x_offset * sx;
        let w = (xo + m.width * sx).max(m.x_advance * sx);
        if self.scroll || self.wrap_x {
            let llimit = if self.scroll { region.x } else { 0 };
            if self.cursor_x < llimit - xo {
                self.cursor_x = llimit - xo;
            } else {
                let rlimit = if self.scroll { region.x + region.w } else { surface.width() };
                if self.cursor_x + w > rlimit {
                    self.filled_x = llimit;
                    self.cursor_x = llimit - xo;
                    self.cursor_y += m.y_advance * sy;
                }
            }
        }

        let h = m.height * sy;
        let ydiff = self.style.datum.y_shift(h, m.baseline * sy);
        let mut y = self.cursor_y + ydiff;
        if self.scroll {
            if y < region.y {
                y = region.y;
            } else {
                let yshift = region.y + region.h - (y + h);
                if yshift < 0 {
                    surface.scroll(0, yshift);
                    y += yshift;
                }
            }
        } else if self.wrap_y {
            if y + h > surface.height() {
                self.filled_x = 0;
                self.cursor_x = -xo;
                y = 0;
            } else if y < 0 {
                y = 0;
            }
        }
        self.cursor_y = y - ydiff;
        y -= m.y_offset * sy;

        let x = self.cursor_x;
        let style = self.style;
        self.cursor_x += self.draw_glyph(surface, x, y, code, &style);
    }

    /// Feed a run of bytes inside one write batch
    pub fn write_bytes<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, bytes: &[u8]) {
        surface.begin_write();
        for &b in bytes {
            self.write_byte(surface, b);
        }
        surface.end_write();
    }

    pub fn write_str<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, text: &str) {
        self.write_bytes(surface, text.as_bytes());
    }

    /// A `fmt::Write` sink printing at the cursor
    pub fn writer<'a, S: DrawSurface + ?Sized>(&'a mut self, surface: &'a mut S) -> TextWriter<'a, 'r, S> {
        TextWriter::new(self, surface)
    }

    /// Lay out the runtime font's glyphs from index `first` in reading
    /// order on a cleared surface
    ///
    /// Returns the index of the first glyph that did not fit, `None` once
    /// every glyph is shown (or no runtime font is loaded). A page always
    /// holds at least one glyph.
    pub fn draw_glyph_sheet<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, first: usize) -> Option<usize> {
        let ActiveFont::Runtime(font) = &self.font else {
            return None;
        };
        let entries: Vec<GlyphEntry> = font.glyphs().skip(first).collect();
        let (sx, sy) = (self.style.sx(), self.style.sy());
        let line = font.y_advance() * sy;
        let extent = (font.max_ascent() + font.max_descent()) * sy;
        let lead = entries.first()?;

        let (width, height) = (surface.width(), surface.height());
        surface.begin_write();
        let clip = surface.clip_rect();
        let back = surface.convert(self.style.back);
        fill_clipped(surface, &clip, Rect::new(0, 0, width, height), back);

        let style = self.style;
        let mut x = -(lead.x_offset as i32) * sx;
        let mut y = 0;
        let mut next = None;
        for (i, entry) in entries.iter().enumerate() {
            let dx = entry.x_offset as i32 * sx;
            if x + dx + entry.width as i32 * sx >= width {
                x = -dx;
                y += line;
                if y + extent >= height && i > 0 {
                    next = Some(first + i);
                    break;
                }
            }
            self.filled_x = 0;
            self.draw_glyph(surface, x, y, entry.code, &style);
            x += entry.x_advance as i32 * sx;
        }
        surface.end_write();
        log::debug!("Glyph sheet from {first}: next page {next:?}");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfont_core::FontKind;

    #[test]
    fn decode_codes_drops_partials_and_controls() {
        let bytes = "a\u{3042}\tb".as_bytes();
        assert_eq!(decode_codes(bytes, true).collect::<Vec<_>>(), vec![0x61, 0x3042, 0x62]);
        assert_eq!(decode_codes(b"\t\xC3", false).collect::<Vec<_>>(), vec![0x09, 0xC3]);
    }

    #[test]
    fn new_engine_uses_registry_default() {
        let registry = FontRegistry::with_builtins();
        let engine = TextEngine::new(&registry);
        assert_eq!(engine.font_kind(), FontKind::FixedCell);
        assert_eq!(engine.font_height(), 8);
        assert_eq!(engine.text_wrap(), (true, false));
        assert!(engine.utf8());
    }

    #[test]
    fn size_zero_clamps_to_one() {
        let registry = FontRegistry::with_builtins();
        let mut engine = TextEngine::new(&registry);
        engine.set_text_size(0, 3);
        assert_eq!(engine.text_size(), (1, 3));
        assert_eq!(engine.font_height(), 24);
    }

    #[test]
    fn toggling_utf8_drops_partial_sequence() {
        let registry = FontRegistry::with_builtins();
        let mut engine = TextEngine::new(&registry);
        engine.decoder.feed(0xE3);
        assert!(engine.decoder.is_pending());
        engine.set_utf8(true);
        assert!(!engine.decoder.is_pending());
    }
}
