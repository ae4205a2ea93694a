//! Cursor, wrap, scroll and anchored string layout against a framebuffer

use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;

use pixfont::export::Framebuffer;
use pixfont::error::SourceError;
use pixfont::loader::format::{encode_font, FontHeader, GlyphRecord};
use pixfont::prelude::*;
use pixfont::render::{GfxFont, GfxGlyph};
use pixfont::types::{ClipRect, Rect};

const BLUE: Rgb888 = Rgb888(0x0000FF);
const RED: Rgb888 = Rgb888(0xFF0000);

fn opaque_engine(registry: &FontRegistry) -> TextEngine<'_> {
    let mut engine = TextEngine::new(registry);
    engine.set_text_colors(Rgb888::WHITE, BLUE);
    engine
}

/// Columns that received any paint
fn painted_columns(fb: &Framebuffer) -> Vec<i32> {
    (0..fb.width())
        .filter(|&x| (0..fb.height()).any(|y| fb.write_count(x, y) > 0))
        .collect()
}

fn assert_painted_once(fb: &Framebuffer, area: Rect) {
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let inside = x >= area.x && x < area.x + area.w && y >= area.y && y < area.y + area.h;
            assert_eq!(fb.write_count(x, y), inside as u32, "pixel ({x}, {y})");
        }
    }
}

fn record(code: u16, width: u8, height: u16, x_advance: u8, y_delta: i16, x_offset: i8) -> GlyphRecord {
    GlyphRecord {
        code,
        height,
        width,
        x_advance,
        y_delta,
        x_offset,
    }
}

/// 'A' 3x2 advancing 5, 'B' 2x1 advancing 3 with a negative offset
fn small_font() -> Vec<u8> {
    let header = FontHeader {
        glyph_count: 2,
        version: 11,
        line_advance: 10,
        ascent: 6,
        descent: 2,
    };
    encode_font(
        &header,
        &[
            (record(0x41, 3, 2, 5, 4, 1), vec![0, 128, 255, 255, 0, 7]),
            (record(0x42, 2, 1, 3, 6, -1), vec![0, 255]),
        ],
    )
}

/// `count` square glyphs from 'A' on, 4x4 advancing 5, line height 5
fn sheet_font(count: u16) -> Vec<u8> {
    let header = FontHeader {
        glyph_count: count as u32,
        version: 11,
        line_advance: 5,
        ascent: 4,
        descent: 1,
    };
    let glyphs: Vec<_> = (0..count)
        .map(|i| (record(0x41 + i, 4, 4, 5, 4, 0), vec![0xFF; 16]))
        .collect();
    encode_font(&header, &glyphs)
}

/// Memory source that counts closes and can be switched to failing reads
struct FlakySource {
    inner: MemorySource,
    broken: Rc<Cell<bool>>,
    closes: Rc<Cell<u32>>,
}

impl FlakySource {
    fn new(bytes: Vec<u8>) -> (Self, Rc<Cell<bool>>, Rc<Cell<u32>>) {
        let broken = Rc::new(Cell::new(false));
        let closes = Rc::new(Cell::new(0));
        let source = Self {
            inner: MemorySource::new(bytes),
            broken: broken.clone(),
            closes: closes.clone(),
        };
        (source, broken, closes)
    }
}

impl ByteSource for FlakySource {
    fn seek(&mut self, offset: u32) -> std::result::Result<(), SourceError> {
        self.inner.seek(offset)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> std::result::Result<(), SourceError> {
        if self.broken.get() {
            return Err(SourceError::Closed);
        }
        self.inner.read_exact(buf)
    }

    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
        self.inner.close();
    }
}

#[test]
fn clipped_second_glyph_emits_nothing_but_still_advances() {
    let registry = FontRegistry::with_builtins();

    let mut alone = Framebuffer::new(20, 10);
    alone.set_clip_rect(ClipRect::new(0, 0, 5, 9));
    opaque_engine(&registry).draw_string(&mut alone, "H", 0, 0);

    let mut both = Framebuffer::new(20, 10);
    both.set_clip_rect(ClipRect::new(0, 0, 5, 9));
    let drawn = opaque_engine(&registry).draw_string(&mut both, "Hi", 0, 0);

    assert_eq!(drawn, 12);
    assert_eq!(both.stats(), alone.stats());
    assert_painted_once(&both, Rect::new(0, 0, 6, 8));
    assert_eq!(both.stats().out_of_clip, 0);
    assert_eq!(both.batch_depth(), 0);
}

#[test]
fn horizontal_anchors_place_the_measured_box() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    assert_eq!(engine.text_width("AB"), 12);

    for (datum, expected) in [
        (Datum::TOP_LEFT, 50..62),
        (Datum::TOP_CENTER, 44..56),
        (Datum::TOP_RIGHT, 38..50),
    ] {
        let mut fb = Framebuffer::new(100, 30);
        engine.draw_string_with_datum(&mut fb, "AB", 50, 10, datum);
        assert_eq!(painted_columns(&fb), expected.collect::<Vec<_>>(), "{datum:?}");
    }
}

#[test]
fn vertical_anchors_shift_the_line() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    for (datum, top) in [
        (Datum::TOP_LEFT, 20),
        (Datum::MIDDLE_LEFT, 16),
        (Datum::BOTTOM_LEFT, 12),
        (Datum::BASELINE_LEFT, 13),
    ] {
        let mut fb = Framebuffer::new(40, 40);
        engine.draw_string_with_datum(&mut fb, "A", 0, 20, datum);
        assert_painted_once(&fb, Rect::new(0, top, 6, 8));
    }
}

#[test]
fn string_datum_comes_from_style() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    engine.set_text_datum(Datum::BOTTOM_RIGHT);
    let mut fb = Framebuffer::new(40, 40);
    engine.draw_string(&mut fb, "A", 30, 30);
    assert_painted_once(&fb, Rect::new(24, 22, 6, 8));
}

#[test]
fn padding_fills_beside_the_text() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    engine.set_text_padding(30);

    for (datum, x, area) in [
        (Datum::TOP_LEFT, 10, Rect::new(10, 0, 30, 8)),
        (Datum::TOP_CENTER, 50, Rect::new(35, 0, 30, 8)),
        (Datum::TOP_RIGHT, 50, Rect::new(20, 0, 30, 8)),
    ] {
        let mut fb = Framebuffer::new(100, 10);
        engine.draw_string_with_datum(&mut fb, "AB", x, 0, datum);
        assert_painted_once(&fb, area);
    }
}

#[test]
fn padding_is_skipped_for_transparent_text_or_narrow_padding() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    engine.set_text_padding(30);
    let mut fb = Framebuffer::new(100, 10);
    engine.draw_string(&mut fb, "AB", 0, 0);
    assert!(painted_columns(&fb).iter().all(|&x| x < 12));

    let mut engine = opaque_engine(&registry);
    engine.set_text_padding(10);
    let mut fb = Framebuffer::new(100, 10);
    engine.draw_string(&mut fb, "AB", 0, 0);
    assert_painted_once(&fb, Rect::new(0, 0, 12, 8));
}

#[test]
fn write_wraps_at_the_right_edge() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    let mut fb = Framebuffer::new(20, 20);

    engine.write_str(&mut fb, "ABC");
    assert_eq!(engine.cursor(), (18, 0));
    engine.write_str(&mut fb, "D");
    assert_eq!(engine.cursor(), (6, 8));
    assert!(fb.write_count(0, 8) > 0);

    engine.set_text_wrap(false, false);
    engine.set_cursor(18, 0);
    engine.write_str(&mut fb, "E");
    assert_eq!(engine.cursor(), (24, 0));
}

#[test]
fn newline_and_carriage_return() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    let mut fb = Framebuffer::new(64, 32);

    engine.write_str(&mut fb, "A\nB");
    assert_eq!(engine.cursor(), (6, 8));

    engine.set_cursor(0, 0);
    engine.write_str(&mut fb, "A\rB");
    assert_eq!(engine.cursor(), (12, 0));
}

#[test]
fn vertical_wrap_returns_to_the_top() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    engine.set_text_wrap(true, true);
    let mut fb = Framebuffer::new(30, 16);

    engine.set_cursor(12, 12);
    engine.write_str(&mut fb, "A");
    assert_eq!(engine.cursor(), (6, 0));
    assert_painted_once(&fb, Rect::new(0, 0, 6, 8));
}

#[test]
fn scrolling_moves_earlier_lines_up() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    let mut fb = Framebuffer::new(12, 16);
    engine.set_text_scroll(&fb, true);

    engine.write_str(&mut fb, "AB\nCD\nEF");
    assert_eq!(engine.cursor(), (12, 8));

    let mut reference = Framebuffer::new(12, 16);
    opaque_engine(&registry).draw_string(&mut reference, "CD", 0, 0);
    opaque_engine(&registry).draw_string(&mut reference, "EF", 0, 8);
    assert_eq!(fb.pixels(), reference.pixels());
}

#[test]
fn scroll_mode_clamps_cursor_into_region() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    let mut fb = Framebuffer::new(40, 40);
    fb.set_scroll_region(Rect::new(8, 4, 24, 32));
    engine.set_text_scroll(&fb, true);
    assert_eq!(engine.cursor(), (8, 4));

    engine.write_str(&mut fb, "\n");
    assert_eq!(engine.cursor(), (8, 12));
}

#[test]
fn write_batches_each_call() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    let mut fb = Framebuffer::new(64, 16);
    engine.write_str(&mut fb, "abc");
    assert_eq!(fb.batches(), 1);
    assert_eq!(fb.batch_depth(), 0);
}

#[test]
fn utf8_sequences_draw_once_complete() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    let mut fb = Framebuffer::new(64, 16);

    // U+00E9 is a single cell in the built-in font
    engine.write_bytes(&mut fb, &[0xC3]);
    assert_eq!(engine.cursor(), (0, 0));
    engine.write_bytes(&mut fb, &[0xA9]);
    assert_eq!(engine.cursor(), (6, 0));

    // U+3042 has no cell: nothing drawn, no advance
    engine.write_bytes(&mut fb, &[0xE3, 0x81, 0x82]);
    assert_eq!(engine.cursor(), (6, 0));

    engine.set_utf8(false);
    engine.write_bytes(&mut fb, &[0xE3]);
    assert_eq!(engine.cursor(), (12, 0));
}

#[test]
fn formatted_output_prints_at_cursor() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    let mut fb = Framebuffer::new(96, 16);
    write!(engine.writer(&mut fb), "{}-{}", 12, 3).unwrap();
    assert_eq!(engine.cursor(), (24, 0));
}

#[test]
fn draw_char_with_uses_given_colors() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    let mut fb = Framebuffer::new(16, 16);

    let advance = engine.draw_char_with(&mut fb, 0x41, 0, 0, RED, BLUE, 1, 1);
    assert_eq!(advance, 6);
    // column 0 of 'A' is 0x7C: rows 2..=6 set
    assert_eq!(fb.pixel(0, 0), Some(BLUE));
    assert_eq!(fb.pixel(0, 2), Some(RED));
    assert_eq!(engine.style().fore, Rgb888::WHITE);
}

#[test]
fn runtime_font_measures_and_draws() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    engine.load_font_bytes(small_font()).unwrap();
    assert_eq!(engine.font_kind(), FontKind::Streamed);
    assert_eq!(engine.font_height(), 8);
    assert_eq!(engine.glyph_advance(0x41), Some(5));
    assert_eq!(engine.glyph_advance(0x43), None);

    // leading negative offset widens the start
    assert_eq!(engine.text_width("BA"), 9);
    let mut fb = Framebuffer::new(40, 20);
    assert_eq!(engine.draw_string(&mut fb, "BA", 0, 0), 9);
    assert_eq!(fb.batch_depth(), 0);

    engine.set_cursor(0, 0);
    engine.write_str(&mut fb, "AB");
    assert_eq!(engine.cursor(), (8, 0));
}

#[test]
fn failed_glyph_read_still_advances() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    let (source, broken, _) = FlakySource::new(small_font());
    engine.load_font(source).unwrap();
    broken.set(true);

    let mut fb = Framebuffer::new(40, 20);
    engine.write_str(&mut fb, "A");
    assert_eq!(engine.cursor(), (5, 0));
    assert_eq!(fb.stats().paint_ops(), 0);
}

#[test]
fn failed_glyph_reads_advance_by_their_own_width() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    let (source, broken, _) = FlakySource::new(small_font());
    engine.load_font(source).unwrap();
    broken.set(true);

    // lead offset 1, then 'B' advances 3 and 'A' advances 5
    let mut fb = Framebuffer::new(40, 20);
    assert_eq!(engine.draw_string(&mut fb, "BA", 0, 0), 9);
    assert_eq!(engine.draw_string(&mut fb, "AB", 0, 0), 8);
    assert_eq!(fb.stats().paint_ops(), 0);
}

#[test]
fn unload_and_failed_load_fall_back_to_default_font() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);

    engine.load_font_bytes(small_font()).unwrap();
    assert!(engine.runtime_font().is_some());
    engine.unload_font();
    engine.unload_font();
    assert_eq!(engine.font_kind(), FontKind::FixedCell);
    assert_eq!(engine.font_height(), 8);

    engine.load_font_bytes(small_font()).unwrap();
    let err = engine.load_font_bytes(vec![0u8; 10]).unwrap_err();
    assert!(matches!(err, FontLoadError::TruncatedHeader));
    assert!(engine.runtime_font().is_none());
    assert_eq!(engine.font_kind(), FontKind::FixedCell);
}

#[test]
fn loading_again_releases_the_previous_font() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    let (first, _, closes) = FlakySource::new(small_font());
    engine.load_font(first).unwrap();
    assert_eq!(closes.get(), 0);

    engine.load_font_bytes(sheet_font(3)).unwrap();
    assert_eq!(closes.get(), 1);
    assert_eq!(engine.runtime_font().map(|f| f.glyph_count()), Some(3));
}

#[test]
fn missing_font_file_reports_io_error() {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    let err = engine.load_font_file("/nonexistent/pixfont/font").unwrap_err();
    assert!(matches!(err, FontLoadError::Source(SourceError::Io(_))));
    assert_eq!(engine.font_kind(), FontKind::FixedCell);
}

#[test]
fn select_registered_fonts() {
    let mut registry = FontRegistry::with_builtins();
    let id = registry.register("copy", GLCD);
    let mut engine = TextEngine::new(&registry);
    assert!(engine.select_font("copy"));
    assert!(engine.select_font_id(id));
    assert!(!engine.select_font("missing"));
    assert_eq!(engine.font_kind(), FontKind::FixedCell);
}

#[test]
fn glyph_sheet_pages_through_the_font() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    let mut fb = Framebuffer::new(22, 11);

    assert_eq!(engine.draw_glyph_sheet(&mut fb, 0), None);

    engine.load_font_bytes(sheet_font(20)).unwrap();
    assert_eq!(engine.draw_glyph_sheet(&mut fb, 0), Some(8));
    assert_eq!(fb.pixel(0, 0), Some(Rgb888::WHITE));
    assert_eq!(fb.pixel(4, 0), Some(BLUE));
    assert_eq!(fb.pixel(0, 5), Some(Rgb888::WHITE));
    assert_eq!(engine.draw_glyph_sheet(&mut fb, 8), Some(16));
    assert_eq!(engine.draw_glyph_sheet(&mut fb, 16), None);
    assert_eq!(engine.draw_glyph_sheet(&mut fb, 20), None);
}

#[test]
fn glyph_sheet_always_shows_one_glyph() {
    let registry = FontRegistry::with_builtins();
    let mut engine = opaque_engine(&registry);
    engine.load_font_bytes(sheet_font(3)).unwrap();
    let mut fb = Framebuffer::new(2, 2);
    assert_eq!(engine.draw_glyph_sheet(&mut fb, 0), Some(1));
    assert_eq!(engine.draw_glyph_sheet(&mut fb, 1), Some(2));
}

static GFX_BITMAP: [u8; 1] = [0xE0];
// ' ' blank, advancing 3; '!' a 1x3 bar advancing 2
static GFX_GLYPHS: [GfxGlyph; 2] = [GfxGlyph::new(0, 0, 0, 3, 0, 0), GfxGlyph::new(0, 1, 3, 2, 0, -3)];

#[test]
fn proportional_text_bands_the_line_once() {
    let mut registry = FontRegistry::with_builtins();
    registry.register("gfx", GfxFont::new(&GFX_BITMAP, &GFX_GLYPHS, 0x20, 4).into());
    let mut engine = opaque_engine(&registry);
    assert!(engine.select_font("gfx"));
    assert_eq!(engine.font_kind(), FontKind::Gfx);
    assert_eq!(engine.font_height(), 3);

    let mut fb = Framebuffer::new(12, 8);
    engine.write_str(&mut fb, "! !");
    assert_eq!(engine.cursor(), (7, 0));
    assert_painted_once(&fb, Rect::new(0, 0, 7, 3));
    assert_eq!(fb.pixel(0, 2), Some(Rgb888::WHITE));
    assert_eq!(fb.pixel(2, 2), Some(BLUE));

    engine.write_str(&mut fb, "\n");
    assert_eq!(engine.cursor(), (0, 4));

    let mut fb = Framebuffer::new(12, 8);
    assert_eq!(engine.draw_string(&mut fb, "!!", 1, 1), 4);
    assert_painted_once(&fb, Rect::new(1, 1, 4, 3));
}
