//! The runtime-loaded anti-aliased font

use std::borrow::Cow;
use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use pixfont_core::{ByteSource, FontFace, FontKind, FontLoadError, Metrics, SourceError};

use crate::format::{record_offset, FontHeader, GlyphRecord, HEADER_LEN, RECORD_LEN};
use crate::source::MemorySource;
use crate::table::GlyphTable;

/// Options applied when loading a font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Glyph records kept by the draw-path cache; 0 disables it
    pub record_cache_capacity: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            record_cache_capacity: 64,
        }
    }
}

/// One row of the glyph table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphEntry {
    pub code: u16,
    pub width: u8,
    pub x_advance: u8,
    pub x_offset: i8,
    /// Absolute offset of the glyph's coverage bytes in the source
    pub bitmap_offset: u32,
}

/// A glyph's record plus its coverage bytes, row-major, `width * height`
#[derive(Debug, Clone, Copy)]
pub struct GlyphImage<'a> {
    pub record: GlyphRecord,
    pub pixels: &'a [u8],
}

/// A streamed grayscale font attached to its byte source
///
/// Loading reads the header and the record table once and keeps only the
/// per-glyph lookup columns in memory. Coverage bytes stay in the source
/// and are read on demand when a glyph is drawn.
pub struct RuntimeFont {
    table: GlyphTable,
    source: Option<Box<dyn ByteSource>>,
    header: FontHeader,
    y_advance: i32,
    space_width: i32,
    max_ascent: i32,
    max_descent: i32,
    records: Option<LruCache<usize, GlyphRecord>>,
    pixels: Vec<u8>,
}

impl fmt::Debug for RuntimeFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeFont")
            .field("glyph_count", &self.table.len())
            .field("loaded", &self.is_loaded())
            .field("y_advance", &self.y_advance)
            .field("space_width", &self.space_width)
            .field("max_ascent", &self.max_ascent)
            .field("max_descent", &self.max_descent)
            .finish()
    }
}

fn truncated(err: SourceError, on_eof: FontLoadError) -> FontLoadError {
    match err {
        SourceError::OutOfBounds { .. } => on_eof,
        other => other.into(),
    }
}

impl RuntimeFont {
    /// Parse a font from `source`, which is then held for the font's life
    ///
    /// On failure the source is closed and nothing is retained.
    pub fn load(source: impl ByteSource + 'static, options: &LoadOptions) -> Result<Self, FontLoadError> {
        let mut source: Box<dyn ByteSource> = Box::new(source);
        source.begin_read();
        let parsed = Self::parse(source.as_mut(), options);
        source.end_read();

        match parsed {
            Ok(mut font) => {
                log::debug!(
                    "Loaded font: {} glyphs, y_advance {}, ascent {}/{} observed, descent {}/{} observed",
                    font.table.len(),
                    font.y_advance,
                    font.header.ascent,
                    font.max_ascent,
                    font.header.descent,
                    font.max_descent
                );
                font.source = Some(source);
                Ok(font)
            },
            Err(err) => {
                log::warn!("Rejected font: {err}");
                source.close();
                Err(err)
            },
        }
    }

    /// Load from an in-memory image (a `&'static` flash array or an owned
    /// buffer)
    pub fn from_bytes(bytes: impl Into<Cow<'static, [u8]>>, options: &LoadOptions) -> Result<Self, FontLoadError> {
        Self::load(MemorySource::new(bytes), options)
    }

    fn parse(source: &mut dyn ByteSource, options: &LoadOptions) -> Result<Self, FontLoadError> {
        let mut raw = [0u8; HEADER_LEN];
        source.seek(0)?;
        source
            .read_exact(&mut raw)
            .map_err(|e| truncated(e, FontLoadError::TruncatedHeader))?;
        let header = FontHeader::parse(&raw);
        log::debug!(
            "Font header: count {}, version {}, line advance {}, ascent {}, descent {}",
            header.glyph_count,
            header.version,
            header.line_advance,
            header.ascent,
            header.descent
        );

        if header.glyph_count == 0 {
            return Err(FontLoadError::EmptyFont);
        }
        if header.glyph_count > u16::MAX as u32 {
            return Err(FontLoadError::TooManyGlyphs {
                count: header.glyph_count,
            });
        }
        let count = header.glyph_count as usize;

        // Glyph metrics are 16-bit; header metrics beyond that are corrupt
        let metric = i16::MIN as i32..=i16::MAX as i32;
        if !metric.contains(&header.ascent)
            || !metric.contains(&header.descent)
            || header.line_advance > i16::MAX as u32
        {
            return Err(FontLoadError::HeaderOutOfRange {
                ascent: header.ascent,
                descent: header.descent,
                line_advance: header.line_advance,
            });
        }

        let line_advance = (header.line_advance as i32).max(header.ascent + header.descent);
        let space_width = line_advance * 2 / 7;
        let mut max_ascent = header.ascent;
        let mut max_descent = header.descent;

        let mut table = GlyphTable::with_capacity(count)?;
        let mut bitmap_ptr = record_offset(count);

        source.seek(HEADER_LEN as u32)?;
        let mut raw = [0u8; RECORD_LEN];
        for index in 0..count {
            source
                .read_exact(&mut raw)
                .map_err(|e| truncated(e, FontLoadError::TruncatedGlyphTable { index }))?;
            let record = GlyphRecord::parse(&raw);
            table.push(&record, bitmap_ptr)?;

            if record.counts_toward_extent() {
                max_ascent = max_ascent.max(record.y_delta as i32);
                max_descent = max_descent.max(record.descent());
            }
            bitmap_ptr = bitmap_ptr.saturating_add(record.bitmap_len() as u32);
        }

        let records = NonZeroUsize::new(options.record_cache_capacity).map(LruCache::new);

        Ok(Self {
            table,
            source: None,
            header,
            y_advance: max_ascent + max_descent,
            space_width,
            max_ascent,
            max_descent,
            records,
            pixels: Vec::new(),
        })
    }

    /// Release the tables and close the source; safe to call repeatedly
    pub fn unload(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.begin_read();
            source.close();
            source.end_read();
            log::debug!("Unloaded font with {} glyphs", self.table.len());
        }
        self.table.clear();
        self.records = None;
        self.pixels = Vec::new();
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn header(&self) -> &FontHeader {
        &self.header
    }

    pub fn glyph_count(&self) -> usize {
        self.table.len()
    }

    /// Final line height: observed max ascent plus max descent
    pub fn y_advance(&self) -> i32 {
        self.y_advance
    }

    pub fn space_width(&self) -> i32 {
        self.space_width
    }

    pub fn max_ascent(&self) -> i32 {
        self.max_ascent
    }

    pub fn max_descent(&self) -> i32 {
        self.max_descent
    }

    /// Binary search: `Ok(index)` on a match, `Err(insertion_point)` otherwise
    pub fn search(&self, code: u16) -> Result<usize, usize> {
        self.table.lookup(code)
    }

    pub fn glyph_index(&self, code: u16) -> Option<usize> {
        self.search(code).ok()
    }

    pub fn entry(&self, index: usize) -> Option<GlyphEntry> {
        Some(GlyphEntry {
            code: *self.table.unicode.get(index)?,
            width: self.table.width[index],
            x_advance: self.table.x_advance[index],
            x_offset: self.table.x_offset[index],
            bitmap_offset: self.table.bitmap[index],
        })
    }

    /// Every glyph in table (code point) order
    pub fn glyphs(&self) -> impl Iterator<Item = GlyphEntry> + '_ {
        (0..self.table.len()).filter_map(|i| self.entry(i))
    }

    fn source(&mut self) -> Result<&mut Box<dyn ByteSource>, SourceError> {
        self.source.as_mut().ok_or(SourceError::Closed)
    }

    /// Read record `index` straight from the source, checking it against
    /// the table
    ///
    /// Served from the record cache unless it was loaded with a capacity
    /// of 0.
    pub fn read_glyph_record(&mut self, index: usize) -> Result<GlyphRecord, SourceError> {
        let Some(&expected) = self.table.unicode.get(index) else {
            return Err(SourceError::OutOfBounds {
                offset: record_offset(index),
                len: RECORD_LEN,
            });
        };

        if let Some(record) = self.records.as_mut().and_then(|c| c.get(&index)) {
            return Ok(*record);
        }

        let mut raw = [0u8; RECORD_LEN];
        let source = self.source()?;
        source.begin_read();
        let read = source
            .seek(record_offset(index))
            .and_then(|()| source.read_exact(&mut raw));
        source.end_read();
        read?;

        let record = GlyphRecord::parse(&raw);
        if record.code != expected {
            log::warn!("Glyph record {index} holds U+{:04X}, table says U+{expected:04X}", record.code);
            return Err(SourceError::RecordMismatch {
                index,
                found: record.code as u32,
            });
        }
        if let Some(cache) = self.records.as_mut() {
            cache.put(index, record);
        }
        Ok(record)
    }

    /// Read a glyph's record and coverage bytes for drawing
    pub fn load_glyph(&mut self, index: usize) -> Result<GlyphImage<'_>, SourceError> {
        let record = self.read_glyph_record(index)?;
        let offset = self.table.bitmap[index];
        let len = record.bitmap_len();

        let mut pixels = std::mem::take(&mut self.pixels);
        pixels.clear();
        pixels.resize(len, 0);
        let source = self.source()?;
        source.begin_read();
        let read = source.seek(offset).and_then(|()| source.read_exact(&mut pixels));
        source.end_read();
        self.pixels = pixels;
        read?;

        Ok(GlyphImage {
            record,
            pixels: &self.pixels[..len],
        })
    }
}

impl FontFace for RuntimeFont {
    fn kind(&self) -> FontKind {
        FontKind::Streamed
    }

    fn default_metrics(&self) -> Metrics {
        Metrics {
            width: self.space_width,
            x_advance: self.space_width,
            x_offset: 0,
            y_offset: 0,
            baseline: self.max_ascent,
            y_advance: self.y_advance,
            height: self.y_advance,
        }
    }

    fn metrics_for(&self, code: u16) -> Option<Metrics> {
        let index = self.glyph_index(code)?;
        Some(Metrics {
            width: self.table.width[index] as i32,
            x_advance: self.table.x_advance[index] as i32,
            x_offset: self.table.x_offset[index] as i32,
            ..self.default_metrics()
        })
    }
}

impl Drop for RuntimeFont {
    fn drop(&mut self) {
        self.unload();
    }
}
