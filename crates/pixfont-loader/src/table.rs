//! Per-glyph lookup tables built once at load time

use pixfont_core::FontLoadError;

use crate::format::GlyphRecord;

/// Parallel arrays indexed by glyph ordinal
///
/// `unicode` is strictly ascending; every lookup is a binary search over
/// it. The table owns all five arrays as one unit so they are released
/// together.
#[derive(Debug, Default)]
pub(crate) struct GlyphTable {
    pub unicode: Vec<u16>,
    pub width: Vec<u8>,
    pub x_advance: Vec<u8>,
    pub x_offset: Vec<i8>,
    pub bitmap: Vec<u32>,
}

fn reserve<T>(v: &mut Vec<T>, count: usize) -> Result<(), FontLoadError> {
    v.try_reserve_exact(count)
        .map_err(|_| FontLoadError::Allocation { count })
}

impl GlyphTable {
    /// Allocate room for `count` glyphs without aborting on failure
    pub fn with_capacity(count: usize) -> Result<Self, FontLoadError> {
        let mut table = Self::default();
        reserve(&mut table.unicode, count)?;
        reserve(&mut table.width, count)?;
        reserve(&mut table.x_advance, count)?;
        reserve(&mut table.x_offset, count)?;
        reserve(&mut table.bitmap, count)?;
        Ok(table)
    }

    /// Append one glyph; rejects a code point that does not sort after
    /// the previous one
    pub fn push(&mut self, record: &GlyphRecord, bitmap_offset: u32) -> Result<(), FontLoadError> {
        if let Some(&last) = self.unicode.last() {
            if record.code <= last {
                return Err(FontLoadError::UnsortedGlyphs {
                    index: self.unicode.len(),
                });
            }
        }
        self.unicode.push(record.code);
        self.width.push(record.width);
        self.x_advance.push(record.x_advance);
        self.x_offset.push(record.x_offset);
        self.bitmap.push(bitmap_offset);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.unicode.len()
    }

    /// `Ok(index)` on an exact match, `Err(insertion_point)` otherwise
    pub fn lookup(&self, code: u16) -> Result<usize, usize> {
        self.unicode.binary_search(&code)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
