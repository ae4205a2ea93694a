//! Error types for pixfont

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PixfontError>;

/// Main error type for pixfont
#[derive(Debug, Error)]
pub enum PixfontError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Byte source failed: {0}")]
    Source(#[from] SourceError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Font loading errors
///
/// Any of these leaves the font unusable; the loader releases whatever it
/// had built before returning one.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font declares zero glyphs")]
    EmptyFont,

    #[error("Font header is truncated")]
    TruncatedHeader,

    #[error("Glyph table is truncated at record {index}")]
    TruncatedGlyphTable { index: usize },

    #[error("Font declares {count} glyphs, more than a 16-bit table can hold")]
    TooManyGlyphs { count: u32 },

    #[error("Font header out of range: ascent {ascent}, descent {descent}, line advance {line_advance}")]
    HeaderOutOfRange { ascent: i32, descent: i32, line_advance: u32 },

    #[error("Glyph table is not strictly ascending at record {index}")]
    UnsortedGlyphs { index: usize },

    #[error("Cannot allocate glyph tables for {count} glyphs")]
    Allocation { count: usize },

    #[error("Byte source failed during load: {0}")]
    Source(#[from] SourceError),
}

/// Byte source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Read of {len} bytes at offset {offset} is out of bounds")]
    OutOfBounds { offset: u32, len: usize },

    #[error("Byte source is closed")]
    Closed,

    #[error("Glyph record {index} does not match the table (found U+{found:04X})")]
    RecordMismatch { index: usize, found: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
