//! Byte sources for font data: in-memory images and files
//!
//! Fonts stay attached to their source for their whole life; glyph bitmaps
//! are read on demand at draw time rather than copied at load.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use pixfont_core::{ByteSource, SourceError};

/// Font bytes held in memory: a `&'static` flash image or an owned buffer
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Cow<'static, [u8]>,
    pos: usize,
    closed: bool,
}

impl MemorySource {
    pub fn new(data: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            closed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ByteSource for MemorySource {
    fn seek(&mut self, offset: u32) -> Result<(), SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }
        let offset_usize = offset as usize;
        if offset_usize > self.data.len() {
            return Err(SourceError::OutOfBounds { offset, len: 0 });
        }
        self.pos = offset_usize;
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }
        let end = self.pos + buf.len();
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(SourceError::OutOfBounds {
                offset: self.pos as u32,
                len: buf.len(),
            })?;
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
        self.data = Cow::Borrowed(&[]);
        self.pos = 0;
    }
}

/// Font bytes read from a file kept open for the font's lifetime
#[derive(Debug)]
pub struct FileSource {
    reader: Option<BufReader<File>>,
    path: PathBuf,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        log::debug!("Opened font file {}", path.display());
        Ok(Self {
            reader: Some(BufReader::new(file)),
            path,
        })
    }

    /// Open a font by path, retrying with a `.vlw` extension when the path
    /// has none and the bare name cannot be opened
    pub fn open_font(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(source) => Ok(source),
            Err(err) if path.extension().is_none() => {
                let with_ext = path.with_extension("vlw");
                log::debug!(
                    "{} not found ({err}), trying {}",
                    path.display(),
                    with_ext.display()
                );
                Self::open(with_ext)
            },
            Err(err) => Err(err),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&mut self) -> Result<&mut BufReader<File>, SourceError> {
        self.reader.as_mut().ok_or(SourceError::Closed)
    }
}

impl ByteSource for FileSource {
    fn seek(&mut self, offset: u32) -> Result<(), SourceError> {
        self.reader()?.seek(SeekFrom::Start(offset as u64))?;
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let reader = self.reader()?;
        let offset = reader.stream_position()? as u32;
        let len = buf.len();
        reader.read_exact(buf).map_err(|err| match err.kind() {
            std::io::ErrorKind::UnexpectedEof => SourceError::OutOfBounds { offset, len },
            _ => SourceError::Io(err),
        })
    }

    fn close(&mut self) {
        if self.reader.take().is_some() {
            log::debug!("Closed font file {}", self.path.display());
        }
    }
}
