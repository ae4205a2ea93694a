//! PNM (Portable Any Map) export of a framebuffer

use std::io::Write;
use std::path::Path;

use pixfont_core::{ExportError, Rgb888};

use crate::framebuffer::Framebuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmFormat {
    /// PGM - Portable Graymap
    Pgm,
    /// PPM - Portable Pixmap (color)
    Ppm,
}

/// Plain-text PNM writer
#[derive(Debug, Clone, Copy)]
pub struct PnmExporter {
    format: PnmFormat,
}

/// Luminance with the usual 299/587/114 weights
fn luma(p: Rgb888) -> u8 {
    ((p.r() as u32 * 299 + p.g() as u32 * 587 + p.b() as u32 * 114) / 1000) as u8
}

impl PnmExporter {
    pub fn new(format: PnmFormat) -> Self {
        Self { format }
    }

    pub fn ppm() -> Self {
        Self::new(PnmFormat::Ppm)
    }

    pub fn pgm() -> Self {
        Self::new(PnmFormat::Pgm)
    }

    pub fn format(&self) -> PnmFormat {
        self.format
    }

    pub fn export(&self, image: &Framebuffer) -> Result<Vec<u8>, ExportError> {
        use pixfont_core::DrawSurface;

        let (width, height) = (image.width(), image.height());
        if width <= 0 || height <= 0 {
            return Err(ExportError::EmptyImage);
        }
        let mut output = Vec::new();
        self.write_body(&mut output, image, width, height)
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
        Ok(output)
    }

    fn write_body(&self, output: &mut Vec<u8>, image: &Framebuffer, width: i32, height: i32) -> std::io::Result<()> {
        let magic = match self.format {
            PnmFormat::Ppm => "P3",
            PnmFormat::Pgm => "P2",
        };
        writeln!(output, "{magic}")?;
        writeln!(output, "{width} {height}")?;
        writeln!(output, "255")?;

        for row in image.rows() {
            for &p in row {
                match self.format {
                    PnmFormat::Ppm => write!(output, "{} {} {} ", p.r(), p.g(), p.b())?,
                    PnmFormat::Pgm => write!(output, "{} ", luma(p))?,
                }
            }
            writeln!(output)?;
        }
        Ok(())
    }

    /// Export and write to `path`
    pub fn write_file(&self, image: &Framebuffer, path: impl AsRef<Path>) -> pixfont_core::Result<()> {
        let bytes = self.export(image)?;
        std::fs::write(path.as_ref(), bytes)?;
        log::debug!("Wrote {} image to {}", self.extension(), path.as_ref().display());
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.extension()
    }

    pub fn extension(&self) -> &'static str {
        match self.format {
            PnmFormat::Pgm => "pgm",
            PnmFormat::Ppm => "ppm",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self.format {
            PnmFormat::Pgm => "image/x-portable-graymap",
            PnmFormat::Ppm => "image/x-portable-pixmap",
        }
    }
}

impl Default for PnmExporter {
    fn default() -> Self {
        Self::ppm()
    }
}
