pub mod info;
pub mod render;
pub mod sheet;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use pixfont::prelude::*;
use pixfont_export::{Framebuffer, PnmExporter};

use crate::cli::{OutputArgs, OutputFormat};

/// Load a runtime font file, trying `<path>.vlw` as well
pub fn open_font(path: &Path) -> Result<RuntimeFont> {
    let source = FileSource::open_font(path).with_context(|| format!("cannot open {}", path.display()))?;
    RuntimeFont::load(source, &LoadOptions::default()).with_context(|| format!("cannot load {}", path.display()))
}

/// Parse `RRGGBB`, with or without a leading `#`
pub fn parse_color(color_str: &str) -> Result<Rgb888> {
    let hex = color_str.trim_start_matches('#');
    if hex.len() != 6 {
        bail!("Color must be in RRGGBB format: {color_str:?}");
    }
    let value = u32::from_str_radix(hex, 16).with_context(|| format!("Invalid color {color_str:?}"))?;
    Ok(Rgb888(value))
}

/// Export `fb` and write it to the output file or stdout
pub fn write_image(args: &OutputArgs, fb: &Framebuffer) -> Result<()> {
    let exporter = match args.format {
        OutputFormat::Ppm => PnmExporter::ppm(),
        OutputFormat::Pgm => PnmExporter::pgm(),
    };
    let data = exporter.export(fb)?;

    if let Some(ref path) = args.output_file {
        let mut file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        file.write_all(&data)?;
    } else {
        io::stdout().write_all(&data)?;
    }

    if !args.quiet {
        match args.output_file {
            Some(ref path) => eprintln!("Wrote {} ({} bytes)", path.display(), data.len()),
            None => eprintln!("Wrote {} bytes to stdout", data.len()),
        }
        eprintln!("  Format: {}", exporter.name());
        eprintln!("  Size: {}x{} pixels", fb.width(), fb.height());
    }
    Ok(())
}
