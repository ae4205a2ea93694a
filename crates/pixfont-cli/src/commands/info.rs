//! Info command implementation
//!
//! Prints a font file's header and glyph table, or with no file the
//! registered bitmap fonts and output formats.

use anyhow::Result;
use pixfont::prelude::*;

use super::open_font;
use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    println!("pixfont v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match args.font {
        Some(ref path) => {
            let font = open_font(path)?;
            println!("Font: {}", path.display());
            print_font(&font, args.glyphs);
        },
        None => {
            print_builtins();
            println!();
            print_formats();
        },
    }
    Ok(())
}

fn print_font(font: &RuntimeFont, glyphs: bool) {
    let header = font.header();
    println!("  Glyphs:        {}", header.glyph_count);
    println!("  Version:       {}", header.version);
    println!("  Line advance:  {} (header)", header.line_advance);
    println!("  Ascent:        {} header, {} observed", header.ascent, font.max_ascent());
    println!("  Descent:       {} header, {} observed", header.descent, font.max_descent());
    println!("  Line height:   {}", font.y_advance());
    println!("  Space width:   {}", font.space_width());

    if let (Some(first), Some(last)) = (font.glyphs().next(), font.glyphs().last()) {
        println!("  Range:         U+{:04X}..U+{:04X}", first.code, last.code);
    }

    if glyphs {
        println!();
        println!("  {:>5}  {:<7} {:>5} {:>7} {:>7} {:>10}", "index", "code", "width", "advance", "offset", "bitmap");
        for (index, g) in font.glyphs().enumerate() {
            println!(
                "  {index:>5}  U+{:04X}  {:>5} {:>7} {:>7} {:>10}",
                g.code, g.width, g.x_advance, g.x_offset, g.bitmap_offset
            );
        }
    }
}

fn print_builtins() {
    let registry = FontRegistry::with_builtins();
    println!("Built-in fonts:");
    for name in registry.names() {
        if let Some(font) = registry.get(name) {
            let m = font.default_metrics();
            println!("  {name:<16}  {} {}x{}", font.kind().name(), m.width, m.height);
        }
    }
}

fn print_formats() {
    println!("Output formats:");
    println!("  ppm               - Plain RGB pixmap (P3)");
    println!("  pgm               - Plain 8-bit graymap (P2)");
}
