//! Sheet command implementation

use anyhow::{bail, Context, Result};
use pixfont::prelude::*;
use pixfont_export::Framebuffer;

use super::write_image;
use crate::cli::SheetArgs;

pub fn run(args: &SheetArgs) -> Result<()> {
    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    engine
        .load_font_file(&args.font)
        .with_context(|| format!("cannot load {}", args.font.display()))?;
    engine.set_text_size(args.size, args.size);
    engine.set_text_colors(Rgb888::WHITE, Rgb888::BLACK);

    let count = engine.runtime_font().map_or(0, |f| f.glyph_count());

    // Earlier pages are laid out on a scratch surface to find where the
    // requested one starts
    let mut first = 0;
    let mut scratch = Framebuffer::new(args.width, args.height);
    for page in 0..args.page {
        match engine.draw_glyph_sheet(&mut scratch, first) {
            Some(next) => first = next,
            None => bail!("{} has {} page(s) at this size", args.font.display(), page + 1),
        }
    }

    let mut fb = Framebuffer::new(args.width, args.height);
    let next = engine.draw_glyph_sheet(&mut fb, first);
    if !args.output.quiet {
        let shown = next.unwrap_or(count) - first;
        eprintln!("Page {}: glyphs {}..{} of {}", args.page, first, first + shown, count);
        if next.is_some() {
            eprintln!("  More glyphs follow: --page {}", args.page + 1);
        }
    }

    write_image(&args.output, &fb)
}
