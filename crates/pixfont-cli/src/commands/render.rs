//! Render command implementation
//!
//! Draws each input line with `draw_string` onto a framebuffer sized to the
//! text (or to `--width`/`--height`) and exports it as PNM.

use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use pixfont::prelude::*;
use pixfont_export::Framebuffer;

use super::{parse_color, write_image};
use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> Result<()> {
    let text = get_input_text(args)?;
    let foreground = parse_color(&args.foreground)?;
    let background = parse_color(&args.background)?;

    let registry = FontRegistry::with_builtins();
    let mut engine = TextEngine::new(&registry);
    match args.font_file {
        Some(ref path) => engine
            .load_font_file(path)
            .with_context(|| format!("cannot load {}", path.display()))?,
        None => {
            if !engine.select_font(&args.font) {
                let known: Vec<_> = registry.names().collect();
                bail!("Unknown font {:?}; available: {}", args.font, known.join(", "));
            }
        },
    }

    engine.set_text_size(args.size, args.size);
    engine.set_text_padding(args.padding);
    if args.transparent {
        engine.set_text_color(foreground);
    } else {
        engine.set_text_colors(foreground, background);
    }

    let lines: Vec<&str> = text.lines().collect();
    let line_height = engine.font_height();
    let text_width = lines
        .iter()
        .map(|line| engine.text_width(line).max(args.padding as i32))
        .max()
        .unwrap_or(0);
    let margin = args.margin.min(i32::MAX as u32 / 4) as i32;
    let width = args.width.unwrap_or((text_width + 2 * margin).max(1) as u32);
    let height = args
        .height
        .unwrap_or((line_height * lines.len() as i32 + 2 * margin).max(1) as u32);

    if !args.output.quiet {
        eprintln!("pixfont v{}", env!("CARGO_PKG_VERSION"));
        eprintln!(
            "Rendering {} line(s) with a {} font, size {}",
            lines.len(),
            engine.font_kind().name(),
            args.size
        );
    }

    let mut fb = Framebuffer::with_background(width, height, background);
    for (i, line) in lines.iter().enumerate() {
        let drawn = engine.draw_string(&mut fb, line, margin, margin + i as i32 * line_height);
        log::debug!("line {i}: {drawn} px");
    }

    write_image(&args.output, &fb)
}

fn get_input_text(args: &RenderArgs) -> Result<String> {
    // Priority: positional text > --text-file > stdin
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }
    if let Some(ref path) = args.text_file {
        return fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()));
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}
