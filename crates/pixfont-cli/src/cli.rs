//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pixfont - render bitmap and anti-aliased fonts for small displays
#[derive(Parser, Debug)]
#[command(name = "pixfont")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a font file's header and glyph table, or the built-in fonts
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Render text to an image file
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Render a page of every glyph in a font file
    #[command(alias = "s")]
    Sheet(SheetArgs),
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Font file (a `.vlw` extension is tried when omitted)
    pub font: Option<PathBuf>,

    /// List every glyph of the table
    #[arg(short = 'g', long)]
    pub glyphs: bool,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Text to render (reads from stdin if omitted)
    pub text: Option<String>,

    /// Read input text from file
    #[arg(short = 'T', long = "text-file", conflicts_with = "text")]
    pub text_file: Option<PathBuf>,

    /// Runtime font file; a registered font is used when omitted
    #[arg(short = 'f', long = "font-file")]
    pub font_file: Option<PathBuf>,

    /// Registered font name
    #[arg(short = 'n', long = "font", default_value = "glcd", conflicts_with = "font_file")]
    pub font: String,

    /// Integer magnification
    #[arg(short = 's', long = "size", default_value = "1")]
    pub size: u8,

    /// Text color (RRGGBB)
    #[arg(short = 'c', long = "foreground", default_value = "FFFFFF")]
    pub foreground: String,

    /// Background color (RRGGBB)
    #[arg(short = 'b', long = "background", default_value = "000000")]
    pub background: String,

    /// Blend onto the background instead of painting glyph cells
    #[arg(long)]
    pub transparent: bool,

    /// Minimum background width painted behind each line
    #[arg(short = 'p', long = "padding", default_value = "0")]
    pub padding: u16,

    /// Margin in pixels
    #[arg(short = 'm', long = "margin", default_value = "2")]
    pub margin: u32,

    /// Canvas width; fits the text when omitted
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Canvas height; fits the text when omitted
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct SheetArgs {
    /// Font file
    pub font: PathBuf,

    /// Page to render, counting from 0
    #[arg(long, default_value = "0")]
    pub page: usize,

    /// Integer magnification
    #[arg(short = 's', long = "size", default_value = "1")]
    pub size: u8,

    #[arg(short = 'W', long, default_value = "240")]
    pub width: u32,

    #[arg(short = 'H', long, default_value = "320")]
    pub height: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    /// Output file path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'O', long = "format", default_value = "ppm")]
    pub format: OutputFormat,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain RGB pixmap
    Ppm,
    /// Plain 8-bit graymap
    Pgm,
}
