//! pixfont CLI - font inspection and text rendering to PNM images

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Info(args) => commands::info::run(&args),
        Commands::Render(args) => commands::render::run(&args),
        Commands::Sheet(args) => commands::sheet::run(&args),
    }
}
