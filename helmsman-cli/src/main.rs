//! Helmsman — tag-filtered Kubernetes manifest generation from YAML config.
//!
//! # Usage
//!
//! ```text
//! helmsman render <section> [--config <file>] [--templates-dir <dir>]
//!                 [--output-dir <dir>] [--only-tags a,b] [--skip-tags c]
//! helmsman sections [--config <file>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{render::RenderArgs, sections::SectionsArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "helmsman",
    version,
    about = "Render tag-filtered manifest templates from config sections",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one config section's templates into the output directory.
    Render(RenderArgs),

    /// List the context sections available in a config file.
    Sections(SectionsArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Sections(args) => args.run(),
    }
}
