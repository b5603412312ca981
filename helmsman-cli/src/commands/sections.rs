//! `helmsman sections` — list context sections in a config file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use helmsman_core::section_names;

/// Arguments for `helmsman sections`.
#[derive(Args, Debug)]
pub struct SectionsArgs {
    /// Path to the YAML config file.
    #[arg(long, short = 'c', default_value = "config.yaml")]
    pub config: PathBuf,
}

impl SectionsArgs {
    pub fn run(self) -> Result<()> {
        let names = section_names(&self.config)
            .with_context(|| format!("reading {}", self.config.display()))?;

        if names.is_empty() {
            println!("No sections found in {}.", self.config.display());
            return Ok(());
        }
        for name in names {
            println!("{name}");
        }
        Ok(())
    }
}
