//! `helmsman render` — render one config section into the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use helmsman_core::load_context_section;
use helmsman_renderer::Renderer;

/// Arguments for `helmsman render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Name of the config section to render.
    pub section: String,

    /// Path to the YAML config file.
    #[arg(long, short = 'c', default_value = "config.yaml")]
    pub config: PathBuf,

    /// Directory containing the `.j2` templates.
    #[arg(long, default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Directory the rendered manifests are written to.
    #[arg(long, default_value = "rendered")]
    pub output_dir: PathBuf,

    /// Only render items carrying at least one of these tags.
    #[arg(long, value_delimiter = ',')]
    pub only_tags: Vec<String>,

    /// Skip items carrying any of these tags.
    #[arg(long, value_delimiter = ',')]
    pub skip_tags: Vec<String>,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let context = load_context_section(&self.config, &self.section).with_context(|| {
            format!(
                "loading section '{}' from {}",
                self.section,
                self.config.display()
            )
        })?;

        let renderer = Renderer::new(&self.templates_dir, &self.output_dir);
        let written = renderer
            .generate_by_context(Some(&context), &self.only_tags, &self.skip_tags)
            .with_context(|| format!("rendering section '{}'", self.section))?;

        if written.is_empty() {
            println!(
                "{} '{}' — every template item was filtered out",
                "·".yellow(),
                self.section
            );
            return Ok(());
        }

        println!(
            "{} '{}' rendered ({} file{})",
            "✓".green(),
            self.section,
            written.len(),
            if written.len() == 1 { "" } else { "s" }
        );
        for path in &written {
            println!("  ✎  {}", path.display());
        }
        Ok(())
    }
}
