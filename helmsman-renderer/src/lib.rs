//! # helmsman-renderer
//!
//! Tera-based manifest generation: tag-filtered template selection, helper
//! capabilities (environment lookup, raw file includes, digests), and
//! deterministic output placement mirroring the template tree.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use helmsman_renderer::Renderer;
//!
//! fn render_section(context: &serde_yaml::Mapping) {
//!     let renderer = Renderer::new("templates", "rendered");
//!     if let Ok(written) = renderer.generate_by_context(Some(context), &[], &[]) {
//!         for path in written {
//!             println!("{}", path.display());
//!         }
//!     }
//! }
//! ```

pub mod engine;
pub mod error;
pub mod item;
pub mod renderer;
pub mod tags;

pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use item::TemplateItem;
pub use renderer::Renderer;
pub use tags::{filter_by_tags, tags_match};
