//! Helmsman core library — config document loading and context sections.
//!
//! Public API surface:
//! - [`config`] — load the YAML config document, pull out named context sections
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;

pub use config::{load_context_section, load_document, section_names};
pub use error::ConfigError;
