//! Error types for helmsman-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from config document operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document root was something other than a mapping of sections.
    #[error("config at {path} is not a mapping of sections")]
    NotAMapping { path: PathBuf },

    /// No section with the requested name exists in the document.
    #[error("section \"{name}\" not found in config")]
    SectionNotFound { name: String },

    /// The requested section exists but is not a mapping.
    #[error("section \"{name}\" is not a mapping")]
    SectionNotAMapping { name: String },
}
