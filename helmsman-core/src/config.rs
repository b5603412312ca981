//! YAML config document — the source of rendering contexts.
//!
//! # Document layout
//!
//! ```text
//! config.yaml
//!   <section name>:          (one mapping per deployable context)
//!     templates:             (ordered list of template items)
//!       - template: a.yaml.j2
//!         tags: tag1,tag2
//!     <variable>: <value>    (arbitrary keys, passed to the renderer)
//! ```
//!
//! A context section is returned as an owned [`serde_yaml::Mapping`]; the
//! renderer never sees the rest of the document.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// Load and parse the whole config document.
///
/// Returns `ConfigError::ConfigNotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML,
/// `ConfigError::NotAMapping` if the document root is not a mapping.
pub fn load_document(path: &Path) -> Result<Mapping, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path)?;
    let doc: Value = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    match doc {
        Value::Mapping(m) => Ok(m),
        _ => Err(ConfigError::NotAMapping { path: path.to_path_buf() }),
    }
}

/// Pull the named context section out of the config document.
///
/// The section is returned as an owned mapping, immutable for the duration
/// of a rendering pass. Returns `ConfigError::SectionNotFound` if no such
/// key exists, `ConfigError::SectionNotAMapping` if the key is bound to a
/// scalar or sequence.
pub fn load_context_section(path: &Path, name: &str) -> Result<Mapping, ConfigError> {
    let doc = load_document(path)?;
    let value = doc
        .get(&Value::from(name))
        .ok_or_else(|| ConfigError::SectionNotFound { name: name.to_string() })?;
    match value {
        Value::Mapping(m) => Ok(m.clone()),
        _ => Err(ConfigError::SectionNotAMapping { name: name.to_string() }),
    }
}

/// List section names in document order.
///
/// Non-string keys are skipped; they cannot be addressed by
/// [`load_context_section`] anyway.
pub fn section_names(path: &Path) -> Result<Vec<String>, ConfigError> {
    let doc = load_document(path)?;
    Ok(doc
        .keys()
        .filter_map(|k| k.as_str().map(str::to_owned))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
