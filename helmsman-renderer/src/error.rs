//! Error types for helmsman-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template selection and rendering.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// `generate_by_context` was handed no context at all.
    #[error("cannot generate templates from an absent context")]
    AbsentContext,

    /// The context has no `templates` key, or every item was dropped by
    /// `only_if` evaluation before tag filtering.
    #[error("templates section doesn't have any template items")]
    NoTemplateItems,

    /// A template item is missing its `template` path (or the path is empty).
    #[error("template item has no 'template' path")]
    MissingTemplatePath,

    /// A config field holds a YAML shape the schema does not allow.
    #[error("field '{field}' has unexpected type: {found}")]
    UnexpectedType { field: String, found: String },

    /// The referenced template is not registered under the templates root.
    #[error("template '{path}' not found under templates root")]
    TemplateNotFound { path: String },

    /// A name referenced inside the template (variable, function, filter)
    /// could not be resolved against the context.
    #[error("failed to render '{template}' due to: '{name}' is undefined")]
    Undefined { template: String, name: String },

    /// Any other engine failure, attributed to the template being rendered.
    #[error("failed to render '{template}' due to: {reason}")]
    Rendering { template: String, reason: String },

    /// Tera failure outside of a single render (template load, context build).
    #[error("template engine error: {0}")]
    Engine(#[from] tera::Error),

    /// Filesystem error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`TemplateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> TemplateError {
    TemplateError::Io {
        path: path.into(),
        source,
    }
}
