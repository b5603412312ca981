//! Rendering orchestrator — context validation, selection, output placement.
//!
//! One call is one independent pipeline:
//!
//! ```text
//! validate context → parse items → evaluate only_if → filter by tags
//!   → for each item: resolve output path → mkdir -p → render → write
//! ```
//!
//! Processing is strictly sequential and fail-fast: the first failure aborts
//! the call, leaving any earlier outputs on disk. The caller owns the output
//! directory's lifecycle; the templates root is never written to.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::engine::TemplateEngine;
use crate::error::{io_err, TemplateError};
use crate::item::{yaml_type_name, TemplateItem};
use crate::tags::filter_by_tags;

/// Output path for a template, relative to the output root.
///
/// Mirrors the template's relative directory structure with a trailing `.j2`
/// stripped: `innerdir/template1.yaml.j2` → `innerdir/template1.yaml`.
fn output_rel_path(template: &str) -> PathBuf {
    PathBuf::from(template.strip_suffix(".j2").unwrap_or(template))
}

/// Renders a context section's templates into the output directory.
///
/// Holds only the two roots; there is no mutable state between calls, and one
/// instance may process any number of contexts sequentially.
pub struct Renderer {
    templates_dir: PathBuf,
    output_dir: PathBuf,
}

impl Renderer {
    /// Construct a [`Renderer`] over a templates root and an output root.
    ///
    /// No I/O happens here; missing directories surface per call.
    pub fn new(templates_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Renderer {
            templates_dir: templates_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// The templates root this renderer resolves relative paths against.
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// The output root rendered artifacts are written under.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render every selected template item of `context` and write the
    /// results, returning the written paths in render order.
    ///
    /// `only_tags`/`skip_tags` follow the tag-filter contract; empty slices
    /// mean "no filter". A context whose item list is empty before tag
    /// filtering is an error (deploying nothing is never silent); a list
    /// emptied *by* tag filtering is a successful no-op.
    pub fn generate_by_context(
        &self,
        context: Option<&Mapping>,
        only_tags: &[String],
        skip_tags: &[String],
    ) -> Result<Vec<PathBuf>, TemplateError> {
        let context = context.ok_or(TemplateError::AbsentContext)?;

        let raw_items = match context.get(&Value::from("templates")) {
            None | Some(Value::Null) => return Err(TemplateError::NoTemplateItems),
            Some(Value::Sequence(seq)) => seq,
            Some(other) => {
                return Err(TemplateError::UnexpectedType {
                    field: "templates".to_string(),
                    found: yaml_type_name(other).to_string(),
                })
            }
        };

        let mut items = Vec::with_capacity(raw_items.len());
        for value in raw_items {
            let item = TemplateItem::from_value(value)?;
            if item.only_if != Some(false) {
                items.push(item);
            }
        }
        if items.is_empty() {
            return Err(TemplateError::NoTemplateItems);
        }

        let selected = filter_by_tags(items, only_tags, skip_tags);

        let engine = TemplateEngine::new(&self.templates_dir)?;
        let tera_context = tera::Context::from_serialize(Value::Mapping(context.clone()))?;

        let mut written = Vec::with_capacity(selected.len());
        for item in &selected {
            let path = self.output_dir.join(output_rel_path(&item.template));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
            let rendered = engine.render(&item.template, &tera_context)?;
            std::fs::write(&path, rendered).map_err(|e| io_err(&path, e))?;
            log::info!("wrote: {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
