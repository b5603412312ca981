//! Tera engine adapter — template loading, helper capabilities, error
//! translation.
//!
//! Templates are loaded eagerly from the templates root: every `.j2` file is
//! registered under its slash-normalized relative path, so `{% include %}`
//! across templates works out of the box. Three capabilities are registered
//! on top of tera's built-ins:
//!
//! | name | kind | behavior |
//! |---|---|---|
//! | `env(name=...)` | function | environment lookup; unset variable fails the render |
//! | `include_file(path=...)` | function | raw file splice relative to the templates root, no re-rendering |
//! | `hash_sha256` | filter | hex SHA-256 digest of a string value |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tera::{Context, Tera, Value};

use crate::error::{io_err, TemplateError};

// ---------------------------------------------------------------------------
// Template loading
// ---------------------------------------------------------------------------

fn template_name(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), TemplateError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// Load every `.j2` file under `dir`, keyed by relative path.
///
/// A missing root yields zero templates; rendering against it fails per
/// template, not at construction.
fn load_templates(dir: &Path) -> Result<Vec<(String, String)>, TemplateError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("j2") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((template_name(rel), contents));
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// Helper capabilities
// ---------------------------------------------------------------------------

fn env_fn(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = args
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("env: a string `name` argument is required"))?;
    match std::env::var(name) {
        Ok(value) => Ok(Value::String(value)),
        Err(_) => Err(tera::Error::msg(format!(
            "environment variable '{name}' is not set"
        ))),
    }
}

fn hash_sha256(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let input = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("hash_sha256: value must be a string"))?;
    Ok(Value::String(hex::encode(Sha256::digest(input.as_bytes()))))
}

fn register_capabilities(tera: &mut Tera, templates_dir: &Path) {
    let root = templates_dir.to_path_buf();
    tera.register_function("env", env_fn);
    tera.register_function(
        "include_file",
        move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let rel = args
                .get("path")
                .and_then(Value::as_str)
                .ok_or_else(|| tera::Error::msg("include_file: a string `path` argument is required"))?;
            let full = root.join(rel);
            // Raw splice: the included file is never re-parsed, so template
            // syntax inside it reaches the output verbatim.
            let contents = std::fs::read_to_string(&full).map_err(|e| {
                tera::Error::msg(format!("include_file: cannot read '{}': {e}", full.display()))
            })?;
            Ok(Value::String(contents))
        },
    );
    tera.register_filter("hash_sha256", hash_sha256);
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine over one templates root.
///
/// Construction reads the whole template tree; build a fresh engine to pick
/// up on-disk changes.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`] for the given templates root.
    pub fn new(templates_dir: &Path) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(load_templates(templates_dir)?)?;
        register_capabilities(&mut tera, templates_dir);
        Ok(TemplateEngine { tera })
    }

    /// Whether `name` is registered under the templates root.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render a registered template against `context`.
    ///
    /// Failures come back as [`TemplateError`] variants attributed to `name`:
    /// unregistered template, undefined reference, or the umbrella rendering
    /// error carrying tera's cause chain.
    pub fn render(&self, name: &str, context: &Context) -> Result<String, TemplateError> {
        if !self.has_template(name) {
            return Err(TemplateError::TemplateNotFound { path: name.to_string() });
        }
        self.tera
            .render(name, context)
            .map_err(|e| translate_render_error(name, e))
    }
}

// ---------------------------------------------------------------------------
// Error translation
// ---------------------------------------------------------------------------

/// Map a tera failure onto the crate's error contract, keeping the original
/// cause text and the failing template's name.
fn translate_render_error(template: &str, err: tera::Error) -> TemplateError {
    if let tera::ErrorKind::TemplateNotFound(name) = &err.kind {
        return TemplateError::TemplateNotFound { path: name.clone() };
    }

    let mut messages = Vec::new();
    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(e) = cause {
        messages.push(e.to_string());
        cause = e.source();
    }

    for message in &messages {
        if let Some(name) = undefined_name(message) {
            return TemplateError::Undefined {
                template: template.to_string(),
                name,
            };
        }
        if let Some(name) = missing_include(message) {
            // `{% include %}` of an unregistered template surfaces mid-chain.
            return TemplateError::TemplateNotFound { path: name };
        }
    }

    // The deepest cause is the precise one; tera's outer messages just repeat
    // "Failed to render '<name>'".
    let reason = messages
        .into_iter()
        .last()
        .unwrap_or_else(|| "unknown engine failure".to_string());
    TemplateError::Rendering {
        template: template.to_string(),
        reason,
    }
}

/// Extract the offending name from tera's undefined-reference messages.
fn undefined_name(message: &str) -> Option<String> {
    if message.contains("not found in context") {
        let start = message.find('`')? + 1;
        let end = message[start..].find('`')? + start;
        return Some(message[start..end].to_string());
    }
    for kind in ["Function '", "Filter '"] {
        if let Some(rest) = message.strip_prefix(kind) {
            let end = rest.find('\'')?;
            if rest[end..].starts_with("' not found") {
                return Some(rest[..end].to_string());
            }
        }
    }
    None
}

/// Match tera's "Template '<name>' not found" message from nested includes.
fn missing_include(message: &str) -> Option<String> {
    let rest = message.strip_prefix("Template '")?;
    let end = rest.find('\'')?;
    if rest[end..].starts_with("' not found") {
        Some(rest[..end].to_string())
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn engine_with(templates: &[(&str, &str)]) -> (TempDir, TemplateEngine) {
        let dir = TempDir::new().expect("tempdir");
        for (rel, content) in templates {
            write(dir.path(), rel, content);
        }
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        (dir, engine)
    }

    #[test]
    fn nested_templates_register_under_relative_paths() {
        let (_dir, engine) = engine_with(&[
            ("top.yaml.j2", "x"),
            ("inner/leaf.yaml.j2", "y"),
            ("notes.txt", "not a template"),
        ]);
        assert!(engine.has_template("top.yaml.j2"));
        assert!(engine.has_template("inner/leaf.yaml.j2"));
        assert!(!engine.has_template("notes.txt"));
    }

    #[test]
    fn missing_root_yields_empty_engine() {
        let engine = TemplateEngine::new(Path::new("/nonexistent/templates")).expect("engine");
        let err = engine.render("anything.j2", &Context::new()).unwrap_err();
        assert!(matches!(err, TemplateError::TemplateNotFound { .. }));
    }

    #[test]
    fn unregistered_template_error_names_the_path() {
        let (_dir, engine) = engine_with(&[("present.yaml.j2", "x")]);
        let err = engine.render("doesnotexist.yaml.j2", &Context::new()).unwrap_err();
        assert!(err.to_string().contains("doesnotexist.yaml.j2"), "{err}");
    }

    #[test]
    fn env_function_reads_the_environment() {
        std::env::set_var("HELMSMAN_ENGINE_TEST_VAR", "from-env");
        let (_dir, engine) =
            engine_with(&[("t.yaml.j2", "{{ env(name=\"HELMSMAN_ENGINE_TEST_VAR\") }}")]);
        let rendered = engine.render("t.yaml.j2", &Context::new()).expect("render");
        assert_eq!(rendered, "from-env");
        std::env::remove_var("HELMSMAN_ENGINE_TEST_VAR");
    }

    #[test]
    fn unset_env_variable_fails_the_render() {
        let (_dir, engine) =
            engine_with(&[("t.yaml.j2", "{{ env(name=\"HELMSMAN_DEFINITELY_UNSET\") }}")]);
        let err = engine.render("t.yaml.j2", &Context::new()).unwrap_err();
        assert!(matches!(err, TemplateError::Rendering { .. }), "{err}");
        assert!(err.to_string().contains("HELMSMAN_DEFINITELY_UNSET"), "{err}");
        assert!(err.to_string().contains("is not set"), "{err}");
    }

    #[test]
    fn include_file_splices_raw_content() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "t.yaml.j2", "{{ include_file(path=\"raw/snippet.txt\") }}");
        write(dir.path(), "raw/snippet.txt", "literal {{ braces }} stay");
        let engine = TemplateEngine::new(dir.path()).expect("engine");
        let rendered = engine.render("t.yaml.j2", &Context::new()).expect("render");
        assert_eq!(rendered, "literal {{ braces }} stay");
    }

    #[test]
    fn include_file_missing_path_names_the_file() {
        let (_dir, engine) =
            engine_with(&[("t.yaml.j2", "{{ include_file(path=\"absent.txt\") }}")]);
        let err = engine.render("t.yaml.j2", &Context::new()).unwrap_err();
        assert!(err.to_string().contains("absent.txt"), "{err}");
    }

    #[test]
    fn b64encode_builtin_is_available() {
        let (_dir, engine) = engine_with(&[("t.yaml.j2", "{{ secret | b64encode }}")]);
        let mut ctx = Context::new();
        ctx.insert("secret", "My value");
        let rendered = engine.render("t.yaml.j2", &ctx).expect("render");
        assert_eq!(rendered, "TXkgdmFsdWU=");
    }

    #[test]
    fn hash_sha256_filter_hex_digests_strings() {
        let (_dir, engine) = engine_with(&[("t.yaml.j2", "{{ secret | hash_sha256 }}")]);
        let mut ctx = Context::new();
        ctx.insert("secret", "My value");
        let rendered = engine.render("t.yaml.j2", &ctx).expect("render");
        assert_eq!(rendered, hex::encode(Sha256::digest(b"My value")));
        assert_eq!(rendered.len(), 64);
    }

    #[test]
    fn undefined_variable_is_attributed_by_name() {
        let (_dir, engine) = engine_with(&[("t.yaml.j2", "{{ undefined_variable }}")]);
        let err = engine.render("t.yaml.j2", &Context::new()).unwrap_err();
        match &err {
            TemplateError::Undefined { template, name } => {
                assert_eq!(template, "t.yaml.j2");
                assert_eq!(name, "undefined_variable");
            }
            other => panic!("expected Undefined, got: {other}"),
        }
        assert!(err.to_string().contains("undefined"), "{err}");
    }

    #[test]
    fn native_include_of_registered_template_renders() {
        let (_dir, engine) = engine_with(&[
            ("outer.yaml.j2", "a-{% include \"part.yaml.j2\" %}-c"),
            ("part.yaml.j2", "{{ middle }}"),
        ]);
        let mut ctx = Context::new();
        ctx.insert("middle", "b");
        let rendered = engine.render("outer.yaml.j2", &ctx).expect("render");
        assert_eq!(rendered, "a-b-c");
    }
}
