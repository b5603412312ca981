//! Template items — duck-typed YAML entries normalized into a strict shape.
//!
//! Config authors may write `tags` as a sequence or a comma-delimited string,
//! and `only_if` as a boolean or a boolean-like string. Everything is
//! normalized here by exhaustive case analysis; any shape outside the schema
//! fails loudly instead of being coerced.

use std::collections::BTreeSet;

use serde_yaml::Value;

use crate::error::TemplateError;

/// One entry of a section's `templates` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateItem {
    /// Relative path of the template under the templates root.
    pub template: String,
    /// Normalized tag set used by the tag filter.
    pub tags: BTreeSet<String>,
    /// Conditional inclusion, evaluated before tag filtering.
    pub only_if: Option<bool>,
}

impl TemplateItem {
    /// Parse a raw YAML value into a [`TemplateItem`].
    pub fn from_value(value: &Value) -> Result<TemplateItem, TemplateError> {
        let mapping = value.as_mapping().ok_or_else(|| TemplateError::UnexpectedType {
            field: "templates entry".to_string(),
            found: yaml_type_name(value).to_string(),
        })?;

        let template = match mapping.get(&Value::from("template")) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) | None => return Err(TemplateError::MissingTemplatePath),
            Some(other) => {
                return Err(TemplateError::UnexpectedType {
                    field: "template".to_string(),
                    found: yaml_type_name(other).to_string(),
                })
            }
        };

        let tags = normalize_tags(mapping.get(&Value::from("tags")))?;

        let only_if = match mapping.get(&Value::from("only_if")) {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_only_if(value)?),
        };

        Ok(TemplateItem { template, tags, only_if })
    }
}

/// Normalize the `tags` field into a set of strings.
///
/// Absent → empty set. Single string → split on comma, trim, drop empty
/// pieces. Sequence → scalar elements coerced to strings.
fn normalize_tags(value: Option<&Value>) -> Result<BTreeSet<String>, TemplateError> {
    let mut tags = BTreeSet::new();
    match value {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) => {
            for piece in s.split(',') {
                let piece = piece.trim();
                if !piece.is_empty() {
                    tags.insert(piece.to_string());
                }
            }
        }
        Some(Value::Sequence(elements)) => {
            for element in elements {
                match element {
                    Value::String(s) => tags.insert(s.trim().to_string()),
                    Value::Number(n) => tags.insert(n.to_string()),
                    Value::Bool(b) => tags.insert(b.to_string()),
                    other => {
                        return Err(TemplateError::UnexpectedType {
                            field: "tags".to_string(),
                            found: format!("sequence of {}", yaml_type_name(other)),
                        })
                    }
                };
            }
        }
        Some(other) => {
            return Err(TemplateError::UnexpectedType {
                field: "tags".to_string(),
                found: yaml_type_name(other).to_string(),
            })
        }
    }
    Ok(tags)
}

/// Evaluate a boolean-like `only_if` value.
///
/// Booleans pass through; strings are matched against a closed truthy/falsy
/// set. Anything else is a config authoring bug.
fn parse_only_if(value: &Value) -> Result<bool, TemplateError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" | "" => Ok(false),
            _ => Err(TemplateError::UnexpectedType {
                field: "only_if".to_string(),
                found: format!("unrecognized string \"{s}\""),
            }),
        },
        other => Err(TemplateError::UnexpectedType {
            field: "only_if".to_string(),
            found: yaml_type_name(other).to_string(),
        }),
    }
}

/// Human-readable YAML type name for error messages.
pub(crate) fn yaml_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
