//! Frontmatter decoding and flattening into dotted variable paths.
//!
//! Nested mappings produce dotted keys and sequences collapse into a single
//! comma-separated value:
//!
//! ```text
//! site:                      site.name  = "Docs"
//!   name: Docs          =>   site.tags  = "rust, cli"
//!   tags: [rust, cli]
//! ```

use serde_yaml::Value;

use crate::locate::{FrontmatterSpan, locate_frontmatter};
use crate::stringify::stringify;
use crate::variables::Variables;

/// Reasons frontmatter could not be turned into variables.
///
/// Never surfaced to callers: a document with undecodable frontmatter simply
/// contributes no variables.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DecodeError {
    /// Metadata bytes are not valid UTF-8.
    #[error("Frontmatter is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// YAML parsing error.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Top-level document is not a mapping.
    #[error("Frontmatter root must be a mapping")]
    NotMapping,
}

/// Flatten `value` into `out`, using `prefix` as the path of `value` itself.
///
/// Mapping keys are joined with `.`; sequence elements are stringified and
/// joined with `", "` under the sequence's own path. List indices never
/// appear in a path.
///
/// # Examples
///
/// ```
/// use glint_frontmatter::{Variables, flatten};
///
/// let value: serde_yaml::Value = serde_yaml::from_str("a: {b: 1, c: [x, y]}").unwrap();
/// let mut vars = Variables::new();
/// flatten("", &value, &mut vars);
///
/// assert_eq!(vars.get("a.b"), Some("1"));
/// assert_eq!(vars.get("a.c"), Some("x, y"));
/// ```
pub fn flatten(prefix: &str, value: &Value, out: &mut Variables) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let key = stringify(key);
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::Sequence(items) => {
            let joined = items.iter().map(stringify).collect::<Vec<_>>().join(", ");
            out.insert(prefix, joined);
        }
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, out),
        scalar => out.insert(prefix, stringify(scalar)),
    }
}

/// Extract the user variables declared in a document's frontmatter.
///
/// Returns the flattened variables along with the located span. Missing or
/// malformed frontmatter yields an empty table; decoding problems are logged
/// at debug level and otherwise ignored.
pub fn extract_variables(content: &[u8]) -> (Variables, Option<FrontmatterSpan>) {
    let mut vars = Variables::new();
    let span = locate_frontmatter(content);

    if let Some(span) = &span {
        match decode(span.metadata(content)) {
            Ok(value @ Value::Mapping(_)) => flatten("", &value, &mut vars),
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "Ignoring frontmatter"),
        }
    }

    (vars, span)
}

/// Decode raw metadata bytes into a YAML mapping (or null when empty).
fn decode(metadata: &[u8]) -> Result<Value, DecodeError> {
    let text = std::str::from_utf8(metadata)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_yaml::from_str(text)?;
    match value {
        Value::Mapping(_) | Value::Null => Ok(value),
        _ => Err(DecodeError::NotMapping),
    }
}
