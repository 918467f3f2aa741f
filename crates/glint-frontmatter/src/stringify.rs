//! Canonical string form of decoded YAML values.

use serde_yaml::{Number, Value};

/// Convert a YAML value to the string substituted for its placeholder.
///
/// - null becomes the empty string
/// - booleans become `true` / `false`
/// - numbers use their shortest decimal form
/// - strings are returned unchanged
/// - tagged values are stringified without their tag
///
/// Sequences and mappings are re-encoded as YAML with surrounding whitespace
/// trimmed. This never fails: if re-encoding errors, the `Debug` form is used.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => stringify(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => match serde_yaml::to_string(value) {
            Ok(yaml) => yaml.trim().to_owned(),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to re-encode YAML value");
                format!("{value:?}")
            }
        },
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_nan() => "NaN".to_owned(),
        Some(f) if f.is_infinite() => {
            if f.is_sign_positive() {
                "+Inf".to_owned()
            } else {
                "-Inf".to_owned()
            }
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
