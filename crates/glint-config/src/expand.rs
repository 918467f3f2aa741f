//! Environment and home-directory expansion.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// Unset variables without a default are an error naming `field`. Only
/// braced references are expanded: a bare `$` is kept literally.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}').map(|i| start + i + 1) else {
            break;
        };
        out.push_str(&rest[..start]);
        let expanded = expand_reference(&rest[start..end]).map_err(|name| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        })?;
        out.push_str(&expanded);
        rest = &rest[end..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Expand a single `${...}` reference, returning the unset name on failure.
fn expand_reference(reference: &str) -> Result<String, String> {
    shellexpand::env_with_context(reference, |var| -> Result<Option<String>, String> {
        std::env::var(var).map(Some).map_err(|_| var.to_owned())
    })
    .map(Cow::into_owned)
    .map_err(|e| e.cause)
}

/// Expand a leading `~` and environment variables in a path argument.
///
/// Never fails: if a referenced variable is unset, only the tilde is
/// expanded and the rest of the path is kept literally.
///
/// # Examples
///
/// ```
/// use glint_config::expand_path;
///
/// assert_eq!(expand_path("notes/today.md"), "notes/today.md");
/// ```
pub fn expand_path(path: &str) -> String {
    match shellexpand::full(path) {
        Ok(expanded) => expanded.into_owned(),
        Err(_) => shellexpand::tilde(path).into_owned(),
    }
}
