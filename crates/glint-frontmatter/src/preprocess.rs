//! Document preprocessing: strip frontmatter and substitute variables.

use crate::builtins::{BuiltinContext, CUSTOM_DATE_FMT};
use crate::flatten::extract_variables;
use crate::locate::locate_frontmatter;
use crate::variables::Variables;

/// Remove the frontmatter block from the start of `content`.
///
/// Documents without frontmatter are returned unchanged.
///
/// # Examples
///
/// ```
/// use glint_frontmatter::remove_frontmatter;
///
/// assert_eq!(remove_frontmatter(b"---\na: 1\n---\nbody"), b"body");
/// assert_eq!(remove_frontmatter(b"no metadata"), b"no metadata");
/// ```
pub fn remove_frontmatter(content: &[u8]) -> &[u8] {
    match locate_frontmatter(content) {
        Some(span) => &content[span.body_start()..],
        None => content,
    }
}

/// Strip frontmatter and substitute all variables using the current time
/// and working directory.
///
/// Shorthand for `Preprocessor::new().process(content)`.
pub fn preprocess_dynamic_text(content: &[u8]) -> Vec<u8> {
    Preprocessor::new().process(content)
}

/// Configurable document preprocessor.
///
/// Variables are resolved in three layers, later layers overwriting earlier
/// ones:
///
/// 1. Defaults supplied with [`with_defaults`](Self::with_defaults)
/// 2. Variables declared in the document's frontmatter
/// 3. Built-in variables (dates, times, working directory)
///
/// # Example
///
/// ```
/// use glint_frontmatter::{Preprocessor, Variables};
///
/// let mut defaults = Variables::new();
/// defaults.insert("author", "Ann");
///
/// let out = Preprocessor::new()
///     .with_defaults(defaults)
///     .process(b"---\ntitle: Notes\n---\n# {{title}} by {{author}}");
///
/// assert_eq!(out, b"# Notes by Ann");
/// ```
#[derive(Debug, Default)]
pub struct Preprocessor {
    defaults: Variables,
    context: Option<BuiltinContext>,
}

impl Preprocessor {
    /// Create a preprocessor with no defaults that captures the clock and
    /// working directory on each call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set default variables that frontmatter may override.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Variables) -> Self {
        self.defaults = defaults;
        self
    }

    /// Use a fixed clock and working directory instead of capturing them.
    #[must_use]
    pub fn with_context(mut self, context: BuiltinContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Resolve the final variable table for `content`.
    #[must_use]
    pub fn variables(&self, content: &[u8]) -> Variables {
        let (user, _) = extract_variables(content);
        self.resolve(user)
    }

    /// Strip frontmatter from `content` and substitute every known
    /// placeholder in the remaining body.
    #[must_use]
    pub fn process(&self, content: &[u8]) -> Vec<u8> {
        let (user, span) = extract_variables(content);
        let body = match &span {
            Some(span) => &content[span.body_start()..],
            None => content,
        };

        let vars = self.resolve(user);
        tracing::debug!(
            variables = vars.len(),
            frontmatter = span.is_some(),
            "Substituting placeholders"
        );
        vars.apply(body)
    }

    fn resolve(&self, user: Variables) -> Variables {
        let mut vars = self.defaults.clone();
        vars.overlay(user);

        let builtins = match &self.context {
            Some(context) => context.variables(vars.get(CUSTOM_DATE_FMT)),
            None => BuiltinContext::capture().variables(vars.get(CUSTOM_DATE_FMT)),
        };
        vars.overlay(builtins);
        vars
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{FixedOffset, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    // Preprocessor is shared across threads by callers.
    static_assertions::assert_impl_all!(super::Preprocessor: Send, Sync);

    fn fixed_context() -> BuiltinContext {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .unwrap();
        BuiltinContext::new(now, Some(PathBuf::from("/work/site")))
    }

    fn process(content: &str) -> String {
        let out = Preprocessor::new()
            .with_context(fixed_context())
            .process(content.as_bytes());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_remove_frontmatter() {
        assert_eq!(
            remove_frontmatter(b"---\ntitle: Hello\n---\n# Body\n"),
            b"# Body\n"
        );
    }

    #[test]
    fn test_remove_frontmatter_without_block_is_identity() {
        let docs: [&[u8]; 4] = [
            b"# Title\n",
            b"",
            b"---\nonly one delimiter\n",
            b"\n---\na: 1\n---\nbody",
        ];
        for doc in docs {
            assert_eq!(remove_frontmatter(doc), doc);
        }
    }

    #[test]
    fn test_remove_frontmatter_is_idempotent() {
        let doc = b"---\ntitle: Hello\n---\n# Body\n\ntext\n";
        let once = remove_frontmatter(doc);
        assert_eq!(remove_frontmatter(once), once);
    }

    #[test]
    fn test_stripped_body_has_no_delimiters() {
        let doc = b"---\ntitle: Hello\n---\n# Body\n";
        let body = remove_frontmatter(doc);
        assert!(!body.windows(3).any(|w| w == b"---"));
    }

    #[test]
    fn test_remove_frontmatter_keeps_invalid_yaml_block_out() {
        assert_eq!(remove_frontmatter(b"---\n: : :\n---\nbody"), b"body");
    }

    #[test]
    fn test_process_title() {
        assert_eq!(process("---\ntitle: Hello\n---\n# {{title}}"), "# Hello");
    }

    #[test]
    fn test_process_nested_and_list_variables() {
        let doc = "---\nsite:\n  name: Docs\ntags:\n  - a\n  - b\n---\n{{site.name}}: {{ tags }}";
        assert_eq!(process(doc), "Docs: a, b");
    }

    #[test]
    fn test_process_unknown_placeholder_left_verbatim() {
        assert_eq!(process("---\na: 1\n---\n{{a}} {{nope}}"), "1 {{nope}}");
    }

    #[test]
    fn test_process_without_frontmatter_substitutes_builtins() {
        assert_eq!(process("Today is {{date}}"), "Today is 2024-03-05");
    }

    #[test]
    fn test_process_block_not_at_start_is_body() {
        let doc = "\n---\ntitle: Hello\n---\n{{title}}";
        assert_eq!(process(doc), doc);
    }

    #[test]
    fn test_builtins_override_frontmatter() {
        let doc = "---\ndate: yesterday\npwd: /elsewhere\n---\n{{date}} {{pwd}}";
        assert_eq!(process(doc), "2024-03-05 /work/site");
    }

    #[test]
    fn test_custom_date_format_from_frontmatter() {
        let doc = "---\ncustom_date_fmt: \"%Y/%m/%d\"\n---\n{{custom_date}}";
        assert_eq!(process(doc), "2024/03/05");
    }

    #[test]
    fn test_defaults_are_overridden_by_frontmatter() {
        let mut defaults = Variables::new();
        defaults.insert("author", "Default");
        defaults.insert("lang", "en");

        let out = Preprocessor::new()
            .with_defaults(defaults)
            .with_context(fixed_context())
            .process(b"---\nauthor: Ann\n---\n{{author}} {{lang}}");

        assert_eq!(out, b"Ann en");
    }

    #[test]
    fn test_default_custom_date_format() {
        let mut defaults = Variables::new();
        defaults.insert(CUSTOM_DATE_FMT, "%m.%d");

        let out = Preprocessor::new()
            .with_defaults(defaults)
            .with_context(fixed_context())
            .process(b"{{custom_date}}");

        assert_eq!(out, b"03.05");
    }

    #[test]
    fn test_invalid_yaml_still_strips_and_substitutes_builtins() {
        assert_eq!(
            process("---\ntitle: [oops\n---\n{{title}} {{time}}"),
            "{{title}} 14:07"
        );
    }

    #[test]
    fn test_variables_resolves_all_layers() {
        let vars = Preprocessor::new()
            .with_context(fixed_context())
            .variables(b"---\ntitle: Hello\ndate: stale\n---\nbody");

        assert_eq!(vars.get("title"), Some("Hello"));
        assert_eq!(vars.get("date"), Some("2024-03-05"));
        assert_eq!(vars.get("cwd_short"), Some("site"));
    }

    #[test]
    fn test_preprocess_dynamic_text_uses_live_context() {
        let out = preprocess_dynamic_text(b"---\ntitle: Hello\n---\n# {{title}} {{date}}");
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("# Hello "));
        assert!(!out.contains("{{date}}"));
    }
}
