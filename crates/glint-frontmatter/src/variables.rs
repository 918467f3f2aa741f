//! Variable table and single-pass placeholder substitution.

use std::collections::{BTreeMap, HashMap};

/// Opening placeholder delimiter.
const OPEN: &[u8] = b"{{";
/// Closing placeholder delimiter.
const CLOSE: &[u8] = b"}}";

/// Flat mapping from dotted key paths to substitution values.
///
/// Substitution scans the document once, looking up each `{{ key }}` token
/// in the table, instead of running one replacement per variable:
///
/// ```text
/// Per-key approach (N variables):
///   for (key, value) in vars:            # N iterations
///     doc = pattern(key).replace_all(doc) # O(len) per key
///   Total: O(N × len), values rescanned by later keys
///
/// Single pass:
///   for token in placeholders(doc):      # one scan
///     out.push(vars[token.key])           # O(1) lookup
///   Total: O(len), values never rescanned
/// ```
///
/// # Example
///
/// ```
/// use glint_frontmatter::Variables;
///
/// let mut vars = Variables::new();
/// vars.insert("title", "Hello");
/// let out = vars.apply(b"# {{ title }} / {{missing}}");
///
/// assert_eq!(out, b"# Hello / {{missing}}");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variables {
    items: HashMap<String, String>,
}

impl Variables {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: HashMap::with_capacity(capacity),
        }
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    /// Look up the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Apply `other` on top of this table. Keys in `other` always win.
    pub fn overlay(&mut self, other: Variables) {
        self.items.extend(other.items);
    }

    /// Check if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Consume the table into a map ordered by key.
    #[must_use]
    pub fn into_sorted(self) -> BTreeMap<String, String> {
        self.items.into_iter().collect()
    }

    /// Replace every `{{ key }}` placeholder in `content` whose key is in the
    /// table.
    ///
    /// Whitespace around the key is ignored and the key is compared literally.
    /// Keys never contain `{{` or `}}`, so for a run of openers only the
    /// innermost one can match. Placeholders with unknown keys are copied
    /// through untouched. Inserted values are not scanned again.
    #[must_use]
    pub fn apply(&self, content: &[u8]) -> Vec<u8> {
        if self.items.is_empty() {
            return content.to_vec();
        }

        let mut out = Vec::with_capacity(content.len());
        let mut pos = 0;

        while let Some(open) = find(&content[pos..], OPEN).map(|i| pos + i) {
            let key_start = open + OPEN.len();
            let Some(close) = find(&content[key_start..], CLOSE).map(|i| key_start + i) else {
                break;
            };
            let end = close + CLOSE.len();

            // Every opener in `open..close` shares this `}}`.
            let mut start = open;
            loop {
                if let Some(value) = self.lookup(&content[start + OPEN.len()..close]) {
                    out.extend_from_slice(&content[pos..start]);
                    out.extend_from_slice(value.as_bytes());
                    break;
                }
                match next_candidate(content, start, close) {
                    Some(next) => start = next,
                    None => {
                        out.extend_from_slice(&content[pos..end]);
                        break;
                    }
                }
            }
            pos = end;
        }

        out.extend_from_slice(&content[pos..]);
        out
    }

    fn lookup(&self, raw_key: &[u8]) -> Option<&str> {
        let key = std::str::from_utf8(raw_key.trim_ascii()).ok()?;
        if key.contains("{{") {
            return None;
        }
        self.get(key)
    }
}

impl FromIterator<(String, String)> for Variables {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Position of the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Position of the last occurrence of `needle` in `haystack`.
fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}

/// Next opener after `start` whose key, up to `close`, holds no `{{`.
///
/// Only the last `{{` before `close`, or a `{{` overlapping it by one
/// brace, can qualify.
fn next_candidate(content: &[u8], start: usize, close: usize) -> Option<usize> {
    let last = rfind(&content[start + 1..close], OPEN).map(|i| start + 1 + i)?;
    if last - 1 > start && content[last - 1] == b'{' {
        Some(last - 1)
    } else {
        Some(last)
    }
}
