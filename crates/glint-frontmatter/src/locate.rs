//! Frontmatter boundary detection.
//!
//! A frontmatter block is a YAML document fenced by two `---` lines at the
//! very start of the input:
//!
//! ```text
//! ---
//! title: Hello
//! ---
//! # {{title}}
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use regex::bytes::Regex;

/// Regex matching a delimiter line plus any blank lines directly after it.
static DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---\r?\n(\s*\r?\n)?").unwrap());

/// Byte offsets of a frontmatter block inside a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrontmatterSpan {
    /// Whole block, delimiter lines included. Always starts at 0.
    pub block: Range<usize>,
    /// Metadata text strictly between the two delimiter lines.
    pub inner: Range<usize>,
}

impl FrontmatterSpan {
    /// Offset where the document body begins.
    #[must_use]
    pub fn body_start(&self) -> usize {
        self.block.end
    }

    /// Raw metadata bytes of `content` covered by this span.
    #[must_use]
    pub fn metadata<'a>(&self, content: &'a [u8]) -> &'a [u8] {
        &content[self.inner.clone()]
    }
}

/// Locate the frontmatter block at the start of `content`.
///
/// Returns `None` unless there are at least two delimiter lines and the
/// first one sits at offset 0. A block preceded by anything, even blank
/// lines, is not frontmatter.
///
/// # Examples
///
/// ```
/// use glint_frontmatter::locate_frontmatter;
///
/// let doc = b"---\ntitle: Hi\n---\nbody";
/// let span = locate_frontmatter(doc).unwrap();
/// assert_eq!(&doc[span.body_start()..], b"body");
/// assert!(locate_frontmatter(b"\n---\na: 1\n---\n").is_none());
/// ```
pub fn locate_frontmatter(content: &[u8]) -> Option<FrontmatterSpan> {
    let mut matches = DELIMITER_RE.find_iter(content);
    let open = matches.next()?;
    let close = matches.next()?;

    if open.start() != 0 {
        return None;
    }

    Some(FrontmatterSpan {
        block: open.start()..close.end(),
        inner: open.end()..close.start(),
    })
}
