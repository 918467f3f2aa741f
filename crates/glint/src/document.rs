//! Loading input documents and classifying them by extension.

use std::io::Read;
use std::path::{Path, PathBuf};

use glint_config::expand_path;

/// Extensions treated as markdown (compared case-insensitively).
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdown", "mkdn", "mkd", "markdown"];

/// Raw input document.
#[derive(Debug)]
pub(crate) struct Document {
    /// Source path, or `None` for stdin.
    pub path: Option<PathBuf>,
    /// Raw bytes.
    pub content: Vec<u8>,
}

impl Document {
    /// Read a document from `path`, or from stdin when `path` is `None` or `-`.
    ///
    /// `~` and environment variables in the path are expanded first.
    pub(crate) fn read(path: Option<&Path>) -> std::io::Result<Self> {
        match path {
            Some(path) if path != Path::new("-") => {
                let path = PathBuf::from(expand_path(&path.to_string_lossy()));
                tracing::debug!(path = %path.display(), "Reading document");
                let content = std::fs::read(&path)?;
                Ok(Self {
                    path: Some(path),
                    content,
                })
            }
            _ => {
                let mut content = Vec::new();
                std::io::stdin().lock().read_to_end(&mut content)?;
                Ok(Self {
                    path: None,
                    content,
                })
            }
        }
    }

    /// Whether this document should be preprocessed as markdown.
    ///
    /// Stdin is always markdown.
    pub(crate) fn is_markdown(&self) -> bool {
        self.path.as_deref().is_none_or(is_markdown_file)
    }

    /// File extension used as the code-block language.
    pub(crate) fn language(&self) -> &str {
        self.path
            .as_deref()
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
    }
}

/// Whether `path` looks like a markdown file.
///
/// Files without an extension are assumed to be markdown; any other
/// extension is treated as source code.
pub(crate) fn is_markdown_file(path: &Path) -> bool {
    let Some(ext) = path.extension() else {
        return true;
    };
    let ext = ext.to_string_lossy();
    MARKDOWN_EXTENSIONS
        .iter()
        .any(|md| ext.eq_ignore_ascii_case(md))
}

/// Wrap `code` in a fenced code block tagged with `language`.
pub(crate) fn wrap_code_block(code: &str, language: &str) -> String {
    format!("```{language}\n{code}```")
}
