//! `glint render` command implementation.

use clap::Args;
use glint_config::{CliSettings, Config};
use glint_frontmatter::remove_frontmatter;

use super::{SourceArgs, preprocessor_from_config};
use crate::document::{Document, wrap_code_block};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only strip frontmatter, leave placeholders untouched.
    #[arg(long)]
    no_preprocess: bool,

    /// Print non-markdown files as-is instead of wrapping them in a code block.
    #[arg(long)]
    no_wrap_code: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the document cannot be read.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            preprocess_enabled: self.no_preprocess.then_some(false),
            custom_date_fmt: self.source.custom_date_fmt.clone(),
            wrap_code: self.no_wrap_code.then_some(false),
        };
        let config = Config::load(self.source.config_path().as_deref(), Some(&cli_settings))?;
        let document = Document::read(self.source.file.as_deref())?;

        output.document(&render(&document, &config))?;
        Ok(())
    }
}

/// Produce the markdown handed to the terminal renderer.
///
/// Markdown documents are preprocessed (or only stripped when preprocessing
/// is disabled). Other files are wrapped in a fenced code block so they
/// render with syntax highlighting.
fn render(document: &Document, config: &Config) -> Vec<u8> {
    if !document.is_markdown() {
        if !config.output.wrap_code {
            return document.content.clone();
        }
        let code = String::from_utf8_lossy(&document.content);
        return wrap_code_block(&code, document.language()).into_bytes();
    }

    if config.preprocess.enabled {
        preprocessor_from_config(config).process(&document.content)
    } else {
        remove_frontmatter(&document.content).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn document(name: Option<&str>, content: &str) -> Document {
        Document {
            path: name.map(PathBuf::from),
            content: content.as_bytes().to_vec(),
        }
    }

    fn render_str(document: &Document, config: &Config) -> String {
        String::from_utf8(render(document, config)).unwrap()
    }

    #[test]
    fn test_render_markdown_substitutes() {
        let doc = document(Some("notes.md"), "---\ntitle: Hi\n---\n# {{title}}\n");
        assert_eq!(render_str(&doc, &Config::default()), "# Hi\n");
    }

    #[test]
    fn test_render_stdin_is_markdown() {
        let doc = document(None, "---\ntitle: Hi\n---\n# {{ title }}\n");
        assert_eq!(render_str(&doc, &Config::default()), "# Hi\n");
    }

    #[test]
    fn test_render_preprocess_disabled_only_strips() {
        let mut config = Config::default();
        config.preprocess.enabled = false;
        let doc = document(Some("notes.md"), "---\ntitle: Hi\n---\n# {{title}}\n");

        assert_eq!(render_str(&doc, &config), "# {{title}}\n");
    }

    #[test]
    fn test_render_code_file_is_wrapped() {
        let doc = document(Some("main.rs"), "// {{title}}\nfn main() {}\n");
        assert_eq!(
            render_str(&doc, &Config::default()),
            "```rs\n// {{title}}\nfn main() {}\n```"
        );
    }

    #[test]
    fn test_render_code_file_without_wrapping() {
        let mut config = Config::default();
        config.output.wrap_code = false;
        let doc = document(Some("main.rs"), "fn main() {}\n");

        assert_eq!(render_str(&doc, &config), "fn main() {}\n");
    }

    #[test]
    fn test_render_uses_config_defaults() {
        let mut config = Config::default();
        config
            .vars_resolved
            .insert("author".to_owned(), "Ann".to_owned());
        let doc = document(Some("notes.md"), "by {{author}}");

        assert_eq!(render_str(&doc, &config), "by Ann");
    }
}
