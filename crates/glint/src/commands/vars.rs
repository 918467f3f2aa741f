//! `glint vars` command implementation.

use clap::Args;
use glint_config::{CliSettings, Config};

use super::{SourceArgs, preprocessor_from_config};
use crate::document::Document;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the vars command.
#[derive(Args)]
pub(crate) struct VarsArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl VarsArgs {
    /// Execute the vars command.
    ///
    /// Prints every variable a placeholder in the document could resolve to,
    /// sorted by key.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the document cannot be read.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            custom_date_fmt: self.source.custom_date_fmt.clone(),
            ..Default::default()
        };
        let config = Config::load(self.source.config_path().as_deref(), Some(&cli_settings))?;
        let document = Document::read(self.source.file.as_deref())?;

        let vars = preprocessor_from_config(&config).variables(&document.content);
        for (key, value) in vars.into_sorted() {
            output.variable(&key, &value)?;
        }
        Ok(())
    }
}
