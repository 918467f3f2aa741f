//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod strip;
pub(crate) mod vars;

use std::path::PathBuf;

use clap::Args;
use glint_config::{Config, expand_path};
use glint_frontmatter::{CUSTOM_DATE_FMT, Preprocessor, Variables};

pub(crate) use render::RenderArgs;
pub(crate) use strip::StripArgs;
pub(crate) use vars::VarsArgs;

/// Arguments shared by commands that resolve variables.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Document to read (default: stdin, also `-`).
    pub file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover glint.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Layout for the `custom_date` variable (overrides config).
    #[arg(long, env = "GLINT_CUSTOM_DATE_FMT")]
    pub custom_date_fmt: Option<String>,
}

impl SourceArgs {
    /// Config path with `~` and environment variables expanded.
    pub(crate) fn config_path(&self) -> Option<PathBuf> {
        self.config
            .as_deref()
            .map(|path| PathBuf::from(expand_path(&path.to_string_lossy())))
    }
}

/// Build a preprocessor whose defaults come from the `[vars]` table and
/// `preprocess.custom_date_fmt`.
pub(crate) fn preprocessor_from_config(config: &Config) -> Preprocessor {
    let mut defaults: Variables = config
        .vars_resolved
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if let Some(fmt) = &config.preprocess.custom_date_fmt {
        defaults.insert(CUSTOM_DATE_FMT, fmt.as_str());
    }
    Preprocessor::new().with_defaults(defaults)
}
