//! Frontmatter extraction and placeholder substitution for glint.
//!
//! Markdown documents may begin with a YAML metadata block. This crate
//! locates that block, flattens it into a table of dotted variable paths,
//! adds built-in variables (dates, times, working directory) and substitutes
//! `{{ key }}` placeholders in the remaining body.
//!
//! Nothing here fails: missing or malformed metadata simply contributes no
//! variables, and placeholders without a matching variable are left as-is.
//!
//! # Example
//!
//! ```
//! use glint_frontmatter::{preprocess_dynamic_text, remove_frontmatter};
//!
//! let doc = b"---\ntitle: Release notes\ntags: [cli, docs]\n---\n# {{title}}\n\n{{tags}}\n";
//!
//! assert_eq!(
//!     preprocess_dynamic_text(doc),
//!     b"# Release notes\n\ncli, docs\n"
//! );
//! assert_eq!(
//!     remove_frontmatter(doc),
//!     b"# {{title}}\n\n{{tags}}\n"
//! );
//! ```

mod builtins;
mod flatten;
mod locate;
mod preprocess;
mod stringify;
mod variables;

pub use builtins::{BuiltinContext, CUSTOM_DATE_FMT};
pub use flatten::{extract_variables, flatten};
pub use locate::{FrontmatterSpan, locate_frontmatter};
pub use preprocess::{Preprocessor, preprocess_dynamic_text, remove_frontmatter};
pub use stringify::stringify;
pub use variables::Variables;
