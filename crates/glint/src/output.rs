//! Terminal output utilities.

use std::io::{self, Write};

use console::{Style, Term};

/// Terminal output formatter.
///
/// Documents and variable listings go to stdout; diagnostics go to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    red: Style,
    cyan: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            red: Style::new().red(),
            cyan: Style::new().cyan(),
        }
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Write a processed document to stdout unchanged.
    pub(crate) fn document(&self, content: &[u8]) -> io::Result<()> {
        let mut out = &self.out;
        out.write_all(content)?;
        out.flush()
    }

    /// Write one `key = value` line to stdout, key highlighted (cyan) on a terminal.
    pub(crate) fn variable(&self, key: &str, value: &str) -> io::Result<()> {
        let key = if self.out.is_term() {
            self.cyan.apply_to(key).to_string()
        } else {
            key.to_owned()
        };
        self.out.write_line(&format!("{key} = {value}"))
    }
}
