//! Terminal output for the `docview` commands.
//!
//! Status lines go to stderr; page content and search hits go to stdout so
//! they can be piped.

use console::{Style, Term};

/// Width of the rule printed between page sections.
const RULE_WIDTH: usize = 70;

pub(crate) struct Output {
    status: Term,
    data: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            data: Term::stdout(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status_line(&Style::new(), msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status_line(&Style::new().green(), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.status_line(&Style::new().yellow(), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status_line(&Style::new().red(), msg);
    }

    /// Route heading for a rendered page.
    pub(crate) fn highlight(&self, msg: &str) {
        self.status_line(&Style::new().cyan().bold(), msg);
    }

    pub(crate) fn detail(&self, msg: &str) {
        self.status_line(&Style::new().dim(), msg);
    }

    /// Pipeable output: page content or search hits.
    pub(crate) fn data(&self, msg: &str) {
        // Broken pipes are not worth reporting.
        let _ = self.data.write_line(msg);
    }

    pub(crate) fn separator(&self) {
        self.status_line(&Style::new().dim(), &"=".repeat(RULE_WIDTH));
    }

    fn status_line(&self, style: &Style, msg: &str) {
        let _ = self.status.write_line(&style.apply_to(msg).to_string());
    }
}
