//! Terminal renderer for the `tailor` CLI.

use std::cell::RefCell;
use std::io::{self, Write};

use tracing::warn;

use crate::models::form::ResumeMode;
use crate::render::{Link, ResultRenderer, ResultView};
use crate::service::Endpoints;

pub struct TerminalRenderer {
    out: RefCell<Box<dyn Write>>,
    err: RefCell<Box<dyn Write>>,
    endpoints: Endpoints,
}

impl TerminalRenderer {
    pub fn stdio(endpoints: Endpoints) -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()), endpoints)
    }

    pub fn new(out: Box<dyn Write>, err: Box<dyn Write>, endpoints: Endpoints) -> Self {
        Self {
            out: RefCell::new(out),
            err: RefCell::new(err),
            endpoints,
        }
    }

    /// Server-relative links become absolute so they can be opened directly.
    fn href(&self, link: &Link) -> String {
        self.endpoints
            .resolve(&link.href)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| link.href.clone())
    }

    fn write_to(target: &RefCell<Box<dyn Write>>, text: &str) {
        let mut target = target.borrow_mut();
        if let Err(e) = target.write_all(text.as_bytes()).and_then(|_| target.flush()) {
            warn!("Failed to write to terminal: {e}");
        }
    }
}

/// Text block shown for the result region.
pub fn format_view(view: &ResultView, href: impl Fn(&Link) -> String) -> String {
    let mut text = String::new();
    text.push_str(&format!("Score: {}\n", view.score));
    text.push_str(&format!("Summary: {}\n", view.summary));
    text.push_str(&format!("Version: {}\n", view.version));
    text.push_str(&format!("Resume source: {}\n", view.resume_source));
    text.push_str(&format!("{}: {}\n", view.download.label, href(&view.download)));
    text.push_str("All versions:\n");
    for link in &view.versions {
        text.push_str(&format!("  - {}: {}\n", link.label, href(link)));
    }
    text.push_str("\n--- New resume ---\n");
    text.push_str(&view.new_resume_text);
    text.push_str("\n\n--- Diff ---\n");
    text.push_str(&view.diff_html);
    text.push('\n');
    text
}

impl ResultRenderer for TerminalRenderer {
    fn show_mode(&self, mode: ResumeMode) {
        let block = match mode {
            ResumeMode::Paste => "pasted resume text",
            ResumeMode::Upload => "uploaded resume file",
        };
        Self::write_to(&self.out, &format!("Resume input: {block}\n"));
    }

    fn set_loading(&self, loading: bool, message: &str) {
        if loading {
            Self::write_to(&self.out, &format!("{message}\n"));
        }
    }

    fn show_result(&self, view: &ResultView) {
        Self::write_to(&self.out, &format_view(view, |link| self.href(link)));
    }

    fn alert(&self, message: &str) {
        Self::write_to(&self.err, &format!("error: {message}\n"));
    }
}
