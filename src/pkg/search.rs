//! Search results with best-effort match highlighting.

use std::sync::Once;

use colored::Colorize;
use regex::{Regex, RegexBuilder};

static HIGHLIGHT_WARNING: Once = Once::new();

/// Captured output of one search invocation.
///
/// The raw output is held in a single buffer; lines are produced lazily
/// and iteration can be restarted as often as needed.
pub struct SearchResults {
    query: String,
    raw: String,
}

impl SearchResults {
    pub(crate) fn new(query: &str, raw: String) -> Self {
        Self {
            query: query.to_string(),
            raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Iterate over the match lines with occurrences of the query
    /// highlighted.
    ///
    /// Highlighting is best effort: when colored output is unavailable
    /// (no terminal, NO_COLOR) the raw lines pass through unchanged,
    /// with a single warning.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let matcher = self.matcher();
        self.raw.lines().map(move |line| match &matcher {
            Some(pattern) => pattern
                .replace_all(line, |caps: &regex::Captures| {
                    caps[0].red().bold().to_string()
                })
                .into_owned(),
            None => line.to_string(),
        })
    }

    fn matcher(&self) -> Option<Regex> {
        if self.query.is_empty() {
            return None;
        }
        if !colored::control::SHOULD_COLORIZE.should_colorize() {
            HIGHLIGHT_WARNING.call_once(|| {
                eprintln!("warning: colored output disabled, printing search results unhighlighted");
            });
            return None;
        }
        // The query is escaped to a literal, so the pattern always builds
        RegexBuilder::new(&regex::escape(&self.query))
            .case_insensitive(true)
            .build()
            .ok()
    }
}
