//! Plain-text list presentation for the terminal.

use std::io::Write;

use attractions_core::FilterState;
use attractions_site::{Card, FilterOptions, ListPresentation, NoticeRegion, ViewError};

const NAME_WIDTH: usize = 32;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Stages cards as table rows and writes them in [`TerminalList::finish`].
/// Terminal output cannot be taken back, so nothing reaches `out` until the
/// last repaint has been committed.
pub(crate) struct TerminalList<W: Write> {
    out: W,
    rows: Vec<String>,
    empty: Option<String>,
    checkpoint: Option<(Vec<String>, Option<String>)>,
}

impl<W: Write> TerminalList<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            rows: Vec::new(),
            empty: None,
            checkpoint: None,
        }
    }

    /// Writes the table (or the "no matches" message) and the footer line.
    pub(crate) fn finish(&mut self, filter: &FilterState, total: usize) -> std::io::Result<()> {
        if let Some(message) = &self.empty {
            writeln!(self.out, "{message}")?;
        } else if !self.rows.is_empty() {
            writeln!(
                self.out,
                "{:<5}{:<34}{:<30}CATEGORIES",
                "#", "NAME", "LOCATION"
            )?;
            for row in &self.rows {
                writeln!(self.out, "{row}")?;
            }
        }
        writeln!(
            self.out,
            "\n{} of {total} attractions (category: {}, state: {})",
            self.rows.len(),
            filter.category,
            filter.state
        )
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ListPresentation for TerminalList<W> {
    fn begin_render(&mut self) {
        self.checkpoint = Some((self.rows.clone(), self.empty.clone()));
    }

    fn commit_render(&mut self) {
        self.checkpoint = None;
    }

    fn rollback_render(&mut self) {
        if let Some((rows, empty)) = self.checkpoint.take() {
            self.rows = rows;
            self.empty = empty;
        }
    }

    fn set_filter_options(&mut self, _options: &FilterOptions) -> Result<(), ViewError> {
        Ok(())
    }

    fn select_filters(&mut self, _filter: &FilterState) -> Result<(), ViewError> {
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ViewError> {
        self.rows.clear();
        self.empty = None;
        Ok(())
    }

    fn show_empty(&mut self, message: &str) -> Result<(), ViewError> {
        self.empty = Some(message.to_string());
        Ok(())
    }

    fn append_card(&mut self, card: &Card) -> Result<(), ViewError> {
        self.rows.push(format!(
            "{:<5}{:<34}{:<30}{}",
            card.index,
            truncate(&card.name, NAME_WIDTH),
            truncate(&card.location, 28),
            card.categories
        ));
        Ok(())
    }

    fn show_notice(&mut self, region: NoticeRegion, message: &str) {
        if let Err(err) = writeln!(self.out, "error: {message}") {
            tracing::warn!(?region, error = %err, "failed to write notice");
        }
    }

    fn hide_notice(&mut self, _region: NoticeRegion) {}
}
