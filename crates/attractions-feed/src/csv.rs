//! Line scanner for the feed's comma-delimited records.
//!
//! A two-state machine: every `"` flips between [`ScanState::Unquoted`] and
//! [`ScanState::Quoted`] and is dropped from the output; a `,` ends the
//! current field only while unquoted. There is no escape character, so a
//! backslash before a quote is ordinary content and the quote still toggles.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Unquoted,
    Quoted,
}

impl ScanState {
    fn toggled(self) -> Self {
        match self {
            ScanState::Unquoted => ScanState::Quoted,
            ScanState::Quoted => ScanState::Unquoted,
        }
    }
}

/// Splits one line into cleaned field values.
///
/// The final field is flushed at end of line, so a line always yields at
/// least one field (an empty line yields a single empty field).
#[must_use]
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Unquoted;

    for ch in line.chars() {
        match (state, ch) {
            (_, '"') => state = state.toggled(),
            (ScanState::Unquoted, ',') => {
                fields.push(clean_field(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(clean_field(&current));

    fields
}

/// Trims whitespace and strips one layer of surrounding double quotes.
#[must_use]
pub fn clean_field(raw: &str) -> String {
    strip_outer_quotes(raw.trim()).to_string()
}

/// Removes at most one leading and one trailing `"`. Idempotent on scanner
/// output, which never contains quotes.
#[must_use]
pub fn strip_outer_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Splits feed text into trimmed lines. Leading and trailing blank lines are
/// dropped; blank lines in the body are kept so they can be reported.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.trim().split('\n').map(str::trim)
}
