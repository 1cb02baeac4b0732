//! Conversion between styled text runs and the stored markup body.
//!
//! # Responsibility
//! - Encode ordered bold/italic runs into the `<b>`/`<i>` markup string kept
//!   in `Note::body`.
//! - Decode stored markup back into displayable styled text.
//! - Insert and read the literal `○ ` checklist bullets.
//!
//! # Invariants
//! - `decode(&encode(runs))` preserves the plain text of `runs`.
//! - A run that is both bold and italic encodes as `<i><b>..</b></i>`.
//! - Decoding never raises; malformed input yields `None`.

mod checklist;
mod decoder;
mod encoder;

pub use checklist::{append_checklist_item, checklist_items, CHECKLIST_MARKER};
pub use decoder::{decode, decode_bytes, try_decode, DecodeError};
pub use encoder::encode;

use serde::{Deserialize, Serialize};

/// One contiguous span of text sharing a single style.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false, false)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, true, false)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, false, true)
    }

    fn same_style(&self, other: &StyledRun) -> bool {
        self.bold == other.bold && self.italic == other.italic
    }
}

/// Displayable styled text: runs in order, adjacent equal styles merged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyledText {
    runs: Vec<StyledRun>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds normalized text from arbitrary runs.
    pub fn from_runs(runs: impl IntoIterator<Item = StyledRun>) -> Self {
        let mut text = Self::new();
        for run in runs {
            text.push(run);
        }
        text
    }

    /// Appends a run, dropping empty text and merging with the previous run
    /// when the style matches.
    pub fn push(&mut self, run: StyledRun) {
        if run.text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.same_style(&run) => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }

    /// Appends a checklist bullet as plain text, on a new line when the text
    /// already has content.
    pub fn append_checklist_item(&mut self) {
        let marker = if self.is_empty() {
            CHECKLIST_MARKER.to_string()
        } else {
            format!("\n{CHECKLIST_MARKER}")
        };
        self.push(StyledRun::plain(marker));
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    pub fn into_runs(self) -> Vec<StyledRun> {
        self.runs
    }

    /// Text content with all styling dropped.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Text of every checklist line.
    pub fn checklist_items(&self) -> Vec<String> {
        checklist_items(&self.plain_text())
    }

    /// Encodes back into stored markup.
    pub fn to_markup(&self) -> String {
        encode(&self.runs)
    }
}

#[cfg(test)]
mod tests {
    use super::{StyledRun, StyledText};

    #[test]
    fn push_merges_adjacent_runs_with_same_style() {
        let text = StyledText::from_runs([
            StyledRun::plain("a"),
            StyledRun::plain("b"),
            StyledRun::bold("c"),
            StyledRun::plain(""),
            StyledRun::bold("d"),
        ]);
        assert_eq!(
            text.runs(),
            &[StyledRun::plain("ab"), StyledRun::bold("cd")]
        );
        assert_eq!(text.plain_text(), "abcd");
    }

    #[test]
    fn append_checklist_item_on_empty_text_has_no_newline() {
        let mut text = StyledText::new();
        text.append_checklist_item();
        assert_eq!(text.plain_text(), "○ ");

        text.push(StyledRun::plain("milk"));
        text.append_checklist_item();
        assert_eq!(text.plain_text(), "○ milk\n○ ");
        assert_eq!(text.checklist_items(), vec!["milk".to_string(), String::new()]);
    }
}
