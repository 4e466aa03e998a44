//! Rendered answer history
//!
//! Wizard states embed a [`ResponseLog`] so the questions answered so far can
//! be shown above the active screen and printed after the session. Because it
//! lives inside the state, it is cloned into every page snapshot and stepping
//! back restores it automatically.

use crate::tui::components::truncate_to_width;
use crate::tui::theme::theme;
use ratatui::text::{Line, Span};

/// Widest answer shown in the history, in terminal columns
pub const MAX_ANSWER_WIDTH: usize = 40;

/// One line of history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A question and the answer the user gave
    Answer { question: String, answer: String },
    /// A status line produced by background work
    Note(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseLog {
    entries: Vec<Response>,
}

impl ResponseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.entries.push(Response::Answer {
            question: question.into(),
            answer: answer.into(),
        });
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.entries.push(Response::Note(text.into()));
    }

    /// Drop up to `n` of the most recent entries
    pub fn pop_last(&mut self, n: usize) {
        let keep = self.entries.len().saturating_sub(n);
        self.entries.truncate(keep);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Response] {
        &self.entries
    }

    /// Styled lines for the top of a screen body
    pub fn lines(&self) -> Vec<Line<'static>> {
        self.entries
            .iter()
            .map(|entry| match entry {
                Response::Answer { question, answer } => Line::from(vec![
                    Span::styled("✔ ", theme().success()),
                    Span::styled(format!("{question}: "), theme().hint()),
                    Span::styled(truncate_to_width(answer, MAX_ANSWER_WIDTH), theme().normal()),
                ]),
                Response::Note(text) => Line::from(vec![
                    Span::styled("• ", theme().success()),
                    Span::styled(text.clone(), theme().hint()),
                ]),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_last() {
        let mut log = ResponseLog::new();
        log.push("Network", "Testnet");
        log.push("Version", "v1.2.0");
        log.note("Downloading v1.2.0");
        log.pop_last(2);
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.entries()[0],
            Response::Answer {
                question: "Network".into(),
                answer: "Testnet".into()
            }
        );
    }

    #[test]
    fn test_pop_more_than_present() {
        let mut log = ResponseLog::new();
        log.note("only");
        log.pop_last(5);
        assert!(log.is_empty());
    }

    #[test]
    fn test_long_answers_are_shortened() {
        let mut log = ResponseLog::new();
        let moniker = "m".repeat(MAX_ANSWER_WIDTH + 20);
        log.push("Moniker", moniker.clone());

        let shown: String = log.lines()[0]
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(shown.ends_with("..."));
        assert!(!shown.contains(&moniker));
        // The stored answer keeps its full value
        assert_eq!(
            log.entries()[0],
            Response::Answer {
                question: "Moniker".into(),
                answer: moniker
            }
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut log = ResponseLog::new();
        log.push("Network", "Local");
        let snapshot = log.clone();
        log.push("Chain ID", "x");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.lines().len(), 2);
    }
}
