//! Single-select list

use crate::tui::event::TuiEvent;
use crate::tui::theme::theme;
use ratatui::text::{Line, Span};
use std::fmt::Display;

pub(crate) const CURSOR_SYMBOL: &str = "> ";
pub(crate) const BLANK_SYMBOL: &str = "  ";

/// Wrap-around cursor movement shared by the list widgets
pub trait Selectable {
    /// Number of options
    fn count(&self) -> usize;
    /// Index under the cursor
    fn cursor(&self) -> usize;
    fn set_cursor(&mut self, index: usize);

    /// Move down, wrapping from last to first
    fn next(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }
        self.set_cursor((self.cursor() + 1) % count);
    }

    /// Move up, wrapping from first to last
    fn prev(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }
        let prev = if self.cursor() == 0 {
            count - 1
        } else {
            self.cursor() - 1
        };
        self.set_cursor(prev);
    }

    /// Jump to `index`, modulo the option count
    fn select(&mut self, index: usize) {
        let count = self.count();
        if count > 0 {
            self.set_cursor(index % count);
        }
    }
}

/// Ordered options with a cursor; Enter reports the option under it
#[derive(Debug, Clone)]
pub struct Selector<T> {
    options: Vec<T>,
    tooltips: Vec<Option<String>>,
    cursor: usize,
}

impl<T: Clone + Display> Selector<T> {
    pub fn new(options: Vec<T>) -> Self {
        let tooltips = vec![None; options.len()];
        Self {
            options,
            tooltips,
            cursor: 0,
        }
    }

    /// Per-option help text, in option order
    pub fn with_tooltips<I, H>(mut self, tooltips: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        for (slot, tip) in self.tooltips.iter_mut().zip(tooltips) {
            *slot = Some(tip.into());
        }
        self
    }

    /// Start with the cursor on `index`
    pub fn with_cursor(mut self, index: usize) -> Self {
        self.select(index);
        self
    }

    /// Handle one event; `Some` once an option is confirmed
    pub fn update(&mut self, event: &TuiEvent) -> Option<T> {
        match event {
            TuiEvent::Down | TuiEvent::Tab | TuiEvent::Char('j') => self.next(),
            TuiEvent::Up | TuiEvent::Char('k') => self.prev(),
            TuiEvent::Enter => return self.current().cloned(),
            _ => {}
        }
        None
    }

    pub fn current(&self) -> Option<&T> {
        self.options.get(self.cursor)
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Help text for the option under the cursor
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltips.get(self.cursor)?.as_deref()
    }

    pub fn view(&self) -> Vec<Line<'static>> {
        self.options
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                if idx == self.cursor {
                    Line::from(vec![
                        Span::styled(CURSOR_SYMBOL, theme().cursor()),
                        Span::styled(option.to_string(), theme().selected()),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw(BLANK_SYMBOL),
                        Span::styled(option.to_string(), theme().normal()),
                    ])
                }
            })
            .collect()
    }
}

impl<T> Selectable for Selector<T> {
    fn count(&self) -> usize {
        self.options.len()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::plain_text;
    use ratatui::text::Text;

    fn networks() -> Selector<&'static str> {
        Selector::new(vec!["Testnet", "Local", "Mainnet"])
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut sel = networks();
        sel.update(&TuiEvent::Up);
        assert_eq!(sel.cursor(), 2);
        sel.update(&TuiEvent::Down);
        assert_eq!(sel.cursor(), 0);
    }

    #[test]
    fn test_confirm_reports_current() {
        let mut sel = networks();
        assert_eq!(sel.update(&TuiEvent::Down), None);
        assert_eq!(sel.update(&TuiEvent::Enter), Some("Local"));
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let mut sel = networks();
        assert_eq!(sel.update(&TuiEvent::Char('x')), None);
        assert_eq!(sel.update(&TuiEvent::Tick), None);
        assert_eq!(sel.cursor(), 0);
    }

    #[test]
    fn test_empty_selector_never_confirms() {
        let mut sel: Selector<&str> = Selector::new(vec![]);
        sel.next();
        sel.prev();
        assert_eq!(sel.update(&TuiEvent::Enter), None);
    }

    #[test]
    fn test_tooltips_follow_cursor() {
        let mut sel = networks().with_tooltips(["public test network", "single local node"]);
        assert_eq!(sel.tooltip(), Some("public test network"));
        sel.next();
        assert_eq!(sel.tooltip(), Some("single local node"));
        sel.next();
        assert_eq!(sel.tooltip(), None);
    }

    #[test]
    fn test_view_marks_cursor() {
        let sel = networks().with_cursor(4);
        assert_eq!(sel.cursor(), 1);
        assert_eq!(
            plain_text(&Text::from(sel.view())),
            "  Testnet\n> Local\n  Mainnet"
        );
    }
}
