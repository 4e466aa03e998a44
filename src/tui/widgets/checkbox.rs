//! Multi-select checkbox list

use super::selection::{BLANK_SYMBOL, CURSOR_SYMBOL, Selectable};
use crate::tui::event::TuiEvent;
use crate::tui::theme::theme;
use ratatui::text::{Line, Span};
use std::fmt::Display;

/// Options with a cursor and an independent checked flag per option
#[derive(Debug, Clone)]
pub struct CheckBox<T> {
    options: Vec<T>,
    checked: Vec<bool>,
    cursor: usize,
}

impl<T: Clone + Display + PartialEq> CheckBox<T> {
    /// All options start unchecked
    pub fn new(options: Vec<T>) -> Self {
        let checked = vec![false; options.len()];
        Self {
            options,
            checked,
            cursor: 0,
        }
    }

    /// Pre-check the given options
    pub fn with_selected(mut self, selected: &[T]) -> Self {
        for (option, checked) in self.options.iter().zip(self.checked.iter_mut()) {
            *checked = selected.contains(option);
        }
        self
    }

    /// Handle one event; Enter yields the checked options, possibly none
    pub fn update(&mut self, event: &TuiEvent) -> Option<Vec<T>> {
        match event {
            TuiEvent::Down | TuiEvent::Tab | TuiEvent::Char('j') => self.next(),
            TuiEvent::Up | TuiEvent::Char('k') => self.prev(),
            TuiEvent::Char(' ') => self.toggle(),
            TuiEvent::Char('a') => self.toggle_all(),
            TuiEvent::Enter => return Some(self.selected()),
            _ => {}
        }
        None
    }

    /// Flip the option under the cursor
    pub fn toggle(&mut self) {
        if let Some(checked) = self.checked.get_mut(self.cursor) {
            *checked = !*checked;
        }
    }

    /// Check everything, or uncheck everything if all are already checked
    pub fn toggle_all(&mut self) {
        let target = !self.checked.iter().all(|c| *c);
        self.checked.iter_mut().for_each(|c| *c = target);
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Checked options in list order
    pub fn selected(&self) -> Vec<T> {
        self.options
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(option, _)| option.clone())
            .collect()
    }

    pub fn view(&self) -> Vec<Line<'static>> {
        self.options
            .iter()
            .zip(&self.checked)
            .enumerate()
            .map(|(idx, (option, checked))| {
                let mark = if *checked { "[x] " } else { "[ ] " };
                let (symbol, style) = if idx == self.cursor {
                    (CURSOR_SYMBOL, theme().selected())
                } else {
                    (BLANK_SYMBOL, theme().normal())
                };
                Line::from(vec![
                    Span::styled(symbol, theme().cursor()),
                    Span::styled(format!("{mark}{option}"), style),
                ])
            })
            .collect()
    }
}

impl<T> Selectable for CheckBox<T> {
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

    fn abc() -> CheckBox<&'static str> {
        CheckBox::new(vec!["A", "B", "C"])
    }

    #[test]
    fn test_confirm_with_nothing_checked() {
        let mut boxes = abc();
        assert_eq!(boxes.update(&TuiEvent::Enter), Some(vec![]));
    }

    #[test]
    fn test_double_toggle_restores() {
        let mut boxes = abc();
        boxes.update(&TuiEvent::Down);
        boxes.update(&TuiEvent::Char(' '));
        assert!(boxes.is_checked(1));
        boxes.update(&TuiEvent::Char(' '));
        assert!(!boxes.is_checked(1));
        assert!(!boxes.is_checked(0));
    }

    #[test]
    fn test_toggle_only_touches_cursor() {
        let mut boxes = abc();
        boxes.update(&TuiEvent::Up);
        boxes.update(&TuiEvent::Char(' '));
        assert_eq!(boxes.update(&TuiEvent::Enter), Some(vec!["C"]));
    }

    #[test]
    fn test_toggle_all() {
        let mut boxes = abc().with_selected(&["B"]);
        boxes.update(&TuiEvent::Char('a'));
        assert_eq!(boxes.selected(), vec!["A", "B", "C"]);
        boxes.update(&TuiEvent::Char('a'));
        assert!(boxes.selected().is_empty());
    }

    #[test]
    fn test_view() {
        let mut boxes = abc().with_selected(&["C"]);
        boxes.next();
        assert_eq!(
            plain_text(&Text::from(boxes.view())),
            "  [ ] A\n> [ ] B\n  [x] C"
        );
    }
}
