//! Validated text field

use crate::tui::event::TuiEvent;
use crate::tui::theme::theme;
use ratatui::text::{Line, Span};
use rust_i18n::t;
use thiserror::Error;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// A value rejected by a field's validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Validator run on every confirmed value, default included
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError>>;

/// Editable buffer with a byte cursor kept on char boundaries
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    buffer: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `value`, cursor at the end
    pub fn with_value(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace
    pub fn delete_before_cursor(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    /// Delete
    pub fn delete_after_cursor(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Cursor column in terminal cells
    pub fn visual_cursor_position(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Text before and after the cursor
    pub fn split(&self) -> (&str, &str) {
        self.buffer.split_at(self.cursor)
    }
}

/// What a key press did to the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    /// Still being edited (possibly with a fresh validation error)
    Editing,
    /// Confirmed and accepted by the validator
    Submitted(String),
}

/// Single-line text field with default, placeholder and validation
pub struct TextField {
    input: InputBuffer,
    default: Option<String>,
    placeholder: String,
    validator: Option<Validator>,
    error: Option<String>,
    masked: bool,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: InputBuffer::new(),
            default: None,
            placeholder: placeholder.into(),
            validator: None,
            error: None,
            masked: false,
        }
    }

    /// Value used when the field is confirmed empty; Tab copies it in
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        let default = default.into();
        self.default = (!default.is_empty()).then_some(default);
        self
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), ValidationError> + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Start with text already in the buffer
    pub fn with_value(mut self, value: &str) -> Self {
        self.input = InputBuffer::with_value(value);
        self
    }

    /// Start with an error already on display
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Render every character as `*`
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Handle one event
    pub fn update(&mut self, event: &TuiEvent) -> FieldStatus {
        match event {
            TuiEvent::Enter => return self.submit(),
            TuiEvent::Tab => {
                if let Some(default) = &self.default {
                    self.input = InputBuffer::with_value(default);
                    self.error = None;
                }
            }
            TuiEvent::Char(c) => {
                self.input.insert_char(*c);
                self.error = None;
            }
            TuiEvent::Backspace => {
                self.input.delete_before_cursor();
                self.error = None;
            }
            TuiEvent::Delete => {
                self.input.delete_after_cursor();
                self.error = None;
            }
            TuiEvent::Left => self.input.move_cursor_left(),
            TuiEvent::Right => self.input.move_cursor_right(),
            TuiEvent::Home => self.input.move_cursor_to_start(),
            TuiEvent::End => self.input.move_cursor_to_end(),
            _ => {}
        }
        FieldStatus::Editing
    }

    fn submit(&mut self) -> FieldStatus {
        let value = match &self.default {
            Some(default) if self.input.is_empty() => default.clone(),
            _ => self.input.value().to_string(),
        };

        if let Some(validator) = &self.validator
            && let Err(err) = validator(&value)
        {
            debug!(value = %value, error = %err, "Rejected field value");
            self.error = Some(err.to_string());
            return FieldStatus::Editing;
        }

        self.error = None;
        FieldStatus::Submitted(value)
    }

    /// Text currently in the buffer
    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the buffer and any error
    pub fn reset(&mut self) {
        self.input.clear();
        self.error = None;
    }

    /// Input line, followed by the error line when there is one
    pub fn view(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(2);

        if self.input.is_empty() {
            let placeholder = match &self.default {
                Some(default) => t!("field_default", value = default).into_owned(),
                None => self.placeholder.clone(),
            };
            lines.push(Line::from(vec![
                Span::styled("> [|", theme().cursor()),
                Span::styled(placeholder, theme().placeholder()),
                Span::styled("]", theme().cursor()),
            ]));
        } else {
            let (left, right) = self.input.split();
            let (left, right) = if self.masked {
                ("*".repeat(left.chars().count()), "*".repeat(right.chars().count()))
            } else {
                (left.to_string(), right.to_string())
            };
            lines.push(Line::from(vec![
                Span::styled("> ", theme().cursor()),
                Span::styled(format!("[{left}|{right}]"), theme().normal()),
            ]));
        }

        if let Some(error) = &self.error {
            lines.push(Line::styled(format!("✗ {error}"), theme().error()));
        }
        lines
    }
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("input", &self.input)
            .field("default", &self.default)
            .field("error", &self.error)
            .field("masked", &self.masked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::plain_text;
    use ratatui::text::Text;

    fn type_str(field: &mut TextField, text: &str) {
        for c in text.chars() {
            field.update(&TuiEvent::Char(c));
        }
    }

    fn not_empty(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new("value required"))
        } else {
            Ok(())
        }
    }

    #[test]
    fn test_buffer_editing_multibyte() {
        let mut input = InputBuffer::new();
        for c in "a节b".chars() {
            input.insert_char(c);
        }
        input.move_cursor_left();
        input.move_cursor_left();
        assert_eq!(input.split(), ("a", "节b"));
        assert_eq!(input.visual_cursor_position(), 1);

        input.delete_after_cursor();
        assert_eq!(input.value(), "ab");
        input.move_cursor_to_end();
        input.delete_before_cursor();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_empty_confirm_is_valid_without_validator() {
        let mut field = TextField::new("anything");
        assert_eq!(field.update(&TuiEvent::Enter), FieldStatus::Submitted(String::new()));
    }

    #[test]
    fn test_rejected_value_keeps_editing() {
        let mut field = TextField::new("chain id").with_validator(not_empty);
        type_str(&mut field, "  ");
        assert_eq!(field.update(&TuiEvent::Enter), FieldStatus::Editing);
        assert_eq!(field.error(), Some("value required"));
        assert_eq!(field.value(), "  ");

        field.update(&TuiEvent::Backspace);
        assert!(field.error().is_none());
    }

    #[test]
    fn test_default_is_validated() {
        let mut field = TextField::new("version")
            .with_default("bad")
            .with_validator(|v| {
                if v.starts_with('v') {
                    Ok(())
                } else {
                    Err(ValidationError::new("must start with v"))
                }
            });
        assert_eq!(field.update(&TuiEvent::Enter), FieldStatus::Editing);
        assert_eq!(field.error(), Some("must start with v"));
    }

    #[test]
    fn test_default_submitted_when_empty() {
        let mut field = TextField::new("moniker").with_default("operator");
        assert_eq!(
            field.update(&TuiEvent::Enter),
            FieldStatus::Submitted("operator".to_string())
        );
    }

    #[test]
    fn test_tab_copies_default_into_buffer() {
        let mut field = TextField::new("moniker").with_default("operator");
        type_str(&mut field, "xyz");
        field.update(&TuiEvent::Tab);
        assert_eq!(field.value(), "operator");
        field.update(&TuiEvent::Backspace);
        assert_eq!(
            field.update(&TuiEvent::Enter),
            FieldStatus::Submitted("operato".to_string())
        );
    }

    #[test]
    fn test_masked_view_hides_text() {
        let mut field = TextField::new("secret").masked();
        type_str(&mut field, "hunter2");
        let rendered = plain_text(&Text::from(field.view()));
        assert!(rendered.contains("*******"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_view_shows_error_and_reset_clears_it() {
        let mut field = TextField::new("chain id").with_error("download failed");
        assert!(plain_text(&Text::from(field.view())).contains("download failed"));
        type_str(&mut field, "x");
        field.reset();
        assert_eq!(field.value(), "");
        assert!(field.error().is_none());
    }
}
