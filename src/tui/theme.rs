//! Theme module
//!
//! Shared colors and styles for every screen and widget.

use ratatui::style::{Color, Modifier, Style};

/// Theme color configuration
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Background (dark theme)
    pub bg: Color,
    /// Foreground (white)
    pub fg: Color,
    /// Accent (cyan)
    pub accent: Color,
    /// Selected item background
    pub selected_bg: Color,
    /// Selected item foreground
    pub selected_fg: Color,
    /// Success (green)
    pub success: Color,
    /// Warning (yellow)
    pub warning: Color,
    /// Error (red)
    pub error: Color,
    /// Hints and secondary text (gray)
    pub hint: Color,
    /// Borders
    pub border: Color,
    /// Progress bar
    pub progress: Color,
    /// Titles
    pub title: Color,
}

impl Default for Theme {
    fn default() -> Self {
        THEME
    }
}

impl Theme {
    /// Plain text
    pub fn normal(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    /// Header titles
    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.title)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Question prompt above a widget
    pub fn prompt(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg).add_modifier(Modifier::BOLD)
    }

    /// Item under the cursor
    pub fn selected(&self) -> Style {
        Style::new()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Cursor marker in lists
    pub fn cursor(&self) -> Style {
        Style::new().fg(self.accent).bg(self.bg).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::new().fg(self.border).bg(self.bg)
    }

    pub fn hint(&self) -> Style {
        Style::new().fg(self.hint).bg(self.bg)
    }

    /// Placeholder text in an empty field
    pub fn placeholder(&self) -> Style {
        self.hint().add_modifier(Modifier::ITALIC)
    }

    pub fn success(&self) -> Style {
        Style::new().fg(self.success).bg(self.bg)
    }

    pub fn error(&self) -> Style {
        Style::new().fg(self.error).bg(self.bg)
    }

    pub fn progress(&self) -> Style {
        Style::new().fg(self.progress).bg(self.bg)
    }

    /// Extended help text
    pub fn tooltip(&self) -> Style {
        Style::new().fg(self.warning).bg(self.bg).add_modifier(Modifier::ITALIC)
    }
}

/// Global theme instance
pub static THEME: Theme = Theme {
    bg: Color::Black,
    fg: Color::White,
    accent: Color::Cyan,
    selected_bg: Color::Cyan,
    selected_fg: Color::Black,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    hint: Color::Gray,
    border: Color::Cyan,
    progress: Color::Cyan,
    title: Color::Cyan,
};

/// Global theme reference
pub fn theme() -> &'static Theme {
    &THEME
}
