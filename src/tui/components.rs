//! Common UI components module
//!
//! Layout and text helpers shared by the frame renderer and the widgets.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::theme;

/// Three-panel layout: header, body, footer
pub fn three_panel_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area)
}

/// Render a centered title block with border
pub fn render_title_block(title: &str, frame: &mut ratatui::Frame, area: Rect) {
    let title_line = Line::from(format!(" {} ", title))
        .centered()
        .style(theme().title());

    let block = Block::bordered()
        .title(title_line)
        .border_type(BorderType::Rounded)
        .border_style(theme().border())
        .style(theme().normal());

    frame.render_widget(block, area);
}

/// Render bottom hint text
pub fn render_hint(hint: &str, frame: &mut ratatui::Frame, area: Rect) {
    let hint_widget = Paragraph::new(hint.to_string())
        .style(theme().hint())
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(hint_widget, area);
}

/// Shorten `value` to at most `max_width` terminal columns, marking the cut
/// with `...`
pub fn truncate_to_width(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut kept: String = value
        .chars()
        .take_while(|&ch| {
            used += UnicodeWidthChar::width(ch).unwrap_or(0);
            used <= budget
        })
        .collect();
    kept.push_str("...");
    kept
}

/// Flatten styled text into plain lines joined by `\n`
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly-10", 10), "exactly-10");
        assert_eq!(truncate_to_width("a-very-long-chain-id", 10), "a-very-...");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns wide
        assert_eq!(truncate_to_width("节点名称测试", 7), "节点...");
    }

    #[test]
    fn test_plain_text() {
        let text = Text::from(vec![
            Line::from(vec![Span::raw("> "), Span::raw("Testnet")]),
            Line::raw("  Local"),
        ]);
        assert_eq!(plain_text(&text), "> Testnet\n  Local");
    }
}
