//! Frame rendering
//!
//! Every screen is drawn into the same frame: a titled header, the body
//! produced by the navigator and a footer with key hints.

use crate::tui::components::{render_hint, render_title_block, three_panel_layout};
use crate::tui::navigator::Navigator;
use crate::tui::theme::theme;
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Margin, Rect},
    style::Style,
    widgets::{Paragraph, Wrap},
};

/// Fill the whole area with the theme background
fn set_background(area: Rect, buf: &mut Buffer) {
    let style = Style::new().bg(theme().bg);
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut(ratatui::layout::Position { x, y }) {
                cell.set_style(style);
            }
        }
    }
}

/// Render the navigator's active screen
pub fn render<S>(terminal: &mut DefaultTerminal, nav: &Navigator<S>) -> std::io::Result<()> {
    terminal.draw(|frame| draw(frame, frame.area(), nav))?;
    Ok(())
}

/// Draw one frame
pub fn draw<S>(frame: &mut Frame, area: Rect, nav: &Navigator<S>) {
    set_background(area, frame.buffer_mut());

    let [header, body, footer] = three_panel_layout(area);

    render_title_block(&nav.title(), frame, header);

    let body_area = body.inner(Margin::new(2, 1));
    let paragraph = Paragraph::new(nav.body())
        .style(theme().normal())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, body_area);

    render_hint(&nav.hint(), frame, footer);
}
