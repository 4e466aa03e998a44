//! Progress bar wrapped around a transfer action

use super::loading::{LoadStatus, outcome_for};
use crate::tui::action::{Action, ActionId};
use crate::tui::event::TuiEvent;
use crate::tui::theme::theme;
use ratatui::text::{Line, Span};
use rust_i18n::t;

const BAR_WIDTH: usize = 30;

/// Tracks bytes received by one transfer action
#[derive(Debug, Clone)]
pub struct Downloader {
    label: String,
    received: u64,
    total: Option<u64>,
    action: Option<ActionId>,
}

impl Downloader {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            received: 0,
            total: None,
            action: None,
        }
    }

    /// Track `action` and hand it back for the loop to spawn
    pub fn start(&mut self, action: Action) -> Action {
        self.action = Some(action.id());
        self.received = 0;
        self.total = None;
        action
    }

    /// Progress events update the counters; the outcome ends tracking
    pub fn update(&mut self, event: &TuiEvent) -> LoadStatus {
        if let TuiEvent::Progress {
            id,
            received,
            total,
        } = event
        {
            if self.action == Some(*id) {
                self.received = *received;
                self.total = *total;
            }
            return LoadStatus::Pending;
        }

        match outcome_for(self.action, event) {
            Some(status) => {
                self.action = None;
                status
            }
            None => LoadStatus::Pending,
        }
    }

    /// Completed fraction in `0.0..=1.0`; an unknown or zero total counts as 1
    pub fn ratio(&self) -> f64 {
        let total = self.total.filter(|t| *t > 0).unwrap_or(1);
        (self.received as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn percent(&self) -> u16 {
        (self.ratio() * 100.0).round() as u16
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn view(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::styled(self.label.clone(), theme().normal())];
        match self.total {
            Some(total) if total > 0 => {
                let filled = (self.ratio() * BAR_WIDTH as f64).round() as usize;
                lines.push(Line::from(vec![
                    Span::styled("█".repeat(filled), theme().progress()),
                    Span::styled("░".repeat(BAR_WIDTH - filled), theme().hint()),
                    Span::styled(
                        format!(
                            " {:>3}%  {} / {}",
                            self.percent(),
                            format_bytes(self.received),
                            format_bytes(total)
                        ),
                        theme().normal(),
                    ),
                ]));
            }
            _ => {
                lines.push(Line::styled(
                    t!("download_received", bytes = format_bytes(self.received)).into_owned(),
                    theme().hint(),
                ));
            }
        }
        lines
    }
}

/// Human readable byte count
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
