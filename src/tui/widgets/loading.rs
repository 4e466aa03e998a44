//! Spinner wrapped around a background action

use crate::tui::action::{Action, ActionError, ActionId};
use crate::tui::event::TuiEvent;
use crate::tui::theme::theme;
use ratatui::text::{Line, Span};

const FRAMES: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// Where a tracked action stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Done(Option<String>),
    Failed(ActionError),
}

/// Outcome of `event` if it belongs to the action `id`
pub(crate) fn outcome_for(id: Option<ActionId>, event: &TuiEvent) -> Option<LoadStatus> {
    let id = id?;
    match event {
        TuiEvent::ActionDone { id: done, payload } if *done == id => {
            Some(LoadStatus::Done(payload.clone()))
        }
        TuiEvent::ActionFailed { id: failed, error } if *failed == id => {
            Some(LoadStatus::Failed(error.clone()))
        }
        _ => None,
    }
}

/// Animated spinner shown while one action runs
#[derive(Debug, Clone)]
pub struct Loading {
    label: String,
    frame: usize,
    action: Option<ActionId>,
}

impl Loading {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            frame: 0,
            action: None,
        }
    }

    /// Track `action` and hand it back for the loop to spawn
    pub fn start(&mut self, action: Action) -> Action {
        self.action = Some(action.id());
        self.frame = 0;
        action
    }

    /// Ticks advance the animation; the tracked action's outcome ends it
    pub fn update(&mut self, event: &TuiEvent) -> LoadStatus {
        if matches!(event, TuiEvent::Tick) {
            self.frame = (self.frame + 1) % FRAMES.len();
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

    pub fn is_running(&self) -> bool {
        self.action.is_some()
    }

    pub fn frame(&self) -> char {
        FRAMES[self.frame]
    }

    pub fn view(&self) -> Vec<Line<'static>> {
        vec![Line::from(vec![
            Span::styled(format!("{} ", self.frame()), theme().progress()),
            Span::styled(self.label.clone(), theme().normal()),
        ])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_and_wraps() {
        let mut spinner = Loading::new("Loading");
        assert_eq!(spinner.frame(), '⣾');
        for _ in 0..FRAMES.len() + 1 {
            assert_eq!(spinner.update(&TuiEvent::Tick), LoadStatus::Pending);
        }
        assert_eq!(spinner.frame(), '⣽');
    }

    #[test]
    fn test_reports_own_outcome_only() {
        let mut spinner = Loading::new("Loading");
        let action = spinner.start(Action::new("fetch", |_| Ok(None)));
        let other = Action::new("other", |_| Ok(None));

        let foreign = TuiEvent::ActionDone {
            id: other.id(),
            payload: None,
        };
        assert_eq!(spinner.update(&foreign), LoadStatus::Pending);
        assert!(spinner.is_running());

        let own = TuiEvent::ActionFailed {
            id: action.id(),
            error: ActionError::new("offline"),
        };
        assert_eq!(
            spinner.update(&own),
            LoadStatus::Failed(ActionError::new("offline"))
        );
        assert!(!spinner.is_running());
    }

    #[test]
    fn test_idle_spinner_ignores_outcomes() {
        let mut spinner = Loading::new("Loading");
        let stray = Action::new("stray", |_| Ok(None));
        let event = TuiEvent::ActionDone {
            id: stray.id(),
            payload: Some("v1".into()),
        };
        assert_eq!(spinner.update(&event), LoadStatus::Pending);
    }
}
