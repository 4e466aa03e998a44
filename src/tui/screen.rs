//! Screen contract
//!
//! Every wizard step implements [`Screen`]: `init` when it becomes active,
//! `update` once per event, `view` to render. `update` consumes the boxed
//! screen and hands back a [`Transition`], so a screen that moves on can
//! push itself onto the context's page stack before returning its successor.

use crate::error::Error;
use crate::tui::action::Action;
use crate::tui::context::Context;
use crate::tui::event::TuiEvent;
use ratatui::text::Text;
use rust_i18n::t;
use std::borrow::Cow;

/// One step of a wizard over state `S`
pub trait Screen<S> {
    /// Called once when the screen becomes active; may start background work
    fn init(&mut self, _ctx: &mut Context<S>) -> Option<Action> {
        None
    }

    /// Consume one event and decide what is active next
    fn update(self: Box<Self>, ctx: &mut Context<S>, event: &TuiEvent) -> Transition<S>;

    /// Render the screen body; must not change anything
    fn view(&self, ctx: &Context<S>) -> Text<'static>;

    /// Header title
    fn title(&self) -> Cow<'static, str> {
        Cow::Borrowed("")
    }

    /// Key hint shown in the footer
    fn hint(&self) -> Cow<'static, str> {
        t!("hint_select")
    }

    /// Extended help shown while the tooltip flag is on
    fn tooltip(&self, _ctx: &Context<S>) -> Option<String> {
        None
    }

    /// Whether the step-back key may leave this screen
    fn can_go_back(&self) -> bool {
        true
    }

    /// Short name for logs
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or(path)
    }
}

/// What an `update` call decided
pub enum Transition<S> {
    /// Keep the given screen active (normally the screen itself), optionally
    /// starting a background action
    Stay(Box<dyn Screen<S>>, Option<Action>),
    /// Activate a different screen; its `init` runs next
    Goto(Box<dyn Screen<S>>),
    /// The wizard finished
    Quit,
    /// The wizard cannot continue; the error is shown before exiting
    Fail(Error),
}

impl<S> Transition<S> {
    /// Stay on `screen` without starting anything
    pub fn stay(screen: Box<dyn Screen<S>>) -> Self {
        Transition::Stay(screen, None)
    }

    /// Stay on `screen` and start `action`
    pub fn stay_with(screen: Box<dyn Screen<S>>, action: Action) -> Self {
        Transition::Stay(screen, Some(action))
    }

    /// Move to `screen`
    pub fn goto<T: Screen<S> + 'static>(screen: T) -> Self {
        Transition::Goto(Box::new(screen))
    }

    pub fn is_stay(&self) -> bool {
        matches!(self, Transition::Stay(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Screen<()> for Plain {
        fn update(self: Box<Self>, _ctx: &mut Context<()>, _event: &TuiEvent) -> Transition<()> {
            Transition::stay(self)
        }

        fn view(&self, _ctx: &Context<()>) -> Text<'static> {
            Text::default()
        }
    }

    #[test]
    fn test_default_name_strips_module_path() {
        assert_eq!(Plain.name(), "Plain");
    }

    #[test]
    fn test_defaults() {
        assert!(Plain.can_go_back());
        assert!(Plain.title().is_empty());
        assert!(Transition::<()>::stay(Box::new(Plain)).is_stay());
        assert!(!Transition::<()>::goto(Plain).is_stay());
    }
}
