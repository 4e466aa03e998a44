//! Screen navigation
//!
//! The [`Navigator`] owns the active screen and the context. It delivers one
//! event at a time, intercepting the two reserved events before the screen
//! sees them: step-back restores the previous screen together with its
//! state snapshot, toggle-help flips the tooltip flag.

use crate::error::Error;
use crate::tui::action::Action;
use crate::tui::context::{Context, Flag};
use crate::tui::event::TuiEvent;
use crate::tui::screen::{Screen, Transition};
use crate::tui::theme::theme;
use ratatui::text::{Line, Text};
use rust_i18n::t;
use std::borrow::Cow;
use tracing::{debug, error, info};

/// How a wizard session ended
#[derive(Debug)]
pub enum SessionEnd<S> {
    /// A screen returned [`Transition::Quit`]; carries the final state
    Completed(S),
    /// The user interrupted the session; carries the state at that moment
    Interrupted(S),
    /// A screen returned [`Transition::Fail`]
    Failed(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Completed,
    Interrupted,
}

/// Drives a chain of screens over a shared [`Context`]
pub struct Navigator<S> {
    ctx: Context<S>,
    current: Option<Box<dyn Screen<S>>>,
    status: Status,
    failure: Option<Error>,
}

impl<S: Clone + 'static> Navigator<S> {
    pub fn new(ctx: Context<S>, first: Box<dyn Screen<S>>) -> Self {
        Self {
            ctx,
            current: Some(first),
            status: Status::Running,
            failure: None,
        }
    }

    /// Run the first screen's `init`
    pub fn start(&mut self) -> Option<Action> {
        let screen = self.current.as_mut()?;
        info!(screen = screen.name(), "Wizard started");
        screen.init(&mut self.ctx)
    }

    /// Deliver one event; returns background work the loop must start
    pub fn dispatch(&mut self, event: TuiEvent) -> Option<Action> {
        if !self.is_running() {
            return None;
        }

        match event {
            TuiEvent::Interrupt => {
                info!(screen = self.screen_name(), "Wizard interrupted");
                self.status = Status::Interrupted;
                None
            }
            TuiEvent::ToggleHelp => {
                self.ctx.toggle(Flag::Tooltip);
                None
            }
            TuiEvent::StepBack => {
                self.step_back();
                None
            }
            TuiEvent::None | TuiEvent::Resize(..) => None,
            event => self.deliver(&event),
        }
    }

    fn deliver(&mut self, event: &TuiEvent) -> Option<Action> {
        let screen = self.current.take()?;
        match screen.update(&mut self.ctx, event) {
            Transition::Stay(screen, action) => {
                self.current = Some(screen);
                action
            }
            Transition::Goto(screen) => self.enter(screen),
            Transition::Quit => {
                info!(depth = self.ctx.depth(), "Wizard completed");
                self.status = Status::Completed;
                None
            }
            Transition::Fail(err) => {
                error!(error = %err, "Wizard failed");
                let screen = Box::new(FailureScreen::new(&err));
                self.failure = Some(err);
                self.enter(screen)
            }
        }
    }

    fn enter(&mut self, mut screen: Box<dyn Screen<S>>) -> Option<Action> {
        info!(screen = screen.name(), depth = self.ctx.depth(), "Entered screen");
        let action = screen.init(&mut self.ctx);
        self.current = Some(screen);
        action
    }

    /// Restore the previous screen and its state, unless the active screen
    /// refuses to be left or there is nothing to go back to
    fn step_back(&mut self) {
        let Some(current) = self.current.take() else {
            return;
        };

        if !current.can_go_back() {
            debug!(screen = current.name(), "Step back blocked by screen");
            self.current = Some(current);
            return;
        }

        match self.ctx.pop() {
            Some(page) => {
                info!(
                    from = current.name(),
                    to = page.screen.name(),
                    depth = self.ctx.depth(),
                    "Stepped back"
                );
                self.ctx.set(page.state);
                self.current = Some(page.screen);
            }
            None => {
                debug!(screen = current.name(), "Nothing to step back to");
                self.current = Some(current);
            }
        }
    }
}

impl<S> Navigator<S> {
    pub fn context(&self) -> &Context<S> {
        &self.ctx
    }

    pub fn state(&self) -> &S {
        self.ctx.state()
    }

    /// Name of the active screen
    pub fn screen_name(&self) -> &'static str {
        self.current.as_ref().map(|s| s.name()).unwrap_or("none")
    }

    /// Whether the active screen has the given type name
    pub fn is_on(&self, name: &str) -> bool {
        self.screen_name() == name
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn title(&self) -> Cow<'static, str> {
        self.current
            .as_ref()
            .map(|s| s.title())
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Footer hint: the screen's own keys followed by the reserved ones
    pub fn hint(&self) -> String {
        let own = self.current.as_ref().map(|s| s.hint()).unwrap_or_default();
        let can_go_back = self.current.as_ref().is_some_and(|s| s.can_go_back())
            && self.ctx.depth() > 0;
        let global = if can_go_back {
            t!("hint_global_back")
        } else {
            t!("hint_global")
        };
        if own.is_empty() {
            global.into_owned()
        } else {
            format!("{own} · {global}")
        }
    }

    /// Body text: the screen's view plus the tooltip while the flag is on
    pub fn body(&self) -> Text<'static> {
        let Some(screen) = self.current.as_ref() else {
            return Text::default();
        };
        let mut text = screen.view(&self.ctx);
        if self.ctx.show_tooltip() {
            let tooltip = screen
                .tooltip(&self.ctx)
                .unwrap_or_else(|| t!("tooltip_none").into_owned());
            text.lines.push(Line::default());
            text.lines
                .push(Line::styled(format!("ⓘ {tooltip}"), theme().tooltip()));
        }
        text
    }

    /// End the session and report how it ended
    pub fn finish(self) -> SessionEnd<S> {
        if let Some(err) = self.failure {
            return SessionEnd::Failed(err);
        }
        match self.status {
            Status::Interrupted | Status::Running => SessionEnd::Interrupted(self.ctx.into_state()),
            Status::Completed => SessionEnd::Completed(self.ctx.into_state()),
        }
    }
}

/// Terminal error view shown after a screen fails; any key ends the session
struct FailureScreen {
    message: String,
}

impl FailureScreen {
    fn new(err: &Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl<S> Screen<S> for FailureScreen {
    fn update(self: Box<Self>, _ctx: &mut Context<S>, event: &TuiEvent) -> Transition<S> {
        if event.is_key() {
            Transition::Quit
        } else {
            Transition::Stay(self, None)
        }
    }

    fn view(&self, _ctx: &Context<S>) -> Text<'static> {
        Text::from(vec![
            Line::styled(format!("✗ {}", self.message), theme().error()),
            Line::default(),
            Line::styled(t!("failure_exit").into_owned(), theme().hint()),
        ])
    }

    fn title(&self) -> Cow<'static, str> {
        t!("failure_title")
    }

    fn hint(&self) -> Cow<'static, str> {
        Cow::Borrowed("")
    }

    fn can_go_back(&self) -> bool {
        false
    }
}
