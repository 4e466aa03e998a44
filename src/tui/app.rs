//! TUI application main module
//!
//! Owns the terminal and runs the single event loop: render, wait for the
//! next queued event, hand it to the navigator, start any action it returns.

use crate::tui::action::{ActionRunner, CancelToken};
use crate::tui::event::{EventPoll, EventQueue};
use crate::tui::navigator::{Navigator, SessionEnd};
use crate::tui::ui::render;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::{debug, info};

/// TUI application
pub struct TuiApp<S> {
    navigator: Navigator<S>,
    tick_rate: Duration,
}

impl<S: Clone + 'static> TuiApp<S> {
    pub fn new(navigator: Navigator<S>, tick_rate: Duration) -> Self {
        Self {
            navigator,
            tick_rate,
        }
    }

    /// Run until the wizard ends; the terminal is restored on every path
    pub fn run(mut self) -> crate::Result<SessionEnd<S>> {
        let mut terminal = ratatui::init();
        let outcome = self.event_loop(&mut terminal);
        ratatui::restore();
        outcome?;
        Ok(self.navigator.finish())
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        // One token stops the input pump and tells running jobs to give up
        let stop = CancelToken::new();
        let (queue, tx) = EventQueue::new();
        let input = EventPoll::new(self.tick_rate).spawn(tx.clone(), stop.clone())?;
        let runner = ActionRunner::new(tx, stop.clone());

        let outcome = self.drive(terminal, &queue, &runner);

        runner.cancel_all();
        if input.join().is_err() {
            debug!("Input thread panicked");
        }
        outcome
    }

    fn drive(
        &mut self,
        terminal: &mut DefaultTerminal,
        queue: &EventQueue,
        runner: &ActionRunner,
    ) -> crate::Result<()> {
        if let Some(action) = self.navigator.start() {
            runner.spawn(action)?;
        }

        while self.navigator.is_running() {
            render(terminal, &self.navigator)?;

            let Some(event) = queue.next() else {
                break;
            };
            if let Some(action) = self.navigator.dispatch(event) {
                runner.spawn(action)?;
            }
        }

        info!(screen = self.navigator.screen_name(), "Event loop finished");
        Ok(())
    }
}
