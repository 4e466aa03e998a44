//! Typed wizard context
//!
//! A [`Context`] travels with a wizard from its first screen to its last. It
//! owns the current wizard state, the stack of screens the user has left
//! (each paired with the state as it stood when they left), a set of
//! cross-cutting flags and the injected session configuration.
//!
//! The active screen itself is held by the [`Navigator`](crate::tui::Navigator),
//! never by the stack: a screen is pushed only at the moment it hands
//! control to its successor.

use crate::config::Config;
use crate::tui::screen::Screen;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Orthogonal boolean flags, independent of navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Extended help beneath the active screen
    Tooltip,
}

/// Current value of every [`Flag`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    tooltip: bool,
}

impl Flags {
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Tooltip => self.tooltip,
        }
    }

    pub fn toggle(&mut self, flag: Flag) {
        match flag {
            Flag::Tooltip => self.tooltip = !self.tooltip,
        }
    }
}

/// A previously visited screen and the state it was left with
pub struct Page<S> {
    pub screen: Box<dyn Screen<S>>,
    pub state: S,
}

impl<S: fmt::Debug> fmt::Debug for Page<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("screen", &self.screen.name())
            .field("state", &self.state)
            .finish()
    }
}

/// Wizard context: current state, page stack and flags
pub struct Context<S> {
    state: S,
    pages: Vec<Page<S>>,
    flags: Flags,
    config: Arc<Config>,
}

impl<S> Context<S> {
    /// Create a context holding the wizard's initial state and an empty stack
    pub fn new(state: S, config: Arc<Config>) -> Self {
        Self {
            state,
            pages: Vec::new(),
            flags: Flags::default(),
            config,
        }
    }

    /// Current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable access to the current state
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Replace the current state; the page stack is left untouched
    pub fn set(&mut self, state: S) {
        self.state = state;
    }

    /// Consuming form of [`Context::set`]
    pub fn with_state(mut self, state: S) -> Self {
        self.set(state);
        self
    }

    /// Remove and return the most recently left page
    pub fn pop(&mut self) -> Option<Page<S>> {
        let page = self.pages.pop();
        if let Some(ref page) = page {
            debug!(screen = page.screen.name(), depth = self.pages.len(), "Popped page");
        }
        page
    }

    /// Name of the screen on top of the stack
    pub fn peek_name(&self) -> Option<&'static str> {
        self.pages.last().map(|page| page.screen.name())
    }

    /// Number of pages on the stack
    pub fn depth(&self) -> usize {
        self.pages.len()
    }

    /// Flip a flag; navigation never touches flags
    pub fn toggle(&mut self, flag: Flag) {
        self.flags.toggle(flag);
        debug!(?flag, value = self.flags.get(flag), "Toggled flag");
    }

    pub fn is_set(&self, flag: Flag) -> bool {
        self.flags.get(flag)
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether extended help is shown
    pub fn show_tooltip(&self) -> bool {
        self.flags.get(Flag::Tooltip)
    }

    /// Session configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the session configuration, for moving into actions
    pub fn config_handle(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Consume the context, keeping only the final state
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: Clone> Context<S> {
    /// Push `screen` together with a deep copy of the current state
    ///
    /// Called by a screen right before it hands control to its successor
    /// and before it records its own answer, so that stepping back restores
    /// the state the screen was entered with.
    pub fn push_and_clone(&mut self, screen: Box<dyn Screen<S>>) {
        let state = self.state.clone();
        debug!(screen = screen.name(), depth = self.pages.len() + 1, "Pushed page");
        self.pages.push(Page { screen, state });
    }
}

impl<S: fmt::Debug> fmt::Debug for Context<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state)
            .field("pages", &self.pages)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
