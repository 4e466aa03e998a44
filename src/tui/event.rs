//! Event handling module
//!
//! Uses crossterm for terminal input. Every event the loop consumes, from
//! key presses to timer ticks to action outcomes, flows through one ordered
//! [`EventQueue`].

use crate::tui::action::{ActionError, ActionId, CancelToken};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::warn;

/// Default interval between ticks (milliseconds)
const TICK_RATE: u64 = 100;

/// Event type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Home key
    Home,
    /// End key
    End,
    /// Character input (space included)
    Char(char),
    /// Ctrl+C / Ctrl+D
    Interrupt,
    /// Ctrl+Z, reserved: return to the previous screen
    StepBack,
    /// Ctrl+T, reserved: toggle extended help
    ToggleHelp,
    /// Window resize
    Resize(u16, u16),
    /// Timer tick
    Tick,
    /// A background action finished
    ActionDone {
        id: ActionId,
        payload: Option<String>,
    },
    /// A background action failed
    ActionFailed { id: ActionId, error: ActionError },
    /// Transfer progress from a background action
    Progress {
        id: ActionId,
        received: u64,
        total: Option<u64>,
    },
    /// No event
    None,
}

impl TuiEvent {
    /// Whether this event originates from the keyboard
    pub fn is_key(&self) -> bool {
        !matches!(
            self,
            TuiEvent::Resize(..)
                | TuiEvent::Tick
                | TuiEvent::ActionDone { .. }
                | TuiEvent::ActionFailed { .. }
                | TuiEvent::Progress { .. }
                | TuiEvent::None
        )
    }
}

impl From<Event> for TuiEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key_event) => key_event.into(),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            Event::Mouse(_) => TuiEvent::None,
            Event::FocusGained => TuiEvent::None,
            Event::FocusLost => TuiEvent::None,
            Event::Paste(_) => TuiEvent::None,
        }
    }
}

impl From<KeyEvent> for TuiEvent {
    fn from(key: KeyEvent) -> Self {
        // Ignore non-press events
        if key.kind != KeyEventKind::Press {
            return TuiEvent::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('d') => TuiEvent::Interrupt,
                KeyCode::Char('z') => TuiEvent::StepBack,
                KeyCode::Char('t') => TuiEvent::ToggleHelp,
                _ => TuiEvent::None,
            };
        }

        match key.code {
            KeyCode::Esc => TuiEvent::Escape,
            KeyCode::Enter => TuiEvent::Enter,
            KeyCode::Up => TuiEvent::Up,
            KeyCode::Down => TuiEvent::Down,
            KeyCode::Left => TuiEvent::Left,
            KeyCode::Right => TuiEvent::Right,
            KeyCode::Tab => TuiEvent::Tab,
            KeyCode::Backspace => TuiEvent::Backspace,
            KeyCode::Delete => TuiEvent::Delete,
            KeyCode::Home => TuiEvent::Home,
            KeyCode::End => TuiEvent::End,
            KeyCode::Char(c) => TuiEvent::Char(c),
            _ => TuiEvent::None,
        }
    }
}

/// Single ordered queue of events for the main loop
///
/// The queue holds only the receiving end: once every producer is gone,
/// [`EventQueue::next`] returns `None`.
#[derive(Debug)]
pub struct EventQueue {
    rx: Receiver<TuiEvent>,
}

impl EventQueue {
    /// Queue plus the first producer handle; clone it for pumps and workers
    pub fn new() -> (Self, Sender<TuiEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { rx }, tx)
    }

    /// Wait for the next event
    pub fn next(&self) -> Option<TuiEvent> {
        self.rx.recv().ok()
    }
}

/// Terminal input pump
///
/// Reads crossterm events on its own thread and forwards them to the queue,
/// interleaving a [`TuiEvent::Tick`] every `tick_rate`. If the terminal can no
/// longer be read, the pump sends [`TuiEvent::Interrupt`] before it stops so
/// the loop does not wait forever.
#[derive(Debug)]
pub struct EventPoll {
    tick_rate: Duration,
}

impl EventPoll {
    /// Create new event poller
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Start pumping until `stop` is cancelled or the queue is dropped
    pub fn spawn(self, tx: Sender<TuiEvent>, stop: CancelToken) -> std::io::Result<JoinHandle<()>> {
        std::thread::Builder::new()
            .name("terminal-input".to_string())
            .spawn(move || self.pump(read_terminal, &tx, &stop))
    }

    fn pump<F>(&self, mut source: F, tx: &Sender<TuiEvent>, stop: &CancelToken)
    where
        F: FnMut(Duration) -> std::io::Result<Option<Event>>,
    {
        let mut last_tick = Instant::now();
        while !stop.is_cancelled() {
            let timeout = self.tick_rate.saturating_sub(last_tick.elapsed());
            match source(timeout) {
                Ok(Some(raw)) => {
                    let event = TuiEvent::from(raw);
                    if event != TuiEvent::None && tx.send(event).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "Terminal input failed, ending session");
                    let _ = tx.send(TuiEvent::Interrupt);
                    return;
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                if tx.send(TuiEvent::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    }
}

impl Default for EventPoll {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE))
    }
}

/// Wait up to `timeout` for one crossterm event
fn read_terminal(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> TuiEvent {
        KeyEvent::new(code, modifiers).into()
    }

    #[test]
    fn test_reserved_control_keys() {
        assert_eq!(press(KeyCode::Char('z'), KeyModifiers::CONTROL), TuiEvent::StepBack);
        assert_eq!(press(KeyCode::Char('t'), KeyModifiers::CONTROL), TuiEvent::ToggleHelp);
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), TuiEvent::Interrupt);
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::CONTROL), TuiEvent::None);
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(press(KeyCode::Char('z'), KeyModifiers::NONE), TuiEvent::Char('z'));
        assert_eq!(press(KeyCode::Char(' '), KeyModifiers::NONE), TuiEvent::Char(' '));
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), TuiEvent::Enter);
        assert_eq!(press(KeyCode::Tab, KeyModifiers::NONE), TuiEvent::Tab);
        assert_eq!(press(KeyCode::F(5), KeyModifiers::NONE), TuiEvent::None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(TuiEvent::from(key), TuiEvent::None);
    }

    #[test]
    fn test_queue_preserves_order() {
        let (queue, tx) = EventQueue::new();
        tx.send(TuiEvent::Char('a')).unwrap();
        tx.send(TuiEvent::Tick).unwrap();
        tx.send(TuiEvent::Enter).unwrap();

        assert_eq!(queue.next(), Some(TuiEvent::Char('a')));
        assert_eq!(queue.next(), Some(TuiEvent::Tick));
        assert_eq!(queue.next(), Some(TuiEvent::Enter));
    }

    #[test]
    fn test_queue_ends_when_producers_are_gone() {
        let (queue, tx) = EventQueue::new();
        let worker = tx.clone();
        drop(tx);
        worker.send(TuiEvent::Tick).unwrap();
        drop(worker);

        assert_eq!(queue.next(), Some(TuiEvent::Tick));
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn test_input_error_interrupts_session() {
        let (queue, tx) = EventQueue::new();
        let poll = EventPoll::new(Duration::from_secs(60));
        let mut reads = 0;
        let source = |_timeout: Duration| {
            reads += 1;
            if reads == 1 {
                Ok(Some(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))))
            } else {
                Err(std::io::Error::other("terminal gone"))
            }
        };

        poll.pump(source, &tx, &CancelToken::new());
        drop(tx);

        assert_eq!(queue.next(), Some(TuiEvent::Enter));
        assert_eq!(queue.next(), Some(TuiEvent::Interrupt));
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn test_pump_stops_when_cancelled() {
        let (queue, tx) = EventQueue::new();
        let stop = CancelToken::new();
        stop.cancel();

        EventPoll::default().pump(|_| Ok(None), &tx, &stop);
        drop(tx);

        assert_eq!(queue.next(), None);
    }

    #[test]
    fn test_is_key() {
        assert!(TuiEvent::Char('a').is_key());
        assert!(TuiEvent::StepBack.is_key());
        assert!(!TuiEvent::Tick.is_key());
        assert!(!TuiEvent::Resize(80, 24).is_key());
    }
}
