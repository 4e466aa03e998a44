//! Background actions
//!
//! Screens never block inside `update`. Work that would block is described
//! as an [`Action`] and handed back to the loop, which runs it on a worker
//! thread. The worker only talks to the loop through [`TuiEvent`]s: progress
//! reports while running, then exactly one outcome event.

use crate::tui::event::TuiEvent;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};

static NEXT_ACTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one background action, carried by every event it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u64);

impl ActionId {
    fn next() -> Self {
        Self(NEXT_ACTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Failure reported by a background action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ActionError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Result of a background action: an optional payload or an error
pub type Outcome = Result<Option<String>, ActionError>;

type Job = Box<dyn FnOnce(&Reporter) -> Outcome + Send + 'static>;

/// Cooperative cancellation flag shared between the loop and its workers
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handle given to a running job for progress reports and cancellation checks
#[derive(Debug, Clone)]
pub struct Reporter {
    id: ActionId,
    tx: Sender<TuiEvent>,
    cancel: CancelToken,
}

impl Reporter {
    pub fn new(id: ActionId, tx: Sender<TuiEvent>, cancel: CancelToken) -> Self {
        Self { id, tx, cancel }
    }

    /// Report transferred bytes; `total` is `None` when the size is unknown
    pub fn progress(&self, received: u64, total: Option<u64>) {
        let _ = self.tx.send(TuiEvent::Progress {
            id: self.id,
            received,
            total,
        });
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// A deferred background operation
pub struct Action {
    id: ActionId,
    name: String,
    job: Job,
}

impl Action {
    /// Describe a new action; nothing runs until the loop spawns it
    pub fn new<F>(name: impl Into<String>, job: F) -> Self
    where
        F: FnOnce(&Reporter) -> Outcome + Send + 'static,
    {
        Self {
            id: ActionId::next(),
            name: name.into(),
            job: Box::new(job),
        }
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the job on the current thread and convert its result into
    /// the outcome event for the loop. A panicking job becomes a failure.
    pub fn run(self, reporter: &Reporter) -> TuiEvent {
        let Action { id, name, job } = self;
        match catch_unwind(AssertUnwindSafe(|| job(reporter))) {
            Ok(Ok(payload)) => {
                info!(action = %name, %id, "Action completed");
                TuiEvent::ActionDone { id, payload }
            }
            Ok(Err(error)) => {
                warn!(action = %name, %id, error = %error, "Action failed");
                TuiEvent::ActionFailed { id, error }
            }
            Err(_) => {
                warn!(action = %name, %id, "Action panicked");
                TuiEvent::ActionFailed {
                    id,
                    error: ActionError::new(format!("{name} stopped unexpectedly")),
                }
            }
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Spawns actions on worker threads that feed the loop's event queue
#[derive(Debug, Clone)]
pub struct ActionRunner {
    tx: Sender<TuiEvent>,
    cancel: CancelToken,
}

impl ActionRunner {
    pub fn new(tx: Sender<TuiEvent>, cancel: CancelToken) -> Self {
        Self { tx, cancel }
    }

    /// Run the action on its own thread; its outcome arrives as an event
    pub fn spawn(&self, action: Action) -> crate::Result<()> {
        let reporter = Reporter::new(action.id(), self.tx.clone(), self.cancel.clone());
        let tx = self.tx.clone();
        let name = action.name().to_string();
        debug!(action = %name, id = %action.id(), "Spawning action");

        std::thread::Builder::new()
            .name(format!("action-{name}"))
            .spawn(move || {
                let event = action.run(&reporter);
                // The loop may already be gone; the outcome is then abandoned.
                let _ = tx.send(event);
            })
            .map(|_| ())
            .map_err(|source| crate::Error::Spawn { name, source })
    }

    /// Signal every running job that the session is over
    pub fn cancel_all(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_ids_are_unique() {
        let a = Action::new("a", |_| Ok(None));
        let b = Action::new("b", |_| Ok(None));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_run_success_and_failure() {
        let (tx, _rx) = mpsc::channel();
        let ok = Action::new("ok", |_| Ok(Some("v1".to_string())));
        let ok_id = ok.id();
        let reporter = Reporter::new(ok_id, tx.clone(), CancelToken::new());
        assert_eq!(
            ok.run(&reporter),
            TuiEvent::ActionDone {
                id: ok_id,
                payload: Some("v1".to_string())
            }
        );

        let bad = Action::new("bad", |_| Err(ActionError::new("boom")));
        let bad_id = bad.id();
        let reporter = Reporter::new(bad_id, tx, CancelToken::new());
        assert_eq!(
            bad.run(&reporter),
            TuiEvent::ActionFailed {
                id: bad_id,
                error: ActionError::new("boom")
            }
        );
    }

    #[test]
    fn test_panicking_job_becomes_failure() {
        let (tx, _rx) = mpsc::channel();
        let action = Action::new("explode", |_| panic!("kaboom"));
        let reporter = Reporter::new(action.id(), tx, CancelToken::new());
        assert!(matches!(action.run(&reporter), TuiEvent::ActionFailed { .. }));
    }

    #[test]
    fn test_runner_delivers_progress_before_outcome() {
        let (tx, rx) = mpsc::channel();
        let runner = ActionRunner::new(tx, CancelToken::new());
        let action = Action::new("copy", |reporter| {
            reporter.progress(5, Some(10));
            reporter.progress(10, Some(10));
            Ok(None)
        });
        let id = action.id();
        runner.spawn(action).unwrap();

        let timeout = Duration::from_secs(5);
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            TuiEvent::Progress {
                id,
                received: 5,
                total: Some(10)
            }
        );
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            TuiEvent::Progress {
                id,
                received: 10,
                total: Some(10)
            }
        );
        assert_eq!(
            rx.recv_timeout(timeout).unwrap(),
            TuiEvent::ActionDone { id, payload: None }
        );
    }

    #[test]
    fn test_cancel_is_visible_to_jobs() {
        let (tx, rx) = mpsc::channel();
        let runner = ActionRunner::new(tx, CancelToken::new());
        runner.cancel_all();
        let action = Action::new("wait", |reporter| {
            if reporter.is_cancelled() {
                Err(ActionError::new("cancelled"))
            } else {
                Ok(None)
            }
        });
        runner.spawn(action).unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(event, TuiEvent::ActionFailed { ref error, .. } if error.message() == "cancelled"));
    }
}
