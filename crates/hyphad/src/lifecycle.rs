//! Per-instance lifecycle signalling.
//!
//! No process-wide emitter: each node owns one notifier, written to exactly
//! once when its boot attempt concludes and readable by any number of
//! subscribers.

use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};

use crate::bootstrap::{BootReport, BootStep};

/// Terminal signals marking the end of a boot attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A boot step failed. Always followed by [`LifecycleEvent::Ready`].
    Failed {
        /// Step at which the attempt failed.
        step: BootStep,
        /// Rendered failure description.
        message: String,
    },
    /// The boot attempt concluded, regardless of success.
    Ready,
}

#[derive(Debug, Default)]
struct NotifierState {
    subscribers: Vec<Sender<LifecycleEvent>>,
    fired: Option<Vec<LifecycleEvent>>,
}

/// Single-writer, multi-reader channel for terminal lifecycle events.
///
/// Subscribers attaching before the attempt concludes receive the events
/// live; later subscribers get the recorded pair replayed. Either way each
/// subscriber observes every event at most once per boot attempt.
#[derive(Debug, Default)]
pub struct LifecycleNotifier {
    state: Mutex<NotifierState>,
}

impl LifecycleNotifier {
    /// Builds an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber and returns its event receiver.
    pub fn subscribe(&self) -> Receiver<LifecycleEvent> {
        let (sender, receiver) = channel();
        let mut state = self.lock();
        match &state.fired {
            Some(events) => {
                for event in events {
                    let _ = sender.send(event.clone());
                }
            }
            None => state.subscribers.push(sender),
        }
        receiver
    }

    /// Emits the terminal events for a concluded boot attempt: `Failed`
    /// first when the report carries an error, then always `Ready`.
    /// Effective once; later calls are ignored.
    pub(crate) fn conclude(&self, report: &BootReport) {
        let mut state = self.lock();
        if state.fired.is_some() {
            return;
        }

        let mut events = Vec::with_capacity(2);
        if let Some(error) = &report.error {
            events.push(LifecycleEvent::Failed {
                step: error.step(),
                message: error.to_string(),
            });
        }
        events.push(LifecycleEvent::Ready);

        for subscriber in state.subscribers.drain(..) {
            for event in &events {
                // Dropped receivers are fine; delivery is best effort.
                let _ = subscriber.send(event.clone());
            }
        }
        state.fired = Some(events);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NotifierState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
