//! Cancelable debounce timer
//!
//! At most one timer is live: scheduling a new one aborts the previous.

use crate::session::SessionEvent;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Posts `TimerFired` back to the session after a quiet period
#[derive(Debug)]
pub struct Debouncer {
    events: UnboundedSender<SessionEvent>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(events: UnboundedSender<SessionEvent>) -> Self {
        Self {
            events,
            pending: None,
        }
    }

    /// Fire `TimerFired { seq }` after `delay`, replacing any pending timer
    pub fn schedule(&mut self, seq: u64, delay: Duration) {
        self.cancel();

        let events = self.events.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::TimerFired { seq });
        }));
    }

    /// Drop the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
