//! Shutdown coordination for the service.

use tokio::sync::broadcast;

/// Broadcasts a single "stop now" event to every subscribed task.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe before the event fires; late subscribers miss it.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the event. A no-op when nobody is listening.
    pub fn trigger(&self) {
        let subscribers = self.tx.receiver_count();
        if self.tx.send(()).is_ok() {
            tracing::info!(subscribers, "Shutdown triggered");
        }
    }

    /// Trigger once the OS asks the process to stop.
    pub fn trigger_on_signal(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            crate::lifecycle::signals::shutdown_signal().await;
            this.trigger();
        });
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
