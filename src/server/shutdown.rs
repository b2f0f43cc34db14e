// Shutdown signal module
//
// Interrupt-driven shutdown is modeled as an explicit token the serve loop
// observes between accepts, instead of an implicit signal-to-exit mapping.
// Tests trigger it directly without sending process signals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Cancellation token for the serve loop.
pub struct ShutdownSignal {
    notify: Notify,
    triggered: AtomicBool,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            notify: Notify::new(),
            triggered: AtomicBool::new(false),
        }
    }

    /// Request shutdown. Idempotent; safe to call from any task.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Wait until shutdown has been requested. Returns immediately if it
    /// already has.
    pub async fn wait(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register interest before re-checking the flag, so a trigger
        // between the check and the await cannot be lost.
        notified.as_mut().enable();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the task that maps operator signals onto the shutdown token.
///
/// SIGINT (Ctrl+C) and SIGTERM both request shutdown on Unix; elsewhere only
/// Ctrl+C is wired up.
#[cfg(unix)]
pub fn spawn_signal_listener(shutdown: Arc<ShutdownSignal>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            crate::logger::log_error("Failed to register SIGINT handler");
            return;
        };
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            crate::logger::log_error("Failed to register SIGTERM handler");
            return;
        };

        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }
        shutdown.trigger();
    });
}

#[cfg(not(unix))]
pub fn spawn_signal_listener(shutdown: Arc<ShutdownSignal>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger();
        }
    });
}
