//! Shutdown Coordination
//!
//! Broadcast-based shutdown signalling shared by the shell event loop and the
//! discovery poller. Signal handlers trigger the same path as a programmatic
//! shutdown request; a second signal forces immediate exit.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Coordinates graceful shutdown across the shell and its background tasks
pub struct ShutdownCoordinator {
    pub shutdown_tx: broadcast::Sender<()>,
    pub shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        // Channel sized to absorb bursts of repeated signals
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);
        let shutdown_requested = Arc::new(AtomicBool::new(false));

        let coordinator = Self {
            shutdown_tx,
            shutdown_requested,
        };

        (coordinator, shutdown_rx)
    }

    /// Subscribe to shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown
    pub fn trigger_shutdown(&self) {
        // Release store pairs with the Acquire load in is_shutdown_requested
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    /// Check if shutdown has been requested
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Run a future under shutdown coordination: signal handlers are
    /// installed and the closure receives the coordinator plus a receiver.
    pub async fn guard_with_coordinator<F, Fut, R, E>(future_fn: F) -> Result<R, E>
    where
        F: FnOnce(Self, broadcast::Receiver<()>) -> Fut,
        Fut: std::future::Future<Output = Result<R, E>>,
    {
        let (coordinator, shutdown_rx) = Self::new();

        setup_signal_handlers(
            coordinator.shutdown_tx.clone(),
            coordinator.shutdown_requested.clone(),
        );

        future_fn(coordinator, shutdown_rx).await
    }
}

/// Set up signal handlers for graceful shutdown
fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>, shutdown_requested: Arc<AtomicBool>) {
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use tokio::signal::unix::{signal, SignalKind};
        let signal_count = Arc::new(AtomicUsize::new(0));
        let signals = [SignalKind::interrupt(), SignalKind::terminate()];

        for kind in signals {
            let tx = shutdown_tx.clone();
            let requested = shutdown_requested.clone();
            let sig_ctr = signal_count.clone();

            tokio::spawn(async move {
                if let Ok(mut sig) = signal(kind) {
                    while sig.recv().await.is_some() {
                        let prev = sig_ctr.fetch_add(1, Ordering::AcqRel);
                        requested.store(true, Ordering::Release);
                        let _ = tx.send(());
                        if prev >= 1 {
                            // Second signal: stop waiting for the layout save
                            std::process::exit(130);
                        }
                        break;
                    }
                }
            });
        }
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown_requested.store(true, Ordering::Release);
                let _ = shutdown_tx.send(());
            }
        });
    }
}
