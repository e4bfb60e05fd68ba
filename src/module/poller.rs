//! Module Directory Poller
//!
//! Background task that re-lists the module directories on a fixed interval
//! and reports any file not yet in the registry's discovered set. The poller
//! never loads or registers anything itself; it posts the paths to the shell
//! event channel so all registry mutation stays on the UI context.

use crate::app::events::ShellEvent;
use crate::module::discovery::{list_candidate_files, DiscoveryConfig};
use crate::module::registry::SharedModuleRegistry;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Interval between directory listings
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// How long shutdown waits for the poller before giving up on it
pub const POLL_STOP_GRACE: Duration = Duration::from_millis(500);

/// Periodic scanner for newly dropped module files
#[derive(Debug)]
pub struct ModulePoller {
    config: DiscoveryConfig,
    interval: Duration,
}

impl ModulePoller {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(config: DiscoveryConfig, interval: Duration) -> Self {
        Self { config, interval }
    }

    /// Run the poll loop until the shutdown channel fires. Each tick diffs
    /// the directory listing against the registry's discovered-file snapshot
    /// and posts fresh paths as a `ModuleFilesFound` event.
    pub fn spawn(
        self,
        registry: SharedModuleRegistry,
        tx: UnboundedSender<ShellEvent>,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick of a tokio interval fires immediately; the
            // startup scan already covered that point in time.
            ticker.tick().await;

            log::debug!(
                "Module poller started ({}s interval)",
                self.interval.as_secs_f32()
            );
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let fresh = self.fresh_files(&registry).await;
                        if !fresh.is_empty() {
                            log::info!("Poller found {} new module file(s)", fresh.len());
                            if tx.send(ShellEvent::ModuleFilesFound { paths: fresh }).is_err() {
                                // Shell is gone; nothing left to report to
                                break;
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        log::debug!("Module poller stopping");
                        break;
                    }
                }
            }
        })
    }

    async fn fresh_files(&self, registry: &SharedModuleRegistry) -> Vec<PathBuf> {
        let candidates = list_candidate_files(&self.config.search_paths);
        let discovered = registry.read().await.discovered_files_snapshot();
        candidates
            .into_iter()
            .filter(|p| !discovered.contains(p))
            .collect()
    }
}

/// Wait for the poller task with a grace period, logging an overrun instead
/// of blocking shutdown on it.
pub async fn join_with_grace(handle: JoinHandle<()>, grace: Duration) {
    match tokio::time::timeout(grace, handle).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => log::warn!("Module poller task failed: {}", err),
        Err(_) => log::warn!(
            "Module poller did not stop within {}ms; abandoning it",
            grace.as_millis()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::discovery::DYLIB_EXTENSION;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_poller_reports_fresh_files_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SharedModuleRegistry::new();
        let config = DiscoveryConfig::with_paths(vec![dir.path().to_path_buf()]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let poller = ModulePoller::with_interval(config, Duration::from_millis(20));
        let handle = poller.spawn(registry.clone(), tx, shutdown_rx);

        let path = dir.path().join(format!("libclock.{}", DYLIB_EXTENSION));
        std::fs::write(&path, b"x").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("poller should report within the timeout")
            .expect("channel open");
        match event {
            ShellEvent::ModuleFilesFound { paths } => assert_eq!(paths, vec![path]),
            other => panic!("unexpected event: {:?}", other),
        }

        shutdown_tx.send(()).unwrap();
        join_with_grace(handle, Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn test_poller_skips_already_discovered_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("libclock.{}", DYLIB_EXTENSION));
        std::fs::write(&path, b"x").unwrap();

        let registry = SharedModuleRegistry::new();
        registry.write().await.mark_file_discovered(&path);

        let config = DiscoveryConfig::with_paths(vec![dir.path().to_path_buf()]);
        let poller = ModulePoller::with_interval(config, Duration::from_millis(20));
        assert!(poller.fresh_files(&registry).await.is_empty());
    }
}
