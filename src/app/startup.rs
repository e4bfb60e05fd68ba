//! Application startup
//!
//! Wires the whole shell together: logging, the shared config store, the
//! module registry with built-ins and a first directory scan, layout
//! restore, the discovery poller, and the event loop under shutdown
//! coordination. On the way out the layout is saved and every live module
//! torn down before the poller is reaped.

use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownCoordinator;
use crate::layout::persistence::{LayoutPersistence, LAYOUT_FILE};
use crate::module::api::{
    join_with_grace, register_builtins, scan_once, DiscoveryConfig, ModulePoller,
    SharedModuleRegistry, DEFAULT_POLL_INTERVAL, POLL_STOP_GRACE,
};
use crate::sharedstate::{SharedState, SHARED_CONFIG_FILE};
use crate::ui::Toolkit;
use std::io::IsTerminal;

/// Initialize and run the shell until shutdown
pub fn startup() {
    let use_color =
        std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let log_level = std::env::var("MODSHELL_LOG").ok();
    if let Err(err) = init_logging(log_level.as_deref(), use_color) {
        eprintln!("modshell: could not initialise logging: {}", err);
    }
    log::info!(
        "modshell starting (module API {})",
        crate::get_module_api_version()
    );

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("Could not start async runtime: {}", err);
            std::process::exit(1);
        }
    };

    runtime.block_on(async {
        let result: Result<(), std::convert::Infallible> =
            ShutdownCoordinator::guard_with_coordinator(|coordinator, shutdown_rx| async move {
                run_shell(coordinator, shutdown_rx).await;
                Ok(())
            })
            .await;
        let _ = result;
    });
    log::info!("modshell stopped");
}

async fn run_shell(
    coordinator: ShutdownCoordinator,
    shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) {
    let shared_state = SharedState::open(SHARED_CONFIG_FILE);
    let registry = SharedModuleRegistry::new();
    register_builtins(&registry).await;

    let discovery = DiscoveryConfig::default();
    let registered = scan_once(&discovery, &registry).await;
    log::info!(
        "Startup scan registered {} external module class(es)",
        registered
    );

    let persistence = LayoutPersistence::new(LAYOUT_FILE);
    let mut shell = crate::app::shell::Shell::new(
        Toolkit::new(),
        shared_state,
        registry.clone(),
        persistence,
    );
    shell.load_layout().await;

    let poller = ModulePoller::new(discovery);
    let poller_handle = poller.spawn(registry, shell.sender(), coordinator.subscribe());

    shell.run(shutdown_rx).await;

    shell.save_layout();
    shell.teardown();

    coordinator.trigger_shutdown();
    join_with_grace(poller_handle, DEFAULT_POLL_INTERVAL + POLL_STOP_GRACE).await;
}
