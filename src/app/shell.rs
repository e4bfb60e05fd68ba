//! Shell Event Loop
//!
//! Owns the widget toolkit, the layout host, the module manager and the
//! interaction controllers, and drives them from a single event channel.
//! Everything that mutates the widget tree or the registries goes through
//! `handle_event`, which gives the whole UI a serialized execution context.

use crate::app::events::{PointerButton, ShellEvent};
use crate::layout::drag::DragController;
use crate::layout::fullscreen::FullscreenController;
use crate::layout::host::LayoutHost;
use crate::layout::persistence::{LayoutDescriptor, LayoutPersistence};
use crate::module::api::{
    process_module_files, HostHandle, ModuleError, ModuleManager, ModuleResult,
    SharedModuleRegistry, DEFAULT_LAYOUT_MODULES,
};
use crate::sharedstate::SharedState;
use crate::ui::{build_context_menu, FrameId, FrameRole, MenuEntry, Toolkit};
use tokio::sync::broadcast;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub struct Shell {
    ui: Toolkit,
    shared_state: SharedState,
    registry: SharedModuleRegistry,
    manager: ModuleManager,
    host: LayoutHost,
    drag: DragController,
    fullscreen: FullscreenController,
    persistence: LayoutPersistence,
    tx: UnboundedSender<ShellEvent>,
    rx: UnboundedReceiver<ShellEvent>,
    context_menu: Vec<MenuEntry>,
}

impl Shell {
    pub fn new(
        mut ui: Toolkit,
        shared_state: SharedState,
        registry: SharedModuleRegistry,
        persistence: LayoutPersistence,
    ) -> Self {
        let host = LayoutHost::new(&mut ui);
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            ui,
            shared_state,
            registry,
            manager: ModuleManager::new(),
            host,
            drag: DragController::new(),
            fullscreen: FullscreenController::new(),
            persistence,
            tx,
            rx,
            context_menu: Vec::new(),
        }
    }

    /// Sender half of the event channel, for the poller and front-end
    pub fn sender(&self) -> UnboundedSender<ShellEvent> {
        self.tx.clone()
    }

    fn host_handle(&self) -> HostHandle {
        HostHandle::new(self.tx.clone())
    }

    /// Consume events until shutdown is requested or the channel closes
    pub async fn run(&mut self, mut shutdown_rx: broadcast::Receiver<()>) {
        loop {
            // The receive future must be dropped before handle_event can
            // take the whole shell again
            let event = tokio::select! {
                event = self.rx.recv() => event,
                _ = shutdown_rx.recv() => {
                    log::debug!("Shell loop stopping on shutdown signal");
                    break;
                }
            };
            match event {
                Some(event) => {
                    if !self.handle_event(event).await {
                        break;
                    }
                }
                None => break,
            }
        }
    }

    /// Process one event. Returns false when the shell should stop.
    pub async fn handle_event(&mut self, event: ShellEvent) -> bool {
        match event {
            ShellEvent::PointerPressed { x, y, button } => {
                self.on_pointer_pressed(x, y, button).await;
            }
            ShellEvent::PointerMoved { x, y } => {
                self.drag.on_pointer_move(&mut self.ui, &self.host, x, y);
            }
            ShellEvent::PointerReleased { .. } => {
                self.drag.on_pointer_release(&mut self.ui, &mut self.host);
            }
            ShellEvent::WindowResized { width, height } => {
                self.ui.set_window_size(width, height);
                self.sync_geometry();
            }
            ShellEvent::SashMoved { index, position } => {
                self.host.set_sash_position(&mut self.ui, index, position);
                self.manager.resize_all(&mut self.ui);
            }
            ShellEvent::ShowModule { name } => {
                if let Err(err) = self.show_module(&name).await {
                    log::warn!("Show failed: {}", err);
                }
            }
            ShellEvent::HideModule { name } => {
                self.hide_module(&name);
            }
            ShellEvent::ToggleFullscreen { name } => {
                if let Err(err) = self.toggle_fullscreen(&name) {
                    log::warn!("Fullscreen toggle failed: {}", err);
                }
            }
            ShellEvent::RefreshModule { name } => {
                self.manager.refresh(&name, &mut self.ui);
            }
            ShellEvent::MenuActivated { entry } => {
                self.on_menu_activated(entry).await;
            }
            ShellEvent::ModuleFilesFound { paths } => {
                let registered = process_module_files(paths, &self.registry).await;
                if registered > 0 {
                    log::info!("{} module class(es) registered from new files", registered);
                }
            }
            ShellEvent::Shutdown => return false,
        }
        true
    }

    async fn on_pointer_pressed(&mut self, x: i32, y: i32, button: PointerButton) {
        if button == PointerButton::Right {
            self.open_context_menu().await;
            return;
        }

        let Some((frame_id, role)) = self.ui.hit_test_role(x, y) else {
            return;
        };
        // Widgets of panes hidden behind the current window content keep
        // their stale rects; only the visible subtree may take presses
        if let Some(content) = self.ui.window_content() {
            if !self.ui.is_descendant_of(frame_id, content) {
                return;
            }
        }
        match role {
            FrameRole::DragHandle { module } => {
                if self.fullscreen.is_active() {
                    // Fullscreen hides the row; there is nothing to reorder
                    return;
                }
                if let Some(pane) = self.manager.frame_for(&module) {
                    self.drag
                        .on_handle_press(&mut self.ui, &module, pane, frame_id);
                }
            }
            FrameRole::FullscreenToggle { module } => {
                if let Err(err) = self.toggle_fullscreen(&module) {
                    log::warn!("Fullscreen toggle failed: {}", err);
                }
            }
            FrameRole::CloseButton { module } => {
                self.hide_module(&module);
            }
            FrameRole::Placeholder | FrameRole::None => {}
        }
    }

    /// Rebuild the context-menu model from the current registries
    async fn open_context_menu(&mut self) {
        let registered = self.registry.read().await.class_names();
        self.context_menu = build_context_menu(
            &registered,
            &self.manager.live_name_set(),
            self.fullscreen.is_active(),
        );
    }

    /// The entry list built by the last right-click
    pub fn context_menu(&self) -> &[MenuEntry] {
        &self.context_menu
    }

    async fn on_menu_activated(&mut self, entry: MenuEntry) {
        match entry {
            MenuEntry::ToggleModule { name, .. } => {
                if self.manager.is_live(&name) {
                    self.hide_module(&name);
                } else if let Err(err) = self.show_module(&name).await {
                    log::warn!("Menu show failed: {}", err);
                }
            }
            MenuEntry::ExitFullscreen => {
                self.fullscreen.exit(&mut self.ui, &mut self.host);
                self.manager.resize_all(&mut self.ui);
            }
        }
    }

    /// Instantiate a registered module into a new pane
    pub async fn show_module(&mut self, name: &str) -> ModuleResult<Option<FrameId>> {
        let class = self
            .registry
            .read()
            .await
            .get(name)
            .ok_or_else(|| ModuleError::UnknownModule {
                module_name: name.to_string(),
            })?;
        let handle = self.host_handle();
        let frame = self.manager.show(
            &class,
            &mut self.ui,
            &mut self.host,
            &self.shared_state,
            &handle,
        );
        if frame.is_some() {
            self.manager.resize_all(&mut self.ui);
        }
        Ok(frame)
    }

    /// Tear down a live module; unknown or hidden names are a no-op
    pub fn hide_module(&mut self, name: &str) {
        self.manager
            .hide(name, &mut self.ui, &mut self.host, &mut self.fullscreen);
        self.manager.resize_all(&mut self.ui);
    }

    /// Enter fullscreen for a live module, or leave it if it already holds
    /// the window
    pub fn toggle_fullscreen(&mut self, name: &str) -> ModuleResult<()> {
        if self.fullscreen.current() == Some(name) {
            self.fullscreen.exit(&mut self.ui, &mut self.host);
            self.manager.resize_all(&mut self.ui);
            return Ok(());
        }
        let frame = self
            .manager
            .frame_for(name)
            .ok_or_else(|| ModuleError::ModuleNotLive {
                module_name: name.to_string(),
            })?;
        self.fullscreen
            .enter(&mut self.ui, &mut self.host, name, frame);
        self.manager.resize_all(&mut self.ui);
        Ok(())
    }

    /// Snapshot the arrangement and write the layout file
    pub fn save_layout(&self) {
        let descriptor =
            LayoutPersistence::capture(&self.host, &self.manager, &self.fullscreen);
        self.persistence.save(&descriptor);
    }

    /// Restore the saved layout onto a clean slate. Unknown saved modules
    /// are skipped with a warning; if nothing ends up shown the default
    /// layout takes over so the window never comes up blank.
    pub async fn load_layout(&mut self) {
        let descriptor = self.persistence.load();
        self.manager
            .teardown_all(&mut self.ui, &mut self.host, &mut self.fullscreen);

        if let Some(descriptor) = descriptor {
            self.apply_descriptor(descriptor).await;
        }

        if self.manager.live_count() == 0 {
            log::info!("No usable saved layout; showing the default modules");
            self.default_layout().await;
        }
    }

    async fn apply_descriptor(&mut self, descriptor: LayoutDescriptor) {
        if let Some(paned) = descriptor.paned_window_layout {
            for entry in &paned.modules {
                match self.show_module(&entry.module_name).await {
                    Ok(Some(_)) => {}
                    Ok(None) => {}
                    Err(err) => log::warn!("Skipping saved module: {}", err),
                }
            }
            self.host
                .restore_sashes(&mut self.ui, &paned.sash_positions);
            self.manager.resize_all(&mut self.ui);
        }

        if let Some(name) = descriptor.fullscreen_module {
            if !self.manager.is_live(&name) {
                match self.show_module(&name).await {
                    Ok(_) => {}
                    Err(err) => log::warn!("Skipping saved fullscreen module: {}", err),
                }
            }
            match self.toggle_fullscreen(&name) {
                Ok(()) => {}
                Err(err) => log::warn!("Could not restore fullscreen: {}", err),
            }
        }
    }

    /// Show the built-in default module set
    pub async fn default_layout(&mut self) {
        for name in DEFAULT_LAYOUT_MODULES {
            if let Err(err) = self.show_module(name).await {
                log::warn!("Default module '{}' unavailable: {}", name, err);
            }
        }
    }

    /// Re-place everything after a window geometry change
    fn sync_geometry(&mut self) {
        if self.fullscreen.is_active() {
            self.fullscreen.sync_geometry(&mut self.ui);
        } else {
            self.host.relayout(&mut self.ui);
        }
        self.manager.resize_all(&mut self.ui);
    }

    /// Destroy every live module, running their destroy hooks
    pub fn teardown(&mut self) {
        self.manager
            .teardown_all(&mut self.ui, &mut self.host, &mut self.fullscreen);
    }

    pub fn toolkit(&self) -> &Toolkit {
        &self.ui
    }

    pub fn layout_host(&self) -> &LayoutHost {
        &self.host
    }

    pub fn module_manager(&self) -> &ModuleManager {
        &self.manager
    }

    pub fn fullscreen_module(&self) -> Option<&str> {
        self.fullscreen.current()
    }

    pub fn registry(&self) -> &SharedModuleRegistry {
        &self.registry
    }
}
