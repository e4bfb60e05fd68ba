//! Module Lifecycle Manager
//!
//! Instantiates module classes into host panes and tears them down again.
//! At most one live instance exists per module name; show followed by hide
//! followed by show produces a brand new instance with no state carried
//! over. The manager owns the live instances; the layout host owns where
//! their containers sit.

use crate::layout::fullscreen::FullscreenController;
use crate::layout::host::LayoutHost;
use crate::module::traits::{HostHandle, Module, ModuleInit};
use crate::module::types::ModuleClass;
use crate::sharedstate::SharedState;
use crate::ui::{FrameId, Relief, Toolkit};
use std::collections::{HashMap, HashSet};

/// One shown module instance
struct LiveModule {
    instance: Box<dyn Module>,
    frame: FrameId,
}

/// Registry of live module instances keyed by module name
#[derive(Default)]
pub struct ModuleManager {
    live: HashMap<String, LiveModule>,
}

impl ModuleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate a class into a new host pane. Returns the pane container
    /// on success; a factory failure is logged, the partial container torn
    /// down, and `None` returned so the shell keeps running. A name that is
    /// already live is not instantiated again; the existing pane is returned.
    pub fn show(
        &mut self,
        class: &ModuleClass,
        ui: &mut Toolkit,
        host: &mut LayoutHost,
        shared_state: &SharedState,
        host_handle: &HostHandle,
    ) -> Option<FrameId> {
        if let Some(live) = self.live.get(&class.name) {
            // At most one live instance per name; a duplicate show keeps
            // the existing instance untouched
            log::warn!(
                "Module '{}' is already shown; ignoring duplicate show",
                class.name
            );
            return Some(live.frame);
        }

        let frame = ui.create_frame(Some(host.frame()));
        ui.set_relief(frame, Relief::Sunken);

        let init = ModuleInit {
            ui,
            frame,
            shared_state: shared_state.clone(),
            module_name: class.name.clone(),
            host: host_handle.clone(),
        };
        let mut instance = match (class.factory)(init) {
            Ok(instance) => instance,
            Err(err) => {
                log::error!("Failed to instantiate module '{}': {}", class.name, err);
                ui.destroy(frame);
                return None;
            }
        };

        host.add_pane(ui, frame);
        instance.create_ui(ui);
        instance.on_resize(ui);
        log::info!("Module '{}' shown", class.name);

        self.live
            .insert(class.name.clone(), LiveModule { instance, frame });
        Some(frame)
    }

    /// Tear down a live instance: exit fullscreen if it holds it, run the
    /// destroy hook once, detach the pane, destroy the widgets. A name with
    /// no live instance is a no-op.
    pub fn hide(
        &mut self,
        name: &str,
        ui: &mut Toolkit,
        host: &mut LayoutHost,
        fullscreen: &mut FullscreenController,
    ) {
        let Some(mut live) = self.live.remove(name) else {
            log::debug!("Hide requested for '{}' which is not shown", name);
            return;
        };

        if fullscreen.current() == Some(name) {
            fullscreen.exit(ui, host);
        }

        live.instance.on_destroy(ui);
        host.remove_pane(ui, live.frame);
        ui.destroy(live.frame);
        log::info!("Module '{}' hidden", name);
    }

    /// Destroy every live instance; used on shutdown and before restoring a
    /// saved layout onto a clean slate.
    pub fn teardown_all(
        &mut self,
        ui: &mut Toolkit,
        host: &mut LayoutHost,
        fullscreen: &mut FullscreenController,
    ) {
        let names: Vec<String> = self.live.keys().cloned().collect();
        for name in names {
            self.hide(&name, ui, host, fullscreen);
        }
    }

    /// Run the repaint hook of a live module
    pub fn refresh(&mut self, name: &str, ui: &mut Toolkit) {
        if let Some(live) = self.live.get_mut(name) {
            live.instance.refresh(ui);
        }
    }

    /// Propagate a geometry change to every live module
    pub fn resize_all(&mut self, ui: &mut Toolkit) {
        for live in self.live.values_mut() {
            live.instance.on_resize(ui);
        }
    }

    pub fn is_live(&self, name: &str) -> bool {
        self.live.contains_key(name)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Sorted names of every live module
    pub fn live_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.live.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn live_name_set(&self) -> HashSet<String> {
        self.live.keys().cloned().collect()
    }

    pub fn frame_for(&self, name: &str) -> Option<FrameId> {
        self.live.get(name).map(|l| l.frame)
    }

    /// Reverse lookup from a pane container to its module name
    pub fn module_name_for_frame(&self, frame: FrameId) -> Option<&str> {
        self.live
            .iter()
            .find(|(_, l)| l.frame == frame)
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::error::{ModuleError, ModuleResult};
    use crate::module::traits::ModuleBase;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    static DESTROY_COUNT: AtomicUsize = AtomicUsize::new(0);

    struct ProbeModule {
        base: ModuleBase,
    }

    impl Module for ProbeModule {
        fn base(&self) -> &ModuleBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ModuleBase {
            &mut self.base
        }
        fn on_destroy(&mut self, _ui: &mut Toolkit) {
            DESTROY_COUNT.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn probe_factory(init: ModuleInit<'_>) -> ModuleResult<Box<dyn Module>> {
        Ok(Box::new(ProbeModule {
            base: ModuleBase::new(init),
        }))
    }

    fn failing_factory(init: ModuleInit<'_>) -> ModuleResult<Box<dyn Module>> {
        let name = init.module_name.clone();
        Err(ModuleError::InstantiationError {
            module_name: name,
            cause: "probe failure".to_string(),
        })
    }

    fn fixture() -> (Toolkit, LayoutHost, FullscreenController, HostHandle) {
        let mut ui = Toolkit::new();
        ui.set_window_size(800, 600);
        let host = LayoutHost::new(&mut ui);
        let (tx, _rx) = mpsc::unbounded_channel();
        (ui, host, FullscreenController::new(), HostHandle::new(tx))
    }

    #[test]
    fn test_show_then_hide_is_fresh_each_time() {
        let (mut ui, mut host, mut fullscreen, handle) = fixture();
        let mut manager = ModuleManager::new();
        let shared = SharedState::in_memory();
        let class = ModuleClass::builtin("probe", probe_factory);

        let first = manager
            .show(&class, &mut ui, &mut host, &shared, &handle)
            .unwrap();
        assert!(manager.is_live("probe"));

        let before = DESTROY_COUNT.load(Ordering::SeqCst);
        manager.hide("probe", &mut ui, &mut host, &mut fullscreen);
        assert_eq!(DESTROY_COUNT.load(Ordering::SeqCst), before + 1);
        assert!(!manager.is_live("probe"));
        assert!(!ui.exists(first));

        let second = manager
            .show(&class, &mut ui, &mut host, &shared, &handle)
            .unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_failed_factory_leaves_no_trace() {
        let (mut ui, mut host, _fullscreen, handle) = fixture();
        let mut manager = ModuleManager::new();
        let shared = SharedState::in_memory();
        let class = ModuleClass::builtin("broken", failing_factory);

        let frames_before = ui.frame_count();
        let panes_before = host.pane_count();
        assert!(manager
            .show(&class, &mut ui, &mut host, &shared, &handle)
            .is_none());
        assert!(!manager.is_live("broken"));
        assert_eq!(host.pane_count(), panes_before);
        assert_eq!(ui.frame_count(), frames_before);
    }

    #[test]
    fn test_duplicate_show_keeps_the_existing_instance() {
        let (mut ui, mut host, _fullscreen, handle) = fixture();
        let mut manager = ModuleManager::new();
        let shared = SharedState::in_memory();
        let class = ModuleClass::builtin("probe", probe_factory);

        let first = manager
            .show(&class, &mut ui, &mut host, &shared, &handle)
            .unwrap();
        let destroys_before = DESTROY_COUNT.load(Ordering::SeqCst);

        let second = manager
            .show(&class, &mut ui, &mut host, &shared, &handle)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(manager.live_count(), 1);
        assert_eq!(host.pane_count(), 1);
        // The original instance was neither destroyed nor orphaned
        assert_eq!(DESTROY_COUNT.load(Ordering::SeqCst), destroys_before);
        assert_eq!(manager.module_name_for_frame(first), Some("probe"));
    }

    #[test]
    fn test_hide_unknown_is_noop() {
        let (mut ui, mut host, mut fullscreen, _handle) = fixture();
        let mut manager = ModuleManager::new();
        manager.hide("ghost", &mut ui, &mut host, &mut fullscreen);
        assert_eq!(manager.live_count(), 0);
    }

    #[test]
    fn test_frame_lookup_both_ways() {
        let (mut ui, mut host, _fullscreen, handle) = fixture();
        let mut manager = ModuleManager::new();
        let shared = SharedState::in_memory();
        let class = ModuleClass::builtin("probe", probe_factory);

        let frame = manager
            .show(&class, &mut ui, &mut host, &shared, &handle)
            .unwrap();
        assert_eq!(manager.frame_for("probe"), Some(frame));
        assert_eq!(manager.module_name_for_frame(frame), Some("probe"));
    }
}
