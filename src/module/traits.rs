//! Module Contract
//!
//! The trait every module type must satisfy plus the `ModuleBase` helper
//! that synthesizes the standard title bar (drag handle, title, fullscreen
//! toggle, close button) and content area inside the container the manager
//! hands out.
//!
//! Modules owning background work (tickers, subprocesses, decode tasks)
//! must start it asynchronously after construction and fully reverse it in
//! `on_destroy`; construction itself must not block.

use crate::app::events::ShellEvent;
use crate::sharedstate::SharedState;
use crate::ui::{FrameId, FrameRole, Rect, Toolkit};
use tokio::sync::mpsc::UnboundedSender;

/// Height of the synthesized title bar in pixels
pub const TITLE_BAR_HEIGHT: i32 = 25;

const DRAG_HANDLE_GLYPH: &str = "☰";
const FULLSCREEN_GLYPH: &str = "⬜";
const FULLSCREEN_EXIT_GLYPH: &str = "❐";

/// Back-reference handed to every module for calling into the shell.
///
/// All calls are posted onto the shell event channel, so a module may invoke
/// them from any task.
#[derive(Debug, Clone)]
pub struct HostHandle {
    tx: UnboundedSender<ShellEvent>,
}

impl HostHandle {
    pub fn new(tx: UnboundedSender<ShellEvent>) -> Self {
        Self { tx }
    }

    /// Enter or leave fullscreen for the named module
    pub fn toggle_fullscreen(&self, module_name: &str) {
        let _ = self.tx.send(ShellEvent::ToggleFullscreen {
            name: module_name.to_string(),
        });
    }

    /// Close the named module (title-bar close button)
    pub fn hide(&self, module_name: &str) {
        let _ = self.tx.send(ShellEvent::HideModule {
            name: module_name.to_string(),
        });
    }

    /// Ask the shell to call the module's `refresh` hook
    pub fn request_refresh(&self, module_name: &str) {
        let _ = self.tx.send(ShellEvent::RefreshModule {
            name: module_name.to_string(),
        });
    }
}

/// Construction context passed to a module factory
pub struct ModuleInit<'a> {
    /// Widget toolkit, valid for the duration of construction
    pub ui: &'a mut Toolkit,
    /// Container the module populates; owned by the lifecycle manager
    pub frame: FrameId,
    /// Shared logging/config collaborator
    pub shared_state: SharedState,
    /// Registry name of this module
    pub module_name: String,
    /// Back-reference into the shell
    pub host: HostHandle,
}

/// The contract every module satisfies.
///
/// The shell calls `create_ui` once after construction, `on_resize` whenever
/// the pane geometry changes, `refresh` when the module requested a repaint,
/// and `on_destroy` exactly once before the container is torn down.
pub trait Module: Send {
    fn base(&self) -> &ModuleBase;
    fn base_mut(&mut self) -> &mut ModuleBase;

    fn name(&self) -> &str {
        &self.base().module_name
    }

    /// Root container of this module
    fn frame(&self) -> FrameId {
        self.base().frame
    }

    /// Build module-specific widgets. The default renders a placeholder.
    fn create_ui(&mut self, ui: &mut Toolkit) {
        self.base().render_placeholder(ui);
        self.base().shared_state.log(
            &format!(
                "Module '{}' UI created (default implementation)",
                self.base().module_name
            ),
            log::Level::Info,
        );
    }

    /// Repaint hook, driven by `HostHandle::request_refresh`
    fn refresh(&mut self, _ui: &mut Toolkit) {}

    /// Pane geometry changed; default re-lays the title bar
    fn on_resize(&mut self, ui: &mut Toolkit) {
        self.base().layout_chrome(ui);
    }

    /// Called exactly once before teardown; cancel any background work here
    fn on_destroy(&mut self, _ui: &mut Toolkit) {
        self.base().shared_state.log(
            &format!("Module '{}' is being destroyed", self.base().module_name),
            log::Level::Info,
        );
    }
}

/// Standard title bar plus content area, built inside the manager-provided
/// container. Module implementations embed this and put their widgets into
/// [`ModuleBase::content`].
#[derive(Debug)]
pub struct ModuleBase {
    pub module_name: String,
    pub frame: FrameId,
    pub shared_state: SharedState,
    pub host: HostHandle,
    pub content: FrameId,
    title_bar: FrameId,
    drag_handle: FrameId,
    title_label: FrameId,
    fullscreen_button: FrameId,
    close_button: FrameId,
}

impl ModuleBase {
    /// Consume the construction context and synthesize the title bar
    pub fn new(init: ModuleInit<'_>) -> Self {
        let ModuleInit {
            ui,
            frame,
            shared_state,
            module_name,
            host,
        } = init;

        let title_bar = ui.create_frame(Some(frame));
        let drag_handle = ui.create_label(title_bar, DRAG_HANDLE_GLYPH);
        ui.set_role(
            drag_handle,
            FrameRole::DragHandle {
                module: module_name.clone(),
            },
        );
        let title_label = ui.create_label(title_bar, &module_name);
        let fullscreen_button = ui.create_button(title_bar, FULLSCREEN_GLYPH);
        ui.set_role(
            fullscreen_button,
            FrameRole::FullscreenToggle {
                module: module_name.clone(),
            },
        );
        let close_button = ui.create_button(title_bar, "X");
        ui.set_role(
            close_button,
            FrameRole::CloseButton {
                module: module_name.clone(),
            },
        );
        let content = ui.create_frame(Some(frame));

        let base = Self {
            module_name,
            frame,
            shared_state,
            host,
            content,
            title_bar,
            drag_handle,
            title_label,
            fullscreen_button,
            close_button,
        };
        base.layout_chrome(ui);
        base.shared_state.log(
            &format!("Module '{}' initialized with title bar", base.module_name),
            log::Level::Info,
        );
        base
    }

    /// Position the title-bar widgets and content area inside the current
    /// container rect. Called after every pane placement change.
    pub fn layout_chrome(&self, ui: &mut Toolkit) {
        let Some(r) = ui.rect(self.frame) else {
            return;
        };
        ui.set_rect(self.title_bar, Rect::new(r.x, r.y, r.width, TITLE_BAR_HEIGHT));
        ui.set_rect(self.drag_handle, Rect::new(r.x + 5, r.y + 2, 20, 20));
        ui.set_rect(
            self.title_label,
            Rect::new(r.x + 30, r.y + 2, (r.width - 90).max(0), 20),
        );
        ui.set_rect(
            self.fullscreen_button,
            Rect::new(r.x + r.width - 56, r.y + 2, 24, 20),
        );
        ui.set_rect(
            self.close_button,
            Rect::new(r.x + r.width - 28, r.y + 2, 24, 20),
        );
        ui.set_rect(
            self.content,
            Rect::new(
                r.x,
                r.y + TITLE_BAR_HEIGHT + 2,
                r.width,
                (r.height - TITLE_BAR_HEIGHT - 2).max(0),
            ),
        );
    }

    /// Default content for modules that do not build their own UI
    pub fn render_placeholder(&self, ui: &mut Toolkit) {
        let label = ui.create_label(
            self.content,
            &format!("Default content for {}", self.module_name),
        );
        if let Some(r) = ui.rect(self.content) {
            ui.set_rect(label, Rect::new(r.x + 10, r.y + 10, (r.width - 20).max(0), 20));
        }
    }

    /// Flip the fullscreen toggle between enter and exit indication
    pub fn set_fullscreen_indicator(&self, ui: &mut Toolkit, active: bool) {
        let glyph = if active {
            FULLSCREEN_EXIT_GLYPH
        } else {
            FULLSCREEN_GLYPH
        };
        ui.set_text(self.fullscreen_button, glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn make_base(ui: &mut Toolkit) -> ModuleBase {
        let (tx, _rx) = mpsc::unbounded_channel();
        let frame = ui.create_frame(None);
        ui.set_rect(frame, Rect::new(0, 0, 200, 150));
        ModuleBase::new(ModuleInit {
            ui,
            frame,
            shared_state: SharedState::in_memory(),
            module_name: "clock".to_string(),
            host: HostHandle::new(tx),
        })
    }

    #[test]
    fn test_base_synthesizes_title_bar_roles() {
        let mut ui = Toolkit::new();
        let base = make_base(&mut ui);

        let handles = ui.frames_with_role(|r| {
            matches!(r, FrameRole::DragHandle { module } if module == "clock")
        });
        assert_eq!(handles.len(), 1);

        let toggles = ui.frames_with_role(|r| {
            matches!(r, FrameRole::FullscreenToggle { module } if module == "clock")
        });
        assert_eq!(toggles.len(), 1);
        assert_eq!(ui.text(toggles[0]), Some("⬜"));

        base.set_fullscreen_indicator(&mut ui, true);
        assert_eq!(ui.text(toggles[0]), Some("❐"));
    }

    #[test]
    fn test_chrome_follows_container() {
        let mut ui = Toolkit::new();
        let base = make_base(&mut ui);

        ui.set_rect(base.frame, Rect::new(400, 0, 200, 150));
        base.layout_chrome(&mut ui);

        let handle_rect = ui
            .rect(
                ui.frames_with_role(|r| matches!(r, FrameRole::DragHandle { .. }))[0],
            )
            .unwrap();
        assert_eq!(handle_rect.x, 405);
    }

    #[test]
    fn test_host_handle_posts_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let host = HostHandle::new(tx);
        host.toggle_fullscreen("clock");
        host.hide("clock");
        host.request_refresh("clock");

        assert!(matches!(
            rx.try_recv().unwrap(),
            ShellEvent::ToggleFullscreen { name } if name == "clock"
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            ShellEvent::HideModule { name } if name == "clock"
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            ShellEvent::RefreshModule { name } if name == "clock"
        ));
    }
}
