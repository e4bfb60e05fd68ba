//! Fullscreen Controller
//!
//! Swaps one module's pane in as the window content, hiding the paned row
//! without destroying it. Entering fullscreen while another module holds it
//! hands the window over; exiting restores the paned row exactly as it was.

use crate::layout::host::LayoutHost;
use crate::ui::{FrameId, FrameRole, Rect, Toolkit};

const FULLSCREEN_GLYPH: &str = "⬜";
const FULLSCREEN_EXIT_GLYPH: &str = "❐";

enum FullscreenState {
    Normal,
    Fullscreen { module_name: String, frame: FrameId },
}

pub struct FullscreenController {
    state: FullscreenState,
}

impl FullscreenController {
    pub fn new() -> Self {
        Self {
            state: FullscreenState::Normal,
        }
    }

    /// Name of the fullscreen module, if one holds the window
    pub fn current(&self) -> Option<&str> {
        match &self.state {
            FullscreenState::Normal => None,
            FullscreenState::Fullscreen { module_name, .. } => Some(module_name),
        }
    }

    pub fn is_active(&self) -> bool {
        self.current().is_some()
    }

    /// Give the named module's pane the whole window. If another module is
    /// already fullscreen it is restored first, so the handover never leaves
    /// the window empty.
    pub fn enter(
        &mut self,
        ui: &mut Toolkit,
        host: &mut LayoutHost,
        module_name: &str,
        frame: FrameId,
    ) {
        if self.is_active() {
            self.exit(ui, host);
        }

        ui.set_window_content(Some(frame));
        let (w, h) = ui.window_size();
        ui.set_rect(frame, Rect::new(0, 0, w, h));
        set_toggle_glyph(ui, module_name, FULLSCREEN_EXIT_GLYPH);
        self.state = FullscreenState::Fullscreen {
            module_name: module_name.to_string(),
            frame,
        };
        log::info!("Module '{}' entered fullscreen", module_name);
    }

    /// Restore the paned row as the window content. A no-op when nothing is
    /// fullscreen.
    pub fn exit(&mut self, ui: &mut Toolkit, host: &mut LayoutHost) {
        let FullscreenState::Fullscreen { module_name, .. } =
            std::mem::replace(&mut self.state, FullscreenState::Normal)
        else {
            return;
        };

        set_toggle_glyph(ui, &module_name, FULLSCREEN_GLYPH);
        ui.set_window_content(Some(host.frame()));
        host.relayout(ui);
        log::info!("Module '{}' left fullscreen", module_name);
    }

    /// Re-place the fullscreen frame after a window resize
    pub fn sync_geometry(&self, ui: &mut Toolkit) {
        if let FullscreenState::Fullscreen { frame, .. } = &self.state {
            let (w, h) = ui.window_size();
            ui.set_rect(*frame, Rect::new(0, 0, w, h));
        }
    }
}

impl Default for FullscreenController {
    fn default() -> Self {
        Self::new()
    }
}

fn set_toggle_glyph(ui: &mut Toolkit, module_name: &str, glyph: &str) {
    let toggles = ui.frames_with_role(|r| {
        matches!(r, FrameRole::FullscreenToggle { module } if module == module_name)
    });
    for toggle in toggles {
        ui.set_text(toggle, glyph);
    }
}
