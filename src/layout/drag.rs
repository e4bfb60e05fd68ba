//! Drag-to-Reorder Controller
//!
//! Tracks a drag that starts on a module's title-bar handle. While the drag
//! is active the handle shows a ridge border and the pane under the pointer
//! is highlighted as the drop candidate; release over a candidate moves the
//! dragged pane into that slot. Widgets can be destroyed mid-drag (module
//! closed by another event), so every step re-checks existence.

use crate::layout::host::LayoutHost;
use crate::ui::{FrameId, Relief, Toolkit};

enum DragState {
    Idle,
    Dragging {
        module_name: String,
        frame: FrameId,
        handle: FrameId,
        original_relief: Relief,
        candidate: Option<FrameId>,
    },
}

pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer pressed on a drag handle: arm the drag and mark the handle
    pub fn on_handle_press(
        &mut self,
        ui: &mut Toolkit,
        module_name: &str,
        frame: FrameId,
        handle: FrameId,
    ) {
        let original_relief = ui.relief(handle).unwrap_or(Relief::Flat);
        ui.set_relief(handle, Relief::Ridge);
        self.state = DragState::Dragging {
            module_name: module_name.to_string(),
            frame,
            handle,
            original_relief,
            candidate: None,
        };
        log::debug!("Drag started for module '{}'", module_name);
    }

    /// Pointer moved during a drag: retarget the drop candidate
    pub fn on_pointer_move(&mut self, ui: &mut Toolkit, host: &LayoutHost, x: i32, y: i32) {
        let DragState::Dragging {
            frame, candidate, ..
        } = &mut self.state
        else {
            return;
        };
        if !ui.exists(*frame) {
            // Dragged module was torn down under us; abandon the drag and
            // unmark whichever pane was the drop candidate
            if let Some(old) = candidate.take() {
                if ui.exists(old) {
                    ui.set_highlighted(old, false);
                }
            }
            self.state = DragState::Idle;
            return;
        }

        let dragged = *frame;
        let new_candidate = host
            .hit_test_pane(ui, x, y)
            .filter(|pane| *pane != dragged);
        if new_candidate == *candidate {
            return;
        }
        if let Some(old) = candidate.take() {
            ui.set_highlighted(old, false);
        }
        if let Some(new) = new_candidate {
            ui.set_highlighted(new, true);
        }
        *candidate = new_candidate;
    }

    /// Pointer released: restore visuals and, if a candidate was under the
    /// pointer, move the dragged pane into the candidate's slot. Returns
    /// whether a reorder happened.
    pub fn on_pointer_release(&mut self, ui: &mut Toolkit, host: &mut LayoutHost) -> bool {
        let DragState::Dragging {
            module_name,
            frame,
            handle,
            original_relief,
            candidate,
        } = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return false;
        };

        if ui.exists(handle) {
            ui.set_relief(handle, original_relief);
        }
        let Some(target) = candidate else {
            return false;
        };
        if ui.exists(target) {
            ui.set_highlighted(target, false);
        }
        if !ui.exists(frame) || !ui.exists(target) {
            return false;
        }

        let order = host.pane_order().to_vec();
        let Some(target_index) = order.iter().position(|p| *p == target) else {
            return false;
        };
        let mut new_order: Vec<FrameId> = order.into_iter().filter(|p| *p != frame).collect();
        new_order.insert(target_index.min(new_order.len()), frame);
        host.reorder(ui, new_order);
        log::info!("Module '{}' dropped into a new slot", module_name);
        true
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Rect;

    struct Fixture {
        ui: Toolkit,
        host: LayoutHost,
        panes: Vec<FrameId>,
        handles: Vec<FrameId>,
    }

    fn fixture(count: usize) -> Fixture {
        let mut ui = Toolkit::with_window_size(800, 600);
        let mut host = LayoutHost::new(&mut ui);
        let mut panes = Vec::new();
        let mut handles = Vec::new();
        for _ in 0..count {
            let pane = ui.create_frame(Some(host.frame()));
            let handle = ui.create_label(pane, "☰");
            host.add_pane(&mut ui, pane);
            if let Some(r) = ui.rect(pane) {
                ui.set_rect(handle, Rect::new(r.x + 5, r.y + 2, 20, 20));
            }
            panes.push(pane);
            handles.push(handle);
        }
        Fixture {
            ui,
            host,
            panes,
            handles,
        }
    }

    fn pane_center(ui: &Toolkit, pane: FrameId) -> (i32, i32) {
        let r = ui.rect(pane).unwrap();
        (r.x + r.width / 2, r.y + r.height / 2)
    }

    #[test]
    fn test_drop_moves_pane_into_target_slot() {
        let mut f = fixture(4);
        let [a, b, c, d] = [f.panes[0], f.panes[1], f.panes[2], f.panes[3]];
        let mut drag = DragController::new();

        drag.on_handle_press(&mut f.ui, "a", a, f.handles[0]);
        let (cx, cy) = pane_center(&f.ui, c);
        drag.on_pointer_move(&mut f.ui, &f.host, cx, cy);
        assert!(f.ui.is_highlighted(c));

        assert!(drag.on_pointer_release(&mut f.ui, &mut f.host));
        assert_eq!(f.host.pane_order(), &[b, c, a, d]);
        assert!(!f.ui.is_highlighted(c));
    }

    #[test]
    fn test_handle_relief_restored_after_drag() {
        let mut f = fixture(2);
        let mut drag = DragController::new();

        drag.on_handle_press(&mut f.ui, "a", f.panes[0], f.handles[0]);
        assert_eq!(f.ui.relief(f.handles[0]), Some(Relief::Ridge));

        drag.on_pointer_release(&mut f.ui, &mut f.host);
        assert_eq!(f.ui.relief(f.handles[0]), Some(Relief::Flat));
    }

    #[test]
    fn test_release_without_candidate_keeps_order() {
        let mut f = fixture(3);
        let order = f.host.pane_order().to_vec();
        let mut drag = DragController::new();

        drag.on_handle_press(&mut f.ui, "a", f.panes[0], f.handles[0]);
        // Pointer still over the dragged pane itself: no candidate
        let (ax, ay) = pane_center(&f.ui, f.panes[0]);
        drag.on_pointer_move(&mut f.ui, &f.host, ax, ay);
        assert!(!drag.on_pointer_release(&mut f.ui, &mut f.host));
        assert_eq!(f.host.pane_order(), order.as_slice());
    }

    #[test]
    fn test_drag_survives_mid_drag_teardown() {
        let mut f = fixture(3);
        let mut drag = DragController::new();

        drag.on_handle_press(&mut f.ui, "a", f.panes[0], f.handles[0]);
        f.host.remove_pane(&mut f.ui, f.panes[0]);
        f.ui.destroy(f.panes[0]);

        let (bx, by) = pane_center(&f.ui, f.panes[1]);
        drag.on_pointer_move(&mut f.ui, &f.host, bx, by);
        assert!(!drag.is_dragging());
        assert!(!drag.on_pointer_release(&mut f.ui, &mut f.host));
    }

    #[test]
    fn test_abandoned_drag_unmarks_the_candidate() {
        let mut f = fixture(3);
        let mut drag = DragController::new();

        drag.on_handle_press(&mut f.ui, "a", f.panes[0], f.handles[0]);
        let (bx, by) = pane_center(&f.ui, f.panes[1]);
        drag.on_pointer_move(&mut f.ui, &f.host, bx, by);
        assert!(f.ui.is_highlighted(f.panes[1]));

        // Dragged pane dies while the candidate is still marked
        f.host.remove_pane(&mut f.ui, f.panes[0]);
        f.ui.destroy(f.panes[0]);
        drag.on_pointer_move(&mut f.ui, &f.host, bx + 1, by);

        assert!(!drag.is_dragging());
        assert!(!f.ui.is_highlighted(f.panes[1]));
    }

    #[test]
    fn test_candidate_highlight_retargets() {
        let mut f = fixture(3);
        let mut drag = DragController::new();

        drag.on_handle_press(&mut f.ui, "a", f.panes[0], f.handles[0]);
        let (bx, by) = pane_center(&f.ui, f.panes[1]);
        drag.on_pointer_move(&mut f.ui, &f.host, bx, by);
        assert!(f.ui.is_highlighted(f.panes[1]));

        let (cx, cy) = pane_center(&f.ui, f.panes[2]);
        drag.on_pointer_move(&mut f.ui, &f.host, cx, cy);
        assert!(!f.ui.is_highlighted(f.panes[1]));
        assert!(f.ui.is_highlighted(f.panes[2]));
    }
}
