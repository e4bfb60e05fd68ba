//! Paned Layout Host
//!
//! A single horizontal row of module panes separated by movable sashes.
//! The host owns pane ordering and sash positions; pane membership changes
//! reset the sashes to equal widths, while pure reorders keep them. An
//! empty host shows a placeholder prompt instead of a blank window.

use crate::ui::{FrameId, FrameRole, Rect, Toolkit};

/// Narrowest a pane can be squeezed by a sash move
const MIN_PANE_WIDTH: i32 = 10;

const PLACEHOLDER_TEXT: &str = "No modules loaded - right-click to add";

/// Horizontal paned container filling the window
pub struct LayoutHost {
    frame: FrameId,
    panes: Vec<FrameId>,
    sashes: Vec<i32>,
    placeholder: Option<FrameId>,
}

impl LayoutHost {
    pub fn new(ui: &mut Toolkit) -> Self {
        let frame = ui.create_frame(None);
        let (w, h) = ui.window_size();
        ui.set_rect(frame, Rect::new(0, 0, w, h));
        ui.set_window_content(Some(frame));

        let mut host = Self {
            frame,
            panes: Vec::new(),
            sashes: Vec::new(),
            placeholder: None,
        };
        host.show_placeholder(ui);
        host
    }

    /// Root container of the paned row
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// Append a pane at the right edge. Membership changed, so sashes reset
    /// to equal widths.
    pub fn add_pane(&mut self, ui: &mut Toolkit, pane: FrameId) {
        self.clear_placeholder(ui);
        self.panes.push(pane);
        self.reset_sashes_equal(ui);
        self.relayout(ui);
    }

    /// Detach a pane (without destroying it). Membership changed, so sashes
    /// reset; an emptied host shows the placeholder again.
    pub fn remove_pane(&mut self, ui: &mut Toolkit, pane: FrameId) {
        let before = self.panes.len();
        self.panes.retain(|p| *p != pane);
        if self.panes.len() == before {
            return;
        }
        self.reset_sashes_equal(ui);
        if self.panes.is_empty() {
            self.show_placeholder(ui);
        } else {
            self.relayout(ui);
        }
    }

    /// Reassign pane order without changing membership. Sash positions are
    /// kept, so panes swap slots while the column widths stay put.
    pub fn reorder(&mut self, ui: &mut Toolkit, new_order: Vec<FrameId>) {
        let mut expected = self.panes.clone();
        let mut proposed = new_order.clone();
        expected.sort();
        proposed.sort();
        if expected != proposed {
            log::warn!("Rejecting pane reorder that is not a permutation");
            return;
        }
        self.panes = new_order;
        self.relayout(ui);
    }

    pub fn pane_order(&self) -> &[FrameId] {
        &self.panes
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Current sash positions, left to right, in window x coordinates
    pub fn sash_positions(&self) -> Vec<i32> {
        self.sashes.clone()
    }

    pub fn get_sash_position(&self, index: usize) -> Option<i32> {
        self.sashes.get(index).copied()
    }

    /// Move one sash. An index with no sash is logged and ignored; a
    /// position that would crush a neighbour pane is clamped.
    pub fn set_sash_position(&mut self, ui: &mut Toolkit, index: usize, position: i32) {
        if index >= self.sashes.len() {
            log::warn!(
                "Ignoring sash move at index {} ({} sashes exist)",
                index,
                self.sashes.len()
            );
            return;
        }
        let (w, _) = ui.window_size();
        let left_bound = if index == 0 { 0 } else { self.sashes[index - 1] };
        let right_bound = if index + 1 < self.sashes.len() {
            self.sashes[index + 1]
        } else {
            w
        };
        let lower = left_bound + MIN_PANE_WIDTH;
        let upper = right_bound - MIN_PANE_WIDTH;
        self.sashes[index] = position.clamp(lower, upper.max(lower));
        self.relayout(ui);
    }

    /// Place every pane according to the current order, sash positions and
    /// window size.
    pub fn relayout(&mut self, ui: &mut Toolkit) {
        let (w, h) = ui.window_size();
        ui.set_rect(self.frame, Rect::new(0, 0, w, h));
        if self.panes.is_empty() {
            if let Some(placeholder) = self.placeholder {
                ui.set_rect(placeholder, Rect::new(0, h / 2 - 10, w, 20));
            }
            return;
        }

        self.sanitize_sashes(w);
        let mut boundaries = Vec::with_capacity(self.panes.len() + 1);
        boundaries.push(0);
        boundaries.extend_from_slice(&self.sashes);
        boundaries.push(w);

        for (i, pane) in self.panes.clone().into_iter().enumerate() {
            let x = boundaries[i];
            let width = (boundaries[i + 1] - x).max(0);
            ui.set_rect(pane, Rect::new(x, 0, width, h));
        }
    }

    /// Pane containing the point, if any
    pub fn hit_test_pane(&self, ui: &Toolkit, x: i32, y: i32) -> Option<FrameId> {
        self.panes
            .iter()
            .copied()
            .find(|pane| ui.rect(*pane).is_some_and(|r| r.contains(x, y)))
    }

    /// Equal-width sash positions for the current pane count
    fn reset_sashes_equal(&mut self, ui: &Toolkit) {
        let (w, _) = ui.window_size();
        let n = self.panes.len() as i32;
        self.sashes = (1..self.panes.len() as i32)
            .map(|i| w * i / n)
            .collect();
    }

    /// Force sash positions strictly increasing and inside the window. A
    /// count mismatch (stale restore data) falls back to equal widths.
    fn sanitize_sashes(&mut self, window_width: i32) {
        if self.sashes.len() + 1 != self.panes.len() {
            let n = self.panes.len() as i32;
            self.sashes = (1..self.panes.len() as i32)
                .map(|i| window_width * i / n)
                .collect();
            return;
        }
        let mut floor = 0;
        for sash in &mut self.sashes {
            *sash = (*sash).clamp(floor, window_width);
            floor = *sash;
        }
    }

    /// Restore previously saved sash positions. Only applied when the count
    /// matches the live pane row; a mismatch is logged and skipped.
    pub fn restore_sashes(&mut self, ui: &mut Toolkit, positions: &[i32]) {
        if positions.len() + 1 != self.panes.len() {
            log::warn!(
                "Saved sash count {} does not match {} panes; keeping equal widths",
                positions.len(),
                self.panes.len()
            );
            return;
        }
        self.sashes = positions.to_vec();
        self.relayout(ui);
    }

    fn show_placeholder(&mut self, ui: &mut Toolkit) {
        if self.placeholder.is_some() {
            return;
        }
        let label = ui.create_label(self.frame, PLACEHOLDER_TEXT);
        ui.set_role(label, FrameRole::Placeholder);
        let (w, h) = ui.window_size();
        ui.set_rect(label, Rect::new(0, h / 2 - 10, w, 20));
        self.placeholder = Some(label);
    }

    fn clear_placeholder(&mut self, ui: &mut Toolkit) {
        if let Some(placeholder) = self.placeholder.take() {
            ui.destroy(placeholder);
        }
    }
}
