//! Retained Widget Toolkit
//!
//! Owns every frame the shell creates: containers, labels and buttons with
//! window-coordinate rectangles, styling and interaction roles. The toolkit is
//! only ever touched from the UI event-loop task, so it needs no internal
//! locking. Destruction is recursive and frames can be queried for existence,
//! which is how controllers detect widgets torn down mid-interaction.

use std::collections::HashMap;

/// Handle to a frame owned by the [`Toolkit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(u64);

/// Pixel rectangle in window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether a point lies inside this rectangle
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Border styling for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relief {
    Flat,
    Solid,
    Sunken,
    Ridge,
}

/// What a frame displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    Container,
    Label { text: String },
    Button { glyph: String },
}

/// Interaction role used by the shell to route pointer events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameRole {
    None,
    /// Title-bar drag handle of the named module
    DragHandle { module: String },
    /// Fullscreen toggle button of the named module
    FullscreenToggle { module: String },
    /// Close button of the named module
    CloseButton { module: String },
    /// "No modules" placeholder shown by an empty layout host
    Placeholder,
}

#[derive(Debug)]
struct FrameData {
    parent: Option<FrameId>,
    children: Vec<FrameId>,
    rect: Rect,
    kind: WidgetKind,
    role: FrameRole,
    relief: Relief,
    highlighted: bool,
}

/// The widget arena plus the single top-level window slot
#[derive(Debug)]
pub struct Toolkit {
    frames: HashMap<FrameId, FrameData>,
    order: Vec<FrameId>,
    next_id: u64,
    window_size: (i32, i32),
    window_content: Option<FrameId>,
}

impl Toolkit {
    pub fn new() -> Self {
        Self::with_window_size(800, 600)
    }

    pub fn with_window_size(width: i32, height: i32) -> Self {
        Self {
            frames: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
            window_size: (width, height),
            window_content: None,
        }
    }

    fn insert(&mut self, parent: Option<FrameId>, kind: WidgetKind) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;

        self.frames.insert(
            id,
            FrameData {
                parent,
                children: Vec::new(),
                rect: Rect::default(),
                kind,
                role: FrameRole::None,
                relief: Relief::Flat,
                highlighted: false,
            },
        );
        self.order.push(id);

        if let Some(parent_id) = parent {
            if let Some(parent_data) = self.frames.get_mut(&parent_id) {
                parent_data.children.push(id);
            }
        }
        id
    }

    /// Create a container frame, optionally parented
    pub fn create_frame(&mut self, parent: Option<FrameId>) -> FrameId {
        self.insert(parent, WidgetKind::Container)
    }

    /// Create a text label inside `parent`
    pub fn create_label(&mut self, parent: FrameId, text: &str) -> FrameId {
        self.insert(
            Some(parent),
            WidgetKind::Label {
                text: text.to_string(),
            },
        )
    }

    /// Create a button inside `parent` showing `glyph`
    pub fn create_button(&mut self, parent: FrameId, glyph: &str) -> FrameId {
        self.insert(
            Some(parent),
            WidgetKind::Button {
                glyph: glyph.to_string(),
            },
        )
    }

    /// Recursively destroy a frame and its subtree
    pub fn destroy(&mut self, id: FrameId) {
        let Some(data) = self.frames.get(&id) else {
            return;
        };
        let children = data.children.clone();
        let parent = data.parent;
        for child in children {
            self.destroy(child);
        }
        if let Some(parent_id) = parent {
            if let Some(parent_data) = self.frames.get_mut(&parent_id) {
                parent_data.children.retain(|c| *c != id);
            }
        }
        if self.window_content == Some(id) {
            self.window_content = None;
        }
        self.frames.remove(&id);
        self.order.retain(|f| *f != id);
    }

    /// Whether a frame is still alive (the tk `winfo_exists` equivalent)
    pub fn exists(&self, id: FrameId) -> bool {
        self.frames.contains_key(&id)
    }

    /// Whether `id` is `ancestor` itself or sits anywhere below it. Used to
    /// ignore widgets of panes that are alive but not currently shown (the
    /// row hidden behind a fullscreen module keeps its stale rects).
    pub fn is_descendant_of(&self, id: FrameId, ancestor: FrameId) -> bool {
        let mut current = Some(id);
        while let Some(frame) = current {
            if frame == ancestor {
                return true;
            }
            current = self.frames.get(&frame).and_then(|d| d.parent);
        }
        false
    }

    pub fn children(&self, id: FrameId) -> Vec<FrameId> {
        self.frames
            .get(&id)
            .map(|d| d.children.clone())
            .unwrap_or_default()
    }

    pub fn rect(&self, id: FrameId) -> Option<Rect> {
        self.frames.get(&id).map(|d| d.rect)
    }

    /// Place a frame; children are shifted by the same origin delta so a
    /// subtree keeps its internal arrangement when its container moves.
    pub fn set_rect(&mut self, id: FrameId, rect: Rect) {
        let Some(old) = self.rect(id) else {
            return;
        };
        let dx = rect.x - old.x;
        let dy = rect.y - old.y;
        if let Some(data) = self.frames.get_mut(&id) {
            data.rect = rect;
        }
        if dx != 0 || dy != 0 {
            for child in self.children(id) {
                if let Some(child_rect) = self.rect(child) {
                    self.set_rect(
                        child,
                        Rect::new(
                            child_rect.x + dx,
                            child_rect.y + dy,
                            child_rect.width,
                            child_rect.height,
                        ),
                    );
                }
            }
        }
    }

    pub fn role(&self, id: FrameId) -> Option<&FrameRole> {
        self.frames.get(&id).map(|d| &d.role)
    }

    pub fn set_role(&mut self, id: FrameId, role: FrameRole) {
        if let Some(data) = self.frames.get_mut(&id) {
            data.role = role;
        }
    }

    /// Replace the text of a label or the glyph of a button
    pub fn set_text(&mut self, id: FrameId, text: &str) {
        if let Some(data) = self.frames.get_mut(&id) {
            match &mut data.kind {
                WidgetKind::Label { text: t } => *t = text.to_string(),
                WidgetKind::Button { glyph } => *glyph = text.to_string(),
                WidgetKind::Container => {}
            }
        }
    }

    pub fn text(&self, id: FrameId) -> Option<&str> {
        self.frames.get(&id).and_then(|d| match &d.kind {
            WidgetKind::Label { text } => Some(text.as_str()),
            WidgetKind::Button { glyph } => Some(glyph.as_str()),
            WidgetKind::Container => None,
        })
    }

    pub fn relief(&self, id: FrameId) -> Option<Relief> {
        self.frames.get(&id).map(|d| d.relief)
    }

    pub fn set_relief(&mut self, id: FrameId, relief: Relief) {
        if let Some(data) = self.frames.get_mut(&id) {
            data.relief = relief;
        }
    }

    pub fn is_highlighted(&self, id: FrameId) -> bool {
        self.frames.get(&id).map(|d| d.highlighted).unwrap_or(false)
    }

    pub fn set_highlighted(&mut self, id: FrameId, highlighted: bool) {
        if let Some(data) = self.frames.get_mut(&id) {
            data.highlighted = highlighted;
        }
    }

    pub fn window_size(&self) -> (i32, i32) {
        self.window_size
    }

    pub fn set_window_size(&mut self, width: i32, height: i32) {
        self.window_size = (width.max(1), height.max(1));
    }

    /// The frame currently filling the window, if any
    pub fn window_content(&self) -> Option<FrameId> {
        self.window_content
    }

    /// Swap the window content. The previous occupant stays alive but is no
    /// longer placed; callers re-place whichever frame they restore.
    pub fn set_window_content(&mut self, content: Option<FrameId>) {
        self.window_content = content;
    }

    /// First frame with an interaction role containing the point, scanning in
    /// creation order. Overlapping role frames do not occur in practice; the
    /// first match wins.
    pub fn hit_test_role(&self, x: i32, y: i32) -> Option<(FrameId, FrameRole)> {
        for id in &self.order {
            let data = &self.frames[id];
            if data.role != FrameRole::None && data.rect.contains(x, y) {
                return Some((*id, data.role.clone()));
            }
        }
        None
    }

    /// Frames whose role matches the predicate
    pub fn frames_with_role<F>(&self, pred: F) -> Vec<FrameId>
    where
        F: Fn(&FrameRole) -> bool,
    {
        self.order
            .iter()
            .filter(|id| pred(&self.frames[*id].role))
            .copied()
            .collect()
    }

    /// Total number of live frames (test support)
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new()
    }
}
