//! Headless UI Layer
//!
//! Retained widget model consumed by the shell: frames with geometry, roles
//! and styling, plus the context-menu model. A rendering front-end draws this
//! tree; the module host only ever manipulates it.

pub(crate) mod menu;
pub(crate) mod toolkit;

pub use menu::{build_context_menu, MenuEntry};
pub use toolkit::{FrameId, FrameRole, Rect, Relief, Toolkit, WidgetKind};
