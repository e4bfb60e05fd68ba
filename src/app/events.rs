//! Shell Event Channel
//!
//! Every mutation of the registries, the layout host or the widget tree is
//! expressed as a `ShellEvent` consumed by the single shell event-loop task.
//! Background work (the discovery poller, module tickers) only ever posts
//! events here; it never touches shared state directly.

use crate::ui::MenuEntry;
use std::path::PathBuf;

/// Pointer button of a press event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// Events processed by the shell's serialized UI context
#[derive(Debug, Clone)]
pub enum ShellEvent {
    PointerPressed {
        x: i32,
        y: i32,
        button: PointerButton,
    },
    PointerMoved {
        x: i32,
        y: i32,
    },
    PointerReleased {
        x: i32,
        y: i32,
    },
    WindowResized {
        width: i32,
        height: i32,
    },
    /// The front-end dragged a pane divider to a new x position
    SashMoved {
        index: usize,
        position: i32,
    },
    /// Instantiate and show a registered module
    ShowModule {
        name: String,
    },
    /// Destroy a live module and remove its pane
    HideModule {
        name: String,
    },
    /// Enter or leave fullscreen for a live module
    ToggleFullscreen {
        name: String,
    },
    /// A module asked for a repaint (timer tick etc.)
    RefreshModule {
        name: String,
    },
    /// A context-menu entry was activated by the front-end
    MenuActivated {
        entry: MenuEntry,
    },
    /// The poller saw module files not yet in the discovered set
    ModuleFilesFound {
        paths: Vec<PathBuf>,
    },
    Shutdown,
}
