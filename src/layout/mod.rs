//! Layout subsystem: the horizontal paned host, the drag-to-reorder and
//! fullscreen controllers, and layout persistence.

pub mod drag;
pub mod fullscreen;
pub mod host;
pub mod persistence;
