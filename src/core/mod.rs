//! Core infrastructure: logging and shutdown coordination

pub mod logging;
pub mod shutdown;
