//! Application module

pub mod events;
pub mod shell;
pub mod startup;
