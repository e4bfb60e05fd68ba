//! Module System
//!
//! Everything that turns files in the modules directory into live panes:
//! the module contract, the class registry, discovery (startup scan plus
//! background poller) and the instantiation/lifecycle manager.

// Internal modules - all access should go through the api module
pub(crate) mod builtin;
pub(crate) mod discovery;
pub(crate) mod error;
pub(crate) mod manager;
pub(crate) mod poller;
pub(crate) mod registry;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the module system
pub mod api;
