//! Public API for the module system
//!
//! Everything a module author or the shell needs: the module contract, the
//! entry-point convention for external libraries, the class registry and the
//! discovery/polling machinery.

pub use crate::module::builtin::{builtin_classes, DEFAULT_LAYOUT_MODULES};
pub use crate::module::discovery::{
    derive_module_name, list_candidate_files, process_module_files, register_builtins, scan_once,
    user_modules_dir, DiscoveryConfig, DEFAULT_MODULES_DIR, DYLIB_EXTENSION, EXCLUSION_MARKER,
};
pub use crate::module::error::{ModuleError, ModuleResult};
pub use crate::module::manager::ModuleManager;
pub use crate::module::poller::{
    join_with_grace, ModulePoller, DEFAULT_POLL_INTERVAL, POLL_STOP_GRACE,
};
pub use crate::module::registry::{ModuleRegistry, SharedModuleRegistry};
pub use crate::module::traits::{
    HostHandle, Module, ModuleBase, ModuleInit, TITLE_BAR_HEIGHT,
};
pub use crate::module::types::{
    ModuleClass, ModuleEntry, ModuleEntryFn, ModuleFactory, ModuleSource, MODULE_ENTRY_SYMBOL,
};
