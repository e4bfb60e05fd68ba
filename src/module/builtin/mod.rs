//! Built-in Modules
//!
//! Module classes compiled into the shell. They double as the fallback
//! layout when no saved layout is usable.

pub(crate) mod clock;
pub(crate) mod notepad;
pub(crate) mod sysinfo;

use crate::module::types::ModuleClass;

/// Modules shown when no saved layout can be restored
pub const DEFAULT_LAYOUT_MODULES: &[&str] = &["clock", "notepad", "sysinfo"];

/// Every compiled-in module class
pub fn builtin_classes() -> Vec<ModuleClass> {
    vec![
        ModuleClass::builtin("clock", clock::create),
        ModuleClass::builtin("notepad", notepad::create),
        ModuleClass::builtin("sysinfo", sysinfo::create),
    ]
}
