//! Type definitions for the module system
//!
//! Registered module classes, their provenance, and the entry-point
//! convention external module libraries must follow.

use crate::module::error::ModuleResult;
use crate::module::traits::{Module, ModuleInit};
use std::path::PathBuf;
use std::sync::Arc;

/// Constructor signature every module class provides
pub type ModuleFactory = for<'a> fn(ModuleInit<'a>) -> ModuleResult<Box<dyn Module>>;

/// Symbol every external module library must export.
///
/// The symbol resolves to a [`ModuleEntryFn`] returning the library's single
/// [`ModuleEntry`]. Libraries are expected to be built with the same
/// toolchain as the host; the API version gate rejects stale builds.
pub const MODULE_ENTRY_SYMBOL: &[u8] = b"modshell_module_entry";

/// Registration record returned by an external library's entry function
#[repr(C)]
pub struct ModuleEntry {
    /// Host API version the library was compiled against
    pub api_version: u32,
    /// Factory for the one module class this library exports
    pub factory: ModuleFactory,
}

/// Type of the exported entry function
pub type ModuleEntryFn = unsafe extern "C" fn() -> ModuleEntry;

/// Where a registered class came from
#[derive(Clone)]
pub enum ModuleSource {
    /// Compiled into the shell
    Builtin,
    /// Loaded from a shared library; the handle keeps the code mapped for
    /// as long as the class stays registered
    External {
        path: PathBuf,
        library: Arc<libloading::Library>,
    },
}

impl std::fmt::Debug for ModuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleSource::Builtin => write!(f, "Builtin"),
            ModuleSource::External { path, .. } => {
                write!(f, "External({})", path.display())
            }
        }
    }
}

/// A registered, instantiable module class
#[derive(Debug, Clone)]
pub struct ModuleClass {
    /// Registry key, derived from the source file name for external classes
    pub name: String,
    pub factory: ModuleFactory,
    pub source: ModuleSource,
}

impl ModuleClass {
    pub fn builtin(name: &str, factory: ModuleFactory) -> Self {
        Self {
            name: name.to_string(),
            factory,
            source: ModuleSource::Builtin,
        }
    }
}
