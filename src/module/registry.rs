//! Module Class Registry
//!
//! Holds every discovered module class keyed by name, plus the set of module
//! file paths already processed. Mutation happens only on the shell's UI
//! context; the poller takes read-locked snapshots to diff directory
//! listings against.

use crate::module::types::ModuleClass;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Registry of loadable module classes and processed file paths
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    classes: HashMap<String, ModuleClass>,
    discovered_files: HashSet<PathBuf>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class. First registration wins; returns false and leaves
    /// the registry untouched when the name is already taken.
    pub fn register_class(&mut self, class: ModuleClass) -> bool {
        if self.classes.contains_key(&class.name) {
            log::debug!(
                "Module class '{}' already registered; keeping first registration",
                class.name
            );
            return false;
        }
        log::info!("Registered module class '{}' ({:?})", class.name, class.source);
        self.classes.insert(class.name.clone(), class);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Cloned handle to a registered class (the clone shares the library
    /// keep-alive for external classes)
    pub fn get(&self, name: &str) -> Option<ModuleClass> {
        self.classes.get(name).cloned()
    }

    /// Sorted list of every registered class name
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Record a module file as processed so scans skip it
    pub fn mark_file_discovered(&mut self, path: &Path) {
        self.discovered_files.insert(path.to_path_buf());
    }

    pub fn is_file_discovered(&self, path: &Path) -> bool {
        self.discovered_files.contains(path)
    }

    /// Snapshot of the processed-file set, used by the poller for diffing
    pub fn discovered_files_snapshot(&self) -> HashSet<PathBuf> {
        self.discovered_files.clone()
    }
}

/// Shared handle to the registry. Writes happen only from the UI context;
/// the poller holds a clone for read-only snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedModuleRegistry {
    inner: Arc<RwLock<ModuleRegistry>>,
}

impl SharedModuleRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ModuleRegistry::new())),
        }
    }

    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, ModuleRegistry> {
        self.inner.read().await
    }

    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, ModuleRegistry> {
        self.inner.write().await
    }
}
