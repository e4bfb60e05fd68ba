//! Module Discovery
//!
//! Scans the module directories for shared libraries, loads each one and
//! registers the single module class it exports. A file that fails to load
//! is logged and left out of the discovered set so the next scan retries
//! it; one bad file never aborts the scan of the rest.

use crate::module::error::{ModuleError, ModuleResult};
use crate::module::registry::SharedModuleRegistry;
use crate::module::types::{ModuleClass, ModuleEntryFn, ModuleSource, MODULE_ENTRY_SYMBOL};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Module directory scanned in the working directory, created when absent
pub const DEFAULT_MODULES_DIR: &str = "modules";

/// Files whose name starts with this marker are never loaded
pub const EXCLUSION_MARKER: char = '_';

#[cfg(target_os = "windows")]
pub const DYLIB_EXTENSION: &str = "dll";
#[cfg(target_os = "macos")]
pub const DYLIB_EXTENSION: &str = "dylib";
#[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
pub const DYLIB_EXTENSION: &str = "so";

/// Configuration for module discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Directories searched for module libraries, in order
    pub search_paths: Vec<PathBuf>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        let mut search_paths = vec![PathBuf::from(DEFAULT_MODULES_DIR)];
        if let Some(user_dir) = user_modules_dir() {
            search_paths.push(user_dir);
        }
        Self { search_paths }
    }
}

impl DiscoveryConfig {
    /// Discovery over an explicit set of directories
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths: paths,
        }
    }
}

/// User-level module directory under the platform config dir
pub fn user_modules_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("modshell").join(DEFAULT_MODULES_DIR))
}

/// Register the compiled-in module classes (the default layout set)
pub async fn register_builtins(registry: &SharedModuleRegistry) {
    let mut reg = registry.write().await;
    for class in crate::module::builtin::builtin_classes() {
        reg.register_class(class);
    }
}

/// One full scan: list candidate files in every search path and process the
/// ones not yet in the discovered set. Returns the number of classes newly
/// registered. Individual file failures are isolated and logged.
pub async fn scan_once(config: &DiscoveryConfig, registry: &SharedModuleRegistry) -> usize {
    if let Some(primary) = config.search_paths.first() {
        if !primary.exists() {
            match std::fs::create_dir_all(primary) {
                Ok(()) => log::info!("Created modules directory: {}", primary.display()),
                Err(err) => log::warn!(
                    "Could not create modules directory {}: {}",
                    primary.display(),
                    err
                ),
            }
        }
    }

    let candidates = list_candidate_files(&config.search_paths);
    let fresh: Vec<PathBuf> = {
        let reg = registry.read().await;
        candidates
            .into_iter()
            .filter(|p| !reg.is_file_discovered(p))
            .collect()
    };
    process_module_files(fresh, registry).await
}

/// Load and register a batch of module files on the UI context. Used both by
/// the startup scan and for paths the poller reports.
pub async fn process_module_files(paths: Vec<PathBuf>, registry: &SharedModuleRegistry) -> usize {
    let mut registered = 0;
    for path in paths {
        match load_module_class(&path) {
            Ok(class) => {
                let mut reg = registry.write().await;
                if reg.register_class(class) {
                    registered += 1;
                }
                // Either way the file is processed; later scans skip it
                reg.mark_file_discovered(&path);
            }
            Err(err) => {
                // Not marked discovered: the next scan retries this file
                log::error!("Module discovery failed: {}", err);
            }
        }
    }
    registered
}

/// Direct children of the search paths that look like module libraries:
/// correct extension, not starting with the exclusion marker.
pub fn list_candidate_files(search_paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for dir in search_paths {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name.starts_with(EXCLUSION_MARKER) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) == Some(DYLIB_EXTENSION) {
                candidates.push(path);
            }
        }
    }
    candidates.sort();
    candidates
}

/// Registry key for a module file: file stem with the `lib` prefix dropped
pub fn derive_module_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = if cfg!(not(target_os = "windows")) {
        stem.strip_prefix("lib").unwrap_or(stem)
    } else {
        stem
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Load one shared library and resolve its module entry
fn load_module_class(path: &Path) -> ModuleResult<ModuleClass> {
    let name = derive_module_name(path).ok_or_else(|| ModuleError::LoadError {
        path: path.display().to_string(),
        cause: "cannot derive module name from file name".to_string(),
    })?;

    // SAFETY: loading and calling a foreign module entrypoint is inherently
    // unsafe; failures surface as LoadError and the file stays retryable.
    let library = unsafe { libloading::Library::new(path) }.map_err(|err| {
        ModuleError::LoadError {
            path: path.display().to_string(),
            cause: err.to_string(),
        }
    })?;

    let entry_fn: libloading::Symbol<'_, ModuleEntryFn> =
        unsafe { library.get(MODULE_ENTRY_SYMBOL) }.map_err(|_| ModuleError::LoadError {
            path: path.display().to_string(),
            cause: "no module entry symbol found".to_string(),
        })?;

    // SAFETY: symbol type matches the entry convention checked above
    let entry = unsafe { entry_fn() };
    let host_version = crate::get_module_api_version();
    if entry.api_version != host_version {
        return Err(ModuleError::VersionIncompatible {
            message: format!(
                "module '{}' built against API {}, host is {}",
                name, entry.api_version, host_version
            ),
        });
    }

    let factory = entry.factory;
    drop(entry_fn);
    Ok(ModuleClass {
        name,
        factory,
        source: ModuleSource::External {
            path: path.to_path_buf(),
            library: Arc::new(library),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_module_name_strips_lib_prefix() {
        #[cfg(not(target_os = "windows"))]
        {
            assert_eq!(
                derive_module_name(Path::new("modules/libclock.so")),
                Some("clock".to_string())
            );
            assert_eq!(
                derive_module_name(Path::new("modules/notepad.so")),
                Some("notepad".to_string())
            );
        }
        #[cfg(target_os = "windows")]
        assert_eq!(
            derive_module_name(Path::new("modules/clock.dll")),
            Some("clock".to_string())
        );
    }

    #[test]
    fn test_candidate_filter_skips_marked_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join(format!("libclock.{}", DYLIB_EXTENSION));
        let marked = dir.path().join(format!("_hidden.{}", DYLIB_EXTENSION));
        let text = dir.path().join("readme.txt");
        for p in [&lib, &marked, &text] {
            std::fs::write(p, b"x").unwrap();
        }

        let candidates = list_candidate_files(&[dir.path().to_path_buf()]);
        assert_eq!(candidates, vec![lib]);
    }

    #[test]
    fn test_candidate_filter_tolerates_missing_dir() {
        let candidates = list_candidate_files(&[PathBuf::from("/nonexistent/modules")]);
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_scan_isolates_broken_files() {
        // Not a real shared library; the load fails, the scan continues and
        // the path stays eligible for a retry.
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join(format!("libbroken.{}", DYLIB_EXTENSION));
        std::fs::write(&bogus, b"not a library").unwrap();

        let registry = SharedModuleRegistry::new();
        let config = DiscoveryConfig::with_paths(vec![dir.path().to_path_buf()]);
        let registered = scan_once(&config, &registry).await;

        assert_eq!(registered, 0);
        let reg = registry.read().await;
        assert_eq!(reg.class_count(), 0);
        assert!(!reg.is_file_discovered(&bogus));
    }

    #[tokio::test]
    async fn test_scan_twice_is_idempotent_for_builtins() {
        let registry = SharedModuleRegistry::new();
        register_builtins(&registry).await;
        let before = registry.read().await.class_count();

        register_builtins(&registry).await;
        assert_eq!(registry.read().await.class_count(), before);
    }
}
