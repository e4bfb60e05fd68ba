//! Layout Persistence
//!
//! Saves and restores the window arrangement as JSON. The descriptor
//! records either a fullscreen module or the paned row (member order plus
//! sash positions); when a module is fullscreen at save time the row behind
//! it is not captured.

use crate::layout::fullscreen::FullscreenController;
use crate::layout::host::LayoutHost;
use crate::module::manager::ModuleManager;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default layout file name, written to the working directory
pub const LAYOUT_FILE: &str = "gui_layout.json";

/// Top-level saved-layout document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    /// Module holding the window fullscreen at save time, if any
    pub fullscreen_module: Option<String>,
    /// The paned row; absent when saved while fullscreen
    pub paned_window_layout: Option<PanedLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanedLayout {
    /// Pane membership, left to right
    pub modules: Vec<PaneEntry>,
    /// Sash x positions, left to right
    pub sash_positions: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneEntry {
    pub module_name: String,
}

/// Reads and writes the layout file
#[derive(Debug, Clone)]
pub struct LayoutPersistence {
    path: PathBuf,
}

impl LayoutPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot the current arrangement. While fullscreen only the holder's
    /// name is captured; the row behind it is recorded as absent.
    pub fn capture(
        host: &LayoutHost,
        manager: &ModuleManager,
        fullscreen: &FullscreenController,
    ) -> LayoutDescriptor {
        if let Some(name) = fullscreen.current() {
            return LayoutDescriptor {
                fullscreen_module: Some(name.to_string()),
                paned_window_layout: None,
            };
        }

        let modules = host
            .pane_order()
            .iter()
            .filter_map(|pane| manager.module_name_for_frame(*pane))
            .map(|name| PaneEntry {
                module_name: name.to_string(),
            })
            .collect();
        LayoutDescriptor {
            fullscreen_module: None,
            paned_window_layout: Some(PanedLayout {
                modules,
                sash_positions: host.sash_positions(),
            }),
        }
    }

    /// Write a descriptor to the layout file. Failure is logged, not fatal;
    /// the next save retries.
    pub fn save(&self, descriptor: &LayoutDescriptor) {
        let json = match serde_json::to_string_pretty(descriptor) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Could not serialize layout: {}", err);
                return;
            }
        };
        match std::fs::write(&self.path, json) {
            Ok(()) => log::info!("Layout saved to {}", self.path.display()),
            Err(err) => log::error!(
                "Could not write layout file {}: {}",
                self.path.display(),
                err
            ),
        }
    }

    /// Read the layout file. A missing or unparseable file yields `None`
    /// and the caller falls back to the default layout.
    pub fn load(&self) -> Option<LayoutDescriptor> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No layout file at {}", self.path.display());
                return None;
            }
            Err(err) => {
                log::warn!(
                    "Could not read layout file {}: {}",
                    self.path.display(),
                    err
                );
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(descriptor) => Some(descriptor),
            Err(err) => {
                log::warn!(
                    "Ignoring malformed layout file {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> LayoutDescriptor {
        LayoutDescriptor {
            fullscreen_module: None,
            paned_window_layout: Some(PanedLayout {
                modules: vec![
                    PaneEntry {
                        module_name: "clock".to_string(),
                    },
                    PaneEntry {
                        module_name: "notepad".to_string(),
                    },
                ],
                sash_positions: vec![420],
            }),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = LayoutPersistence::new(dir.path().join(LAYOUT_FILE));

        persistence.save(&descriptor());
        assert_eq!(persistence.load(), Some(descriptor()));
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = LayoutPersistence::new(dir.path().join(LAYOUT_FILE));
        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn test_malformed_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LAYOUT_FILE);
        std::fs::write(&path, "{ this is not json").unwrap();
        assert_eq!(LayoutPersistence::new(path).load(), None);
    }

    #[test]
    fn test_document_shape_matches_saved_files() {
        let json = serde_json::to_value(descriptor()).unwrap();
        assert_eq!(json["fullscreen_module"], serde_json::Value::Null);
        assert_eq!(
            json["paned_window_layout"]["modules"][0]["module_name"],
            "clock"
        );
        assert_eq!(json["paned_window_layout"]["sash_positions"][0], 420);
    }
}
