//! Shared Logging/Config Collaborator
//!
//! Small key-value store injected into every module: `get`/`set` over a JSON
//! document persisted to its own config file, plus a `log` passthrough to the
//! logging facade. The shell owns one instance and hands out clones; the
//! store itself knows nothing about modules or layout.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Default config file, kept separate from the layout document
pub const SHARED_CONFIG_FILE: &str = "shared_config.json";

/// Errors raised by the shared config store
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug)]
struct SharedStateInner {
    values: serde_json::Map<String, Value>,
    path: Option<PathBuf>,
}

/// Cloneable handle to the shared key-value store
#[derive(Debug, Clone)]
pub struct SharedState {
    inner: Arc<Mutex<SharedStateInner>>,
}

impl SharedState {
    /// Open the store backed by `path`, loading existing values if the file
    /// parses. A missing or corrupt file starts empty with a log entry.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match load_values(&path) {
            Ok(values) => values,
            Err(ConfigError::Read { .. }) => serde_json::Map::new(),
            Err(err) => {
                log::warn!("Shared config ignored: {}", err);
                serde_json::Map::new()
            }
        };
        Self {
            inner: Arc::new(Mutex::new(SharedStateInner {
                values,
                path: Some(path),
            })),
        }
    }

    /// In-memory store without persistence, used by tests
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SharedStateInner {
                values: serde_json::Map::new(),
                path: None,
            })),
        }
    }

    /// Fetch a value, falling back to `default` when the key is unset
    pub fn get(&self, key: &str, default: Value) -> Value {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.values.get(key).cloned().unwrap_or(default)
    }

    /// Store a value and persist the document immediately. Persistence
    /// failures are logged, never raised.
    pub fn set(&self, key: &str, value: Value) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.values.insert(key.to_string(), value);
        if let Some(path) = inner.path.clone() {
            if let Err(err) = persist_values(&path, &inner.values) {
                log::error!("{}", err);
            }
        }
    }

    /// Log a message on behalf of a module
    pub fn log(&self, message: &str, level: log::Level) {
        log::log!(target: "modshell::sharedstate", level, "{}", message);
    }
}

fn load_values(path: &Path) -> Result<serde_json::Map<String, Value>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Ok(serde_json::Map::new()),
    }
}

fn persist_values(
    path: &Path,
    values: &serde_json::Map<String, Value>,
) -> Result<(), ConfigError> {
    let content = serde_json::to_string_pretty(&Value::Object(values.clone()))
        .expect("JSON map serialization cannot fail");
    std::fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
