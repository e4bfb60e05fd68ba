//! Module Error Handling
//!
//! Error types for module discovery, loading and lifecycle operations.

use std::fmt;

/// Result type alias for module operations
pub type ModuleResult<T> = std::result::Result<T, ModuleError>;

/// Error types for module system operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleError {
    /// Module name not present in the class registry
    UnknownModule { module_name: String },

    /// Operation requires the module to be currently shown
    ModuleNotLive { module_name: String },

    /// Module file compiled against an incompatible host API version
    VersionIncompatible { message: String },

    /// Module file failed to load or exposed no conforming entry
    LoadError { path: String, cause: String },

    /// Module constructor failed
    InstantiationError { module_name: String, cause: String },

    /// Generic module error
    Generic { message: String },
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::UnknownModule { module_name } => {
                write!(f, "Unknown module: {}", module_name)
            }
            ModuleError::ModuleNotLive { module_name } => {
                write!(f, "Module not live: {}", module_name)
            }
            ModuleError::VersionIncompatible { message } => {
                write!(f, "Version incompatible: {}", message)
            }
            ModuleError::LoadError { path, cause } => {
                write!(f, "Failed to load module from '{}': {}", path, cause)
            }
            ModuleError::InstantiationError { module_name, cause } => {
                write!(f, "Module '{}' failed to instantiate: {}", module_name, cause)
            }
            ModuleError::Generic { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for ModuleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ModuleError::UnknownModule {
            module_name: "clock".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown module: clock");

        let err = ModuleError::LoadError {
            path: "modules/libbad.so".to_string(),
            cause: "missing entry symbol".to_string(),
        };
        assert!(err.to_string().contains("modules/libbad.so"));
        assert!(err.to_string().contains("missing entry symbol"));
    }
}
