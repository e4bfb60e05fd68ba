pub mod app;
pub mod core;
pub mod layout;
pub mod module;
pub mod sharedstate;
pub mod ui;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Parse the API version string from build script into u32
pub fn get_module_api_version() -> u32 {
    MODULE_API_VERSION.parse().unwrap_or(20250829)
}
