//! Context Menu Model
//!
//! The right-click menu is modelled as data: the shell rebuilds the entry
//! list on every open and the front-end activates entries back through the
//! event channel. When fullscreen is active the menu collapses to a single
//! exit action.

use std::collections::HashSet;

/// One activatable entry of the right-click context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Show or hide the named module; `live` reflects its current state
    ToggleModule { name: String, live: bool },
    /// Leave fullscreen and restore the paned layout
    ExitFullscreen,
}

impl MenuEntry {
    /// Display label with the checkbox-style visibility indicator
    pub fn label(&self) -> String {
        match self {
            MenuEntry::ToggleModule { name, live } => {
                let prefix = if *live { "[x]" } else { "[ ]" };
                format!("{} {}", prefix, name)
            }
            MenuEntry::ExitFullscreen => "Exit fullscreen".to_string(),
        }
    }
}

/// Build the context menu for the current shell state.
///
/// `registered` is the sorted list of every discovered module name and
/// `live` the set currently shown. With fullscreen active only the exit
/// entry is offered.
pub fn build_context_menu(
    registered: &[String],
    live: &HashSet<String>,
    fullscreen_active: bool,
) -> Vec<MenuEntry> {
    if fullscreen_active {
        return vec![MenuEntry::ExitFullscreen];
    }

    registered
        .iter()
        .map(|name| MenuEntry::ToggleModule {
            name: name.clone(),
            live: live.contains(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lists_all_registered_modules() {
        let registered = vec!["clock".to_string(), "notepad".to_string()];
        let live: HashSet<String> = ["clock".to_string()].into_iter().collect();

        let menu = build_context_menu(&registered, &live, false);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].label(), "[x] clock");
        assert_eq!(menu[1].label(), "[ ] notepad");
    }

    #[test]
    fn test_menu_collapses_to_exit_when_fullscreen() {
        let registered = vec!["clock".to_string(), "notepad".to_string()];
        let live: HashSet<String> = registered.iter().cloned().collect();

        let menu = build_context_menu(&registered, &live, true);
        assert_eq!(menu, vec![MenuEntry::ExitFullscreen]);
        assert_eq!(menu[0].label(), "Exit fullscreen");
    }
}
