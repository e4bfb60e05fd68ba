//! System info module: static labels describing the host platform and the
//! running process.

use crate::module::error::ModuleResult;
use crate::module::traits::{Module, ModuleBase, ModuleInit};
use crate::ui::{Rect, Toolkit};

pub fn create(init: ModuleInit<'_>) -> ModuleResult<Box<dyn Module>> {
    Ok(Box::new(SysInfoModule {
        base: ModuleBase::new(init),
    }))
}

struct SysInfoModule {
    base: ModuleBase,
}

fn info_lines() -> Vec<String> {
    vec![
        format!("OS: {} ({})", std::env::consts::OS, std::env::consts::ARCH),
        format!("Family: {}", std::env::consts::FAMILY),
        format!("PID: {}", std::process::id()),
        format!(
            "Started: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
    ]
}

impl Module for SysInfoModule {
    fn base(&self) -> &ModuleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModuleBase {
        &mut self.base
    }

    fn create_ui(&mut self, ui: &mut Toolkit) {
        let origin = ui.rect(self.base.content).unwrap_or_default();
        for (i, line) in info_lines().iter().enumerate() {
            let label = ui.create_label(self.base.content, line);
            ui.set_rect(
                label,
                Rect::new(
                    origin.x + 10,
                    origin.y + 10 + (i as i32) * 22,
                    (origin.width - 20).max(0),
                    20,
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_lines_cover_platform_and_process() {
        let lines = info_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("OS: "));
        assert!(lines[2].contains(&std::process::id().to_string()));
    }
}
