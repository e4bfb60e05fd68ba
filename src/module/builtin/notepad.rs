//! Notepad module: a scratch text area whose content round-trips through
//! the shared config file under the `notepad.text` key.

use crate::module::error::ModuleResult;
use crate::module::traits::{Module, ModuleBase, ModuleInit};
use crate::ui::{FrameId, Rect, Toolkit};

const TEXT_KEY: &str = "notepad.text";

pub fn create(init: ModuleInit<'_>) -> ModuleResult<Box<dyn Module>> {
    Ok(Box::new(NotepadModule {
        base: ModuleBase::new(init),
        text_area: None,
    }))
}

struct NotepadModule {
    base: ModuleBase,
    text_area: Option<FrameId>,
}

impl NotepadModule {
    fn saved_text(&self) -> String {
        self.base
            .shared_state
            .get(TEXT_KEY, serde_json::Value::String(String::new()))
            .as_str()
            .unwrap_or("")
            .to_string()
    }

    /// Push the current widget text back into the shared config
    fn save_text(&self, ui: &Toolkit) {
        if let Some(area) = self.text_area {
            if let Some(text) = ui.text(area) {
                self.base.shared_state.set(
                    TEXT_KEY,
                    serde_json::Value::String(text.to_string()),
                );
            }
        }
    }
}

impl Module for NotepadModule {
    fn base(&self) -> &ModuleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModuleBase {
        &mut self.base
    }

    fn create_ui(&mut self, ui: &mut Toolkit) {
        let area = ui.create_label(self.base.content, &self.saved_text());
        if let Some(r) = ui.rect(self.base.content) {
            ui.set_rect(
                area,
                Rect::new(
                    r.x + 5,
                    r.y + 5,
                    (r.width - 10).max(0),
                    (r.height - 10).max(0),
                ),
            );
        }
        self.text_area = Some(area);
    }

    fn refresh(&mut self, ui: &mut Toolkit) {
        self.save_text(ui);
    }

    fn on_destroy(&mut self, ui: &mut Toolkit) {
        self.save_text(ui);
        self.base
            .shared_state
            .log("Notepad module destroyed", log::Level::Info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::traits::HostHandle;
    use crate::sharedstate::SharedState;
    use tokio::sync::mpsc;

    fn make_notepad(ui: &mut Toolkit, shared: SharedState) -> NotepadModule {
        let frame = ui.create_frame(None);
        ui.set_rect(frame, Rect::new(0, 0, 300, 200));
        let (tx, _rx) = mpsc::unbounded_channel();
        NotepadModule {
            base: ModuleBase::new(ModuleInit {
                ui,
                frame,
                shared_state: shared,
                module_name: "notepad".to_string(),
                host: HostHandle::new(tx),
            }),
            text_area: None,
        }
    }

    #[test]
    fn test_notepad_restores_and_saves_text() {
        let shared = SharedState::in_memory();
        shared.set(TEXT_KEY, serde_json::Value::String("hello".to_string()));

        let mut ui = Toolkit::new();
        let mut notepad = make_notepad(&mut ui, shared.clone());
        notepad.create_ui(&mut ui);

        let area = notepad.text_area.unwrap();
        assert_eq!(ui.text(area), Some("hello"));

        ui.set_text(area, "edited");
        notepad.on_destroy(&mut ui);
        assert_eq!(
            shared.get(TEXT_KEY, serde_json::Value::Null),
            serde_json::Value::String("edited".to_string())
        );
    }
}
