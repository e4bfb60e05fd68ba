//! Clock module: a label showing the local wall-clock time, repainted once
//! per second by a background ticker.

use crate::module::error::ModuleResult;
use crate::module::traits::{Module, ModuleBase, ModuleInit};
use crate::ui::{FrameId, Rect, Toolkit};
use std::time::Duration;
use tokio::task::JoinHandle;

pub fn create(init: ModuleInit<'_>) -> ModuleResult<Box<dyn Module>> {
    Ok(Box::new(ClockModule {
        base: ModuleBase::new(init),
        time_label: None,
        ticker: None,
    }))
}

struct ClockModule {
    base: ModuleBase,
    time_label: Option<FrameId>,
    ticker: Option<JoinHandle<()>>,
}

impl ClockModule {
    fn current_time() -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}

impl Module for ClockModule {
    fn base(&self) -> &ModuleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModuleBase {
        &mut self.base
    }

    fn create_ui(&mut self, ui: &mut Toolkit) {
        let label = ui.create_label(self.base.content, &Self::current_time());
        if let Some(r) = ui.rect(self.base.content) {
            ui.set_rect(label, Rect::new(r.x + 10, r.y + 10, (r.width - 20).max(0), 30));
        }
        self.time_label = Some(label);

        // The ticker only requests repaints; the actual text update runs on
        // the shell context inside refresh.
        if let Ok(rt) = tokio::runtime::Handle::try_current() {
            let host = self.base.host.clone();
            let name = self.base.module_name.clone();
            self.ticker = Some(rt.spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(1));
                loop {
                    interval.tick().await;
                    host.request_refresh(&name);
                }
            }));
        } else {
            log::debug!("Clock started without an async runtime; no ticker");
        }
    }

    fn refresh(&mut self, ui: &mut Toolkit) {
        if let Some(label) = self.time_label {
            ui.set_text(label, &Self::current_time());
        }
    }

    fn on_destroy(&mut self, _ui: &mut Toolkit) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        self.base.shared_state.log("Clock module destroyed", log::Level::Info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::traits::HostHandle;
    use crate::sharedstate::SharedState;
    use tokio::sync::mpsc;

    fn make_clock(ui: &mut Toolkit) -> ClockModule {
        let frame = ui.create_frame(None);
        ui.set_rect(frame, Rect::new(0, 0, 300, 200));
        let (tx, _rx) = mpsc::unbounded_channel();
        ClockModule {
            base: ModuleBase::new(ModuleInit {
                ui,
                frame,
                shared_state: SharedState::in_memory(),
                module_name: "clock".to_string(),
                host: HostHandle::new(tx),
            }),
            time_label: None,
            ticker: None,
        }
    }

    #[test]
    fn test_clock_renders_and_refreshes_time() {
        let mut ui = Toolkit::new();
        let mut clock = make_clock(&mut ui);
        clock.create_ui(&mut ui);

        let label = clock.time_label.unwrap();
        let shown = ui.text(label).unwrap().to_string();
        assert_eq!(shown.len(), 8);
        assert_eq!(shown.as_bytes()[2], b':');

        clock.refresh(&mut ui);
        assert_eq!(ui.text(label).unwrap().len(), 8);
        clock.on_destroy(&mut ui);
    }
}
