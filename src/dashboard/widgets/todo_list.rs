use super::{Widget, WidgetAction};
use crate::dashboard::dashboard::DashboardContext;
use crate::dashboard::DashboardDataCache;
use crate::gui::theme::accent_button;
use eframe::egui;
use serde::{Deserialize, Serialize};

fn default_hint() -> String {
    "Add new task".into()
}

fn default_input_width() -> f32 {
    200.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListConfig {
    #[serde(default = "default_hint")]
    pub hint: String,
    #[serde(default = "default_input_width")]
    pub input_width: f32,
}

impl Default for TodoListConfig {
    fn default() -> Self {
        Self {
            hint: default_hint(),
            input_width: default_input_width(),
        }
    }
}

/// Task list with an add-only input form.
pub struct TodoListWidget {
    cfg: TodoListConfig,
    input: String,
}

impl TodoListWidget {
    pub fn new(cfg: TodoListConfig) -> Self {
        Self {
            cfg,
            input: String::new(),
        }
    }

    /// Append the pending input to `cache`. The input is cleared only when
    /// something was added.
    fn submit(&mut self, cache: &DashboardDataCache) -> Option<WidgetAction> {
        cache.add_todo(&self.input)?;
        let text = std::mem::take(&mut self.input);
        Some(WidgetAction::TodoAdded { text })
    }

    fn form_ui(&mut self, ui: &mut egui::Ui, cache: &DashboardDataCache) -> Option<WidgetAction> {
        let mut added = None;
        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .hint_text(self.cfg.hint.as_str())
                    .desired_width(self.cfg.input_width.max(40.0)),
            );
            let entered = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui.add(accent_button("Add")).clicked();
            if entered || clicked {
                added = self.submit(cache);
                if entered {
                    resp.request_focus();
                }
            }
        });
        added
    }
}

impl Default for TodoListWidget {
    fn default() -> Self {
        Self::new(TodoListConfig::default())
    }
}

impl Widget for TodoListWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        let added = self.form_ui(ui, ctx.data_cache);
        ui.add_space(12.0);

        let snapshot = ctx.data_cache.snapshot();
        if snapshot.todos.is_empty() {
            if snapshot.seeded {
                ui.weak("No tasks yet");
            } else {
                ui.spinner();
            }
            return added;
        }
        for item in snapshot.todos.iter() {
            ui.label(format!("• {item}"));
        }
        added
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<TodoListConfig>(settings.clone()) {
            self.cfg = cfg;
        }
    }
}
