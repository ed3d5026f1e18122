use super::{Widget, WidgetAction};
use crate::dashboard::dashboard::DashboardContext;
use crate::model::Project;
use eframe::egui;
use serde::{Deserialize, Serialize};

fn default_show_url_on_hover() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectLinksConfig {
    /// Show the target URL as a tooltip.
    #[serde(default = "default_show_url_on_hover")]
    pub show_url_on_hover: bool,
}

impl Default for ProjectLinksConfig {
    fn default() -> Self {
        Self {
            show_url_on_hover: default_show_url_on_hover(),
        }
    }
}

/// Read-only list of project links.
#[derive(Default)]
pub struct ProjectLinksWidget {
    cfg: ProjectLinksConfig,
}

impl ProjectLinksWidget {
    pub fn new(cfg: ProjectLinksConfig) -> Self {
        Self { cfg }
    }

    fn project_ui(&self, ui: &mut egui::Ui, project: &Project) -> Option<WidgetAction> {
        let Some(url) = project.url() else {
            ui.label(format!("• {}", project.name))
                .on_hover_text(format!("Unsupported link: {}", project.link));
            return None;
        };
        let mut action = None;
        ui.horizontal(|ui| {
            ui.label("•");
            let mut resp = ui.link(&project.name);
            if self.cfg.show_url_on_hover {
                resp = resp.on_hover_text(url.as_str());
            }
            if resp.clicked() {
                action = Some(WidgetAction::OpenLink {
                    name: project.name.clone(),
                    url: url.to_string(),
                });
            }
        });
        action
    }
}

impl Widget for ProjectLinksWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        let snapshot = ctx.data_cache.snapshot();
        if snapshot.projects.is_empty() {
            if snapshot.seeded {
                ui.weak("No projects yet");
            } else {
                ui.spinner();
            }
            return None;
        }
        let mut clicked = None;
        for project in snapshot.projects.iter() {
            clicked = clicked.or(self.project_ui(ui, project));
        }
        clicked
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<ProjectLinksConfig>(settings.clone()) {
            self.cfg = cfg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardDataCache;
    use serde_json::json;

    fn click(pos: egui::Pos2) -> egui::RawInput {
        let mut input = egui::RawInput::default();
        input.events.push(egui::Event::PointerMoved(pos));
        for pressed in [true, false] {
            input.events.push(egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                modifiers: egui::Modifiers::default(),
            });
        }
        input
    }

    fn seeded_cache() -> DashboardDataCache {
        let cache = DashboardDataCache::new();
        cache.seed(
            Vec::new(),
            Vec::new(),
            vec![
                Project::new("Project 2: To-Do-List", "https://mgeetech.com/"),
                Project::new("Local build", "file:///tmp/index.html"),
            ],
        );
        cache
    }

    /// Run one frame and return the widget's action plus each row's rect.
    fn run_rows(
        ctx: &egui::Context,
        widget: &mut ProjectLinksWidget,
        cache: &DashboardDataCache,
        input: egui::RawInput,
    ) -> (Option<WidgetAction>, Vec<egui::Rect>) {
        let snapshot = cache.snapshot();
        let mut action = None;
        let mut rows = Vec::new();
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                for project in snapshot.projects.iter() {
                    let row = ui.scope(|ui| widget.project_ui(ui, project));
                    action = action.take().or(row.inner);
                    rows.push(row.response.rect);
                }
            });
        });
        (action, rows)
    }

    #[test]
    fn clicking_link_returns_open_action() {
        let ctx = egui::Context::default();
        let cache = seeded_cache();
        let mut widget = ProjectLinksWidget::default();

        let (_, rows) = run_rows(&ctx, &mut widget, &cache, Default::default());
        let link = egui::pos2(rows[0].right() - 2.0, rows[0].center().y);
        let (action, _) = run_rows(&ctx, &mut widget, &cache, click(link));
        assert_eq!(
            action,
            Some(WidgetAction::OpenLink {
                name: "Project 2: To-Do-List".into(),
                url: "https://mgeetech.com/".into(),
            })
        );
    }

    #[test]
    fn non_http_link_is_plain_text() {
        let ctx = egui::Context::default();
        let cache = seeded_cache();
        let mut widget = ProjectLinksWidget::default();

        let (_, rows) = run_rows(&ctx, &mut widget, &cache, Default::default());
        let (action, _) = run_rows(&ctx, &mut widget, &cache, click(rows[1].center()));
        assert_eq!(action, None);

        let content = DashboardContext { data_cache: &cache };
        let mut rendered = Some(WidgetAction::TodoAdded { text: String::new() });
        let _ = ctx.run(click(rows[1].center()), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                rendered = widget.render(ui, &content);
            });
        });
        assert_eq!(rendered, None);
    }

    #[test]
    fn url_tooltip_defaults_on() {
        let widget = ProjectLinksWidget::default();
        assert!(widget.cfg.show_url_on_hover);
    }

    #[test]
    fn config_update_can_disable_tooltip() {
        let mut widget = ProjectLinksWidget::default();
        widget.on_config_updated(&json!({ "show_url_on_hover": false }));
        assert!(!widget.cfg.show_url_on_hover);
    }
}
