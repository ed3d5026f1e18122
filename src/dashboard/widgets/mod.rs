use crate::dashboard::dashboard::DashboardContext;
use eframe::egui;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

mod kpi_chart;
mod project_links;
mod todo_list;

pub use kpi_chart::{pie_slices, slice_at, KpiChartConfig, KpiChartWidget, PieSlice, PALETTE};
pub use project_links::{ProjectLinksConfig, ProjectLinksWidget};
pub use todo_list::{TodoListConfig, TodoListWidget};

/// Something a widget asks the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    /// Open `url` in the system browser.
    OpenLink { name: String, url: String },
    /// A task was appended to the list.
    TodoAdded { text: String },
}

/// Widget trait implemented by all dashboard widgets.
pub trait Widget: Send {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction>;

    fn on_config_updated(&mut self, _settings: &Value) {}
}

/// Builds widgets from JSON settings.
#[derive(Clone)]
pub struct WidgetFactory {
    ctor: Arc<dyn Fn(&Value) -> Box<dyn Widget> + Send + Sync>,
    default_settings: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl WidgetFactory {
    pub fn new<T: Widget + 'static, C: DeserializeOwned + Serialize + Default + 'static>(
        build: fn(C) -> T,
    ) -> Self {
        Self {
            ctor: Arc::new(move |v| {
                let cfg = serde_json::from_value::<C>(v.clone()).unwrap_or_else(|e| {
                    tracing::warn!("invalid widget settings, using defaults: {e}");
                    C::default()
                });
                Box::new(build(cfg))
            }),
            default_settings: Arc::new(|| {
                serde_json::to_value(C::default()).unwrap_or_else(|_| json!({}))
            }),
        }
    }

    pub fn default_settings(&self) -> Value {
        (self.default_settings)()
    }

    pub fn create(&self, settings: &Value) -> Box<dyn Widget> {
        (self.ctor)(settings)
    }
}

#[derive(Clone, Default)]
pub struct WidgetRegistry {
    map: HashMap<String, WidgetFactory>,
}

impl WidgetRegistry {
    pub fn with_defaults() -> Self {
        let mut reg = Self::default();
        reg.register("todo_list", WidgetFactory::new(TodoListWidget::new));
        reg.register("kpi_chart", WidgetFactory::new(KpiChartWidget::new));
        reg.register("project_links", WidgetFactory::new(ProjectLinksWidget::new));
        reg
    }

    pub fn register(&mut self, name: &str, factory: WidgetFactory) {
        self.map.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn create(&self, name: &str, settings: &Value) -> Option<Box<dyn Widget>> {
        let settings = if settings.is_null() {
            self.default_settings(name)
                .unwrap_or_else(|| Value::Object(Default::default()))
        } else {
            settings.clone()
        };
        self.map.get(name).map(|f| f.create(&settings))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn default_settings(&self, name: &str) -> Option<Value> {
        self.map.get(name).map(|f| f.default_settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_register_the_three_cards() {
        let registry = WidgetRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            ["kpi_chart", "project_links", "todo_list"]
        );
        assert!(registry.create("todo_list", &Value::Null).is_some());
        assert!(registry.create("missing", &json!({})).is_none());
    }

    #[test]
    fn default_settings_come_from_config_types() {
        let registry = WidgetRegistry::with_defaults();
        let todo = registry.default_settings("todo_list").unwrap();
        assert_eq!(todo["hint"], json!("Add new task"));
        let chart = registry.default_settings("kpi_chart").unwrap();
        assert_eq!(chart["show_legend"], json!(true));
    }
}
