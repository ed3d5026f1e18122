use crate::dashboard::widgets::WidgetRegistry;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

fn default_version() -> u32 {
    1
}

fn default_rows() -> u8 {
    1
}

fn default_cols() -> u8 {
    3
}

fn default_span() -> u8 {
    1
}

fn default_stack_below_width() -> f32 {
    768.0
}

fn default_overflow_mode() -> OverflowMode {
    OverflowMode::Auto
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverflowMode {
    Scroll,
    Clip,
    Auto,
}

impl Default for OverflowMode {
    fn default() -> Self {
        Self::Auto
    }
}

/// Grid definition for the dashboard layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: u8,
    #[serde(default = "default_cols")]
    pub cols: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

/// Widget slot configuration. The `id` doubles as the card title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub widget: String,
    pub row: i32,
    pub col: i32,
    #[serde(default = "default_span")]
    pub row_span: u8,
    #[serde(default = "default_span")]
    pub col_span: u8,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default = "default_overflow_mode")]
    pub overflow: OverflowMode,
}

impl SlotConfig {
    pub fn with_widget(widget: &str, row: i32, col: i32) -> Self {
        Self {
            id: None,
            widget: widget.to_string(),
            row,
            col,
            row_span: default_span(),
            col_span: default_span(),
            settings: serde_json::Value::Object(Default::default()),
            overflow: default_overflow_mode(),
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.id = Some(title.to_string());
        self
    }
}

/// Primary dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub grid: GridConfig,
    /// Below this available width (logical pixels) the cards are stacked in
    /// a single column.
    #[serde(default = "default_stack_below_width")]
    pub stack_below_width: f32,
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            grid: GridConfig::default(),
            stack_below_width: default_stack_below_width(),
            slots: vec![
                SlotConfig::with_widget("todo_list", 0, 0).titled("To-Do List"),
                SlotConfig::with_widget("kpi_chart", 0, 1).titled("Progress"),
                SlotConfig::with_widget("project_links", 0, 2).titled("Projects"),
            ],
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from disk. A missing or empty file yields the
    /// default three-card layout. Unknown widget types are filtered out
    /// using the provided registry.
    pub fn load(path: impl AsRef<Path>, registry: &WidgetRegistry) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut cfg: DashboardConfig = serde_json::from_str(&content)?;
        let warnings = cfg.sanitize(registry);
        for w in warnings {
            tracing::warn!("{w}");
        }
        Ok(cfg)
    }

    /// Save the configuration to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Remove unsupported widgets and normalize empty settings.
    pub fn sanitize(&mut self, registry: &WidgetRegistry) -> Vec<String> {
        let mut warnings = Vec::new();
        self.slots.retain(|slot| {
            if slot.widget.is_empty() {
                return false;
            }
            if !registry.contains(&slot.widget) {
                warnings.push(format!(
                    "unknown dashboard widget '{}' dropped (available: {})",
                    slot.widget,
                    registry.names().join(", ")
                ));
                return false;
            }
            true
        });
        for slot in &mut self.slots {
            if slot.settings.is_null() {
                slot.settings = registry
                    .default_settings(&slot.widget)
                    .unwrap_or_else(|| json!({}));
            }
        }
        if !self.stack_below_width.is_finite() || self.stack_below_width < 0.0 {
            warnings.push(format!(
                "invalid stack_below_width {} reset to {}",
                self.stack_below_width,
                default_stack_below_width()
            ));
            self.stack_below_width = default_stack_below_width();
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_three_titled_cards() {
        let cfg = DashboardConfig::default();
        let titles: Vec<_> = cfg.slots.iter().filter_map(|s| s.id.as_deref()).collect();
        assert_eq!(titles, ["To-Do List", "Progress", "Projects"]);
        assert_eq!(cfg.grid, GridConfig { rows: 1, cols: 3 });
        assert_eq!(cfg.stack_below_width, 768.0);
    }

    #[test]
    fn sanitize_fills_null_settings_and_drops_unknown() {
        let registry = WidgetRegistry::with_defaults();
        let mut cfg = DashboardConfig {
            slots: vec![
                SlotConfig {
                    settings: serde_json::Value::Null,
                    ..SlotConfig::with_widget("kpi_chart", 0, 0)
                },
                SlotConfig::with_widget("weather", 0, 1),
                SlotConfig::with_widget("", 0, 2),
            ],
            ..DashboardConfig::default()
        };
        let warnings = cfg.sanitize(&registry);
        assert_eq!(
            warnings,
            ["unknown dashboard widget 'weather' dropped (available: kpi_chart, project_links, todo_list)"]
        );
        assert_eq!(cfg.slots.len(), 1);
        assert_eq!(cfg.slots[0].settings["diameter"], json!(200.0));
    }

    #[test]
    fn negative_breakpoint_is_reset() {
        let registry = WidgetRegistry::with_defaults();
        let mut cfg = DashboardConfig {
            stack_below_width: -5.0,
            ..DashboardConfig::default()
        };
        let warnings = cfg.sanitize(&registry);
        assert_eq!(warnings.len(), 1);
        assert_eq!(cfg.stack_below_width, 768.0);
    }
}
