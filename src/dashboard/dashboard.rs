use crate::dashboard::config::{DashboardConfig, OverflowMode};
use crate::dashboard::data_cache::DashboardDataCache;
use crate::dashboard::layout::{normalize_slots, slot_rects, stacked_height, NormalizedSlot};
use crate::dashboard::widgets::{Widget, WidgetAction, WidgetRegistry};
use crate::gui::theme::card_frame;
use eframe::egui;
use eframe::egui::scroll_area::ScrollBarVisibility;
#[cfg(test)]
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

/// Context shared with widgets at render time.
pub struct DashboardContext<'a> {
    pub data_cache: &'a DashboardDataCache,
}

struct SlotRuntime {
    slot: NormalizedSlot,
    widget: Box<dyn Widget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SlotKey {
    Id {
        id: String,
        widget: String,
    },
    Position {
        widget: String,
        row: usize,
        col: usize,
    },
}

impl SlotKey {
    fn from_slot(slot: &NormalizedSlot) -> Self {
        if let Some(id) = &slot.id {
            SlotKey::Id {
                id: id.clone(),
                widget: slot.widget.clone(),
            }
        } else {
            SlotKey::Position {
                widget: slot.widget.clone(),
                row: slot.row,
                col: slot.col,
            }
        }
    }
}

pub struct Dashboard {
    config_path: PathBuf,
    pub config: DashboardConfig,
    pub slots: Vec<NormalizedSlot>,
    runtime_slots: Vec<SlotRuntime>,
    registry: WidgetRegistry,
    pub warnings: Vec<String>,
}

impl Dashboard {
    pub fn new(config_path: impl AsRef<Path>, registry: WidgetRegistry) -> Self {
        let path = config_path.as_ref().to_path_buf();
        let (config, slots, warnings) = Self::load_internal(&path, &registry);
        let mut dashboard = Self {
            config_path: path,
            config,
            slots: Vec::new(),
            runtime_slots: Vec::new(),
            registry,
            warnings,
        };
        dashboard.rebuild_runtime_slots(slots);
        dashboard
    }

    fn load_internal(
        path: &Path,
        registry: &WidgetRegistry,
    ) -> (DashboardConfig, Vec<NormalizedSlot>, Vec<String>) {
        let mut warnings = Vec::new();
        let cfg = DashboardConfig::load(path, registry).unwrap_or_else(|e| {
            warnings.push(format!(
                "failed to load dashboard layout {}: {e}; using default layout",
                path.display()
            ));
            DashboardConfig::default()
        });
        let (slots, normalize_warnings) = normalize_slots(&cfg, registry);
        warnings.extend(normalize_warnings);
        if slots.is_empty() {
            warnings.push("dashboard has no valid slots".into());
        }
        for w in &warnings {
            tracing::warn!("{w}");
        }
        (cfg, slots, warnings)
    }

    fn rebuild_runtime_slots(&mut self, slots: Vec<NormalizedSlot>) {
        let mut reusable: HashMap<SlotKey, SlotRuntime> = self
            .runtime_slots
            .drain(..)
            .map(|rt| (SlotKey::from_slot(&rt.slot), rt))
            .collect();

        let mut runtime_slots = Vec::with_capacity(slots.len());
        for slot in &slots {
            let key = SlotKey::from_slot(slot);
            if let Some(mut runtime) = reusable.remove(&key) {
                if runtime.slot.settings != slot.settings {
                    runtime.widget.on_config_updated(&slot.settings);
                }
                runtime.slot = slot.clone();
                runtime_slots.push(runtime);
            } else if let Some(widget) = self.registry.create(&slot.widget, &slot.settings) {
                runtime_slots.push(SlotRuntime {
                    slot: slot.clone(),
                    widget,
                });
            }
        }

        self.slots = slots;
        self.runtime_slots = runtime_slots;
    }

    /// Re-read the layout file, keeping widget instances (and their input
    /// state) for slots that still exist.
    pub fn reload(&mut self) {
        let (cfg, slots, warnings) = Self::load_internal(&self.config_path, &self.registry);
        self.config = cfg;
        self.warnings = warnings;
        self.rebuild_runtime_slots(slots);
        tracing::info!(slots = self.slots.len(), "dashboard layout reloaded");
    }

    /// Whether cards are stacked in one column at `width`.
    pub fn is_stacked(&self, width: f32) -> bool {
        width < self.config.stack_below_width
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        if self.is_stacked(ui.available_width()) {
            self.stacked_ui(ui, ctx)
        } else {
            let size = egui::vec2(ui.available_width(), ui.available_height());
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            self.render_slots(ui, rect, false, ctx)
        }
    }

    fn stacked_ui(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        egui::ScrollArea::vertical()
            .id_source("dashboard-stacked")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let size = egui::vec2(
                    ui.available_width(),
                    stacked_height(self.runtime_slots.len()),
                );
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                self.render_slots(ui, rect, true, ctx)
            })
            .inner
    }

    fn render_slots(
        &mut self,
        ui: &mut egui::Ui,
        area: egui::Rect,
        stacked: bool,
        ctx: &DashboardContext<'_>,
    ) -> Option<WidgetAction> {
        let normalized: Vec<NormalizedSlot> =
            self.runtime_slots.iter().map(|rt| rt.slot.clone()).collect();
        let rects = slot_rects(area, &self.config.grid, &normalized, stacked);
        let mut child = ui.child_ui(area, egui::Layout::top_down(egui::Align::LEFT));
        let mut clicked = None;

        for (slot, slot_rect) in self.runtime_slots.iter_mut().zip(rects) {
            let slot_clip = slot_rect.intersect(child.clip_rect());
            let response = child.allocate_ui_at_rect(slot_rect, |slot_ui| {
                slot_ui.set_clip_rect(slot_clip);
                slot_ui.set_min_size(slot_rect.size());
                Self::render_slot(slot, slot_rect, slot_clip, slot_ui, ctx)
            });
            clicked = clicked.or(response.inner);
        }

        clicked
    }

    fn render_slot(
        slot: &mut SlotRuntime,
        slot_rect: egui::Rect,
        slot_clip: egui::Rect,
        ui: &mut egui::Ui,
        ctx: &DashboardContext<'_>,
    ) -> Option<WidgetAction> {
        let frame = card_frame(ui.style());
        let inner_rect = slot_rect.shrink2(frame.total_margin().sum() / 2.0);

        frame
            .show(ui, |ui| {
                ui.set_min_size(inner_rect.size());
                ui.set_max_width(inner_rect.width());
                ui.vertical(|ui| {
                    let heading_rect = ui
                        .vertical_centered(|ui| ui.heading(slot.slot.title()).rect)
                        .inner;
                    let body_height = (inner_rect.height()
                        - heading_rect.height()
                        - ui.spacing().item_spacing.y)
                        .max(0.0);
                    match slot.slot.overflow {
                        OverflowMode::Clip => {
                            Self::render_clipped_widget(slot, ui, ctx, body_height)
                        }
                        OverflowMode::Scroll => Self::render_scrollable_widget(
                            slot,
                            ui,
                            ctx,
                            body_height,
                            slot_clip,
                            ScrollBarVisibility::AlwaysVisible,
                        ),
                        OverflowMode::Auto => Self::render_scrollable_widget(
                            slot,
                            ui,
                            ctx,
                            body_height,
                            slot_clip,
                            ScrollBarVisibility::VisibleWhenNeeded,
                        ),
                    }
                })
                .inner
            })
            .inner
    }

    fn render_clipped_widget(
        slot: &mut SlotRuntime,
        ui: &mut egui::Ui,
        ctx: &DashboardContext<'_>,
        body_height: f32,
    ) -> Option<WidgetAction> {
        ui.set_min_height(body_height);
        ui.set_max_height(body_height);
        slot.widget.render(ui, ctx)
    }

    fn render_scrollable_widget(
        slot: &mut SlotRuntime,
        ui: &mut egui::Ui,
        ctx: &DashboardContext<'_>,
        body_height: f32,
        slot_clip: egui::Rect,
        visibility: ScrollBarVisibility,
    ) -> Option<WidgetAction> {
        let scroll_id = egui::Id::new((
            "slot-scroll",
            slot.slot.id.as_deref().unwrap_or(&slot.slot.widget),
            slot.slot.row,
            slot.slot.col,
        ));
        #[cfg(test)]
        SCROLL_VISIBILITY_RECORDS.lock().unwrap().push(visibility);

        egui::ScrollArea::vertical()
            .id_source(scroll_id)
            .auto_shrink([false; 2])
            .max_height(body_height)
            .scroll_bar_visibility(visibility)
            .show(ui, |ui| {
                ui.set_clip_rect(ui.clip_rect().intersect(slot_clip));
                slot.widget.render(ui, ctx)
            })
            .inner
    }
}

#[cfg(test)]
static SCROLL_VISIBILITY_RECORDS: Lazy<Mutex<Vec<ScrollBarVisibility>>> =
    Lazy::new(|| Mutex::new(Vec::new()));
