use super::{Widget, WidgetAction};
use crate::dashboard::dashboard::DashboardContext;
use crate::model::Kpi;
use eframe::egui::{self, Color32, Pos2, Stroke};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f32::consts::TAU;

/// Slice colours, cycled when there are more KPIs than entries.
pub const PALETTE: [Color32; 5] = [
    Color32::from_rgb(0xFF, 0x63, 0x84),
    Color32::from_rgb(0x36, 0xA2, 0xEB),
    Color32::from_rgb(0xFF, 0xCE, 0x56),
    Color32::from_rgb(0x4B, 0xC0, 0xC0),
    Color32::from_rgb(0x99, 0x66, 0xFF),
];

/// Triangles used for a full turn of the pie.
const SEGMENTS_PER_TURN: f32 = 128.0;

fn default_diameter() -> f32 {
    200.0
}

fn default_show_legend() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiChartConfig {
    #[serde(default = "default_diameter")]
    pub diameter: f32,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
}

impl Default for KpiChartConfig {
    fn default() -> Self {
        Self {
            diameter: default_diameter(),
            show_legend: default_show_legend(),
        }
    }
}

/// One drawn wedge of the pie. Angles are radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Index of the KPI this slice represents.
    pub kpi: usize,
    pub label: String,
    pub value: u8,
    pub fraction: f32,
    pub start: f32,
    pub sweep: f32,
    pub color: Color32,
}

impl PieSlice {
    pub fn end(&self) -> f32 {
        self.start + self.sweep
    }
}

pub fn kpi_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Lay out the visible, non-zero KPIs as consecutive wedges.
pub fn pie_slices(kpis: &[Kpi], hidden: &HashSet<usize>) -> Vec<PieSlice> {
    let total: u32 = kpis
        .iter()
        .enumerate()
        .filter(|(i, _)| !hidden.contains(i))
        .map(|(_, k)| k.percentage as u32)
        .sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    let mut slices = Vec::new();
    for (i, kpi) in kpis.iter().enumerate() {
        if hidden.contains(&i) || kpi.percentage == 0 {
            continue;
        }
        let fraction = kpi.percentage as f32 / total as f32;
        let sweep = fraction * TAU;
        slices.push(PieSlice {
            kpi: i,
            label: kpi.name.clone(),
            value: kpi.percentage,
            fraction,
            start,
            sweep,
            color: kpi_color(i),
        });
        start += sweep;
    }
    slices
}

/// Index into `slices` of the wedge covering `angle`.
pub fn slice_at(slices: &[PieSlice], angle: f32) -> Option<usize> {
    let angle = angle.rem_euclid(TAU);
    slices
        .iter()
        .position(|s| angle >= s.start && angle < s.end())
        .or_else(|| {
            // Float rounding can leave the last wedge ending just short of a
            // full turn.
            slices.last().filter(|s| angle >= s.start).map(|_| slices.len() - 1)
        })
}

fn point_on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + egui::vec2(angle.sin(), -angle.cos()) * radius
}

fn pointer_angle(center: Pos2, pos: Pos2) -> f32 {
    let d = pos - center;
    d.x.atan2(-d.y).rem_euclid(TAU)
}

fn slice_mesh(center: Pos2, radius: f32, slice: &PieSlice) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    let segments = ((slice.sweep / TAU * SEGMENTS_PER_TURN).ceil() as u32).max(1);
    mesh.colored_vertex(center, slice.color);
    for step in 0..=segments {
        let angle = slice.start + slice.sweep * step as f32 / segments as f32;
        mesh.colored_vertex(point_on_circle(center, radius, angle), slice.color);
    }
    for step in 0..segments {
        mesh.add_triangle(0, step + 1, step + 2);
    }
    mesh
}

/// Read-only pie chart of KPI percentages with a toggleable legend.
pub struct KpiChartWidget {
    cfg: KpiChartConfig,
    hidden: HashSet<usize>,
}

impl KpiChartWidget {
    pub fn new(cfg: KpiChartConfig) -> Self {
        Self {
            cfg,
            hidden: HashSet::new(),
        }
    }

    fn toggle(&mut self, kpi: usize) {
        if !self.hidden.remove(&kpi) {
            self.hidden.insert(kpi);
        }
    }

    fn chart_ui(&self, ui: &mut egui::Ui, kpis: &[Kpi]) {
        let slices = pie_slices(kpis, &self.hidden);
        if slices.is_empty() {
            ui.weak("No progress data");
            return;
        }

        let diameter = self
            .cfg
            .diameter
            .clamp(40.0, ui.available_width().max(40.0));
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(diameter, diameter), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = diameter / 2.0;

        let hovered = response
            .hover_pos()
            .filter(|pos| pos.distance(center) <= radius)
            .and_then(|pos| slice_at(&slices, pointer_angle(center, pos)));

        for (i, slice) in slices.iter().enumerate() {
            let mut mesh = slice_mesh(center, radius, slice);
            if hovered == Some(i) {
                let dimmed = slice.color.linear_multiply(0.8);
                for v in &mut mesh.vertices {
                    v.color = dimmed;
                }
            }
            painter.add(egui::Shape::mesh(mesh));
        }
        if slices.len() > 1 {
            let border = Stroke::new(2.0, ui.visuals().panel_fill);
            for slice in &slices {
                painter.line_segment(
                    [center, point_on_circle(center, radius, slice.start)],
                    border,
                );
            }
        }

        if let Some(slice) = hovered.and_then(|i| slices.get(i)) {
            response.on_hover_text_at_pointer(format!("{}: {}", slice.label, slice.value));
        }
    }

    fn legend_ui(&mut self, ui: &mut egui::Ui, kpis: &[Kpi]) {
        let mut toggled = None;
        ui.horizontal_wrapped(|ui| {
            for (i, kpi) in kpis.iter().enumerate() {
                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, kpi_color(i));
                let mut text = egui::RichText::new(&kpi.name);
                if self.hidden.contains(&i) {
                    text = text.strikethrough().weak();
                }
                if ui
                    .add(egui::Label::new(text).sense(egui::Sense::click()))
                    .on_hover_text("Click to show or hide")
                    .clicked()
                {
                    toggled = Some(i);
                }
            }
        });
        if let Some(i) = toggled {
            self.toggle(i);
            tracing::debug!(kpi = i, hidden = self.hidden.contains(&i), "legend toggled");
        }
    }
}

impl Default for KpiChartWidget {
    fn default() -> Self {
        Self::new(KpiChartConfig::default())
    }
}

impl Widget for KpiChartWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        let snapshot = ctx.data_cache.snapshot();
        ui.vertical_centered(|ui| {
            ui.strong("KPI Pie Chart");
            ui.add_space(6.0);
            if !snapshot.seeded && snapshot.kpis.is_empty() {
                ui.spinner();
                return;
            }
            if self.cfg.show_legend && !snapshot.kpis.is_empty() {
                self.legend_ui(ui, &snapshot.kpis);
                ui.add_space(6.0);
            }
            self.chart_ui(ui, &snapshot.kpis);
        });
        None
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<KpiChartConfig>(settings.clone()) {
            self.cfg = cfg;
        }
    }
}
