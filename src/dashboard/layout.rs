use crate::dashboard::config::{DashboardConfig, GridConfig, OverflowMode, SlotConfig};
use crate::dashboard::widgets::WidgetRegistry;
use eframe::egui;
use serde_json::Value;

/// Space between neighbouring cards.
pub const CARD_GAP: f32 = 10.0;
/// Height of a card when the layout is stacked.
pub const STACKED_CARD_HEIGHT: f32 = 320.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSlot {
    pub id: Option<String>,
    pub widget: String,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
    pub settings: Value,
    pub overflow: OverflowMode,
}

impl NormalizedSlot {
    pub fn title(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.widget)
    }
}

/// Validate and normalize slot positions to the configured grid size.
pub fn normalize_slots(
    cfg: &DashboardConfig,
    registry: &WidgetRegistry,
) -> (Vec<NormalizedSlot>, Vec<String>) {
    let rows = cfg.grid.rows.max(1) as usize;
    let cols = cfg.grid.cols.max(1) as usize;
    let mut occupied = vec![vec![false; cols]; rows];
    let mut normalized = Vec::new();
    let mut warnings = Vec::new();

    for slot in &cfg.slots {
        if !registry.contains(&slot.widget) {
            warnings.push(format!("dropping unknown widget '{}'", slot.widget));
            continue;
        }
        if let Some(ns) = normalize_slot(slot, rows, cols, &mut occupied) {
            normalized.push(ns);
        } else {
            warnings.push(format!(
                "slot for widget '{}' is outside the grid or overlaps another and was ignored",
                slot.widget
            ));
        }
    }

    (normalized, warnings)
}

fn normalize_slot(
    slot: &SlotConfig,
    rows: usize,
    cols: usize,
    occupied: &mut [Vec<bool>],
) -> Option<NormalizedSlot> {
    if slot.row < 0 || slot.col < 0 {
        return None;
    }
    let row = slot.row as usize;
    let col = slot.col as usize;
    if row >= rows || col >= cols {
        return None;
    }
    let row_span = (slot.row_span.max(1) as usize).min(rows - row);
    let col_span = (slot.col_span.max(1) as usize).min(cols - col);

    for r in row..row + row_span {
        for c in col..col + col_span {
            if occupied[r][c] {
                return None;
            }
        }
    }
    for r in row..row + row_span {
        for c in col..col + col_span {
            occupied[r][c] = true;
        }
    }

    Some(NormalizedSlot {
        id: slot.id.clone(),
        widget: slot.widget.clone(),
        row,
        col,
        row_span,
        col_span,
        settings: slot.settings.clone(),
        overflow: slot.overflow,
    })
}

/// Indices of `slots` in reading order (row-major), used for the stacked
/// single-column layout.
pub fn stacked_order(slots: &[NormalizedSlot]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by_key(|&i| (slots[i].row, slots[i].col));
    order
}

/// Total height needed to stack `count` cards.
pub fn stacked_height(count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * STACKED_CARD_HEIGHT + (count - 1) as f32 * CARD_GAP
}

/// Screen rectangles for each slot, in the same order as `slots`.
pub fn slot_rects(
    area: egui::Rect,
    grid: &GridConfig,
    slots: &[NormalizedSlot],
    stacked: bool,
) -> Vec<egui::Rect> {
    let mut rects = vec![egui::Rect::NOTHING; slots.len()];
    if stacked {
        for (rank, idx) in stacked_order(slots).into_iter().enumerate() {
            let top = area.min.y + rank as f32 * (STACKED_CARD_HEIGHT + CARD_GAP);
            rects[idx] = egui::Rect::from_min_size(
                egui::pos2(area.min.x, top),
                egui::vec2(area.width(), STACKED_CARD_HEIGHT),
            );
        }
        return rects;
    }

    let cols = grid.cols.max(1) as usize;
    let rows = grid.rows.max(1) as usize;
    let col_width = ((area.width() - CARD_GAP * (cols - 1) as f32) / cols as f32).max(0.0);
    let row_height = ((area.height() - CARD_GAP * (rows - 1) as f32) / rows as f32).max(0.0);
    for (rect, slot) in rects.iter_mut().zip(slots) {
        let min = area.min
            + egui::vec2(
                slot.col as f32 * (col_width + CARD_GAP),
                slot.row as f32 * (row_height + CARD_GAP),
            );
        let size = egui::vec2(
            col_width * slot.col_span as f32 + CARD_GAP * (slot.col_span - 1) as f32,
            row_height * slot.row_span as f32 + CARD_GAP * (slot.row_span - 1) as f32,
        );
        *rect = egui::Rect::from_min_size(min, size);
    }
    rects
}
