use crate::settings::ThemeMode;
use eframe::egui::{self, epaint::Shadow, Color32, Stroke};

/// Fill of the primary action button.
pub const ACCENT: Color32 = Color32::from_rgb(0x00, 0x7b, 0xff);
const LIGHT_CARD_BORDER: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);

pub fn visuals_for(mode: ThemeMode, defaults: &egui::Visuals) -> egui::Visuals {
    match mode {
        ThemeMode::System => defaults.clone(),
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::Light => {
            let mut visuals = egui::Visuals::light();
            visuals.panel_fill = Color32::WHITE;
            visuals.window_fill = Color32::WHITE;
            visuals.hyperlink_color = Color32::BLACK;
            visuals
        }
    }
}

pub fn apply(ctx: &egui::Context, mode: ThemeMode) {
    let visuals = visuals_for(mode, &ctx.style().visuals);
    ctx.set_visuals(visuals);
}

/// Frame drawn around every dashboard card.
pub fn card_frame(style: &egui::Style) -> egui::Frame {
    let border = if style.visuals.dark_mode {
        style.visuals.widgets.noninteractive.bg_stroke.color
    } else {
        LIGHT_CARD_BORDER
    };
    egui::Frame::group(style)
        .fill(style.visuals.panel_fill)
        .stroke(Stroke::new(1.0, border))
        .rounding(10.0)
        .inner_margin(16.0)
        .shadow(Shadow {
            offset: egui::vec2(2.0, 2.0),
            blur: 10.0,
            spread: 0.0,
            color: Color32::from_black_alpha(72),
        })
}

/// Filled button used for the task form's submit action.
pub fn accent_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(Color32::WHITE))
        .fill(ACCENT)
        .rounding(5.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_mode_keeps_defaults() {
        let base = egui::Visuals::dark();
        assert_eq!(visuals_for(ThemeMode::System, &base), base);
    }

    #[test]
    fn light_mode_uses_plain_links() {
        let visuals = visuals_for(ThemeMode::Light, &egui::Visuals::dark());
        assert!(!visuals.dark_mode);
        assert_eq!(visuals.hyperlink_color, Color32::BLACK);
        assert_eq!(visuals.panel_fill, Color32::WHITE);
    }

    #[test]
    fn card_border_follows_mode() {
        let mut style = egui::Style::default();
        style.visuals = visuals_for(ThemeMode::Light, &style.visuals);
        let frame = card_frame(&style);
        assert_eq!(frame.stroke.color, LIGHT_CARD_BORDER);
        assert_eq!(frame.rounding, egui::Rounding::same(10.0));

        style.visuals = visuals_for(ThemeMode::Dark, &style.visuals);
        assert_ne!(card_frame(&style).stroke.color, LIGHT_CARD_BORDER);
    }
}
