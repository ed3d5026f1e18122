use eframe::egui::{self, Align2, Color32, FontId};
use std::time::Duration;

pub const TITLE: &str = "Welcome to Mgee Dashboard";
pub const MESSAGE: &str = "Loading projects and tasks...";

const OVERLAY_FADE: f32 = 1.5;
const TITLE_SLIDE: f32 = 1.0;
const TITLE_SLIDE_DISTANCE: f32 = 30.0;
const MESSAGE_DELAY: f32 = 1.0;
const MESSAGE_FADE: f32 = 2.0;
/// Darkness of the fully faded-in overlay.
const OVERLAY_OPACITY: f32 = 0.8;

fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn progress(elapsed: f32, delay: f32, duration: f32) -> f32 {
    ((elapsed - delay) / duration).clamp(0.0, 1.0)
}

/// Animation state of the splash view at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashFrame {
    /// Opacity of the whole view, `0..=1`.
    pub opacity: f32,
    /// Downward offset of the title in logical pixels.
    pub title_offset: f32,
    pub title_opacity: f32,
    pub message_opacity: f32,
}

impl SplashFrame {
    pub fn at(elapsed: Duration) -> Self {
        let t = elapsed.as_secs_f32();
        let opacity = progress(t, 0.0, OVERLAY_FADE);
        let slide = ease_out(progress(t, 0.0, TITLE_SLIDE));
        Self {
            opacity,
            title_offset: TITLE_SLIDE_DISTANCE * (1.0 - slide),
            title_opacity: slide,
            message_opacity: ease_out(progress(t, MESSAGE_DELAY, MESSAGE_FADE)),
        }
    }

    /// Whether every animation has reached its final state.
    pub fn is_settled(&self) -> bool {
        self.opacity >= 1.0 && self.title_opacity >= 1.0 && self.message_opacity >= 1.0
    }

    /// Background fill: the overlay darkening a white page.
    pub fn background(&self) -> Color32 {
        let darkness = OVERLAY_OPACITY * self.opacity;
        Color32::from_gray((255.0 * (1.0 - darkness)).round() as u8)
    }
}

pub fn is_finished(elapsed: Duration, duration: Duration) -> bool {
    elapsed >= duration
}

/// Draw the splash over the whole window.
pub fn show(ctx: &egui::Context, elapsed: Duration) {
    let frame = SplashFrame::at(elapsed);
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(frame.background()))
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            let painter = ui.painter();
            let center = rect.center();
            let alpha = |a: f32| (255.0 * a * frame.opacity).round() as u8;
            painter.text(
                center + egui::vec2(0.0, frame.title_offset - 24.0),
                Align2::CENTER_CENTER,
                TITLE,
                FontId::proportional(32.0),
                Color32::from_white_alpha(alpha(frame.title_opacity)),
            );
            painter.text(
                center + egui::vec2(0.0, 24.0),
                Align2::CENTER_CENTER,
                MESSAGE,
                FontId::proportional(24.0),
                Color32::from_white_alpha(alpha(frame.message_opacity)),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_invisible() {
        let frame = SplashFrame::at(Duration::ZERO);
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.title_offset, TITLE_SLIDE_DISTANCE);
        assert_eq!(frame.message_opacity, 0.0);
        assert_eq!(frame.background(), Color32::from_gray(255));
    }

    #[test]
    fn message_waits_for_its_delay() {
        let frame = SplashFrame::at(Duration::from_millis(900));
        assert_eq!(frame.message_opacity, 0.0);
        assert!(frame.title_opacity > 0.9);
        let later = SplashFrame::at(Duration::from_millis(2000));
        assert!(later.message_opacity > 0.0 && later.message_opacity < 1.0);
    }

    #[test]
    fn settles_after_three_seconds() {
        let frame = SplashFrame::at(Duration::from_secs(3));
        assert!(frame.is_settled());
        assert_eq!(frame.title_offset, 0.0);
        assert_eq!(frame.background(), Color32::from_gray(51));
        assert!(!SplashFrame::at(Duration::from_millis(2500)).is_settled());
    }

    #[test]
    fn finishes_at_duration() {
        let duration = Duration::from_secs(3);
        assert!(!is_finished(Duration::from_millis(2999), duration));
        assert!(is_finished(duration, duration));
    }

    #[test]
    fn renders_headless() {
        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |ctx| show(ctx, Duration::from_secs(1)));
    }
}
