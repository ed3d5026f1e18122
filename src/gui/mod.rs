pub mod splash;
pub mod theme;

use crate::dashboard::{
    Dashboard, DashboardContext, DashboardDataCache, WidgetAction, WidgetRegistry,
};
use crate::seed::DataSeeder;
use crate::settings::Settings;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const HEADER_TITLE: &str = "My to do list";
pub const HEADER_SUBTITLE: &str = "Manage tasks, track progress, and explore projects efficiently.";

/// Opens a URL outside the application.
pub type LinkOpener = fn(&str) -> std::io::Result<()>;

fn open_in_browser(url: &str) -> std::io::Result<()> {
    open::that(url)
}

/// Which top-level view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Splash { started: Instant },
    Ready,
}

pub struct DashboardApp {
    phase: LoadPhase,
    splash_duration: Duration,
    data_cache: Arc<DashboardDataCache>,
    seeder: DataSeeder,
    pub dashboard: Dashboard,
    toasts: Toasts,
    enable_toasts: bool,
    toast_duration: f32,
    link_opener: LinkOpener,
}

impl DashboardApp {
    /// Build the app and start the splash and seed timers.
    pub fn new(ctx: &egui::Context, settings: &Settings, dashboard_path: PathBuf) -> Self {
        theme::apply(ctx, settings.theme);
        let data_cache = Arc::new(DashboardDataCache::new());
        let seeder = DataSeeder::spawn(
            Arc::clone(&data_cache),
            settings.seed_delay(),
            Some(ctx.clone()),
        );
        let dashboard = Dashboard::new(&dashboard_path, WidgetRegistry::with_defaults());
        tracing::info!(
            layout = %dashboard_path.display(),
            splash_ms = settings.splash_duration_ms,
            seed_ms = settings.seed_delay_ms,
            "dashboard starting"
        );
        Self {
            phase: LoadPhase::Splash {
                started: Instant::now(),
            },
            splash_duration: settings.splash_duration(),
            data_cache,
            seeder,
            dashboard,
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            enable_toasts: settings.enable_toasts,
            toast_duration: settings.toast_duration,
            link_opener: open_in_browser,
        }
    }

    pub fn with_link_opener(mut self, opener: LinkOpener) -> Self {
        self.link_opener = opener;
        self
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn data_cache(&self) -> &Arc<DashboardDataCache> {
        &self.data_cache
    }

    pub fn is_seeded(&self) -> bool {
        self.seeder.is_finished()
    }

    /// Leave the splash once its duration has passed at `now`.
    ///
    /// Returns `true` while the splash should still be shown.
    pub fn advance(&mut self, now: Instant) -> bool {
        let LoadPhase::Splash { started } = self.phase else {
            return false;
        };
        if splash::is_finished(now.saturating_duration_since(started), self.splash_duration) {
            self.phase = LoadPhase::Ready;
            tracing::info!(seeded = self.is_seeded(), "splash finished");
            return false;
        }
        true
    }

    fn notify(&mut self, text: String, kind: ToastKind) {
        tracing::debug!(toast = %text);
        if self.enable_toasts {
            self.toasts.add(Toast {
                text: text.into(),
                kind,
                options: ToastOptions::default().duration_in_seconds(self.toast_duration as f64),
            });
        }
    }

    pub fn handle_action(&mut self, action: WidgetAction) {
        match action {
            WidgetAction::OpenLink { name, url } => {
                tracing::info!(%url, "opening project link");
                if let Err(e) = (self.link_opener)(&url) {
                    tracing::error!(%url, "failed to open link: {e}");
                    self.notify(format!("Could not open {name}: {e}"), ToastKind::Error);
                }
            }
            WidgetAction::TodoAdded { text } => {
                self.notify(format!("Added \"{}\"", text.trim()), ToastKind::Success);
            }
        }
    }

    fn header_ui(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(10.0);
            ui.heading(egui::RichText::new(HEADER_TITLE).size(28.0).strong());
            ui.label(HEADER_SUBTITLE);
            ui.add_space(20.0);
        });
    }

    fn ready_ui(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.dashboard.reload();
            let warnings = self.dashboard.warnings.len();
            if warnings > 0 {
                self.notify(
                    format!("Layout reloaded with {warnings} warning(s)"),
                    ToastKind::Warning,
                );
            } else {
                self.notify("Layout reloaded".into(), ToastKind::Info);
            }
        }

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                Self::header_ui(ui);
                let dash_ctx = DashboardContext {
                    data_cache: &self.data_cache,
                };
                self.dashboard.ui(ui, &dash_ctx)
            })
            .inner;
        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    /// Draw one frame.
    pub fn ui(&mut self, ctx: &egui::Context) {
        if let LoadPhase::Splash { started } = self.phase {
            ctx.request_repaint();
            if self.advance(Instant::now()) {
                splash::show(ctx, started.elapsed());
            }
        }
        if self.phase == LoadPhase::Ready {
            self.ready_ui(ctx);
        }
        if self.enable_toasts {
            self.toasts.show(ctx);
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
