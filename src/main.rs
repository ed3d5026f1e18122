use mgee_dashboard::gui::DashboardApp;
use mgee_dashboard::logging;
use mgee_dashboard::settings::Settings;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".into());
    let (settings, load_error) = match Settings::load(&settings_path) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    logging::init(settings.debug_logging);
    if let Some(e) = load_error {
        tracing::warn!("failed to load {settings_path}: {e}; using default settings");
    }

    let dashboard_path = settings.dashboard_config_path(&settings_path);
    let (width, height) = settings.window_size();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Mgee Dashboard")
            .with_inner_size([width, height])
            .with_min_inner_size([360.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mgee Dashboard",
        native_options,
        Box::new(move |cc| Box::new(DashboardApp::new(&cc.egui_ctx, &settings, dashboard_path))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
