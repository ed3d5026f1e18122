use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Colour scheme applied to the egui context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Light
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// How long the splash view stays up, in milliseconds.
    #[serde(default = "default_splash_duration_ms")]
    pub splash_duration_ms: u64,
    /// Delay before the in-memory collections are seeded, in milliseconds.
    #[serde(default = "default_seed_delay_ms")]
    pub seed_delay_ms: u64,
    /// Initial inner window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(i32, i32)>,
    #[serde(default)]
    pub theme: ThemeMode,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Dashboard layout file. Relative paths resolve against the settings
    /// file's directory.
    #[serde(default)]
    pub dashboard_path: Option<String>,
}

fn default_splash_duration_ms() -> u64 {
    3000
}

fn default_seed_delay_ms() -> u64 {
    2000
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

pub const DEFAULT_WINDOW_SIZE: (i32, i32) = (1100, 720);

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            splash_duration_ms: default_splash_duration_ms(),
            seed_delay_ms: default_seed_delay_ms(),
            window_size: None,
            theme: ThemeMode::default(),
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
            dashboard_path: None,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_duration_ms)
    }

    pub fn seed_delay(&self) -> Duration {
        Duration::from_millis(self.seed_delay_ms)
    }

    pub fn window_size(&self) -> (f32, f32) {
        let (w, h) = self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE);
        (w.max(320) as f32, h.max(240) as f32)
    }

    /// Resolve the dashboard layout file relative to `settings_path`.
    pub fn dashboard_config_path(&self, settings_path: impl AsRef<Path>) -> PathBuf {
        let base = settings_path
            .as_ref()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        match &self.dashboard_path {
            Some(p) if Path::new(p).is_absolute() => PathBuf::from(p),
            Some(p) => base.join(p),
            None => base.join("dashboard.json"),
        }
    }
}
