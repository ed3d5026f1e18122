//! Hardcoded dashboard contents and the delayed step that loads them.

use crate::dashboard::DashboardDataCache;
use crate::model::{Kpi, Project};
use eframe::egui;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

pub fn seed_todos() -> Vec<String> {
    vec![
        "Complete React project".into(),
        "Master APIs".into(),
        "Master styled components".into(),
        "Master Typescript".into(),
    ]
}

pub fn seed_kpis() -> Vec<Kpi> {
    vec![
        Kpi::new("HTML", 100),
        Kpi::new("CSS", 100),
        Kpi::new("JavaScript", 100),
        Kpi::new("React", 80),
        Kpi::new("Redux", 0),
    ]
}

pub fn seed_projects() -> Vec<Project> {
    vec![
        Project::new(
            "Project 1: Submit Form",
            "https://submit-form-seven.vercel.app/",
        ),
        Project::new("Project 2: To-Do-List", "https://mgeetech.com"),
        Project::new(
            "Project 3:Sneaker-culture",
            "https://sneaker-culture.vercel.app/",
        ),
        Project::new(
            "Project 4:Grow-sphere",
            "https://grow-sphere-lemon.vercel.app/",
        ),
        Project::new(
            "Project 5:Submit-form(Typescript)",
            "https://typscript-form.vercel.app/",
        ),
        Project::new(
            "Project 3:My React Portfolio",
            "https://react-portfolio-omega-indol.vercel.app/",
        ),
    ]
}

/// Populate `cache` with the hardcoded collections right away.
pub fn seed_now(cache: &DashboardDataCache) {
    cache.seed(seed_todos(), seed_kpis(), seed_projects());
    tracing::info!("dashboard data seeded");
}

fn seed_inline(cache: &DashboardDataCache, finished: &AtomicBool, ctx: Option<&egui::Context>) {
    seed_now(cache);
    finished.store(true, Ordering::SeqCst);
    if let Some(ctx) = ctx {
        ctx.request_repaint();
    }
}

/// Seeds the data cache once, after a delay, from a background thread.
pub struct DataSeeder {
    handle: Option<JoinHandle<()>>,
    finished: Arc<AtomicBool>,
}

impl DataSeeder {
    /// Start seeding `cache` after `delay`. A zero delay seeds synchronously.
    /// When `ctx` is given a repaint is requested once the data is in place.
    pub fn spawn(
        cache: Arc<DashboardDataCache>,
        delay: Duration,
        ctx: Option<egui::Context>,
    ) -> Self {
        let finished = Arc::new(AtomicBool::new(false));
        if delay.is_zero() {
            seed_inline(&cache, &finished, ctx.as_ref());
            return Self {
                handle: None,
                finished,
            };
        }

        tracing::debug!(delay_ms = delay.as_millis() as u64, "scheduling data seed");
        let done = Arc::clone(&finished);
        let thread_cache = Arc::clone(&cache);
        let thread_ctx = ctx.clone();
        let spawned = std::thread::Builder::new()
            .name("dashboard-seed".into())
            .spawn(move || {
                std::thread::sleep(delay);
                seed_inline(&thread_cache, &done, thread_ctx.as_ref());
            });
        Self::from_spawn(spawned, &cache, finished, ctx.as_ref())
    }

    /// Seeds on the calling thread when no seed thread could be started.
    fn from_spawn(
        spawned: io::Result<JoinHandle<()>>,
        cache: &DashboardDataCache,
        finished: Arc<AtomicBool>,
        ctx: Option<&egui::Context>,
    ) -> Self {
        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!("failed to spawn seed thread: {e}; seeding immediately");
                seed_inline(cache, &finished, ctx);
                None
            }
        };
        Self { handle, finished }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Block until the seed thread has run.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("seed thread panicked");
            }
        }
    }
}
