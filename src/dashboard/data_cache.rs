use crate::model::{Kpi, Project};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct DashboardDataSnapshot {
    pub todos: Arc<Vec<String>>,
    pub kpis: Arc<Vec<Kpi>>,
    pub projects: Arc<Vec<Project>>,
    pub seeded: bool,
}

impl Default for DashboardDataSnapshot {
    fn default() -> Self {
        Self {
            todos: Arc::new(Vec::new()),
            kpis: Arc::new(Vec::new()),
            projects: Arc::new(Vec::new()),
            seeded: false,
        }
    }
}

impl DashboardDataSnapshot {
    fn with_todos(&self, todos: Vec<String>) -> Self {
        Self {
            todos: Arc::new(todos),
            kpis: Arc::clone(&self.kpis),
            projects: Arc::clone(&self.projects),
            seeded: self.seeded,
        }
    }
}

struct DashboardDataState {
    snapshot: Arc<DashboardDataSnapshot>,
    version: u64,
}

/// In-memory dashboard state shared between the UI and the seeder.
pub struct DashboardDataCache {
    state: Mutex<DashboardDataState>,
}

impl DashboardDataCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DashboardDataState {
                snapshot: Arc::new(DashboardDataSnapshot::default()),
                version: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> Arc<DashboardDataSnapshot> {
        self.state
            .lock()
            .map(|state| Arc::clone(&state.snapshot))
            .unwrap_or_else(|_| Arc::new(DashboardDataSnapshot::default()))
    }

    pub fn version(&self) -> u64 {
        self.state.lock().map(|state| state.version).unwrap_or(0)
    }

    /// Replace every collection and mark the cache as seeded.
    pub fn seed(&self, todos: Vec<String>, kpis: Vec<Kpi>, projects: Vec<Project>) {
        if let Ok(mut state) = self.state.lock() {
            state.snapshot = Arc::new(DashboardDataSnapshot {
                todos: Arc::new(todos),
                kpis: Arc::new(kpis),
                projects: Arc::new(projects),
                seeded: true,
            });
            state.version += 1;
        }
    }

    /// Append a task exactly as typed. Blank input is ignored.
    ///
    /// Returns the new number of tasks when something was added.
    pub fn add_todo(&self, text: &str) -> Option<usize> {
        if text.trim().is_empty() {
            return None;
        }
        let mut state = self.state.lock().ok()?;
        let mut todos = state.snapshot.todos.as_ref().clone();
        todos.push(text.to_string());
        let len = todos.len();
        state.snapshot = Arc::new(state.snapshot.with_todos(todos));
        state.version += 1;
        tracing::debug!(count = len, "task added");
        Some(len)
    }
}

impl Default for DashboardDataCache {
    fn default() -> Self {
        Self::new()
    }
}
