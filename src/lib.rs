pub mod dashboard;
pub mod gui;
pub mod logging;
pub mod model;
pub mod seed;
pub mod settings;
