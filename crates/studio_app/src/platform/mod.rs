//! Terminal frontend: wires stdin, the controller and the engine together.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
