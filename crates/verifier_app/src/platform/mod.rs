mod app;
mod cli;
mod config;
mod editor;
mod logging;
mod surface;

pub use app::run_app;
