//! Library exports for reuse in binaries, benchmarks and tests.
/// Per-user application directories.
pub mod app_dirs;
/// Crash-safe file replacement.
pub mod atomic_file;
/// TOML configuration.
pub mod config;
/// Dataset and metrics CSV stores plus the offline balancer.
pub mod dataset;
/// Shared egui UI modules.
pub mod egui_app;
/// Logging setup.
pub mod logging;
/// Feature extraction, classifier training and evaluation.
pub mod ml;
/// The sentiment label set and its display colors.
pub mod sentiment;
