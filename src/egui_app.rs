//! egui front end: session controller, UI state and renderer.

/// Session orchestration between the stores, the classifier and the UI.
pub mod controller;
/// Plain data rendered by the UI.
pub mod state;
/// egui renderer.
pub mod ui;
