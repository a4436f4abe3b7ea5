#![deny(missing_docs)]

//! Entry point for the egui-based tweet sentiment UI.
use eframe::egui;
use tweetsense::config;
use tweetsense::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use tweetsense::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let startup = config::load_or_default()
        .map_err(|err| format!("Failed to load config: {err}"))
        .and_then(|cfg| EguiApp::new(&cfg));

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(960.0, 900.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Tweet Sentiment Analyzer",
        native_options,
        Box::new(move |_cc| match startup {
            Ok(app) => Ok(Box::new(app)),
            Err(message) => {
                tracing::error!("{message}");
                Ok(Box::new(LaunchError { message }))
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
