//! egui renderer for the application UI.

use eframe::egui::{
    self, Color32, ComboBox, Frame, Margin, RichText, ScrollArea, TextEdit, Ui, Vec2,
};

use crate::config::AppConfig;
use crate::egui_app::controller::EguiController;
use crate::egui_app::state::{AccuracyPanel, DatasetPanel, FeedbackChoice};

mod charts;
pub mod style;

/// Minimum window size for the single-page layout.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(720.0, 640.0);
const CHART_HEIGHT: f32 = 220.0;

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app, loading the classifier (training it when needed).
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        let controller = EguiController::new(config)
            .map_err(|err| format!("Failed to start the classifier: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::NONE.fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(26.0);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                });
            });
    }

    fn render_input(&mut self, ui: &mut Ui) {
        ui.heading("Tweet Sentiment Analyzer");
        ui.add_space(6.0);
        ui.add(
            TextEdit::multiline(&mut self.controller.ui.input)
                .hint_text("Enter a tweet to predict its sentiment")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);
        if ui.button("Analyze Sentiment").clicked() {
            self.controller.analyze();
        }
    }

    fn render_prediction(&mut self, ui: &mut Ui) {
        let Some(held) = self.controller.prediction() else {
            return;
        };
        let color = style::sentiment_color(&held.label);
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label("Predicted Sentiment:");
            let backdrop = style::label_backdrop(color);
            Frame::NONE
                .fill(backdrop)
                .inner_margin(Margin::symmetric(4, 1))
                .show(ui, |ui| {
                    ui.label(RichText::new(held.label.to_uppercase()).color(color).strong());
                });
            ui.label(
                RichText::new(format!("({:.0}% confidence)", held.confidence * 100.0))
                    .color(style::palette().text_muted),
            );
        });
    }

    fn render_feedback(&mut self, ui: &mut Ui) {
        let Some(controls) = self.controller.feedback_controls() else {
            return;
        };
        ui.add_space(10.0);
        Frame::NONE
            .stroke(style::outer_border())
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.label("Is this prediction correct?");
                let mut choice = controls.choice;
                ui.horizontal(|ui| {
                    ui.radio_value(&mut choice, FeedbackChoice::Yes, "Yes");
                    ui.radio_value(&mut choice, FeedbackChoice::No, "No");
                });
                if choice != controls.choice {
                    self.controller.set_feedback_choice(choice);
                }

                if choice == FeedbackChoice::No {
                    let mut selected = controls.corrected_label.clone();
                    ComboBox::from_label("Select the correct sentiment:")
                        .selected_text(selected.as_deref().unwrap_or("Choose a label"))
                        .show_ui(ui, |ui| {
                            for label in &controls.options {
                                let text = RichText::new(label)
                                    .color(style::sentiment_color(label));
                                ui.selectable_value(&mut selected, Some(label.clone()), text);
                            }
                        });
                    if selected != controls.corrected_label {
                        self.controller.set_corrected_label(selected);
                    }
                }

                ui.add_space(4.0);
                ui.label("Topic (optional but recommended)");
                ui.add(
                    TextEdit::singleline(&mut self.controller.ui.feedback.topic)
                        .hint_text("e.g. sports, movies, geopolitics")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(6.0);
                let submit = ui.add_enabled(
                    self.controller
                        .feedback_controls()
                        .is_some_and(|controls| controls.can_submit),
                    egui::Button::new("Submit Feedback"),
                );
                if submit.clicked() {
                    // Failures are already reported on the status bar.
                    let _ = self.controller.submit_feedback();
                }
            });
    }

    fn render_analytics(&mut self, ui: &mut Ui) {
        ui.add_space(14.0);
        ui.separator();
        ui.heading("Model Analytics");
        let width = ui.available_width();
        let analytics = self.controller.analytics().clone();

        ui.add_space(6.0);
        ui.label(RichText::new("Accuracy Over Time").strong());
        match &analytics.accuracy {
            AccuracyPanel::Placeholder { message } => {
                ui.label(message);
            }
            AccuracyPanel::Series { values, current } => {
                ui.label(format!("Current Accuracy: {current:.2}%"));
                charts::accuracy_line(ui, values, egui::vec2(width, CHART_HEIGHT));
            }
        }

        ui.add_space(10.0);
        match &analytics.dataset {
            DatasetPanel::Placeholder { message } => {
                ui.label(RichText::new("Dataset Distribution").strong());
                ui.label(message);
            }
            DatasetPanel::Distribution {
                labels,
                topics,
                total,
            } => {
                ui.label(format!("Total Tweets in Dataset: {total}"));
                ui.add_space(4.0);
                ui.label(RichText::new("Sentiment Distribution").strong());
                charts::bar_chart(
                    ui,
                    labels,
                    egui::vec2(width, CHART_HEIGHT),
                    style::sentiment_color,
                );
                ui.add_space(6.0);
                ui.label(RichText::new("Topic Distribution").strong());
                let accent = style::palette().accent_copper;
                charts::bar_chart(ui, topics, egui::vec2(width, CHART_HEIGHT), |_| accent);
            }
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .id_salt("session_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_input(ui);
                    self.render_prediction(ui);
                    self.render_feedback(ui);
                    self.render_analytics(ui);
                });
        });
    }
}
