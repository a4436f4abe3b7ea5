use std::collections::BTreeSet;

use egui::Color32;
use thiserror::Error;

use crate::config::{AppConfig, ConfigError, StoragePaths};
use crate::dataset::{DatasetError, DatasetStore, MetricsError, MetricsStore};
use crate::egui_app::state::*;
use crate::ml::classifier::{
    self, ArtifactPaths, ClassifierError, ClassifierOptions, ModelHandle, ModelSource, Prediction,
};
use crate::sentiment;

mod analytics;
mod feedback;

pub use feedback::FeedbackReceipt;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a tweet before analyzing.";
pub const IRRELEVANT_MESSAGE: &str =
    "This tweet was classified as irrelevant and will not affect sentiment training.";
pub const FEEDBACK_SAVED_MESSAGE: &str = "Feedback saved, model retrained, and metrics updated!";

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("Analyze a tweet before submitting feedback")]
    NoPrediction,
    #[error("Feedback is not collected for irrelevant tweets")]
    FeedbackUnavailable,
    #[error("Please select the correct sentiment.")]
    MissingCorrection,
    #[error("Unknown sentiment label: {label}")]
    UnknownCorrection { label: String },
}

/// Maintains the session state and bridges the stores and classifier to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    dataset: DatasetStore,
    metrics: MetricsStore,
    model: ModelHandle,
    options: ClassifierOptions,
    artifacts: ArtifactPaths,
}

impl EguiController {
    /// Resolve storage from `config` and load (or train) the classifier.
    pub fn new(config: &AppConfig) -> Result<Self, ControllerError> {
        let paths = config.storage_paths()?;
        Self::from_paths(paths, ClassifierOptions::from(&config.training))
    }

    pub fn from_paths(
        paths: StoragePaths,
        options: ClassifierOptions,
    ) -> Result<Self, ControllerError> {
        let dataset = DatasetStore::new(paths.dataset.clone());
        let artifacts = ArtifactPaths::from(&paths);
        let (model, source) = classifier::load_or_train(&dataset, &options, &artifacts)?;
        let mut controller = Self::with_model(paths, options, ModelHandle::new(model));
        if let ModelSource::RetrainedAfterCorruption { reason } = source {
            controller.set_status(
                format!("Saved model was unusable and has been retrained ({reason})"),
                StatusTone::Warning,
            );
        }
        Ok(controller)
    }

    /// Build a controller around an already loaded model.
    pub fn with_model(paths: StoragePaths, options: ClassifierOptions, model: ModelHandle) -> Self {
        let mut controller = Self {
            ui: UiState::default(),
            dataset: DatasetStore::new(paths.dataset.clone()),
            metrics: MetricsStore::new(paths.metrics.clone()),
            artifacts: ArtifactPaths::from(&paths),
            model,
            options,
        };
        controller.refresh_analytics();
        controller
    }

    pub fn model_handle(&self) -> &ModelHandle {
        &self.model
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.ui.input = text.into();
    }

    /// Predict the current input. Returns false when there was nothing to analyze.
    pub fn analyze(&mut self) -> bool {
        if self.ui.input.trim().is_empty() {
            self.set_status(EMPTY_INPUT_MESSAGE, StatusTone::Warning);
            return false;
        }
        let text = self.ui.input.clone();
        let Prediction { label, confidence } = self.model.predict(&text);
        tracing::info!("Analyzed tweet as {label} ({confidence:.3})");
        self.ui.feedback = FeedbackForm {
            options: self.correction_options(),
            ..FeedbackForm::default()
        };
        if sentiment::is_irrelevant(&label) {
            self.set_status(IRRELEVANT_MESSAGE, StatusTone::Info);
        } else {
            self.set_status(format!("Predicted sentiment: {label}"), StatusTone::Info);
        }
        self.ui.phase = SessionPhase::Predicted(HeldPrediction {
            text,
            label,
            confidence,
        });
        true
    }

    pub fn prediction(&self) -> Option<&HeldPrediction> {
        match &self.ui.phase {
            SessionPhase::Idle => None,
            SessionPhase::Predicted(held) => Some(held),
        }
    }

    /// Feedback panel contents, or `None` when nothing may be submitted.
    pub fn feedback_controls(&self) -> Option<FeedbackControls> {
        let held = self.prediction()?;
        if sentiment::is_irrelevant(&held.label) {
            return None;
        }
        let form = &self.ui.feedback;
        let can_submit = match form.choice {
            FeedbackChoice::Yes => true,
            FeedbackChoice::No => form
                .corrected_label
                .as_deref()
                .is_some_and(|label| form.offers(label)),
        };
        Some(FeedbackControls {
            predicted_label: held.label.clone(),
            choice: form.choice,
            corrected_label: form.corrected_label.clone(),
            options: form.options.clone(),
            can_submit,
        })
    }

    pub fn set_feedback_choice(&mut self, choice: FeedbackChoice) {
        self.ui.feedback.choice = choice;
    }

    pub fn set_corrected_label(&mut self, label: Option<String>) {
        self.ui.feedback.corrected_label = label;
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.ui.feedback.topic = topic.into();
    }

    /// Known labels plus any other label already present in the dataset, sorted.
    pub fn correction_options(&self) -> Vec<String> {
        let mut labels: BTreeSet<String> = sentiment::known_labels().into_iter().collect();
        match self.dataset.distinct_sentiments() {
            Ok(existing) => labels.extend(existing),
            Err(err) => tracing::debug!("Correction options limited to known labels: {err}"),
        }
        labels.into_iter().collect()
    }

    fn reset_session(&mut self) {
        self.ui.input.clear();
        self.ui.phase = SessionPhase::Idle;
        self.ui.feedback = FeedbackForm::default();
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Warning,
    Error,
}

fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Info => ("Info".into(), Color32::from_rgb(64, 140, 112)),
        StatusTone::Success => ("Saved".into(), Color32::from_rgb(31, 139, 255)),
        StatusTone::Warning => ("Warning".into(), Color32::from_rgb(192, 138, 43)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(192, 57, 43)),
    }
}
