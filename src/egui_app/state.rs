//! Shared state types for the egui UI.

use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Text box contents.
    pub input: String,
    pub phase: SessionPhase,
    pub feedback: FeedbackForm,
    pub status: StatusBarState,
    pub analytics: AnalyticsSnapshot,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input: String::new(),
            phase: SessionPhase::Idle,
            feedback: FeedbackForm::default(),
            status: StatusBarState::idle(),
            analytics: AnalyticsSnapshot::default(),
        }
    }
}

/// Where the session is in the analyze/feedback cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Predicted(HeldPrediction),
}

/// The analyzed text and the label the model gave it.
#[derive(Clone, Debug, PartialEq)]
pub struct HeldPrediction {
    pub text: String,
    pub label: String,
    pub confidence: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedbackChoice {
    #[default]
    Yes,
    No,
}

/// Feedback inputs collected while a prediction is shown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedbackForm {
    pub choice: FeedbackChoice,
    /// Required when `choice` is `No`.
    pub corrected_label: Option<String>,
    pub topic: String,
    /// Labels offered by the correction selector.
    pub options: Vec<String>,
}

impl FeedbackForm {
    /// Whether `label` is one of the offered corrections.
    pub fn offers(&self, label: &str) -> bool {
        let label = label.trim();
        self.options.iter().any(|option| option == label)
    }
}

/// What the feedback panel should show, derived from the current phase.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackControls {
    pub predicted_label: String,
    pub choice: FeedbackChoice,
    pub corrected_label: Option<String>,
    pub options: Vec<String>,
    pub can_submit: bool,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Enter a tweet to predict its sentiment".into(),
            badge_label: "Idle".into(),
            badge_color: Color32::from_rgb(42, 42, 42),
        }
    }
}

pub const NO_ACCURACY_MESSAGE: &str = "No accuracy data yet. Test some tweets first!";
pub const NO_DATASET_MESSAGE: &str = "Dataset not found yet.";

/// Read-only data behind the analytics panels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyticsSnapshot {
    pub accuracy: AccuracyPanel,
    pub dataset: DatasetPanel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AccuracyPanel {
    Placeholder { message: String },
    Series { values: Vec<f64>, current: f64 },
}

impl Default for AccuracyPanel {
    fn default() -> Self {
        AccuracyPanel::Placeholder {
            message: NO_ACCURACY_MESSAGE.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatasetPanel {
    Placeholder {
        message: String,
    },
    Distribution {
        labels: Vec<(String, usize)>,
        topics: Vec<(String, usize)>,
        total: usize,
    },
}

impl Default for DatasetPanel {
    fn default() -> Self {
        DatasetPanel::Placeholder {
            message: NO_DATASET_MESSAGE.into(),
        }
    }
}
