use super::*;
use crate::dataset::{FeedbackTally, NewTweet, TweetRecord};

/// What a successful feedback submission wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackReceipt {
    pub record: TweetRecord,
    pub tally: FeedbackTally,
}

impl EguiController {
    /// Store the held prediction with the user's verdict, update the running
    /// accuracy and retrain before returning to idle.
    ///
    /// Once the row is appended the session is reset even if a later step
    /// fails; nothing written earlier is rolled back.
    pub fn submit_feedback(&mut self) -> Result<FeedbackReceipt, ControllerError> {
        let result = self.apply_feedback();
        match &result {
            Ok(receipt) if receipt.tally.history_reset => self.set_status(
                "Feedback saved and model retrained. The unreadable metrics log was restarted.",
                StatusTone::Warning,
            ),
            Ok(_) => self.set_status(FEEDBACK_SAVED_MESSAGE, StatusTone::Success),
            Err(
                err @ (ControllerError::NoPrediction
                | ControllerError::FeedbackUnavailable
                | ControllerError::MissingCorrection
                | ControllerError::UnknownCorrection { .. }),
            ) => {
                let message = err.to_string();
                self.set_status(message, StatusTone::Warning);
            }
            Err(err) => {
                tracing::error!("Feedback submission failed: {err}");
                let message = format!("Feedback submission failed: {err}");
                self.set_status(message, StatusTone::Error);
            }
        }
        self.refresh_analytics();
        result
    }

    fn apply_feedback(&mut self) -> Result<FeedbackReceipt, ControllerError> {
        let held = self.prediction().cloned().ok_or(ControllerError::NoPrediction)?;
        if sentiment::is_irrelevant(&held.label) {
            return Err(ControllerError::FeedbackUnavailable);
        }
        let (label, was_correct) = match self.ui.feedback.choice {
            FeedbackChoice::Yes => (held.label.clone(), true),
            FeedbackChoice::No => {
                let corrected = self
                    .ui
                    .feedback
                    .corrected_label
                    .as_deref()
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .ok_or(ControllerError::MissingCorrection)?;
                if !self.ui.feedback.offers(corrected) {
                    return Err(ControllerError::UnknownCorrection {
                        label: corrected.to_string(),
                    });
                }
                (corrected.to_string(), false)
            }
        };

        let row = NewTweet::new(&self.ui.feedback.topic, held.text, label);
        let record = self.dataset.append(row)?;
        self.reset_session();
        tracing::info!(
            "Stored feedback row {} as {} (prediction {})",
            record.id,
            record.sentiment,
            if was_correct { "confirmed" } else { "corrected" }
        );

        let tally = self.metrics.record_feedback(was_correct)?;
        let model = classifier::train(&self.dataset, &self.options, &self.artifacts)?;
        self.model.replace(model);
        Ok(FeedbackReceipt { record, tally })
    }
}
