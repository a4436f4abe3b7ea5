use super::*;
use crate::dataset::{label_counts, topic_counts};

impl EguiController {
    /// Re-read both stores into the analytics panels. Read failures become
    /// placeholders.
    pub fn refresh_analytics(&mut self) {
        self.ui.analytics = AnalyticsSnapshot {
            accuracy: self.accuracy_panel(),
            dataset: self.dataset_panel(),
        };
    }

    pub fn analytics(&self) -> &AnalyticsSnapshot {
        &self.ui.analytics
    }

    fn accuracy_panel(&self) -> AccuracyPanel {
        let values = match self.metrics.accuracy_series() {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!("Accuracy chart unavailable: {err}");
                return AccuracyPanel::Placeholder {
                    message: "Accuracy history could not be read.".into(),
                };
            }
        };
        match values.last().copied() {
            Some(current) => AccuracyPanel::Series { values, current },
            None => AccuracyPanel::default(),
        }
    }

    fn dataset_panel(&self) -> DatasetPanel {
        match self.dataset.read_all() {
            Ok(records) => DatasetPanel::Distribution {
                labels: label_counts(&records),
                topics: topic_counts(&records),
                total: records.len(),
            },
            Err(DatasetError::Missing { .. }) => DatasetPanel::default(),
            Err(err) => {
                tracing::warn!("Dataset charts unavailable: {err}");
                DatasetPanel::Placeholder {
                    message: "Dataset could not be read.".into(),
                }
            }
        }
    }
}
