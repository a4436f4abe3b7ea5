use std::path::{Path, PathBuf};

use thiserror::Error;

use super::csv_io::{encode_rows, read_rows};
use super::records::{METRICS_HEADER, MetricsRecord};
use crate::atomic_file;

#[derive(Debug, Error)]
pub enum MetricsError {
    /// The file exists but could not be read or parsed.
    #[error("Unreadable metrics log {path}: {source}")]
    Corrupt { path: PathBuf, source: csv::Error },
    #[error("Failed to encode metrics rows for {path}: {source}")]
    Encode { path: PathBuf, source: csv::Error },
    #[error("Failed to write metrics log {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Contents of the metrics log when it could be read.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsHistory {
    /// No file yet; no feedback has been recorded.
    Missing,
    Loaded(Vec<MetricsRecord>),
}

impl MetricsHistory {
    pub fn rows(&self) -> &[MetricsRecord] {
        match self {
            MetricsHistory::Missing => &[],
            MetricsHistory::Loaded(rows) => rows,
        }
    }
}

/// Outcome of recording one feedback event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackTally {
    pub record: MetricsRecord,
    /// The previous log was unreadable and a fresh one was started.
    pub history_reset: bool,
}

/// The `total,correct,accuracy` CSV log, one row per feedback event.
#[derive(Debug, Clone)]
pub struct MetricsStore {
    path: PathBuf,
}

impl MetricsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_all(&self) -> Result<MetricsHistory, MetricsError> {
        let rows = read_rows(&self.path).map_err(|source| MetricsError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(rows.map_or(MetricsHistory::Missing, MetricsHistory::Loaded))
    }

    /// Accuracy column in log order.
    pub fn accuracy_series(&self) -> Result<Vec<f64>, MetricsError> {
        Ok(self
            .read_all()?
            .rows()
            .iter()
            .map(|row| row.accuracy)
            .collect())
    }

    /// Append the running totals after one more feedback event.
    ///
    /// A missing log starts from zero. An unreadable log is logged, reported
    /// through `history_reset`, and replaced by a fresh log; only write
    /// failures are returned as errors.
    pub fn record_feedback(&self, was_correct: bool) -> Result<FeedbackTally, MetricsError> {
        let (mut rows, history_reset) = match self.read_all() {
            Ok(history) => (history.rows().to_vec(), false),
            Err(err) => {
                tracing::warn!("{err}; starting a new metrics log");
                (Vec::new(), true)
            }
        };
        let record = MetricsRecord::next(rows.last(), was_correct);
        rows.push(record);
        let bytes = encode_rows(&METRICS_HEADER, &rows).map_err(|source| MetricsError::Encode {
            path: self.path.clone(),
            source,
        })?;
        atomic_file::write_atomic(&self.path, &bytes).map_err(|source| MetricsError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(
            "Feedback recorded: total={} correct={} accuracy={:.2}%",
            record.total,
            record.correct,
            record.accuracy
        );
        Ok(FeedbackTally {
            record,
            history_reset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_log_reads_as_missing() {
        let dir = tempdir().unwrap();
        let store = MetricsStore::new(dir.path().join("metrics.csv"));
        assert_eq!(store.read_all().unwrap(), MetricsHistory::Missing);
        assert!(store.accuracy_series().unwrap().is_empty());
    }

    #[test]
    fn feedback_sequence_builds_running_totals() {
        let dir = tempdir().unwrap();
        let store = MetricsStore::new(dir.path().join("metrics.csv"));
        store.record_feedback(true).unwrap();
        store.record_feedback(true).unwrap();
        let tally = store.record_feedback(false).unwrap();
        assert!(!tally.history_reset);

        let history = store.read_all().unwrap();
        let last = history.rows().last().unwrap();
        assert_eq!((last.total, last.correct), (3, 2));
        assert!((last.accuracy - 66.67).abs() < 1e-9);
        let series = store.accuracy_series().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0], 100.0);
        assert_eq!(series[1], 100.0);

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("total,correct,accuracy\n"));
    }

    #[test]
    fn corrupt_log_is_reported_then_restarted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metrics.csv");
        std::fs::write(&path, "total,correct,accuracy\nmany,few,lots\n").unwrap();
        let store = MetricsStore::new(&path);
        assert!(matches!(store.read_all(), Err(MetricsError::Corrupt { .. })));

        let tally = store.record_feedback(true).unwrap();
        assert!(tally.history_reset);
        assert_eq!(tally.record.total, 1);
        assert_eq!(store.read_all().unwrap().rows().len(), 1);
    }
}
