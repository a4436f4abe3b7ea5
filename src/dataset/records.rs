use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Topic stored when the user leaves the topic field blank.
pub const UNKNOWN_TOPIC: &str = "Unknown";

/// Column order of the dataset file.
pub(crate) const DATASET_HEADER: [&str; 4] = ["id", "topic", "tweet", "sentiment"];
/// Column order of the metrics file.
pub(crate) const METRICS_HEADER: [&str; 3] = ["total", "correct", "accuracy"];

/// One labeled row of the dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetRecord {
    pub id: u64,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub tweet: String,
    #[serde(default)]
    pub sentiment: String,
}

/// A row waiting for its id; the store assigns `max(id) + 1` on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTweet {
    pub topic: String,
    pub tweet: String,
    pub sentiment: String,
}

impl NewTweet {
    /// Build a row, storing `Unknown` for a blank topic.
    pub fn new(topic: &str, tweet: impl Into<String>, sentiment: impl Into<String>) -> Self {
        let topic = topic.trim();
        Self {
            topic: if topic.is_empty() {
                UNKNOWN_TOPIC.to_string()
            } else {
                topic.to_string()
            },
            tweet: tweet.into(),
            sentiment: sentiment.into(),
        }
    }

    pub(crate) fn with_id(self, id: u64) -> TweetRecord {
        TweetRecord {
            id,
            topic: self.topic,
            tweet: self.tweet,
            sentiment: self.sentiment,
        }
    }
}

/// One row of the running accuracy log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Feedback events so far.
    pub total: u64,
    /// Events where the user confirmed the prediction.
    pub correct: u64,
    /// `100 * correct / total`, rounded to two decimals with ties to even.
    pub accuracy: f64,
}

impl MetricsRecord {
    /// Running totals after one more feedback event on top of `prior`.
    pub fn next(prior: Option<&MetricsRecord>, was_correct: bool) -> Self {
        let (total, correct) = prior.map_or((0, 0), |row| (row.total, row.correct));
        let total = total + 1;
        let correct = correct + u64::from(was_correct);
        Self {
            total,
            correct,
            accuracy: rounded_accuracy(correct, total),
        }
    }
}

fn rounded_accuracy(correct: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = 100.0 * correct as f64 / total as f64;
    (pct * 100.0).round_ties_even() / 100.0
}

/// Rows per label, most frequent first.
pub fn label_counts(records: &[TweetRecord]) -> Vec<(String, usize)> {
    value_counts(records.iter().map(|r| r.sentiment.as_str()))
}

/// Rows per topic, most frequent first.
pub fn topic_counts(records: &[TweetRecord]) -> Vec<(String, usize)> {
    value_counts(records.iter().map(|r| r.topic.as_str()))
}

/// Count occurrences of a key, most frequent first, ties in name order.
fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_topic_becomes_unknown() {
        assert_eq!(NewTweet::new("   ", "hi", "happy").topic, UNKNOWN_TOPIC);
        assert_eq!(NewTweet::new(" sports ", "hi", "happy").topic, "sports");
    }

    #[test]
    fn running_accuracy_after_two_hits_and_a_miss() {
        let first = MetricsRecord::next(None, true);
        let second = MetricsRecord::next(Some(&first), true);
        let third = MetricsRecord::next(Some(&second), false);
        assert_eq!((third.total, third.correct), (3, 2));
        assert!((third.accuracy - 66.67).abs() < 1e-9);
    }

    #[test]
    fn first_miss_starts_at_zero_accuracy() {
        let row = MetricsRecord::next(None, false);
        assert_eq!((row.total, row.correct), (1, 0));
        assert_eq!(row.accuracy, 0.0);
    }

    #[test]
    fn exact_half_percentages_round_to_even() {
        let prior = MetricsRecord {
            total: 31,
            correct: 1,
            accuracy: 3.23,
        };
        let row = MetricsRecord::next(Some(&prior), false);
        assert_eq!((row.total, row.correct), (32, 1));
        assert_eq!(row.accuracy, 3.12);
        assert_eq!(rounded_accuracy(5, 32), 15.62);
        assert_eq!(rounded_accuracy(1, 160), 0.62);
        assert_eq!(rounded_accuracy(3, 32), 9.38);
    }

    #[test]
    fn value_counts_orders_by_frequency_then_name() {
        let counts = value_counts(["sad", "happy", "sad", "fear", "happy", "sad"]);
        assert_eq!(
            counts,
            vec![
                ("sad".to_string(), 3),
                ("happy".to_string(), 2),
                ("fear".to_string(), 1)
            ]
        );
    }
}
