//! Flat-file persistence for labeled tweets and the running accuracy log.
//!
//! Both stores rewrite their whole file on every append (read, add, write back
//! atomically). There is no locking: two processes appending at once can lose
//! a row or hand out the same id. The app assumes a single operator.

pub mod balancer;
mod csv_io;
pub mod metrics_log;
pub mod records;
pub mod store;

pub use metrics_log::{FeedbackTally, MetricsError, MetricsHistory, MetricsStore};
pub use records::{
    MetricsRecord, NewTweet, TweetRecord, UNKNOWN_TOPIC, label_counts, topic_counts,
};
pub use store::{DatasetError, DatasetStore};
