pub(super) const DATASET_FILE_NAME: &str = "twitter_sentiment_dataset.csv";
pub(super) const METRICS_FILE_NAME: &str = "metrics.csv";
pub(super) const MODEL_FILE_NAME: &str = "sentiment_model.json";
pub(super) const VECTORIZER_FILE_NAME: &str = "vectorizer.json";

/// Upper bound for the vectorizer vocabulary; larger values only slow retraining.
pub(super) const MAX_VOCABULARY: usize = 200_000;

pub(super) fn default_dataset_file() -> String {
    DATASET_FILE_NAME.to_string()
}

pub(super) fn default_metrics_file() -> String {
    METRICS_FILE_NAME.to_string()
}

pub(super) fn default_model_file() -> String {
    MODEL_FILE_NAME.to_string()
}

pub(super) fn default_vectorizer_file() -> String {
    VECTORIZER_FILE_NAME.to_string()
}

pub(super) fn default_max_features() -> usize {
    5000
}

pub(super) fn default_ngram_min() -> usize {
    1
}

pub(super) fn default_ngram_max() -> usize {
    2
}

pub(super) fn default_max_iter() -> usize {
    300
}

pub(super) fn default_learning_rate() -> f32 {
    1.0
}

pub(super) fn default_l2() -> f32 {
    1e-4
}

pub(super) fn default_batch_size() -> usize {
    16
}

pub(super) fn default_seed() -> u64 {
    42
}

pub(super) fn default_target_total() -> usize {
    250
}
