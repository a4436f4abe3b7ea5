//! Sentiment classifier: TF-IDF features plus a logistic regression head,
//! trained from the dataset file and persisted as two artifacts.
//!
//! Every retrain is a full refit over the whole dataset.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::TrainingSettings;
use crate::dataset::{DatasetError, DatasetStore, TweetRecord};
use crate::ml::logreg::{LogRegModel, TrainDataset, TrainOptions, train_logreg};
use crate::ml::tfidf::{TfIdfOptions, TfIdfVectorizer};

pub mod artifacts;
mod handle;

pub use artifacts::{ArtifactError, ArtifactPaths};
pub use handle::ModelHandle;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Training failed: {0}")]
    Train(String),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Vectorizer and training hyperparameters.
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    pub vectorizer: TfIdfOptions,
    pub train: TrainOptions,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self::from(&TrainingSettings::default())
    }
}

impl From<&TrainingSettings> for ClassifierOptions {
    fn from(settings: &TrainingSettings) -> Self {
        Self {
            vectorizer: TfIdfOptions {
                max_features: settings.max_features,
                ngram_min: settings.ngram_min,
                ngram_max: settings.ngram_max,
            },
            train: TrainOptions {
                epochs: settings.max_iter,
                learning_rate: settings.learning_rate,
                l2: settings.l2,
                batch_size: settings.batch_size,
                seed: settings.seed,
            },
        }
    }
}

/// Most likely label for one text.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

/// A fitted vectorizer/classifier pair.
#[derive(Debug, Clone)]
pub struct SentimentModel {
    pub vectorizer: TfIdfVectorizer,
    pub model: LogRegModel,
}

impl SentimentModel {
    pub fn predict(&self, text: &str) -> Prediction {
        let features = self.vectorizer.transform(text);
        let (idx, confidence) = self.model.predict_top(&features).unwrap_or((0, 0.0));
        let label = self.model.classes.get(idx).cloned().unwrap_or_default();
        tracing::debug!("Predicted {label} ({confidence:.3}) for {} feature(s)", features.nnz());
        Prediction { label, confidence }
    }

    pub fn classes(&self) -> &[String] {
        &self.model.classes
    }
}

/// How the model in use was obtained at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Loaded,
    /// No artifacts on disk yet.
    TrainedFresh,
    /// Artifacts existed but could not be used.
    RetrainedAfterCorruption { reason: String },
}

/// Fit a model on `records`, skipping rows with a blank tweet or label.
pub fn fit(records: &[TweetRecord], options: &ClassifierOptions) -> Result<SentimentModel, ClassifierError> {
    let usable = usable_rows(records);
    if usable.is_empty() {
        return Err(ClassifierError::Train(
            "Dataset has no labeled tweets to train on".to_string(),
        ));
    }

    let classes: Vec<String> = usable
        .iter()
        .map(|r| r.sentiment.trim().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let texts: Vec<&str> = usable.iter().map(|r| r.tweet.as_str()).collect();
    let vectorizer = TfIdfVectorizer::fit(&texts, &options.vectorizer);
    let y = usable
        .iter()
        .map(|r| classes.binary_search(&r.sentiment.trim().to_string()).unwrap_or(0))
        .collect();
    let dataset = TrainDataset {
        classes,
        n_features: vectorizer.len(),
        x: vectorizer.transform_all(&texts),
        y,
    };
    let model = train_logreg(&dataset, &options.train).map_err(ClassifierError::Train)?;
    tracing::info!(
        "Trained classifier on {} row(s): {} classes, {} features",
        dataset.x.len(),
        model.classes.len(),
        model.n_features
    );
    Ok(SentimentModel { vectorizer, model })
}

/// Encode `records` with an already fitted model, keeping rows whose label
/// the model knows.
pub fn encode_labeled(model: &SentimentModel, records: &[TweetRecord]) -> TrainDataset {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for record in usable_rows(records) {
        let label = record.sentiment.trim();
        if let Some(idx) = model.classes().iter().position(|class| class == label) {
            x.push(model.vectorizer.transform(&record.tweet));
            y.push(idx);
        }
    }
    TrainDataset {
        classes: model.classes().to_vec(),
        n_features: model.vectorizer.len(),
        x,
        y,
    }
}

fn usable_rows(records: &[TweetRecord]) -> Vec<&TweetRecord> {
    records
        .iter()
        .filter(|r| !r.tweet.trim().is_empty() && !r.sentiment.trim().is_empty())
        .collect()
}

/// Refit from the whole dataset file and replace both artifacts.
pub fn train(
    store: &DatasetStore,
    options: &ClassifierOptions,
    paths: &ArtifactPaths,
) -> Result<SentimentModel, ClassifierError> {
    let records = store.read_all()?;
    let model = fit(&records, options)?;
    artifacts::save(&model, paths)?;
    Ok(model)
}

/// Load the persisted artifacts, retraining from the dataset when they are
/// missing or unusable. Dataset failures are returned, never absorbed.
pub fn load_or_train(
    store: &DatasetStore,
    options: &ClassifierOptions,
    paths: &ArtifactPaths,
) -> Result<(SentimentModel, ModelSource), ClassifierError> {
    match artifacts::load(paths) {
        Ok(model) => {
            tracing::info!("Loaded classifier from {}", paths.model.display());
            Ok((model, ModelSource::Loaded))
        }
        Err(err) if err.is_not_found() => {
            tracing::info!("{err}; training from {}", store.path().display());
            Ok((train(store, options, paths)?, ModelSource::TrainedFresh))
        }
        Err(err) => {
            tracing::warn!("{err}; retraining from {}", store.path().display());
            let model = train(store, options, paths)?;
            Ok((
                model,
                ModelSource::RetrainedAfterCorruption {
                    reason: err.to_string(),
                },
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::NewTweet;
    use tempfile::tempdir;

    fn record(id: u64, tweet: &str, sentiment: &str) -> TweetRecord {
        NewTweet::new("general", tweet, sentiment).with_id(id)
    }

    fn fast_options() -> ClassifierOptions {
        let mut options = ClassifierOptions::default();
        options.train.epochs = 60;
        options
    }

    #[test]
    fn fit_skips_blank_rows_and_sorts_classes() {
        let records = vec![
            record(1, "what a wonderful day", "happy"),
            record(2, "", "sad"),
            record(3, "this is awful news", "angry"),
            record(4, "no label here", " "),
        ];
        let model = fit(&records, &fast_options()).unwrap();
        assert_eq!(model.classes(), ["angry", "happy"]);
        assert_eq!(model.predict("wonderful").label, "happy");
    }

    #[test]
    fn encode_labeled_drops_unknown_labels() {
        let records = vec![
            record(1, "what a wonderful day", "happy"),
            record(2, "this is awful news", "angry"),
        ];
        let model = fit(&records, &fast_options()).unwrap();
        let mut eval = records.clone();
        eval.push(record(3, "strange feeling", "confusion"));
        let dataset = encode_labeled(&model, &eval);
        assert_eq!(dataset.y, vec![1, 0]);
        assert_eq!(dataset.n_features, model.vectorizer.len());
    }

    #[test]
    fn fit_without_usable_rows_fails() {
        let records = vec![record(1, "  ", "happy")];
        assert!(matches!(
            fit(&records, &fast_options()),
            Err(ClassifierError::Train(_))
        ));
    }

    #[test]
    fn load_reports_missing_then_loads_saved_artifacts() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("tweets.csv"));
        store.create_if_missing().unwrap();
        store
            .append_batch(vec![
                NewTweet::new("", "sunny and bright", "happy"),
                NewTweet::new("", "gloomy and grey", "sad"),
            ])
            .unwrap();
        let paths = ArtifactPaths {
            vectorizer: dir.path().join("vectorizer.json"),
            model: dir.path().join("model.json"),
        };

        let (fresh, source) = load_or_train(&store, &fast_options(), &paths).unwrap();
        assert_eq!(source, ModelSource::TrainedFresh);
        let (loaded, source) = load_or_train(&store, &fast_options(), &paths).unwrap();
        assert_eq!(source, ModelSource::Loaded);
        assert_eq!(loaded.model, fresh.model);
        assert_eq!(loaded.predict("gloomy").label, "sad");
    }

    #[test]
    fn corrupt_artifact_is_tagged_and_retrained() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("tweets.csv"));
        store.create_if_missing().unwrap();
        store
            .append(NewTweet::new("", "sunny and bright", "happy"))
            .unwrap();
        let paths = ArtifactPaths {
            vectorizer: dir.path().join("vectorizer.json"),
            model: dir.path().join("model.json"),
        };
        train(&store, &fast_options(), &paths).unwrap();
        std::fs::write(&paths.model, b"{ not json").unwrap();

        let (_, source) = load_or_train(&store, &fast_options(), &paths).unwrap();
        assert!(matches!(source, ModelSource::RetrainedAfterCorruption { .. }));
        assert!(artifacts::load(&paths).is_ok());
    }

    #[test]
    fn vectorizer_from_another_fit_is_refused() {
        let dir = tempdir().unwrap();
        let mut options = fast_options();
        options.vectorizer.max_features = 4;
        let store = DatasetStore::new(dir.path().join("tweets.csv"));
        store.create_if_missing().unwrap();
        store
            .append_batch(vec![
                NewTweet::new("", "alpha beta gamma delta", "happy"),
                NewTweet::new("", "alpha beta epsilon zeta", "sad"),
            ])
            .unwrap();
        let paths = ArtifactPaths {
            vectorizer: dir.path().join("vectorizer.json"),
            model: dir.path().join("model.json"),
        };
        train(&store, &options, &paths).unwrap();

        let other = fit(
            &[
                record(1, "red green blue yellow", "sad"),
                record(2, "red green orange purple", "happy"),
            ],
            &options,
        )
        .unwrap();
        let other_paths = ArtifactPaths {
            vectorizer: dir.path().join("other_vectorizer.json"),
            model: dir.path().join("other_model.json"),
        };
        artifacts::save(&other, &other_paths).unwrap();
        assert_eq!(other.vectorizer.len(), 4);
        std::fs::copy(&other_paths.vectorizer, &paths.vectorizer).unwrap();

        assert!(matches!(
            artifacts::load(&paths),
            Err(ArtifactError::Invalid { .. })
        ));
        let (_, source) = load_or_train(&store, &options, &paths).unwrap();
        assert!(matches!(source, ModelSource::RetrainedAfterCorruption { .. }));
        assert!(artifacts::load(&paths).is_ok());
    }

    #[test]
    fn missing_dataset_is_fatal_even_with_missing_artifacts() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("absent.csv"));
        let paths = ArtifactPaths {
            vectorizer: dir.path().join("vectorizer.json"),
            model: dir.path().join("model.json"),
        };
        assert!(matches!(
            load_or_train(&store, &fast_options(), &paths),
            Err(ClassifierError::Dataset(DatasetError::Missing { .. }))
        ));
    }

    #[test]
    fn handle_swaps_whole_models() {
        let first = fit(&[record(1, "bright sunny", "happy")], &fast_options()).unwrap();
        let second = fit(&[record(1, "bright sunny", "fear")], &fast_options()).unwrap();
        let handle = ModelHandle::new(first);
        let snapshot = handle.current();
        let previous = handle.replace(second);
        assert_eq!(previous.classes(), snapshot.classes());
        assert_eq!(snapshot.predict("bright").label, "happy");
        assert_eq!(handle.predict("bright").label, "fear");
    }
}
