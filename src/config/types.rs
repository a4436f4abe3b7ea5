use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::{
    MAX_VOCABULARY, default_batch_size, default_dataset_file, default_l2, default_learning_rate,
    default_max_features, default_max_iter, default_metrics_file, default_model_file,
    default_ngram_max, default_ngram_min, default_seed, default_target_total,
    default_vectorizer_file,
};
use crate::app_dirs;

/// Settings loaded from `config.toml`.
///
/// Config keys (TOML): `storage`, `training`, `balancer`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub training: TrainingSettings,
    #[serde(default)]
    pub balancer: BalancerSettings,
}

impl AppConfig {
    pub(crate) fn normalized(self) -> Self {
        Self {
            storage: self.storage,
            training: self.training.normalized(),
            balancer: self.balancer,
        }
    }

    /// Resolve the concrete file locations, falling back to the app data
    /// directory. The data directory is created if it does not exist.
    pub fn storage_paths(&self) -> Result<StoragePaths, ConfigError> {
        let data_dir = match &self.storage.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
                dir.clone()
            }
            None => app_dirs::data_dir().map_err(|err| match err {
                app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
                app_dirs::AppDirError::CreateDir { path, source } => {
                    ConfigError::CreateDir { path, source }
                }
            })?,
        };
        Ok(self.storage.resolve(&data_dir))
    }
}

/// File locations for the dataset, metrics log and model artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the data files; defaults to `<app root>/data`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,
    #[serde(default = "default_metrics_file")]
    pub metrics_file: String,
    #[serde(default = "default_model_file")]
    pub model_file: String,
    #[serde(default = "default_vectorizer_file")]
    pub vectorizer_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            dataset_file: default_dataset_file(),
            metrics_file: default_metrics_file(),
            model_file: default_model_file(),
            vectorizer_file: default_vectorizer_file(),
        }
    }
}

impl StorageSettings {
    /// Join the configured file names onto `data_dir`; absolute names are kept as-is.
    pub fn resolve(&self, data_dir: &Path) -> StoragePaths {
        StoragePaths {
            dataset: data_dir.join(&self.dataset_file),
            metrics: data_dir.join(&self.metrics_file),
            model: data_dir.join(&self.model_file),
            vectorizer: data_dir.join(&self.vectorizer_file),
        }
    }
}

/// Resolved paths used by the stores and the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub dataset: PathBuf,
    pub metrics: PathBuf,
    pub model: PathBuf,
    pub vectorizer: PathBuf,
}

impl StoragePaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        StorageSettings::default().resolve(dir)
    }
}

/// Vectorizer and classifier hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSettings {
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    #[serde(default = "default_ngram_min")]
    pub ngram_min: usize,
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    /// Full passes over the dataset per retrain.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
    #[serde(default = "default_l2")]
    pub l2: f32,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            ngram_min: default_ngram_min(),
            ngram_max: default_ngram_max(),
            max_iter: default_max_iter(),
            learning_rate: default_learning_rate(),
            l2: default_l2(),
            batch_size: default_batch_size(),
            seed: default_seed(),
        }
    }
}

impl TrainingSettings {
    fn normalized(mut self) -> Self {
        self.max_features = self.max_features.clamp(1, MAX_VOCABULARY);
        self.ngram_min = self.ngram_min.max(1);
        self.ngram_max = self.ngram_max.max(self.ngram_min);
        self.batch_size = self.batch_size.max(1);
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            self.learning_rate = default_learning_rate();
        }
        if !self.l2.is_finite() || self.l2 < 0.0 {
            self.l2 = default_l2();
        }
        self
    }
}

/// Settings for the offline dataset balancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancerSettings {
    #[serde(default = "default_target_total")]
    pub target_total: usize,
    /// Fixed RNG seed; sampling is unseeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BalancerSettings {
    fn default() -> Self {
        Self {
            target_total: default_target_total(),
            seed: None,
        }
    }
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config or data directory.
    #[error("Unable to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}
