//! The two persisted artifacts: fitted vectorizer and classifier weights.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SentimentModel;
use crate::atomic_file;
use crate::config::StoragePaths;
use crate::ml::logreg::LogRegModel;
use crate::ml::tfidf::TfIdfVectorizer;

/// Where the vectorizer and classifier are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub model: PathBuf,
}

impl From<&StoragePaths> for ArtifactPaths {
    fn from(paths: &StoragePaths) -> Self {
        Self {
            vectorizer: paths.vectorizer.clone(),
            model: paths.model.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Expected on first launch; the caller trains instead.
    #[error("Model artifact not found at {path}")]
    NotFound { path: PathBuf },
    #[error("Failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Corrupt model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Artifacts parsed but do not fit together or fail validation.
    #[error("Invalid model artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
    #[error("Failed to encode model artifact {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write model artifact {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArtifactError::NotFound { .. })
    }
}

/// Classifier file contents: the weights plus the digest of the vectorizer
/// file they were trained against.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelFile {
    vectorizer_digest: String,
    classifier: LogRegModel,
}

/// Persist both artifacts, each replaced atomically.
///
/// The model file records the digest of the vectorizer bytes so a pair left
/// behind by an interrupted save is refused on load.
pub fn save(model: &SentimentModel, paths: &ArtifactPaths) -> Result<(), ArtifactError> {
    let vectorizer_bytes = encode_json(&paths.vectorizer, &model.vectorizer)?;
    let model_file = ModelFile {
        vectorizer_digest: digest(&vectorizer_bytes),
        classifier: model.model.clone(),
    };
    let model_bytes = encode_json(&paths.model, &model_file)?;
    write_bytes(&paths.vectorizer, &vectorizer_bytes)?;
    write_bytes(&paths.model, &model_bytes)?;
    Ok(())
}

/// Load both artifacts and check they were saved together and describe the
/// same feature space.
pub fn load(paths: &ArtifactPaths) -> Result<SentimentModel, ArtifactError> {
    let vectorizer_bytes = read_bytes(&paths.vectorizer)?;
    let vectorizer: TfIdfVectorizer = parse_json(&paths.vectorizer, &vectorizer_bytes)?;
    let model_file: ModelFile = parse_json(&paths.model, &read_bytes(&paths.model)?)?;
    if model_file.vectorizer_digest != digest(&vectorizer_bytes) {
        return Err(ArtifactError::Invalid {
            path: paths.model.clone(),
            reason: "model was trained against a different vectorizer".into(),
        });
    }
    let model = model_file.classifier;
    model.validate().map_err(|reason| ArtifactError::Invalid {
        path: paths.model.clone(),
        reason,
    })?;
    if model.n_features != vectorizer.len() {
        return Err(ArtifactError::Invalid {
            path: paths.model.clone(),
            reason: format!(
                "model expects {} features but the vectorizer produces {}",
                model.n_features,
                vectorizer.len()
            ),
        });
    }
    Ok(SentimentModel { vectorizer, model })
}

fn digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn parse_json<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn encode_json<T: Serialize>(path: &Path, value: &T) -> Result<Vec<u8>, ArtifactError> {
    serde_json::to_vec(value).map_err(|source| ArtifactError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    atomic_file::write_atomic(path, bytes).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })
}
