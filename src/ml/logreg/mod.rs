//! Multinomial logistic regression over sparse TF-IDF vectors.

use serde::{Deserialize, Serialize};
use sprs::CsVec;

mod train;
pub use train::{TrainDataset, TrainOptions, train_logreg};

/// Bumped whenever the persisted layout changes.
pub const LOGREG_MODEL_VERSION: i64 = 1;

/// Versioned logistic regression model with one weight row per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRegModel {
    pub model_version: i64,
    pub n_features: usize,
    pub classes: Vec<String>,
    /// Row-major `classes x n_features`.
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
}

impl LogRegModel {
    /// Validate the model dimensions and version.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_version != LOGREG_MODEL_VERSION {
            return Err(format!(
                "Unsupported model_version {} (expected {})",
                self.model_version, LOGREG_MODEL_VERSION
            ));
        }
        let classes = self.classes.len();
        if classes == 0 {
            return Err("No classes defined".to_string());
        }
        if self.weights.len() != classes * self.n_features {
            return Err("weights length mismatch".to_string());
        }
        if self.bias.len() != classes {
            return Err("bias length mismatch".to_string());
        }
        if self.weights.iter().chain(&self.bias).any(|w| !w.is_finite()) {
            return Err("non-finite parameters".to_string());
        }
        Ok(())
    }

    /// Raw class scores for one feature vector.
    pub(crate) fn logits(&self, features: &CsVec<f32>) -> Vec<f32> {
        let mut logits = self.bias.clone();
        for (c, logit) in logits.iter_mut().enumerate() {
            let row = &self.weights[c * self.n_features..(c + 1) * self.n_features];
            for (i, &value) in features.iter() {
                if let Some(weight) = row.get(i) {
                    *logit += weight * value;
                }
            }
        }
        logits
    }

    /// Class probabilities for one feature vector.
    pub fn predict_proba(&self, features: &CsVec<f32>) -> Vec<f32> {
        if features.dim() != self.n_features || self.classes.is_empty() {
            return Vec::new();
        }
        softmax(&self.logits(features))
    }

    /// Index and probability of the most likely class.
    pub fn predict_top(&self, features: &CsVec<f32>) -> Option<(usize, f32)> {
        let proba = self.predict_proba(features);
        let mut best: Option<(usize, f32)> = None;
        for (idx, &p) in proba.iter().enumerate() {
            if best.is_none_or(|(_, best_p)| p > best_p) {
                best = Some((idx, p));
            }
        }
        best
    }
}

/// Numerically stable softmax; uniform when every exponent underflows.
pub fn softmax(raw: &[f32]) -> Vec<f32> {
    if raw.is_empty() {
        return Vec::new();
    }
    let max = raw
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, |a, b| a.max(b));
    let mut exps: Vec<f32> = raw.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![1.0 / raw.len() as f32; raw.len()];
    }
    for v in &mut exps {
        *v /= sum;
    }
    exps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class_model() -> LogRegModel {
        LogRegModel {
            model_version: LOGREG_MODEL_VERSION,
            n_features: 3,
            classes: vec!["happy".into(), "sad".into()],
            weights: vec![2.0, 0.0, 0.0, 0.0, 2.0, 0.0],
            bias: vec![0.0, 0.1],
        }
    }

    #[test]
    fn softmax_sums_to_one() {
        let out = softmax(&[1.0, 2.0, 3.0]);
        let sum: f32 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(out[2] > out[1] && out[1] > out[0]);
    }

    #[test]
    fn zero_vector_falls_back_to_bias() {
        let model = two_class_model();
        model.validate().unwrap();
        let zero = CsVec::new(3, vec![], vec![]);
        assert_eq!(model.predict_top(&zero).map(|(idx, _)| idx), Some(1));
    }

    #[test]
    fn active_feature_drives_prediction() {
        let model = two_class_model();
        let features = CsVec::new(3, vec![0], vec![1.0]);
        let (idx, p) = model.predict_top(&features).unwrap();
        assert_eq!(idx, 0);
        assert!(p > 0.8);
    }

    #[test]
    fn dimension_mismatch_yields_no_prediction() {
        let model = two_class_model();
        let features = CsVec::new(5, vec![4], vec![1.0]);
        assert!(model.predict_proba(&features).is_empty());
        assert!(model.predict_top(&features).is_none());
    }

    #[test]
    fn validate_rejects_mismatched_shapes() {
        let mut model = two_class_model();
        model.bias.pop();
        assert!(model.validate().is_err());
        let mut model = two_class_model();
        model.model_version = 0;
        assert!(model.validate().is_err());
    }
}
