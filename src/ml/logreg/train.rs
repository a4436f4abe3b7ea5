use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sprs::CsVec;

use super::{LOGREG_MODEL_VERSION, LogRegModel, softmax};

/// Training options for the sparse logistic regression head.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Full passes over the training rows.
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub batch_size: usize,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 1.0,
            l2: 1e-4,
            batch_size: 16,
            seed: 42,
        }
    }
}

/// In-memory training set: one sparse row and one class index per example.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    pub classes: Vec<String>,
    pub n_features: usize,
    pub x: Vec<CsVec<f32>>,
    pub y: Vec<usize>,
}

/// Fit weights with seeded mini-batch gradient descent on the softmax loss.
///
/// The result depends only on the dataset and `options`, so repeated runs
/// with the same seed produce identical models.
pub fn train_logreg(dataset: &TrainDataset, options: &TrainOptions) -> Result<LogRegModel, String> {
    if dataset.x.is_empty() || dataset.y.is_empty() {
        return Err("Empty training set".to_string());
    }
    if dataset.x.len() != dataset.y.len() {
        return Err("Mismatched training inputs/labels".to_string());
    }
    let classes = dataset.classes.len();
    if classes == 0 {
        return Err("No classes available for training".to_string());
    }
    let dim = dataset.n_features;
    if dataset.x.iter().any(|row| row.dim() != dim) {
        return Err(format!("Inconsistent feature row length (expected {dim})"));
    }
    if dataset.y.iter().any(|&y| y >= classes) {
        return Err("Label index out of range".to_string());
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut weights = vec![0.0f32; classes * dim];
    let mut bias = vec![0.0f32; classes];
    for w in &mut weights {
        *w = (rng.random::<f32>() - 0.5) * 0.01;
    }

    let mut indices: Vec<usize> = (0..dataset.x.len()).collect();
    let batch_size = options.batch_size.max(1);
    let lr = options.learning_rate;
    let decay = 1.0 - lr * options.l2.max(0.0);
    let mut grad_w = vec![0.0f32; weights.len()];
    let mut grad_b = vec![0.0f32; classes];
    let mut touched: Vec<usize> = Vec::new();

    for _epoch in 0..options.epochs {
        indices.shuffle(&mut rng);
        for chunk in indices.chunks(batch_size) {
            touched.clear();
            grad_b.iter_mut().for_each(|g| *g = 0.0);
            for &idx in chunk {
                let x = &dataset.x[idx];
                let y = dataset.y[idx];
                let mut logits = bias.clone();
                for (c, logit) in logits.iter_mut().enumerate() {
                    let base = c * dim;
                    for (i, &value) in x.iter() {
                        *logit += weights[base + i] * value;
                    }
                }
                let probs = softmax(&logits);
                for c in 0..classes {
                    let diff = probs[c] - if c == y { 1.0 } else { 0.0 };
                    let base = c * dim;
                    for (i, &value) in x.iter() {
                        grad_w[base + i] += diff * value;
                        touched.push(base + i);
                    }
                    grad_b[c] += diff;
                }
            }

            let inv = 1.0 / chunk.len() as f32;
            if decay != 1.0 {
                weights.iter_mut().for_each(|w| *w *= decay);
            }
            touched.sort_unstable();
            touched.dedup();
            for &idx in &touched {
                weights[idx] -= lr * grad_w[idx] * inv;
                grad_w[idx] = 0.0;
            }
            for c in 0..classes {
                bias[c] -= lr * grad_b[c] * inv;
            }
        }
    }

    let model = LogRegModel {
        model_version: LOGREG_MODEL_VERSION,
        n_features: dim,
        classes: dataset.classes.clone(),
        weights,
        bias,
    };
    model.validate()?;
    Ok(model)
}
