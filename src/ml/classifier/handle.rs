use std::sync::{Arc, RwLock};

use super::{Prediction, SentimentModel};

/// Shared owner of the current model.
///
/// Readers take an `Arc` snapshot; a retrain swaps in a whole new model, so a
/// prediction in progress keeps using the model it started with.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    current: Arc<RwLock<Arc<SentimentModel>>>,
}

impl ModelHandle {
    pub fn new(model: SentimentModel) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(model))),
        }
    }

    pub fn current(&self) -> Arc<SentimentModel> {
        self.current
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    /// Install `model` and return the one it replaced.
    pub fn replace(&self, model: SentimentModel) -> Arc<SentimentModel> {
        let mut guard = self.current.write().unwrap_or_else(|err| err.into_inner());
        std::mem::replace(&mut *guard, Arc::new(model))
    }

    pub fn predict(&self, text: &str) -> Prediction {
        self.current().predict(text)
    }
}
