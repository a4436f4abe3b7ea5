//! Machine learning building blocks for the sentiment classifier.
//!
//! Text is vectorized with TF-IDF and classified by a multinomial logistic
//! regression head; `classifier` ties both to the dataset and to the
//! persisted artifacts.

pub mod classifier;
pub mod logreg;
pub mod metrics;
pub mod tfidf;
