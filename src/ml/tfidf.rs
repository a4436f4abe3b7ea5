//! TF-IDF text vectorizer over word n-grams.
//!
//! Tokens are lowercase runs of two or more word characters. The vocabulary
//! keeps the `max_features` most frequent n-grams of the training corpus and
//! numbers them in lexicographic order. Vectors are raw counts scaled by a
//! smoothed IDF and L2-normalized.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sprs::CsVec;

/// Bumped whenever the persisted layout or the feature definition changes.
pub const VECTORIZER_FORMAT_VERSION: u32 = 1;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token regex must compile"));

/// Vocabulary size and n-gram range used when fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfIdfOptions {
    pub max_features: usize,
    pub ngram_min: usize,
    pub ngram_max: usize,
}

impl Default for TfIdfOptions {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ngram_min: 1,
            ngram_max: 2,
        }
    }
}

/// A fitted vectorizer. Construct with [`TfIdfVectorizer::fit`] or deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VectorizerState", into = "VectorizerState")]
pub struct TfIdfVectorizer {
    ngram_min: usize,
    ngram_max: usize,
    terms: Vec<String>,
    idf: Vec<f32>,
    index: HashMap<String, usize>,
}

/// Persisted form; the term index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct VectorizerState {
    format_version: u32,
    ngram_min: usize,
    ngram_max: usize,
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl TryFrom<VectorizerState> for TfIdfVectorizer {
    type Error = String;

    fn try_from(state: VectorizerState) -> Result<Self, Self::Error> {
        if state.format_version != VECTORIZER_FORMAT_VERSION {
            return Err(format!(
                "Unsupported vectorizer format {} (expected {})",
                state.format_version, VECTORIZER_FORMAT_VERSION
            ));
        }
        if state.ngram_min == 0 || state.ngram_max < state.ngram_min {
            return Err(format!(
                "Invalid n-gram range ({}, {})",
                state.ngram_min, state.ngram_max
            ));
        }
        if state.terms.len() != state.idf.len() {
            return Err("idf length mismatch".to_string());
        }
        if state.terms.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err("vocabulary must be sorted and unique".to_string());
        }
        if state.idf.iter().any(|value| !value.is_finite()) {
            return Err("idf contains non-finite values".to_string());
        }
        Ok(Self::from_parts(
            state.ngram_min,
            state.ngram_max,
            state.terms,
            state.idf,
        ))
    }
}

impl From<TfIdfVectorizer> for VectorizerState {
    fn from(vectorizer: TfIdfVectorizer) -> Self {
        Self {
            format_version: VECTORIZER_FORMAT_VERSION,
            ngram_min: vectorizer.ngram_min,
            ngram_max: vectorizer.ngram_max,
            terms: vectorizer.terms,
            idf: vectorizer.idf,
        }
    }
}

impl TfIdfVectorizer {
    fn from_parts(ngram_min: usize, ngram_max: usize, terms: Vec<String>, idf: Vec<f32>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self {
            ngram_min,
            ngram_max,
            terms,
            idf,
            index,
        }
    }

    /// Learn the vocabulary and IDF weights from a corpus.
    pub fn fit<S: AsRef<str>>(documents: &[S], options: &TfIdfOptions) -> Self {
        let ngram_min = options.ngram_min.max(1);
        let ngram_max = options.ngram_max.max(ngram_min);
        let analyzed: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| analyze(doc.as_ref(), ngram_min, ngram_max))
            .collect();

        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &analyzed {
            let mut seen = HashSet::new();
            for term in doc {
                *term_counts.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(options.max_features);
        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term.to_string()).collect();
        terms.sort();

        let n_docs = analyzed.len() as f32;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        Self::from_parts(ngram_min, ngram_max, terms, idf)
    }

    /// Number of features produced by [`transform`](Self::transform).
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Vectorize one text with the fitted vocabulary; unknown n-grams are dropped.
    pub fn transform(&self, text: &str) -> CsVec<f32> {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for term in analyze(text, self.ngram_min, self.ngram_max) {
            if let Some(&idx) = self.index.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        let mut indices = Vec::with_capacity(counts.len());
        let mut values = Vec::with_capacity(counts.len());
        for (idx, count) in counts {
            indices.push(idx);
            values.push(count * self.idf[idx]);
        }
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut values {
                *value /= norm;
            }
        }
        CsVec::new(self.terms.len(), indices, values)
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<CsVec<f32>> {
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }
}

/// Lowercased tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_REGEX
        .find_iter(&lower)
        .map(|token| token.as_str().to_string())
        .collect()
}

/// Every n-gram of `text` for `n` in `ngram_min..=ngram_max`, tokens joined by a space.
fn analyze(text: &str, ngram_min: usize, ngram_max: usize) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::new();
    for n in ngram_min..=ngram_max {
        if n == 1 {
            terms.extend(tokens.iter().cloned());
            continue;
        }
        terms.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    terms
}
