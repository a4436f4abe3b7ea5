//! Offline top-up of under-represented labels with canned example tweets.
//!
//! The per-class target is `target_total / labels` with floor division, so
//! the remainder is never distributed: 250 over eight labels tops up to 31
//! rows each, 248 in total.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::records::{NewTweet, TweetRecord, label_counts};
use super::store::{DatasetError, DatasetStore};
use crate::sentiment::Sentiment;

/// Topics assigned to synthesized rows.
pub const TOPICS: &[&str] = &["geopolitics", "movies", "sports", "general"];

/// Canned tweets per label, sampled with replacement.
pub fn example_pool(sentiment: Sentiment) -> &'static [&'static str] {
    match sentiment {
        Sentiment::Happy => &[
            "The peace treaty brings hope for the region",
            "The new superhero film was absolutely amazing",
            "Our team’s victory parade was incredible",
            "I love how the community came together",
        ],
        Sentiment::Sad => &[
            "The new sanctions will hurt the economy badly",
            "The ending of that drama made me cry",
            "We lost the finals again, so disappointing",
            "It’s heartbreaking to see this happen",
        ],
        Sentiment::Fear => &[
            "The sudden military drills are frightening",
            "The horror trailer gave me chills",
            "The player’s injury is worrying",
            "I’m scared about the rising tensions",
        ],
        Sentiment::Angry => &[
            "That speech by the minister made me furious",
            "That remake ruined the original classic",
            "The referee’s decision was outrageous",
            "I’m angry about the unfair treatment",
        ],
        Sentiment::Confusion => &[
            "I’m confused about the new border agreement",
            "I’m not sure what the plot was about",
            "I don’t understand the new rules",
            "This situation makes no sense to me",
        ],
        Sentiment::Supportive => &[
            "I fully support the climate accord",
            "I support more indie films getting recognition",
            "I support the coach’s decision",
            "I stand with the people affected",
        ],
        Sentiment::Opposing => &[
            "I strongly oppose the trade restrictions",
            "I oppose the casting choice for the lead role",
            "I oppose the new tournament format",
            "I’m against this policy change",
        ],
        Sentiment::Irrelevant => &[
            ";lkjhgfdsa qwertyuiop",
            "asdfghjkl zxcvbnm qwerty",
            "buy followers cheap $$$ click here",
            "lorem ipsum dolor sit amet",
            "1234567890 abcdefghijkl",
            "random words without meaning",
            "blue chair runs softly",
            "win free iPhone now!!!",
        ],
    }
}

/// Rows missing for one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deficit {
    pub sentiment: Sentiment,
    pub missing: usize,
}

/// Result of a balancing run.
#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub added: Vec<TweetRecord>,
    pub final_total: usize,
    /// Rows per label after balancing, most frequent first.
    pub distribution: Vec<(String, usize)>,
}

/// Missing rows per label against `target_total / labels.len()`.
pub fn plan_deficits(
    counts: &HashMap<String, usize>,
    labels: &[Sentiment],
    target_total: usize,
) -> Vec<Deficit> {
    if labels.is_empty() {
        return Vec::new();
    }
    let target_per_class = target_total / labels.len();
    labels
        .iter()
        .map(|&sentiment| {
            let current = counts.get(sentiment.as_str()).copied().unwrap_or(0);
            Deficit {
                sentiment,
                missing: target_per_class.saturating_sub(current),
            }
        })
        .collect()
}

/// Draw a topic and an example tweet for every missing row, label by label.
pub fn synthesize<R: Rng + ?Sized>(plan: &[Deficit], rng: &mut R) -> Vec<NewTweet> {
    let mut rows = Vec::with_capacity(plan.iter().map(|d| d.missing).sum());
    for deficit in plan {
        let pool = example_pool(deficit.sentiment);
        for _ in 0..deficit.missing {
            let (Some(topic), Some(tweet)) = (TOPICS.choose(rng), pool.choose(rng)) else {
                continue;
            };
            rows.push(NewTweet::new(topic, *tweet, deficit.sentiment.as_str()));
        }
    }
    rows
}

/// Top up every known label of `store` to the per-class target in one write.
pub fn balance<R: Rng + ?Sized>(
    store: &DatasetStore,
    target_total: usize,
    rng: &mut R,
) -> Result<BalanceReport, DatasetError> {
    let existing = store.read_all()?;
    let counts: HashMap<String, usize> = label_counts(&existing).into_iter().collect();
    let plan = plan_deficits(&counts, &Sentiment::ALL, target_total);
    let rows = synthesize(&plan, rng);
    let added = store.append_batch(rows)?;

    let mut all = existing;
    all.extend(added.iter().cloned());
    let distribution = label_counts(&all);
    tracing::info!(
        "Balanced {}: added {} row(s), {} total",
        store.path().display(),
        added.len(),
        all.len()
    );
    Ok(BalanceReport {
        added,
        final_total: all.len(),
        distribution,
    })
}
