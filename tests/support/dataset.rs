use std::path::Path;

use tweetsense::dataset::{DatasetStore, NewTweet};

/// Labeled rows covering a few sentiments, no irrelevant ones.
pub const SENTIMENT_ROWS: &[(&str, &str, &str)] = &[
    ("sports", "what a brilliant win for the team", "happy"),
    ("movies", "loved every minute of that film", "happy"),
    ("general", "sunshine and smiles all day long", "happy"),
    ("general", "so grateful for my wonderful friends", "happy"),
    ("general", "my dog passed away this morning", "sad"),
    ("movies", "that ending left me in tears", "sad"),
    ("general", "feeling lonely and empty tonight", "sad"),
    ("geopolitics", "this policy is a disgrace and makes me furious", "angry"),
    ("sports", "the referee ruined the match, outrageous", "angry"),
    ("geopolitics", "we stand with the volunteers helping refugees", "supportive"),
    ("general", "proud to back this community project", "supportive"),
];

/// Rows that teach the model a clear irrelevant class.
pub const SPAM_ROWS: &[(&str, &str, &str)] = &[
    ("general", "buy cheap watches online now", "irrelevant"),
    ("general", "click here for free coupons", "irrelevant"),
    ("general", "free coupons click here now", "irrelevant"),
    ("general", "cheap watches free shipping online", "irrelevant"),
];

/// Write `rows` to a fresh dataset file at `path`.
pub fn write_dataset(path: &Path, rows: &[(&str, &str, &str)]) -> DatasetStore {
    let store = DatasetStore::new(path);
    store.create_if_missing().expect("create dataset");
    store
        .append_batch(
            rows.iter()
                .map(|(topic, tweet, label)| NewTweet::new(topic, *tweet, *label))
                .collect(),
        )
        .expect("seed dataset");
    store
}
