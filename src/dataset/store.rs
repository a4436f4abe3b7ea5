use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::csv_io::{encode_rows, read_rows};
use super::records::{DATASET_HEADER, NewTweet, TweetRecord};
use crate::atomic_file;

/// Errors raised by the dataset file. None of them are recovered locally.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset not found at {path}")]
    Missing { path: PathBuf },
    #[error("Failed to read dataset {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },
    #[error("Failed to encode dataset rows for {path}: {source}")]
    Encode { path: PathBuf, source: csv::Error },
    #[error("Failed to write dataset {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `id,topic,tweet,sentiment` CSV file that accumulates labeled tweets.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a header-only file when none exists. Returns whether a file was created.
    pub fn create_if_missing(&self) -> Result<bool, DatasetError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.write_all(&[])?;
        tracing::info!("Created empty dataset at {}", self.path.display());
        Ok(true)
    }

    /// All rows in file order.
    pub fn read_all(&self) -> Result<Vec<TweetRecord>, DatasetError> {
        read_rows(&self.path)
            .map_err(|source| DatasetError::Read {
                path: self.path.clone(),
                source,
            })?
            .ok_or_else(|| DatasetError::Missing {
                path: self.path.clone(),
            })
    }

    /// Append one row with the next id and return it as stored.
    pub fn append(&self, row: NewTweet) -> Result<TweetRecord, DatasetError> {
        let mut appended = self.append_batch(vec![row])?;
        Ok(appended.remove(0))
    }

    /// Append rows in one rewrite, numbering them after the current maximum id.
    pub fn append_batch(&self, rows: Vec<NewTweet>) -> Result<Vec<TweetRecord>, DatasetError> {
        let mut records = self.read_all()?;
        let first_id = next_id(&records);
        let appended: Vec<TweetRecord> = rows
            .into_iter()
            .zip(first_id..)
            .map(|(row, id)| row.with_id(id))
            .collect();
        if appended.is_empty() {
            return Ok(appended);
        }
        records.extend(appended.iter().cloned());
        self.write_all(&records)?;
        tracing::debug!(
            "Appended {} row(s) to {}; ids {}..={}",
            appended.len(),
            self.path.display(),
            first_id,
            first_id + appended.len() as u64 - 1
        );
        Ok(appended)
    }

    /// Distinct non-empty labels, sorted.
    pub fn distinct_sentiments(&self) -> Result<Vec<String>, DatasetError> {
        let labels: BTreeSet<String> = self
            .read_all()?
            .into_iter()
            .map(|record| record.sentiment.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();
        Ok(labels.into_iter().collect())
    }

    fn write_all(&self, records: &[TweetRecord]) -> Result<(), DatasetError> {
        let bytes = encode_rows(&DATASET_HEADER, records).map_err(|source| DatasetError::Encode {
            path: self.path.clone(),
            source,
        })?;
        atomic_file::write_atomic(&self.path, &bytes).map_err(|source| DatasetError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// `max(id) + 1`, or 1 for an empty table.
pub fn next_id(records: &[TweetRecord]) -> u64 {
    records.iter().map(|record| record.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::records::{label_counts, topic_counts};
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> DatasetStore {
        let store = DatasetStore::new(dir.join("tweets.csv"));
        store.create_if_missing().unwrap();
        store
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("absent.csv"));
        assert!(matches!(store.read_all(), Err(DatasetError::Missing { .. })));
        assert!(matches!(
            store.append(NewTweet::new("", "x", "sad")),
            Err(DatasetError::Missing { .. })
        ));
    }

    #[test]
    fn ids_start_at_one_and_have_no_gaps() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        for text in ["one", "two", "three"] {
            store.append(NewTweet::new("", text, "happy")).unwrap();
        }
        let ids: Vec<u64> = store.read_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn ids_resume_after_existing_maximum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tweets.csv");
        std::fs::write(
            &path,
            "id,topic,tweet,sentiment\n4,sports,a,happy\n17,movies,b,sad\n9,general,c,fear\n",
        )
        .unwrap();
        let store = DatasetStore::new(&path);
        let stored = store
            .append_batch(vec![
                NewTweet::new("x", "d", "angry"),
                NewTweet::new("y", "e", "angry"),
            ])
            .unwrap();
        assert_eq!(stored.iter().map(|r| r.id).collect::<Vec<_>>(), vec![18, 19]);
    }

    #[test]
    fn appended_record_reads_back_last_and_verbatim() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.append(NewTweet::new("a", "first", "sad")).unwrap();
        let stored = store
            .append(NewTweet::new(
                "geopolitics",
                "Commas, \"quotes\" and\nnewlines survive",
                "confusion",
            ))
            .unwrap();
        let records = store.read_all().unwrap();
        assert_eq!(records.last(), Some(&stored));
        assert_eq!(stored.tweet, "Commas, \"quotes\" and\nnewlines survive");
    }

    #[test]
    fn distinct_sentiments_are_sorted_and_skip_blanks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tweets.csv");
        std::fs::write(
            &path,
            "id,topic,tweet,sentiment\n1,t,a,sad\n2,t,b,\n3,t,c,angry\n4,t,d,sad\n",
        )
        .unwrap();
        let store = DatasetStore::new(&path);
        assert_eq!(store.distinct_sentiments().unwrap(), vec!["angry", "sad"]);
        let records = store.read_all().unwrap();
        assert_eq!(label_counts(&records)[0], ("sad".to_string(), 2));
        assert_eq!(label_counts(&records)[1], (String::new(), 1));
        assert_eq!(topic_counts(&records), vec![("t".to_string(), 4)]);
    }

    #[test]
    fn malformed_rows_are_a_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tweets.csv");
        std::fs::write(&path, "id,topic,tweet,sentiment\nnot-a-number,t,a,sad\n").unwrap();
        let store = DatasetStore::new(&path);
        assert!(matches!(store.read_all(), Err(DatasetError::Read { .. })));
    }
}
