mod support;

use support::dataset::{SENTIMENT_ROWS, write_dataset};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tweetsense::dataset::DatasetStore;
use tweetsense::dataset::balancer::{self, example_pool};
use tweetsense::sentiment::Sentiment;

#[test]
fn empty_dataset_fills_every_label_to_floor_share() {
    let temp = tempfile::tempdir().unwrap();
    let store = DatasetStore::new(temp.path().join("tweets.csv"));
    store.create_if_missing().unwrap();

    let report = balancer::balance(&store, 250, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(report.added.len(), 248);
    assert_eq!(report.final_total, 248);
    assert_eq!(report.distribution.len(), 8);
    assert!(report.distribution.iter().all(|(_, count)| *count == 31));

    let rows = store.read_all().unwrap();
    assert_eq!(rows.len(), 248);
    assert_eq!(rows.first().map(|r| r.id), Some(1));
    assert_eq!(rows.last().map(|r| r.id), Some(248));
    for row in &rows {
        let sentiment = Sentiment::parse(&row.sentiment).expect("known label");
        assert!(example_pool(sentiment).contains(&row.tweet.as_str()));
        assert!(balancer::TOPICS.contains(&row.topic.as_str()));
    }
}

#[test]
fn existing_rows_only_receive_the_shortfall() {
    let temp = tempfile::tempdir().unwrap();
    let store = write_dataset(&temp.path().join("tweets.csv"), SENTIMENT_ROWS);

    let report = balancer::balance(&store, 80, &mut StdRng::seed_from_u64(9)).unwrap();
    let counts: std::collections::HashMap<_, _> = report.distribution.into_iter().collect();
    assert!(Sentiment::ALL.iter().all(|s| counts.get(s.as_str()) == Some(&10)));
    assert_eq!(report.final_total, 80);
    assert_eq!(report.added.first().map(|r| r.id), Some(SENTIMENT_ROWS.len() as u64 + 1));

    let again = balancer::balance(&store, 80, &mut StdRng::seed_from_u64(9)).unwrap();
    assert!(again.added.is_empty());
    assert_eq!(again.final_total, 80);
}

#[test]
fn missing_dataset_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let store = DatasetStore::new(temp.path().join("absent.csv"));
    assert!(balancer::balance(&store, 250, &mut StdRng::seed_from_u64(1)).is_err());
}
