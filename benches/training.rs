use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tweetsense::dataset::TweetRecord;
use tweetsense::dataset::balancer::{plan_deficits, synthesize};
use tweetsense::ml::classifier::{self, ClassifierOptions};
use tweetsense::sentiment::Sentiment;

const TARGET_TOTAL: usize = 250;

fn balanced_records() -> Vec<TweetRecord> {
    let plan = plan_deficits(&Default::default(), &Sentiment::ALL, TARGET_TOTAL);
    let rows = synthesize(&plan, &mut StdRng::seed_from_u64(42));
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| TweetRecord {
            id: i as u64 + 1,
            topic: row.topic,
            tweet: row.tweet,
            sentiment: row.sentiment,
        })
        .collect()
}

fn bench_fit(c: &mut Criterion) {
    let records = balanced_records();
    let options = ClassifierOptions::default();
    c.bench_with_input(
        BenchmarkId::new("fit", records.len()),
        &records,
        |b, records| {
            b.iter(|| classifier::fit(black_box(records), &options).expect("fit"));
        },
    );
}

fn bench_predict(c: &mut Criterion) {
    let model = classifier::fit(&balanced_records(), &ClassifierOptions::default()).expect("fit");
    c.bench_function("predict", |b| {
        b.iter(|| model.predict(black_box("I am so happy with the result of the match today")));
    });
}

criterion_group!(benches, bench_fit, bench_predict);
criterion_main!(benches);
