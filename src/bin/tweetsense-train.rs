//! Developer utility to retrain the sentiment classifier from the dataset
//! file and report how well it fits its own training rows.

use std::path::PathBuf;

use tweetsense::config;
use tweetsense::dataset::DatasetStore;
use tweetsense::logging;
use tweetsense::ml::classifier::{self, ArtifactPaths, ClassifierOptions};
use tweetsense::ml::metrics::{accuracy, evaluate, precision_recall_by_class};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    if let Err(err) = logging::init_with_prefix("tweetsense-train") {
        eprintln!("Logging disabled: {err}");
    }
    let cfg = config::load_or_default().map_err(|err| err.to_string())?;
    let mut paths = cfg.storage_paths().map_err(|err| err.to_string())?;
    if let Some(dataset) = options.dataset {
        paths.dataset = dataset;
    }
    if let Some(dir) = options.out_dir {
        paths.model = dir.join(&cfg.storage.model_file);
        paths.vectorizer = dir.join(&cfg.storage.vectorizer_file);
    }
    let mut train_options = ClassifierOptions::from(&cfg.training);
    if let Some(epochs) = options.epochs {
        train_options.train.epochs = epochs;
    }

    let store = DatasetStore::new(paths.dataset.clone());
    let records = store.read_all().map_err(|err| err.to_string())?;
    let model = classifier::train(&store, &train_options, &ArtifactPaths::from(&paths))
        .map_err(|err| err.to_string())?;
    println!("rows: {}", records.len());
    println!("features: {}", model.vectorizer.len());
    println!("model written to {}", paths.model.display());

    let dataset = classifier::encode_labeled(&model, &records);
    let cm = evaluate(&model.model, &dataset);
    println!("training accuracy: {:.4}", accuracy(&cm));
    for (idx, stats) in precision_recall_by_class(&cm).iter().enumerate() {
        println!(
            "class {:>2} {:<12}  precision={:.3}  recall={:.3}  f1={:.3}  support={}",
            idx,
            model.classes()[idx],
            stats.precision,
            stats.recall,
            stats.f1(),
            stats.support
        );
    }
    println!("confusion matrix (rows=true, cols=pred):");
    for truth in 0..cm.n_classes {
        let mut row = String::new();
        for pred in 0..cm.n_classes {
            row.push_str(&format!("{:6}", cm.get(truth, pred)));
        }
        println!("{row}");
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
struct CliOptions {
    dataset: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    epochs: Option<usize>,
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--dataset" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--dataset requires a value".to_string())?;
                options.dataset = Some(PathBuf::from(value));
            }
            "--out-dir" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--out-dir requires a value".to_string())?;
                options.out_dir = Some(PathBuf::from(value));
            }
            "--epochs" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--epochs requires a value".to_string())?;
                options.epochs = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("Invalid --epochs value: {value}"))?,
                );
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(options)
}

fn help_text() -> String {
    [
        "tweetsense-train",
        "",
        "Retrains the sentiment classifier from the dataset CSV and prints training-set metrics.",
        "",
        "Usage:",
        "  tweetsense-train [--dataset <file>] [--out-dir <dir>] [--epochs <n>]",
        "",
        "Options:",
        "  --dataset <file>  Dataset CSV (default: configured dataset path).",
        "  --out-dir <dir>   Directory for the model and vectorizer files (default: data dir).",
        "  --epochs <n>      Training iterations (default: configured max_iter).",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = ["--dataset", "t.csv", "--out-dir", "out", "--epochs", "20"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        let options = parse_args(args).unwrap();
        assert_eq!(options.dataset, Some(PathBuf::from("t.csv")));
        assert_eq!(options.out_dir, Some(PathBuf::from("out")));
        assert_eq!(options.epochs, Some(20));
    }

    #[test]
    fn help_is_reported_as_error_text() {
        let err = parse_args(vec!["--help".to_string()]).unwrap_err();
        assert!(err.starts_with("tweetsense-train"));
    }
}
