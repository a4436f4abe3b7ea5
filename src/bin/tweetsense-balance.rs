//! Developer utility to top up under-represented sentiment labels with
//! synthetic example tweets.

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tweetsense::config;
use tweetsense::dataset::DatasetStore;
use tweetsense::dataset::balancer::{self, BalanceReport};
use tweetsense::logging;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    if let Err(err) = logging::init_with_prefix("tweetsense-balance") {
        eprintln!("Logging disabled: {err}");
    }
    let cfg = config::load_or_default().map_err(|err| err.to_string())?;
    let dataset = match options.dataset {
        Some(path) => path,
        None => cfg.storage_paths().map_err(|err| err.to_string())?.dataset,
    };
    let target = options.target.unwrap_or(cfg.balancer.target_total);
    let seed = options.seed.or(cfg.balancer.seed);

    let store = DatasetStore::new(dataset);
    if store.create_if_missing().map_err(|err| err.to_string())? {
        println!("created empty dataset at {}", store.path().display());
    }
    let report = match seed {
        Some(seed) => balancer::balance(&store, target, &mut StdRng::seed_from_u64(seed)),
        None => balancer::balance(&store, target, &mut rand::rng()),
    }
    .map_err(|err| err.to_string())?;
    print_report(&report, target);
    Ok(())
}

fn print_report(report: &BalanceReport, target: usize) {
    println!("target total: {target}");
    println!("added rows: {}", report.added.len());
    println!("final dataset size: {}", report.final_total);
    println!("label distribution:");
    for (label, count) in &report.distribution {
        println!("  {label:<12} {count}");
    }
}

#[derive(Debug, Clone, Default)]
struct CliOptions {
    dataset: Option<PathBuf>,
    target: Option<usize>,
    seed: Option<u64>,
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
            "--target" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--target requires a value".to_string())?;
                options.target = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("Invalid --target value: {value}"))?,
                );
            }
            "--seed" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                options.seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --seed value: {value}"))?,
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
        "tweetsense-balance",
        "",
        "Adds synthetic example tweets so every sentiment label reaches target/8 rows.",
        "",
        "Usage:",
        "  tweetsense-balance [--dataset <file>] [--target <n>] [--seed <u64>]",
        "",
        "Options:",
        "  --dataset <file>  Dataset CSV (default: configured dataset path).",
        "  --target <n>      Desired total across all labels (default: 250).",
        "  --seed <u64>      RNG seed for reproducible rows (default: random).",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let options = parse_args(args(&["--dataset", "d.csv", "--target", "80", "--seed", "7"]))
            .unwrap();
        assert_eq!(options.dataset, Some(PathBuf::from("d.csv")));
        assert_eq!(options.target, Some(80));
        assert_eq!(options.seed, Some(7));
    }

    #[test]
    fn rejects_unknown_and_malformed_flags() {
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--target", "many"])).is_err());
        assert!(parse_args(args(&["--seed"])).is_err());
    }
}
