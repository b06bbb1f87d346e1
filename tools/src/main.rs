//! pipeline-runner: batch runner for the insurance data pipeline.
//!
//! Usage:
//!   pipeline-runner generate --seed 42 --customers 50 --data-dir ./data
//!   pipeline-runner load --config config.json
//!   pipeline-runner load --data-dir ./data --db insurance.db

use anyhow::Result;
use insurelab_core::{
    config::{GeneratorConfig, PipelineConfig},
    pipeline,
    store::ProvisionOutcome,
};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("generate") => run_generate(&args),
        Some("load") => run_load(&args),
        _ => {
            eprintln!("usage: pipeline-runner generate [--seed N] [--customers N] [--data-dir DIR]");
            eprintln!("       pipeline-runner load [--config FILE] [--data-dir DIR] [--db PATH]");
            std::process::exit(1);
        }
    }
}

fn run_generate(args: &[String]) -> Result<()> {
    let seed = parse_arg(args, "--seed", 42u64);
    let customers = parse_arg(args, "--customers", 50usize);
    let data_dir = str_arg(args, "--data-dir").unwrap_or("data");

    println!("insurance pipeline — generate");
    println!("  seed:      {seed}");
    println!("  customers: {customers}");
    println!("  data_dir:  {data_dir}");
    println!();

    let config = GeneratorConfig {
        customer_count: customers,
        ..GeneratorConfig::default()
    };
    let today = chrono::Utc::now().date_naive();
    let summary = pipeline::run_generate(&config, seed, today, data_dir)?;

    println!("=== GENERATE SUMMARY ===");
    println!("  customers:       {}", summary.customers);
    println!("  policies:        {}", summary.policies);
    println!("  claims:          {}", summary.claims);
    println!("  risk indicators: {}", summary.risk_indicators);
    Ok(())
}

fn run_load(args: &[String]) -> Result<()> {
    let (data_dir, db_path) = resolve_load_targets(args)?;

    println!("insurance pipeline — load");
    println!("  data_dir: {data_dir}");
    println!("  db:       {db_path}");
    println!();

    let summary = pipeline::run_load(&data_dir, &db_path)?;

    println!("=== LOAD SUMMARY ===");
    match summary.outcome {
        ProvisionOutcome::Created => println!("  database created: {db_path}"),
        ProvisionOutcome::AlreadyExists => {
            println!("  database already exists: {db_path} (tables replaced)")
        }
    }
    for (table, rows) in &summary.tables {
        println!("  {table:<16} {rows} rows");
    }
    Ok(())
}

/// Resolve the data directory and database path for the load job. The
/// config file supplies defaults and explicit flags override them. A
/// missing default config.json is fine; a config file the user asked for
/// by flag must exist.
fn resolve_load_targets(args: &[String]) -> Result<(String, String)> {
    let explicit = str_arg(args, "--config");
    let config_path = explicit.unwrap_or("config.json");

    let (mut data_dir, mut db_path) = ("data".to_string(), "insurance.db".to_string());
    if Path::new(config_path).exists() {
        let config = PipelineConfig::load(config_path)?;
        db_path = config.sink.db_path();
        data_dir = config.sink.data_dir;
    } else if explicit.is_some() {
        anyhow::bail!("config file '{config_path}' not found");
    }
    if let Some(dir) = str_arg(args, "--data-dir") {
        data_dir = dir.to_string();
    }
    if let Some(db) = str_arg(args, "--db") {
        db_path = db.to_string();
    }
    Ok((data_dir, db_path))
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn load_targets_come_from_the_config_file() {
        let dir = std::env::temp_dir().join(format!("runner-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r#"{"sink": {"db_name": "acme", "data_dir": "acme-data"}}"#,
        )
        .unwrap();

        let args = argv(&["pipeline-runner", "load", "--config", path.to_str().unwrap()]);
        let (data_dir, db_path) = resolve_load_targets(&args).unwrap();
        assert_eq!(data_dir, "acme-data");
        assert_eq!(db_path, "acme.db", "db path derives from db_name");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn flags_override_defaults_without_a_config_file() {
        let args = argv(&["pipeline-runner", "load", "--data-dir", "d", "--db", "x.db"]);
        let (data_dir, db_path) = resolve_load_targets(&args).unwrap();
        assert_eq!(data_dir, "d");
        assert_eq!(db_path, "x.db");
    }

    #[test]
    fn explicitly_requested_missing_config_is_an_error() {
        let args = argv(&["pipeline-runner", "load", "--config", "/no/such/config.json"]);
        let err = resolve_load_targets(&args).unwrap_err();
        assert!(
            err.to_string().contains("not found"),
            "expected a missing-config error, got: {err}"
        );
    }
}
