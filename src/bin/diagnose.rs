//! One-shot diagnosis from the command line.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin diagnose -- [--json] <symptom>...
//! ```
//!
//! Reads the model directory from `PHYTOTRUST_MODEL_PATH` (default `models`).
//! Logs go to stderr so stdout stays machine-readable.

use anyhow::{bail, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use phytotrust::domain::{Outcome, ResultList, SymptomSet};
use phytotrust::{DiagnosisService, EngineConfig};

fn usage() -> String {
    "Usage: diagnose [--json] <symptom>...".to_string()
}

fn parse_args() -> Result<(bool, SymptomSet)> {
    let mut json = false;
    let mut symptoms = SymptomSet::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => bail!(usage()),
            s if s.starts_with("--") => bail!("Unknown option {s}\n{}", usage()),
            s => {
                symptoms.insert(s);
            }
        }
    }

    Ok((json, symptoms))
}

fn print_table(results: &ResultList) {
    println!(
        "{:<32} {:>7} {:>7} {:>7}  {:<6}  TREATMENT / PREVENTION",
        "DISEASE", "FTS", "ML", "RULES", "TIER"
    );
    let pct = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
    for r in results {
        let name = match r.outcome() {
            Outcome::NoMatch => "No matching disease found".to_string(),
            _ => r.display_name(),
        };
        println!(
            "{:<32} {:>7} {:>7} {:>7}  {:<6}  {} / {}",
            name,
            pct(r.final_trust_score()),
            pct(r.ml_confidence()),
            pct(r.rule_confidence()),
            r.tier(),
            r.treatment(),
            r.prevention()
        );
    }
    for source in results.degraded_sources() {
        println!("warning: {source} evidence unavailable for this diagnosis");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (json, symptoms) = parse_args()?;

    let service = DiagnosisService::from_config(&EngineConfig::from_env_or_default())?;

    let vocabulary = service.vocabulary();
    for unknown in vocabulary.unknown(&symptoms) {
        eprintln!("warning: unknown symptom {unknown:?}");
    }

    let results = service.diagnose(&symptoms);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(&results);
    }

    Ok(())
}
