//! triad-balance CLI
//!
//! Usage:
//!   triad-balance --mode=dataset [--max-n=1000000] [--stride=1] [--out=data/triad_balance_to_1e6.csv] [--progress]
//!   triad-balance --mode=sanity  [--points=10000,20000,...] [--nref=200000] [--d-omega=10.0] [--json=<path>] [--progress]
//!   triad-balance --mode=single  [--n=200000] [--d-omega=10.0] [--csv=<path>]
//!
//! Modes:
//!   dataset: stream F(n) for n = 1..N into a CSV, every stride-th row (gzip if --out ends in .gz)
//!   sanity : certify kappa from N_ref and check each sample point against it
//!   single : print Xi, E, Omega, F at one N next to the reference constants

use std::collections::HashMap;
use std::path::PathBuf;

use triad_balance::export::{export_dataset, DatasetConfig};
use triad_balance::report::{format_sanity, run_sanity, SanityConfig};
use triad_balance::single::{evaluate_single, format_single, SingleConfig};
use triad_core::CertificationRequest;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args);

    let mode = opts.get("mode").map(|s| s.as_str()).unwrap_or("sanity");

    let outcome = match mode {
        "dataset" => run_dataset(&opts),
        "sanity" => run_sanity_mode(&opts),
        "single" => run_single(&opts),
        other => Err(format!("Unknown mode: {other}. Use --mode=dataset|sanity|single")),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_dataset(opts: &HashMap<String, String>) -> Result<(), String> {
    let defaults = DatasetConfig::default();
    let config = DatasetConfig {
        max_n: parse_i64(opts, "max-n")?.unwrap_or(defaults.max_n),
        stride: parse_i64(opts, "stride")?.map_or(defaults.stride, |s| s.max(1) as u64),
        out: opts.get("out").map(PathBuf::from).unwrap_or(defaults.out),
        progress: opts.contains_key("progress"),
    };

    let summary = export_dataset(&config).map_err(|e| e.to_string())?;
    println!(
        "[done] Wrote {} rows to {} (sieve {:.2}s, write {:.2}s)",
        summary.rows,
        config.out.display(),
        summary.sieve_secs,
        summary.write_secs
    );
    Ok(())
}

fn run_sanity_mode(opts: &HashMap<String, String>) -> Result<(), String> {
    let defaults = CertificationRequest::default();
    let samples = match opts.get("points") {
        Some(v) => parse_points(v)?,
        None => defaults.samples,
    };
    let n_ref = match parse_i64(opts, "nref")? {
        Some(n) if n < 0 => return Err(format!("--nref must be non-negative, got {n}")),
        Some(n) => n as u64,
        None => defaults.n_ref,
    };
    let config = SanityConfig {
        request: CertificationRequest {
            samples,
            n_ref,
            d_omega: parse_f64(opts, "d-omega")?.unwrap_or(defaults.d_omega),
        },
        progress: opts.contains_key("progress"),
        json: opts.get("json").map(PathBuf::from),
    };

    let report = run_sanity(&config).map_err(|e| e.to_string())?;
    println!();
    print!("{}", format_sanity(&report));
    if let Some(path) = &config.json {
        write_json(&report, path);
    }
    Ok(())
}

fn run_single(opts: &HashMap<String, String>) -> Result<(), String> {
    let defaults = SingleConfig::default();
    let config = SingleConfig {
        n: parse_i64(opts, "n")?.unwrap_or(defaults.n),
        d_omega: parse_f64(opts, "d-omega")?.unwrap_or(defaults.d_omega),
        csv: opts.get("csv").map(PathBuf::from),
    };

    let summary = evaluate_single(&config).map_err(|e| e.to_string())?;
    print!("{}", format_single(&summary));
    if let Some(path) = &config.csv {
        println!("[done] wrote CSV to: {}", path.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_args(args: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for arg in args {
        if let Some(kv) = arg.strip_prefix("--") {
            if let Some((k, v)) = kv.split_once('=') {
                map.insert(k.to_string(), v.to_string());
            } else {
                map.insert(kv.to_string(), "true".to_string());
            }
        }
    }
    map
}

fn parse_i64(opts: &HashMap<String, String>, key: &str) -> Result<Option<i64>, String> {
    opts.get(key)
        .map(|v| {
            v.replace('_', "")
                .parse::<i64>()
                .map_err(|e| format!("--{key}={v}: {e}"))
        })
        .transpose()
}

fn parse_f64(opts: &HashMap<String, String>, key: &str) -> Result<Option<f64>, String> {
    opts.get(key)
        .map(|v| v.parse::<f64>().map_err(|e| format!("--{key}={v}: {e}")))
        .transpose()
}

/// Comma-separated sample points, sorted and deduplicated.
fn parse_points(v: &str) -> Result<Vec<u64>, String> {
    let mut points = v
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.replace('_', "")
                .parse::<u64>()
                .map_err(|e| format!("--points entry '{s}': {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    points.sort_unstable();
    points.dedup();
    Ok(points)
}

fn write_json<T: serde::Serialize>(value: &T, path: &std::path::Path) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("could not create directory {parent:?}: {e}");
                return;
            }
        }
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::warn!("could not write {}: {e}", path.display());
            } else {
                println!("\nResults written to {}", path.display());
            }
        }
        Err(e) => log::warn!("could not serialize results: {e}"),
    }
}
