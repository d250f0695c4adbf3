//! Single-N evaluation: terminal prefix values next to the literature
//! constants, with an optional full CSV of every n.

use std::fmt::Write as _;
use std::path::PathBuf;

use triad_core::{batch_prefix, PrefixRecord, SieveTables, TailBounds, DEFAULT_OMEGA_SLACK};

use crate::error::BalanceError;
use crate::export::write_records;
use crate::reference::{E_INF, KAPPA_REF, XI_INF};

#[derive(Debug, Clone)]
pub struct SingleConfig {
    pub n: i64,
    pub d_omega: f64,
    /// Write every n to this CSV as well.
    pub csv: Option<PathBuf>,
}

impl Default for SingleConfig {
    fn default() -> Self {
        Self {
            n: 200_000,
            d_omega: DEFAULT_OMEGA_SLACK,
            csv: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleSummary {
    pub record: PrefixRecord,
    pub bounds: TailBounds,
}

/// Evaluate all prefixes up to `config.n` through the batch path and
/// return the terminal one.
pub fn evaluate_single(config: &SingleConfig) -> Result<SingleSummary, BalanceError> {
    let tables = SieveTables::build(config.n)?;
    let bounds = TailBounds::at(tables.max_n(), config.d_omega)?;
    let records = batch_prefix(&tables, tables.max_n())?;

    let record = match records.last() {
        Some(r) => *r,
        None => PrefixRecord {
            n: 0,
            xi: 0.0,
            omega: 0.0,
            e: 0.0,
            f: 0.0,
        },
    };

    if let Some(path) = &config.csv {
        write_records(path, &records)?;
        log::info!("wrote CSV to: {}", path.display());
    }

    Ok(SingleSummary { record, bounds })
}

pub fn format_single(summary: &SingleSummary) -> String {
    let r = &summary.record;
    let b = &summary.bounds;
    let mut out = String::new();
    let _ = writeln!(out, "N = {}", r.n);
    let _ = writeln!(
        out,
        "Xi(N)     = {:.15}   (Xi_inf ~ {:.15}, tail <= {:.3e})",
        r.xi, XI_INF, b.r_xi
    );
    let _ = writeln!(
        out,
        "E(N)      = {:.15}   (E_inf ~ {:.15}, tail <= {:.3e})",
        r.e, E_INF, b.r_e
    );
    let _ = writeln!(out, "Omega(N)  = {:.15}   (tail <= {:.3e})", r.omega, b.r_omega);
    let _ = writeln!(out, "F(N)      = {:.15}   (kappa_ref = {:.13})", r.f, KAPPA_REF);
    out
}
