//! Sanity/certification report: certify a set of sample points and lay the
//! result out as a table.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;
use triad_core::{
    certify_observed, CertificationReport, CertificationRequest, SieveTables, TriadError,
};

use crate::error::BalanceError;
use crate::progress::ProgressTicker;
use crate::reference::reference_f;

/// Options for a sanity run.
#[derive(Debug, Clone, Default)]
pub struct SanityConfig {
    pub request: CertificationRequest,
    pub progress: bool,
    /// Optional JSON dump of the full report.
    pub json: Option<PathBuf>,
}

/// Report plus the draft-reference comparison for each sample.
#[derive(Debug, Clone, Serialize)]
pub struct SanityReport {
    pub certification: CertificationReport,
    /// F(n) − draft F(n), where a draft value exists.
    pub delta_vs_reference: Vec<(u64, Option<f64>)>,
}

/// Certify `config.request`, logging progress over the pass when
/// `config.progress` is set.
pub fn run_sanity(config: &SanityConfig) -> Result<SanityReport, BalanceError> {
    let mut ticker = ProgressTicker::new(config.request.max_n(), config.progress);
    run_sanity_with(config, &mut ticker)
}

/// [`run_sanity`] with a caller-supplied ticker, advanced on every n the
/// certification pass visits.
pub fn run_sanity_with(
    config: &SanityConfig,
    ticker: &mut ProgressTicker,
) -> Result<SanityReport, BalanceError> {
    let request = &config.request;
    request.validate()?;
    let max_n = request.max_n();
    let max_n = i64::try_from(max_n).map_err(|_| TriadError::RangeTooLarge(max_n))?;
    if config.progress {
        log::info!("building phi, pi up to N={} ...", max_n);
    }
    let tables = SieveTables::build(max_n)?;
    if config.progress {
        log::info!(
            "certifying {} sample points against N_ref={} (D={})",
            request.samples.len(),
            request.n_ref,
            request.d_omega
        );
    }

    let certification = certify_observed(&tables, request, |r| {
        ticker.tick(r.n);
    })?;
    let delta_vs_reference = certification
        .samples
        .iter()
        .map(|s| (s.record.n, reference_f(s.record.n).map(|r| s.record.f - r)))
        .collect();
    Ok(SanityReport {
        certification,
        delta_vs_reference,
    })
}

/// Render the interval and the per-sample table.
pub fn format_sanity(report: &SanityReport) -> String {
    let cert = &report.certification;
    let mut out = String::new();

    let _ = writeln!(out, "[cert] Interval for kappa from N_ref={}:", cert.n_ref);
    let _ = writeln!(
        out,
        "       kappa in [{:.12}, {:.12}]  (width ~ {:.3e})",
        cert.interval.lo,
        cert.interval.hi,
        cert.interval.width()
    );
    let _ = writeln!(out);

    let header = format!(
        "{:>10}  {:>14}  {:>11}  {:>11}  {:>4}  {:>12}  {:>12}",
        "n", "F(n)", "R_tot(n)", "|F-k_mid|", "OK?", "scaled rem.", "dF vs REF"
    );
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", "-".repeat(header.len()));

    for (s, (_, delta)) in cert.samples.iter().zip(&report.delta_vs_reference) {
        let _ = writeln!(
            out,
            "{:>10}  {:>14.10}  {:>11.3e}  {:>11.3e}  {:>4}  {:>12.6}  {:>12.2e}",
            s.record.n,
            s.record.f,
            s.bounds.r_total,
            s.deviation,
            if s.compatible { "OK" } else { "FAIL" },
            s.scaled_remainder.unwrap_or(f64::NAN),
            delta.unwrap_or(f64::NAN)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "OK means |F(n) - kappa_mid| <= R_tot(n) + R_tot(N_ref) (compatible with the certificate)."
    );
    let _ = writeln!(
        out,
        "scaled remainder = n (F(n) - kappa_mid) / ln n; expected ~ 1/ln 2 = {:.6} for large n.",
        1.0 / std::f64::consts::LN_2
    );
    out
}
