//! Certified interval for κ = lim F(n) and per-sample compatibility checks.
//!
//! One streaming pass captures F at every requested index and at N_ref;
//! the interval is F(N_ref) ± R_total(N_ref).

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use serde::Serialize;

use crate::error::{Result, TriadError};
use crate::prefix::{PrefixRecord, PrefixStream};
use crate::sieve::SieveTables;
use crate::tails::{check_slack, TailBounds, DEFAULT_OMEGA_SLACK, MIN_CERTIFIED_N};

/// Closed interval [lo, hi] containing κ, given the tail bounds hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KappaInterval {
    pub lo: f64,
    pub hi: f64,
}

impl KappaInterval {
    /// F(N_ref) ± R_total(N_ref).
    pub fn from_reference(f_ref: f64, r_total: f64) -> Self {
        Self {
            lo: f_ref - r_total,
            hi: f_ref + r_total,
        }
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    pub fn half_width(&self) -> f64 {
        0.5 * (self.hi - self.lo)
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }
}

/// What to certify: sample indices, the reference index and the Ω slack.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificationRequest {
    pub samples: Vec<u64>,
    pub n_ref: u64,
    pub d_omega: f64,
}

impl Default for CertificationRequest {
    fn default() -> Self {
        Self {
            samples: vec![10_000, 20_000, 50_000, 100_000, 200_000, 1_000_000],
            n_ref: 200_000,
            d_omega: DEFAULT_OMEGA_SLACK,
        }
    }
}

impl CertificationRequest {
    /// Largest index the pass has to reach.
    pub fn max_n(&self) -> u64 {
        self.samples.iter().copied().fold(self.n_ref, u64::max)
    }

    /// Reject requests that cannot be certified, before any sieve work.
    pub fn validate(&self) -> Result<()> {
        check_slack(self.d_omega)?;
        if self.n_ref < MIN_CERTIFIED_N {
            return Err(TriadError::ReferenceTooSmall(self.n_ref));
        }
        if let Some(&bad) = self.samples.iter().find(|&&n| n == 0) {
            return Err(TriadError::InvalidSample(bad));
        }
        Ok(())
    }
}

/// One sampled index with its bounds and compatibility verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleCheck {
    pub record: PrefixRecord,
    pub bounds: TailBounds,
    /// |F(n) − κ_mid|.
    pub deviation: f64,
    /// deviation ≤ R_total(n) + half-width of the κ interval.
    pub compatible: bool,
    /// n·(F(n) − κ_mid)/ln n, which tends to 1/ln 2; `None` for n = 1.
    pub scaled_remainder: Option<f64>,
}

/// Outcome of one certification pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationReport {
    pub n_ref: u64,
    pub d_omega: f64,
    pub reference: PrefixRecord,
    pub reference_bounds: TailBounds,
    pub interval: KappaInterval,
    /// One entry per distinct sample, in increasing n.
    pub samples: Vec<SampleCheck>,
}

impl CertificationReport {
    pub fn all_compatible(&self) -> bool {
        self.samples.iter().all(|s| s.compatible)
    }

    pub fn sample(&self, n: u64) -> Option<&SampleCheck> {
        self.samples.iter().find(|s| s.record.n == n)
    }
}

/// Build tables sized to the request and certify.
pub fn certify(request: &CertificationRequest) -> Result<CertificationReport> {
    request.validate()?;
    let max_n = request.max_n();
    let max_n = i64::try_from(max_n).map_err(|_| TriadError::RangeTooLarge(max_n))?;
    log::info!("building phi, pi up to N={}", max_n);
    let tables = SieveTables::build(max_n)?;
    certify_with_tables(&tables, request)
}

/// Certify over tables that already cover every requested index.
pub fn certify_with_tables(
    tables: &SieveTables,
    request: &CertificationRequest,
) -> Result<CertificationReport> {
    certify_observed(tables, request, |_| {})
}

/// Like [`certify_with_tables`], calling `observe` on every record the pass
/// visits, in increasing n.
pub fn certify_observed<F>(
    tables: &SieveTables,
    request: &CertificationRequest,
    mut observe: F,
) -> Result<CertificationReport>
where
    F: FnMut(&PrefixRecord),
{
    request.validate()?;
    let max_n = request.max_n();
    tables.check_index(max_n)?;

    let wanted: BTreeSet<u64> = request
        .samples
        .iter()
        .copied()
        .chain(std::iter::once(request.n_ref))
        .collect();

    let start = Instant::now();
    let captured = capture(tables, max_n, &wanted, &mut observe)?;
    log::debug!(
        "captured {} prefix records up to n={} in {:.3}s",
        captured.len(),
        max_n,
        start.elapsed().as_secs_f64()
    );

    let reference = captured[&request.n_ref];
    let reference_bounds = TailBounds::at(request.n_ref, request.d_omega)?;
    let interval = KappaInterval::from_reference(reference.f, reference_bounds.r_total);
    let mid = interval.midpoint();

    let samples = request
        .samples
        .iter()
        .copied()
        .collect::<BTreeSet<u64>>()
        .into_iter()
        .map(|n| {
            let record = captured[&n];
            let bounds = TailBounds::at(n, request.d_omega)?;
            let deviation = (record.f - mid).abs();
            let compatible = deviation <= bounds.r_total + interval.half_width();
            if !compatible {
                log::warn!(
                    "F({}) = {:.12} deviates from kappa_mid by {:.3e}, beyond R_total(n) + half-width = {:.3e}",
                    n,
                    record.f,
                    deviation,
                    bounds.r_total + interval.half_width()
                );
            }
            let scaled_remainder = (n > 1).then(|| n as f64 * (record.f - mid) / (n as f64).ln());
            Ok(SampleCheck {
                record,
                bounds,
                deviation,
                compatible,
                scaled_remainder,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CertificationReport {
        n_ref: request.n_ref,
        d_omega: request.d_omega,
        reference,
        reference_bounds,
        interval,
        samples,
    })
}

/// Stream once and keep the records at the wanted indices, stopping as soon
/// as the last one is seen.
fn capture<F: FnMut(&PrefixRecord)>(
    tables: &SieveTables,
    max_n: u64,
    wanted: &BTreeSet<u64>,
    observe: &mut F,
) -> Result<BTreeMap<u64, PrefixRecord>> {
    let mut captured = BTreeMap::new();
    for record in PrefixStream::new(tables, max_n)? {
        let record = record?;
        observe(&record);
        if wanted.contains(&record.n) {
            captured.insert(record.n, record);
            if captured.len() == wanted.len() {
                break;
            }
        }
    }
    Ok(captured)
}
