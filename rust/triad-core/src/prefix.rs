//! Streaming prefix sums of Ξ, Ω and E, plus single-shot and batch
//! evaluators used to cross-check the stream.

use serde::Serialize;

use crate::accumulator::{compensated_prefix_sums, CompensatedSum};
use crate::error::Result;
use crate::sieve::SieveTables;
use crate::terms::{e_term, omega_term, term_table, xi_term, Series};

/// Prefix values of the three series at one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrefixRecord {
    pub n: u64,
    pub xi: f64,
    pub omega: f64,
    pub e: f64,
    /// Ξ(n) + Ω(n) − E(n), recomputed from the three sums at every step.
    pub f: f64,
}

impl PrefixRecord {
    fn new(n: u64, xi: f64, omega: f64, e: f64) -> Self {
        Self {
            n,
            xi,
            omega,
            e,
            f: xi + omega - e,
        }
    }
}

/// Single forward pass over n = 1..=N yielding one [`PrefixRecord`] per n.
///
/// Holds only the three accumulators beyond the borrowed tables, so N can
/// reach tens of millions without materialising the records. Ξ is fed from
/// n = 3, Ω and E from n = 2. A corrupt table is reported once as an error,
/// after which the stream is exhausted.
#[derive(Debug, Clone)]
pub struct PrefixStream<'a> {
    tables: &'a SieveTables,
    max_n: u64,
    next_n: u64,
    xi: CompensatedSum,
    omega: CompensatedSum,
    e: CompensatedSum,
    halted: bool,
}

impl<'a> PrefixStream<'a> {
    /// Stream n = 1..=`max_n` over `tables`, which must cover `max_n`.
    pub fn new(tables: &'a SieveTables, max_n: u64) -> Result<Self> {
        if max_n > 0 {
            tables.check_index(max_n)?;
        }
        Ok(Self {
            tables,
            max_n,
            next_n: 1,
            xi: CompensatedSum::new(),
            omega: CompensatedSum::new(),
            e: CompensatedSum::new(),
            halted: false,
        })
    }

    /// Stream over the full range of `tables`.
    pub fn over(tables: &'a SieveTables) -> Self {
        Self {
            tables,
            max_n: tables.max_n(),
            next_n: 1,
            xi: CompensatedSum::new(),
            omega: CompensatedSum::new(),
            e: CompensatedSum::new(),
            halted: false,
        }
    }

    pub fn max_n(&self) -> u64 {
        self.max_n
    }

    fn advance(&mut self, n: u64) -> Result<PrefixRecord> {
        if n >= Series::Xi.start_index() {
            self.xi.add(xi_term(n));
        }
        if n >= Series::E.start_index() {
            self.e.add(e_term(n));
        }
        if n >= Series::Omega.start_index() {
            let idx = n as usize;
            self.omega
                .add(omega_term(n, self.tables.phi()[idx], self.tables.pi()[idx])?);
        }
        Ok(PrefixRecord::new(
            n,
            self.xi.value(),
            self.omega.value(),
            self.e.value(),
        ))
    }
}

impl Iterator for PrefixStream<'_> {
    type Item = Result<PrefixRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted || self.next_n > self.max_n {
            return None;
        }
        let n = self.next_n;
        self.next_n += 1;
        let record = self.advance(n);
        if let Err(err) = &record {
            log::error!("halting prefix stream at n={}: {}", n, err);
            self.halted = true;
        }
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.halted {
            return (0, Some(0));
        }
        let remaining = (self.max_n + 1).saturating_sub(self.next_n) as usize;
        (0, Some(remaining))
    }
}

impl std::iter::FusedIterator for PrefixStream<'_> {}

fn scalar_sum(series: Series, n: u64, tables: &SieveTables) -> Result<f64> {
    let mut acc = CompensatedSum::new();
    for i in series.start_index()..=n {
        acc.add(series.term(i, tables)?);
    }
    Ok(acc.value())
}

/// Ξ(n) evaluated on its own; 0.0 for n < 3.
pub fn xi(n: u64) -> f64 {
    let mut acc = CompensatedSum::new();
    acc.extend((Series::Xi.start_index()..=n).map(xi_term));
    acc.value()
}

/// E(n) evaluated on its own; 0.0 for n < 2.
pub fn e(n: u64) -> f64 {
    let mut acc = CompensatedSum::new();
    acc.extend((Series::E.start_index()..=n).map(e_term));
    acc.value()
}

/// Ω(n) evaluated on its own; 0.0 for n < 2.
pub fn omega(n: u64, tables: &SieveTables) -> Result<f64> {
    if n >= Series::Omega.start_index() {
        tables.check_index(n)?;
    }
    scalar_sum(Series::Omega, n, tables)
}

/// F(n) = Ξ(n) + Ω(n) − E(n) from the single-shot evaluators.
pub fn balance(n: u64, tables: &SieveTables) -> Result<f64> {
    Ok(xi(n) + omega(n, tables)? - e(n))
}

/// Materialised prefix records for n = 1..=`max_n`, built from dense term
/// tables and compensated prefix sums. Uses O(N) memory per series.
pub fn batch_prefix(tables: &SieveTables, max_n: u64) -> Result<Vec<PrefixRecord>> {
    tables.check_index(max_n)?;
    let xi = compensated_prefix_sums(&term_table(Series::Xi, max_n, tables)?);
    let omega = compensated_prefix_sums(&term_table(Series::Omega, max_n, tables)?);
    let e = compensated_prefix_sums(&term_table(Series::E, max_n, tables)?);
    Ok((1..=max_n as usize)
        .map(|n| PrefixRecord::new(n as u64, xi[n], omega[n], e[n]))
        .collect())
}
