//! Totient and prime-counting tables over a dense range [0..N].
//!
//! Both tables are built once per run and never mutated afterwards. Entries
//! are stored as `u32`, which halves the memory footprint compared to `u64`
//! and is the dominant cost of the whole pipeline at large N.

use std::time::Instant;

use crate::error::{Result, TriadError};

/// Largest N for which both tables can be indexed and stored as `u32`.
pub const MAX_RANGE: u64 = (u32::MAX - 1) as u64;

/// Immutable φ and π tables, both of length N + 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SieveTables {
    phi: Vec<u32>,
    pi: Vec<u32>,
}

impl SieveTables {
    /// Build φ(0..=n) and π(0..=n).
    ///
    /// Negative `n` is rejected rather than clamped. `n = 0` and `n = 1`
    /// produce the trivial tables `[0]` / `[0, 1]` and `[0]` / `[0, 0]`.
    pub fn build(n: i64) -> Result<Self> {
        let n = validate_range(n)?;
        let start = Instant::now();
        let phi = totients(n);
        let pi = prime_counts(n);
        log::debug!(
            "built phi/pi tables up to N={} in {:.3}s",
            n,
            start.elapsed().as_secs_f64()
        );
        Ok(Self { phi, pi })
    }

    /// Wrap externally produced tables.
    ///
    /// Only the lengths are checked; entries are trusted, so a corrupt table
    /// surfaces later as [`TriadError::InvariantViolation`] from the stream.
    pub fn from_parts(phi: Vec<u32>, pi: Vec<u32>) -> Result<Self> {
        if phi.len() != pi.len() {
            return Err(TriadError::TableLengthMismatch {
                phi: phi.len(),
                pi: pi.len(),
            });
        }
        Ok(Self { phi, pi })
    }

    pub fn phi(&self) -> &[u32] {
        &self.phi
    }

    pub fn pi(&self) -> &[u32] {
        &self.pi
    }

    /// Largest index covered by the tables (0 for empty tables).
    pub fn max_n(&self) -> u64 {
        self.phi.len().saturating_sub(1) as u64
    }

    /// Fail unless index `n` lies inside the tables.
    pub fn check_index(&self, n: u64) -> Result<()> {
        if self.phi.is_empty() || n > self.max_n() {
            return Err(TriadError::ReferenceOutOfRange {
                n_ref: n,
                max_n: self.max_n(),
            });
        }
        Ok(())
    }
}

/// Validate a requested range bound and convert it to a table size.
pub fn validate_range(n: i64) -> Result<usize> {
    if n < 0 {
        return Err(TriadError::NegativeRange(n));
    }
    if n as u64 > MAX_RANGE {
        return Err(TriadError::RangeTooLarge(n as u64));
    }
    Ok(n as usize)
}

/// Euler totients φ(0..=n).
///
/// Starts from φ(i) = i; every i still equal to its own value when reached
/// is prime, and each multiple j of it loses φ(j) / i.
pub fn totients(n: usize) -> Vec<u32> {
    let mut phi: Vec<u32> = (0..=n as u32).collect();
    for i in 2..=n {
        if phi[i] as usize == i {
            let p = i as u32;
            let mut j = i;
            while j <= n {
                phi[j] -= phi[j] / p;
                j += i;
            }
        }
    }
    phi
}

/// Sieve of Eratosthenes: `flags[i]` is true iff i is prime, for i in 0..=n.
pub fn prime_flags(n: usize) -> Vec<bool> {
    let mut is_prime = vec![true; n + 1];
    is_prime[0] = false;
    if n >= 1 {
        is_prime[1] = false;
    }

    let mut p = 2;
    while p * p <= n {
        if is_prime[p] {
            let mut multiple = p * p;
            while multiple <= n {
                is_prime[multiple] = false;
                multiple += p;
            }
        }
        p += 1;
    }
    is_prime
}

/// Prime-counting function π(0..=n) as a running count of [`prime_flags`].
pub fn prime_counts(n: usize) -> Vec<u32> {
    let mut count = 0u32;
    prime_flags(n)
        .into_iter()
        .map(|is_p| {
            if is_p {
                count += 1;
            }
            count
        })
        .collect()
}
