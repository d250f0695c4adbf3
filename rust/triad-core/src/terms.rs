//! Summands of the three series.
//!
//! Ξ(n) = Σ_{i=3..n} 2 / (i²(i−1))
//! E(n) = Σ_{i=2..n} log₂(i) / i²
//! Ω(n) = Σ_{i=2..n} 1 / (i(φ(i) + π(i)))

use serde::Serialize;

use crate::error::{Result, TriadError};
use crate::sieve::SieveTables;

/// One of the three series making up the balance F = Ξ + Ω − E.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Series {
    Xi,
    Omega,
    E,
}

impl Series {
    pub const ALL: [Series; 3] = [Series::Xi, Series::Omega, Series::E];

    /// First index contributing a term; smaller indices are never summed.
    pub fn start_index(self) -> u64 {
        match self {
            Series::Xi => 3,
            Series::Omega | Series::E => 2,
        }
    }

    /// The i-th term. Only defined for `i >= self.start_index()`; for Ω an
    /// index past the tables is [`TriadError::ReferenceOutOfRange`].
    pub fn term(self, i: u64, tables: &SieveTables) -> Result<f64> {
        match self {
            Series::Xi => Ok(xi_term(i)),
            Series::E => Ok(e_term(i)),
            Series::Omega => {
                tables.check_index(i)?;
                let idx = i as usize;
                omega_term(i, tables.phi()[idx], tables.pi()[idx])
            }
        }
    }
}

/// 2 / (i²(i−1)), for i ≥ 3.
pub fn xi_term(i: u64) -> f64 {
    let x = i as f64;
    2.0 / (x * x * (x - 1.0))
}

/// log₂(i) / i², for i ≥ 2.
pub fn e_term(i: u64) -> f64 {
    let x = i as f64;
    x.log2() / (x * x)
}

/// 1 / (i(φ(i) + π(i))), for i ≥ 2.
///
/// φ(i) ≥ 1 for every i ≥ 1, so a zero denominator can only come from a
/// corrupt table and is reported as [`TriadError::InvariantViolation`].
pub fn omega_term(i: u64, phi: u32, pi: u32) -> Result<f64> {
    let denom = phi as u64 + pi as u64;
    if denom == 0 {
        return Err(TriadError::InvariantViolation { index: i, phi, pi });
    }
    Ok(1.0 / (i as f64 * denom as f64))
}

/// Dense term vector for `series` over 0..=n: entry i holds the i-th term
/// for i at or above the start index and 0.0 below it.
pub fn term_table(series: Series, n: u64, tables: &SieveTables) -> Result<Vec<f64>> {
    if series == Series::Omega {
        tables.check_index(n)?;
    }
    let mut t = vec![0.0; n as usize + 1];
    for i in series.start_index()..=n {
        t[i as usize] = series.term(i, tables)?;
    }
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_values() {
        assert!((xi_term(3) - 2.0 / 18.0).abs() < 1e-16);
        assert!((e_term(2) - 0.25).abs() < 1e-16);
        assert!((e_term(8) - 3.0 / 64.0).abs() < 1e-16);
        // φ(6) = 2, π(6) = 3
        assert!((omega_term(6, 2, 3).unwrap() - 1.0 / 30.0).abs() < 1e-16);
    }

    #[test]
    fn test_terms_positive_and_decreasing() {
        let tables = SieveTables::build(1_000).unwrap();
        for i in 3..1_000u64 {
            let a = xi_term(i);
            let b = xi_term(i + 1);
            assert!(a > 0.0 && b < a, "xi_term not decreasing at {}", i);
            assert!(Series::Omega.term(i, &tables).unwrap() > 0.0);
        }
        for i in 4..1_000u64 {
            assert!(e_term(i + 1) < e_term(i), "e_term not decreasing at {}", i);
        }
    }

    #[test]
    fn test_zero_denominator_is_invariant_violation() {
        assert_eq!(
            omega_term(7, 0, 0),
            Err(TriadError::InvariantViolation { index: 7, phi: 0, pi: 0 })
        );
    }

    #[test]
    fn test_term_table_respects_start_index() {
        let tables = SieveTables::build(10).unwrap();
        let xi = term_table(Series::Xi, 10, &tables).unwrap();
        assert_eq!(xi.len(), 11);
        assert_eq!(&xi[..3], &[0.0, 0.0, 0.0]);
        assert_eq!(xi[3], xi_term(3));

        let om = term_table(Series::Omega, 10, &tables).unwrap();
        assert_eq!(&om[..2], &[0.0, 0.0]);
        assert_eq!(om[2], 1.0 / (2.0 * 2.0));
    }

    #[test]
    fn test_omega_term_past_tables_is_error() {
        let tables = SieveTables::build(10).unwrap();
        assert_eq!(
            Series::Omega.term(11, &tables),
            Err(TriadError::ReferenceOutOfRange { n_ref: 11, max_n: 10 })
        );
        assert!(Series::Omega.term(10, &tables).is_ok());
        assert_eq!(Series::E.term(11, &tables), Ok(e_term(11)));
    }

    #[test]
    fn test_term_table_omega_out_of_range() {
        let tables = SieveTables::build(10).unwrap();
        assert!(term_table(Series::Omega, 11, &tables).is_err());
        assert_eq!(term_table(Series::E, 11, &tables).unwrap().len(), 12);
    }
}
