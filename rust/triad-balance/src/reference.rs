//! Literature values printed next to computed prefixes for comparison.

/// Ξ∞ = Σ_{i≥3} 2/(i²(i−1)) = 7/2 − π²/3.
pub const XI_INF: f64 = 3.5 - std::f64::consts::PI * std::f64::consts::PI / 3.0;

/// E∞ = Σ_{i≥2} log₂(i)/i².
pub const E_INF: f64 = 1.352_596_217_105_538_1;

/// Published estimate of κ = lim F(n), taken from F(200000).
pub const KAPPA_REF: f64 = -0.526_736_674_206_3;

/// Draft values of F(n) at the standard sample points.
pub const REFERENCE_F: &[(u64, f64)] = &[
    (10_000, -0.525_506_939_0),
    (20_000, -0.526_116_397_4),
    (50_000, -0.526_514_858_1),
    (100_000, -0.526_659_463_2),
    (200_000, -0.526_736_674_2),
    (1_000_000, -0.526_804_029_9),
];

/// Draft F(n), if one was published for `n`.
pub fn reference_f(n: u64) -> Option<f64> {
    REFERENCE_F
        .iter()
        .find(|&&(m, _)| m == n)
        .map(|&(_, f)| f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xi_inf_value() {
        assert!((XI_INF - 0.210_131_866_3).abs() < 1e-10);
    }

    #[test]
    fn test_reference_lookup() {
        assert_eq!(reference_f(200_000), Some(-0.526_736_674_2));
        assert_eq!(reference_f(12_345), None);
    }
}
