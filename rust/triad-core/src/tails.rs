//! Closed-form upper bounds on the unsummed tails of Ξ, E and Ω.
//!
//! R_Ξ(n) = 2/n²                          (n ≥ 2)
//! R_E(n) = (ln n + 1)/(n ln 2)           (n ≥ 2)
//! R_Ω(n) = (e^γ ln ln n + D)/n           (n ≥ 3)
//!
//! Below a formula's domain minimum the bound is reported as +∞ rather than
//! evaluated at a clamped index: no finite bound has been established there.

use serde::Serialize;

use crate::error::{Result, TriadError};

/// Euler–Mascheroni constant γ.
pub const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Default additive slack D in the Ω bound.
pub const DEFAULT_OMEGA_SLACK: f64 = 10.0;

/// Smallest n at which every component bound is finite.
pub const MIN_CERTIFIED_N: u64 = 3;

/// Tail bounds of the three series at one index, and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailBounds {
    pub n: u64,
    pub r_xi: f64,
    pub r_e: f64,
    pub r_omega: f64,
    pub r_total: f64,
}

impl TailBounds {
    /// Evaluate all bounds at `n` with Ω slack `d_omega`.
    pub fn at(n: u64, d_omega: f64) -> Result<Self> {
        check_slack(d_omega)?;
        let r_xi = xi_tail_bound(n);
        let r_e = e_tail_bound(n);
        let r_omega = omega_tail_bound(n, d_omega);
        Ok(Self {
            n,
            r_xi,
            r_e,
            r_omega,
            r_total: r_xi + r_e + r_omega,
        })
    }

    pub fn is_finite(&self) -> bool {
        self.r_total.is_finite()
    }
}

/// Reject a slack that would make the Ω bound meaningless.
pub fn check_slack(d_omega: f64) -> Result<()> {
    if !d_omega.is_finite() || d_omega < 0.0 {
        return Err(TriadError::InvalidTailConstant(d_omega));
    }
    Ok(())
}

/// Σ_{i>n} 2/(i²(i−1)) ≤ 2/n².
pub fn xi_tail_bound(n: u64) -> f64 {
    if n < 2 {
        return f64::INFINITY;
    }
    let x = n as f64;
    2.0 / (x * x)
}

/// Σ_{i>n} log₂(i)/i² ≤ (ln n + 1)/(n ln 2).
pub fn e_tail_bound(n: u64) -> f64 {
    if n < 2 {
        return f64::INFINITY;
    }
    let x = n as f64;
    (x.ln() + 1.0) / (x * std::f64::consts::LN_2)
}

/// Σ_{i>n} 1/(i(φ(i)+π(i))) ≤ (e^γ ln ln n + D)/n.
pub fn omega_tail_bound(n: u64, d_omega: f64) -> f64 {
    if n < MIN_CERTIFIED_N {
        return f64::INFINITY;
    }
    let x = n as f64;
    (EULER_GAMMA.exp() * x.ln().ln() + d_omega) / x
}
