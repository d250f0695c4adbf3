//! # Triad Balance
//!
//! Prefix sums of three slowly converging series over a dense range [1..N],
//!
//!   Ξ(n) = Σ_{i=3..n} 2/(i²(i−1)),
//!   Ω(n) = Σ_{i=2..n} 1/(i(φ(i)+π(i))),
//!   E(n) = Σ_{i=2..n} log₂(i)/i²,
//!
//! combined into the balance F(n) = Ξ(n) + Ω(n) − E(n), together with
//! closed-form tail bounds that turn one finite F(N_ref) into a certified
//! interval for κ = lim F(n).
//!
//! Pipeline: [`sieve`] builds φ and π, [`prefix`] streams the compensated
//! sums, [`tails`] bounds what is left, and [`certify`] combines the two.

pub mod accumulator;
pub mod certify;
pub mod error;
pub mod prefix;
pub mod sieve;
pub mod tails;
pub mod terms;

pub use accumulator::{compensated_prefix_sums, pairwise_sum, CompensatedSum};
pub use certify::{
    certify, certify_observed, certify_with_tables, CertificationReport, CertificationRequest,
    KappaInterval, SampleCheck,
};
pub use error::{Result, TriadError};
pub use prefix::{balance, batch_prefix, PrefixRecord, PrefixStream};
pub use sieve::SieveTables;
pub use tails::{TailBounds, DEFAULT_OMEGA_SLACK, EULER_GAMMA, MIN_CERTIFIED_N};
pub use terms::Series;
