//! Scaling run for the sieve and the streaming pass.
//!
//! Measures wall time of each stage at increasing N to confirm the
//! near-linear cost of both and to size the memory of the tables.

use std::time::Instant;

use triad_core::{PrefixStream, SieveTables, TailBounds, DEFAULT_OMEGA_SLACK};

fn main() {
    println!("================================================================");
    println!("  SCALING: sieve + streaming prefix pass");
    println!("================================================================\n");

    let sizes: Vec<u64> = vec![10_000, 100_000, 1_000_000, 10_000_000];

    println!(
        "  {:>10} {:>10} {:>10} {:>10} {:>18} {:>11}",
        "N", "sieve_ms", "stream_ms", "table_MB", "F(N)", "R_tot(N)"
    );
    println!("  {}", "-".repeat(76));

    for &n in &sizes {
        let start = Instant::now();
        let tables = match SieveTables::build(n as i64) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("  {:>10} sieve failed: {}", n, e);
                continue;
            }
        };
        let sieve_ms = start.elapsed().as_secs_f64() * 1e3;

        let start = Instant::now();
        let last = match PrefixStream::over(&tables).last() {
            Some(Ok(r)) => r,
            Some(Err(e)) => {
                eprintln!("  {:>10} stream failed: {}", n, e);
                continue;
            }
            None => continue,
        };
        let stream_ms = start.elapsed().as_secs_f64() * 1e3;

        let table_mb = 2.0 * (n as f64 + 1.0) * std::mem::size_of::<u32>() as f64 / 1e6;
        let r_total = TailBounds::at(n, DEFAULT_OMEGA_SLACK)
            .map(|b| b.r_total)
            .unwrap_or(f64::NAN);

        println!(
            "  {:>10} {:>10.1} {:>10.1} {:>10.1} {:>18.15} {:>11.3e}",
            n, sieve_ms, stream_ms, table_mb, last.f, r_total
        );
    }
    println!();
}
