//! Percent-granularity progress logging for long passes.

/// Logs `[progress] n=…/N (k%)` each time the pass crosses a whole percent.
#[derive(Debug, Clone)]
pub struct ProgressTicker {
    total: u64,
    next_pct: u64,
    enabled: bool,
    logged: u64,
}

impl ProgressTicker {
    pub fn new(total: u64, enabled: bool) -> Self {
        Self {
            total,
            next_pct: 1,
            enabled,
            logged: 0,
        }
    }

    /// Number of progress lines logged so far.
    pub fn logged(&self) -> u64 {
        self.logged
    }

    /// Report position `n`; returns the percent logged, if any.
    pub fn tick(&mut self, n: u64) -> Option<u64> {
        if !self.enabled || self.total == 0 || self.next_pct > 100 {
            return None;
        }
        let pct = n.saturating_mul(100) / self.total;
        if pct < self.next_pct {
            return None;
        }
        log::info!("[progress] n={}/{} ({}%)", n, self.total, pct);
        self.next_pct = pct + 1;
        self.logged += 1;
        Some(pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_once_per_percent() {
        let mut t = ProgressTicker::new(1_000, true);
        let logged: Vec<u64> = (1..=1_000).filter_map(|n| t.tick(n)).collect();
        assert_eq!(logged.len(), 100);
        assert_eq!(logged.first(), Some(&1));
        assert_eq!(logged.last(), Some(&100));
        assert_eq!(t.logged(), 100);
    }

    #[test]
    fn test_small_total_skips_percentages() {
        let mut t = ProgressTicker::new(3, true);
        let logged: Vec<u64> = (1..=3).filter_map(|n| t.tick(n)).collect();
        assert_eq!(logged, vec![33, 66, 100]);
    }

    #[test]
    fn test_disabled() {
        let mut t = ProgressTicker::new(10, false);
        assert!((1..=10).all(|n| t.tick(n).is_none()));
        assert_eq!(t.logged(), 0);
    }
}
