//! Link health monitor

/// Outcome of one connectivity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Session is up
    Alive,
    /// Session is down; recovery should be attempted
    Down {
        /// Checks in a row that found the link down, including this one
        consecutive: u8,
    },
}

impl LinkStatus {
    pub fn is_alive(&self) -> bool {
        matches!(self, LinkStatus::Alive)
    }
}

/// Periodic connectivity check scheduler
///
/// The first check is due one full interval after boot.
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    interval_ms: u32,
    last_check_ms: u32,
    consecutive_failures: u8,
}

impl LinkMonitor {
    pub fn new(interval_ms: u32, boot_ms: u32) -> Self {
        Self {
            interval_ms,
            last_check_ms: boot_ms,
            consecutive_failures: 0,
        }
    }

    /// Check if a connectivity check should run at `now_ms`
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_check_ms) >= self.interval_ms
    }

    /// Record a check result and start the next interval
    pub fn record(&mut self, now_ms: u32, alive: bool) -> LinkStatus {
        self.last_check_ms = now_ms;
        if alive {
            self.consecutive_failures = 0;
            LinkStatus::Alive
        } else {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            LinkStatus::Down {
                consecutive: self.consecutive_failures,
            }
        }
    }

    /// Restart the interval without a check
    pub fn restart(&mut self, now_ms: u32) {
        self.last_check_ms = now_ms;
    }

    /// Checks in a row that found the link down
    pub fn consecutive_failures(&self) -> u8 {
        self.consecutive_failures
    }
}
