//! Fixed-interval tick driver
//!
//! Host frames arrive at whatever rate the platform gives us; the driver
//! accumulates elapsed time and reports how many fixed ticks are due.

/// Maximum ticks run for one host frame, keeps a long stall from snowballing
pub const MAX_CATCH_UP_TICKS: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickDriver {
    interval_ms: u32,
    accumulator_ms: u32,
    ticks: u64,
}

impl TickDriver {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulator_ms: 0,
            ticks: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Ticks fired since the driver was created
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Add `elapsed_ms` of wall time and return how many ticks are due
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);

        let mut due = 0;
        while self.accumulator_ms >= self.interval_ms && due < MAX_CATCH_UP_TICKS {
            self.accumulator_ms -= self.interval_ms;
            due += 1;
        }

        if self.accumulator_ms >= self.interval_ms {
            log::debug!("Tick driver behind, dropping {}ms", self.accumulator_ms);
            self.accumulator_ms %= self.interval_ms;
        }

        self.ticks += u64::from(due);
        due
    }
}
