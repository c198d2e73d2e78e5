//! Wall-clock instrumentation (§2 "Timer"). Observational only; never gates
//! execution (§5 "Cancellation and timeouts").

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct Timer {
    total: Duration,
    running_since: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.running_since.take() {
            self.total += start.elapsed();
        }
    }

    pub fn reset(&mut self) {
        self.total = Duration::ZERO;
        self.running_since = None;
    }

    pub fn elapsed(&self) -> Duration {
        match self.running_since {
            Some(start) => self.total + start.elapsed(),
            None => self.total,
        }
    }
}
