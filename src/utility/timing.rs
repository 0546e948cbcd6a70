// ============================================
// TIMING UTILITY - Stage Duration Logging
// ============================================
// Usage:
//   let timer = Timer::start("name"); ... timer.stop();
//   or let the timer drop at the end of a scope.
// ============================================

use std::time::{Duration, Instant};
use tracing::info;

/// Timer for measuring execution time of one stage
pub struct Timer {
    name: String,
    start: Instant,
    stopped: bool,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            stopped: false,
        }
    }

    /// Get elapsed time without stopping the timer
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Stop the timer and log the result
    pub fn stop(mut self) -> Duration {
        let duration = self.start.elapsed();
        self.log_duration(duration);
        self.stopped = true;
        duration
    }

    fn log_duration(&self, duration: Duration) {
        let ms = duration.as_millis();
        info!(
            stage = %self.name,
            elapsed_ms = ms as u64,
            speed = Self::speed_label(ms),
            "stage finished"
        );
    }

    fn speed_label(ms: u128) -> &'static str {
        match ms {
            0..=100 => "very fast",
            101..=500 => "fast",
            501..=1000 => "acceptable",
            1001..=5000 => "slow",
            _ => "very slow",
        }
    }
}

// Auto-log on drop unless stop() already did
impl Drop for Timer {
    fn drop(&mut self) {
        if !self.stopped {
            self.log_duration(self.start.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_labels() {
        assert_eq!(Timer::speed_label(50), "very fast");
        assert_eq!(Timer::speed_label(300), "fast");
        assert_eq!(Timer::speed_label(1000), "acceptable");
        assert_eq!(Timer::speed_label(4000), "slow");
        assert_eq!(Timer::speed_label(60_000), "very slow");
    }

    #[test]
    fn test_stop_returns_elapsed() {
        let timer = Timer::start("sleep");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed_ms() >= 5);
        assert!(timer.stop() >= Duration::from_millis(5));
    }
}
