//! Fixed-rate logic ticks from variable frame times
//!
//! Frame time is accumulated and spent in whole ticks. After a long stall at
//! most `max_ticks_per_frame` ticks run; the rest of the backlog is dropped
//! instead of replayed, so the display never fast-forwards.

use std::time::Duration;
use tracing::debug;

/// Outcome of one [`FixedStep::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks: u32,
    /// Time thrown away because the tick cap was hit
    pub dropped: Duration,
}

/// Accumulator turning frame durations into fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    tick: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
}

impl FixedStep {
    /// `tick_rate` in Hz; rates with no usable tick length fall back to 60
    pub fn new(tick_rate: f32, max_ticks_per_frame: u32) -> Self {
        let tick = Duration::try_from_secs_f32(1.0 / tick_rate)
            .ok()
            .filter(|tick| !tick.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f32(1.0 / 60.0));

        Self {
            tick,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Duration of one tick
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Tick duration in seconds, the `delta` passed to the engine
    pub fn delta(&self) -> f32 {
        self.tick.as_secs_f32()
    }

    /// Time carried over to the next frame
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Add `frame` to the accumulator and plan the ticks to run now
    pub fn advance(&mut self, frame: Duration) -> StepPlan {
        self.accumulator += frame;

        let mut ticks = 0u32;
        while self.accumulator >= self.tick && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.tick;
            ticks += 1;
        }

        let mut dropped = Duration::ZERO;
        if self.accumulator >= self.tick {
            dropped = self.accumulator;
            self.accumulator = Duration::ZERO;
            debug!("dropped {:?} of tick backlog", dropped);
        }

        StepPlan { ticks, dropped }
    }

    /// Change rate and cap, keeping the pending remainder when it still fits
    pub fn reconfigure(&mut self, tick_rate: f32, max_ticks_per_frame: u32) {
        let accumulator = self.accumulator;
        *self = Self::new(tick_rate, max_ticks_per_frame);
        if accumulator < self.tick {
            self.accumulator = accumulator;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_ms(ms: u64) -> FixedStep {
        FixedStep {
            tick: Duration::from_millis(ms),
            max_ticks_per_frame: 5,
            accumulator: Duration::ZERO,
        }
    }

    #[test]
    fn test_runs_whole_ticks() {
        let mut step = step_ms(16);
        let plan = step.advance(Duration::from_millis(48));
        assert_eq!(plan.ticks, 3);
        assert_eq!(plan.dropped, Duration::ZERO);
        assert_eq!(step.pending(), Duration::ZERO);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut step = step_ms(16);
        assert_eq!(step.advance(Duration::from_millis(10)).ticks, 0);
        assert_eq!(step.pending(), Duration::from_millis(10));
        assert_eq!(step.advance(Duration::from_millis(10)).ticks, 1);
        assert_eq!(step.pending(), Duration::from_millis(4));
    }

    #[test]
    fn test_backlog_dropped_at_cap() {
        let mut step = step_ms(16);
        let plan = step.advance(Duration::from_millis(120));
        assert_eq!(plan.ticks, 5);
        assert_eq!(plan.dropped, Duration::from_millis(40));
        assert_eq!(step.pending(), Duration::ZERO);
    }

    #[test]
    fn test_default_rate_fallback() {
        let step = FixedStep::new(0.0, 0);
        assert!((step.delta() - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(step.max_ticks_per_frame, 1);

        // 1 / rate overflows, or rounds to a zero-length tick
        for rate in [1e-40, -60.0, f32::NAN, f32::INFINITY, 1e30] {
            let step = FixedStep::new(rate, 5);
            assert!((step.delta() - 1.0 / 60.0).abs() < 1e-6, "rate {}", rate);
        }
    }

    #[test]
    fn test_reconfigure_keeps_small_remainder() {
        let mut step = FixedStep::new(60.0, 5);
        step.advance(Duration::from_millis(5));
        step.reconfigure(120.0, 5);
        assert_eq!(step.pending(), Duration::from_millis(5));
        assert!((step.delta() - 1.0 / 120.0).abs() < 1e-6);
    }
}
