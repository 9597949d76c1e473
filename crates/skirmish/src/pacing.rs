//! # Tick Pacing
//!
//! Fixed-timestep accumulator for the simulation loop. The simulation
//! advances in fixed `1 / rate` steps regardless of how irregularly the
//! host process gets scheduled; late ticks are counted, not smeared.

use std::time::{Duration, Instant};

/// Tick timing statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    /// Longest tick observed, in microseconds.
    pub max_tick_us: u64,
    /// Ticks that ran past their budget.
    pub late_ticks: u64,
    /// Total ticks measured.
    pub total_ticks: u64,
}

/// Fixed-timestep tick loop controller.
pub struct TickLoop {
    /// Target tick duration.
    tick_duration: Duration,
    /// Time of the last accumulator refill.
    last_tick: Instant,
    /// Unspent time since the last tick.
    accumulator: Duration,
    /// Total ticks executed.
    tick_count: u64,
    /// Timing statistics.
    stats: TickStats,
}

impl TickLoop {
    /// Creates a tick loop at the given rate in Hz.
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate` is zero.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        assert!(tick_rate > 0, "Tick rate must be greater than zero");

        Self {
            tick_duration: Duration::from_micros(1_000_000 / u64::from(tick_rate)),
            last_tick: Instant::now(),
            accumulator: Duration::ZERO,
            tick_count: 0,
            stats: TickStats::default(),
        }
    }

    /// The fixed timestep in seconds, as handed to the integrator.
    #[must_use]
    pub fn dt(&self) -> f32 {
        self.tick_duration.as_secs_f32()
    }

    /// Total ticks executed so far.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Timing statistics so far.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> TickStats {
        self.stats
    }

    /// Returns true when enough real time has accumulated for a tick.
    ///
    /// Call in a loop until it returns false, ticking each time.
    #[must_use]
    pub fn should_tick(&mut self) -> bool {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_tick);
        self.last_tick = now;

        self.accumulator >= self.tick_duration
    }

    /// Marks the start of a tick, spending one step of accumulated time.
    ///
    /// Returns the start time; pass it to [`TickLoop::end_tick`].
    #[must_use]
    pub fn begin_tick(&mut self) -> Instant {
        self.accumulator = self.accumulator.saturating_sub(self.tick_duration);
        self.tick_count += 1;
        Instant::now()
    }

    /// Marks the end of a tick and records its duration.
    pub fn end_tick(&mut self, start: Instant) {
        let elapsed = start.elapsed();
        let micros = elapsed.as_micros() as u64;

        self.stats.total_ticks += 1;
        self.stats.max_tick_us = self.stats.max_tick_us.max(micros);
        if elapsed > self.tick_duration {
            self.stats.late_ticks += 1;
        }
    }
}
