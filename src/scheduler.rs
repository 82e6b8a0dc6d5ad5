//! Tick scheduling and timing utilities.
//!
//! Provides portable tick pacing without async/await or platform-specific
//! timers. The caller is responsible for sleeping between turns.

use embassy_time::{Duration, Instant};

/// Pending ticks above this are dropped instead of replayed.
///
/// After a long stall (slow client, blocked flush) the animation resumes
/// from where it was rather than fast-forwarding through the backlog.
pub const MAX_CATCH_UP_TICKS: u32 = 50;

/// Result of a scheduler poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Number of ticks due since the previous poll (zero if none)
    pub elapsed_ticks: u32,
    /// How long the caller may sleep before the next tick is due
    pub sleep_duration: Duration,
}

/// Portable tick scheduler with drift correction.
///
/// Tracks the deadline of the next tick and carries the remainder between
/// polls, so irregular polling still yields the right number of ticks.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(Duration::from_millis(10));
///
/// loop {
///     let result = scheduler.poll(Instant::now());
///     if result.elapsed_ticks > 0 {
///         engine.advance(result.elapsed_ticks);
///     }
///     sleep(result.sleep_duration);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TickScheduler {
    tick_interval: Duration,
    next_tick: Option<Instant>,
}

impl TickScheduler {
    pub const fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            next_tick: None,
        }
    }

    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Count the ticks due at `now` and move the deadline forward.
    ///
    /// The first poll only anchors the schedule.
    #[allow(clippy::cast_possible_truncation)]
    pub fn poll(&mut self, now: Instant) -> TickResult {
        let interval_us = self.tick_interval.as_micros().max(1);
        let Some(next_tick) = self.next_tick else {
            self.next_tick = Some(now + self.tick_interval);
            return TickResult {
                elapsed_ticks: 0,
                sleep_duration: self.tick_interval,
            };
        };

        if now < next_tick {
            return TickResult {
                elapsed_ticks: 0,
                sleep_duration: next_tick - now,
            };
        }

        let behind_us = (now - next_tick).as_micros();
        let due = 1 + behind_us / interval_us;
        let elapsed_ticks = if due > u64::from(MAX_CATCH_UP_TICKS) {
            log::debug!("scheduler: skipping {} ticks of backlog", due - 1);
            self.next_tick = Some(now + self.tick_interval);
            1
        } else {
            self.next_tick = Some(next_tick + Duration::from_micros(due * interval_us));
            due as u32
        };

        let sleep_duration = self
            .next_tick
            .map_or(self.tick_interval, |next| next.saturating_duration_since(now))
            .min(self.tick_interval);

        TickResult {
            elapsed_ticks,
            sleep_duration,
        }
    }
}
