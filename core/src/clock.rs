use core::time::Duration;
use web_time::Instant;

/// Round timer. The host drives it by calling [`Clock::poll`] from its periodic signal; a clock
/// only reports ticks while running.
pub trait Clock {
    /// No-op if already running.
    fn start(&mut self);

    /// No-op if already stopped.
    fn stop(&mut self);

    /// Stops the clock and zeroes the elapsed time.
    fn reset(&mut self);

    fn is_running(&self) -> bool;

    fn elapsed_secs(&self) -> u32;

    /// Returns the new elapsed seconds when a tick is due, `None` otherwise.
    fn poll(&mut self) -> Option<u32>;
}

/// Clock that advances exactly one second per poll while running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    seconds: u32,
    running: bool,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for ManualClock {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn reset(&mut self) {
        self.running = false;
        self.seconds = 0;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn elapsed_secs(&self) -> u32 {
        self.seconds
    }

    fn poll(&mut self) -> Option<u32> {
        if !self.running {
            return None;
        }
        self.seconds = self.seconds.saturating_add(1);
        Some(self.seconds)
    }
}

/// Wall-clock timer. Polling reports a tick whenever the whole-second count changed since the
/// last report, so the host may poll more often than once per second.
#[derive(Copy, Clone, Debug, Default)]
pub struct InstantClock {
    accumulated: Duration,
    started_at: Option<Instant>,
    reported: u32,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |started_at| started_at.elapsed())
    }
}

impl Clock for InstantClock {
    fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    fn elapsed_secs(&self) -> u32 {
        self.elapsed().as_secs().try_into().unwrap_or(u32::MAX)
    }

    fn poll(&mut self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        let secs = self.elapsed_secs();
        if secs == self.reported {
            return None;
        }
        self.reported = secs;
        Some(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_ticks_only_while_running() {
        let mut clock = ManualClock::new();

        assert_eq!(clock.poll(), None);
        clock.start();
        assert_eq!(clock.poll(), Some(1));
        assert_eq!(clock.poll(), Some(2));
        clock.stop();
        assert_eq!(clock.poll(), None);
        assert_eq!(clock.elapsed_secs(), 2);
    }

    #[test]
    fn manual_clock_start_and_stop_are_idempotent() {
        let mut clock = ManualClock::new();

        clock.start();
        clock.start();
        assert_eq!(clock.poll(), Some(1));
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        clock.start();
        assert_eq!(clock.poll(), Some(2));
    }

    #[test]
    fn manual_clock_reset_stops_and_zeroes() {
        let mut clock = ManualClock::new();
        clock.start();
        clock.poll();

        clock.reset();

        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_secs(), 0);
        assert_eq!(clock.poll(), None);
    }

    #[test]
    fn instant_clock_is_silent_when_stopped() {
        let mut clock = InstantClock::new();

        assert_eq!(clock.poll(), None);
        clock.start();
        assert!(clock.is_running());
        clock.stop();
        assert_eq!(clock.poll(), None);
        assert!(!clock.is_running());
    }

    #[test]
    fn instant_clock_reset_zeroes() {
        let mut clock = InstantClock::new();
        clock.start();
        clock.reset();

        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_secs(), 0);
    }

    #[test]
    fn instant_clock_does_not_tick_within_the_first_second() {
        let mut clock = InstantClock::new();
        clock.start();

        assert_eq!(clock.poll(), None);
        assert_eq!(clock.elapsed_secs(), 0);
    }
}
