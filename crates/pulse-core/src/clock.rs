//! Fixed-rate tick scheduling on top of a display-rate callback.

use crate::config::TickRate;

/// Decides which display frames run a tick.
///
/// Deadlines advance by whole intervals rather than restarting from the
/// frame that fired, so the average rate holds even when the display rate
/// is not a multiple of the tick rate. A clock more than one interval late
/// (tab in background, long stall) resynchronises to the current time
/// instead of firing a burst of catch-up ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickClock {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl TickClock {
    pub fn new(rate: TickRate) -> Self {
        Self {
            interval_ms: rate.interval_ms(),
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Whether a tick should run at `now_ms`; records it when so.
    pub fn due(&mut self, now_ms: f64) -> bool {
        if self.interval_ms <= 0.0 {
            return true;
        }
        match self.next_due_ms {
            Some(next) if now_ms < next => false,
            Some(next) => {
                let following = next + self.interval_ms;
                self.next_due_ms = Some(if following <= now_ms {
                    now_ms + self.interval_ms
                } else {
                    following
                });
                true
            }
            None => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.next_due_ms = None;
    }
}
