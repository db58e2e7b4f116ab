use crate::domain::{TaskStore, TickOutcome};
use std::time::{Duration, Instant};

/// Countdown period: the running task loses one second per tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Poll timeout when nothing is counting down. Input events still wake
/// the loop immediately, so this only bounds idle wake-ups.
pub const IDLE_POLL: Duration = Duration::from_secs(60);

/// Wall-clock scheduler for the countdown. It re-derives the running task
/// from the store on every poll, so pause/complete changes between polls
/// take effect on the next tick with no extra coordination.
pub struct Ticker {
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self { next_due: None }
    }

    /// How long the event loop may sleep before polling again
    pub fn timeout(&self, store: &TaskStore) -> Duration {
        if store.running_task().is_none() {
            return IDLE_POLL;
        }
        match self.next_due {
            Some(due) => due.saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        }
    }

    /// Convert elapsed wall-clock time into tick mutations, one second at
    /// a time, so a stalled event loop catches up rather than losing time.
    /// Disarms whenever no task qualifies and re-arms on the first poll
    /// after one starts.
    pub fn poll(&mut self, store: &mut TaskStore) -> Vec<TickOutcome> {
        if store.running_task().is_none() {
            self.next_due = None;
            return Vec::new();
        }

        let now = Instant::now();
        let mut due = match self.next_due {
            Some(due) => due,
            None => {
                self.next_due = Some(now + TICK_INTERVAL);
                return Vec::new();
            }
        };

        let mut outcomes = Vec::new();
        while due <= now {
            due += TICK_INTERVAL;
            match store.tick_running() {
                // The running task vanished mid-catch-up (it finished);
                // stop instead of burning the remaining elapsed seconds
                TickOutcome::Idle => break,
                outcome => outcomes.push(outcome),
            }
        }
        self.next_due = Some(due);
        outcomes
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}
