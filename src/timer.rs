/// Outcome of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No active countdown, or the countdown is paused.
    Idle,
    /// Countdown running; carries the seconds remaining.
    Running(u32),
    /// The countdown just hit zero. Emitted exactly once per start.
    Expired,
}

/// Single countdown clock at one-tick-per-second granularity.
///
/// A session owns exactly one of these; starting a new round restarts the
/// countdown, which implicitly cancels the previous one.
#[derive(Debug, Default)]
pub struct Timer {
    remaining: u32,
    active: bool,
    paused: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh countdown, replacing any countdown in flight.
    pub fn start(&mut self, secs: u32) {
        self.remaining = secs;
        self.active = secs > 0;
        self.paused = false;
    }

    /// Stop ticking permanently (until the next `start`).
    pub fn cancel(&mut self) {
        self.active = false;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        if self.active {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance by one second. Paused or cancelled timers ignore the tick.
    pub fn tick(&mut self) -> Tick {
        if !self.active || self.paused {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }
}
