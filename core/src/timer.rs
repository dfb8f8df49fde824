#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
}

/// Elapsed-seconds counter advanced by an external repeating tick.
///
/// The timer itself never schedules anything: `start` and `stop` report whether
/// the caller has to create or cancel its tick source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    state: TimerState,
    elapsed_secs: u32,
}

impl Timer {
    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running)
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Returns `true` when the timer was stopped and a tick source must be started.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Returns `true` when the timer was running and its tick source must be cancelled.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = TimerState::Stopped;
        true
    }

    /// Advances by one second, ticks delivered while stopped are dropped.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        Some(self.elapsed_secs)
    }
}
