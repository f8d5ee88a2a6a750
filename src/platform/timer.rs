//! One-shot timer collaborator
//!
//! The game loop re-arms a single one-shot timer at the end of every tick
//! instead of running a recurring one, so at most one callback is ever in
//! flight. `Timer` enforces that: arming while armed is an invariant
//! violation.

/// What to run when the timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Run one game-loop tick
    Tick,
    /// Set up the next round after a lost life
    SetupRound,
}

/// Virtual-clock one-shot timer (milliseconds)
#[derive(Debug, Clone, Default)]
pub struct Timer {
    now_ms: u64,
    armed: Option<(u64, TimerAction)>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Pending action and its due time
    pub fn pending(&self) -> Option<(u64, TimerAction)> {
        self.armed
    }

    /// Arm the timer `delay_ms` from now. Returns false (and leaves the
    /// existing callback in place) if a callback is already in flight.
    pub fn schedule(&mut self, delay_ms: u64, action: TimerAction) -> bool {
        if let Some((due, pending)) = self.armed {
            debug_assert!(
                false,
                "timer already armed with {:?} due at {}",
                pending, due
            );
            log::error!(
                "refusing to arm {:?}: {:?} already due at {}",
                action,
                pending,
                due
            );
            return false;
        }
        self.armed = Some((self.now_ms + delay_ms, action));
        true
    }

    /// Fire the armed callback if it is due by `now_ms`. The clock moves to
    /// the due time so a re-arm from inside the callback keeps a fixed cadence.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<TimerAction> {
        match self.armed {
            Some((due, action)) if due <= now_ms => {
                self.armed = None;
                self.now_ms = self.now_ms.max(due);
                Some(action)
            }
            _ => None,
        }
    }

    /// Move the clock forward to `now_ms` without firing anything
    pub fn settle(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_when_due() {
        let mut timer = Timer::new();
        assert!(timer.schedule(50, TimerAction::Tick));
        assert_eq!(timer.pop_due(49), None);
        assert_eq!(timer.pop_due(50), Some(TimerAction::Tick));
        assert!(timer.pending().is_none());
        assert_eq!(timer.now(), 50);
    }

    #[test]
    fn test_rearm_keeps_cadence() {
        let mut timer = Timer::new();
        timer.schedule(50, TimerAction::Tick);
        // Host is late: fires at 120 but the callback runs "at" 50
        assert_eq!(timer.pop_due(120), Some(TimerAction::Tick));
        timer.schedule(50, TimerAction::Tick);
        assert_eq!(timer.pending(), Some((100, TimerAction::Tick)));
        assert_eq!(timer.pop_due(120), Some(TimerAction::Tick));
        timer.settle(120);
        assert_eq!(timer.now(), 120);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "already armed"))]
    fn test_single_flight() {
        let mut timer = Timer::new();
        timer.schedule(50, TimerAction::Tick);
        assert!(!timer.schedule(50, TimerAction::Tick));
    }
}
