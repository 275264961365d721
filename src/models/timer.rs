//! Match countdown: game duration setting and the timer state machine.

use serde::{Deserialize, Serialize};

/// Allowed game lengths in seconds: 1.5 to 5 minutes in 30-second steps.
pub const PERMITTED_DURATIONS: [u32; 8] = [90, 120, 150, 180, 210, 240, 270, 300];

/// Length of one game in seconds. Always one of [`PERMITTED_DURATIONS`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct GameDuration(u32);

impl GameDuration {
    pub const DEFAULT: GameDuration = GameDuration(180);

    pub fn seconds(self) -> u32 {
        self.0
    }
}

impl Default for GameDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for GameDuration {
    type Error = UnsupportedDuration;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        if PERMITTED_DURATIONS.contains(&seconds) {
            Ok(Self(seconds))
        } else {
            Err(UnsupportedDuration(seconds))
        }
    }
}

impl From<GameDuration> for u32 {
    fn from(d: GameDuration) -> Self {
        d.0
    }
}

/// A duration outside the permitted set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnsupportedDuration(pub u32);

impl std::fmt::Display for UnsupportedDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unsupported game duration: {}s", self.0)
    }
}

/// Where the countdown currently stands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Not started, full duration remaining.
    Idle,
    /// Counting down.
    Running,
    /// Stopped part-way with time left.
    Paused,
    /// Reached zero.
    Expired,
}

/// Raw timer state as exposed to the UI.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining: u32,
    pub armed: bool,
    pub phase: TimerPhase,
}

/// Emitted by [`MatchTimer::tick`] on state edges.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerEvent {
    /// Countdown hit zero on this tick. Fired once per expiry.
    Expired,
}

/// Countdown clock driven by an external one-second signal.
///
/// The timer never schedules anything itself: the owner calls [`MatchTimer::tick`] once per
/// elapsed second and the timer decides whether that tick counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchTimer {
    duration: GameDuration,
    remaining: u32,
    armed: bool,
}

impl MatchTimer {
    /// Idle timer with the full duration on the clock.
    pub fn new(duration: GameDuration) -> Self {
        Self {
            duration,
            remaining: duration.seconds(),
            armed: false,
        }
    }

    pub fn duration(&self) -> GameDuration {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.armed
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn phase(&self) -> TimerPhase {
        if self.armed {
            TimerPhase::Running
        } else if self.remaining == 0 {
            TimerPhase::Expired
        } else if self.remaining == self.duration.seconds() {
            TimerPhase::Idle
        } else {
            TimerPhase::Paused
        }
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            remaining: self.remaining,
            armed: self.armed,
            phase: self.phase(),
        }
    }

    /// Arm the countdown. Returns false (and does nothing) when there is no time left.
    /// Starting a running timer is a no-op that still reports success.
    pub fn start(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.armed = true;
        true
    }

    /// Stop counting, keeping whatever time is left.
    pub fn pause(&mut self) {
        self.armed = false;
    }

    /// Back to idle with the configured duration.
    pub fn reset(&mut self) {
        self.armed = false;
        self.remaining = self.duration.seconds();
    }

    /// Change the game length. Rejected while running; otherwise resets to the new value.
    pub fn set_duration(&mut self, duration: GameDuration) -> bool {
        if self.armed {
            return false;
        }
        self.duration = duration;
        self.reset();
        true
    }

    /// Count one elapsed second. Ticks while not armed are ignored.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.armed {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            return Some(TimerEvent::Expired);
        }
        None
    }
}

impl Default for MatchTimer {
    fn default() -> Self {
        Self::new(GameDuration::DEFAULT)
    }
}
