//! One-second clock signal feeding the match timer.

use crate::models::{League, TimerEvent};

/// Advance the league's match timer by one elapsed second.
///
/// Returns [`TimerEvent::Expired`] exactly once, on the tick that takes the clock to zero.
/// Ticks while the timer is idle, paused or expired change nothing.
pub fn tick(league: &mut League) -> Option<TimerEvent> {
    let event = league.timer.tick();
    if event == Some(TimerEvent::Expired) {
        log::info!("Match timer expired");
    }
    event
}
