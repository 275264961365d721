//! Data structures for the court queue: teams, the active match, the timer and the league.

mod active_match;
mod league;
mod team;
mod timer;

pub use active_match::{ActiveMatch, Outcome};
pub use league::{DrawPolicy, League, LeagueError, LeagueView};
pub use team::{color_for, Team, TeamId, TEAM_COLORS};
pub use timer::{
    GameDuration, MatchTimer, TimerEvent, TimerPhase, TimerState, UnsupportedDuration,
    PERMITTED_DURATIONS,
};
