//! Futsal court queue: winner stays, tie rotates. Library with models, rotation logic and persistence.

pub mod logic;
pub mod models;
pub mod persistence;

pub use logic::{reconcile, resolve_match, tick};
pub use models::{
    color_for, ActiveMatch, DrawPolicy, GameDuration, League, LeagueError, LeagueView,
    MatchTimer, Outcome, Team, TeamId, TimerEvent, TimerPhase, TimerState, UnsupportedDuration,
    PERMITTED_DURATIONS, TEAM_COLORS,
};
