//! League: the single owned state object (queue, active match, timer).

use crate::models::active_match::ActiveMatch;
use crate::models::team::{color_for, Team, TeamId};
use crate::models::timer::{GameDuration, MatchTimer, TimerState, PERMITTED_DURATIONS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reasons a league operation was rejected. A rejected operation leaves the league untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Team name is empty after trimming.
    EmptyTeamName,
    /// No team with this id is waiting in the queue.
    TeamNotInQueue(TeamId),
    /// The team is on court; only queued teams can be removed.
    TeamInActiveMatch(TeamId),
    /// The same team id shows up more than once across queue and court.
    DuplicateTeam(TeamId),
    /// A result needs two teams on court.
    NoActiveMatch,
    /// Draws are only accepted once the clock has run out (strict policy).
    DrawBeforeTimeUp { remaining: u32 },
    /// Duration is not one of the permitted values.
    UnsupportedDuration(u32),
    /// Duration cannot change while the clock is running.
    TimerRunning,
    /// Nothing left on the clock to start.
    TimerExpired,
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::EmptyTeamName => write!(f, "Team name cannot be empty"),
            LeagueError::TeamNotInQueue(_) => write!(f, "Team not found in queue"),
            LeagueError::TeamInActiveMatch(_) => write!(f, "Team is playing and cannot be removed"),
            LeagueError::DuplicateTeam(_) => write!(f, "Team appears more than once"),
            LeagueError::NoActiveMatch => write!(f, "No match with two teams in progress"),
            LeagueError::DrawBeforeTimeUp { remaining } => {
                write!(f, "Draw only allowed when time is up ({}s remaining)", remaining)
            }
            LeagueError::UnsupportedDuration(s) => write!(f, "Unsupported game duration: {}s", s),
            LeagueError::TimerRunning => write!(f, "Pause the timer before changing the duration"),
            LeagueError::TimerExpired => write!(f, "Timer has run out; reset it first"),
        }
    }
}

impl std::error::Error for LeagueError {}

/// Whether the core itself gates draws on the timer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Reject a draw while time remains.
    #[default]
    Strict,
    /// Apply draw rotation whenever invoked; the caller enforces the gate.
    Lenient,
}

/// Read-only snapshot handed to the UI layer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueView {
    pub queue: Vec<Team>,
    pub active_match: ActiveMatch,
    pub timer: TimerState,
    pub game_duration: GameDuration,
    pub permitted_durations: Vec<u32>,
    pub draw_allowed: bool,
}

/// Full live state of one league.
#[derive(Clone, Debug)]
pub struct League {
    /// Waiting teams; head plays next.
    pub(crate) queue: Vec<Team>,
    pub(crate) active: ActiveMatch,
    pub(crate) timer: MatchTimer,
    /// Feeds [`color_for`]; bumped once per created team.
    pub(crate) color_seed: u64,
    pub(crate) draw_policy: DrawPolicy,
}

impl League {
    /// Empty league: no teams, no match, default duration.
    pub fn new(draw_policy: DrawPolicy) -> Self {
        Self {
            queue: Vec::new(),
            active: ActiveMatch::default(),
            timer: MatchTimer::default(),
            color_seed: 0,
            draw_policy,
        }
    }

    /// Rebuild a league from stored parts. Does not reconcile; callers run
    /// [`crate::reconcile`] once the league is in place.
    ///
    /// An active match holding only team B is shifted to team A (waiting for challenger).
    pub fn from_parts(
        queue: Vec<Team>,
        active: ActiveMatch,
        duration: GameDuration,
        color_seed: u64,
        draw_policy: DrawPolicy,
    ) -> Result<Self, LeagueError> {
        let mut active = active;
        if active.team_a.is_none() {
            active.team_a = active.team_b.take();
        }
        let mut seen = HashSet::new();
        for team in queue.iter().chain(active.teams()) {
            if team.name.trim().is_empty() {
                return Err(LeagueError::EmptyTeamName);
            }
            if !seen.insert(team.id) {
                return Err(LeagueError::DuplicateTeam(team.id));
            }
        }
        Ok(Self {
            queue,
            active,
            timer: MatchTimer::new(duration),
            color_seed,
            draw_policy,
        })
    }

    pub fn queue(&self) -> &[Team] {
        &self.queue
    }

    pub fn active_match(&self) -> &ActiveMatch {
        &self.active
    }

    pub fn timer(&self) -> &MatchTimer {
        &self.timer
    }

    pub fn game_duration(&self) -> GameDuration {
        self.timer.duration()
    }

    pub fn color_seed(&self) -> u64 {
        self.color_seed
    }

    pub fn draw_policy(&self) -> DrawPolicy {
        self.draw_policy
    }

    /// Look up a team anywhere in the league.
    pub fn find_team(&self, id: TeamId) -> Option<&Team> {
        self.queue
            .iter()
            .chain(self.active.teams())
            .find(|t| t.id == id)
    }

    /// True when `resolve_match(Outcome::Draw)` would currently be applied.
    pub fn draw_allowed(&self) -> bool {
        self.active.is_full()
            && (self.draw_policy == DrawPolicy::Lenient || self.timer.is_expired())
    }

    pub fn view(&self) -> LeagueView {
        LeagueView {
            queue: self.queue.clone(),
            active_match: self.active.clone(),
            timer: self.timer.state(),
            game_duration: self.timer.duration(),
            permitted_durations: PERMITTED_DURATIONS.to_vec(),
            draw_allowed: self.draw_allowed(),
        }
    }

    /// Queue a new team at the tail and reconcile. Returns the new team's id.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, LeagueError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(LeagueError::EmptyTeamName);
        }
        let team = Team::new(name_trimmed, color_for(self.color_seed));
        self.color_seed += 1;
        let id = team.id;
        log::debug!("Queued team {} ({})", team.name, id);
        self.queue.push(team);
        crate::logic::reconcile(self);
        Ok(id)
    }

    /// Remove a waiting team by id. Teams on court are never removed here.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), LeagueError> {
        if self.active.contains(team_id) {
            return Err(LeagueError::TeamInActiveMatch(team_id));
        }
        let idx = self
            .queue
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(LeagueError::TeamNotInQueue(team_id))?;
        let team = self.queue.remove(idx);
        log::debug!("Removed team {} ({}) from queue", team.name, team.id);
        crate::logic::reconcile(self);
        Ok(())
    }

    /// Wipe queue and court and put the clock back to the full duration.
    /// The configured duration is kept.
    pub fn reset_league(&mut self) {
        self.queue.clear();
        self.active = ActiveMatch::default();
        self.timer.reset();
        log::info!("League reset");
    }

    /// Change the game length (seconds). Only while the timer is not counting down.
    pub fn set_game_duration(&mut self, seconds: u32) -> Result<(), LeagueError> {
        let duration = GameDuration::try_from(seconds)
            .map_err(|e| LeagueError::UnsupportedDuration(e.0))?;
        if !self.timer.set_duration(duration) {
            return Err(LeagueError::TimerRunning);
        }
        Ok(())
    }

    pub fn start_timer(&mut self) -> Result<(), LeagueError> {
        if !self.timer.start() {
            return Err(LeagueError::TimerExpired);
        }
        Ok(())
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }
}

impl Default for League {
    fn default() -> Self {
        Self::new(DrawPolicy::default())
    }
}
