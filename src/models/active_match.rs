//! The on-court slot (up to two teams) and match outcomes.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Result declared for the current match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    WinA,
    WinB,
    Draw,
}

/// Up to two teams on court. Both sides empty means no active match;
/// `team_a` present with `team_b` empty means the winner is waiting for a challenger.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActiveMatch {
    #[serde(rename = "teamA")]
    pub team_a: Option<Team>,
    #[serde(rename = "teamB")]
    pub team_b: Option<Team>,
}

impl ActiveMatch {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self {
            team_a: Some(team_a),
            team_b: Some(team_b),
        }
    }

    /// Winner holding the court with nobody to play yet.
    pub fn waiting(team_a: Team) -> Self {
        Self {
            team_a: Some(team_a),
            team_b: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.team_a.is_none() && self.team_b.is_none()
    }

    /// Both sides filled: a result can be declared.
    pub fn is_full(&self) -> bool {
        self.team_a.is_some() && self.team_b.is_some()
    }

    pub fn is_waiting_for_challenger(&self) -> bool {
        self.team_a.is_some() && self.team_b.is_none()
    }

    pub fn contains(&self, id: TeamId) -> bool {
        self.teams().any(|t| t.id == id)
    }

    /// Teams currently on court, A side first.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    /// Take both teams out, leaving the slot empty.
    pub fn take(&mut self) -> (Option<Team>, Option<Team>) {
        (self.team_a.take(), self.team_b.take())
    }
}
