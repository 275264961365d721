//! Court rotation: winner stays, tie rotates, and reconciliation of the court against the queue.

use crate::models::{ActiveMatch, DrawPolicy, League, LeagueError, Outcome, Team};

/// Apply a match result to the active match.
///
/// - Win: the winner stays as team A, the queue head becomes team B and the loser goes to the
///   queue tail. With nobody queued the winner waits for a challenger.
/// - Draw: team A then team B go to the queue tail and the two teams at the head take the court.
///
/// Every branch resets the match timer. Requires two teams on court; under
/// [`DrawPolicy::Strict`] a draw also requires the timer to have run out.
pub fn resolve_match(league: &mut League, outcome: Outcome) -> Result<(), LeagueError> {
    if !league.active.is_full() {
        return Err(LeagueError::NoActiveMatch);
    }
    if outcome == Outcome::Draw
        && league.draw_policy == DrawPolicy::Strict
        && !league.timer.is_expired()
    {
        return Err(LeagueError::DrawBeforeTimeUp {
            remaining: league.timer.remaining(),
        });
    }

    let (team_a, team_b) = match league.active.take() {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(LeagueError::NoActiveMatch),
    };

    match outcome {
        Outcome::WinA => rotate_winner(league, team_a, team_b),
        Outcome::WinB => rotate_winner(league, team_b, team_a),
        Outcome::Draw => rotate_draw(league, team_a, team_b),
    }
    league.timer.reset();
    crate::logic::reconcile(league);
    Ok(())
}

fn rotate_winner(league: &mut League, winner: Team, loser: Team) {
    log::debug!("{} beat {}", winner.name, loser.name);
    league.active = if league.queue.is_empty() {
        ActiveMatch::waiting(winner)
    } else {
        let challenger = league.queue.remove(0);
        ActiveMatch::new(winner, challenger)
    };
    league.queue.push(loser);
}

/// Both drawing teams rejoin the tail and the head two take the court.
///
/// Only reached from `resolve_match` with a full court, so after the push the queue holds at
/// least two teams and the `else` branch (clear the court) never runs from there.
fn rotate_draw(league: &mut League, team_a: Team, team_b: Team) {
    log::debug!("{} drew with {}", team_a.name, team_b.name);
    league.queue.push(team_a);
    league.queue.push(team_b);
    if league.queue.len() >= 2 {
        let next_a = league.queue.remove(0);
        let next_b = league.queue.remove(0);
        league.active = ActiveMatch::new(next_a, next_b);
    } else {
        league.active = ActiveMatch::default();
    }
}

/// Fill an incomplete court from the queue, repeating until nothing changes.
///
/// 1. Winner waiting and someone queued: queue head becomes team B.
/// 2. Court empty and two or more queued: the head two take the court.
///
/// Each fill resets the timer. Returns whether anything changed; calling it on a settled
/// league is a no-op.
pub fn reconcile(league: &mut League) -> bool {
    let mut changed = false;
    loop {
        if league.active.is_waiting_for_challenger() && !league.queue.is_empty() {
            let challenger = league.queue.remove(0);
            log::debug!("{} steps up as challenger", challenger.name);
            league.active.team_b = Some(challenger);
        } else if league.active.is_empty() && league.queue.len() >= 2 {
            let team_a = league.queue.remove(0);
            let team_b = league.queue.remove(0);
            log::debug!("New match: {} vs {}", team_a.name, team_b.name);
            league.active = ActiveMatch::new(team_a, team_b);
        } else {
            break;
        }
        league.timer.reset();
        changed = true;
    }
    changed
}
