//! Integration tests for court rotation: winner stays, tie rotates, reconciliation.

use futsal_queue::{
    reconcile, resolve_match, tick, ActiveMatch, DrawPolicy, GameDuration, League, LeagueError,
    Outcome, Team, TEAM_COLORS,
};
use std::collections::HashSet;

fn team(name: &str) -> Team {
    Team::new(name, "bg-red-500")
}

fn league_with(queue: Vec<Team>, active: ActiveMatch, policy: DrawPolicy) -> League {
    League::from_parts(queue, active, GameDuration::DEFAULT, 0, policy).unwrap()
}

fn queue_names(league: &League) -> Vec<&str> {
    league.queue().iter().map(|t| t.name.as_str()).collect()
}

fn court(league: &League) -> (Option<&str>, Option<&str>) {
    let m = league.active_match();
    (
        m.team_a.as_ref().map(|t| t.name.as_str()),
        m.team_b.as_ref().map(|t| t.name.as_str()),
    )
}

fn assert_unique_ids(league: &League) {
    let mut seen = HashSet::new();
    for t in league.queue().iter().chain(league.active_match().teams()) {
        assert!(seen.insert(t.id), "team {} appears twice", t.name);
    }
}

#[test]
fn reconcile_starts_match_from_idle_queue() {
    let mut league = league_with(
        vec![team("A"), team("B"), team("C")],
        ActiveMatch::default(),
        DrawPolicy::Strict,
    );
    assert!(reconcile(&mut league));
    assert_eq!(court(&league), (Some("A"), Some("B")));
    assert_eq!(queue_names(&league), vec!["C"]);
}

#[test]
fn reconcile_is_idempotent() {
    let mut league = league_with(
        vec![team("A"), team("B"), team("C")],
        ActiveMatch::default(),
        DrawPolicy::Strict,
    );
    reconcile(&mut league);
    let once = league.view();
    assert!(!reconcile(&mut league));
    assert_eq!(league.view(), once);
}

#[test]
fn reconcile_waits_for_second_team() {
    let mut league = League::new(DrawPolicy::Strict);
    league.add_team("A").unwrap();
    assert!(league.active_match().is_empty());
    assert_eq!(queue_names(&league), vec!["A"]);

    league.add_team("B").unwrap();
    assert_eq!(court(&league), (Some("A"), Some("B")));
    assert!(league.queue().is_empty());
}

#[test]
fn winner_stays_and_loser_goes_to_tail() {
    let (a, b, c) = (team("A"), team("B"), team("C"));
    let mut league = league_with(vec![c], ActiveMatch::new(a, b), DrawPolicy::Strict);
    league.start_timer().unwrap();
    for _ in 0..5 {
        tick(&mut league);
    }

    resolve_match(&mut league, Outcome::WinA).unwrap();
    assert_eq!(court(&league), (Some("A"), Some("C")));
    assert_eq!(queue_names(&league), vec!["B"]);
    assert_eq!(league.timer().remaining(), 180);
    assert!(!league.timer().is_running());
}

#[test]
fn team_b_win_moves_winner_to_team_a() {
    let mut league = league_with(
        vec![team("C"), team("D")],
        ActiveMatch::new(team("A"), team("B")),
        DrawPolicy::Strict,
    );
    resolve_match(&mut league, Outcome::WinB).unwrap();
    assert_eq!(court(&league), (Some("B"), Some("C")));
    assert_eq!(queue_names(&league), vec!["D", "A"]);
}

#[test]
fn win_with_empty_queue_brings_loser_straight_back() {
    let mut league = league_with(
        Vec::new(),
        ActiveMatch::new(team("A"), team("B")),
        DrawPolicy::Strict,
    );
    resolve_match(&mut league, Outcome::WinB).unwrap();
    // Winner waits, loser is queued, reconciliation pulls the loser back on as challenger.
    assert_eq!(court(&league), (Some("B"), Some("A")));
    assert!(league.queue().is_empty());
}

#[test]
fn draw_rotates_both_teams_to_tail() {
    let mut league = league_with(
        vec![team("D")],
        ActiveMatch::new(team("A"), team("C")),
        DrawPolicy::Lenient,
    );
    resolve_match(&mut league, Outcome::Draw).unwrap();
    assert_eq!(court(&league), (Some("D"), Some("A")));
    assert_eq!(queue_names(&league), vec!["C"]);
}

#[test]
fn draw_with_only_two_teams_replays_same_match() {
    let mut league = league_with(
        Vec::new(),
        ActiveMatch::new(team("A"), team("B")),
        DrawPolicy::Lenient,
    );
    resolve_match(&mut league, Outcome::Draw).unwrap();
    assert_eq!(court(&league), (Some("A"), Some("B")));
    assert!(league.queue().is_empty());
}

#[test]
fn strict_draw_requires_expired_timer() {
    let mut league = league_with(
        vec![team("D")],
        ActiveMatch::new(team("A"), team("C")),
        DrawPolicy::Strict,
    );
    assert!(!league.draw_allowed());
    let before = league.view();
    assert_eq!(
        resolve_match(&mut league, Outcome::Draw),
        Err(LeagueError::DrawBeforeTimeUp { remaining: 180 })
    );
    assert_eq!(league.view(), before);

    league.set_game_duration(90).unwrap();
    league.start_timer().unwrap();
    for _ in 0..90 {
        tick(&mut league);
    }
    assert!(league.draw_allowed());
    resolve_match(&mut league, Outcome::Draw).unwrap();
    assert_eq!(court(&league), (Some("D"), Some("A")));
    assert_eq!(queue_names(&league), vec!["C"]);
    assert_eq!(league.timer().remaining(), 90);
}

#[test]
fn resolve_without_full_match_is_rejected() {
    let mut league = League::new(DrawPolicy::Lenient);
    assert_eq!(
        resolve_match(&mut league, Outcome::WinA),
        Err(LeagueError::NoActiveMatch)
    );

    let mut waiting = league_with(Vec::new(), ActiveMatch::waiting(team("D")), DrawPolicy::Lenient);
    let before = waiting.view();
    assert_eq!(
        resolve_match(&mut waiting, Outcome::Draw),
        Err(LeagueError::NoActiveMatch)
    );
    assert_eq!(waiting.view(), before);
}

#[test]
fn new_team_fills_waiting_challenger_slot() {
    let mut league = league_with(Vec::new(), ActiveMatch::waiting(team("D")), DrawPolicy::Strict);
    league.add_team("E").unwrap();
    assert_eq!(court(&league), (Some("D"), Some("E")));
    assert!(league.queue().is_empty());
}

#[test]
fn add_team_trims_and_rejects_blank_names() {
    let mut league = League::new(DrawPolicy::Strict);
    assert_eq!(league.add_team("   "), Err(LeagueError::EmptyTeamName));
    assert_eq!(league.add_team(""), Err(LeagueError::EmptyTeamName));
    assert!(league.queue().is_empty());
    assert_eq!(league.color_seed(), 0);

    let id = league.add_team("  Lions  ").unwrap();
    let lions = league.find_team(id).unwrap();
    assert_eq!(lions.name, "Lions");
    assert!(TEAM_COLORS.contains(&lions.color_tag.as_str()));
    assert_eq!(league.color_seed(), 1);
}

#[test]
fn duplicate_names_are_distinct_teams() {
    let mut league = League::new(DrawPolicy::Strict);
    let first = league.add_team("Reds").unwrap();
    let second = league.add_team("Reds").unwrap();
    assert_ne!(first, second);
    assert!(league.active_match().is_full());
}

#[test]
fn remove_team_only_touches_the_queue() {
    let mut league = League::new(DrawPolicy::Strict);
    let a = league.add_team("A").unwrap();
    league.add_team("B").unwrap();
    let c = league.add_team("C").unwrap();

    assert_eq!(league.remove_team(a), Err(LeagueError::TeamInActiveMatch(a)));
    assert_eq!(court(&league), (Some("A"), Some("B")));

    league.remove_team(c).unwrap();
    assert!(league.queue().is_empty());
    assert_eq!(league.remove_team(c), Err(LeagueError::TeamNotInQueue(c)));
}

#[test]
fn reset_league_clears_everything_but_duration() {
    let mut league = League::new(DrawPolicy::Strict);
    for name in ["A", "B", "C"] {
        league.add_team(name).unwrap();
    }
    league.set_game_duration(240).unwrap();
    league.start_timer().unwrap();
    tick(&mut league);

    league.reset_league();
    assert!(league.queue().is_empty());
    assert!(league.active_match().is_empty());
    assert!(!league.timer().is_running());
    assert_eq!(league.timer().remaining(), 240);
    assert_eq!(league.game_duration().seconds(), 240);
}

#[test]
fn from_parts_moves_lone_team_b_to_team_a() {
    let active = ActiveMatch {
        team_a: None,
        team_b: Some(team("B")),
    };
    let league = league_with(Vec::new(), active, DrawPolicy::Strict);
    assert_eq!(court(&league), (Some("B"), None));
    assert!(league.active_match().is_waiting_for_challenger());
}

#[test]
fn from_parts_rejects_team_in_queue_and_on_court() {
    let a = team("A");
    let id = a.id;
    let result = League::from_parts(
        vec![a.clone()],
        ActiveMatch::new(a, team("B")),
        GameDuration::DEFAULT,
        0,
        DrawPolicy::Strict,
    );
    assert!(matches!(result, Err(LeagueError::DuplicateTeam(dup)) if dup == id));
}

#[test]
fn rotation_never_duplicates_or_loses_teams() {
    let mut league = League::new(DrawPolicy::Lenient);
    for name in ["A", "B", "C", "D", "E"] {
        league.add_team(name).unwrap();
    }
    let outcomes = [
        Outcome::WinA,
        Outcome::Draw,
        Outcome::WinB,
        Outcome::WinA,
        Outcome::WinA,
        Outcome::Draw,
        Outcome::WinB,
        Outcome::Draw,
    ];
    for outcome in outcomes {
        resolve_match(&mut league, outcome).unwrap();
        assert_unique_ids(&league);
        assert!(league.active_match().is_full());
        assert_eq!(league.queue().len(), 3);
        let remaining = league.timer().remaining();
        assert!(remaining <= league.game_duration().seconds());
    }
}
