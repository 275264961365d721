//! Save and restore a league through a [`KeyValueStore`].
//!
//! Each piece of state lives under its own key. Restoring never fails: a key that is missing
//! or cannot be decoded falls back to its default and the problem is logged.

use crate::logic::reconcile;
use crate::models::{ActiveMatch, DrawPolicy, GameDuration, League, Team};
use crate::persistence::store::{KeyValueStore, StoreError};
use serde::de::DeserializeOwned;

pub const QUEUE_KEY: &str = "futsal_queue";
pub const ACTIVE_MATCH_KEY: &str = "futsal_active_game";
pub const GAME_DURATION_KEY: &str = "futsal_game_duration";
pub const COLOR_SEED_KEY: &str = "futsal_color_seed";
pub const SAVED_AT_KEY: &str = "futsal_saved_at";

/// Write queue, active match, duration and color counter to the store in one batch,
/// so a failed save leaves the previous snapshot intact.
pub fn save_league(store: &mut dyn KeyValueStore, league: &League) -> Result<(), StoreError> {
    let active = league.active_match();
    let active_json = if active.is_empty() {
        "null".to_string()
    } else {
        serde_json::to_string(active)?
    };
    store.set_many(&[
        (QUEUE_KEY, serde_json::to_string(league.queue())?),
        (ACTIVE_MATCH_KEY, active_json),
        (GAME_DURATION_KEY, league.game_duration().seconds().to_string()),
        (COLOR_SEED_KEY, league.color_seed().to_string()),
        (SAVED_AT_KEY, chrono::Utc::now().to_rfc3339()),
    ])
}

/// Build the league from the store, substituting defaults for anything unreadable,
/// then reconcile once.
pub fn restore_league(store: &dyn KeyValueStore, draw_policy: DrawPolicy) -> League {
    let queue: Vec<Team> = read_key(store, QUEUE_KEY).unwrap_or_default();
    let active: ActiveMatch = read_key::<Option<ActiveMatch>>(store, ACTIVE_MATCH_KEY)
        .flatten()
        .unwrap_or_default();
    let duration = read_key::<u32>(store, GAME_DURATION_KEY)
        .and_then(|s| match GameDuration::try_from(s) {
            Ok(d) => Some(d),
            Err(e) => {
                log::warn!("{}; using default", e);
                None
            }
        })
        .unwrap_or_default();
    let color_seed: u64 = read_key(store, COLOR_SEED_KEY).unwrap_or(queue.len() as u64);

    let mut league = match League::from_parts(queue, active, duration, color_seed, draw_policy) {
        Ok(league) => league,
        Err(e) => {
            log::warn!("Stored league is inconsistent ({}); starting with an empty league", e);
            League::from_parts(Vec::new(), ActiveMatch::default(), duration, color_seed, draw_policy)
                .unwrap_or_else(|_| League::new(draw_policy))
        }
    };
    if let Ok(Some(saved_at)) = store.get(SAVED_AT_KEY) {
        log::debug!("Restored league saved at {}", saved_at);
    }
    reconcile(&mut league);
    league
}

/// Decode one key as JSON. `None` when the key is absent or broken.
fn read_key<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read {} from store: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Failed to parse {} from store: {}", key, e);
            None
        }
    }
}
