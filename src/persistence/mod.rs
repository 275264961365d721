//! Persistence: key/value stores and league snapshots.

mod snapshot;
mod store;

pub use snapshot::{
    restore_league, save_league, ACTIVE_MATCH_KEY, COLOR_SEED_KEY, GAME_DURATION_KEY, QUEUE_KEY,
    SAVED_AT_KEY,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
