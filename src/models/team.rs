//! Team data structure and the cosmetic color palette.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in the queue, the active match and removal requests).
pub type TeamId = Uuid;

/// Palette of color tags handed out to new teams. Purely decorative, collisions are fine.
pub const TEAM_COLORS: [&str; 17] = [
    "bg-red-500",
    "bg-orange-500",
    "bg-amber-500",
    "bg-yellow-500",
    "bg-lime-500",
    "bg-green-500",
    "bg-emerald-500",
    "bg-teal-500",
    "bg-cyan-500",
    "bg-sky-500",
    "bg-blue-500",
    "bg-indigo-500",
    "bg-violet-500",
    "bg-purple-500",
    "bg-fuchsia-500",
    "bg-pink-500",
    "bg-rose-500",
];

/// Color tag for the n-th team created in a league. Same seed, same color.
pub fn color_for(seed: u64) -> &'static str {
    let mut rng = StdRng::seed_from_u64(seed);
    TEAM_COLORS[rng.gen_range(0..TEAM_COLORS.len())]
}

/// A team waiting in the queue or playing on court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(rename = "color")]
    pub color_tag: String,
}

impl Team {
    /// Create a new team with a fresh id. The caller is responsible for trimming the name.
    pub fn new(name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color_tag: color_tag.into(),
        }
    }
}
