//! League business logic: court rotation and the timer clock.

mod clock;
mod rotation;

pub use clock::tick;
pub use rotation::{reconcile, resolve_match};
