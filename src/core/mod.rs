//! Core types: players, errors, RNG.
//!
//! Everything else in the crate builds on these. Nothing here knows about
//! threads or batches.

pub mod error;
pub mod player;
pub mod rng;

pub use error::{ConfigError, SimError};
pub use player::{Player, PlayerId};
pub use rng::GameRng;
