//! Player identification and player records.
//!
//! ## PlayerId
//!
//! Stable identity used as the join key when per-rotation results are
//! folded back into the caller's players.
//!
//! ## Player
//!
//! A named participant bound to exactly one strategy and a starting square.
//! The orchestrator never hands an original `Player` to a worker; workers get
//! a [`Player::snapshot`] instead.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Roll, Square};
use crate::strategy::Strategy;

/// Stable, unique player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player #{}", self.0)
    }
}

/// A participant in the simulation.
///
/// ## Example
///
/// ```
/// use chutes_sim::core::{Player, PlayerId};
/// use chutes_sim::strategy::LinearStrategy;
///
/// let player = Player::new(PlayerId::new(1), "Player 1", LinearStrategy).starting_at(3);
/// assert_eq!(player.strategy_name(), "Linear");
/// assert_eq!(player.starting_square(), 3);
/// assert_eq!(player.win_count, 0);
/// ```
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    strategy: Box<dyn Strategy>,
    starting_square: Square,

    /// Wins credited to this player.
    ///
    /// Incremented by the executor on worker copies; on the caller's records
    /// it is written once by the orchestrator after every rotation joined.
    pub win_count: u64,
}

impl Player {
    /// Create a player starting on square 0.
    pub fn new(id: PlayerId, name: impl Into<String>, strategy: impl Strategy + 'static) -> Self {
        Self::with_boxed_strategy(id, name, Box::new(strategy))
    }

    /// Create a player from an already boxed strategy.
    pub fn with_boxed_strategy(
        id: PlayerId,
        name: impl Into<String>,
        strategy: Box<dyn Strategy>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            strategy,
            starting_square: 0,
            win_count: 0,
        }
    }

    /// Set the starting square.
    #[must_use]
    pub fn starting_at(mut self, square: Square) -> Self {
        self.starting_square = square;
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn starting_square(&self) -> Square {
        self.starting_square
    }

    /// Label of the bound strategy.
    #[must_use]
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Ask the bound strategy where to move.
    pub fn decide(&self, board: &Board, position: Square, roll: Roll) -> Square {
        self.strategy.decide(board, position, roll)
    }

    /// Independent copy for a worker: same identity, cloned strategy, zero wins.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            strategy: self.strategy.clone(),
            starting_square: self.starting_square,
            win_count: 0,
        }
    }
}
