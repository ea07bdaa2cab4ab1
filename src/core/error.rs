//! Error types.
//!
//! ## ConfigError
//!
//! Raised synchronously while building a board, registering rules or
//! validating a simulation request. Nothing has run when one is returned.
//!
//! ## SimError
//!
//! Everything that can go wrong once a batch is dispatched, plus a
//! transparent wrapper around `ConfigError` so callers handle one type.

use std::path::PathBuf;

use thiserror::Error;

use super::player::PlayerId;
use crate::board::{Roll, Square};

/// Invalid setup, detected before any game is played.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board needs a last square greater than 0")]
    EmptyBoard,
    #[error("die must have at least one face")]
    NoDieFaces,
    #[error("last square {last_square} leaves no room for a {die_faces}-sided die")]
    BoardTooLarge { last_square: Square, die_faces: Roll },
    #[error("square {square} is outside the board (0..={last_square})")]
    SquareOutOfRange { square: Square, last_square: Square },
    #[error("roll {roll} is not a face of a {faces}-sided die")]
    RollOutOfRange { roll: Roll, faces: Roll },
    #[error("redirect source {0} must lie strictly between the start and the last square")]
    RedirectSource(Square),
    #[error("square {0} already has a redirect")]
    DuplicateRedirect(Square),
    #[error("redirect from {from} to {to} goes the wrong way")]
    RedirectDirection { from: Square, to: Square },
    #[error("redirect from {from} lands on {to}, which redirects again")]
    ChainedRedirect { from: Square, to: Square },
    #[error("no players supplied")]
    NoPlayers,
    #[error("{executions} executions cannot give each of {players} players a turn moving first")]
    TooFewExecutions { executions: u64, players: usize },
    #[error("{0} appears more than once")]
    DuplicatePlayer(PlayerId),
    #[error("{player} starts on square {square}, limit is {limit}")]
    StartingSquare {
        player: PlayerId,
        square: Square,
        limit: Square,
    },
    #[error("action log pattern {0:?} must contain the {{rotation}} placeholder")]
    ActionLogPattern(String),
    #[error("max turns per game must be positive")]
    ZeroTurnLimit,
}

/// Failure while running or joining a batch of simulations.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("game {game} did not finish within {turns} moves")]
    GameStalled { game: u64, turns: u32 },

    #[error("action log {}: {source}", .path.display())]
    ActionLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rotation {rotation} failed: {source}")]
    Rotation {
        rotation: usize,
        #[source]
        source: Box<SimError>,
    },

    #[error("rotation {rotation} panicked: {message}")]
    RotationPanicked { rotation: usize, message: String },

    #[error("rotation {rotation} reported wins for unknown {player}")]
    UnknownPlayer { rotation: usize, player: PlayerId },

    #[error("rotation {rotation} has no result for {player}")]
    MissingPlayer { rotation: usize, player: PlayerId },

    #[error("aggregate holds {wins} wins but {games} games were played")]
    WinTotalMismatch { wins: u64, games: u64 },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SimError {
    /// Rotation index this error is tagged with, if any.
    #[must_use]
    pub fn rotation(&self) -> Option<usize> {
        match self {
            SimError::Rotation { rotation, .. }
            | SimError::RotationPanicked { rotation, .. }
            | SimError::UnknownPlayer { rotation, .. }
            | SimError::MissingPlayer { rotation, .. } => Some(*rotation),
            _ => None,
        }
    }
}
