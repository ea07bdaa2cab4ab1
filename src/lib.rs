//! # chutes-sim
//!
//! Monte-Carlo evaluation of movement strategies for chutes and ladders.
//!
//! ## Design Principles
//!
//! 1. **Fair Seating**: A batch runs once per rotation of the player order,
//!    so every player moves first in exactly one rotation.
//!
//! 2. **Isolated Workers**: Each rotation gets its own player snapshots,
//!    strategy clones and RNG stream. The board is the only shared value and
//!    it is immutable.
//!
//! 3. **Join by Identity**: Per-rotation wins are folded back by `PlayerId`,
//!    never by position.
//!
//! ## Architecture
//!
//! - **Rule Tables**: `(square, roll) -> destination` overrides backed by
//!   `im` persistent maps, so cloning a table is O(1).
//!
//! - **Deterministic Batches**: RNG streams are forked from one seed before
//!   dispatch. The same seed and config give the same aggregate on any
//!   number of threads.
//!
//! ## Modules
//!
//! - `core`: Players, errors, RNG
//! - `board`: Board topology and redirects
//! - `strategy`: Strategy trait, rule tables, greedy and linear strategies
//! - `simulation`: Executor, orchestrator, results, action log

pub mod board;
pub mod core;
pub mod simulation;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameRng, Player, PlayerId, SimError};

pub use crate::board::{Board, BoardBuilder, Redirect, RedirectKind, Roll, Square};

pub use crate::strategy::{
    best_found, GreedyStrategy, LinearStrategy, Rule, RuleSet, RuleTable, Strategy,
};

pub use crate::simulation::{
    render_report, ActionLogTarget, AggregateResult, BatchResult, GameExecutor, RunOptions,
    SharePolicy, SimulationCollection, SimulationConfig, StandardExecutor,
};
