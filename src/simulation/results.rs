//! Per-rotation and aggregate results.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::{Player, PlayerId};

use super::config::SharePolicy;

/// Outcome of one rotation: games played and wins per player identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    games_played: u64,
    wins: FxHashMap<PlayerId, u64>,
}

impl BatchResult {
    /// Empty result with a zero entry for every player.
    pub fn new(players: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            games_played: 0,
            wins: players.into_iter().map(|id| (id, 0)).collect(),
        }
    }

    /// Collect the win counters of a worker's players.
    pub fn from_players(players: &[Player], games_played: u64) -> Self {
        Self {
            games_played,
            wins: players.iter().map(|p| (p.id(), p.win_count)).collect(),
        }
    }

    /// Credit one finished game to `winner`.
    pub fn record_win(&mut self, winner: PlayerId) {
        *self.wins.entry(winner).or_insert(0) += 1;
        self.games_played += 1;
    }

    #[must_use]
    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    /// Wins for a player, `None` if the player is not part of this batch.
    #[must_use]
    pub fn wins_for(&self, player: PlayerId) -> Option<u64> {
        self.wins.get(&player).copied()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.wins.keys().copied()
    }

    #[must_use]
    pub fn total_wins(&self) -> u64 {
        self.wins.values().sum()
    }
}

/// Final total for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerTotal {
    pub id: PlayerId,
    pub name: String,
    pub strategy: String,
    pub wins: u64,
}

/// What one rotation ran.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RotationSummary {
    /// 0-based rotation index.
    pub rotation: usize,
    /// Player who moved first in every game of this rotation.
    pub first_player: PlayerId,
    pub games: u64,
}

/// Joined result of a whole batch.
///
/// `players` follows the order the caller passed in, not any rotation order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateResult {
    pub games_requested: u64,
    pub games_executed: u64,
    pub share_policy: SharePolicy,
    pub players: Vec<PlayerTotal>,
    pub rotations: Vec<RotationSummary>,
}

impl AggregateResult {
    /// Total wins for a player.
    #[must_use]
    pub fn wins(&self, player: PlayerId) -> Option<u64> {
        self.players.iter().find(|p| p.id == player).map(|p| p.wins)
    }

    #[must_use]
    pub fn total_wins(&self) -> u64 {
        self.players.iter().map(|p| p.wins).sum()
    }

    /// Fraction of executed games a player won.
    #[must_use]
    pub fn win_rate(&self, player: PlayerId) -> Option<f64> {
        if self.games_executed == 0 {
            return None;
        }
        self.wins(player)
            .map(|wins| wins as f64 / self.games_executed as f64)
    }

    /// Executed minus requested games (non-zero only under rounded shares).
    #[must_use]
    pub fn share_drift(&self) -> i64 {
        self.games_executed as i64 - self.games_requested as i64
    }

    /// Player with the most wins; the earliest listed player on ties.
    #[must_use]
    pub fn leader(&self) -> Option<&PlayerTotal> {
        self.players
            .iter()
            .rev()
            .max_by_key(|p| p.wins)
    }
}

/// Plain-text summary: total games, then one line per player.
#[must_use]
pub fn render_report(result: &AggregateResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Games: {}", result.total_wins());
    for player in &result.players {
        let _ = writeln!(
            out,
            "{} using strategy: {}  wins: {}",
            player.name, player.strategy, player.wins
        );
    }
    out
}
