//! Single-game executor.
//!
//! The orchestrator hands each rotation to a [`GameExecutor`]. The executor
//! owns the game rules: dice, movement bounds, redirects and the win check.

use std::path::Path;

use smallvec::SmallVec;

use crate::board::{Board, Square};
use crate::core::{ConfigError, GameRng, Player, SimError};

use super::action_log::{ActionLog, MoveRecord};
use super::results::BatchResult;

/// Plays a batch of complete games for one rotation.
///
/// ## Implementation Notes
///
/// - `players` is already in rotation order; the first player moves first
///   in every game
/// - The returned [`BatchResult`] must hold exactly one entry per player id,
///   zero-win players included
/// - Called concurrently from several worker threads, one call per rotation
pub trait GameExecutor: Send + Sync {
    fn run(
        &self,
        board: &Board,
        players: Vec<Player>,
        execution_count: u64,
        rng: GameRng,
        action_log: Option<&Path>,
    ) -> Result<BatchResult, SimError>;
}

/// Rules of the classic race.
///
/// A destination past the last square leaves the token where it is. Otherwise
/// one redirect is applied, and a token ending on the last square wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardExecutor {
    max_turns_per_game: u32,
}

impl Default for StandardExecutor {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl StandardExecutor {
    #[must_use]
    pub fn new(max_turns_per_game: u32) -> Self {
        Self { max_turns_per_game }
    }

    #[must_use]
    pub fn max_turns_per_game(&self) -> u32 {
        self.max_turns_per_game
    }

    /// Play one game and return the winner's seat.
    fn play_game(
        &self,
        board: &Board,
        players: &[Player],
        game: u64,
        rng: &mut GameRng,
        mut log: Option<&mut ActionLog>,
    ) -> Result<usize, SimError> {
        let mut positions: SmallVec<[Square; 4]> =
            players.iter().map(Player::starting_square).collect();
        let mut turn = 0u32;

        loop {
            for (seat, player) in players.iter().enumerate() {
                if turn == self.max_turns_per_game {
                    return Err(SimError::GameStalled { game, turns: turn });
                }
                turn += 1;

                let start = positions[seat];
                let roll = rng.roll(board.die_faces());
                let chosen = player.decide(board, start, roll);
                let end = if board.is_valid_square(chosen) {
                    board.resolve(chosen)
                } else {
                    start
                };
                positions[seat] = end;
                let won = board.is_winning(end);

                if let Some(log) = log.as_mut() {
                    log.record(&MoveRecord {
                        game,
                        turn,
                        player: player.id(),
                        player_name: player.name(),
                        strategy: player.strategy_name(),
                        start,
                        roll,
                        chosen,
                        end,
                        won,
                    })?;
                }

                if won {
                    return Ok(seat);
                }
            }
        }
    }
}

impl GameExecutor for StandardExecutor {
    fn run(
        &self,
        board: &Board,
        mut players: Vec<Player>,
        execution_count: u64,
        mut rng: GameRng,
        action_log: Option<&Path>,
    ) -> Result<BatchResult, SimError> {
        if players.is_empty() {
            return Err(ConfigError::NoPlayers.into());
        }
        if self.max_turns_per_game == 0 {
            return Err(ConfigError::ZeroTurnLimit.into());
        }

        let mut log = action_log.map(ActionLog::create).transpose()?;

        for game in 0..execution_count {
            let seat = self.play_game(board, &players, game, &mut rng, log.as_mut())?;
            players[seat].win_count += 1;
        }

        if let Some(log) = log {
            log.finish()?;
        }

        Ok(BatchResult::from_players(&players, execution_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::strategy::{GreedyStrategy, LinearStrategy};

    fn players() -> Vec<Player> {
        vec![
            Player::new(PlayerId::new(1), "Greedy", GreedyStrategy),
            Player::new(PlayerId::new(2), "Linear", LinearStrategy),
        ]
    }

    #[test]
    fn test_every_game_has_one_winner() {
        let board = Board::standard();
        let result = StandardExecutor::default()
            .run(&board, players(), 200, GameRng::new(1), None)
            .unwrap();

        assert_eq!(result.games_played(), 200);
        assert_eq!(result.total_wins(), 200);
        assert!(result.wins_for(PlayerId::new(1)).is_some());
        assert!(result.wins_for(PlayerId::new(2)).is_some());
    }

    #[test]
    fn test_same_seed_same_result() {
        let board = Board::standard();
        let executor = StandardExecutor::default();

        let a = executor.run(&board, players(), 100, GameRng::new(9), None).unwrap();
        let b = executor.run(&board, players(), 100, GameRng::new(9), None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_games_still_lists_players() {
        let board = Board::standard();
        let result = StandardExecutor::default()
            .run(&board, players(), 0, GameRng::new(1), None)
            .unwrap();

        assert_eq!(result.games_played(), 0);
        assert_eq!(result.wins_for(PlayerId::new(1)), Some(0));
        assert_eq!(result.wins_for(PlayerId::new(2)), Some(0));
    }

    #[test]
    fn test_solo_player_wins_everything() {
        let board = Board::standard();
        let solo = vec![Player::new(PlayerId::new(5), "Solo", LinearStrategy)];
        let result = StandardExecutor::default()
            .run(&board, solo, 25, GameRng::new(3), None)
            .unwrap();

        assert_eq!(result.wins_for(PlayerId::new(5)), Some(25));
    }

    #[test]
    fn test_overshoot_stays_put() {
        // A roll of 3 overshoots from anywhere on this board.
        let board = Board::builder().last_square(2).die_faces(3).build().unwrap();
        let solo = vec![Player::new(PlayerId::new(1), "Solo", LinearStrategy)];
        let result = StandardExecutor::default()
            .run(&board, solo, 10, GameRng::new(4), None)
            .unwrap();

        assert_eq!(result.total_wins(), 10);
    }

    #[test]
    fn test_games_near_top_of_square_range() {
        let last = Square::MAX - 6;
        let board = Board::builder().last_square(last).build().unwrap();
        let solo = vec![Player::new(PlayerId::new(1), "Solo", LinearStrategy).starting_at(last - 3)];
        let result = StandardExecutor::default()
            .run(&board, solo, 20, GameRng::new(5), None)
            .unwrap();

        assert_eq!(result.total_wins(), 20);
    }

    #[test]
    fn test_turn_limit_stalls_game() {
        // No single move from square 0 can reach 100 on the standard board.
        let board = Board::standard();
        let err = StandardExecutor::new(1)
            .run(&board, players(), 5, GameRng::new(1), None)
            .unwrap_err();

        assert!(matches!(err, SimError::GameStalled { game: 0, turns: 1 }));
    }

    #[test]
    fn test_no_players_rejected() {
        let board = Board::standard();
        let err = StandardExecutor::default()
            .run(&board, Vec::new(), 5, GameRng::new(1), None)
            .unwrap_err();

        assert!(matches!(err, SimError::Config(ConfigError::NoPlayers)));
    }

    #[test]
    fn test_action_log_has_one_row_per_move() {
        let path = std::env::temp_dir().join(format!(
            "chutes-sim-executor-{}.csv",
            std::process::id()
        ));
        let board = Board::standard();
        let result = StandardExecutor::default()
            .run(&board, players(), 3, GameRng::new(2), Some(path.as_path()))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<_> = contents.lines().skip(1).collect();
        let wins = rows.iter().filter(|row| row.ends_with(",true")).count();

        assert!(!rows.is_empty());
        assert_eq!(wins as u64, result.total_wins());
        assert!(rows.iter().all(|row| row.starts_with(['0', '1', '2'])));

        std::fs::remove_file(&path).unwrap();
    }
}
