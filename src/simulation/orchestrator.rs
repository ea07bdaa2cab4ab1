//! Parallel simulation orchestrator.
//!
//! `run_simulations` splits a batch into one unit per rotation of the player
//! order, runs every unit on a dedicated rayon pool and joins the results by
//! player id.
//!
//! ## Fairness
//!
//! Rotation `i` is the caller's order left-rotated by `i`, so with N players
//! and N rotations every player moves first exactly once.
//!
//! ## Isolation
//!
//! Units never see the caller's players. Each gets snapshots, its own RNG
//! stream forked from the configured seed before dispatch, and its own action
//! log file. The only shared value is the board, borrowed immutably.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use log::{debug, error, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Board;
use crate::core::{ConfigError, GameRng, Player, PlayerId, SimError};

use super::config::{RunOptions, SimulationConfig};
use super::executor::{GameExecutor, StandardExecutor};
use super::results::{render_report, AggregateResult, BatchResult, PlayerTotal, RotationSummary};

/// Indices into the caller's player list, in the order rotation `rotation`
/// seats them.
///
/// ```
/// use chutes_sim::simulation::rotation_order;
///
/// assert_eq!(rotation_order(3, 0), vec![0, 1, 2]);
/// assert_eq!(rotation_order(3, 1), vec![1, 2, 0]);
/// assert_eq!(rotation_order(3, 2), vec![2, 0, 1]);
/// ```
#[must_use]
pub fn rotation_order(player_count: usize, rotation: usize) -> Vec<usize> {
    (0..player_count)
        .map(|seat| (seat + rotation) % player_count)
        .collect()
}

/// Everything one rotation needs, owned.
struct Unit {
    rotation: usize,
    first_player: PlayerId,
    players: Vec<Player>,
    games: u64,
    rng: GameRng,
    log_path: Option<PathBuf>,
}

/// Runs batches of games for a fixed board and configuration.
///
/// ## Example
///
/// ```
/// use chutes_sim::board::Board;
/// use chutes_sim::core::{Player, PlayerId};
/// use chutes_sim::simulation::{RunOptions, SimulationCollection, SimulationConfig};
/// use chutes_sim::strategy::{GreedyStrategy, LinearStrategy};
///
/// let collection = SimulationCollection::new(Board::standard(), SimulationConfig::default());
/// let mut players = vec![
///     Player::new(PlayerId::new(1), "Player 1", GreedyStrategy),
///     Player::new(PlayerId::new(2), "Player 2", LinearStrategy),
/// ];
///
/// let result = collection
///     .run_simulations(&mut players, 1_000, &RunOptions::default())
///     .unwrap();
///
/// assert_eq!(result.total_wins(), 1_000);
/// assert_eq!(players[0].win_count + players[1].win_count, 1_000);
/// ```
#[derive(Debug)]
pub struct SimulationCollection<E: GameExecutor = StandardExecutor> {
    board: Board,
    config: SimulationConfig,
    executor: E,
}

impl SimulationCollection<StandardExecutor> {
    /// Collection using the standard rules.
    pub fn new(board: Board, config: SimulationConfig) -> Self {
        let executor = StandardExecutor::new(config.max_turns_per_game);
        Self {
            board,
            config,
            executor,
        }
    }
}

impl<E: GameExecutor> SimulationCollection<E> {
    /// Replace the executor.
    pub fn with_executor<F: GameExecutor>(self, executor: F) -> SimulationCollection<F> {
        SimulationCollection {
            board: self.board,
            config: self.config,
            executor,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run `total_executions` games split across one rotation per player.
    ///
    /// On success every player's `win_count` holds its total across all
    /// rotations. On error the players are left untouched.
    ///
    /// ## Errors
    ///
    /// - `ConfigError` if the request is invalid; nothing runs
    /// - The error of the lowest failing rotation, after every rotation has
    ///   finished
    /// - A join error if a rotation reported ids that do not match the input
    pub fn run_simulations(
        &self,
        players: &mut [Player],
        total_executions: u64,
        options: &RunOptions,
    ) -> Result<AggregateResult, SimError> {
        self.validate(players, total_executions, options)?;

        let units = self.plan(players, total_executions, options);
        let rotations: Vec<RotationSummary> = units
            .iter()
            .map(|unit| RotationSummary {
                rotation: unit.rotation,
                first_player: unit.first_player,
                games: unit.games,
            })
            .collect();

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.worker_threads)
            .thread_name(|i| format!("chutes-sim-{i}"))
            .build()?;

        let outcomes: Vec<Result<BatchResult, SimError>> = pool.install(|| {
            units
                .into_par_iter()
                .map(|unit| self.run_unit(unit))
                .collect()
        });

        let batches = first_failure(outcomes)?;
        let totals = join(players, &batches)?;

        for (player, &wins) in players.iter_mut().zip(&totals) {
            player.win_count = wins;
        }

        let result = AggregateResult {
            games_requested: total_executions,
            games_executed: batches.iter().map(BatchResult::games_played).sum(),
            share_policy: self.config.share_policy,
            players: players
                .iter()
                .map(|p| PlayerTotal {
                    id: p.id(),
                    name: p.name().to_string(),
                    strategy: p.strategy_name().to_string(),
                    wins: p.win_count,
                })
                .collect(),
            rotations,
        };

        if result.share_drift() != 0 {
            warn!(
                "requested {} games, executed {} ({:+})",
                result.games_requested,
                result.games_executed,
                result.share_drift()
            );
        }
        info!(
            "{} games over {} rotations",
            result.games_executed,
            result.rotations.len()
        );
        for total in &result.players {
            info!("{} ({}): {} wins", total.name, total.strategy, total.wins);
        }

        if options.emit_report {
            print!("{}", render_report(&result));
        }

        Ok(result)
    }

    fn validate(
        &self,
        players: &[Player],
        total_executions: u64,
        options: &RunOptions,
    ) -> Result<(), ConfigError> {
        self.config.validate()?;

        if players.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        if total_executions < players.len() as u64 {
            return Err(ConfigError::TooFewExecutions {
                executions: total_executions,
                players: players.len(),
            });
        }

        let limit = self
            .config
            .max_starting_square
            .min(self.board.last_square().saturating_sub(1));
        let mut seen = FxHashSet::default();
        for player in players {
            if !seen.insert(player.id()) {
                return Err(ConfigError::DuplicatePlayer(player.id()));
            }
            if player.starting_square() > limit {
                return Err(ConfigError::StartingSquare {
                    player: player.id(),
                    square: player.starting_square(),
                    limit,
                });
            }
        }

        if let Some(target) = &options.action_log {
            target.validate()?;
        }
        Ok(())
    }

    /// Build one unit per rotation. RNG streams are forked here, in rotation
    /// order, so results do not depend on scheduling.
    fn plan(&self, players: &[Player], total_executions: u64, options: &RunOptions) -> Vec<Unit> {
        let mut root = GameRng::new(self.config.seed);
        let shares = self
            .config
            .share_policy
            .shares(total_executions, players.len());

        shares
            .into_iter()
            .enumerate()
            .map(|(rotation, games)| {
                let seated: Vec<Player> = rotation_order(players.len(), rotation)
                    .into_iter()
                    .map(|index| players[index].snapshot())
                    .collect();

                Unit {
                    rotation,
                    first_player: seated[0].id(),
                    players: seated,
                    games,
                    rng: root.fork(),
                    log_path: options
                        .action_log
                        .as_ref()
                        .map(|target| target.path_for(rotation)),
                }
            })
            .collect()
    }

    fn run_unit(&self, unit: Unit) -> Result<BatchResult, SimError> {
        let Unit {
            rotation,
            first_player,
            players,
            games,
            rng,
            log_path,
        } = unit;
        debug!("rotation {rotation}: {games} games, {first_player} first");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.executor
                .run(&self.board, players, games, rng, log_path.as_deref())
        }));

        match outcome {
            Ok(Ok(batch)) => {
                debug!(
                    "rotation {rotation}: finished {} games",
                    batch.games_played()
                );
                Ok(batch)
            }
            Ok(Err(source)) => Err(SimError::Rotation {
                rotation,
                source: Box::new(source),
            }),
            Err(payload) => Err(SimError::RotationPanicked {
                rotation,
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

/// Log every failure and return the one from the lowest rotation.
fn first_failure(
    outcomes: Vec<Result<BatchResult, SimError>>,
) -> Result<Vec<BatchResult>, SimError> {
    let mut batches = Vec::with_capacity(outcomes.len());
    let mut failure = None;

    for outcome in outcomes {
        match outcome {
            Ok(batch) => batches.push(batch),
            Err(err) => {
                error!("{err}");
                failure.get_or_insert(err);
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(batches),
    }
}

/// Sum wins per player across rotations, in the caller's order.
fn join(players: &[Player], batches: &[BatchResult]) -> Result<Vec<u64>, SimError> {
    let index: FxHashMap<PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id(), i))
        .collect();
    let mut totals = vec![0u64; players.len()];

    for (rotation, batch) in batches.iter().enumerate() {
        if let Some(player) = batch.player_ids().find(|id| !index.contains_key(id)) {
            return Err(SimError::UnknownPlayer { rotation, player });
        }
        for (player, total) in players.iter().zip(totals.iter_mut()) {
            let wins = batch
                .wins_for(player.id())
                .ok_or(SimError::MissingPlayer {
                    rotation,
                    player: player.id(),
                })?;
            *total += wins;
        }
    }

    let wins: u64 = totals.iter().sum();
    let games: u64 = batches.iter().map(BatchResult::games_played).sum();
    if wins != games {
        return Err(SimError::WinTotalMismatch { wins, games });
    }
    Ok(totals)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
