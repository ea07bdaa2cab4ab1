//! Orchestrator tests.
//!
//! Real games through `StandardExecutor`, plus scripted executors that
//! record what they were handed or misbehave on purpose.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chutes_sim::board::Board;
use chutes_sim::core::{ConfigError, GameRng, Player, PlayerId, SimError};
use chutes_sim::simulation::{
    ActionLogTarget, BatchResult, GameExecutor, RunOptions, SharePolicy, SimulationCollection,
    SimulationConfig,
};
use chutes_sim::strategy::{best_found, GreedyStrategy, LinearStrategy};

fn lineup() -> Vec<Player> {
    let board = Board::standard();
    vec![
        Player::new(PlayerId::new(1), "Player 1", GreedyStrategy),
        Player::new(PlayerId::new(2), "Player 2", LinearStrategy),
        Player::new(PlayerId::new(3), "Player 3", best_found(&board).unwrap()),
    ]
}

fn standard(config: SimulationConfig) -> SimulationCollection {
    SimulationCollection::new(Board::standard(), config)
}

/// Credits every game to whoever moves first and remembers the seating.
#[derive(Debug, Default)]
struct RecordingExecutor {
    calls: Mutex<Vec<(Vec<PlayerId>, Vec<u64>, u64)>>,
}

impl GameExecutor for RecordingExecutor {
    fn run(
        &self,
        _board: &Board,
        players: Vec<Player>,
        execution_count: u64,
        _rng: GameRng,
        _action_log: Option<&Path>,
    ) -> Result<BatchResult, SimError> {
        let ids: Vec<_> = players.iter().map(Player::id).collect();
        let wins: Vec<_> = players.iter().map(|p| p.win_count).collect();
        self.calls
            .lock()
            .unwrap()
            .push((ids.clone(), wins, execution_count));

        let mut result = BatchResult::new(ids.iter().copied());
        for _ in 0..execution_count {
            result.record_win(ids[0]);
        }
        Ok(result)
    }
}

#[derive(Debug, Clone, Copy)]
enum Misbehaviour {
    Fail,
    Panic,
    UnknownPlayer,
    DropPlayer,
    LoseGames,
}

/// Behaves when `target` is not seated first, misbehaves when it is.
#[derive(Debug)]
struct ScriptedExecutor {
    target: PlayerId,
    misbehaviour: Misbehaviour,
}

impl GameExecutor for ScriptedExecutor {
    fn run(
        &self,
        _board: &Board,
        players: Vec<Player>,
        execution_count: u64,
        _rng: GameRng,
        _action_log: Option<&Path>,
    ) -> Result<BatchResult, SimError> {
        let ids: Vec<_> = players.iter().map(Player::id).collect();
        let mut result = BatchResult::new(ids.iter().copied());
        for _ in 0..execution_count {
            result.record_win(ids[0]);
        }
        if ids[0] != self.target {
            return Ok(result);
        }

        match self.misbehaviour {
            Misbehaviour::Fail => Err(SimError::GameStalled { game: 3, turns: 10 }),
            Misbehaviour::Panic => panic!("executor blew up"),
            Misbehaviour::UnknownPlayer => {
                result.record_win(PlayerId::new(77));
                Ok(result)
            }
            Misbehaviour::DropPlayer => {
                Ok(BatchResult::from_players(&players[..players.len() - 1], 0))
            }
            Misbehaviour::LoseGames => Ok(BatchResult::from_players(&players, execution_count)),
        }
    }
}

fn scripted(target: u32, misbehaviour: Misbehaviour) -> SimulationCollection<ScriptedExecutor> {
    standard(SimulationConfig::default()).with_executor(ScriptedExecutor {
        target: PlayerId::new(target),
        misbehaviour,
    })
}

fn unique_temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chutes-sim-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// 90 000 games over 3 players: three rotations of 30 000.
#[test]
fn test_ninety_thousand_games_three_players() {
    let mut players = lineup();
    let result = standard(SimulationConfig::default())
        .run_simulations(&mut players, 90_000, &RunOptions::default())
        .unwrap();

    assert_eq!(result.rotations.len(), 3);
    assert!(result.rotations.iter().all(|r| r.games == 30_000));
    assert_eq!(result.games_executed, 90_000);
    assert_eq!(result.total_wins(), 90_000);
    assert_eq!(result.share_drift(), 0);

    let written: u64 = players.iter().map(|p| p.win_count).sum();
    assert_eq!(written, 90_000);
}

#[test]
fn test_each_player_moves_first_once() {
    let collection = standard(SimulationConfig::default()).with_executor(RecordingExecutor::default());
    let mut players = lineup();
    players[0].win_count = 1_000;

    collection
        .run_simulations(&mut players, 30, &RunOptions::default())
        .unwrap();

    let mut calls = collection.executor().calls.lock().unwrap().clone();
    calls.sort_by_key(|(ids, _, _)| ids[0]);
    let seatings: Vec<Vec<u32>> = calls
        .iter()
        .map(|(ids, _, _)| ids.iter().map(|id| id.raw()).collect())
        .collect();

    assert_eq!(seatings, vec![vec![1, 2, 3], vec![2, 3, 1], vec![3, 1, 2]]);
    assert!(calls.iter().all(|(_, wins, _)| wins.iter().all(|&w| w == 0)));
    assert!(calls.iter().all(|(_, _, games)| *games == 10));

    // Every rotation credits its first player, so the join gives 10 each.
    assert!(players.iter().all(|p| p.win_count == 10));
}

#[test]
fn test_aggregate_follows_caller_order() {
    let mut players = lineup();
    players.reverse();
    let result = standard(SimulationConfig::default())
        .run_simulations(&mut players, 300, &RunOptions::default())
        .unwrap();

    let ids: Vec<_> = result.players.iter().map(|p| p.id.raw()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(result.players[0].strategy, "Best Found");
    assert_eq!(result.rotations[0].first_player, PlayerId::new(3));
}

#[test]
fn test_same_seed_same_aggregate() {
    let run = |threads: usize| {
        let config = SimulationConfig::default().with_seed(2024).with_worker_threads(threads);
        standard(config)
            .run_simulations(&mut lineup(), 3_000, &RunOptions::default())
            .unwrap()
    };

    let single = run(1);
    assert_eq!(single, run(1));
    assert_eq!(single, run(4));
}

#[test]
fn test_different_seeds_differ() {
    let run = |seed: u64| {
        standard(SimulationConfig::default().with_seed(seed))
            .run_simulations(&mut lineup(), 3_000, &RunOptions::default())
            .unwrap()
    };

    assert_ne!(run(1).players, run(2).players);
}

#[test]
fn test_rounded_shares_drift() {
    let mut players = lineup();
    let result = standard(SimulationConfig::default())
        .run_simulations(&mut players, 100, &RunOptions::default())
        .unwrap();

    assert_eq!(result.share_policy, SharePolicy::Rounded);
    assert_eq!(result.games_requested, 100);
    assert_eq!(result.games_executed, 99);
    assert_eq!(result.share_drift(), -1);
    assert_eq!(result.total_wins(), 99);
}

#[test]
fn test_exact_shares_match_request() {
    let config = SimulationConfig::default().with_share_policy(SharePolicy::Exact);
    let result = standard(config)
        .run_simulations(&mut lineup(), 100, &RunOptions::default())
        .unwrap();

    let games: Vec<_> = result.rotations.iter().map(|r| r.games).collect();
    assert_eq!(games, vec![34, 33, 33]);
    assert_eq!(result.games_executed, 100);
    assert_eq!(result.total_wins(), 100);
}

#[test]
fn test_minimum_executions() {
    let mut players = lineup();
    let result = standard(SimulationConfig::default())
        .run_simulations(&mut players, 3, &RunOptions::default())
        .unwrap();
    assert_eq!(result.total_wins(), 3);

    let err = standard(SimulationConfig::default())
        .run_simulations(&mut players, 2, &RunOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::TooFewExecutions {
            executions: 2,
            players: 3
        })
    ));
}

#[test]
fn test_config_errors_run_nothing() {
    let collection = standard(SimulationConfig::default()).with_executor(RecordingExecutor::default());

    let err = collection
        .run_simulations(&mut [], 10, &RunOptions::default())
        .unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::NoPlayers)));

    let bad_log = RunOptions::new().with_action_log(ActionLogTarget::new("logs").with_pattern("x.csv"));
    let err = collection
        .run_simulations(&mut lineup(), 10, &bad_log)
        .unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::ActionLogPattern(_))));

    assert!(collection.executor().calls.lock().unwrap().is_empty());
}

#[test]
fn test_failing_rotation_is_reported() {
    let mut players = lineup();
    let err = scripted(2, Misbehaviour::Fail)
        .run_simulations(&mut players, 30, &RunOptions::default())
        .unwrap_err();

    assert_eq!(err.rotation(), Some(1));
    match err {
        SimError::Rotation { source, .. } => {
            assert!(matches!(*source, SimError::GameStalled { game: 3, turns: 10 }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(players.iter().all(|p| p.win_count == 0));
}

#[test]
fn test_panicking_rotation_is_reported() {
    let err = scripted(3, Misbehaviour::Panic)
        .run_simulations(&mut lineup(), 30, &RunOptions::default())
        .unwrap_err();

    match err {
        SimError::RotationPanicked { rotation, message } => {
            assert_eq!(rotation, 2);
            assert_eq!(message, "executor blew up");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_player_breaks_join() {
    let err = scripted(1, Misbehaviour::UnknownPlayer)
        .run_simulations(&mut lineup(), 30, &RunOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        SimError::UnknownPlayer { rotation: 0, player } if player == PlayerId::new(77)
    ));
}

#[test]
fn test_missing_player_breaks_join() {
    let err = scripted(2, Misbehaviour::DropPlayer)
        .run_simulations(&mut lineup(), 30, &RunOptions::default())
        .unwrap_err();

    // Rotation 1 seats 2, 3, 1 and drops the last one.
    assert!(matches!(
        err,
        SimError::MissingPlayer { rotation: 1, player } if player == PlayerId::new(1)
    ));
}

#[test]
fn test_lost_games_break_win_total() {
    let err = scripted(1, Misbehaviour::LoseGames)
        .run_simulations(&mut lineup(), 30, &RunOptions::default())
        .unwrap_err();

    assert!(matches!(err, SimError::WinTotalMismatch { wins: 20, games: 30 }));
}

#[test]
fn test_action_logs_written_per_rotation() {
    let dir = unique_temp_dir("rotation-logs");
    let options = RunOptions::new().with_action_log(ActionLogTarget::new(&dir));

    standard(SimulationConfig::default())
        .run_simulations(&mut lineup(), 30, &options)
        .unwrap();

    for rotation in 1..=3 {
        let path = dir.join(format!("GameActions_Player{rotation}First.csv"));
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();

        assert_eq!(
            lines[0],
            "game,turn,player_id,player_name,strategy,start,roll,chosen,end,won"
        );
        let first_mover = lines[1].split(',').nth(2).unwrap();
        assert_eq!(first_mover, rotation.to_string());
        let wins = lines.iter().filter(|l| l.ends_with(",true")).count();
        assert_eq!(wins, 10);
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_unwritable_action_log_fails_rotation() {
    let dir = std::env::temp_dir().join(format!("chutes-sim-missing-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let options = RunOptions::new().with_action_log(ActionLogTarget::new(&dir));

    let err = standard(SimulationConfig::default())
        .run_simulations(&mut lineup(), 30, &options)
        .unwrap_err();

    assert_eq!(err.rotation(), Some(0));
    match err {
        SimError::Rotation { source, .. } => {
            assert!(matches!(*source, SimError::ActionLog { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}
