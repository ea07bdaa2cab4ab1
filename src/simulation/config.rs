//! Simulation configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::board::Square;
use crate::core::ConfigError;

/// How the total execution budget is split across rotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharePolicy {
    /// Every rotation plays `round(total / rotations)` games.
    ///
    /// The executed total can differ from the request by up to half a game
    /// per rotation.
    #[default]
    Rounded,
    /// Remainder games go one each to the earliest rotations, so the executed
    /// total always equals the request.
    Exact,
}

impl SharePolicy {
    /// Per-rotation game counts for `total` games over `rotations` rotations.
    #[must_use]
    pub fn shares(self, total: u64, rotations: usize) -> Vec<u64> {
        if rotations == 0 {
            return Vec::new();
        }
        let count = rotations as u64;

        match self {
            SharePolicy::Rounded => {
                let share = (total as f64 / count as f64).round() as u64;
                vec![share; rotations]
            }
            SharePolicy::Exact => {
                let base = total / count;
                let remainder = total % count;
                (0..count)
                    .map(|i| if i < remainder { base + 1 } else { base })
                    .collect()
            }
        }
    }
}

/// Batch-level simulation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Root seed; every rotation forks its own stream from it.
    pub seed: u64,

    /// Worker threads for the batch pool (0 = rayon default).
    pub worker_threads: usize,

    /// How games are split across rotations.
    pub share_policy: SharePolicy,

    /// Moves after which a game is considered stalled.
    pub max_turns_per_game: u32,

    /// Highest square a player may start on.
    pub max_starting_square: Square,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            worker_threads: 0,
            share_policy: SharePolicy::Rounded,
            max_turns_per_game: 10_000,
            max_starting_square: 25,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    pub fn with_share_policy(mut self, policy: SharePolicy) -> Self {
        self.share_policy = policy;
        self
    }

    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns_per_game = turns;
        self
    }

    pub fn with_max_starting_square(mut self, square: Square) -> Self {
        self.max_starting_square = square;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns_per_game == 0 {
            return Err(ConfigError::ZeroTurnLimit);
        }
        Ok(())
    }
}

/// Where per-rotation action logs are written.
///
/// `pattern` must contain `{rotation}`, replaced by the 1-based rotation
/// number, so no two rotations share a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogTarget {
    pub directory: PathBuf,
    pub pattern: String,
}

impl ActionLogTarget {
    pub const DEFAULT_PATTERN: &'static str = "GameActions_Player{rotation}First.csv";
    const PLACEHOLDER: &'static str = "{rotation}";

    /// Log into `directory` with the default file pattern.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            pattern: Self::DEFAULT_PATTERN.to_string(),
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.contains(Self::PLACEHOLDER) {
            Ok(())
        } else {
            Err(ConfigError::ActionLogPattern(self.pattern.clone()))
        }
    }

    /// File for a 0-based rotation index.
    #[must_use]
    pub fn path_for(&self, rotation: usize) -> PathBuf {
        let file = self
            .pattern
            .replace(Self::PLACEHOLDER, &(rotation + 1).to_string());
        self.directory.join(file)
    }
}

/// Per-call options for `run_simulations`.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Print the plain-text report to stdout when the batch completes.
    pub emit_report: bool,

    /// Write one CSV action log per rotation.
    pub action_log: Option<ActionLogTarget>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_report(mut self) -> Self {
        self.emit_report = true;
        self
    }

    #[must_use]
    pub fn with_action_log(mut self, target: ActionLogTarget) -> Self {
        self.action_log = Some(target);
        self
    }
}
