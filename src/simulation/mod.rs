//! Batch simulation.
//!
//! - `config`: share policy, batch settings and per-call options
//! - `executor`: the [`GameExecutor`] seam and the standard game rules
//! - `orchestrator`: rotation planning, parallel dispatch and the join
//! - `results`: per-rotation and aggregate results, text report
//! - `action_log`: per-rotation CSV move log

pub mod action_log;
pub mod config;
pub mod executor;
pub mod orchestrator;
pub mod results;

pub use action_log::{ActionLog, MoveRecord};
pub use config::{ActionLogTarget, RunOptions, SharePolicy, SimulationConfig};
pub use executor::{GameExecutor, StandardExecutor};
pub use orchestrator::{rotation_order, SimulationCollection};
pub use results::{render_report, AggregateResult, BatchResult, PlayerTotal, RotationSummary};
