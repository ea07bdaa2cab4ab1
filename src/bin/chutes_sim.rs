use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use chutes_sim::board::Board;
use chutes_sim::core::{Player, PlayerId};
use chutes_sim::simulation::{
    ActionLogTarget, RunOptions, SharePolicy, SimulationCollection, SimulationConfig,
};
use chutes_sim::strategy::{best_found, GreedyStrategy, LinearStrategy, RuleSet, RuleTable};

#[derive(Debug, Parser)]
#[command(name = "chutes-sim", version)]
#[command(about = "Compare chutes and ladders strategies over many simulated games")]
struct Args {
    /// Total number of games to play
    #[arg(long, default_value_t = 100_000)]
    games: u64,

    /// Root seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads, 0 for one per core (overrides the config file)
    #[arg(long)]
    threads: Option<usize>,

    /// Split games exactly instead of rounding each rotation's share
    #[arg(long)]
    exact_shares: bool,

    /// JSON simulation config
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON rule set replacing the built-in best-found table
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Write one CSV move log per rotation into this directory
    #[arg(long)]
    action_log_dir: Option<PathBuf>,

    /// Print the aggregate as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Write the active rule set to this file and exit
    #[arg(long)]
    export_rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let board = Board::standard();
    let config = load_config(&args)?;
    let table = load_rules(&args, &board)?;

    if let Some(path) = &args.export_rules {
        let json = table.to_rule_set().to_json_pretty()?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {} rules to {}", table.len(), path.display());
        return Ok(());
    }

    let mut options = RunOptions::new();
    if !args.json {
        options = options.with_report();
    }
    if let Some(dir) = &args.action_log_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        options = options.with_action_log(ActionLogTarget::new(dir));
    }

    let mut players = vec![
        Player::new(PlayerId::new(1), "Player 1", GreedyStrategy),
        Player::new(PlayerId::new(2), "Player 2", LinearStrategy),
        Player::new(PlayerId::new(3), "Player 3", table),
    ];

    let collection = SimulationCollection::new(board, config);
    let result = collection
        .run_simulations(&mut players, args.games, &options)
        .context("simulation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SimulationConfig::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(threads) = args.threads {
        config = config.with_worker_threads(threads);
    }
    if args.exact_shares {
        config = config.with_share_policy(SharePolicy::Exact);
    }
    Ok(config)
}

fn load_rules(args: &Args, board: &Board) -> Result<RuleTable> {
    match &args.rules {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let set = RuleSet::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?;
            RuleTable::from_rule_set(&set, board)
                .with_context(|| format!("invalid rule in {}", path.display()))
        }
        None => Ok(best_found(board)?),
    }
}
