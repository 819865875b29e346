//! Pursuit episode runner.
//!
//! Plays batches of three-agent pursuit episodes on grid files, with one
//! agent searching via MCTS and the other two following the greedy
//! heuristic. Each episode's trajectory is saved as CSV and a JSON summary
//! collects scores across the batch.

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use pursuit_arena::{
    load_grid, render_frame, write_trajectory_csv, Episode, EpisodeConfig, EpisodeOutcome, GreedyPlanner,
    Termination, AGENTS,
};
use pursuit_core::{Grid, Planner, Position};
use pursuit_mcts::{MctsConfig, MctsPlanner};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Three-agent grid pursuit with MCTS planning.
#[derive(Parser)]
#[command(name = "pursuit")]
#[command(about = "Run pursuit episodes and inspect MCTS decisions")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play episodes on one or more grids and save their trajectories.
    Run(RunArgs),

    /// Run a single search and print the root statistics.
    Plan(PlanArgs),
}

#[derive(Args, Clone, Debug)]
struct RunArgs {
    /// Grid files to play on.
    #[arg(short, long, required = true, num_args = 1..)]
    grid: Vec<PathBuf>,

    /// Episodes per grid.
    #[arg(short, long, default_value = "5")]
    runs: usize,

    /// MCTS iterations per decision.
    #[arg(short, long, default_value = "200")]
    iterations: usize,

    /// Maximum joint steps in a rollout.
    #[arg(long, default_value = "20")]
    rollout_depth: usize,

    /// UCT exploration constant.
    #[arg(long, default_value = "1.4")]
    exploration: f32,

    /// Maximum recorded frames per episode, the initial one included.
    #[arg(long, default_value = "1000")]
    max_steps: usize,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output directory for trajectories and the summary.
    #[arg(short, long, default_value = "data/trajectories")]
    output: PathBuf,

    /// Which agent (0 = A, 1 = B, 2 = C) plans with MCTS.
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..3))]
    mcts_agent: u8,

    /// Print the final frame of every episode.
    #[arg(long)]
    render: bool,
}

#[derive(Args, Clone, Debug)]
struct PlanArgs {
    /// Grid file.
    #[arg(short, long)]
    grid: PathBuf,

    /// Position of the planning agent, as `row,col`.
    #[arg(long)]
    me: Position,

    /// Position of the agent being chased.
    #[arg(long)]
    target: Position,

    /// Position of the agent chasing us.
    #[arg(long)]
    threat: Position,

    /// MCTS iterations.
    #[arg(short, long, default_value = "200")]
    iterations: usize,

    /// UCT exploration constant.
    #[arg(long, default_value = "1.4")]
    exploration: f32,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// One played episode.
#[derive(Serialize, Debug)]
struct EpisodeSummary {
    grid: String,
    run: usize,
    seed: u64,
    termination: Termination,
    scores: [u32; AGENTS],
    steps: usize,
    trajectory: String,
}

/// Everything written to `summary.json`.
#[derive(Serialize, Debug)]
struct RunSummary {
    mcts_agent: usize,
    mcts: MctsConfig,
    episode: EpisodeConfig,
    totals: [u32; AGENTS],
    episodes: Vec<EpisodeSummary>,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

/// Name used for a grid's output files: its file stem.
fn grid_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grid".to_string())
}

/// Build the agents with MCTS in slot `mcts_agent` and greedy elsewhere.
fn build_agents(mcts_agent: usize, config: &MctsConfig, seed: u64) -> [Box<dyn Planner>; AGENTS] {
    std::array::from_fn(|i| -> Box<dyn Planner> {
        if i == mcts_agent {
            Box::new(MctsPlanner::new(
                config.clone(),
                ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            ))
        } else {
            Box::new(GreedyPlanner)
        }
    })
}

/// Play one episode from a fresh seeded placement.
fn play_episode(
    grid: &Grid,
    mcts_agent: usize,
    mcts: &MctsConfig,
    episode: &EpisodeConfig,
    seed: u64,
) -> Result<EpisodeOutcome> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let agents = build_agents(mcts_agent, mcts, seed);
    let outcome = Episode::new(grid, agents, episode.clone()).run(&mut rng)?;
    Ok(outcome)
}

/// Run the run command, returning the summary that was written.
fn cmd_run(args: &RunArgs) -> Result<RunSummary> {
    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output directory: {:?}", args.output))?;

    let grids = args
        .grid
        .iter()
        .map(|path| -> Result<(String, Grid)> {
            let grid = load_grid(path).with_context(|| format!("Failed to load grid from {:?}", path))?;
            Ok((grid_name(path), grid))
        })
        .collect::<Result<Vec<_>>>()?;

    let mcts = MctsConfig::with_iterations(args.iterations)
        .rollout_depth(args.rollout_depth)
        .exploration(args.exploration);
    let episode = EpisodeConfig::with_max_steps(args.max_steps);
    let mcts_agent = args.mcts_agent as usize;

    println!(
        "Playing {} grids x {} runs with {} iterations/decision (MCTS agent: {})",
        grids.len(),
        args.runs,
        args.iterations,
        ['A', 'B', 'C'][mcts_agent]
    );
    println!("Output directory: {:?}", args.output);
    println!("Seed: {}", args.seed);

    let start = Instant::now();

    let jobs: Vec<(usize, usize)> = (0..grids.len())
        .flat_map(|g| (0..args.runs).map(move |run| (g, run)))
        .collect();

    let outcomes: Vec<(usize, usize, u64, EpisodeOutcome)> = jobs
        .into_par_iter()
        .enumerate()
        .map(|(i, (g, run))| -> Result<(usize, usize, u64, EpisodeOutcome)> {
            let seed = args.seed.wrapping_add(i as u64 * 1000);
            let (name, grid) = &grids[g];
            let outcome = play_episode(grid, mcts_agent, &mcts, &episode, seed)
                .with_context(|| format!("Episode {} on grid {} failed", run, name))?;
            Ok((g, run, seed, outcome))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut episodes = Vec::with_capacity(outcomes.len());
    let mut totals = [0u32; AGENTS];

    for (g, run, seed, outcome) in outcomes {
        let (name, grid) = &grids[g];
        let filename = format!("{}_{}.csv", name, run);
        let path = args.output.join(&filename);
        write_trajectory_csv(&path, &outcome.trajectory)
            .with_context(|| format!("Failed to write trajectory: {:?}", path))?;

        println!(
            "Grid {}, Run {}: {:?} after {} steps, scores {:?}",
            name, run, outcome.termination, outcome.steps, outcome.scores
        );
        if args.render {
            if let Some(last) = outcome.trajectory.last() {
                println!("{}", render_frame(grid, last));
            }
        }

        for (total, score) in totals.iter_mut().zip(outcome.scores) {
            *total += score;
        }
        episodes.push(EpisodeSummary {
            grid: name.clone(),
            run,
            seed,
            termination: outcome.termination,
            scores: outcome.scores,
            steps: outcome.steps,
            trajectory: filename,
        });
    }

    let summary = RunSummary {
        mcts_agent,
        mcts,
        episode,
        totals,
        episodes,
    };

    let summary_path = args.output.join("summary.json");
    let file =
        File::create(&summary_path).with_context(|| format!("Failed to create file: {:?}", summary_path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summary)
        .with_context(|| format!("Failed to write summary: {:?}", summary_path))?;

    let elapsed = start.elapsed();
    info!(episodes = summary.episodes.len(), elapsed_s = elapsed.as_secs_f64(), "run complete");

    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!("Episodes played: {}", summary.episodes.len());
    println!("Total scores: A {} / B {} / C {}", totals[0], totals[1], totals[2]);
    println!("Files saved to: {:?}", args.output);

    Ok(summary)
}

/// Run the plan command.
fn cmd_plan(args: &PlanArgs) -> Result<()> {
    let grid = load_grid(&args.grid).with_context(|| format!("Failed to load grid from {:?}", args.grid))?;
    for (label, pos) in [("me", args.me), ("target", args.target), ("threat", args.threat)] {
        ensure!(grid.in_bounds(pos), "{} position {} is outside the {}x{} grid", label, pos, grid.rows(), grid.cols());
    }

    let config = MctsConfig::with_iterations(args.iterations).exploration(args.exploration);
    let mut planner = MctsPlanner::new(config, ChaCha8Rng::seed_from_u64(args.seed));
    let result = planner.search(&grid, args.me, args.target, args.threat);

    println!("Best action: {}", result.best_action);
    if let Some(action) = result.most_visited() {
        println!("Most visited: {}", action);
    }
    println!("Root visits: {}, value {:.3}, tree size {}", result.root_visits, result.root_value, result.tree_size);
    println!("\n{:<12} {:>8} {:>10}", "action", "visits", "mean");
    for child in &result.children {
        println!("{:<12} {:>8} {:>10.3}", child.action.to_string(), child.visits, child.mean_value);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Run(args) => cmd_run(&args).map(|_| ()),
        Commands::Plan(args) => cmd_plan(&args),
    }
}
