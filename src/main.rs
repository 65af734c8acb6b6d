// src/main.rs
//
// Research-harness CLI entrypoint for recsim.
//
// Runs a fixed top-k policy (recommend the first n_rec visible positions)
// against the simulated population for a given number of steps, optionally
// writing per-step JSONL telemetry. Deterministic given --seed.

use clap::{ArgAction, Parser};

use recsim::config::{Config, UserMode};
use recsim::env::RecEnv;
use recsim::logging::{JsonlSink, NoopSink, StepSink};

#[derive(Debug, Parser)]
#[command(
    name = "recsim",
    about = "Synthetic recommendation-loop simulator (research harness)",
    version
)]
struct Args {
    /// Number of steps to run.
    #[arg(long, default_value_t = 1000)]
    steps: u64,

    /// Number of users.
    #[arg(long, default_value_t = 10)]
    users: usize,

    /// Number of items.
    #[arg(long, default_value_t = 50)]
    items: usize,

    /// Recommendation slots per step (and item cluster count).
    #[arg(long, default_value_t = 4)]
    rec: usize,

    /// Embedding dimensionality.
    #[arg(long, default_value_t = 2)]
    dim: usize,

    /// Probability of switching the active user each step.
    #[arg(long, default_value_t = 0.1)]
    change_prob: f64,

    /// Reward-noise standard deviation.
    #[arg(long, default_value_t = 0.1)]
    noise: f64,

    /// Enable AR(1) preference drift for the active user.
    #[arg(long)]
    drift: bool,

    /// Deterministic seed for the shared random stream.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write per-step JSONL telemetry to this path.
    #[arg(long)]
    log: Option<String>,

    /// Verbosity: -v, -vv
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        n_users: args.users,
        n_items: args.items,
        n_rec: args.rec,
        embedding_dimension: args.dim,
        user_change_prob: args.change_prob,
        reward_noise: args.noise,
        seed: args.seed,
        user_mode: if args.drift {
            UserMode::Drifting
        } else {
            UserMode::Static
        },
        ..Config::default()
    };

    let mut env = RecEnv::new(config)?;

    let mut sink: Box<dyn StepSink> = match &args.log {
        Some(path) => Box::new(JsonlSink::create(path)?),
        None => Box::new(NoopSink),
    };

    eprintln!(
        "recsim_run users={} items={} rec={} dim={} change_prob={} noise={} drift={} seed={} steps={}",
        args.users,
        args.items,
        args.rec,
        args.dim,
        args.change_prob,
        args.noise,
        args.drift,
        args.seed,
        args.steps,
    );

    let mut total_clicks = 0.0;
    let mut total_recs = 0u64;
    let mut observation = env.reset();

    for step in 0..args.steps {
        let k = args.rec.min(observation.n_visible());
        let action: Vec<usize> = (0..k).collect();
        let result = env.step(&action)?;

        total_clicks += result.reward;
        total_recs += k as u64;
        if let Some(interaction) = env.log().interactions().last() {
            sink.log_step(interaction, result.reward);
        }
        if args.verbose > 0 {
            eprintln!(
                "step={} t={} active_user={} reward={} n_visible={}",
                step, result.info.t, result.info.active_user, result.reward, result.info.n_visible,
            );
        }
        observation = result.observation;
    }

    let click_rate = if total_recs > 0 {
        total_clicks / total_recs as f64
    } else {
        0.0
    };
    println!(
        "steps={} total_clicks={} click_rate={:.4} final_active_user={} log_entries={}",
        args.steps,
        total_clicks,
        click_rate,
        env.active_user(),
        env.log().len(),
    );

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("recsim: {err}");
        std::process::exit(1);
    }
}
