use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use drift_autopilot::benchmark::{resolve_bots, run_benchmark, BenchmarkConfig};
use drift_autopilot::bots::{bot_ids, create_bot, describe_bots};
use drift_autopilot::config::RunnerDefaults;
use drift_autopilot::runner::{run_bot, run_script, RunMetrics};
use drift_autopilot::util::{parse_seed, parse_seed_csv, seed_range, seed_to_hex, write_bytes};
use drift_core::replay::HeadlessHost;
use drift_core::{
    replay_with_checkpoints, KeyScript, RecordingSurface, ReplayConfig, Viewport, World,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(name = "drift-autopilot")]
#[command(about = "Headless runner, replayer and benchmark lab for Asteroid Drift")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the environment-derived run settings.
#[derive(clap::Args, Debug, Clone, Copy)]
struct RunFlags {
    #[arg(long)]
    max_frames: Option<u32>,
    #[arg(long)]
    frame_ms: Option<f64>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available bots
    ListBots,
    /// Play one game headlessly with a bot or a recorded key script
    Run {
        #[arg(long, conflicts_with = "script", required_unless_present = "script")]
        bot: Option<String>,
        #[arg(long)]
        script: Option<PathBuf>,
        #[arg(long, default_value = "0xDEADBEEF")]
        seed: String,
        #[command(flatten)]
        flags: RunFlags,
        /// Write run metrics as JSON
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write the bot's recorded key script as JSON
        #[arg(long)]
        save_script: Option<PathBuf>,
    },
    /// Replay a key script and print checkpoints as JSON
    Replay {
        #[arg(long)]
        script: PathBuf,
        #[arg(long, default_value = "0xDEADBEEF")]
        seed: String,
        #[arg(long, default_value_t = 60)]
        every: u32,
        #[command(flatten)]
        flags: RunFlags,
    },
    /// Advance a world with no input and print the last frame's draw list
    Draw {
        #[arg(long, default_value = "0xDEADBEEF")]
        seed: String,
        #[arg(long, default_value_t = 1)]
        frames: u32,
        #[command(flatten)]
        flags: RunFlags,
    },
    /// Run every bot on every seed and write summary.json, runs.csv and rankings.csv
    Benchmark {
        #[arg(long)]
        bots: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[command(flatten)]
        flags: RunFlags,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let Cli { command } = Cli::parse();
    let defaults = RunnerDefaults::from_env();

    match command {
        Commands::ListBots => {
            for (id, description) in describe_bots() {
                println!("{id:10} {description}");
            }
        }
        Commands::Run {
            bot,
            script,
            seed,
            flags,
            output,
            save_script,
        } => {
            let config = run_config(&defaults, flags, parse_seed(&seed)?)?;
            let metrics = match (bot, script) {
                (Some(bot), _) => {
                    if create_bot(&bot).is_none() {
                        let available = bot_ids().join(", ");
                        return Err(anyhow!("unknown bot '{bot}'. available: {available}"));
                    }
                    let artifact = run_bot(&bot, &config)?;
                    if let Some(path) = save_script {
                        write_json(&path, &artifact.script)?;
                        println!("script={}", path.display());
                    }
                    artifact.metrics
                }
                (None, Some(path)) => run_script(&read_script(&path)?, &config)?,
                (None, None) => return Err(anyhow!("run requires --bot or --script")),
            };

            print_metrics(&metrics);
            if let Some(path) = output {
                write_json(&path, &metrics)?;
                println!("output={}", path.display());
            }
        }
        Commands::Replay {
            script,
            seed,
            every,
            flags,
        } => {
            let config = run_config(&defaults, flags, parse_seed(&seed)?)?;
            let script = read_script(&script)?;
            let checkpoints = replay_with_checkpoints(&config, &script, every)
                .context("checkpoint replay failed")?;
            println!("{}", serde_json::to_string_pretty(&checkpoints)?);
        }
        Commands::Draw {
            seed,
            frames,
            flags,
        } => {
            let config = run_config(&defaults, flags, parse_seed(&seed)?)?;
            let mut host = HeadlessHost::new(
                World::generate(config.seed),
                config.viewport,
                config.frame_ms,
                RecordingSurface::new(),
            );
            for _ in 0..frames.max(1) {
                if host.step().is_none() {
                    break;
                }
            }
            tracing::info!(
                frame = host.next_frame(),
                state = ?host.state(),
                "draw list captured"
            );
            println!("{}", serde_json::to_string_pretty(host.surface().commands())?);
        }
        Commands::Benchmark {
            bots,
            seeds,
            seed_start,
            seed_count,
            flags,
            out_dir,
            jobs,
        } => {
            let bots = resolve_bots(bots.as_deref())?;
            let seeds = resolve_seeds(seeds.as_deref(), seed_start.as_deref(), seed_count)?;
            let run = run_config(&defaults, flags, 0)?;
            let out_dir = out_dir
                .unwrap_or_else(|| PathBuf::from(format!("benchmarks/{}", timestamp_suffix())));

            let report = run_benchmark(BenchmarkConfig {
                bots,
                seeds,
                run,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            println!("runs={}", report.run_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("out_dir={}", out_dir.display());
            println!("rankings:");
            for (idx, bot) in report.bot_rankings.iter().enumerate() {
                println!(
                    "  {}. {}  avg_frames={:.1} min={} max={} survival={:.0}% avg_shots={:.1}",
                    idx + 1,
                    bot.bot_id,
                    bot.avg_frames,
                    bot.min_frames,
                    bot.max_frames,
                    bot.survival_rate * 100.0,
                    bot.avg_shots_fired,
                );
            }
        }
    }

    Ok(())
}

fn run_config(defaults: &RunnerDefaults, flags: RunFlags, seed: u32) -> Result<ReplayConfig> {
    let config = ReplayConfig {
        seed,
        max_frames: flags.max_frames.unwrap_or(defaults.max_frames),
        frame_ms: flags.frame_ms.unwrap_or(defaults.frame_ms),
        viewport: Viewport::new(
            flags.width.unwrap_or(defaults.viewport.width),
            flags.height.unwrap_or(defaults.viewport.height),
        ),
    };
    config
        .validate()
        .map_err(|err| anyhow!("invalid run settings: {err}"))?;
    Ok(config)
}

fn resolve_seeds(
    seeds: Option<&str>,
    seed_start: Option<&str>,
    seed_count: u32,
) -> Result<Vec<u32>> {
    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }
    let start = match seed_start {
        Some(start) => parse_seed(start)?,
        None => 1,
    };
    if seed_count == 0 {
        return Err(anyhow!("--seed-count must be >= 1"));
    }
    Ok(seed_range(start, seed_count))
}

fn read_script(path: &Path) -> Result<KeyScript> {
    let bytes = fs::read(path).with_context(|| format!("failed reading {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed parsing key script {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let encoded = serde_json::to_vec_pretty(value).context("failed to serialize json")?;
    write_bytes(path, &encoded)
}

fn print_metrics(metrics: &RunMetrics) {
    println!("bot={}", metrics.bot_id);
    println!("seed={}", seed_to_hex(metrics.seed));
    println!("frames={}", metrics.frame_count);
    println!("survived_s={:.2}", metrics.survived_s);
    println!("halted={}", metrics.halted);
    println!("shots_fired={}", metrics.shots_fired);
    println!("key_presses={}", metrics.key_presses);
}

fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}
