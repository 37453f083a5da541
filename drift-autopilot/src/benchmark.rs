use crate::bots::bot_ids;
use crate::runner::{run_bot, RunMetrics};
use crate::util::{seed_to_hex, write_bytes};
use anyhow::{anyhow, Context, Result};
use drift_core::ReplayConfig;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub bots: Vec<String>,
    pub seeds: Vec<u32>,
    /// Template for every run; the seed is replaced per run.
    pub run: ReplayConfig,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunRecord {
    pub bot_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub frame_count: u32,
    pub survived_s: f64,
    pub halted: bool,
    pub shots_fired: u32,
    pub key_presses: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct BotAggregate {
    pub bot_id: String,
    pub runs: usize,
    pub avg_frames: f64,
    pub min_frames: u32,
    pub max_frames: u32,
    pub survival_rate: f64,
    pub avg_shots_fired: f64,
    pub avg_key_presses: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_frames: u32,
    pub frame_ms: f64,
    pub jobs: Option<usize>,
    pub bots: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub bot_rankings: Vec<BotAggregate>,
    pub runs: Vec<RunRecord>,
}

pub fn resolve_bots(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(bot_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let bots: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            if bots.is_empty() {
                return Err(anyhow!("--bots resolved to empty list"));
            }
            Ok(bots)
        }
    }
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.bots.is_empty() {
        return Err(anyhow!("benchmark requires at least one bot"));
    }
    if config.jobs == Some(0) {
        return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
    }

    let run_jobs: Vec<(String, u32)> = config
        .bots
        .iter()
        .flat_map(|bot| config.seeds.iter().map(move |seed| (bot.clone(), *seed)))
        .collect();

    let run_one = |(bot_id, seed): &(String, u32)| -> Result<RunMetrics> {
        let run = ReplayConfig {
            seed: *seed,
            ..config.run
        };
        run_bot(bot_id, &run)
            .map(|artifact| artifact.metrics)
            .with_context(|| format!("benchmark run failed for bot={bot_id} seed={seed:#x}"))
    };

    let run_results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let runs = run_results.into_iter().collect::<Result<Vec<_>>>()?;
    tracing::info!(runs = runs.len(), "benchmark runs complete");

    let mut grouped: HashMap<&str, Vec<&RunMetrics>> = HashMap::new();
    for run in &runs {
        grouped.entry(run.bot_id.as_str()).or_default().push(run);
    }

    let mut rankings: Vec<BotAggregate> = grouped
        .into_iter()
        .map(|(bot_id, bot_runs)| aggregate(bot_id, &bot_runs))
        .collect();
    rankings.sort_by(|a, b| {
        b.avg_frames
            .total_cmp(&a.avg_frames)
            .then_with(|| b.survival_rate.total_cmp(&a.survival_rate))
            .then_with(|| a.bot_id.cmp(&b.bot_id))
    });

    let mut run_records: Vec<RunRecord> = runs
        .iter()
        .map(|run| RunRecord {
            bot_id: run.bot_id.clone(),
            seed: run.seed,
            seed_hex: seed_to_hex(run.seed),
            frame_count: run.frame_count,
            survived_s: run.survived_s,
            halted: run.halted,
            shots_fired: run.shots_fired,
            key_presses: run.key_presses,
        })
        .collect();
    run_records.sort_by(|a, b| {
        b.frame_count
            .cmp(&a.frame_count)
            .then_with(|| a.bot_id.cmp(&b.bot_id))
            .then_with(|| a.seed.cmp(&b.seed))
    });

    write_runs_csv(&config.out_dir.join("runs.csv"), &run_records)?;
    write_rankings_csv(&config.out_dir.join("rankings.csv"), &rankings)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_frames: config.run.max_frames,
        frame_ms: config.run.frame_ms,
        jobs: config.jobs,
        bots: config.bots,
        seeds: config.seeds,
        run_count: run_records.len(),
        bot_rankings: rankings,
        runs: run_records,
    };

    let report_path = config.out_dir.join("summary.json");
    write_bytes(
        &report_path,
        &serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )?;

    Ok(report)
}

fn aggregate(bot_id: &str, runs: &[&RunMetrics]) -> BotAggregate {
    let count = runs.len();
    let sum_frames: u64 = runs.iter().map(|r| u64::from(r.frame_count)).sum();
    let sum_shots: u64 = runs.iter().map(|r| u64::from(r.shots_fired)).sum();
    let sum_keys: u64 = runs.iter().map(|r| u64::from(r.key_presses)).sum();
    let survived = runs.iter().filter(|r| !r.halted).count();

    BotAggregate {
        bot_id: bot_id.to_string(),
        runs: count,
        avg_frames: sum_frames as f64 / count as f64,
        min_frames: runs.iter().map(|r| r.frame_count).min().unwrap_or_default(),
        max_frames: runs.iter().map(|r| r.frame_count).max().unwrap_or_default(),
        survival_rate: survived as f64 / count as f64,
        avg_shots_fired: sum_shots as f64 / count as f64,
        avg_key_presses: sum_keys as f64 / count as f64,
    }
}

fn write_runs_csv(path: &Path, runs: &[RunRecord]) -> Result<()> {
    let mut csv =
        String::from("bot_id,seed,frame_count,survived_s,halted,shots_fired,key_presses\n");
    for run in runs {
        csv.push_str(&format!(
            "{},{},{},{:.3},{},{},{}\n",
            run.bot_id,
            run.seed_hex,
            run.frame_count,
            run.survived_s,
            run.halted,
            run.shots_fired,
            run.key_presses
        ));
    }
    write_bytes(path, csv.as_bytes())
}

fn write_rankings_csv(path: &Path, rankings: &[BotAggregate]) -> Result<()> {
    let mut csv = String::from(
        "rank,bot_id,runs,avg_frames,min_frames,max_frames,survival_rate,avg_shots_fired\n",
    );
    for (idx, row) in rankings.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{:.2},{},{},{:.3},{:.2}\n",
            idx + 1,
            row.bot_id,
            row.runs,
            row.avg_frames,
            row.min_frames,
            row.max_frames,
            row.survival_rate,
            row.avg_shots_fired
        ));
    }
    write_bytes(path, csv.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bot_id: &str, seed: u32, frame_count: u32, halted: bool) -> RunRecord {
        RunRecord {
            bot_id: bot_id.to_string(),
            seed,
            seed_hex: seed_to_hex(seed),
            frame_count,
            survived_s: f64::from(frame_count) / 60.0,
            halted,
            shots_fired: 3,
            key_presses: 7,
        }
    }

    #[test]
    fn csv_writers_emit_one_line_per_row() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let runs = [record("evader", 1, 600, false), record("idle", 2, 120, true)];
        let runs_path = tmp.path().join("runs.csv");
        write_runs_csv(&runs_path, &runs)?;

        let runs_csv = std::fs::read_to_string(&runs_path)?;
        let lines: Vec<&str> = runs_csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "evader,0x00000001,600,10.000,false,3,7");
        assert_eq!(lines[2], "idle,0x00000002,120,2.000,true,3,7");
        assert!(runs_csv.ends_with('\n'));

        let metrics = RunMetrics {
            bot_id: "gunner".to_string(),
            seed: 5,
            max_frames: 600,
            frame_count: 300,
            survived_s: 5.0,
            halted: true,
            shots_fired: 25,
            key_presses: 50,
            thrust_presses: 25,
            fire_presses: 25,
        };
        let rankings = [aggregate("gunner", &[&metrics])];
        let rankings_path = tmp.path().join("rankings.csv");
        write_rankings_csv(&rankings_path, &rankings)?;

        let rankings_csv = std::fs::read_to_string(&rankings_path)?;
        let lines: Vec<&str> = rankings_csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1,gunner,1,300.00,300,300,0.000,25.00");
        Ok(())
    }

    #[test]
    fn bot_list_defaults_to_every_bot() -> Result<()> {
        assert_eq!(resolve_bots(None)?.len(), bot_ids().len());
        assert_eq!(resolve_bots(Some(" idle, ,evader "))?, vec!["idle", "evader"]);
        assert!(resolve_bots(Some(" , ")).is_err());
        Ok(())
    }
}
