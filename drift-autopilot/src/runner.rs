use crate::bots::{create_bot, AutopilotBot};
use anyhow::{anyhow, Context, Result};
use drift_core::input::Key;
use drift_core::render::NullSurface;
use drift_core::replay::HeadlessHost;
use drift_core::{replay, KeyScript, LoopState, ReplayConfig, World};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub bot_id: String,
    pub seed: u32,
    pub max_frames: u32,
    pub frame_count: u32,
    pub survived_s: f64,
    pub halted: bool,
    pub shots_fired: u32,
    pub key_presses: u32,
    pub thrust_presses: u32,
    pub fire_presses: u32,
}

#[derive(Clone, Debug)]
pub struct RunArtifact {
    pub metrics: RunMetrics,
    pub script: KeyScript,
}

pub fn run_bot(bot_id: &str, config: &ReplayConfig) -> Result<RunArtifact> {
    let mut bot = create_bot(bot_id).ok_or_else(|| anyhow!("unknown bot '{bot_id}'"))?;
    run_bot_instance(bot.as_mut(), config)
}

/// Plays one game with `bot` at the keyboard, records every press as a key
/// script and checks that replaying the script reproduces the run.
pub fn run_bot_instance(bot: &mut dyn AutopilotBot, config: &ReplayConfig) -> Result<RunArtifact> {
    config
        .validate()
        .map_err(|err| anyhow!("invalid run config: {err}"))?;
    bot.reset(config.seed);

    let mut host = HeadlessHost::new(
        World::generate(config.seed),
        config.viewport,
        config.frame_ms,
        NullSurface::default(),
    );
    host.world()
        .validate_invariants()
        .map_err(|rule| anyhow!("initial invariant failure: {rule}"))?;

    let mut script = KeyScript::new();
    let mut key_presses = 0u32;
    let mut thrust_presses = 0u32;
    let mut fire_presses = 0u32;

    while host.next_frame() < config.max_frames && host.state() == LoopState::Running {
        let frame = host.next_frame();
        let keys = bot.next_keys(host.world(), config.viewport);
        for key in keys {
            key_presses += 1;
            if key.is_directional() {
                thrust_presses += 1;
            } else {
                fire_presses += 1;
            }
            script.push(frame, key.identifier());
            host.input_mut().push(key);
        }
        if host.step().is_none() {
            break;
        }
    }

    let live = host.result(config.seed);
    let replayed = replay(config, &script).context("recorded script failed to replay")?;
    if replayed != live {
        return Err(anyhow!(
            "replay diverged for bot={} seed={:#x}: live frames={} replay frames={}",
            bot.id(),
            config.seed,
            live.frame_count,
            replayed.frame_count
        ));
    }

    tracing::debug!(
        bot = bot.id(),
        seed = config.seed,
        frames = live.frame_count,
        halted = live.halted,
        "run finished"
    );

    Ok(RunArtifact {
        metrics: RunMetrics {
            bot_id: bot.id().to_string(),
            seed: config.seed,
            max_frames: config.max_frames,
            frame_count: live.frame_count,
            survived_s: f64::from(live.frame_count) * config.frame_ms / 1000.0,
            halted: live.halted,
            shots_fired: live.shots_fired,
            key_presses,
            thrust_presses,
            fire_presses,
        },
        script,
    })
}

/// Replays a recorded script and reports it in the same shape as a bot run.
pub fn run_script(script: &KeyScript, config: &ReplayConfig) -> Result<RunMetrics> {
    let result = replay(config, script).context("script replay failed")?;

    let mut key_presses = 0u32;
    let mut thrust_presses = 0u32;
    let mut fire_presses = 0u32;
    for event in script
        .events
        .iter()
        .filter(|event| event.frame < result.frame_count)
    {
        match Key::from_identifier(&event.key) {
            Some(Key::Fire) => fire_presses += 1,
            Some(_) => thrust_presses += 1,
            None => continue,
        }
        key_presses += 1;
    }

    Ok(RunMetrics {
        bot_id: "script".to_string(),
        seed: config.seed,
        max_frames: config.max_frames,
        frame_count: result.frame_count,
        survived_s: f64::from(result.frame_count) * config.frame_ms / 1000.0,
        halted: result.halted,
        shots_fired: result.shots_fired,
        key_presses,
        thrust_presses,
        fire_presses,
    })
}
