//! Catch the Egg headless driver
//!
//! Plays rounds with the autopilot at a fixed frame rate, rings audio cues on
//! the terminal bell and prints the leaderboard as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use catch_the_egg::highscores::HighScores;
use catch_the_egg::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use catch_the_egg::{AudioManager, QualityPreset, Settings};

/// Longest round we are willing to simulate (extra-time pickups extend rounds)
const MAX_ROUND_SECONDS: f32 = 600.0;

#[derive(Parser, Debug)]
#[command(name = "catch-the-egg", about = "Autopilot rounds of Catch the Egg")]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of rounds to play
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Particle quality (low, medium, high); overrides the settings file
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
    /// Do not ring the terminal bell
    #[arg(long)]
    quiet_audio: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    rounds: u32,
    high_score: u32,
    leaderboard: &'a HighScores,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.fps == 0 {
        bail!("--fps must be > 0");
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }

    let mut state = GameState::new(seed);
    let mut audio = if args.quiet_audio {
        AudioManager::disabled()
    } else {
        AudioManager::default()
    };
    settings.apply(&mut state, &mut audio);
    log::info!(
        "Seed {}, {} round(s) at {} fps, {} quality",
        seed,
        args.rounds,
        args.fps,
        settings.quality.as_str()
    );

    let dt = 1.0 / args.fps as f32;
    for round in 1..=args.rounds {
        play_round(&mut state, &mut audio, dt)
            .with_context(|| format!("round {} did not finish", round))?;
    }

    let summary = Summary {
        seed,
        rounds: args.rounds,
        high_score: state.high_score(),
        leaderboard: &state.high_scores,
    };
    let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
    println!("{}", json);
    Ok(())
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality '{}' (low, medium, high)", s))
}

/// Start a round from the menu/game over screen and autopilot it to the end
fn play_round(state: &mut GameState, audio: &mut AudioManager, dt: f32) -> Result<()> {
    let start = TickInput {
        confirm: true,
        ..Default::default()
    };
    tick(state, &start, dt);

    let steer = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let max_frames = (MAX_ROUND_SECONDS / dt) as u64;
    let mut frames = 0u64;
    while state.phase == GamePhase::Playing {
        if frames >= max_frames {
            bail!("still playing after {} frames", frames);
        }
        tick(state, &steer, dt);
        frames += 1;
        for event in state.drain_events() {
            report(&event);
            if let Some(effect) = event.sound() {
                audio.play(effect);
            }
        }
    }
    Ok(())
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::GameOver {
            score,
            new_high_score,
        } => log::info!("Game over with {} points (high score: {})", score, new_high_score),
        GameEvent::AirflowStarted { direction, strength } => {
            log::info!("Wind {} at {:.0}", if *direction < 0.0 { "left" } else { "right" }, strength)
        }
        other => log::debug!("{:?}", other),
    }
}
