//! Hoop Shot headless runner
//!
//! Plays a scripted shooting session against the simulation and prints the
//! outcome of every shot. Useful for tuning: feed it a JSON tuning file and a
//! seed, and compare scoreboards.
//!
//! Usage:
//!   cargo run -- --seed 7 --shots 10 --tuning tuning.json --json

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use hoop_shot::Tuning;
use hoop_shot::consts::SIM_DT;
use hoop_shot::sim::{Action, FrameClock, GameState, SimEvent, TickInput, tick};

#[derive(Parser, Debug)]
#[command(about = "Run a scripted basketball shooting session", version)]
struct Args {
    /// RNG seed for aim error and bounce jitter
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// JSON tuning file (missing fields fall back to defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Number of shots to take
    #[arg(long, default_value_t = 5)]
    shots: u32,
    /// Frame limit per shot before giving up on the ball settling
    #[arg(long, default_value_t = 1200)]
    max_frames: u32,
    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut state = GameState::with_tuning(args.seed, tuning);
    let mut clock = FrameClock::new();
    let mut now = 0.0f64;
    log::info!("Session started with seed {}", args.seed);

    for shot in 0..args.shots {
        for action in setup_actions(shot) {
            step(&mut state, &mut clock, &mut now, Some(action));
        }
        step(&mut state, &mut clock, &mut now, Some(Action::Shoot));

        let mut frames = 0;
        while (state.ball.in_flight || state.pending_reset.is_some()) && frames < args.max_frames {
            step(&mut state, &mut clock, &mut now, None);
            frames += 1;
        }
        if state.ball.in_flight {
            log::warn!("Shot {} still moving after {} frames", shot + 1, frames);
        }
        println!("{}", state.session.scoreboard_text());
        step(&mut state, &mut clock, &mut now, Some(Action::ResetBall));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&state.snapshot()).context("serializing snapshot")?;
        println!("{json}");
    }
    Ok(())
}

/// Walk the ball to a different spot and dial power for each shot
fn setup_actions(shot: u32) -> Vec<Action> {
    let toward = if shot % 2 == 0 { Vec3::X } else { Vec3::NEG_X };
    let lateral = if shot % 3 == 0 { Vec3::Z } else { Vec3::NEG_Z };
    let mut actions = Vec::new();
    actions.extend(std::iter::repeat_n(
        Action::Move {
            direction: toward,
            magnitude: 1.0,
        },
        40 + (shot as usize * 17) % 60,
    ));
    actions.extend(std::iter::repeat_n(
        Action::Move {
            direction: lateral,
            magnitude: 1.0,
        },
        (shot as usize * 11) % 30,
    ));
    let power = (shot as f32 * 13.0) % 50.0 - 10.0;
    actions.push(Action::AdjustPower(power));
    actions
}

fn step(state: &mut GameState, clock: &mut FrameClock, now: &mut f64, action: Option<Action>) {
    *now += f64::from(SIM_DT);
    let dt = clock.delta(*now);
    tick(state, &TickInput { action }, dt);
    for event in &state.events {
        match event {
            SimEvent::GroundBounce { .. } => {}
            SimEvent::Scored { hoop } => println!("  made it (hoop {hoop})"),
            SimEvent::Missed { kind } => println!("  missed: {kind:?}"),
            other => println!("  {other:?}"),
        }
    }
}
