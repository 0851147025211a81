//! Dice Quest headless runner
//!
//! Plays a level with a simple autopilot (hold right, hop when blocked or
//! on a fixed beat) and logs run events. Useful for smoke-testing level
//! layouts and for reproducing a seed.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use dice_quest::consts::*;
use dice_quest::game::{Game, Key};
use dice_quest::progress::{LevelProgress, now_ms};
use dice_quest::sim::{BlockType, PowerUpType, RunEvent, SessionConfig};
use dice_quest::{AudioManager, Loadout, Settings};

/// Headless Dice Quest runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level to play (1-9)
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Seconds of game time to simulate
    #[arg(short, long, default_value_t = 60)]
    seconds: u32,

    /// RNG seed (loadout roll and random blocks)
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Force the block die (square, floating, high, wide, temporary, random)
    #[arg(long, value_parser = parse_block)]
    block: Option<BlockType>,

    /// Force the power-up die (double-jump, laser, gravity-boots, extra-life, phase)
    #[arg(long, value_parser = parse_power_up)]
    power_up: Option<PowerUpType>,

    /// Unlimited lives, timer refills
    #[arg(long)]
    admin: bool,

    /// Progress file to record level start/completion in
    #[arg(long)]
    progress: Option<PathBuf>,

    /// Settings file (volume, mute, viewport); written with defaults if missing
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_block(s: &str) -> Result<BlockType, String> {
    BlockType::from_name(s).ok_or_else(|| format!("unknown block type '{}'", s))
}

fn parse_power_up(s: &str) -> Result<PowerUpType, String> {
    PowerUpType::from_name(s).ok_or_else(|| format!("unknown power-up '{}'", s))
}

/// Hold right; jump when stuck or every `HOP_EVERY` ticks
struct Autopilot {
    last_x: f32,
    stuck: u32,
    jump_left: u32,
    ticks: u64,
}

impl Autopilot {
    const HOP_EVERY: u64 = 45;
    const JUMP_HOLD: u32 = 14;
    const STUCK_LIMIT: u32 = 3;

    fn new() -> Self {
        Self {
            last_x: 0.0,
            stuck: 0,
            jump_left: 0,
            ticks: 0,
        }
    }

    fn drive(&mut self, game: &mut Game) {
        self.ticks += 1;
        let x = game.state().player.rect.x;
        if x <= self.last_x {
            self.stuck += 1;
        } else {
            self.stuck = 0;
        }
        self.last_x = x;

        game.key_down(Key::Right);
        if self.jump_left > 0 {
            self.jump_left -= 1;
            if self.jump_left == 0 {
                game.key_up(Key::Up);
            }
        } else if self.stuck >= Self::STUCK_LIMIT || self.ticks % Self::HOP_EVERY == 0 {
            game.key_down(Key::Up);
            self.jump_left = Self::JUMP_HOLD;
            self.stuck = 0;
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    log::info!("Dice Quest (headless) starting...");

    let settings = match args.settings.as_deref() {
        Some(path) => {
            let settings = Settings::load(path);
            if !path.exists() {
                if let Err(e) = settings.save(path) {
                    log::warn!("Could not write default settings: {}", e);
                }
            }
            settings
        }
        None => Settings::default(),
    };

    let mut audio = AudioManager::silent();
    settings.apply_audio(&mut audio);
    let rolled = Loadout::roll(&mut Pcg32::seed_from_u64(args.seed), &mut audio);
    let loadout = Loadout::new(
        args.block.unwrap_or(rolled.block),
        args.power_up.unwrap_or(rolled.power_up),
    );
    log::info!(
        "Loadout: {} block, {}",
        loadout.block.as_str(),
        loadout.power_up.as_str()
    );

    let mut progress = args
        .progress
        .as_deref()
        .map(LevelProgress::load)
        .unwrap_or_default();
    if !progress.is_unlocked(args.level) {
        log::warn!("Level {} is not unlocked yet; playing anyway", args.level);
    }

    // nobody is watching a headless run, so the intro is always skipped
    let config = SessionConfig {
        show_intro: false,
        ..settings.session(args.admin)
    };
    let mut game = Game::new(args.level, loadout, config, args.seed, audio);
    let mut pilot = Autopilot::new();

    let total_ticks = u64::from(args.seconds) * u64::from(SIM_HZ);
    let mut events = Vec::new();
    for _ in 0..total_ticks {
        pilot.drive(&mut game);
        game.step();

        for event in game.drain_events() {
            if progress.apply(&event, now_ms()) {
                if let Some(path) = args.progress.as_deref() {
                    if let Err(e) = progress.save(path) {
                        log::warn!("Could not save progress: {}", e);
                    }
                }
            }
            events.push(event);
        }
        if game.state().phase.is_terminal() {
            break;
        }
    }

    let state = game.state();
    let deaths = events
        .iter()
        .filter(|e| matches!(e, RunEvent::PlayerDied { .. }))
        .count();
    println!(
        "level {} ({}): {} after {} ticks, checkpoint {}/{}, x = {:.0}/{:.0}, lives {}, deaths {}",
        state.level.id,
        state.level.name,
        state.phase.name(),
        state.time_ticks,
        state.player.last_checkpoint,
        CHECKPOINTS_PER_LEVEL,
        state.player.rect.x,
        state.level.width,
        state.player.lives,
        deaths
    );
}
