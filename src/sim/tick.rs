//! Fixed timestep simulation tick
//!
//! The run state machine. One call advances the run by one 60 Hz step.

use super::actions;
use super::entity::PowerUpType;
use super::hazards::check_hazards;
use super::intro::{reveal_all, step_intro};
use super::physics::{HeldInput, step_dead, step_player};
use super::state::{GameState, RunEvent, RunPhase};
use super::world::update_entities;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement keys currently held
    pub held: HeldInput,
    /// Action key went down this tick (build, fire, dash, skip intro)
    pub action: bool,
    /// Toggle build mode
    pub toggle_build: bool,
    /// Pause toggle
    pub pause: bool,
    /// Enter or leave the free camera (only from pause)
    pub toggle_view: bool,
    /// Abandon the run; honoured in every phase, including dead and paused
    pub home: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink) {
    if state.phase.is_terminal() {
        return;
    }
    if input.home {
        state.exit_to_home(audio);
        return;
    }

    match state.phase {
        RunPhase::Intro(_) => tick_intro(state, input, audio),
        RunPhase::Playing => tick_playing(state, input, audio),
        RunPhase::Dead { respawn_at } => tick_dead(state, input, respawn_at, audio),
        RunPhase::Paused { respawn_at } => tick_paused(state, input, respawn_at),
        RunPhase::ViewMode { camera, respawn_at } => {
            if input.pause || input.action || input.toggle_view {
                state.phase = RunPhase::Paused { respawn_at };
                return;
            }
            let mut camera = camera;
            let dir = input.held.right as i8 - input.held.left as i8;
            camera.pan(f32::from(dir), &state.level, &state.config.viewport);
            state.phase = RunPhase::ViewMode { camera, respawn_at };
        }
        RunPhase::LevelComplete | RunPhase::GameOver | RunPhase::Exited => {}
    }
}

fn tick_intro(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink) {
    if input.action {
        skip_intro(state, audio);
        return;
    }
    let RunPhase::Intro(intro) = &mut state.phase else {
        return;
    };
    let finished = step_intro(
        intro,
        &mut state.level,
        &mut state.camera,
        &state.config.viewport,
        audio,
    );
    if finished {
        end_intro(state, audio);
    }
}

fn end_intro(state: &mut GameState, audio: &mut dyn AudioSink) {
    reveal_all(&mut state.level);
    audio.set_rolling(false);
    state.phase = RunPhase::Playing;
}

/// Cut the intro short: every checkpoint revealed, camera on the player
pub fn skip_intro(state: &mut GameState, audio: &mut dyn AudioSink) {
    if !matches!(state.phase, RunPhase::Intro(_)) {
        return;
    }
    end_intro(state, audio);
    state
        .camera
        .center_on(state.player.rect.x, &state.level, &state.config.viewport);
    log::debug!("Intro skipped");
}

fn tick_playing(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink) {
    if input.pause {
        state.phase = RunPhase::Paused { respawn_at: None };
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // commands are stamped with the tick physics is about to run
    if input.toggle_build {
        state.player.build_mode = !state.player.build_mode;
        log::debug!("Build mode {}", if state.player.build_mode { "on" } else { "off" });
    }
    if input.action {
        perform_action(state, now, audio);
    }

    let physics = step_player(
        &mut state.player,
        &state.level,
        &input.held,
        &mut state.jump_armed,
        state.loadout.power_up,
        now,
        audio,
    );

    if physics.is_moving && state.player.grounded {
        let interval = if state.player.build_mode {
            BUILD_STEP_INTERVAL_TICKS
        } else {
            STEP_INTERVAL_TICKS
        };
        if state.last_step_tick.is_none_or(|t| now - t >= interval) {
            audio.play(SoundEffect::Step);
            state.last_step_tick = Some(now);
        }
    }

    let world = update_entities(&mut state.level, &state.player, now, audio);
    let hazards = check_hazards(&mut state.player, &mut state.level, audio);

    if let Some(index) = hazards.checkpoint {
        state.events.push(RunEvent::CheckpointReached {
            level: state.level.id,
            index,
        });
    }
    if hazards.level_complete {
        state.complete_level();
        return;
    }
    if world.player_killed || hazards.died {
        state.trigger_death(audio);
    }

    if !state.player.is_dead() && state.player.rect.y > state.level.height + FALL_OUT_MARGIN {
        log::debug!("Player fell out of the level");
        state.trigger_death(audio);
    }

    if !state.player.is_dead() {
        let mut expired = false;
        if let Some(t) = state.timer_ticks.as_mut() {
            if *t > 0 {
                *t -= 1;
                expired = *t == 0;
            }
        }
        if expired {
            state.trigger_death(audio);
        }
    }

    state
        .camera
        .follow(&state.player, &state.level, &state.config.viewport);
}

/// Build in build mode, otherwise use the power-up's action
fn perform_action(state: &mut GameState, now: u64, audio: &mut dyn AudioSink) {
    if state.player.build_mode {
        let ready = state
            .last_build_tick
            .is_none_or(|t| now.saturating_sub(t) >= BUILD_COOLDOWN_TICKS);
        if !ready {
            return;
        }
        state.last_build_tick = Some(now);
        actions::build(
            &mut state.level,
            &state.player,
            state.loadout.block,
            &mut state.rng,
            now,
            audio,
        );
        return;
    }

    match state.loadout.power_up {
        PowerUpType::Laser => {
            let id = actions::shoot(&mut state.level, &state.player, audio);
            log::debug!("Fired laser bolt {}", id);
        }
        PowerUpType::Phase => {
            actions::phase_dash(&mut state.player, now, audio);
            log::debug!("Phase dash until tick {}", state.player.phase_until);
        }
        PowerUpType::DoubleJump | PowerUpType::GravityBoots | PowerUpType::ExtraLife => {}
    }
}

fn tick_dead(state: &mut GameState, input: &TickInput, respawn_at: u64, audio: &mut dyn AudioSink) {
    if input.pause {
        state.phase = RunPhase::Paused {
            respawn_at: Some(respawn_at),
        };
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;
    step_dead(&mut state.player);
    // the world keeps moving under the death animation; kills are moot
    update_entities(&mut state.level, &state.player, now, audio);
    state
        .camera
        .follow(&state.player, &state.level, &state.config.viewport);

    if now >= respawn_at {
        state.handle_life_lost(audio);
    }
}

fn tick_paused(state: &mut GameState, input: &TickInput, respawn_at: Option<u64>) {
    if input.pause {
        state.phase = match respawn_at {
            Some(at) => RunPhase::Dead { respawn_at: at },
            None => RunPhase::Playing,
        };
    } else if input.toggle_view {
        state.phase = RunPhase::ViewMode {
            camera: state.camera,
            respawn_at,
        };
    }
}
