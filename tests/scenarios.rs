//! End-to-end runs through the public API

use dice_quest::consts::*;
use dice_quest::game::{Game, Key};
use dice_quest::sim::level::{LayoutInfo, LevelBuilder};
use dice_quest::sim::{
    BlockType, Entity, EntityKind, GameState, HeldInput, PlayerState, PowerUpType, Rect, RunEvent,
    RunPhase, SessionConfig, TickInput, step_player, tick,
};
use dice_quest::{AudioManager, Loadout, NullAudio, SoundEffect};

fn config() -> SessionConfig {
    SessionConfig {
        show_intro: false,
        ..Default::default()
    }
}

fn level_one(power_up: PowerUpType) -> GameState {
    let mut state = GameState::new(
        1,
        Loadout::new(BlockType::Square, power_up),
        config(),
        42,
        &mut NullAudio,
    );
    for _ in 0..30 {
        tick(&mut state, &TickInput::default(), &mut NullAudio);
    }
    state.drain_events();
    state
}

fn hold_right() -> TickInput {
    TickInput {
        held: HeldInput {
            right: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn teleport(state: &mut GameState, x: f32, y: f32) {
    state.player.rect.x = x;
    state.player.rect.y = y;
    state.player.vel = glam::Vec2::ZERO;
}

#[test]
fn test_walk_right_until_the_sofa() {
    let mut state = level_one(PowerUpType::Laser);
    assert!(state.player.grounded);
    assert_eq!(state.player.rect.x, 80.0);

    // the first sofa's left leg stands at tile 8
    let leg_x = 8.0 * TILE_SIZE;
    let mut prev = state.player.rect.x;
    let mut sounds = Vec::new();
    for _ in 0..80 {
        tick(&mut state, &hold_right(), &mut sounds);
        assert!(state.player.grounded);
        let x = state.player.rect.x;
        if prev < leg_x - PLAYER_WIDTH {
            assert!(x > prev, "stalled at {}", x);
        } else {
            assert_eq!(x, leg_x - PLAYER_WIDTH);
        }
        prev = x;
    }
    assert_eq!(state.player.rect.x, leg_x - PLAYER_WIDTH);
    assert!(sounds.contains(&SoundEffect::Step));
    assert!(!sounds.contains(&SoundEffect::Jump));
}

#[test]
fn test_death_respawns_at_last_checkpoint() {
    let mut state = level_one(PowerUpType::Laser);
    let cp = state.level.checkpoint(2).map(|e| e.rect).expect("checkpoint 2");
    teleport(&mut state, cp.x, cp.y);
    tick(&mut state, &TickInput::default(), &mut NullAudio);
    assert_eq!(state.player.last_checkpoint, 2);
    assert_eq!(
        state.drain_events(),
        vec![RunEvent::CheckpointReached { level: 1, index: 2 }]
    );

    // drop a spike on the player
    let id = state.level.next_entity_id();
    let r = state.player.rect;
    state
        .level
        .entities
        .push(Entity::new(id, Rect::new(r.x - 5.0, r.y, TILE_SIZE, TILE_SIZE), EntityKind::Spike));
    tick(&mut state, &TickInput::default(), &mut NullAudio);
    assert!(matches!(state.phase, RunPhase::Dead { .. }));

    for _ in 0..DEATH_DELAY_TICKS - 1 {
        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert_eq!(state.player.lives, STARTING_LIVES);
    }
    tick(&mut state, &TickInput::default(), &mut NullAudio);

    assert_eq!(state.phase, RunPhase::Playing);
    assert_eq!(state.player.lives, STARTING_LIVES - 1);
    assert_eq!(state.player.last_checkpoint, 2);
    let spawn = state.level.respawn_point(2);
    assert_eq!(spawn.x, cp.x);
    assert_eq!(spawn.y, cp.y - PLAYER_HEIGHT - RESPAWN_HOVER);
    assert_eq!((state.player.rect.x, state.player.rect.y), (spawn.x, spawn.y));
    assert!(state.level.checkpoint(2).is_some_and(|e| e.visible));
    assert!(state.level.checkpoint(3).is_some_and(|e| !e.visible));
}

#[test]
fn test_level_completes_exactly_once() {
    let mut state = level_one(PowerUpType::Laser);
    let mut completions = 0;

    for index in 1..=CHECKPOINTS_PER_LEVEL {
        let cp = state.level.checkpoint(index).map(|e| e.rect).expect("checkpoint");
        teleport(&mut state, cp.x, cp.y);
        tick(&mut state, &TickInput::default(), &mut NullAudio);
        let events = state.drain_events();
        assert!(events.contains(&RunEvent::CheckpointReached { level: 1, index }));
        let done = events.iter().filter(|e| matches!(e, RunEvent::LevelComplete { .. })).count();
        if index < CHECKPOINTS_PER_LEVEL {
            assert_eq!(done, 0, "completed early at checkpoint {}", index);
            assert_eq!(state.phase, RunPhase::Playing);
        }
        completions += done;
    }
    assert_eq!(completions, 1);
    assert_eq!(state.phase, RunPhase::LevelComplete);

    for _ in 0..60 {
        tick(&mut state, &hold_right(), &mut NullAudio);
    }
    assert!(state.drain_events().is_empty());
}

#[test]
fn test_three_deaths_end_the_run() {
    let mut state = level_one(PowerUpType::Laser);
    let mut sounds = Vec::new();
    for _ in 0..STARTING_LIVES {
        state.trigger_death(&mut sounds);
        for _ in 0..DEATH_DELAY_TICKS {
            tick(&mut state, &TickInput::default(), &mut NullAudio);
        }
    }
    assert_eq!(state.phase, RunPhase::GameOver);
    assert_eq!(
        sounds.iter().filter(|s| **s == SoundEffect::Die).count(),
        STARTING_LIVES as usize
    );
    assert!(state.drain_events().contains(&RunEvent::GameOver { level: 1 }));
}

#[test]
fn test_admin_mode_keeps_lives() {
    let mut state = GameState::new(
        1,
        Loadout::default(),
        SessionConfig {
            admin_mode: true,
            ..config()
        },
        1,
        &mut NullAudio,
    );
    for _ in 0..5 {
        state.trigger_death(&mut NullAudio);
        for _ in 0..DEATH_DELAY_TICKS {
            tick(&mut state, &TickInput::default(), &mut NullAudio);
        }
    }
    assert_eq!(state.phase, RunPhase::Playing);
    assert_eq!(state.player.lives, STARTING_LIVES);
}

fn scripted_run(seed: u64) -> Game {
    let mut game = Game::new(
        3,
        Loadout::new(BlockType::Random, PowerUpType::DoubleJump),
        config(),
        seed,
        AudioManager::silent(),
    );
    for t in 0..900u32 {
        if t % 3 == 0 {
            game.key_down(Key::Right);
        }
        if t % 40 == 0 {
            game.key_down(Key::Up);
        }
        if t % 40 == 12 {
            game.key_up(Key::Up);
        }
        if t == 100 || t == 400 {
            game.key_down(Key::Build);
            game.key_up(Key::Build);
        }
        if t % 25 == 0 {
            game.key_down(Key::Action);
        } else if t % 25 == 1 {
            game.key_up(Key::Action);
        }
        game.frame(MS_PER_TICK);
    }
    game
}

#[test]
fn test_identical_input_gives_identical_runs() {
    let a = scripted_run(9);
    let b = scripted_run(9);
    assert_eq!(a.state().time_ticks, b.state().time_ticks);
    assert_eq!(a.state().player, b.state().player);
    assert_eq!(a.state().level, b.state().level);
    assert_eq!(a.state().phase, b.state().phase);
}

#[test]
fn test_coyote_window_boundary() {
    let mut b = LevelBuilder::new();
    b.floor(0.0, 5.0);
    let level = b.finish(
        1,
        LayoutInfo {
            name: "ledge",
            width_tiles: 40.0,
            time_limit_secs: None,
        },
    );

    // airborne and descending past the ledge, last grounded at tick 100
    let airborne = || {
        let mut p = PlayerState::new(1, PowerUpType::Laser);
        p.rect = Rect::new(600.0, 300.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        p.vel.y = 1.0;
        p.last_grounded = Some(100);
        p
    };
    let jump = HeldInput {
        jump: true,
        ..Default::default()
    };

    let mut p = airborne();
    let mut armed = true;
    step_player(&mut p, &level, &jump, &mut armed, PowerUpType::Laser, 100 + COYOTE_TICKS, &mut NullAudio);
    assert!(p.vel.y < 0.0, "jump on the boundary tick is accepted");

    let mut p = airborne();
    let mut armed = true;
    step_player(&mut p, &level, &jump, &mut armed, PowerUpType::Laser, 101 + COYOTE_TICKS, &mut NullAudio);
    assert!(p.vel.y > 0.0, "one tick later the jump is refused");

    // grounded always jumps, however stale the coyote stamp
    let mut p = PlayerState::new(1, PowerUpType::Laser);
    p.rect = Rect::new(40.0, 560.0 - PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_HEIGHT);
    p.grounded = true;
    p.last_grounded = Some(0);
    let mut armed = true;
    step_player(&mut p, &level, &jump, &mut armed, PowerUpType::Laser, 10_000, &mut NullAudio);
    assert!(p.vel.y < 0.0);
}

#[test]
fn test_build_then_deconstruct_restores_entity_count() {
    let mut state = GameState::new(
        1,
        Loadout::new(BlockType::Floating, PowerUpType::Laser),
        config(),
        7,
        &mut NullAudio,
    );
    for _ in 0..30 {
        tick(&mut state, &TickInput::default(), &mut NullAudio);
    }
    let count = state.level.entities.len();
    let toggle = TickInput {
        toggle_build: true,
        ..Default::default()
    };
    let action = TickInput {
        action: true,
        ..Default::default()
    };
    tick(&mut state, &toggle, &mut NullAudio);
    tick(&mut state, &action, &mut NullAudio);
    assert_eq!(state.level.entities.len(), count + 1);

    // bypass the cooldown
    state.last_build_tick = None;
    tick(&mut state, &action, &mut NullAudio);
    assert_eq!(state.level.entities.len(), count);
}
