/// Per-frame game rules.
///
/// Every function works on an explicitly passed `GameState`; randomness
/// comes only through the injected `Rng`, so a seeded generator replays a
/// run exactly.

use log::{debug, info, trace};
use rand::Rng;

use crate::collaborators::InputState;
use crate::difficulty::{DifficultyProfile, ProfileError};
use crate::entities::{Enemy, GameState, GameStatus, Level, Player, ENEMY_WIDTH};
use crate::{HEIGHT, WIDTH};

/// Score awarded per enemy destroyed.
pub const SCORE_PER_KILL: u32 = 10;

/// Number of background stars.
pub const STAR_COUNT: usize = 20;

/// Things that happened during a tick that the outside world may react to.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A bullet destroyed the enemy whose top-left corner was at `(x, y)`.
    EnemyDestroyed { x: f32, y: f32 },
    /// An enemy reached the player. Emitted at most once per tick.
    PlayerHit,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh run for `level`: score 0, frame 0, new player, no enemies.
pub fn init_state(level: Level) -> Result<GameState, ProfileError> {
    let profile = DifficultyProfile::for_level(level)?;
    Ok(GameState {
        player: Player::new(),
        enemies: Vec::new(),
        score: 0,
        level,
        profile,
        status: GameStatus::Playing,
        frame: 0,
    })
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Returns a new enemy when `frame` is a multiple of the spawn interval,
/// frame 0 included.
pub fn maybe_spawn(
    frame: u64,
    profile: &DifficultyProfile,
    rng: &mut impl Rng,
) -> Option<Enemy> {
    if !frame.is_multiple_of(profile.spawn_interval) {
        return None;
    }
    let x = rng.gen::<f32>() * (WIDTH - ENEMY_WIDTH);
    let speed = profile.speed_min + rng.gen::<f32>() * (profile.speed_max - profile.speed_min);
    debug!("frame {frame}: spawning enemy at x={x:.1} speed={speed:.2}");
    Some(Enemy::new(x, speed))
}

// ── Collision resolver ───────────────────────────────────────────────────────

/// Bullet/enemy hits, then player/enemy hits, then a single purge of
/// flagged and off-screen entities.
pub fn resolve_collisions(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for bullet in &mut state.player.bullets {
        for enemy in &mut state.enemies {
            if bullet.to_remove || enemy.to_remove {
                continue;
            }
            if bullet.bounds().overlaps(&enemy.bounds()) {
                bullet.to_remove = true;
                enemy.to_remove = true;
                state.score += SCORE_PER_KILL;
                debug!(
                    "enemy destroyed at ({:.1}, {:.1}), score {}",
                    enemy.x, enemy.y, state.score
                );
                events.push(GameEvent::EnemyDestroyed {
                    x: enemy.x,
                    y: enemy.y,
                });
            }
        }
    }

    let player_box = state.player.bounds();
    let player_hit = state
        .enemies
        .iter()
        .any(|e| !e.to_remove && e.bounds().overlaps(&player_box));
    if player_hit && state.status != GameStatus::GameOver {
        state.status = GameStatus::GameOver;
        info!("player hit on frame {}, final score {}", state.frame, state.score);
        events.push(GameEvent::PlayerHit);
    }

    state.player.bullets.retain(|b| !b.to_remove && b.y > 0.0);
    state.enemies.retain(|e| !e.to_remove && e.y < HEIGHT);

    events
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the run by one frame. Does nothing outside `Playing`.
///
/// Order: frame counter, player (and its bullets), enemies, spawn,
/// collisions. The spawner sees the zero-based index of the tick being
/// processed, so the first tick of a run always spawns.
pub fn tick(state: &mut GameState, input: &InputState, rng: &mut impl Rng) -> Vec<GameEvent> {
    if state.status != GameStatus::Playing {
        return Vec::new();
    }

    let index = state.frame;
    state.frame += 1;

    state.player.update(input);
    for enemy in &mut state.enemies {
        enemy.update();
    }
    if let Some(enemy) = maybe_spawn(index, &state.profile, rng) {
        state.enemies.push(enemy);
    }

    let events = resolve_collisions(state);
    trace!(
        "frame {}: {} enemies, {} bullets",
        state.frame,
        state.enemies.len(),
        state.player.bullets.len()
    );
    events
}

// ── Background ───────────────────────────────────────────────────────────────

/// Star positions for the scrolling background at `frame`.
pub fn star_positions(frame: u64) -> impl Iterator<Item = (f32, f32)> {
    let f = frame as f32;
    (0..STAR_COUNT).map(move |i| {
        let i = i as f32;
        let x = ((i + f * 0.01).sin() * WIDTH + WIDTH).rem_euclid(WIDTH);
        let y = (i * 30.0 + f).rem_euclid(HEIGHT);
        (x, y)
    })
}
