/// Game entity types and their per-frame movement.

use crate::collaborators::InputState;
use crate::difficulty::DifficultyProfile;
use crate::geometry::Rect;
use crate::{HEIGHT, WIDTH};

pub const PLAYER_WIDTH: f32 = 20.0;
pub const PLAYER_HEIGHT: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 4.0;
/// Frames between two shots while fire is held.
pub const SHOOT_COOLDOWN: u32 = 15;

pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 12.0;
pub const BULLET_SPEED: f32 = 6.0;

pub const ENEMY_WIDTH: f32 = 24.0;
pub const ENEMY_HEIGHT: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Easy => "EASY",
            Level::Medium => "MEDIUM",
            Level::Hard => "HARD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Start screen; nothing is simulated.
    Idle,
    Playing,
    /// Frozen until restarted or sent back to the start screen.
    GameOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub to_remove: bool,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            to_remove: false,
        }
    }

    pub fn update(&mut self) {
        self.y -= BULLET_SPEED;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Frames left before the next shot is allowed.
    pub shoot_cooldown: u32,
    pub bullets: Vec<Bullet>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Centred horizontally, 40 units above the bottom edge.
    pub fn new() -> Self {
        Self {
            x: WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            y: HEIGHT - 40.0,
            shoot_cooldown: 0,
            bullets: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center_x(&self) -> f32 {
        self.x + PLAYER_WIDTH / 2.0
    }

    /// Advance one frame: move existing bullets, apply movement from the
    /// keyboard and the pointer (both may apply in the same frame), then fire.
    ///
    /// A bullet fired this frame stays at the player's top edge until the
    /// next update.
    pub fn update(&mut self, input: &InputState) {
        for bullet in &mut self.bullets {
            bullet.update();
        }

        if input.move_left {
            self.x -= PLAYER_SPEED;
        }
        if input.move_right {
            self.x += PLAYER_SPEED;
        }
        // Pointer chases one step per frame rather than snapping.
        if input.pointer_active {
            if input.pointer_x < self.center_x() {
                self.x -= PLAYER_SPEED;
            } else {
                self.x += PLAYER_SPEED;
            }
        }
        self.x = self.x.clamp(0.0, WIDTH - PLAYER_WIDTH);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        if (input.fire || input.pointer_active) && self.shoot_cooldown == 0 {
            self.shoot();
        }
    }

    fn shoot(&mut self) {
        let x = self.x + PLAYER_WIDTH / 2.0 - 2.0;
        self.bullets.push(Bullet::new(x, self.y));
        self.shoot_cooldown = SHOOT_COOLDOWN;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Fall speed, fixed for the enemy's lifetime.
    pub speed: f32,
    pub to_remove: bool,
}

impl Enemy {
    /// A new enemy sits just above the top edge.
    pub fn new(x: f32, speed: f32) -> Self {
        Self {
            x,
            y: -ENEMY_HEIGHT,
            speed,
            to_remove: false,
        }
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything a run owns. Passed explicitly to `compute::tick`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub level: Level,
    /// Resolved from `level` when the run starts; never changes mid-run.
    pub profile: DifficultyProfile,
    pub status: GameStatus,
    /// Ticks simulated in the current run.
    pub frame: u64,
}
