/// Narrow interfaces between the simulation and the outside world.
///
/// The core only talks to drawing, sound and overlay code through these
/// traits, so tests can swap in recorders and the terminal front end lives
/// entirely in `display`.

use std::io;

use crate::entities::{Bullet, Enemy, Player};

/// Input sampled once at the start of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// A pointer press/drag is in progress; it also fires continuously.
    pub pointer_active: bool,
    /// Pointer position in playfield units.
    pub pointer_x: f32,
}

pub trait Renderer {
    fn clear(&mut self) -> io::Result<()>;
    fn draw_background(&mut self, frame: u64) -> io::Result<()>;
    fn draw_player(&mut self, player: &Player) -> io::Result<()>;
    fn draw_bullet(&mut self, bullet: &Bullet) -> io::Result<()>;
    fn draw_enemy(&mut self, enemy: &Enemy) -> io::Result<()>;
    /// Push the finished frame to the output.
    fn present(&mut self) -> io::Result<()>;
}

pub trait AudioAdapter {
    /// Fire-and-forget.
    fn play_explosion(&mut self);
}

/// Overlays and the score readout. Only called when something changes.
pub trait UiAdapter {
    fn show_score(&mut self, score: u32);
    fn show_game_over_overlay(&mut self, visible: bool);
    fn show_start_overlay(&mut self, visible: bool);
}
