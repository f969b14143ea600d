//! Simulation core and terminal front end for a small vertical shooter.
//!
//! `compute` and `game` hold all of the gameplay rules and never touch the
//! terminal. `display` is the only module that writes escape sequences.

pub mod collaborators;
pub mod compute;
pub mod difficulty;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;

/// Logical playfield width in game units.
pub const WIDTH: f32 = 320.0;
/// Logical playfield height in game units.
pub const HEIGHT: f32 = 480.0;
