/// Difficulty presets: how often enemies appear and how fast they fall.

use thiserror::Error;

use crate::entities::Level;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyProfile {
    /// Frames between two enemy spawns.
    pub spawn_interval: u64,
    /// Lower bound (inclusive) of a new enemy's fall speed.
    pub speed_min: f32,
    /// Upper bound (exclusive) of a new enemy's fall speed.
    pub speed_max: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("spawn interval must be at least one frame")]
    ZeroSpawnInterval,
    #[error("enemy speeds must be finite, got {min}..{max}")]
    NonFiniteSpeed { min: f32, max: f32 },
    #[error("speed_min ({min}) is greater than speed_max ({max})")]
    InvertedSpeedRange { min: f32, max: f32 },
}

impl DifficultyProfile {
    pub fn new(spawn_interval: u64, speed_min: f32, speed_max: f32) -> Result<Self, ProfileError> {
        if spawn_interval == 0 {
            return Err(ProfileError::ZeroSpawnInterval);
        }
        if !speed_min.is_finite() || !speed_max.is_finite() {
            return Err(ProfileError::NonFiniteSpeed {
                min: speed_min,
                max: speed_max,
            });
        }
        if speed_min > speed_max {
            return Err(ProfileError::InvertedSpeedRange {
                min: speed_min,
                max: speed_max,
            });
        }
        Ok(Self {
            spawn_interval,
            speed_min,
            speed_max,
        })
    }

    /// The preset for `level`, checked on the way out.
    pub fn for_level(level: Level) -> Result<Self, ProfileError> {
        match level {
            Level::Easy => Self::new(90, 1.0, 2.0),
            Level::Medium => Self::new(60, 1.5, 3.0),
            Level::Hard => Self::new(30, 2.5, 5.0),
        }
    }
}
