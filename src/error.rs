use thiserror::Error;

use crate::difficulty::ProfileError;

/// Errors that end the program. The simulation itself never fails.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid difficulty profile: {0}")]
    Profile(#[from] ProfileError),
}
