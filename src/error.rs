use thiserror::Error;

use crate::board::Move;

/// Errors surfaced by the checked entry points.
///
/// The search itself never produces these: it only ever applies moves that
/// came out of the generator for the same position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move {mv} in current position")]
    IllegalMove { mv: Move },

    #[error("the game is already over")]
    GameOver,

    #[error("cannot parse move {input:?}: {reason}")]
    ParseMove { input: String, reason: &'static str },

    #[error("move index {0} is out of range (0-80)")]
    InvalidMoveIndex(u8),
}
