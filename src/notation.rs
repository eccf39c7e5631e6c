//! Move and score text.
//!
//! Moves read and print as `"<zone>/<cell>"` using the compass labels
//! `nw n ne w c e sw s se`, e.g. `c/c` for the very centre of the board.

use std::fmt;
use std::str::FromStr;

use crate::board::{Move, ZONE_LABELS};
use crate::error::GameError;
use crate::evaluation::{DRAW, LOSS, WIN};

fn label_index(label: &str) -> Option<u8> {
    ZONE_LABELS
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(label))
        .map(|index| index as u8)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            ZONE_LABELS[self.zone() as usize],
            ZONE_LABELS[self.cell() as usize]
        )
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: &'static str| GameError::ParseMove {
            input: input.to_string(),
            reason,
        };

        let (zone, cell) = input
            .trim()
            .split_once('/')
            .ok_or_else(|| parse_error("expected <zone>/<cell>"))?;
        let zone = label_index(zone.trim()).ok_or_else(|| parse_error("unknown zone label"))?;
        let cell = label_index(cell.trim()).ok_or_else(|| parse_error("unknown cell label"))?;

        Move::from_parts(zone, cell).ok_or_else(|| parse_error("out of range"))
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = GameError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

/// Score text for a search of the given depth.
///
/// `W<n>`/`L<n>`: forced win/loss `n` plies from the root. `D0`: exact draw.
/// Anything else is the signed heuristic value.
pub fn format_score(score: i32, depth: usize) -> String {
    let depth = depth as i32;
    if score <= LOSS + depth {
        format!("L{}", score - LOSS)
    } else if score >= WIN - depth {
        format!("W{}", WIN - score)
    } else if score == DRAW {
        "D0".to_string()
    } else {
        format!("{score:+}")
    }
}

/// Comma-separated move list, as printed after `PV:`.
pub fn format_line(moves: impl IntoIterator<Item = Move>) -> String {
    moves
        .into_iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
