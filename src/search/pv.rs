use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::{CELLS, Move};

/// Deepest possible horizon: every cell filled.
pub const MAX_PLY: usize = CELLS as usize;

/// Best line found by the search, one slot per ply from the root.
///
/// Slots past the end of the line (leaf or terminal positions) hold `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalVariation {
    slots: ArrayVec<Option<Move>, MAX_PLY>,
}

impl PrincipalVariation {
    /// A line of `horizon` empty slots.
    #[inline]
    pub fn empty(horizon: usize) -> Self {
        let mut slots = ArrayVec::new();
        slots.extend(std::iter::repeat_n(None, horizon.min(MAX_PLY)));
        PrincipalVariation { slots }
    }

    #[inline]
    pub(crate) fn set(&mut self, ply: usize, mv: Move) {
        self.slots[ply] = Some(mv);
    }

    pub fn horizon(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Move>] {
        &self.slots
    }

    /// Moves of the line, up to the first empty slot.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.slots.iter().map_while(|slot| *slot)
    }

    pub fn best_move(&self) -> Option<Move> {
        self.slots.first().copied().flatten()
    }
}
