//! Packed board representation.
//!
//! The whole position lives in three `u64` words:
//!
//! | word     | bits  | contents                                        |
//! |----------|-------|-------------------------------------------------|
//! | `first`  | 0-62  | first-player stones, zones 0-6, 9 bits per zone |
//! | `second` | 0-62  | second-player stones, zones 0-6                 |
//! | `shared` | 0-17  | first-player stones, zones 7 and 8              |
//! | `shared` | 18-35 | second-player stones, zones 7 and 8             |
//! | `shared` | 36-44 | zones won by the first player                   |
//! | `shared` | 45-53 | zones won by the second player                  |
//! | `shared` | 54-57 | forced zone, 0-8 or [`FREE_CHOICE`]             |
//!
//! Everything outside this module goes through the accessors below; no other
//! file knows where a bit lives.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lines::GRID_MASK;

/// Number of zones (and of cells per zone).
pub const ZONES: u8 = 9;

/// Number of playable cells on the full board.
pub const CELLS: u8 = ZONES * ZONES;

/// Forced-zone value meaning the mover may pick any open zone.
pub const FREE_CHOICE: u8 = 9;

/// Zone labels in index order, used for move text.
pub const ZONE_LABELS: [&str; 9] = ["nw", "n", "ne", "w", "c", "e", "sw", "s", "se"];

/// Zones 7 and 8 don't fit in `first`/`second` and live in `shared`.
const FIRST_SHARED_ZONE: u8 = 7;
const SECOND_SIDE_SHARED_OFFSET: u32 = 18;
const META_FIRST_OFFSET: u32 = 36;
const META_SECOND_OFFSET: u32 = 45;
const FORCED_OFFSET: u32 = 54;
const FORCED_MASK: u64 = 0b1111 << FORCED_OFFSET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Flip a first-player-perspective score to this side's perspective.
    #[inline(always)]
    pub const fn orient(self, score: i32) -> i32 {
        match self {
            Side::First => score,
            Side::Second => -score,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Side::First => 'X',
            Side::Second => 'O',
        }
    }
}

/// A move index in `[0, 81)`: `zone * 9 + cell`.
///
/// Serializes as its `"<zone>/<cell>"` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move(u8);

impl Move {
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Move {
        debug_assert!(index < CELLS);
        Move(index)
    }

    #[inline]
    pub fn from_parts(zone: u8, cell: u8) -> Option<Move> {
        (zone < ZONES && cell < ZONES).then_some(Move(zone * ZONES + cell))
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn zone(self) -> u8 {
        self.0 / ZONES
    }

    /// Cell within the zone; also the zone the opponent is sent to.
    #[inline(always)]
    pub const fn cell(self) -> u8 {
        self.0 % ZONES
    }
}

impl TryFrom<u8> for Move {
    type Error = crate::error::GameError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index < CELLS {
            Ok(Move(index))
        } else {
            Err(crate::error::GameError::InvalidMoveIndex(index))
        }
    }
}

/// Immutable packed position. New values come only from
/// [`Board::empty`] and [`crate::moves::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    first: u64,
    second: u64,
    shared: u64,
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// Empty board, free choice of zone.
    pub const fn empty() -> Self {
        Board {
            first: 0,
            second: 0,
            shared: (FREE_CHOICE as u64) << FORCED_OFFSET,
        }
    }

    #[inline(always)]
    const fn zone_shift(zone: u8, side: Side) -> u32 {
        if zone < FIRST_SHARED_ZONE {
            9 * zone as u32
        } else {
            let base = 9 * (zone - FIRST_SHARED_ZONE) as u32;
            match side {
                Side::First => base,
                Side::Second => base + SECOND_SIDE_SHARED_OFFSET,
            }
        }
    }

    #[inline(always)]
    const fn zone_word(&self, zone: u8, side: Side) -> u64 {
        if zone >= FIRST_SHARED_ZONE {
            self.shared
        } else {
            match side {
                Side::First => self.first,
                Side::Second => self.second,
            }
        }
    }

    #[inline(always)]
    fn zone_word_mut(&mut self, zone: u8, side: Side) -> &mut u64 {
        if zone >= FIRST_SHARED_ZONE {
            &mut self.shared
        } else {
            match side {
                Side::First => &mut self.first,
                Side::Second => &mut self.second,
            }
        }
    }

    /// 9-bit occupancy of `zone` for `side`.
    #[inline]
    pub const fn zone_bits(&self, zone: u8, side: Side) -> u64 {
        (self.zone_word(zone, side) >> Self::zone_shift(zone, side)) & GRID_MASK
    }

    /// 9-bit occupancy of `zone` for both sides combined.
    #[inline]
    pub const fn zone_occupied(&self, zone: u8) -> u64 {
        self.zone_bits(zone, Side::First) | self.zone_bits(zone, Side::Second)
    }

    /// Table key `(second << 9) | first` for one zone.
    #[inline]
    pub const fn zone_key(&self, zone: u8) -> usize {
        ((self.zone_bits(zone, Side::Second) << 9) | self.zone_bits(zone, Side::First)) as usize
    }

    #[inline]
    pub const fn is_zone_full(&self, zone: u8) -> bool {
        self.zone_occupied(zone) == GRID_MASK
    }

    /// 9-bit set of zones won by `side`.
    #[inline]
    pub const fn meta_bits(&self, side: Side) -> u64 {
        let offset = match side {
            Side::First => META_FIRST_OFFSET,
            Side::Second => META_SECOND_OFFSET,
        };
        (self.shared >> offset) & GRID_MASK
    }

    /// Zones won by either side.
    #[inline]
    pub const fn meta_occupied(&self) -> u64 {
        self.meta_bits(Side::First) | self.meta_bits(Side::Second)
    }

    /// Table key for the meta-board.
    #[inline]
    pub const fn meta_key(&self) -> usize {
        ((self.meta_bits(Side::Second) << 9) | self.meta_bits(Side::First)) as usize
    }

    #[inline]
    pub const fn is_zone_won(&self, zone: u8) -> bool {
        (self.meta_occupied() >> zone) & 1 == 1
    }

    /// Raw forced-zone field: 0-8, or [`FREE_CHOICE`].
    #[inline]
    pub const fn forced_zone_raw(&self) -> u8 {
        ((self.shared & FORCED_MASK) >> FORCED_OFFSET) as u8
    }

    /// Zone the side to move must play in, `None` for free choice.
    #[inline]
    pub const fn forced_zone(&self) -> Option<u8> {
        match self.forced_zone_raw() {
            FREE_CHOICE => None,
            zone => Some(zone),
        }
    }

    /// Owner of the cell addressed by `mv`, if any.
    pub fn occupant(&self, mv: Move) -> Option<Side> {
        let bit = 1 << mv.cell();
        if self.zone_bits(mv.zone(), Side::First) & bit != 0 {
            Some(Side::First)
        } else if self.zone_bits(mv.zone(), Side::Second) & bit != 0 {
            Some(Side::Second)
        } else {
            None
        }
    }

    /// Owner of a won zone, if any.
    pub fn zone_winner(&self, zone: u8) -> Option<Side> {
        if (self.meta_bits(Side::First) >> zone) & 1 == 1 {
            Some(Side::First)
        } else if (self.meta_bits(Side::Second) >> zone) & 1 == 1 {
            Some(Side::Second)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn with_stone(mut self, mv: Move, side: Side) -> Self {
        let shift = Self::zone_shift(mv.zone(), side) + mv.cell() as u32;
        *self.zone_word_mut(mv.zone(), side) |= 1 << shift;
        self
    }

    #[inline]
    pub(crate) fn with_zone_won(mut self, zone: u8, side: Side) -> Self {
        let offset = match side {
            Side::First => META_FIRST_OFFSET,
            Side::Second => META_SECOND_OFFSET,
        };
        self.shared |= 1 << (offset + zone as u32);
        self
    }

    #[inline]
    pub(crate) fn with_forced_zone(mut self, zone: u8) -> Self {
        debug_assert!(zone <= FREE_CHOICE);
        self.shared = (self.shared & !FORCED_MASK) | ((zone as u64) << FORCED_OFFSET);
        self
    }
}

impl fmt::Display for Board {
    /// Nine text rows of the small grids, then the meta-board and forced zone.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "---+---+---";

        let cell_char = |mv: Move| self.occupant(mv).map_or('.', Side::symbol);

        writeln!(f, "{SEPARATOR}")?;
        for zone_row in 0..3u8 {
            for cell_row in 0..3u8 {
                for zone_col in 0..3u8 {
                    if zone_col > 0 {
                        write!(f, "|")?;
                    }
                    for cell_col in 0..3u8 {
                        let mv = Move::from_index_unchecked(
                            (3 * zone_row + zone_col) * ZONES + 3 * cell_row + cell_col,
                        );
                        write!(f, "{}", cell_char(mv))?;
                    }
                }
                writeln!(f)?;
            }
            writeln!(f, "{SEPARATOR}")?;
        }

        for row in 0..3u8 {
            for col in 0..3u8 {
                let symbol = self.zone_winner(3 * row + col).map_or('.', Side::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }

        match self.forced_zone() {
            Some(zone) => write!(f, "ZONE: {}", ZONE_LABELS[zone as usize].to_uppercase()),
            None => write!(f, "ZONE: ANY"),
        }
    }
}
