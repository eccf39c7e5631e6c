//! Line encoding for a single 3x3 grid.
//!
//! A grid is the low 9 bits of a `u64`, cells numbered row-major from the
//! top-left. The encoding spreads those bits over eight 3-bit groups, one per
//! winning line, so that the popcount of a group is the number of occupied
//! cells on that line.
//!
//! Group order: columns (0-3-6, 1-4-7, 2-5-8), rows (0-1-2, 3-4-5, 6-7-8),
//! then the two diagonals (0-4-8, 2-4-6).

/// One 3-bit line group.
pub const LINE_MASK: u64 = 0b111;

/// Number of winning lines in a grid.
pub const LINE_COUNT: usize = 8;

/// All 9 cells of a grid.
pub const GRID_MASK: u64 = 0b111_111_111;

/// Lowest bit of every line group.
const GROUP_LOW_BITS: u64 = 0b001_001_001_001_001_001_001_001;

/// Contribution of each cell to the line encoding.
/// Corners sit on 3 lines, edges on 2, the centre on 4.
const CELL_LINES: [u64; 9] = [
    0b000_100_000_000_100_000_000_100,
    0b000_000_000_000_010_000_100_000,
    0b100_000_000_000_001_100_000_000,
    0b000_000_000_100_000_000_000_010,
    0b010_010_000_010_000_000_010_000,
    0b000_000_000_001_000_010_000_000,
    0b001_000_100_000_000_000_000_001,
    0b000_000_010_000_000_000_001_000,
    0b000_001_001_000_000_001_000_000,
];

/// Map a 9-bit occupancy to its 24-bit line encoding.
#[inline]
pub const fn lines(grid: u64) -> u64 {
    let mut encoded = 0;
    let mut cell = 0;
    while cell < 9 {
        if (grid >> cell) & 1 == 1 {
            encoded |= CELL_LINES[cell];
        }
        cell += 1;
    }
    encoded
}

/// Occupied-cell count on line `line` of an encoding produced by [`lines`].
#[inline(always)]
pub const fn line_count(encoded: u64, line: usize) -> u32 {
    ((encoded >> (3 * line)) & LINE_MASK).count_ones()
}

/// True if the grid holds three in a row.
#[inline]
pub const fn has_line(grid: u64) -> bool {
    let encoded = lines(grid);
    encoded & (encoded >> 1) & (encoded >> 2) & GROUP_LOW_BITS != 0
}
