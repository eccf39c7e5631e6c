// Scoring constants shared by table construction and search.

/// Decisive scores. Search adjusts these by ply distance.
pub const WIN: i32 = 1_000_000;
pub const DRAW: i32 = 0;
pub const LOSS: i32 = -WIN;

/// Cell masks within a grid.
pub const CORNER_MASK: u64 = 0b101_000_101;
pub const EDGE_MASK: u64 = 0b010_101_010;
pub const CENTRE_MASK: u64 = 0b000_010_000;

// Positional weight per occupied cell
pub const CORNER: i32 = 7;
pub const EDGE: i32 = 5;
pub const CENTRE: i32 = 9;

/// Line and placement weights for one grid scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWeights {
    /// Uncontested line holding two of one side's stones.
    pub two_in_line: i32,
    /// Uncontested line holding one stone.
    pub one_in_line: i32,
    /// Multiplier on the positional bonus.
    pub positional_scale: i32,
}

impl GridWeights {
    #[inline]
    pub const fn line_score(&self, count: u32) -> i32 {
        match count {
            2 => self.two_in_line,
            1 => self.one_in_line,
            _ => 0,
        }
    }
}

/// The meta-board: winning zones is what decides the game.
pub const LARGE: GridWeights = GridWeights {
    two_in_line: 90,
    one_in_line: 20,
    positional_scale: 25,
};

/// Individual zones.
pub const SMALL: GridWeights = GridWeights {
    two_in_line: 8,
    one_in_line: 1,
    positional_scale: 1,
};

/// Placement bonus of `us` minus that of `them`, unscaled.
#[inline]
pub const fn positional(us: u64, them: u64) -> i32 {
    CORNER * count_diff(us, them, CORNER_MASK)
        + EDGE * count_diff(us, them, EDGE_MASK)
        + CENTRE * count_diff(us, them, CENTRE_MASK)
}

#[inline(always)]
const fn count_diff(us: u64, them: u64, mask: u64) -> i32 {
    (us & mask).count_ones() as i32 - (them & mask).count_ones() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_partition_grid() {
        assert_eq!(CORNER_MASK | EDGE_MASK | CENTRE_MASK, 0b111_111_111);
        assert_eq!(CORNER_MASK & EDGE_MASK, 0);
        assert_eq!(CORNER_MASK & CENTRE_MASK, 0);
        assert_eq!(EDGE_MASK & CENTRE_MASK, 0);
    }

    #[test]
    fn test_positional_is_antisymmetric() {
        assert_eq!(positional(0b000_010_000, 0), CENTRE);
        assert_eq!(positional(0b000_000_001, 0b000_000_010), CORNER - EDGE);
        for (us, them) in [(0b101, 0b010_000), (0b1_0000_0001, 0b110)] {
            assert_eq!(positional(us, them), -positional(them, us));
        }
    }

    #[test]
    fn test_line_score_ignores_empty_and_full() {
        assert_eq!(LARGE.line_score(0), 0);
        assert_eq!(LARGE.line_score(3), 0);
        assert_eq!(SMALL.line_score(2), 8);
    }
}
