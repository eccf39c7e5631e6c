//! Precomputed grid evaluations.
//!
//! Every pair of 9-bit occupancies `(us, them)` is scored once, keyed by
//! `(them << 9) | us`. Overlapping pairs are scored too; play never reaches
//! them. Scores are from `us`'s perspective, the caller flips the sign.

use once_cell::sync::Lazy;
#[cfg(feature = "multithreading")]
use rayon::prelude::*;

use super::weights::{DRAW, GridWeights, LARGE, LOSS, SMALL, WIN, positional};
use crate::lines::{GRID_MASK, LINE_COUNT, line_count, lines};

/// Entries per table: all `(us, them)` pairs of 9-bit grids.
pub const TABLE_SIZE: usize = 1 << 18;

const ROW_LEN: usize = 1 << 9;

static TABLES: Lazy<EvalTables> = Lazy::new(EvalTables::build);

/// How a single grid stands for `us`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Won,
    Lost,
    Drawn,
    Open { large: i32, small: i32 },
}

fn verdict(us: u64, them: u64) -> Verdict {
    let us_lines = lines(us);
    let them_lines = lines(them);

    let mut us_won = false;
    let mut them_won = false;
    let mut large = 0;
    let mut small = 0;

    for line in 0..LINE_COUNT {
        let us_count = line_count(us_lines, line);
        let them_count = line_count(them_lines, line);

        // contested
        if us_count != 0 && them_count != 0 {
            continue;
        }

        match (us_count, them_count) {
            (3, _) => us_won = true,
            (_, 3) => them_won = true,
            _ => {
                large += line_balance(&LARGE, us_count, them_count);
                small += line_balance(&SMALL, us_count, them_count);
            }
        }
    }

    if us_won {
        Verdict::Won
    } else if them_won {
        Verdict::Lost
    } else if us | them == GRID_MASK {
        Verdict::Drawn
    } else {
        let bonus = positional(us, them);
        Verdict::Open {
            large: large + bonus * LARGE.positional_scale,
            small: small + bonus * SMALL.positional_scale,
        }
    }
}

#[inline]
fn line_balance(weights: &GridWeights, us_count: u32, them_count: u32) -> i32 {
    weights.line_score(us_count) - weights.line_score(them_count)
}

/// Fill one `them` row: keys `(them << 9) | us` for every `us`.
fn fill_row(them: usize, large: &mut [i32], small: &mut [i32]) {
    for (us, (large_entry, small_entry)) in large.iter_mut().zip(small.iter_mut()).enumerate() {
        match verdict(us as u64, them as u64) {
            Verdict::Won => *large_entry = WIN,
            Verdict::Lost => *large_entry = LOSS,
            Verdict::Drawn => *large_entry = DRAW,
            Verdict::Open {
                large: large_score,
                small: small_score,
            } => {
                *large_entry = large_score;
                *small_entry = small_score;
            }
        }
    }
}

/// The large-grid (meta-board) and small-grid (zone) lookup tables.
///
/// Read-only once built, so a shared reference can be handed to any number of
/// concurrent searches.
pub struct EvalTables {
    large: Box<[i32]>,
    small: Box<[i32]>,
}

impl EvalTables {
    /// Score every occupancy pair. Expensive; use [`EvalTables::global`].
    pub fn build() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let start = std::time::Instant::now();

        let mut large = vec![0; TABLE_SIZE].into_boxed_slice();
        let mut small = vec![0; TABLE_SIZE].into_boxed_slice();

        #[cfg(feature = "multithreading")]
        large
            .par_chunks_mut(ROW_LEN)
            .zip(small.par_chunks_mut(ROW_LEN))
            .enumerate()
            .for_each(|(them, (large_row, small_row))| fill_row(them, large_row, small_row));

        #[cfg(not(feature = "multithreading"))]
        large
            .chunks_mut(ROW_LEN)
            .zip(small.chunks_mut(ROW_LEN))
            .enumerate()
            .for_each(|(them, (large_row, small_row))| fill_row(them, large_row, small_row));

        #[cfg(not(target_arch = "wasm32"))]
        log::info!(
            "evaluation tables built: {} entries x 2 in {:?}",
            TABLE_SIZE,
            start.elapsed()
        );
        #[cfg(target_arch = "wasm32")]
        log::info!("evaluation tables built: {} entries x 2", TABLE_SIZE);

        EvalTables { large, small }
    }

    /// Process-wide tables, built on first access.
    #[inline]
    pub fn global() -> &'static EvalTables {
        &TABLES
    }

    /// Meta-board score, or a WIN/LOSS/DRAW sentinel for decided grids.
    #[inline(always)]
    pub fn large(&self, key: usize) -> i32 {
        self.large[key]
    }

    /// Zone score. Zero for decided grids; callers skip those anyway.
    #[inline(always)]
    pub fn small(&self, key: usize) -> i32 {
        self.small[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::has_line;

    fn key(us: u64, them: u64) -> usize {
        ((them << 9) | us) as usize
    }

    #[test]
    fn test_full_grid_is_a_win() {
        let tables = EvalTables::global();
        assert_eq!(tables.large(key(GRID_MASK, 0)), WIN);
        assert_eq!(tables.large(key(0, GRID_MASK)), LOSS);
        assert_eq!(tables.large(key(0b111, 0)), WIN);
        assert_eq!(tables.large(key(0b000_000_010, 0b100_010_001)), LOSS);
    }

    #[test]
    fn test_drawn_grid() {
        // X O X / X O O / O X X
        let us = 0b110_001_101;
        let them = 0b001_110_010;
        assert_eq!(us & them, 0);
        assert_eq!(us | them, GRID_MASK);
        assert_eq!(EvalTables::global().large(key(us, them)), DRAW);
        assert_eq!(verdict(us, them), Verdict::Drawn);
    }

    #[test]
    fn test_empty_grid_scores_zero() {
        let tables = EvalTables::global();
        assert_eq!(tables.large(0), 0);
        assert_eq!(tables.small(0), 0);
    }

    #[test]
    fn test_single_centre_stone() {
        // Four lines with one stone each, plus the centre bonus.
        let tables = EvalTables::global();
        assert_eq!(tables.large(key(0b000_010_000, 0)), 4 * 20 + 9 * 25);
        assert_eq!(tables.small(key(0b000_010_000, 0)), 4 + 9);
    }

    #[test]
    fn test_contested_lines_score_nothing() {
        // Corner vs adjacent edge on the top row: that row is dead.
        let open_lines_us = 2 * 20; // column 0, main diagonal
        let open_lines_them = 20; // column 1
        let bonus = 7 - 5;
        assert_eq!(
            EvalTables::global().large(key(0b001, 0b010)),
            open_lines_us - open_lines_them + bonus * 25
        );
    }

    #[test]
    fn test_two_in_line() {
        // Cells 0 and 1: row 0 has two, columns 0/1 and the diagonal one each.
        let expected = 8 + 3 + 7 + 5;
        assert_eq!(EvalTables::global().small(key(0b011, 0)), expected);
    }

    #[test]
    fn test_tables_are_antisymmetric() {
        let tables = EvalTables::global();
        for us in 0..512u64 {
            for them in (0..512u64).step_by(7) {
                // Overlaps and double wins never occur in play.
                if us & them != 0 || (has_line(us) && has_line(them)) {
                    continue;
                }
                assert_eq!(tables.large(key(us, them)), -tables.large(key(them, us)));
                assert_eq!(tables.small(key(us, them)), -tables.small(key(them, us)));
            }
        }
    }

    #[test]
    fn test_decided_grids_leave_small_table_empty() {
        let tables = EvalTables::global();
        assert_eq!(tables.small(key(0b111, 0b011_000)), 0);
        assert_eq!(tables.small(key(0b110_001_101, 0b001_110_010)), 0);
    }
}
