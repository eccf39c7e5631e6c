// Table-driven position evaluation.
//
// The meta-board entry decides terminal positions on its own; otherwise the
// score is the meta-board heuristic plus one small-grid lookup per open zone.

pub mod tables;
pub mod weights;

use crate::board::{Board, Side, ZONES};
use crate::lines::GRID_MASK;

pub use tables::EvalTables;
pub use weights::{DRAW, LOSS, WIN};

/// Heuristic score of `board`, positive when it favours `side`.
#[inline]
pub fn evaluate(board: &Board, side: Side, tables: &EvalTables) -> i32 {
    let meta = tables.large(board.meta_key());

    if meta == WIN || meta == LOSS {
        return side.orient(meta);
    }

    if board.meta_occupied() == GRID_MASK {
        return DRAW;
    }

    let score = (0..ZONES)
        .filter(|&zone| !board.is_zone_won(zone) && !board.is_zone_full(zone))
        .map(|zone| tables.small(board.zone_key(zone)))
        .fold(meta, |acc, zone_score| acc + zone_score);

    side.orient(score)
}

/// Exact verdict of the meta-board for `side`: a WIN/LOSS sentinel when a
/// line is complete, DRAW otherwise.
#[inline]
pub fn meta_verdict(board: &Board, side: Side, tables: &EvalTables) -> i32 {
    match tables.large(board.meta_key()) {
        WIN => side.orient(WIN),
        LOSS => side.orient(LOSS),
        _ => DRAW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;
    use crate::moves::apply_move;

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    #[test]
    fn test_initial_position_is_level() {
        let tables = EvalTables::global();
        let board = Board::empty();
        assert_eq!(evaluate(&board, Side::First, tables), 0);
        assert_eq!(evaluate(&board, Side::Second, tables), 0);
    }

    #[test]
    fn test_centre_opening() {
        let tables = EvalTables::global();
        let board = apply_move(Board::empty(), mv("c/c"), Side::First);
        // Only zone C carries anything: four one-stone lines and the centre bonus.
        assert_eq!(evaluate(&board, Side::First, tables), 4 + 9);
        assert_eq!(evaluate(&board, Side::Second, tables), -(4 + 9));
    }

    #[test]
    fn test_won_zone_counts_on_meta_board_only() {
        let tables = EvalTables::global();
        let mut board = Board::empty();
        let mut side = Side::First;
        for text in ["nw/nw", "nw/e", "e/e", "e/nw", "nw/n", "n/nw", "nw/ne"] {
            board = apply_move(board, mv(text), side);
            side = side.opponent();
        }
        assert!(board.is_zone_won(0));

        let expected_meta = 3 * 20 + 7 * 25;
        let expected_zones: i32 = (1..ZONES)
            .map(|zone| tables.small(board.zone_key(zone)))
            .sum();
        assert_eq!(
            evaluate(&board, Side::First, tables),
            expected_meta + expected_zones
        );
    }

    #[test]
    fn test_meta_verdict_for_open_meta_board() {
        let tables = EvalTables::global();
        assert_eq!(meta_verdict(&Board::empty(), Side::First, tables), DRAW);
    }
}
