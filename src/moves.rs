use arrayvec::ArrayVec;

use crate::board::{Board, CELLS, FREE_CHOICE, Move, Side, ZONES};
use crate::error::GameError;
use crate::lines::{GRID_MASK, has_line};

/// Legal moves of one position. Never more than the 81 cells.
pub type MoveList = ArrayVec<Move, { CELLS as usize }>;

/// True once either side has three zones in a row.
#[inline]
pub fn is_decided(board: &Board) -> bool {
    has_line(board.meta_bits(Side::First)) || has_line(board.meta_bits(Side::Second))
}

#[inline]
fn push_empty_cells(board: &Board, zone: u8, moves: &mut MoveList) {
    let mut empty = !board.zone_occupied(zone) & GRID_MASK;
    while empty != 0 {
        let cell = empty.trailing_zeros() as u8;
        moves.push(Move::from_index_unchecked(zone * ZONES + cell));
        empty &= empty - 1;
    }
}

/// Legal moves in increasing index order, empty once the game is over.
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();

    if is_decided(board) {
        return moves;
    }

    match board.forced_zone() {
        Some(zone) => push_empty_cells(board, zone, &mut moves),
        None => {
            for zone in 0..ZONES {
                if !board.is_zone_won(zone) {
                    push_empty_cells(board, zone, &mut moves);
                }
            }
        }
    }

    moves
}

/// Successor of `board` after `side` plays `mv`.
///
/// `mv` must come from [`legal_moves`] for this board; anything else leaves
/// the result unspecified (checked in debug builds). Use [`try_apply_move`] for
/// untrusted input.
#[inline]
pub fn apply_move(board: Board, mv: Move, side: Side) -> Board {
    debug_assert!(
        legal_moves(&board).contains(&mv),
        "illegal move {mv} applied to position\n{board}"
    );

    let zone = mv.zone();
    let mut next = board.with_stone(mv, side);

    if has_line(next.zone_bits(zone, side)) {
        next = next.with_zone_won(zone, side);
    }

    let target = mv.cell();
    let forced = if next.is_zone_full(target) || next.is_zone_won(target) {
        FREE_CHOICE
    } else {
        target
    };

    next.with_forced_zone(forced)
}

/// Checked [`apply_move`].
pub fn try_apply_move(board: Board, mv: Move, side: Side) -> Result<Board, GameError> {
    let moves = legal_moves(&board);
    if moves.is_empty() {
        return Err(GameError::GameOver);
    }
    if !moves.contains(&mv) {
        return Err(GameError::IllegalMove { mv });
    }
    Ok(apply_move(board, mv, side))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    fn play(moves: &[&str]) -> (Board, Side) {
        let mut board = Board::empty();
        let mut side = Side::First;
        for text in moves {
            board = try_apply_move(board, mv(text), side).unwrap();
            side = side.opponent();
        }
        (board, side)
    }

    #[test]
    fn test_initial_moves_cover_board() {
        let moves = legal_moves(&Board::empty());
        assert_eq!(moves.len(), 81);
        assert!(moves.iter().enumerate().all(|(i, m)| m.index() as usize == i));
    }

    #[test]
    fn test_centre_opening_forces_centre() {
        let (board, _) = play(&["c/c"]);
        assert_eq!(board.forced_zone(), Some(4));

        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.zone() == 4 && m.cell() != 4));
    }

    #[test]
    fn test_forced_zone_follows_cell() {
        let (board, _) = play(&["nw/se"]);
        assert_eq!(board.forced_zone(), Some(8));
        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|m| m.zone() == 8));
    }

    #[test]
    fn test_winning_a_zone_sets_meta_bit() {
        let (board, side) = play(&["nw/nw", "nw/e", "e/e", "e/nw", "nw/n", "n/nw", "nw/ne"]);
        assert_eq!(board.zone_winner(0), Some(Side::First));
        assert_eq!(board.meta_bits(Side::Second), 0);
        assert_eq!(side, Side::Second);
        assert_eq!(board.forced_zone(), Some(2));

        // Sent back into a won zone: free choice, and the won zone is off limits.
        let board = try_apply_move(board, mv("ne/nw"), side).unwrap();
        assert_eq!(board.forced_zone(), None);
        let moves = legal_moves(&board);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.zone() != 0));
        assert_eq!(board.zone_winner(0), Some(Side::First));
    }

    #[test]
    fn test_full_zone_gives_free_choice() {
        // Zone C drawn: X O X / X O O / O X X.
        let first_cells = [0, 2, 3, 7, 8];
        let second_cells = [1, 4, 5, 6];
        let mut board = Board::empty();
        for cell in first_cells {
            board = board.with_stone(Move::from_parts(4, cell).unwrap(), Side::First);
        }
        for cell in second_cells {
            board = board.with_stone(Move::from_parts(4, cell).unwrap(), Side::Second);
        }
        let board = board.with_forced_zone(0);
        assert!(board.is_zone_full(4));
        assert!(!board.is_zone_won(4));

        let board = apply_move(board, mv("nw/c"), Side::First);
        assert_eq!(board.forced_zone(), None);
        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 81 - 9 - 1);
        assert!(moves.iter().all(|m| m.zone() != 4));
    }

    #[test]
    fn test_illegal_moves_are_rejected() {
        let (board, side) = play(&["c/c"]);
        assert_eq!(
            try_apply_move(board, mv("nw/nw"), side),
            Err(GameError::IllegalMove { mv: mv("nw/nw") })
        );
        assert_eq!(
            try_apply_move(board, mv("c/c"), side),
            Err(GameError::IllegalMove { mv: mv("c/c") })
        );
    }

    #[test]
    fn test_is_decided_on_empty_board() {
        assert!(!is_decided(&Board::empty()));
    }
}
