use serde::Serialize;

use crate::board::{Board, Move, Side};
use crate::error::GameError;
use crate::lines::has_line;
use crate::moves::{MoveList, apply_move, legal_moves, try_apply_move};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win(Side),
    Draw,
}

/// A game in progress: position, side to move and the moves so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Side,
    pub history: Vec<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            board: Board::empty(),
            turn: Side::First,
            history: Vec::with_capacity(81),
        }
    }

    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.board)
    }

    /// Play `mv` for the side to move, rejecting anything not legal here.
    pub fn play(&mut self, mv: Move) -> Result<(), GameError> {
        self.board = try_apply_move(self.board, mv, self.turn)?;
        self.turn = self.turn.opponent();
        self.history.push(mv);
        Ok(())
    }

    /// Result of the game, `None` while moves remain.
    pub fn outcome(&self) -> Option<Outcome> {
        if has_line(self.board.meta_bits(Side::First)) {
            Some(Outcome::Win(Side::First))
        } else if has_line(self.board.meta_bits(Side::Second)) {
            Some(Outcome::Win(Side::Second))
        } else if self.legal_moves().is_empty() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Number of leaf positions `depth` plies ahead.
    pub fn perft(&self, depth: usize) -> u64 {
        perft_board(self.board, self.turn, depth)
    }
}

fn perft_board(board: Board, side: Side, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(&board);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft_board(apply_move(board, mv, side), side.opponent(), depth - 1))
        .sum()
}
