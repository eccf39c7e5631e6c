//! Fixed-depth negamax with fail-hard alpha-beta pruning.
//!
//! No transposition table, no iterative deepening, no move ordering: moves are
//! searched in generator order, and that order is also the tie-break (only a
//! strictly better score replaces the current best line).

pub mod pv;

#[cfg(feature = "multithreading")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Side};
use crate::evaluation::{DRAW, EvalTables, LOSS, WIN, evaluate, meta_verdict};
use crate::moves::{apply_move, legal_moves};
use crate::notation::format_score;

pub use pv::{MAX_PLY, PrincipalVariation};

/// Search parameters supplied by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: usize,
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 6,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Score for the side to move, within `[LOSS, WIN]`.
    pub score: i32,
    pub pv: PrincipalVariation,
    /// Positions visited, root included.
    pub nodes: u64,
}

impl SearchResult {
    pub fn best_move(&self) -> Option<Move> {
        self.pv.best_move()
    }

    /// Flattened, display-ready form of the result.
    pub fn report(&self) -> SearchReport {
        SearchReport {
            best_move: self.best_move(),
            pv: self.pv.moves().collect(),
            score: self.score,
            score_text: format_score(self.score, self.pv.horizon()),
            depth: self.pv.horizon(),
            nodes: self.nodes,
        }
    }
}

/// What the drivers print or hand to JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub pv: Vec<Move>,
    pub score: i32,
    pub score_text: String,
    pub depth: usize,
    pub nodes: u64,
}

struct Searcher<'a> {
    tables: &'a EvalTables,
    horizon: usize,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    fn new(tables: &'a EvalTables, horizon: usize) -> Self {
        Searcher {
            tables,
            horizon,
            nodes: 0,
        }
    }

    /// Decided or exhausted position, `depth` plies left on the horizon.
    /// Wins are worth less the further they are from the root, losses more.
    #[inline]
    fn terminal_score(&self, board: &Board, side: Side, depth: usize) -> i32 {
        let ply = (self.horizon - depth) as i32;
        match meta_verdict(board, side, self.tables) {
            WIN => WIN - ply,
            LOSS => LOSS + ply,
            _ => DRAW,
        }
    }

    fn negamax(
        &mut self,
        board: Board,
        side: Side,
        depth: usize,
        mut alpha: i32,
        beta: i32,
    ) -> (i32, PrincipalVariation) {
        self.nodes += 1;

        let moves = legal_moves(&board);

        if moves.is_empty() {
            let score = self.terminal_score(&board, side, depth);
            return (score, PrincipalVariation::empty(self.horizon));
        }

        if depth == 0 {
            let score = evaluate(&board, side, self.tables);
            return (score, PrincipalVariation::empty(self.horizon));
        }

        let ply = self.horizon - depth;
        let mut best = PrincipalVariation::empty(self.horizon);

        for mv in moves {
            let (score, mut line) = self.negamax(
                apply_move(board, mv, side),
                side.opponent(),
                depth - 1,
                -beta,
                -alpha,
            );
            let score = -score;
            line.set(ply, mv);

            if score >= beta {
                return (beta, line);
            }
            if score > alpha {
                alpha = score;
                best = line;
            }
        }

        (alpha, best)
    }
}

/// Best line for `side` to move on `board`, looking `depth` plies ahead.
///
/// `depth` is capped at [`MAX_PLY`]. At depth 0 the score is the static
/// evaluation and the line is empty.
pub fn search(board: &Board, side: Side, depth: usize, tables: &EvalTables) -> SearchResult {
    let depth = depth.min(MAX_PLY);
    let mut searcher = Searcher::new(tables, depth);
    let (score, pv) = searcher.negamax(*board, side, depth, LOSS, WIN);

    log::debug!(
        "depth {} search: score {} ({}), {} nodes",
        depth,
        score,
        format_score(score, depth),
        searcher.nodes
    );

    SearchResult {
        score,
        pv,
        nodes: searcher.nodes,
    }
}

/// [`search`] with the root moves spread over the rayon pool.
///
/// Each root move gets its own full window; merging keeps the first move with
/// the strictly highest score, so the chosen move and score match [`search`].
#[cfg(feature = "multithreading")]
pub fn search_parallel(
    board: &Board,
    side: Side,
    depth: usize,
    tables: &EvalTables,
) -> SearchResult {
    let depth = depth.min(MAX_PLY);
    let moves = legal_moves(board);
    if moves.is_empty() || depth == 0 {
        return search(board, side, depth, tables);
    }

    let branches: Vec<(i32, PrincipalVariation, u64)> = moves
        .par_iter()
        .map(|&mv| {
            let mut searcher = Searcher::new(tables, depth);
            let (score, mut line) =
                searcher.negamax(apply_move(*board, mv, side), side.opponent(), depth - 1, LOSS, WIN);
            line.set(0, mv);
            (-score, line, searcher.nodes)
        })
        .collect();

    let mut alpha = LOSS;
    let mut best = PrincipalVariation::empty(depth);
    let mut nodes = 1;
    for (score, line, branch_nodes) in branches {
        log::trace!("root {:?}: {}", line.best_move(), score);
        nodes += branch_nodes;
        if score > alpha {
            alpha = score;
            best = line;
        }
    }

    log::debug!(
        "depth {} parallel search: score {} ({}), {} nodes",
        depth,
        alpha,
        format_score(alpha, depth),
        nodes
    );

    SearchResult {
        score: alpha,
        pv: best,
        nodes,
    }
}

/// Runs [`search`] or [`search_parallel`] as the config asks. Without the
/// `multithreading` feature the parallel flag is ignored.
pub fn search_with(
    board: &Board,
    side: Side,
    config: &SearchConfig,
    tables: &EvalTables,
) -> SearchResult {
    #[cfg(feature = "multithreading")]
    let result = if config.parallel {
        search_parallel(board, side, config.depth, tables)
    } else {
        search(board, side, config.depth, tables)
    };

    #[cfg(not(feature = "multithreading"))]
    let result = search(board, side, config.depth, tables);

    result
}
