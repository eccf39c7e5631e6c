//! Ultimate Tic-Tac-Toe engine.
//!
//! Nine 3x3 zones make up a 3x3 meta-board. Three in a row inside a zone wins
//! that zone; three zones in a row wins the game. The cell a player picks
//! decides which zone the opponent must play in next.
//!
//! - [`board`]: packed three-word position and its accessors
//! - [`lines`]: 3x3 line encoding used for every win test
//! - [`evaluation`]: precomputed grid tables and the evaluator
//! - [`moves`]: legal-move generation and move application
//! - [`search`]: negamax alpha-beta with principal variation
//! - [`game`]: game record on top of the above
//!
//! ```
//! use uttt_engine::{Side, initial_state, initialize_tables, legal_moves, search};
//!
//! let tables = initialize_tables();
//! let board = initial_state();
//! let result = search(&board, Side::First, 2, tables);
//! assert!(legal_moves(&board).contains(&result.best_move().unwrap()));
//! ```

pub mod board;
mod bindings;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod lines;
pub mod moves;
pub mod notation;
pub mod search;

pub use bindings::Engine;
pub use board::{Board, Move, Side};
pub use error::GameError;
pub use evaluation::{EvalTables, evaluate};
pub use game::{GameState, Outcome};
pub use moves::{MoveList, apply_move, legal_moves, try_apply_move};
pub use search::{PrincipalVariation, SearchConfig, SearchReport, SearchResult, search};

#[cfg(feature = "multithreading")]
pub use search::search_parallel;

/// Build the evaluation tables if not built yet. Call once before searching;
/// later calls return the same tables.
pub fn initialize_tables() -> &'static EvalTables {
    EvalTables::global()
}

/// The empty board, any zone playable.
pub const fn initial_state() -> Board {
    Board::empty()
}
