// JavaScript bindings.
//
// The browser side keeps one `Engine` per game and talks to it in move text;
// search results cross the boundary as plain objects via serde-wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::board::Move;
use crate::evaluation::EvalTables;
use crate::game::{GameState, Outcome};
use crate::search::{SearchConfig, SearchResult, search_with};

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let line = format!("[{}] {}", record.level(), record.args());
            web_sys::console::log_1(&line.into());
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

fn init_runtime() {
    #[cfg(feature = "debug")]
    console_error_panic_hook::set_once();

    // Fails harmlessly when a logger is already installed.
    #[cfg(target_arch = "wasm32")]
    let _ = log::set_logger(&CONSOLE_LOGGER).map(|()| log::set_max_level(log::LevelFilter::Info));
}

fn to_js(result: &SearchResult) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&result.report()).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen]
pub struct Engine {
    game: GameState,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[wasm_bindgen]
impl Engine {
    /// New game. The first call also builds the evaluation tables.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        init_runtime();
        EvalTables::global();
        Engine {
            game: GameState::new(),
        }
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Vec<String> {
        self.game.legal_moves().into_iter().map(String::from).collect()
    }

    /// Play a move given as `"<zone>/<cell>"` for the side to move.
    pub fn play(&mut self, text: &str) -> Result<(), JsError> {
        let mv: Move = text.parse()?;
        self.game.play(mv)?;
        Ok(())
    }

    /// Search the current position without playing anything.
    #[wasm_bindgen(js_name = bestMove)]
    pub fn best_move(&self, depth: usize) -> Result<JsValue, JsError> {
        let config = SearchConfig {
            depth,
            ..SearchConfig::default()
        };
        to_js(&self.search(&config))
    }

    /// Like `bestMove`, with a `{ depth, parallel }` config object.
    #[wasm_bindgen(js_name = bestMoveWith)]
    pub fn best_move_with(&self, config: JsValue) -> Result<JsValue, JsError> {
        let config: SearchConfig =
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&self.search(&config))
    }

    /// `"X"`, `"O"`, `"draw"`, or `undefined` while the game is running.
    pub fn outcome(&self) -> Option<String> {
        self.game.outcome().map(|outcome| match outcome {
            Outcome::Win(side) => side.symbol().to_string(),
            Outcome::Draw => "draw".to_string(),
        })
    }

    pub fn render(&self) -> String {
        self.game.board.to_string()
    }
}

impl Engine {
    fn search(&self, config: &SearchConfig) -> SearchResult {
        search_with(&self.game.board, self.game.turn, config, EvalTables::global())
    }
}
