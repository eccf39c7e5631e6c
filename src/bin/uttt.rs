//! Text driver: play against the engine, or watch it play itself.
//!
//! Usage:
//!   cargo run --release --features cli --bin uttt -- --depth 7
//!   cargo run --release --features cli --bin uttt -- --selfplay --json
//!
//! Moves are typed as `<zone>/<cell>`, e.g. `c/c` or `nw/se`.

use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use uttt_engine::notation::{format_line, format_score};
use uttt_engine::search::{MAX_PLY, search_with};
use uttt_engine::{GameState, Move, Outcome, SearchConfig, initialize_tables};

#[derive(Parser, Debug)]
#[command(name = "uttt", about = "Ultimate Tic-Tac-Toe against a fixed-depth alpha-beta engine")]
struct Args {
    /// Search depth in plies
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u64).range(1..=MAX_PLY as u64))]
    depth: u64,

    /// Engine plays X and moves first
    #[arg(long)]
    engine_first: bool,

    /// Engine plays both sides
    #[arg(long)]
    selfplay: bool,

    /// Print one JSON search report per engine move instead of the text summary
    #[arg(long)]
    json: bool,

    /// Split root moves across threads (needs the `multithreading` feature)
    #[arg(long)]
    parallel: bool,
}

fn engine_move(game: &mut GameState, config: &SearchConfig, json: bool) -> Result<(), Box<dyn Error>> {
    let tables = initialize_tables();

    let start = Instant::now();
    let result = search_with(&game.board, game.turn, config, tables);
    let elapsed = start.elapsed().as_millis();

    // A position with moves always yields a line; fall back to the first move regardless.
    let mv = result
        .best_move()
        .or_else(|| game.legal_moves().first().copied())
        .ok_or("engine asked to move in a finished game")?;
    game.play(mv)?;

    if json {
        println!("{}", serde_json::to_string(&result.report())?);
    } else {
        println!(
            "AI Move: {} PV: [{}] Eval: {} Time elapsed: {} ms",
            mv,
            format_line(result.pv.moves()),
            format_score(result.score, config.depth),
            elapsed
        );
    }
    Ok(())
}

/// Prompt until the user enters a legal move. `None` on end of input.
fn read_human_move(game: &GameState, input: &mut impl BufRead) -> io::Result<Option<Move>> {
    let legal = game.legal_moves();
    loop {
        print!("Move: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.parse::<Move>() {
            Ok(mv) if legal.contains(&mv) => return Ok(Some(mv)),
            Ok(mv) => log::debug!("rejected illegal move {mv}"),
            Err(err) => log::debug!("{err}"),
        }
    }
}

fn announce(game: &GameState) {
    println!("Game over");
    match game.outcome() {
        Some(Outcome::Win(side)) => println!("{} wins", side.symbol()),
        Some(Outcome::Draw) => println!("Draw"),
        None => {}
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = SearchConfig {
        depth: args.depth as usize,
        parallel: args.parallel,
    };

    // Build the tables before the first prompt, not inside the first search.
    initialize_tables();

    let mut game = GameState::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if args.selfplay {
        while !game.is_over() {
            engine_move(&mut game, &config, args.json)?;
            if !args.json {
                println!("{}", game.board);
            }
        }
        announce(&game);
        return Ok(());
    }

    let engine_side = if args.engine_first {
        println!("Playing X");
        engine_move(&mut game, &config, args.json)?;
        game.turn.opponent()
    } else {
        println!("Playing O");
        game.turn.opponent()
    };
    log::info!("engine plays {:?}", engine_side);

    println!("{}", game.board);

    loop {
        if game.is_over() {
            break;
        }
        let Some(mv) = read_human_move(&game, &mut input)? else {
            return Ok(());
        };
        game.play(mv)?;
        println!("{}", game.board);

        if game.is_over() {
            break;
        }
        engine_move(&mut game, &config, args.json)?;
        println!("{}", game.board);
    }

    announce(&game);
    Ok(())
}
