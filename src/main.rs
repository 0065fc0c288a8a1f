//! Board engine chess console

use std::io::Write;

use anyhow::{bail, Context, Result};
use board_engine::chess::{Chess, ChessColor, ChessSettings, CoordinateMove};
use board_engine::Console;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Play these moves from the standard position and print the result,
    /// e.g. "e2e4 e7e5 g1f3"
    #[arg(long)]
    moves: Option<String>,

    /// Play this many random legal plies (after any scripted moves)
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Black moves first
    #[arg(long)]
    black_first: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let settings = ChessSettings {
        first_color: if args.black_first { ChessColor::Black } else { ChessColor::White },
        ..ChessSettings::default()
    };
    let mut console = Console::new(settings);

    if args.moves.is_none() && args.random.is_none() {
        println!("Board engine chess console");
        println!("Type a move like 'e2e4', 'd' to display, 'moves e2', 'undo', 'new' or 'quit'");
        return console.run().context("console i/o failed");
    }

    let game = console.game_mut();
    game.start_game()?;
    if let Some(moves) = &args.moves {
        for token in moves.split_whitespace() {
            let mv: CoordinateMove = token.parse()?;
            if !game.play_coordinates(&mv)? {
                bail!("illegal move {mv}");
            }
        }
    }
    if let Some(plies) = args.random {
        let played = play_random(game, plies, args.seed)?;
        let line: Vec<String> = played.iter().map(ToString::to_string).collect();
        println!("{}", line.join(" "));
    }

    print!("{game}");
    match game.winner() {
        Some(winner) => println!("checkmate, {winner} wins"),
        None => println!("{} to move", game.turn()),
    }
    Ok(())
}

fn play_random(game: &mut Chess, plies: usize, seed: u64) -> Result<Vec<CoordinateMove>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = Vec::with_capacity(plies);
    for _ in 0..plies {
        if !game.is_started() {
            break;
        }
        let candidates = game.all_legal_moves()?;
        if candidates.is_empty() {
            log::info!("no legal move left for {}", game.turn());
            break;
        }
        let mv = candidates[rng.random_range(0..candidates.len())];
        if !game.play(mv.from, mv.to)? {
            bail!("generated move {mv} was refused");
        }
        played.push(mv);
    }
    Ok(played)
}
