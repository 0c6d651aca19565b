use std::io;

use anyhow::Context;
use chessrules::chess::game::Game;
use chessrules::Engine;
use clap::Parser;
use log::info;

/// Chess rules engine driven by text commands on stdin.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Initial position in Forsyth-Edwards Notation. Castling and en passant
    /// fields are ignored.
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    chessrules::print_engine_info();

    let game = match args.fen {
        Some(fen) => Game::from_fen(&fen).context("parsing --fen")?,
        None => Game::new(),
    };
    info!("starting from {game}");

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut engine = Engine::new(game, &mut input, &mut output);
    engine.run()
}
