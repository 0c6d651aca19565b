//! Commands of the line-based text protocol understood by
//! [`crate::Engine`].

use anyhow::{bail, Context};

use crate::chess::core::{Move, Square};

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    /// Reset to the starting position.
    NewGame,
    /// Replace the game: starting position if FEN is not given.
    SetPosition { fen: Option<String> },
    /// Dump the board.
    Display,
    /// Legal moves of a single square or of the whole side to move.
    Moves { square: Option<Square> },
    MakeMove(Move),
    Status,
    Perft { depth: u8 },
    Quit,
    Unknown(String),
}

impl Command {
    /// Parses a single line of input. Unknown commands are not an error: they
    /// are reported back by the engine.
    ///
    /// # Errors
    ///
    /// If a known command has malformed arguments.
    pub(super) fn parse(input: &str) -> anyhow::Result<Self> {
        let parts = input.split_ascii_whitespace().collect::<Vec<_>>();
        match parts.as_slice() {
            ["new"] => Ok(Self::NewGame),
            ["position", "startpos"] => Ok(Self::SetPosition { fen: None }),
            ["position", "fen", fen @ ..] if !fen.is_empty() => Ok(Self::SetPosition {
                fen: Some(fen.join(" ")),
            }),
            ["position", ..] => bail!("expected \"position startpos\" or \"position fen <FEN>\""),
            ["d"] => Ok(Self::Display),
            ["moves"] => Ok(Self::Moves { square: None }),
            ["moves", square] => Ok(Self::Moves {
                square: Some(Square::try_from(*square)?),
            }),
            ["move", next_move] => Ok(Self::MakeMove(Move::from_uci(next_move)?)),
            ["move", ..] => bail!("expected exactly one move, e.g. \"move e2e4\""),
            ["status"] => Ok(Self::Status),
            ["perft", depth] => Ok(Self::Perft {
                depth: depth
                    .parse()
                    .with_context(|| format!("perft depth should be a small number, got {depth}"))?,
            }),
            ["quit"] => Ok(Self::Quit),
            _ => Ok(Self::Unknown(parts.join(" "))),
        }
    }
}
