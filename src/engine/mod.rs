//! The engine hosts a single [`Game`] and drives it with commands read line by
//! line from the input stream, writing responses to the output stream.
//!
//! [`Engine::run`] is the "main loop": it owns the game, so every command is
//! applied to it in order and there is never more than one writer.
//!
//! Responses are one line per command unless stated otherwise:
//!
//! - `move <move>`: `ok <status>` or `error: <reason>`
//! - `moves [square]`: space-separated moves, `none` for an empty square
//! - `status`: `ongoing`, `check`, `checkmate` or `stalemate`
//! - `d`: board dump (multiple lines)
//! - `perft <depth>`: node count per move and the total (multiple lines)

use std::io::{BufRead, Write};

use anyhow::Context;
use itertools::Itertools;
use log::{debug, warn};

use crate::chess::game::Game;
use crate::chess::perft;
use crate::engine::command::Command;

mod command;

/// The Engine connects the game with the I/O: it parses commands, applies
/// them and reports the results.
pub struct Engine<'a, R: BufRead, W: Write> {
    game: Game,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with given game and provided I/O.
    #[must_use]
    pub fn new(game: Game, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes commands until "quit"
    /// is sent or the input is closed.
    ///
    /// Malformed and unknown commands are reported to the output and skipped:
    /// the game is not affected by them.
    ///
    /// # Errors
    ///
    /// If reading the input or writing the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("reading command from input")?;
            if read == 0 {
                debug!("input closed");
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    warn!("invalid command \"{}\": {e:#}", line.trim());
                    writeln!(self.output, "error: {e:#}")?;
                    continue;
                },
            };
            if command == Command::Quit {
                break;
            }
            self.handle(command)?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Current state of the hosted game.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    fn handle(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::NewGame => {
                self.game = Game::new();
                writeln!(self.output, "ok")?;
            },
            Command::SetPosition { fen } => {
                let game = match fen {
                    Some(fen) => Game::from_fen(&fen),
                    None => Ok(Game::new()),
                };
                match game {
                    Ok(game) => {
                        self.game = game;
                        writeln!(self.output, "ok")?;
                    },
                    Err(e) => {
                        warn!("rejected position: {e:#}");
                        writeln!(self.output, "error: {e:#}")?;
                    },
                }
            },
            Command::Display => write!(self.output, "{:?}", self.game)?,
            Command::Moves { square: Some(square) } => match self.game.legal_moves(square) {
                Some(moves) => writeln!(self.output, "{}", moves.iter().join(" "))?,
                None => writeln!(self.output, "none")?,
            },
            Command::Moves { square: None } => writeln!(
                self.output,
                "{}",
                self.game
                    .legal_moves_for(self.game.side_to_move())
                    .iter()
                    .join(" ")
            )?,
            Command::MakeMove(next_move) => match self.game.make_move(next_move) {
                Ok(()) => writeln!(self.output, "ok {}", self.game.status())?,
                Err(e) => writeln!(self.output, "error: {e}")?,
            },
            Command::Status => writeln!(self.output, "{}", self.game.status())?,
            Command::Perft { depth } => {
                let split = perft::divide(&self.game, depth);
                for (next_move, nodes) in &split {
                    writeln!(self.output, "{next_move}: {nodes}")?;
                }
                let total: u64 = if depth == 0 {
                    1
                } else {
                    split.iter().map(|(_, nodes)| nodes).sum()
                };
                writeln!(self.output)?;
                writeln!(self.output, "Nodes searched: {total}")?;
            },
            Command::Unknown(command) => {
                warn!("unknown command: {command}");
                writeln!(self.output, "error: unknown command \"{command}\"")?;
            },
            Command::Quit => unreachable!("quit is handled by the main loop"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Color;

    fn run(game: Game, commands: &str) -> (Game, String) {
        let mut input = Cursor::new(commands);
        let mut output = Vec::new();
        let mut engine = Engine::new(game, &mut input, &mut output);
        engine.run().unwrap();
        let game = engine.game().clone();
        (game, String::from_utf8(output).unwrap())
    }

    #[test]
    fn plays_moves() {
        let (game, output) = run(
            Game::new(),
            "move e2e4\nstatus\nmoves e7\nmoves e4\nmoves e5\n",
        );
        assert_eq!(output, "ok ongoing\nongoing\ne7e6 e7e5\ne4e5\nnone\n");
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn reports_checkmate() {
        let (game, output) = run(
            Game::new(),
            "move f2f3\nmove e7e5\nmove g2g4\nmove d8h4\nmoves\n",
        );
        assert_eq!(
            output,
            "ok ongoing\nok ongoing\nok ongoing\nok checkmate\n\n"
        );
        assert!(game.is_in_checkmate(Color::White));
    }

    #[test]
    fn rejects_illegal_moves() {
        let (game, output) = run(Game::new(), "move e2e5\nmove e7e5\nmove e2\n");
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "error: illegal move: e2e5");
        assert_eq!(lines[1], "error: illegal move: e7e5");
        assert!(lines[2].starts_with("error: "));
        assert_eq!(game, Game::new());
    }

    #[test]
    fn positions() {
        let (game, output) = run(
            Game::new(),
            "position fen 7k/5Q2/6K1/8/8/8/8/8 b - - 0 1\nstatus\nposition fen 8/8/8/8/8/8/8/8 w\n",
        );
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "ok");
        assert_eq!(lines[1], "stalemate");
        assert!(lines[2].starts_with("error: "));
        assert_eq!(game.to_string(), "7k/5Q2/6K1/8/8/8/8/8 b");

        let (game, output) = run(game, "new\n");
        assert_eq!(output, "ok\n");
        assert_eq!(game, Game::new());
    }

    #[test]
    fn stops_on_quit() {
        let (game, output) = run(Game::new(), "status\nquit\nmove e2e4\n");
        assert_eq!(output, "ongoing\n");
        assert_eq!(game, Game::new());
    }

    #[test]
    fn unknown_commands_are_skipped() {
        let (_, output) = run(Game::new(), "\nuci\nstatus\n");
        assert_eq!(output, "error: unknown command \"uci\"\nongoing\n");
    }

    #[test]
    fn perft() {
        let (_, output) = run(Game::new(), "perft 1\n");
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 22);
        assert!(lines.contains(&"e2e4: 1"));
        assert_eq!(lines.last(), Some(&"Nodes searched: 20"));
    }

    #[test]
    fn display() {
        let (_, output) = run(Game::new(), "d\n");
        assert!(output.starts_with("r n b q k b n r\n"));
        assert!(output.contains("Side to move: White\n"));
        assert!(output.ends_with("FEN: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w\n"));
    }
}
