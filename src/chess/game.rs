//! Game state machine: the board together with the side to move.
//!
//! Legal moves are derived from [`movegen::raw_moves`] by simulating each
//! candidate on a copy of the board and discarding the ones that leave the
//! mover's king capturable. Check, checkmate and stalemate are computed on
//! demand; nothing is cached between queries.

use std::fmt;

use anyhow::bail;
use log::{debug, trace, warn};

use crate::chess::board::Board;
use crate::chess::core::{Color, Move, Piece, PieceKind, Square};
use crate::chess::movegen::{self, MoveList};

/// Returned by [`Game::make_move`] when the move can not be played: there is no
/// piece on the origin square, the piece belongs to the side not to move or
/// the move is not among its legal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("illegal move: {0}")]
pub struct IllegalMove(pub Move);

/// State of the game from the perspective of the side to move.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ongoing => "ongoing",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
        })
    }
}

/// The board and the side to move. This is the only mutable state of the
/// engine: it is mutated in place by [`Game::make_move`] and there is no move
/// history.
///
/// Every [`Game`] has exactly one king per side and the side not to move is
/// never in check: both are checked on construction and preserved by legal
/// moves.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Game {
    board: Board,
    side_to_move: Color,
}

impl Game {
    /// Standard starting position, White to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Color::White,
        }
    }

    /// Creates a game from an arbitrary board.
    ///
    /// # Errors
    ///
    /// If either side does not have exactly one king or the king of the side
    /// not to move could be captured right away.
    pub fn from_board(board: Board, side_to_move: Color) -> anyhow::Result<Self> {
        for color in [Color::White, Color::Black] {
            let kings = board.count(Piece::new(color, PieceKind::King));
            if kings != 1 {
                bail!("expected 1 {color:?} king, got {kings}");
            }
        }
        if king_capturable(&board, !side_to_move) {
            bail!(
                "{:?} is in check but it is {side_to_move:?} to move",
                !side_to_move
            );
        }
        Ok(Self {
            board,
            side_to_move,
        })
    }

    /// Parses the position from [Forsyth-Edwards Notation]. Only the piece
    /// placement and the side to move are required. Castling rights, en
    /// passant square and move counters may follow but are not used.
    ///
    /// ```
    /// use chessrules::chess::game::Game;
    ///
    /// let game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 b").unwrap();
    /// assert_eq!(game.to_string(), "4k3/8/8/8/8/8/4P3/4K3 b");
    /// assert!(Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1 extra").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// If the input is not a valid FEN or describes a position rejected by
    /// [`Game::from_board`].
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split_ascii_whitespace();
        let board = match parts.next() {
            Some(placement) => Board::from_placement(placement)?,
            None => bail!("incorrect FEN: missing pieces placement"),
        };
        let side_to_move = match parts.next() {
            Some(value) => Color::try_from(value)?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        if let Some(castling) = parts.next() {
            if castling != "-" {
                warn!("ignoring castling rights {castling}: castling is not supported");
            }
        }
        if let Some(en_passant) = parts.next() {
            if en_passant != "-" {
                warn!("ignoring en passant square {en_passant}: en passant is not supported");
            }
        }
        for counter in parts.by_ref().take(2) {
            if !counter.bytes().all(|c| c.is_ascii_digit()) {
                bail!("incorrect FEN: move counters can only contain digits, got {counter}");
            }
        }
        if parts.next().is_some() {
            bail!("trailing symbols are not allowed in FEN");
        }
        Self::from_board(board, side_to_move)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Calculates the moves of the piece on `from` that do not leave its king
    /// capturable. Returns `None` if there is no piece on the square and an
    /// empty list if the piece can not move.
    ///
    /// The side to move is not taken into account: moves of either color can
    /// be queried.
    #[must_use]
    pub fn legal_moves(&self, from: Square) -> Option<MoveList> {
        let piece = self.board.at(from)?;
        let mut moves = movegen::raw_moves(&self.board, from);
        moves.retain(|candidate| keeps_king_safe(&self.board, *candidate, piece.color));
        Some(moves)
    }

    /// Legal moves of all pieces of given color.
    #[must_use]
    pub fn legal_moves_for(&self, color: Color) -> Vec<Move> {
        self.board
            .pieces_of(color)
            .filter_map(|(square, _)| self.legal_moves(square))
            .flatten()
            .collect()
    }

    /// Returns true if any piece of the opponent can capture the king of given
    /// color.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        let check = king_capturable(&self.board, color);
        trace!("{color:?} in check: {check}");
        check
    }

    /// Returns true if the king of given color is in check and there is no
    /// legal move to get out of it.
    #[must_use]
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Returns true if given color is not in check but has no legal moves.
    #[must_use]
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Checks the side to move for check, checkmate and stalemate.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let color = self.side_to_move;
        match (self.is_in_check(color), self.has_legal_moves(color)) {
            (false, true) => GameStatus::Ongoing,
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// Plays the move for the side to move and passes the turn to the
    /// opponent.
    ///
    /// ```
    /// use chessrules::chess::core::{Color, Move};
    /// use chessrules::chess::game::{Game, IllegalMove};
    ///
    /// let mut game = Game::new();
    /// let push = Move::from_uci("e2e4").unwrap();
    /// assert_eq!(game.make_move(push), Ok(()));
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// assert_eq!(game.make_move(push), Err(IllegalMove(push)));
    /// ```
    ///
    /// # Errors
    ///
    /// [`IllegalMove`] if there is no piece on the origin square, the piece
    /// belongs to the side not to move or the move (including its promotion)
    /// is not one of its legal moves. The game is left unchanged.
    pub fn make_move(&mut self, next_move: Move) -> Result<(), IllegalMove> {
        let Some(piece) = self.board.at(next_move.from) else {
            debug!("rejected {next_move}: no piece on {}", next_move.from);
            return Err(IllegalMove(next_move));
        };
        if piece.color != self.side_to_move {
            debug!(
                "rejected {next_move}: {:?} to move, got {piece}",
                self.side_to_move
            );
            return Err(IllegalMove(next_move));
        }
        let legal = self
            .legal_moves(next_move.from)
            .is_some_and(|moves| moves.contains(&next_move));
        if !legal {
            debug!("rejected {next_move}: not a legal move of {piece}");
            return Err(IllegalMove(next_move));
        }
        debug!("{:?} plays {next_move}", self.side_to_move);
        self.play(next_move);
        Ok(())
    }

    /// Applies the move without checking its legality.
    pub(crate) fn play(&mut self, next_move: Move) {
        let moving = self.board.take(next_move.from).map(|piece| {
            match next_move.promotion {
                Some(promotion) => Piece::new(piece.color, promotion.into()),
                None => piece,
            }
        });
        self.board.set(next_move.to, moving);
        self.side_to_move = !self.side_to_move;
    }

    fn has_legal_moves(&self, color: Color) -> bool {
        self.board.pieces_of(color).any(|(square, _)| {
            self.legal_moves(square)
                .is_some_and(|moves| !moves.is_empty())
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&str> for Game {
    type Error = anyhow::Error;

    /// Cleans up the input (whitespace, optional "fen" prefix) and parses it
    /// with [`Game::from_fen`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        Self::from_fen(input.strip_prefix("fen ").unwrap_or(input))
    }
}

impl fmt::Display for Game {
    /// Prints the piece placement and the side to move in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", &self.board, &self.side_to_move)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "Side to move: {:?}", &self.side_to_move)?;
        writeln!(f, "FEN: {self}")?;
        Ok(())
    }
}

/// Simulates the move on a copy of the board. Promotion does not matter here:
/// the moved piece blocks the same lines whatever it becomes.
fn keeps_king_safe(board: &Board, candidate: Move, color: Color) -> bool {
    let mut scratch = *board;
    let moving = scratch.take(candidate.from);
    scratch.set(candidate.to, moving);
    !king_capturable(&scratch, color)
}

fn king_capturable(board: &Board, color: Color) -> bool {
    let Some(king) = board.king(color) else {
        unreachable!("{color:?} king is missing from the board");
    };
    board.pieces_of(!color).any(|(square, _)| {
        movegen::raw_moves(board, square)
            .iter()
            .any(|candidate| candidate.to == king)
    })
}
