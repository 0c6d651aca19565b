//! Piece movement rules: geometric destinations of a single piece.
//!
//! The moves produced here are "raw": they respect board edges, blockers and
//! capture rules, but do not care whose turn it is and may leave the mover's
//! own king capturable. [`crate::chess::game::Game`] filters them down to
//! legal moves.

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::board::Board;
use crate::chess::core::{Color, Direction, Move, PieceKind, Promotion, Rank, Square};

/// The most moves a single piece can have: a queen in the center of an
/// otherwise empty board.
pub const MAX_PIECE_MOVES: usize = 27;

/// Moves of a single piece. Stored on the stack: the size is bounded by
/// [`MAX_PIECE_MOVES`].
pub type MoveList = ArrayVec<Move, MAX_PIECE_MOVES>;

/// Knight jumps as (rows, columns) offsets.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Calculates all destinations of the piece standing on `from`, without
/// checking whether the move exposes the mover's king. Returns an empty list
/// if the square is empty.
///
/// ```
/// use chessrules::chess::board::Board;
/// use chessrules::chess::core::Square;
/// use chessrules::chess::movegen::raw_moves;
///
/// let board = Board::starting();
/// assert_eq!(raw_moves(&board, Square::G1).len(), 2);
/// assert_eq!(raw_moves(&board, Square::D1).len(), 0);
/// assert!(raw_moves(&board, Square::E4).is_empty());
/// ```
#[must_use]
pub fn raw_moves(board: &Board, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.at(from) else {
        return moves;
    };
    match piece.kind {
        PieceKind::Rook => slide(board, from, piece.color, &Direction::ORTHOGONAL, &mut moves),
        PieceKind::Bishop => slide(board, from, piece.color, &Direction::DIAGONAL, &mut moves),
        PieceKind::Queen => {
            slide(board, from, piece.color, &Direction::ORTHOGONAL, &mut moves);
            slide(board, from, piece.color, &Direction::DIAGONAL, &mut moves);
        },
        PieceKind::King => step(
            board,
            from,
            piece.color,
            Direction::iter().map(Direction::delta),
            &mut moves,
        ),
        PieceKind::Knight => step(board, from, piece.color, KNIGHT_JUMPS, &mut moves),
        PieceKind::Pawn => pawn_moves(board, from, piece.color, &mut moves),
    }
    moves
}

/// Walks each ray until the board edge or the first occupied square. An enemy
/// piece on that square can be captured, a friendly one blocks it.
fn slide(board: &Board, from: Square, color: Color, rays: &[Direction], moves: &mut MoveList) {
    for &direction in rays {
        let mut current = from;
        while let Some(to) = current.shift(direction) {
            match board.at(to) {
                None => moves.push(Move::new(from, to, None)),
                Some(blocker) => {
                    if blocker.color != color {
                        moves.push(Move::new(from, to, None));
                    }
                    break;
                },
            }
            current = to;
        }
    }
}

fn step(
    board: &Board,
    from: Square,
    color: Color,
    offsets: impl IntoIterator<Item = (i8, i8)>,
    moves: &mut MoveList,
) {
    for (rows, columns) in offsets {
        let Some(to) = from.offset(rows, columns) else {
            continue;
        };
        if board.at(to).map_or(true, |piece| piece.color != color) {
            moves.push(Move::new(from, to, None));
        }
    }
}

/// Pushes, double pushes from the starting rank and diagonal captures.
///
/// Double push eligibility only depends on the rank the pawn currently stands
/// on, not on whether it has moved before.
fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    let push = color.push_direction();
    let Some(ahead) = from.shift(push) else {
        return;
    };
    if board.at(ahead).is_none() {
        add_pawn_move(moves, from, ahead, color);
        if from.rank() == Rank::pawns_starting(color) {
            if let Some(two_ahead) = ahead.shift(push) {
                if board.at(two_ahead).is_none() {
                    moves.push(Move::new(from, two_ahead, None));
                }
            }
        }
    }
    for side in [-1, 1] {
        let Some(target) = ahead.offset(0, side) else {
            continue;
        };
        if board
            .at(target)
            .is_some_and(|victim| victim.color != color)
        {
            add_pawn_move(moves, from, target, color);
        }
    }
}

/// Reaching the last rank expands the move into one move per promotion choice.
fn add_pawn_move(moves: &mut MoveList, from: Square, to: Square, color: Color) {
    if to.rank() == Rank::promotion(color) {
        for promotion in Promotion::ALL {
            moves.push(Move::new(from, to, Some(promotion)));
        }
    } else {
        moves.push(Move::new(from, to, None));
    }
}
