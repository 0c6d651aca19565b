//! [Perft] (*per*formance *t*esting) is a technique for checking correctness of
//! move generation: the number of leaf nodes of the legal move tree is
//! compared to well-known values.
//!
//! [Perft]: https://www.chessprogramming.org/Perft

use crate::chess::core::Move;
use crate::chess::game::Game;

/// Counts the positions reachable in exactly `depth` plies.
///
/// ```
/// use chessrules::chess::game::Game;
/// use chessrules::chess::perft::perft;
///
/// assert_eq!(perft(&Game::new(), 2), 400);
/// ```
#[must_use]
pub fn perft(game: &Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.legal_moves_for(game.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|next_move| perft(&after(game, next_move), depth - 1))
        .sum()
}

/// Splits the [`perft`] count by the first move. Useful for finding the
/// diverging branch when comparing with another move generator.
#[must_use]
pub fn divide(game: &Game, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return vec![];
    }
    game.legal_moves_for(game.side_to_move())
        .into_iter()
        .map(|next_move| (next_move, perft(&after(game, next_move), depth - 1)))
        .collect()
}

fn after(game: &Game, next_move: Move) -> Game {
    let mut next = game.clone();
    next.play(next_move);
    next
}
