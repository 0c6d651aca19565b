#![no_main]
use chessrules::chess::game::Game;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use shakmaty::{CastlingMode, Chess, Position};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(game) = Game::from_fen(input) else {
        return;
    };
    // Castling and en passant are not supported: compare with the same
    // position stripped of both.
    let stripped = format!("{game} - - 0 1");
    let Ok(setup) = stripped.parse::<shakmaty::fen::Fen>() else {
        return;
    };
    let Ok(position) = setup.into_position::<Chess>(CastlingMode::Standard) else {
        return;
    };
    assert_eq!(
        game.legal_moves_for(game.side_to_move())
            .iter()
            .map(|m| m.to_string())
            .sorted()
            .collect::<Vec<_>>(),
        position
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .sorted()
            .collect::<Vec<_>>()
    );
});
