#![no_main]
use chessrules::chess::game::Game;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(game) = Game::try_from(input) {
            // Printed games only keep placement and side to move, which is
            // everything a game consists of.
            assert_eq!(Game::try_from(game.to_string().as_str()).unwrap(), game);
        }
    }
});
