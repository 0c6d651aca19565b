use chessrules::chess::board::Board;
use chessrules::chess::core::{Color, Move, Piece, PieceKind, Promotion, Square};
use chessrules::chess::game::{Game, GameStatus, IllegalMove};
use chessrules::chess::perft::perft;
use pretty_assertions::assert_eq;

fn uci(input: &str) -> Move {
    Move::from_uci(input).unwrap()
}

#[test]
fn initial_position() {
    let game = Game::new();
    let moves = game.legal_moves(Square::E2).unwrap();
    assert_eq!(
        moves.as_slice(),
        &[
            Move::new(Square::E2, Square::E3, None),
            Move::new(Square::E2, Square::E4, None)
        ]
    );
    for color in [Color::White, Color::Black] {
        assert!(!game.is_in_check(color));
        assert!(!game.is_in_checkmate(color));
        assert!(!game.is_in_stalemate(color));
    }
    assert_eq!(game.status(), GameStatus::Ongoing);
}

#[test]
fn rook_check_along_the_rank() {
    let mut board = Board::empty();
    board.put(Square::A1, Piece::new(Color::White, PieceKind::King));
    board.put(Square::H8, Piece::new(Color::Black, PieceKind::King));
    board.put(Square::H1, Piece::new(Color::Black, PieceKind::Rook));
    let game = Game::from_board(board, Color::White).unwrap();
    assert!(game.is_in_check(Color::White));
    assert!(!game.is_in_check(Color::Black));
    // The king can step off the rank.
    assert!(!game.is_in_checkmate(Color::White));
    assert_eq!(game.status(), GameStatus::Check);

    // The second rook takes the escape squares away.
    board.put(Square::G2, Piece::new(Color::Black, PieceKind::Rook));
    let game = Game::from_board(board, Color::White).unwrap();
    assert!(game.is_in_checkmate(Color::White));
    assert!(!game.is_in_stalemate(Color::White));
    assert_eq!(game.status(), GameStatus::Checkmate);
}

#[test]
fn illegal_destination() {
    let mut game = Game::new();
    let before = game.clone();
    let next_move = uci("e2e5");
    assert_eq!(game.make_move(next_move), Err(IllegalMove(next_move)));
    assert_eq!(game, before);
    assert_eq!(game.board(), before.board());
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn wrong_side_and_empty_square() {
    let mut game = Game::new();
    assert!(game.make_move(uci("e7e5")).is_err());
    assert!(game.make_move(uci("e4e5")).is_err());
    assert_eq!(game, Game::new());
    assert!(game.legal_moves(Square::E4).is_none());
}

#[test]
fn short_game() {
    let mut game = Game::new();
    for (next_move, status) in [
        ("e2e4", GameStatus::Ongoing),
        ("e7e5", GameStatus::Ongoing),
        ("d1h5", GameStatus::Ongoing),
        ("b8c6", GameStatus::Ongoing),
        ("f1c4", GameStatus::Ongoing),
        ("g8f6", GameStatus::Ongoing),
        ("h5f7", GameStatus::Checkmate),
    ] {
        game.make_move(uci(next_move)).unwrap();
        assert_eq!(game.status(), status, "after {next_move}");
    }
    assert_eq!(game.side_to_move(), Color::Black);
    assert!(game.is_in_checkmate(Color::Black));
    assert!(game.legal_moves_for(Color::Black).is_empty());
    // No moves are accepted after the game is over.
    assert!(game.make_move(uci("e8f7")).is_err());
}

#[test]
fn promotion_choices() {
    let mut game = Game::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
    let moves = game.legal_moves(Square::A7).unwrap();
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|m| m.to() == Square::A8));

    // Promotion is required on the last rank.
    assert!(game.make_move(uci("a7a8")).is_err());
    game.make_move(Move::new(Square::A7, Square::A8, Some(Promotion::Knight)))
        .unwrap();
    assert_eq!(
        game.board().at(Square::A8),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
    assert_eq!(game.status(), GameStatus::Ongoing);
}

#[test]
fn copies_do_not_share_state() {
    let original = Game::new();
    let mut copy = original.clone();
    copy.make_move(uci("g1f3")).unwrap();
    assert_ne!(original, copy);
    assert_eq!(original, Game::new());
    assert!(original.board().at(Square::G1).is_some());
    assert!(copy.board().at(Square::G1).is_none());
}

#[test]
fn starting_perft() {
    assert_eq!(perft(&Game::new(), 3), 8902);
}

#[test]
fn fen_round_trip() {
    let game = Game::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3")
        .unwrap();
    assert_eq!(
        game.to_string(),
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b"
    );
    assert_eq!(Game::try_from(game.to_string().as_str()).unwrap(), game);
}
