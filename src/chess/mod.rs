//! Implementation of chess rules: board representation, piece movement,
//! legality of moves and game termination.

pub mod board;
pub mod core;
pub mod game;
pub mod movegen;
pub mod perft;
