//! Chess rules engine: board representation, move generation, legality checks
//! and game termination detection for standard chess (without castling and en
//! passant).
//!
//! The [`chess`] module is the library surface; [`Engine`] drives a single
//! [`chess::game::Game`] with a line-based text protocol and is what the
//! `chessrules` binary runs.

pub mod chess;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Build profile. Produced by `build.rs`.
const PROFILE: &str = include_str!(concat!(env!("OUT_DIR"), "/profile"));

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the engine version and build type on startup.
pub fn print_engine_info() {
    println!("chessrules {}", engine_version());
    println!("Build profile: {PROFILE}, debug assertions: {}", shadow_rs::is_debug());
    println!();
}
