//! Rookery, a UCI-compatible chess engine core written in Rust.
//!
//! Accepted commands, read from stdin as lines:
//! - `uci`
//! - `isready`
//! - `ucinewgame`
//! - `position startpos|fen <fen> [moves <move> ...]`
//! - `go [depth <n>]` or `go perft <depth>`
//! - `quit`
//!
//! If this program is given command-line arguments, it will execute them
//! instead of entering the command loop. Accepted command-line arguments:
//! - `perft <fen-or-startpos> <depth>`: run perft once and print the
//!   per-root-move divide plus total, then exit.

/// Attack queries: whether a side attacks a given square.
pub mod attacks;
/// A 64-bit set of squares.
pub mod bitboard;
/// Small newtype wrappers: squares, files, ranks, sides, piece types,
/// directions.
pub mod defs;
/// Parse error variants.
pub mod error;
/// Static evaluation.
pub mod evaluation;
/// Pseudo-legal and legal move generation.
pub mod movegen;
/// The [`Move`](moves::Move) value.
pub mod moves;
/// Perft: <https://www.chessprogramming.org/Perft>.
pub mod perft;
/// The [`Position`](position::Position) and its castle rights.
pub mod position;
/// Full-width fixed-depth minimax search.
pub mod search;
/// The UCI-like command loop.
pub mod uci;
