/*
 * Rookery, a UCI-compatible chess engine core
 * Copyright (C) 2026
 *
 * Rookery is free software: you can redistribute it and/or modify it under
 * the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * Rookery is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along
 * with Rookery. If not, see <https://www.gnu.org/licenses/>.
 */

//! Error values returned from the two text-parsing boundaries: position text
//! and move text.

use std::fmt::{self, Display, Formatter};

/// Why a textual position (FEN-like) string failed to parse.
#[derive(Debug)]
pub enum PositionParseError {
    /// Fewer than four space-separated fields were present.
    TooFewFields,
    /// A rank in the piece placement field didn't name exactly 8 files.
    BadRankLength,
    /// An unrecognised character appeared in the piece placement field.
    BadPieceChar(char),
    /// The side-to-move field wasn't `w` or `b`.
    BadSideToMove,
    /// The castle rights field contained something other than `KQkq-`.
    BadCastleRights,
    /// The en-passant field wasn't `-` or a valid square.
    BadSquare,
    /// A side has other than exactly one king.
    WrongNumberOfKings,
}

impl Display for PositionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields => write!(f, "position text needs at least 4 fields"),
            Self::BadRankLength => write!(f, "a rank did not describe exactly 8 files"),
            Self::BadPieceChar(c) => write!(f, "'{c}' is not a valid piece character"),
            Self::BadSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            Self::BadCastleRights => write!(f, "castle rights must be a subset of 'KQkq' or '-'"),
            Self::BadSquare => write!(f, "expected a square like 'e3' or '-'"),
            Self::WrongNumberOfKings => write!(f, "each side must have exactly one king"),
        }
    }
}

impl std::error::Error for PositionParseError {}

/// Why a piece of move text failed to resolve against a position's legal
/// moves.
#[derive(Debug)]
pub enum MoveParseError {
    /// The text wasn't 4 or 5 characters of the expected shape.
    Malformed,
    /// No legal move matches the requested from/to/promotion triple.
    NoMatchingLegalMove,
}

impl Display for MoveParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "move text must be 4-5 characters, e.g. 'e2e4' or 'a7a8q'"),
            Self::NoMatchingLegalMove => write!(f, "no legal move matches that move text"),
        }
    }
}

impl std::error::Error for MoveParseError {}
