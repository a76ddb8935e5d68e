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

//! Small newtype wrappers over the raw integers that make up a position:
//! squares, files, ranks, sides, piece types and directions.

use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Sub},
};

use crate::error::PositionParseError;

/// A square, with little-endian rank-file mapping: a1 = 0, b1 = 1, ..., h8 =
/// 63.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Debug)]
pub struct Square(pub u8);

/// A file: file a = 0 to file h = 7.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct File(pub u8);

/// A rank: rank 1 = 0 to rank 8 = 7.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Rank(pub u8);

/// White or Black.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Side(pub u8);

/// One of the six piece kinds. Carries no color.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct PieceType(pub u8);

/// A (rank, file) step, e.g. north, south-east. Stored as the square offset
/// that step corresponds to in little-endian rank-file mapping.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Direction(pub i8);

#[allow(clippy::missing_docs_in_private_items)]
impl Square {
    pub const A1: Self = Self(0);
    pub const B1: Self = Self(1);
    pub const C1: Self = Self(2);
    pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);
    pub const F1: Self = Self(5);
    pub const G1: Self = Self(6);
    pub const H1: Self = Self(7);
    pub const A2: Self = Self(8);
    pub const B2: Self = Self(9);
    pub const C2: Self = Self(10);
    pub const D2: Self = Self(11);
    pub const E2: Self = Self(12);
    pub const F2: Self = Self(13);
    pub const G2: Self = Self(14);
    pub const H2: Self = Self(15);
    pub const A3: Self = Self(16);
    pub const B3: Self = Self(17);
    pub const C3: Self = Self(18);
    pub const D3: Self = Self(19);
    pub const E3: Self = Self(20);
    pub const F3: Self = Self(21);
    pub const G3: Self = Self(22);
    pub const H3: Self = Self(23);
    pub const A4: Self = Self(24);
    pub const B4: Self = Self(25);
    pub const C4: Self = Self(26);
    pub const D4: Self = Self(27);
    pub const E4: Self = Self(28);
    pub const F4: Self = Self(29);
    pub const G4: Self = Self(30);
    pub const H4: Self = Self(31);
    pub const A5: Self = Self(32);
    pub const B5: Self = Self(33);
    pub const C5: Self = Self(34);
    pub const D5: Self = Self(35);
    pub const E5: Self = Self(36);
    pub const F5: Self = Self(37);
    pub const G5: Self = Self(38);
    pub const H5: Self = Self(39);
    pub const A6: Self = Self(40);
    pub const B6: Self = Self(41);
    pub const C6: Self = Self(42);
    pub const D6: Self = Self(43);
    pub const E6: Self = Self(44);
    pub const F6: Self = Self(45);
    pub const G6: Self = Self(46);
    pub const H6: Self = Self(47);
    pub const A7: Self = Self(48);
    pub const B7: Self = Self(49);
    pub const C7: Self = Self(50);
    pub const D7: Self = Self(51);
    pub const E7: Self = Self(52);
    pub const F7: Self = Self(53);
    pub const G7: Self = Self(54);
    pub const H7: Self = Self(55);
    pub const A8: Self = Self(56);
    pub const B8: Self = Self(57);
    pub const C8: Self = Self(58);
    pub const D8: Self = Self(59);
    pub const E8: Self = Self(60);
    pub const F8: Self = Self(61);
    pub const G8: Self = Self(62);
    pub const H8: Self = Self(63);
    pub const TOTAL: usize = 64;
}

impl Square {
    /// Builds a square from a (rank, file) pair.
    pub const fn from_pos(rank: Rank, file: File) -> Self {
        Self(rank.0 * 8 + file.0)
    }

    /// Index into a 64-element array.
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }

    /// The file this square sits on.
    pub const fn file(self) -> File {
        File(self.0 & 7)
    }

    /// The rank this square sits on.
    pub const fn rank(self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Checked step in a direction; `None` if it would wrap off the board.
    pub fn checked_add(self, dir: Direction) -> Option<Self> {
        let dest = i16::from(self.0) + i16::from(dir.0);
        if !(0..64).contains(&dest) {
            return None;
        }
        let dest = Self(dest as u8);
        // a step is only legal if it doesn't wrap around a board edge: the
        // file delta it actually produces must match what a king/knight step
        // expects, which callers check themselves via `File` deltas.
        Some(dest)
    }
}

impl Add<Direction> for Square {
    type Output = Self;

    fn add(self, rhs: Direction) -> Self::Output {
        Self(self.0.wrapping_add_signed(rhs.0))
    }
}

impl Sub<Direction> for Square {
    type Output = Self;

    fn sub(self, rhs: Direction) -> Self::Output {
        Self(self.0.wrapping_add_signed(-rhs.0))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(self.file()), char::from(self.rank()))
    }
}

impl std::str::FromStr for Square {
    type Err = PositionParseError;

    /// Parses a square in algebraic notation, e.g. "e4".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(PositionParseError::BadSquare);
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(PositionParseError::BadSquare);
        }
        Ok(Self::from_pos(Rank(rank - b'1'), File(file - b'a')))
    }
}

#[allow(clippy::missing_docs_in_private_items)]
impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);
}

impl From<File> for char {
    fn from(file: File) -> Self {
        (b'a' + file.0) as Self
    }
}

#[allow(clippy::missing_docs_in_private_items)]
impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);
}

impl From<Rank> for char {
    fn from(rank: Rank) -> Self {
        (b'1' + rank.0) as Self
    }
}

impl Side {
    pub const WHITE: Self = Self(0);
    pub const BLACK: Self = Self(1);

    /// The other side.
    pub const fn flip(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Index into a 2-element array.
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }
}

#[allow(clippy::missing_docs_in_private_items)]
impl PieceType {
    pub const PAWN: Self = Self(0);
    pub const KNIGHT: Self = Self(1);
    pub const BISHOP: Self = Self(2);
    pub const ROOK: Self = Self(3);
    pub const QUEEN: Self = Self(4);
    pub const KING: Self = Self(5);
    pub const TOTAL: usize = 6;
    /// Every piece kind, in the generator's fixed iteration order.
    pub const ALL: [Self; 6] = [
        Self::PAWN,
        Self::KNIGHT,
        Self::BISHOP,
        Self::ROOK,
        Self::QUEEN,
        Self::KING,
    ];
    /// The four kinds a pawn may promote to, in the order promotion moves are
    /// emitted.
    pub const PROMOTION_KINDS: [Self; 4] = [Self::KNIGHT, Self::BISHOP, Self::ROOK, Self::QUEEN];

    /// Index into a 6-element array.
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<char> for PieceType {
    type Error = PositionParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c.to_ascii_lowercase() {
            'p' => Self::PAWN,
            'n' => Self::KNIGHT,
            'b' => Self::BISHOP,
            'r' => Self::ROOK,
            'q' => Self::QUEEN,
            'k' => Self::KING,
            _ => return Err(PositionParseError::BadPieceChar(c)),
        })
    }
}

impl From<PieceType> for char {
    /// The lowercase (Black) FEN letter for this piece kind.
    fn from(kind: PieceType) -> Self {
        match kind {
            PieceType::PAWN => 'p',
            PieceType::KNIGHT => 'n',
            PieceType::BISHOP => 'b',
            PieceType::ROOK => 'r',
            PieceType::QUEEN => 'q',
            _ => 'k',
        }
    }
}

#[allow(clippy::missing_docs_in_private_items)]
impl Direction {
    pub const N: Self = Self(8);
    pub const NE: Self = Self(9);
    pub const E: Self = Self(1);
    pub const SE: Self = Self(-7);
    pub const S: Self = Self(-8);
    pub const SW: Self = Self(-9);
    pub const W: Self = Self(-1);
    pub const NW: Self = Self(7);

    /// The four orthogonal directions (rook-like).
    pub const ORTHOGONALS: [Self; 4] = [Self::N, Self::E, Self::S, Self::W];
    /// The four diagonal directions (bishop-like).
    pub const DIAGONALS: [Self; 4] = [Self::NE, Self::SE, Self::SW, Self::NW];
    /// All eight directions (king-like).
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];
    /// Knight-move offsets. Each must be paired with a file-delta check to
    /// reject wraparound (see `Square::file`).
    pub const KNIGHT_OFFSETS: [i8; 8] = [17, 15, 10, 6, -17, -15, -10, -6];
}

#[cfg(test)]
mod tests {
    use super::{File, Rank, Square};

    #[test]
    fn square_roundtrips_through_algebraic_text() {
        for (text, expected) in [("a1", Square::A1), ("h8", Square::H8), ("e4", Square(28))] {
            assert_eq!(
                text.parse::<Square>().unwrap(),
                expected,
                "{text} should parse to the expected square"
            );
            assert_eq!(expected.to_string(), text, "{text} should round-trip through Display");
        }
    }

    #[test]
    fn square_file_and_rank_match_little_endian_layout() {
        assert_eq!(Square::A1.file(), File::A);
        assert_eq!(Square::A1.rank(), Rank::ONE);
        assert_eq!(Square::H8.file(), File::H);
        assert_eq!(Square::H8.rank(), Rank::EIGHT);
    }
}
