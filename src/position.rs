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

//! The [`Position`]: two [`PieceSet`]s, whose turn it is, castle rights, the
//! en-passant target and the move counters. Mutated only through
//! [`Position::make_move`], reverted only through [`Position::unmake_move`].

use std::fmt::{self, Display, Formatter};

use crate::{
    attacks::square_attacked_by,
    bitboard::Bitboard,
    defs::{File, PieceType, Rank, Side, Square},
    error::PositionParseError,
    moves::{Move, MoveKind},
};

/// The standard starting position, as textual position text.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

/// The occupancy masks of one color, one mask per piece kind.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct PieceSet {
    /// Per-kind occupancy, indexed by [`PieceType::to_index`].
    boards: [Bitboard; PieceType::TOTAL],
}

impl PieceSet {
    /// An empty piece set.
    pub const fn empty() -> Self {
        Self {
            boards: [Bitboard::empty(); PieceType::TOTAL],
        }
    }

    /// The occupancy mask for one piece kind.
    pub fn by_kind(&self, kind: PieceType) -> Bitboard {
        self.boards[kind.to_index()]
    }

    /// Mutable access to the occupancy mask for one piece kind.
    pub fn by_kind_mut(&mut self, kind: PieceType) -> &mut Bitboard {
        &mut self.boards[kind.to_index()]
    }

    /// The union of every piece kind's mask: every square this color occupies.
    pub fn occupancy(&self) -> Bitboard {
        self.boards.iter().fold(Bitboard::empty(), |acc, &bb| acc | bb)
    }

    /// The single square this color's king sits on.
    ///
    /// # Panics
    /// Panics if the king mask is empty, which violates the invariant that
    /// every well-formed position has exactly one king per side.
    pub fn king_square(&self) -> Square {
        let king = self.by_kind(PieceType::KING);
        assert!(!king.is_empty(), "a well-formed position always has a king");
        Square(king.0.trailing_zeros() as u8)
    }

    /// The piece kind occupying `square` in this set, if any.
    pub fn kind_at(&self, square: Square) -> Option<PieceType> {
        PieceType::ALL
            .into_iter()
            .find(|&kind| self.by_kind(kind).contains(square))
    }

    /// Clears `square` from whichever piece kind holds it, if any.
    pub fn clear_square(&mut self, square: Square) {
        if let Some(kind) = self.kind_at(square) {
            *self.by_kind_mut(kind) &= !Bitboard::from(square);
        }
    }
}

/// A 4-bit set of which sides may still castle to which wing.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct CastleRights(pub u8);

impl CastleRights {
    /// White's kingside (short) castle right.
    pub const WHITE_KING: Self = Self(1);
    /// White's queenside (long) castle right.
    pub const WHITE_QUEEN: Self = Self(2);
    /// Black's kingside (short) castle right.
    pub const BLACK_KING: Self = Self(4);
    /// Black's queenside (long) castle right.
    pub const BLACK_QUEEN: Self = Self(8);
    /// No rights at all.
    pub const NONE: Self = Self(0);
    /// All four rights.
    pub const ALL: Self = Self(15);

    /// Whether every flag in `rhs` is set in `self`.
    pub const fn contains(self, rhs: Self) -> bool {
        self.0 & rhs.0 == rhs.0
    }

    /// `self` with every flag in `rhs` cleared.
    pub const fn without(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }

    /// `self` with every flag in `rhs` added.
    pub const fn with(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }

    /// The pair of rights belonging to one side.
    pub const fn for_side(side: Side) -> Self {
        if side.0 == Side::WHITE.0 {
            Self(Self::WHITE_KING.0 | Self::WHITE_QUEEN.0)
        } else {
            Self(Self::BLACK_KING.0 | Self::BLACK_QUEEN.0)
        }
    }

    /// The single right a rook capture on `square` should strip, if `square`
    /// is one of the four rook home squares.
    pub fn stripped_by_capture_on(square: Square) -> Self {
        match square {
            Square::A1 => Self::WHITE_QUEEN,
            Square::H1 => Self::WHITE_KING,
            Square::A8 => Self::BLACK_QUEEN,
            Square::H8 => Self::BLACK_KING,
            _ => Self::NONE,
        }
    }
}

impl Display for CastleRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return f.write_str("-");
        }
        if self.contains(Self::WHITE_KING) {
            f.write_str("K")?;
        }
        if self.contains(Self::WHITE_QUEEN) {
            f.write_str("Q")?;
        }
        if self.contains(Self::BLACK_KING) {
            f.write_str("k")?;
        }
        if self.contains(Self::BLACK_QUEEN) {
            f.write_str("q")?;
        }
        Ok(())
    }
}

/// A chess position: two piece sets, whose turn it is, castle rights, the
/// en-passant target, and the move counters.
#[derive(Clone, Debug)]
pub struct Position {
    white: PieceSet,
    black: PieceSet,
    side_to_move: Side,
    castle_rights: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// Everything needed to undo a [`Move`] applied by [`Position::make_move`].
pub struct SavedState {
    /// The move being undone.
    mv: Move,
    /// Full snapshot of the position immediately before the move.
    before: Position,
}

impl Default for Position {
    fn default() -> Self {
        STARTPOS.parse().expect("STARTPOS is valid position text")
    }
}

impl Position {
    /// The starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// This color's piece set.
    pub fn pieces(&self, side: Side) -> &PieceSet {
        if side.0 == Side::WHITE.0 {
            &self.white
        } else {
            &self.black
        }
    }

    /// Mutable access to this color's piece set.
    fn pieces_mut(&mut self, side: Side) -> &mut PieceSet {
        if side.0 == Side::WHITE.0 {
            &mut self.white
        } else {
            &mut self.black
        }
    }

    /// Every occupied square, either color.
    pub fn occupancy(&self) -> Bitboard {
        self.white.occupancy() | self.black.occupancy()
    }

    /// Every empty square.
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupancy()
    }

    /// Whose turn it is.
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// The castle rights still available.
    pub const fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    /// The current en-passant target, if the last move was a double pawn
    /// push.
    pub const fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Half-moves since the last capture or pawn move.
    pub const fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// The full-move number, incremented after each Black move.
    pub const fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The piece kind and color occupying `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<(PieceType, Side)> {
        if let Some(kind) = self.white.kind_at(square) {
            Some((kind, Side::WHITE))
        } else {
            self.black.kind_at(square).map(|kind| (kind, Side::BLACK))
        }
    }

    /// Applies `mv`, returning the [`SavedState`] needed to undo it.
    ///
    /// `mv` is assumed to have come from this crate's own move generator
    /// (directly, or matched against it) — see SPEC_FULL.md §4.5.
    pub fn make_move(&mut self, mv: Move) -> SavedState {
        let before = self.clone();
        let mover = self.side_to_move;
        let enemy = mover.flip();

        let is_pawn_move = matches!(
            mv.kind,
            MoveKind::DoublePawnPush
                | MoveKind::EnPassant
                | MoveKind::Promotion(_)
                | MoveKind::PromotionCapture(_)
        ) || self.pieces(mover).kind_at(mv.from) == Some(PieceType::PAWN);
        let resets_halfmove_clock = is_pawn_move || mv.is_capture();

        match mv.kind {
            MoveKind::EnPassant => {
                let captured_pawn_square = Square::from_pos(mv.from.rank(), mv.to.file());
                self.pieces_mut(enemy).clear_square(captured_pawn_square);
                self.move_piece(mover, PieceType::PAWN, mv.from, mv.to);
            }
            MoveKind::KingCastle | MoveKind::QueenCastle => {
                self.move_piece(mover, PieceType::KING, mv.from, mv.to);
                let (rook_from, rook_to) = castle_rook_squares(mover, mv.kind);
                self.move_piece(mover, PieceType::ROOK, rook_from, rook_to);
            }
            MoveKind::Promotion(promoted) => {
                self.pieces_mut(mover).clear_square(mv.from);
                *self.pieces_mut(mover).by_kind_mut(promoted) |= Bitboard::from(mv.to);
            }
            MoveKind::PromotionCapture(promoted) => {
                self.pieces_mut(enemy).clear_square(mv.to);
                self.pieces_mut(mover).clear_square(mv.from);
                *self.pieces_mut(mover).by_kind_mut(promoted) |= Bitboard::from(mv.to);
            }
            MoveKind::Capture => {
                self.pieces_mut(enemy).clear_square(mv.to);
                let kind = self
                    .pieces(mover)
                    .kind_at(mv.from)
                    .expect("Make is only called with moves whose origin holds the mover's piece");
                self.move_piece(mover, kind, mv.from, mv.to);
            }
            MoveKind::Quiet | MoveKind::DoublePawnPush => {
                let kind = self
                    .pieces(mover)
                    .kind_at(mv.from)
                    .expect("Make is only called with moves whose origin holds the mover's piece");
                self.move_piece(mover, kind, mv.from, mv.to);
            }
        }

        self.castle_rights = mv.post_move_castle_rights;
        self.en_passant =
            matches!(mv.kind, MoveKind::DoublePawnPush).then(|| mv.from + direction_towards(mv.from, mv.to));
        self.halfmove_clock = if resets_halfmove_clock { 0 } else { self.halfmove_clock + 1 };
        if mover.0 == Side::BLACK.0 {
            self.fullmove_number += 1;
        }
        self.side_to_move = enemy;

        SavedState { mv, before }
    }

    /// Reverts a move applied by [`Self::make_move`].
    pub fn unmake_move(&mut self, saved: SavedState) {
        *self = saved.before;
    }

    /// Moves a piece from one square to another within one color's set.
    fn move_piece(&mut self, side: Side, kind: PieceType, from: Square, to: Square) {
        let board = self.pieces_mut(side).by_kind_mut(kind);
        *board &= !Bitboard::from(from);
        *board |= Bitboard::from(to);
    }

    /// Whether `mv`, played from the current position, leaves the mover's own
    /// king attacked. Makes the move on the real position, queries, then
    /// unmakes — no clone of the whole game tree, since Make/Unmake is
    /// already reversible.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        let mover = self.side_to_move;
        let saved = self.make_move(mv);
        let king_square = self.pieces(mover).king_square();
        let attacked = square_attacked_by(self, king_square, self.side_to_move);
        self.unmake_move(saved);
        !attacked
    }
}

/// The rook's origin and destination for a castle move of `kind` by `side`.
fn castle_rook_squares(side: Side, kind: MoveKind) -> (Square, Square) {
    match (side.0 == Side::WHITE.0, kind) {
        (true, MoveKind::KingCastle) => (Square::H1, Square::F1),
        (true, MoveKind::QueenCastle) => (Square::A1, Square::D1),
        (false, MoveKind::KingCastle) => (Square::H8, Square::F8),
        (false, MoveKind::QueenCastle) => (Square::A8, Square::D8),
        _ => unreachable!("castle_rook_squares is only called for castle moves"),
    }
}

/// The single-step direction from `from` towards `to`, for a two-square pawn
/// push (always straight north or south).
fn direction_towards(from: Square, to: Square) -> crate::defs::Direction {
    if to.0 > from.0 {
        crate::defs::Direction::N
    } else {
        crate::defs::Direction::S
    }
}

impl std::str::FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let placement = fields.next().ok_or(PositionParseError::TooFewFields)?;
        let side_to_move = fields.next().ok_or(PositionParseError::TooFewFields)?;
        let castle_rights = fields.next().ok_or(PositionParseError::TooFewFields)?;
        let en_passant = fields.next().ok_or(PositionParseError::TooFewFields)?;
        let halfmove_clock = fields.next();
        let fullmove_number = fields.next();

        let mut white = PieceSet::empty();
        let mut black = PieceSet::empty();
        for (rank_idx, rank_text) in placement.split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(PositionParseError::BadRankLength);
            }
            let rank = Rank(7 - rank_idx as u8);
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    if file >= 8 {
                        return Err(PositionParseError::BadRankLength);
                    }
                    let square = Square::from_pos(rank, File(file));
                    let kind = PieceType::try_from(c)?;
                    let side = if c.is_ascii_uppercase() { Side::WHITE } else { Side::BLACK };
                    let set = if side.0 == Side::WHITE.0 { &mut white } else { &mut black };
                    *set.by_kind_mut(kind) |= Bitboard::from(square);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(PositionParseError::BadRankLength);
            }
        }
        if white.by_kind(PieceType::KING).count() != 1 || black.by_kind(PieceType::KING).count() != 1 {
            return Err(PositionParseError::WrongNumberOfKings);
        }

        let side_to_move = match side_to_move {
            "w" => Side::WHITE,
            "b" => Side::BLACK,
            _ => return Err(PositionParseError::BadSideToMove),
        };

        let mut rights = CastleRights::NONE;
        if castle_rights != "-" {
            for c in castle_rights.chars() {
                rights = rights.with(match c {
                    'K' => CastleRights::WHITE_KING,
                    'Q' => CastleRights::WHITE_QUEEN,
                    'k' => CastleRights::BLACK_KING,
                    'q' => CastleRights::BLACK_QUEEN,
                    _ => return Err(PositionParseError::BadCastleRights),
                });
            }
        }

        let en_passant = if en_passant == "-" { None } else { Some(en_passant.parse()?) };

        let halfmove_clock = halfmove_clock.and_then(|s| s.parse().ok()).unwrap_or(0);
        let fullmove_number = fullmove_number.and_then(|s| s.parse().ok()).unwrap_or(1);

        Ok(Self {
            white,
            black,
            side_to_move,
            castle_rights: rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank_idx in (0..8).rev() {
            let rank = Rank(rank_idx);
            let mut empty_run = 0u8;
            for file_idx in 0..8 {
                let square = Square::from_pos(rank, File(file_idx));
                match self.piece_at(square) {
                    Some((kind, side)) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        let c = char::from(kind);
                        write!(f, "{}", if side.0 == Side::WHITE.0 { c.to_ascii_uppercase() } else { c })?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank_idx > 0 {
                write!(f, "/")?;
            }
        }

        let side_char = if self.side_to_move.0 == Side::WHITE.0 { 'w' } else { 'b' };
        let ep = self.en_passant.map_or_else(|| "-".to_string(), |sq| sq.to_string());
        write!(
            f,
            " {side_char} {} {ep} {} {}",
            self.castle_rights, self.halfmove_clock, self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, STARTPOS};
    use crate::defs::{PieceType, Side, Square};

    #[test]
    fn startpos_round_trips_through_display() {
        let pos: Position = STARTPOS.parse().unwrap();
        assert_eq!(pos.to_string(), format!("{STARTPOS} 0 1"));
    }

    #[test]
    fn startpos_has_expected_occupancy() {
        let pos = Position::new();
        assert_eq!(pos.occupancy().count(), 32);
        assert_eq!(pos.piece_at(Square::E1), Some((PieceType::KING, Side::WHITE)));
        assert_eq!(pos.piece_at(Square::E8), Some((PieceType::KING, Side::BLACK)));
        assert_eq!(pos.piece_at(Square::E4), None);
    }

    #[test]
    fn malformed_rank_is_rejected() {
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq -".parse::<Position>().is_err());
    }
}
