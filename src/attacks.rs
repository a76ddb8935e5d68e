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

//! Attack queries: "does `side` attack `square`?", answered by walking
//! outward from the square rather than consulting precomputed tables. This
//! mirrors the naive approach the move generator itself uses, rather than
//! magic-bitboard sliding attacks.

use crate::{
    defs::{Direction, PieceType, Side, Square},
    position::Position,
};

/// Whether `side` attacks `square` in `position`.
///
/// `side`'s own pieces block rays exactly like the other color's do — a ray
/// walk doesn't distinguish whose blocker stopped it, only that one did.
pub fn square_attacked_by(position: &Position, square: Square, side: Side) -> bool {
    pawn_attacks(position, square, side)
        || knight_attacks(position, square, side)
        || sliding_attacks(position, square, side, Direction::DIAGONALS, PieceType::BISHOP)
        || sliding_attacks(position, square, side, Direction::ORTHOGONALS, PieceType::ROOK)
        || king_attacks(position, square, side)
}

/// Whether an enemy pawn of `side` could capture onto `square`.
fn pawn_attacks(position: &Position, square: Square, side: Side) -> bool {
    let pawns = position.pieces(side).by_kind(PieceType::PAWN);
    // a white pawn attacks the two squares diagonally in front of it (north);
    // so a pawn attacking `square` sits to the south of it.
    let attacker_direction = if side.0 == Side::WHITE.0 { Direction::S } else { Direction::N };
    for file_step in [Direction::E, Direction::W] {
        if let Some(origin) = step(square, attacker_direction, file_step) {
            if pawns.contains(origin) {
                return true;
            }
        }
    }
    false
}

/// Whether an enemy knight of `side` attacks `square`.
fn knight_attacks(position: &Position, square: Square, side: Side) -> bool {
    let knights = position.pieces(side).by_kind(PieceType::KNIGHT);
    knight_offsets_from(square).any(|origin| knights.contains(origin))
}

/// Whether a ray from `square` in one of `directions` first hits an enemy
/// bishop/rook/queen of `side` (for the matching piece kind) before anything
/// else.
fn sliding_attacks(
    position: &Position,
    square: Square,
    side: Side,
    directions: [Direction; 4],
    kind: PieceType,
) -> bool {
    let occupancy = position.occupancy();
    let sliders = position.pieces(side).by_kind(kind) | position.pieces(side).by_kind(PieceType::QUEEN);
    for dir in directions {
        let mut current = square;
        while let Some(next) = step_one(current, dir) {
            current = next;
            if sliders.contains(current) {
                return true;
            }
            if occupancy.contains(current) {
                break;
            }
        }
    }
    false
}

/// Whether an enemy king of `side` is adjacent to `square`.
fn king_attacks(position: &Position, square: Square, side: Side) -> bool {
    let king = position.pieces(side).by_kind(PieceType::KING);
    Direction::ALL.into_iter().any(|dir| step_one(square, dir).is_some_and(|sq| king.contains(sq)))
}

/// Steps one square in `dir`, rejecting any step that wraps around a board
/// edge.
pub fn step_one(square: Square, dir: Direction) -> Option<Square> {
    let dest = square.checked_add(dir)?;
    let file_delta = square.file().0.abs_diff(dest.file().0);
    (file_delta <= 1).then_some(dest)
}

/// Steps one square vertically then one square horizontally, rejecting wrap.
/// Used for pawn-attack-origin lookups where the two components must be
/// composed without re-deriving a combined direction table entry.
fn step(square: Square, vertical: Direction, horizontal: Direction) -> Option<Square> {
    let mid = step_one(square, vertical)?;
    step_one(mid, horizontal)
}

/// All knight-move destinations from `square` that stay on the board.
pub fn knight_offsets_from(square: Square) -> impl Iterator<Item = Square> + '_ {
    Direction::KNIGHT_OFFSETS.into_iter().filter_map(move |offset| {
        let dest = square.checked_add(Direction(offset))?;
        let file_delta = square.file().0.abs_diff(dest.file().0);
        (file_delta <= 2).then_some(dest)
    })
}

#[cfg(test)]
mod tests {
    use super::square_attacked_by;
    use crate::{defs::Side, defs::Square, position::Position};

    #[test]
    fn starting_position_black_pawns_attack_rank_three() {
        let pos = Position::new();
        assert!(square_attacked_by(&pos, Square::D3, Side::BLACK));
        assert!(!square_attacked_by(&pos, Square::D4, Side::BLACK));
    }

    #[test]
    fn sliding_attack_stops_at_first_blocker() {
        // rook on a1, own pawn on a2: a1's rook does not attack past a2.
        let pos: Position = "8/8/8/8/8/8/P7/R6k w - -".parse().unwrap();
        assert!(!square_attacked_by(&pos, Square::A3, Side::WHITE));
        assert!(square_attacked_by(&pos, Square::A2, Side::WHITE));
    }
}
