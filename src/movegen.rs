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

//! Pseudo-legal move generation, naive ray-walking rather than magic
//! bitboards: sliders and the attack query both walk one square at a time,
//! per SPEC_FULL.md's explicit algorithmic notes. King moves are filtered to
//! fully legal here; every other piece is filtered to legal later by
//! [`Position::is_legal`].

use crate::{
    attacks::{knight_offsets_from, square_attacked_by, step_one},
    bitboard::Bitboard,
    defs::{Direction, PieceType, Rank, Side, Square},
    moves::{Move, MoveKind},
    position::{CastleRights, Position},
};

/// Generates every pseudo-legal move (fully legal for the king) from the
/// current position, in ascending-square, fixed-piece-kind order.
pub fn generate_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    let side = position.side_to_move();

    generate_pawn_moves(position, side, &mut moves);
    generate_leaper_moves(position, side, PieceType::KNIGHT, &mut moves);
    generate_slider_moves(position, side, PieceType::BISHOP, Direction::DIAGONALS, &mut moves);
    generate_slider_moves(position, side, PieceType::ROOK, Direction::ORTHOGONALS, &mut moves);
    generate_slider_moves(position, side, PieceType::QUEEN, Direction::ALL, &mut moves);
    generate_king_moves(position, side, &mut moves);
    generate_castles(position, side, &mut moves);

    moves
}

/// The move's post-move castle rights, given the rights before it and what
/// it does.
fn rights_after(
    rights_before: CastleRights,
    side: Side,
    from: Square,
    to: Square,
    kind: PieceType,
) -> CastleRights {
    let mut rights = rights_before;
    match kind {
        PieceType::KING => rights = rights.without(CastleRights::for_side(side)),
        PieceType::ROOK => rights = rights.without(CastleRights::stripped_by_capture_on(from)),
        _ => {}
    }
    rights.without(CastleRights::stripped_by_capture_on(to))
}

/// Generates pawn pushes, double pushes, captures, en passant, and every
/// promotion variant on moves reaching the last rank.
fn generate_pawn_moves(position: &Position, side: Side, moves: &mut Vec<Move>) {
    let pawns = position.pieces(side).by_kind(PieceType::PAWN);
    let empty = position.empty_squares();
    let enemy = position.pieces(side.flip()).occupancy();
    let (push_dir, start_rank, last_rank) = if side.0 == Side::WHITE.0 {
        (Direction::N, Rank::TWO, Rank::EIGHT)
    } else {
        (Direction::S, Rank::SEVEN, Rank::ONE)
    };

    for from in pawns {
        let rights = position.castle_rights();
        let single = from + push_dir;
        if empty.contains(single) {
            push_pawn_move(moves, from, single, last_rank, false, rights);
            if from.rank() == start_rank {
                let double = single + push_dir;
                if empty.contains(double) {
                    moves.push(Move {
                        from,
                        to: double,
                        kind: MoveKind::DoublePawnPush,
                        post_move_castle_rights: rights,
                        pre_move_en_passant: position.en_passant_target(),
                    });
                }
            }
        }

        for capture_dir in [Direction::E, Direction::W] {
            let Some(to) = step_one(from, push_dir).and_then(|mid| step_one(mid, capture_dir)) else {
                continue;
            };
            if enemy.contains(to) {
                push_pawn_move(moves, from, to, last_rank, true, rights_after(rights, side, from, to, PieceType::PAWN));
            } else if Some(to) == position.en_passant_target() {
                moves.push(Move {
                    from,
                    to,
                    kind: MoveKind::EnPassant,
                    post_move_castle_rights: rights,
                    pre_move_en_passant: position.en_passant_target(),
                });
            }
        }
    }
}

/// Pushes a quiet pawn move, or all four promotion variants if `to` is on
/// the last rank.
fn push_pawn_move(
    moves: &mut Vec<Move>,
    from: Square,
    to: Square,
    last_rank: Rank,
    is_capture: bool,
    rights: CastleRights,
) {
    if to.rank() == last_rank {
        for promoted in PieceType::PROMOTION_KINDS {
            moves.push(Move {
                from,
                to,
                kind: if is_capture { MoveKind::PromotionCapture(promoted) } else { MoveKind::Promotion(promoted) },
                post_move_castle_rights: rights,
                pre_move_en_passant: None,
            });
        }
    } else {
        moves.push(Move {
            from,
            to,
            kind: if is_capture { MoveKind::Capture } else { MoveKind::Quiet },
            post_move_castle_rights: rights,
            pre_move_en_passant: None,
        });
    }
}

/// Generates moves for a leaping piece kind (only knights, currently).
fn generate_leaper_moves(position: &Position, side: Side, kind: PieceType, moves: &mut Vec<Move>) {
    let own = position.pieces(side).occupancy();
    let enemy = position.pieces(side.flip()).occupancy();
    for from in position.pieces(side).by_kind(kind) {
        for to in knight_offsets_from(from) {
            if own.contains(to) {
                continue;
            }
            push_simple_move(moves, position, side, from, to, kind, enemy.contains(to));
        }
    }
}

/// Generates moves for a sliding piece kind, walking each direction one
/// square at a time and stopping at the first occupied square.
fn generate_slider_moves(
    position: &Position,
    side: Side,
    kind: PieceType,
    directions: [Direction; 4],
    moves: &mut Vec<Move>,
) {
    let own = position.pieces(side).occupancy();
    let enemy = position.pieces(side.flip()).occupancy();
    for from in position.pieces(side).by_kind(kind) {
        for dir in directions {
            let mut current = from;
            while let Some(next) = step_one(current, dir) {
                current = next;
                if own.contains(current) {
                    break;
                }
                let is_capture = enemy.contains(current);
                push_simple_move(moves, position, side, from, current, kind, is_capture);
                if is_capture {
                    break;
                }
            }
        }
    }
}

/// Generates fully legal king moves: the eight neighbours, own-color and
/// attacked squares rejected.
fn generate_king_moves(position: &Position, side: Side, moves: &mut Vec<Move>) {
    let own = position.pieces(side).occupancy();
    let enemy_side = side.flip();
    let from = position.pieces(side).king_square();
    for dir in Direction::ALL {
        let Some(to) = step_one(from, dir) else { continue };
        if own.contains(to) {
            continue;
        }
        if square_attacked_by(position, to, enemy_side) {
            continue;
        }
        let is_capture = position.pieces(enemy_side).occupancy().contains(to);
        push_simple_move(moves, position, side, from, to, PieceType::KING, is_capture);
    }
}

/// Appends a quiet-or-capture move for a non-pawn, non-castle piece.
fn push_simple_move(
    moves: &mut Vec<Move>,
    position: &Position,
    side: Side,
    from: Square,
    to: Square,
    kind: PieceType,
    is_capture: bool,
) {
    let rights = rights_after(position.castle_rights(), side, from, to, kind);
    moves.push(Move {
        from,
        to,
        kind: if is_capture { MoveKind::Capture } else { MoveKind::Quiet },
        post_move_castle_rights: rights,
        pre_move_en_passant: position.en_passant_target(),
    });
}

/// Generates castling moves, requiring the castling right, an empty space
/// between king and rook, and that the king's origin, transit and
/// destination squares are all unattacked — for both colors identically.
fn generate_castles(position: &Position, side: Side, moves: &mut Vec<Move>) {
    let rights = position.castle_rights();
    let enemy_side = side.flip();
    let occupancy = position.occupancy();
    let from = position.pieces(side).king_square();

    for (right, kind, space, transit, dest) in castle_candidates(side) {
        if !rights.contains(right) {
            continue;
        }
        if !Bitboard::is_clear(occupancy, space) {
            continue;
        }
        if square_attacked_by(position, from, enemy_side)
            || square_attacked_by(position, transit, enemy_side)
            || square_attacked_by(position, dest, enemy_side)
        {
            continue;
        }
        moves.push(Move {
            from,
            to: dest,
            kind,
            post_move_castle_rights: rights.without(CastleRights::for_side(side)),
            pre_move_en_passant: position.en_passant_target(),
        });
    }
}

/// The `(right, kind, empty-space-mask, transit-square, destination)` tuples
/// for both of `side`'s castles.
fn castle_candidates(side: Side) -> [(CastleRights, MoveKind, Bitboard, Square, Square); 2] {
    if side.0 == Side::WHITE.0 {
        [
            (CastleRights::WHITE_KING, MoveKind::KingCastle, Bitboard::CASTLE_SPACE_WK, Square::F1, Square::G1),
            (CastleRights::WHITE_QUEEN, MoveKind::QueenCastle, Bitboard::CASTLE_SPACE_WQ, Square::D1, Square::C1),
        ]
    } else {
        [
            (CastleRights::BLACK_KING, MoveKind::KingCastle, Bitboard::CASTLE_SPACE_BK, Square::F8, Square::G8),
            (CastleRights::BLACK_QUEEN, MoveKind::QueenCastle, Bitboard::CASTLE_SPACE_BQ, Square::D8, Square::C8),
        ]
    }
}

/// Generates every fully legal move: the pseudo-legal list, filtered through
/// [`Position::is_legal`].
pub fn generate_legal_moves(position: &mut Position) -> Vec<Move> {
    generate_moves(position)
        .into_iter()
        .filter(|&mv| position.is_legal(mv))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate_legal_moves, generate_moves};
    use crate::position::Position;

    #[test]
    fn startpos_has_twenty_legal_moves() {
        let mut pos = Position::new();
        assert_eq!(generate_legal_moves(&mut pos).len(), 20);
    }

    #[test]
    fn knight_in_corner_has_two_moves_on_empty_board() {
        let pos: Position = "7k/8/8/8/8/8/8/N6K w - -".parse().unwrap();
        let moves = generate_moves(&pos);
        let knight_moves = moves.iter().filter(|m| m.from == crate::defs::Square::A1).count();
        assert_eq!(knight_moves, 2);
    }

    #[test]
    fn knight_on_b1_has_three_moves_on_empty_board() {
        let pos: Position = "7k/8/8/8/8/8/8/1N5K w - -".parse().unwrap();
        let moves = generate_moves(&pos);
        let knight_moves = moves.iter().filter(|m| m.from == crate::defs::Square::B1).count();
        assert_eq!(knight_moves, 3);
    }

    #[test]
    fn pawn_on_seventh_rank_emits_four_promotions_with_empty_eighth() {
        let pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - -".parse().unwrap();
        let moves = generate_moves(&pos);
        let promos = moves.iter().filter(|m| m.promotion().is_some()).count();
        assert_eq!(promos, 4);
    }

    #[test]
    fn pawn_on_seventh_rank_emits_eight_promotions_with_adjacent_enemy() {
        let pos: Position = "1n2k3/P7/8/8/8/8/8/4K3 w - -".parse().unwrap();
        let moves = generate_moves(&pos);
        let promos = moves.iter().filter(|m| m.promotion().is_some()).count();
        assert_eq!(promos, 8);
    }

    #[test]
    fn double_pawn_push_sets_en_passant_target_square() {
        let pos = Position::new();
        let moves = generate_moves(&pos);
        let double = moves
            .iter()
            .find(|m| m.from == crate::defs::Square::E2 && m.to == crate::defs::Square::E4)
            .unwrap();
        assert!(matches!(double.kind, crate::moves::MoveKind::DoublePawnPush));
    }
}
