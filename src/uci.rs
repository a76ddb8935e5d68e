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

//! A single-threaded line-oriented command loop speaking a UCI-like
//! protocol: `uci`, `isready`, `ucinewgame`, `position`, `go` (including `go
//! perft <depth>`) and `quit`. The loop owns the one mutable [`Position`] for
//! the whole session; nothing else touches it.

use std::io::stdin;

use crate::{
    defs::{PieceType, Square},
    movegen::generate_legal_moves,
    moves::Move,
    perft::perft_divide,
    position::Position,
    search::search,
};

/// The default search depth for a plain `go` with no depth given.
const DEFAULT_SEARCH_DEPTH: u32 = 5;

/// The name of this engine.
const ID_NAME: &str = "Rookery";
/// The version of this engine.
const ID_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Repeatedly reads a command from stdin and executes it, until `quit` or
/// end of input.
pub fn main_loop() {
    let mut position = Position::new();

    for line in stdin().lines() {
        let Ok(line) = line else { break };
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("uci") => {
                println!("id name {ID_NAME} {ID_VERSION}");
                println!("uciok");
            }
            Some("isready") => println!("readyok"),
            Some("ucinewgame") => position = Position::new(),
            Some("position") => set_position(tokens, &mut position),
            Some("go") => go(tokens, &mut position),
            Some("quit") => break,
            Some(other) => println!("info string unrecognised command \"{other}\""),
            None => (),
        }
    }
}

/// Interprets and executes the `go` command: `go perft <depth>` runs a
/// divide-and-count; any other form (or a bare `go`) runs [`search`] to
/// [`DEFAULT_SEARCH_DEPTH`] or an explicit `depth <n>`.
fn go<'a>(mut tokens: impl Iterator<Item = &'a str>, position: &mut Position) {
    let mut depth = DEFAULT_SEARCH_DEPTH;

    while let Some(token) = tokens.next() {
        match token {
            "perft" => {
                let Some(perft_depth) = tokens.next().and_then(|t| t.parse().ok()) else {
                    return;
                };
                run_perft(position, perft_depth);
                return;
            }
            "depth" => {
                if let Some(d) = tokens.next().and_then(|t| t.parse().ok()) {
                    depth = d;
                }
            }
            _ => {}
        }
    }

    let result = search(position, depth);
    match result.best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove 0000"),
    }
}

/// Runs perft at `depth` from `position`, printing the per-root-move divide
/// followed by the total node count.
fn run_perft(position: &mut Position, depth: u32) {
    let (divide, total) = perft_divide(position, depth);
    for (mv, result) in divide {
        println!("{mv}: {}", result.nodes);
    }
    println!("Nodes searched: {}", total.nodes);
}

/// Sets the position from a `position` command: `startpos` or `fen <...>`,
/// optionally followed by `moves <move> <move> ...`.
///
/// Leaves `position` unchanged if the base position text itself cannot be
/// parsed. If a move in the `moves` list fails to resolve, application stops
/// at that move and reports diagnostically to stderr, but every move applied
/// before the offending one remains applied.
fn set_position<'a>(tokens: impl Iterator<Item = &'a str>, position: &mut Position) {
    let mut tokens = tokens.peekable();

    let mut built = match tokens.next() {
        Some("startpos") => Position::new(),
        Some("fen") => {
            let mut fen_fields = Vec::new();
            while let Some(field) = tokens.next_if(|&t| t != "moves") {
                fen_fields.push(field);
            }
            match fen_fields.join(" ").parse() {
                Ok(parsed) => parsed,
                Err(err) => {
                    eprintln!("info string invalid fen: {err}");
                    return;
                }
            }
        }
        _ => return,
    };

    if let Some(token) = tokens.next() {
        if token != "moves" {
            *position = built;
            return;
        }
    }

    for move_text in tokens {
        let Some(mv) = parse_move(move_text, &built) else {
            eprintln!("info string illegal or unrecognised move \"{move_text}\"");
            break;
        };
        if !built.is_legal(mv) {
            eprintln!("info string illegal or unrecognised move \"{move_text}\"");
            break;
        }
        built.make_move(mv);
    }

    *position = built;
}

/// Resolves long algebraic move text (e.g. `e2e4`, `a7a8q`) against the
/// legal moves available in `position`.
fn parse_move(text: &str, position: &Position) -> Option<Move> {
    let from: Square = text.get(0..2)?.parse().ok()?;
    let to: Square = text.get(2..4)?.parse().ok()?;
    let promotion = match text.get(4..5) {
        Some(c) => Some(PieceType::try_from(c.chars().next()?).ok()?),
        None => None,
    };

    let mut position = position.clone();
    generate_legal_moves(&mut position)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion() == promotion)
}

#[cfg(test)]
mod tests {
    use super::{parse_move, set_position};
    use crate::position::Position;

    #[test]
    fn parses_double_pawn_push_from_startpos() {
        let pos = Position::new();
        let mv = parse_move("e2e4", &pos).unwrap();
        assert_eq!(mv.to.to_string(), "e4");
    }

    #[test]
    fn set_position_applies_moves_after_startpos() {
        let mut pos = Position::new();
        set_position(["startpos", "moves", "e2e4", "e7e5"].into_iter(), &mut pos);
        assert_eq!(pos.side_to_move(), crate::defs::Side::WHITE);
    }

    #[test]
    fn set_position_parses_fen_without_moves() {
        let mut pos = Position::new();
        set_position(
            "fen 8/8/8/8/8/8/8/K6k w - - 0 1".split_whitespace(),
            &mut pos,
        );
        assert_eq!(pos.occupancy().count(), 2);
    }

    #[test]
    fn set_position_applies_moves_after_a_lenient_four_field_fen() {
        // the halfmove clock and fullmove number are omitted here, so the
        // "moves" keyword must not be mistaken for one of the fen's fields.
        let mut pos = Position::new();
        set_position(
            "fen 8/8/8/8/8/8/8/K6k w - - moves a1a2".split_whitespace(),
            &mut pos,
        );
        assert_eq!(
            pos.piece_at(crate::defs::Square::A2),
            Some((crate::defs::PieceType::KING, crate::defs::Side::WHITE))
        );
    }
}
