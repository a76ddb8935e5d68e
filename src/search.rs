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

//! Full-width minimax to a fixed depth. Every internal node is scored, not
//! just the leaves, so [`principal_line`] can read the best line straight off
//! the first-child pointers rather than reconstructing it.

use std::time::Instant;

use crate::{defs::Side, evaluation::evaluate, movegen::generate_legal_moves, moves::Move, position::Position};

/// One node of the search tree: the move that reached it (`None` at the
/// root), its backed-up score, and its sorted children.
struct Node {
    mv: Option<Move>,
    score: i32,
    children: Vec<Node>,
}

/// The outcome of a [`search`] call.
pub struct SearchResult {
    /// The best move found, or `None` if the position has no legal moves.
    pub best_move: Option<Move>,
    /// The backed-up score of the best line, from White's perspective.
    pub score: i32,
    /// The full sequence of moves making up the best line.
    pub principal_line: Vec<Move>,
    /// Total nodes visited while building the tree.
    pub nodes: u64,
}

/// Builds a full-width search tree to `depth` plies and reports the best
/// move, its score, and the principal line, printing a UCI-style `info`
/// line.
pub fn search(position: &mut Position, depth: u32) -> SearchResult {
    let start = Instant::now();
    let mut nodes = 0;
    let root = build_tree(position, depth, &mut nodes);

    let best_move = root.children.first().and_then(|child| child.mv);
    let score = root.score;
    let principal_line = walk_principal_line(root);

    let elapsed_ms = start.elapsed().as_millis();
    let pv = principal_line.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
    println!("info depth {depth} score {score} nodes {nodes} time {elapsed_ms} pv {pv}");

    SearchResult { best_move, score, principal_line, nodes }
}

/// The first move of [`search`]'s best line, or `None` with no legal moves.
pub fn best_move(position: &mut Position, depth: u32) -> Option<Move> {
    let mut nodes = 0;
    let root = build_tree(position, depth, &mut nodes);
    root.children.first().and_then(|child| child.mv)
}

/// Recursively builds the search tree rooted at the current position.
/// Position is mutated via make/unmake during the walk and restored to its
/// original state before returning.
fn build_tree(position: &mut Position, depth: u32, nodes: &mut u64) -> Node {
    *nodes += 1;

    let legal_moves = generate_legal_moves(position);
    if depth == 0 || legal_moves.is_empty() {
        return Node { mv: None, score: evaluate(position), children: Vec::new() };
    }

    let mover = position.side_to_move();
    let mut children: Vec<Node> = legal_moves
        .into_iter()
        .map(|mv| {
            let saved = position.make_move(mv);
            let mut child = build_tree(position, depth - 1, nodes);
            child.mv = Some(mv);
            position.unmake_move(saved);
            child
        })
        .collect();

    if mover.0 == Side::WHITE.0 {
        children.sort_by(|a, b| b.score.cmp(&a.score));
    } else {
        children.sort_by(|a, b| a.score.cmp(&b.score));
    }

    let score = children[0].score;
    Node { mv: None, score, children }
}

/// Follows first-child pointers from `root` down to a leaf, collecting the
/// move at each step.
fn walk_principal_line(mut node: Node) -> Vec<Move> {
    let mut line = Vec::new();
    while let Some(first_child) = node.children.into_iter().next() {
        if let Some(mv) = first_child.mv {
            line.push(mv);
        }
        node = first_child;
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{best_move, search};
    use crate::position::Position;

    #[test]
    fn search_returns_a_legal_best_move_from_the_opening_position() {
        let mut pos = Position::new();
        let result = search(&mut pos, 1);
        assert!(result.best_move.is_some());
        assert_eq!(result.nodes, 1 + 20);
    }

    #[test]
    fn prefers_capturing_a_hanging_queen() {
        let mut pos: Position = "4k3/8/8/8/8/8/8/R2qK3 w - -".parse().unwrap();
        let mv = best_move(&mut pos, 1).unwrap();
        assert_eq!(mv.to, crate::defs::Square::D1);
    }

    #[test]
    fn principal_line_length_matches_requested_depth_when_moves_remain() {
        let mut pos = Position::new();
        let result = search(&mut pos, 2);
        assert_eq!(result.principal_line.len(), 2);
    }
}
