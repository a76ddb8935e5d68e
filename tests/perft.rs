//! Cross-checks the move generator against known-good perft tallies.

use lazy_static::lazy_static;

use rookery::{perft::perft, position::Position};

/// One perft scenario: a position, a depth, and the tallies known to be
/// correct at that depth. Categories left at `None` are not checked.
struct Scenario {
    fen: &'static str,
    depth: u32,
    nodes: u64,
    captures: Option<u64>,
    en_passants: Option<u64>,
    castles: Option<u64>,
    promotions: Option<u64>,
    checks: Option<u64>,
}

lazy_static! {
    /// Known-good perft tallies for the starting position and two tactically
    /// dense test positions, used to validate move generation, make/unmake
    /// and legality filtering end to end.
    static ref SCENARIOS: Vec<Scenario> = vec![
        Scenario {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            depth: 1,
            nodes: 20,
            captures: Some(0),
            en_passants: Some(0),
            castles: Some(0),
            promotions: Some(0),
            checks: Some(0),
        },
        Scenario {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            depth: 3,
            nodes: 8_902,
            captures: Some(34),
            en_passants: None,
            castles: None,
            promotions: None,
            checks: Some(12),
        },
        Scenario {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            depth: 4,
            nodes: 197_281,
            captures: Some(1_576),
            en_passants: Some(0),
            castles: Some(0),
            promotions: Some(0),
            checks: Some(469),
        },
        // kiwipete: exercises castling, promotion, and discovered-check
        // generation in the same position.
        Scenario {
            fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            depth: 1,
            nodes: 48,
            captures: Some(8),
            en_passants: None,
            castles: Some(2),
            promotions: None,
            checks: None,
        },
        Scenario {
            fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            depth: 2,
            nodes: 2_039,
            captures: Some(351),
            en_passants: Some(1),
            castles: None,
            promotions: None,
            checks: Some(3),
        },
        // a position whose only legal captures at depth 1 are en passant.
        Scenario {
            fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
            depth: 1,
            nodes: 14,
            captures: Some(1),
            en_passants: None,
            castles: Some(0),
            promotions: Some(0),
            checks: Some(2),
        },
        Scenario {
            fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
            depth: 4,
            nodes: 43_238,
            captures: Some(3_348),
            en_passants: Some(123),
            castles: None,
            promotions: None,
            checks: Some(1_680),
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::{perft, Position, SCENARIOS};

    #[test]
    fn perft_tallies_match_known_good_values() {
        for scenario in SCENARIOS.iter() {
            let mut position: Position = scenario.fen.parse().expect("fixture FEN must parse");
            let result = perft(&mut position, scenario.depth);

            assert_eq!(result.nodes, scenario.nodes, "node count mismatch for {}", scenario.fen);
            if let Some(expected) = scenario.captures {
                assert_eq!(result.captures, expected, "capture count mismatch for {}", scenario.fen);
            }
            if let Some(expected) = scenario.en_passants {
                assert_eq!(result.en_passants, expected, "en passant count mismatch for {}", scenario.fen);
            }
            if let Some(expected) = scenario.castles {
                assert_eq!(result.castles, expected, "castle count mismatch for {}", scenario.fen);
            }
            if let Some(expected) = scenario.promotions {
                assert_eq!(result.promotions, expected, "promotion count mismatch for {}", scenario.fen);
            }
            if let Some(expected) = scenario.checks {
                assert_eq!(result.checks, expected, "check count mismatch for {}", scenario.fen);
            }
        }
    }
}
