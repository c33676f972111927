//! Perft (performance test) for move generation correctness verification.

use crate::board::Board;
use crate::color::Color;
use crate::history::MoveHistory;
use crate::legality::{attempt_move, legal_moves};

/// Count the number of leaf nodes at the given depth for `color` to move.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without playing them.
pub fn perft(board: &Board, history: &MoveHistory, color: Color, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, history, color);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut child = *board;
        let mut child_history = history.clone();
        if attempt_move(&mut child, &mut child_history, color, mv).is_ok() {
            nodes += perft(&child, &child_history, color.flip(), depth - 1);
        }
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(move, node_count)` pairs sorted by move text.
pub fn divide(board: &Board, history: &MoveHistory, color: Color, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = legal_moves(board, history, color)
        .into_iter()
        .filter_map(|mv| {
            let mut child = *board;
            let mut child_history = history.clone();
            attempt_move(&mut child, &mut child_history, color, mv).ok()?;
            let count = if depth <= 1 {
                1
            } else {
                perft(&child, &child_history, color.flip(), depth - 1)
            };
            Some((mv.to_string(), count))
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    fn run(fen: &str, depth: usize) -> u64 {
        let game: Game = fen.parse().unwrap();
        let color = game.side_to_move().unwrap();
        perft(game.board(), game.history(), color, depth)
    }

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn perft_depth_0() {
        assert_eq!(perft(&Board::starting_position(), &MoveHistory::new(), Color::White, 0), 1);
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Board::starting_position(), &MoveHistory::new(), Color::White, 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Board::starting_position(), &MoveHistory::new(), Color::White, 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Board::starting_position(), &MoveHistory::new(), Color::White, 3), 8_902);
    }

    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(run(KIWIPETE, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(run(KIWIPETE, 2), 2_039);
    }

    #[test]
    fn perft_pos3_depth_1() {
        assert_eq!(run(POSITION3, 1), 14);
    }

    #[test]
    fn perft_pos3_depth_2() {
        assert_eq!(run(POSITION3, 2), 191);
    }

    #[test]
    fn perft_pos3_depth_3() {
        assert_eq!(run(POSITION3, 3), 2_812);
    }

    #[test]
    #[ignore] // slow
    fn perft_pos3_depth_4() {
        assert_eq!(run(POSITION3, 4), 43_238);
    }

    #[test]
    fn divide_startpos_depth_1() {
        let results = divide(&Board::starting_position(), &MoveHistory::new(), Color::White, 1);
        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, count)| *count == 1));
        assert!(results.iter().any(|(mv, _)| mv == "e2e4"));
    }
}
