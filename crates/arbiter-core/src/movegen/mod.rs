//! Pseudo-legal move generation and attack sets.
//!
//! Generated moves obey piece geometry and occupancy but may leave the
//! mover's own king attacked; [`legality`](crate::legality) filters those out.

mod castling;
mod king;
mod knights;
mod pawns;
mod sliders;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;
use crate::history::MoveHistory;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

pub use self::castling::castling_moves;
pub(crate) use self::castling::castling_rook;

use self::king::king_attacks;
use self::knights::knight_attacks;
use self::pawns::{pawn_attacks, pawn_moves};
use self::sliders::slider_attacks;

/// Squares `piece` standing on `from` attacks: where it could capture an enemy piece.
///
/// Pawns attack diagonally whether or not anything stands there; slider rays
/// include their first blocker of either color.
pub fn attacks_from(board: &Board, from: Square, piece: Piece) -> Bitboard {
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(from, piece.color()),
        PieceKind::Knight => knight_attacks(from),
        PieceKind::King => king_attacks(from),
        kind => slider_attacks(board, from, kind),
    }
}

/// Union of the squares attacked by all of `color`'s pieces.
pub fn attack_set(board: &Board, color: Color) -> Bitboard {
    board
        .pieces(color)
        .fold(Bitboard::EMPTY, |acc, (sq, piece)| acc | attacks_from(board, sq, piece))
}

/// Return `true` if `color`'s king stands on a square the opponent attacks.
///
/// A side without a king is never in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| attack_set(board, color.flip()).contains(king))
}

/// Destinations for the piece on `from`, excluding castling.
///
/// Includes en passant captures. Returns an empty set for an empty square.
pub fn pseudo_legal_moves(board: &Board, history: &MoveHistory, from: Square) -> Bitboard {
    let Some(piece) = board.piece_at(from) else {
        return Bitboard::EMPTY;
    };
    let us = piece.color();
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, history, from, us),
        _ => attacks_from(board, from, piece) & !board.side(us),
    }
}

/// Every destination the piece on `from` may try: pseudo-legal moves plus castling.
pub fn candidate_moves(board: &Board, history: &MoveHistory, from: Square) -> Bitboard {
    pseudo_legal_moves(board, history, from) | castling_moves(board, history, from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_twenty_candidates() {
        let board = Board::starting_position();
        let history = MoveHistory::new();
        let total: u32 = board
            .pieces(Color::White)
            .map(|(sq, _)| candidate_moves(&board, &history, sq).count())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn knight_never_lands_on_own_piece() {
        let board = Board::starting_position();
        let targets = pseudo_legal_moves(&board, &MoveHistory::new(), Square::G1);
        assert_eq!(targets, Square::F3.bitboard() | Square::H3.bitboard());
    }

    #[test]
    fn blocked_rook_has_no_moves() {
        let board = Board::starting_position();
        assert!(pseudo_legal_moves(&board, &MoveHistory::new(), Square::A1).is_empty());
    }

    #[test]
    fn rook_captures_then_stops() {
        let mut board = Board::empty();
        board.place(Square::A1, Piece::WHITE_ROOK);
        board.place(Square::A4, Piece::BLACK_PAWN);
        board.place(Square::C1, Piece::WHITE_KING);
        let targets = pseudo_legal_moves(&board, &MoveHistory::new(), Square::A1);
        assert!(targets.contains(Square::A4));
        assert!(!targets.contains(Square::A5));
        assert!(targets.contains(Square::B1));
        assert!(!targets.contains(Square::C1));
        assert_eq!(targets.count(), 4);
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let mut board = Board::empty();
        board.place(Square::D4, Piece::WHITE_QUEEN);
        let history = MoveHistory::new();
        let queen = pseudo_legal_moves(&board, &history, Square::D4);
        board.place(Square::D4, Piece::WHITE_ROOK);
        let rook = pseudo_legal_moves(&board, &history, Square::D4);
        board.place(Square::D4, Piece::WHITE_BISHOP);
        let bishop = pseudo_legal_moves(&board, &history, Square::D4);
        assert_eq!(queen, rook | bishop);
    }

    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::starting_position();
        assert!(candidate_moves(&board, &MoveHistory::new(), Square::E4).is_empty());
    }

    #[test]
    fn attack_set_starting_position() {
        let board = Board::starting_position();
        let white = attack_set(&board, Color::White);
        assert!(white.contains(Square::F3));
        assert!(white.contains(Square::E3));
        assert!(!white.contains(Square::E4));
        assert!(!attack_set(&board, Color::Black).contains(Square::E4));
    }

    #[test]
    fn in_check_detection() {
        let mut board = Board::empty();
        board.place(Square::E1, Piece::WHITE_KING);
        board.place(Square::E8, Piece::BLACK_ROOK);
        assert!(in_check(&board, Color::White));
        board.place(Square::E4, Piece::WHITE_PAWN);
        assert!(!in_check(&board, Color::White));
        assert!(!in_check(&board, Color::Black));
    }
}
