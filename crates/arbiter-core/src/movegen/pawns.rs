//! Pawn pushes, captures, and en passant.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;
use crate::history::MoveHistory;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Diagonal-forward squares a pawn of `color` on `from` attacks.
pub(super) fn pawn_attacks(from: Square, color: Color) -> Bitboard {
    [-1, 1]
        .into_iter()
        .filter_map(|dc| from.offset(color.forward(), dc))
        .collect()
}

/// Pushes and ordinary captures for a pawn of `color` on `from`.
pub(super) fn pawn_moves(board: &Board, history: &MoveHistory, from: Square, color: Color) -> Bitboard {
    let mut targets = Bitboard::EMPTY;

    if let Some(one) = from.offset(color.forward(), 0).filter(|&sq| board.is_empty(sq)) {
        targets.insert(one);
        if !history.has_moved(from)
            && let Some(two) = one.offset(color.forward(), 0).filter(|&sq| board.is_empty(sq))
        {
            targets.insert(two);
        }
    }

    for sq in pawn_attacks(from, color) {
        if board.is_occupied_by_opponent(sq, color) {
            targets.insert(sq);
        }
    }

    targets | en_passant_moves(board, history, from, color)
}

/// En passant captures available to a pawn of `color` on `from`.
///
/// The pawn beside it must be an opponent pawn that double-stepped on the
/// immediately preceding move, and the square behind it must be empty.
pub(super) fn en_passant_moves(
    board: &Board,
    history: &MoveHistory,
    from: Square,
    color: Color,
) -> Bitboard {
    let Some(victim) = history.double_step() else {
        return Bitboard::EMPTY;
    };
    if victim.row() != from.row() || (victim.col() - from.col()).abs() != 1 {
        return Bitboard::EMPTY;
    }
    if board.piece_at(victim) != Some(Piece::new(PieceKind::Pawn, color.flip())) {
        return Bitboard::EMPTY;
    }
    match victim.offset(color.forward(), 0) {
        Some(dest) if board.is_empty(dest) => dest.bitboard(),
        _ => Bitboard::EMPTY,
    }
}
