//! Castling eligibility and the rook relocation that goes with it.

use tracing::trace;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::history::MoveHistory;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::attack_set;

/// Columns a castling rook starts on.
const ROOK_COLUMNS: [i8; 2] = [0, 7];

/// King destinations reachable by castling from `from`.
///
/// Requires an unmoved king that is not in check, an unmoved corner rook of
/// the same color on the same row, empty squares strictly between them, and
/// no attacked square on the king's path from its start to its destination.
/// On the queen side the square next to the rook must be empty but may be
/// attacked, since the king never crosses it.
pub fn castling_moves(board: &Board, history: &MoveHistory, from: Square) -> Bitboard {
    let Some(king) = board.piece_at(from) else {
        return Bitboard::EMPTY;
    };
    if king.kind() != PieceKind::King || history.has_moved(from) {
        return Bitboard::EMPTY;
    }

    let us = king.color();
    let attacked = attack_set(board, us.flip());
    if attacked.contains(from) {
        return Bitboard::EMPTY;
    }

    let mut targets = Bitboard::EMPTY;
    for rook_col in ROOK_COLUMNS {
        let rook_sq = Square::at(from.row(), rook_col);
        if board.piece_at(rook_sq) != Some(Piece::new(PieceKind::Rook, us)) || history.has_moved(rook_sq) {
            continue;
        }

        let step: i8 = if rook_col > from.col() { 1 } else { -1 };
        if (rook_col - from.col()).abs() < 3 {
            continue;
        }

        let between_clear = (1..(rook_col - from.col()).abs())
            .filter_map(|i| from.offset(0, i * step))
            .all(|sq| board.is_empty(sq));
        if !between_clear {
            continue;
        }

        let path_safe = (1..=2)
            .filter_map(|i| from.offset(0, i * step))
            .all(|sq| !attacked.contains(sq));
        if !path_safe {
            trace!(king = %from, rook = %rook_sq, "castling path attacked");
            continue;
        }

        if let Some(dest) = from.offset(0, 2 * step) {
            targets.insert(dest);
        }
    }
    targets
}

/// For a king move of two columns, return the rook's (from, to) squares.
pub(crate) fn castling_rook(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    let delta = king_to.col() - king_from.col();
    if king_from.row() != king_to.row() || delta.abs() != 2 {
        return None;
    }
    let step = delta.signum();
    let rook_from = Square::new(king_from.row(), if step > 0 { 7 } else { 0 })?;
    let rook_to = king_to.offset(0, -step)?;
    Some((rook_from, rook_to))
}
