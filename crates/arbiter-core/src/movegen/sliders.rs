//! Ray casting for rooks, bishops, and queens.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::piece_kind::PieceKind;
use crate::square::Square;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Walk from `from` in one direction until the edge or the first occupied square.
///
/// The blocking square is included whichever side owns it; the caller masks
/// out its own pieces.
fn ray(board: &Board, from: Square, (dr, dc): (i8, i8)) -> Bitboard {
    let mut squares = Bitboard::EMPTY;
    let mut current = from;
    while let Some(next) = current.offset(dr, dc) {
        squares.insert(next);
        if !board.is_empty(next) {
            break;
        }
        current = next;
    }
    squares
}

/// Squares attacked by a slider of `kind` standing on `from`.
pub(super) fn slider_attacks(board: &Board, from: Square, kind: PieceKind) -> Bitboard {
    let (orthogonal, diagonal) = match kind {
        PieceKind::Rook => (true, false),
        PieceKind::Bishop => (false, true),
        PieceKind::Queen => (true, true),
        _ => (false, false),
    };

    let mut attacks = Bitboard::EMPTY;
    if orthogonal {
        for dir in ORTHOGONAL {
            attacks |= ray(board, from, dir);
        }
    }
    if diagonal {
        for dir in DIAGONAL {
            attacks |= ray(board, from, dir);
        }
    }
    attacks
}
