//! King steps (castling lives in its own module).

use crate::bitboard::Bitboard;
use crate::square::Square;

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Squares adjacent to `from`.
pub(super) fn king_attacks(from: Square) -> Bitboard {
    KING_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}
