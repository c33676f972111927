//! Knight targets.

use crate::bitboard::Bitboard;
use crate::square::Square;

/// The eight knight leaps as (row, column) deltas.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

/// Squares a knight on `from` attacks, regardless of occupancy.
pub(super) fn knight_attacks(from: Square) -> Bitboard {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}
