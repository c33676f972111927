//! What has moved so far: the move log, the has-moved mask, and the en passant marker.

use crate::bitboard::Bitboard;
use crate::piece::Piece;
use crate::square::Square;

/// One piece displacement. Castling produces two records: king, then rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The piece as it stood on `from` (a promoting pawn is recorded as a pawn).
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

/// Per-game move history.
///
/// The has-moved flags are keyed by the square the piece currently stands on
/// and travel with the piece, so "has this piece moved" is a bit test rather
/// than a scan of the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moved: Bitboard,
    /// Square of the pawn that double-stepped on the immediately preceding move.
    double_step: Option<Square>,
    log: Vec<MoveRecord>,
}

impl MoveHistory {
    /// Create an empty history for a game in its starting position.
    pub fn new() -> MoveHistory {
        MoveHistory::default()
    }

    /// Create a history for a set-up position.
    pub(crate) fn with_state(moved: Bitboard, double_step: Option<Square>) -> MoveHistory {
        MoveHistory {
            moved,
            double_step,
            log: Vec::new(),
        }
    }

    /// Return `true` if the piece standing on `sq` has moved during the game.
    #[inline]
    pub fn has_moved(&self, sq: Square) -> bool {
        self.moved.contains(sq)
    }

    /// Return the square of a pawn that can be captured en passant on this turn.
    #[inline]
    pub fn double_step(&self) -> Option<Square> {
        self.double_step
    }

    /// Return the most recent record, if any.
    pub fn last(&self) -> Option<&MoveRecord> {
        self.log.last()
    }

    /// Number of records, castling counting twice.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Iterate over records in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.log.iter()
    }

    /// Log a displacement and carry the has-moved flag to the destination.
    pub(crate) fn record(&mut self, piece: Piece, from: Square, to: Square) {
        self.moved.remove(from);
        self.moved.insert(to);
        self.log.push(MoveRecord { piece, from, to });
    }

    /// Drop the has-moved flag of a piece taken off the board.
    pub(crate) fn forget(&mut self, sq: Square) {
        self.moved.remove(sq);
    }

    /// Set or clear the en passant marker. Called once per committed move.
    pub(crate) fn set_double_step(&mut self, sq: Option<Square>) {
        self.double_step = sq;
    }
}
