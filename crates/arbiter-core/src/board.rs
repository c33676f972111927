//! The 8x8 grid of cells and its occupancy queries.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Back-row layout from column a to column h.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement, indexed by [`Square::index()`].
///
/// `Board` is a flat array of values, so a copy is a full independent
/// snapshot: speculative moves are played on a copy and either committed
/// by assignment or dropped.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Return a board with no pieces.
    pub const fn empty() -> Board {
        Board {
            cells: [None; Square::COUNT],
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, kind) in BACK_ROW.into_iter().enumerate() {
                board.place(Square::at(color.back_row(), col as i8), Piece::new(kind, color));
                board.place(
                    Square::at(color.pawn_row(), col as i8),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        board
    }

    /// Return the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Put a piece on a square, replacing whatever stood there.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.cells[sq.index()] = Some(piece);
    }

    /// Clear a square, returning the piece that stood there.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// Move the piece on `from` to `to`, returning the piece it displaced.
    ///
    /// Does nothing if `from` is empty.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        match self.remove(from) {
            Some(piece) => self.cells[to.index()].replace(piece),
            None => None,
        }
    }

    /// Return `true` if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_none()
    }

    /// Return `true` if a piece owned by the opponent of `player` stands on the square.
    #[inline]
    pub fn is_occupied_by_opponent(&self, sq: Square, player: Color) -> bool {
        self.piece_at(sq).is_some_and(|p| p.color() != player)
    }

    /// Return `true` if a piece owned by `player` stands on the square.
    #[inline]
    pub fn is_occupied_by_self(&self, sq: Square, player: Color) -> bool {
        self.piece_at(sq).is_some_and(|p| p.color() == player)
    }

    /// Return the set of squares holding `color`'s pieces.
    pub fn side(&self, color: Color) -> Bitboard {
        Square::all()
            .filter(|&sq| self.is_occupied_by_self(sq, color))
            .collect()
    }

    /// Iterate over `color`'s pieces in square order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.color() == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Return the square of `color`'s king, or `None` if it has no king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        Square::all().find(|&sq| self.piece_at(sq) == Some(king))
    }

    /// Validate the structural integrity of the board.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let king = Piece::new(PieceKind::King, color);
            let count = Square::all().filter(|&sq| self.piece_at(sq) == Some(king)).count();
            if count > 1 {
                return Err(BoardError::TooManyKings {
                    color: color.name(),
                    count,
                });
            }
        }

        let back_rank_pawn = Square::all().any(|sq| {
            (sq.row() == 0 || sq.row() == 7)
                && self.piece_at(sq).is_some_and(|p| p.kind() == PieceKind::Pawn)
        });
        if back_rank_pawn {
            return Err(BoardError::PawnsOnBackRank);
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self.placement())
    }
}
