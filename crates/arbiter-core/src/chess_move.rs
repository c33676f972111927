//! Move values exchanged with the command layer.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

/// How a move was carried out on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A plain move or capture.
    Normal,
    /// A pawn reached its farthest row and was replaced.
    Promotion,
    /// A pawn captured a double-stepped pawn beside it.
    EnPassant,
    /// The king moved two columns and the rook jumped beside it.
    Castling,
}

/// The piece a pawn promotes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotionPiece {
    /// All promotion pieces.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Knight,
        PromotionPiece::Bishop,
        PromotionPiece::Rook,
        PromotionPiece::Queen,
    ];

    /// Convert to the corresponding [`PieceKind`].
    pub const fn to_piece_kind(self) -> PieceKind {
        match self {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }

    /// Parse the board symbol of a promotion piece (`N`, `B`, `R`, `Q`).
    pub fn from_symbol(s: &str) -> Option<PromotionPiece> {
        match s {
            "N" => Some(PromotionPiece::Knight),
            "B" => Some(PromotionPiece::Bishop),
            "R" => Some(PromotionPiece::Rook),
            "Q" => Some(PromotionPiece::Queen),
            _ => None,
        }
    }
}

/// A move from one square to another, with an optional promotion choice.
///
/// Without a promotion choice a pawn reaching its farthest row becomes a queen.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionPiece>,
}

impl Move {
    /// Create a move with no promotion choice.
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Create a move that promotes to `piece` if it is a pawn reaching its farthest row.
    pub const fn with_promotion(from: Square, to: Square, piece: PromotionPiece) -> Move {
        Move {
            from,
            to,
            promotion: Some(piece),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_piece_kind().fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

/// A structured move command: the move itself plus a draw offer to the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub mv: Move,
    /// The mover offers a draw, which the opponent may accept on their next command.
    pub offer_draw: bool,
}

impl MoveRequest {
    /// A move request without a draw offer.
    pub const fn new(mv: Move) -> MoveRequest {
        MoveRequest {
            mv,
            offer_draw: false,
        }
    }

    /// A move request that also offers a draw.
    pub const fn offering_draw(mv: Move) -> MoveRequest {
        MoveRequest {
            mv,
            offer_draw: true,
        }
    }
}

impl From<Move> for MoveRequest {
    fn from(mv: Move) -> Self {
        MoveRequest::new(mv)
    }
}
