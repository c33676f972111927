//! The two sides of a chess game.

use std::fmt;
use std::ops::Not;

/// A player: White or Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step. White moves toward row 0 (rank 8).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of a game.
    #[inline]
    pub const fn back_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row holding this side's pawns at the start of a game.
    #[inline]
    pub const fn pawn_row(self) -> i8 {
        self.back_row() + self.forward()
    }

    /// Farthest row for this side's pawns, where they promote.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        self.flip().back_row()
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn flip_roundtrip() {
        assert_eq!(Color::White.flip(), Color::Black);
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(Color::White.flip().flip(), Color::White);
    }

    #[test]
    fn rows() {
        assert_eq!(Color::White.back_row(), 7);
        assert_eq!(Color::White.pawn_row(), 6);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.back_row(), 0);
        assert_eq!(Color::Black.pawn_row(), 1);
        assert_eq!(Color::Black.promotion_row(), 7);
    }

    #[test]
    fn display_and_name() {
        assert_eq!(format!("{}", Color::White), "w");
        assert_eq!(format!("{}", Color::Black), "b");
        assert_eq!(Color::Black.name(), "Black");
    }
}
