//! Board coordinates: a (row, column) pair with bounds validation.

use std::fmt;

use crate::bitboard::Bitboard;

/// A square on the chess board, stored as `row * 8 + col`.
///
/// Row 0 is rank 8 and column 0 is file a, so A8 = 0, H8 = 7, ..., H1 = 63.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Number of rows (and columns) on the board.
    pub const SIDE: i8 = 8;

    /// Create a square from a row and column, returning `None` if either is off the board.
    #[inline]
    pub const fn new(row: i8, col: i8) -> Option<Square> {
        if row >= 0 && row < Self::SIDE && col >= 0 && col < Self::SIDE {
            Some(Square((row * Self::SIDE + col) as u8))
        } else {
            None
        }
    }

    /// Create a square from a row and column that are known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..8`. Callers pass coordinates
    /// that were already bounded, so this is a programming error.
    #[inline]
    pub fn at(row: i8, col: i8) -> Square {
        match Square::new(row, col) {
            Some(sq) => sq,
            None => panic!("square ({row}, {col}) is off the board"),
        }
    }

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Create a square from a zero-based index without bounds checking.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `index < 64`.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Parse an algebraic square such as `"e4"`: file `a` is column 0, rank `r` is row `8 - r`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let file_byte = bytes[0];
        let rank_byte = bytes[1];

        if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
            return None;
        }

        let col = (file_byte - b'a') as i8;
        let row = Self::SIDE - (rank_byte - b'0') as i8;
        Square::new(row, col)
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the row (0 = rank 8, 7 = rank 1).
    #[inline]
    pub const fn row(self) -> i8 {
        (self.0 / 8) as i8
    }

    /// Return the column (0 = file a, 7 = file h).
    #[inline]
    pub const fn col(self) -> i8 {
        (self.0 % 8) as i8
    }

    /// Return the square displaced by `(d_row, d_col)`, or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        Square::new(self.row() + d_row, self.col() + d_col)
    }

    /// Return `true` for light squares (even row + column). Only used for rendering.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }

    /// Return a bitboard with only this square set.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(1u64 << self.0)
    }

    /// Iterate over all 64 squares in row-major order (A8, B8, ..., H1).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A7: Square = Square(8);
    pub const B7: Square = Square(9);
    pub const C7: Square = Square(10);
    pub const D7: Square = Square(11);
    pub const E7: Square = Square(12);
    pub const F7: Square = Square(13);
    pub const G7: Square = Square(14);
    pub const H7: Square = Square(15);
    pub const A6: Square = Square(16);
    pub const B6: Square = Square(17);
    pub const C6: Square = Square(18);
    pub const D6: Square = Square(19);
    pub const E6: Square = Square(20);
    pub const F6: Square = Square(21);
    pub const G6: Square = Square(22);
    pub const H6: Square = Square(23);
    pub const A5: Square = Square(24);
    pub const B5: Square = Square(25);
    pub const C5: Square = Square(26);
    pub const D5: Square = Square(27);
    pub const E5: Square = Square(28);
    pub const F5: Square = Square(29);
    pub const G5: Square = Square(30);
    pub const H5: Square = Square(31);
    pub const A4: Square = Square(32);
    pub const B4: Square = Square(33);
    pub const C4: Square = Square(34);
    pub const D4: Square = Square(35);
    pub const E4: Square = Square(36);
    pub const F4: Square = Square(37);
    pub const G4: Square = Square(38);
    pub const H4: Square = Square(39);
    pub const A3: Square = Square(40);
    pub const B3: Square = Square(41);
    pub const C3: Square = Square(42);
    pub const D3: Square = Square(43);
    pub const E3: Square = Square(44);
    pub const F3: Square = Square(45);
    pub const G3: Square = Square(46);
    pub const H3: Square = Square(47);
    pub const A2: Square = Square(48);
    pub const B2: Square = Square(49);
    pub const C2: Square = Square(50);
    pub const D2: Square = Square(51);
    pub const E2: Square = Square(52);
    pub const F2: Square = Square(53);
    pub const G2: Square = Square(54);
    pub const H2: Square = Square(55);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col() as u8) as char;
        write!(f, "{file}{}", Self::SIDE - self.row())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::Square;

    #[test]
    fn new_and_accessors() {
        let sq = Square::new(0, 0).unwrap();
        assert_eq!(sq, Square::A8);
        assert_eq!(sq.row(), 0);
        assert_eq!(sq.col(), 0);
        assert_eq!(Square::at(7, 4), Square::E1);
        assert_eq!(Square::E1.index(), 60);
    }

    #[test]
    fn out_of_bounds_is_none() {
        assert!(Square::new(-1, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert!(Square::new(8, 8).is_none());
        assert!(Square::from_index(64).is_none());
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn at_panics_off_board() {
        let _ = Square::at(8, 0);
    }

    #[test]
    fn row_col_roundtrip() {
        for sq in Square::all() {
            assert_eq!(Square::new(sq.row(), sq.col()), Some(sq));
        }
    }

    #[test]
    fn algebraic_notation() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::E4));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("e2").map(|s| (s.row(), s.col())), Some((6, 4)));
        assert_eq!(format!("{}", Square::E4), "e4");
        assert_eq!(format!("{}", Square::A1), "a1");
    }

    #[test]
    fn algebraic_invalid() {
        assert!(Square::from_algebraic("i1").is_none());
        assert!(Square::from_algebraic("a9").is_none());
        assert!(Square::from_algebraic("a0").is_none());
        assert!(Square::from_algebraic("").is_none());
        assert!(Square::from_algebraic("a1b").is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::E2.offset(-2, 0), Some(Square::E4));
        assert_eq!(Square::H1.offset(0, 1), None);
        assert_eq!(Square::A8.offset(-1, 0), None);
    }

    #[test]
    fn light_and_dark() {
        assert!(Square::A8.is_light());
        assert!(!Square::B8.is_light());
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
    }

    #[test]
    fn debug_shows_algebraic() {
        assert_eq!(format!("{:?}", Square::E4), "Square(e4)");
    }
}
