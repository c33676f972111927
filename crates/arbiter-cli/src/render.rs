//! Text rendering of a board as an 8x8 grid.

use std::fmt;

use arbiter_core::{Board, Square};

/// File labels printed under the grid.
const FILE_LABELS: &str = " a  b  c  d  e  f  g  h";

/// Wrapper for printing a board as the grid players see.
///
/// Rank 8 is printed first. Each cell is two characters: `##` for an empty
/// dark square, two spaces for an empty light square, otherwise the owner
/// prefix and piece letter (`wK`, `bp`).
pub struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..Square::SIDE {
            for col in 0..Square::SIDE {
                let sq = Square::at(row, col);
                match self.0.piece_at(sq) {
                    Some(piece) => write!(f, "{piece} ")?,
                    None if sq.is_light() => write!(f, "   ")?,
                    None => write!(f, "## ")?,
                }
            }
            writeln!(f, "{}", Square::SIDE - row)?;
        }
        write!(f, "{FILE_LABELS}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position() {
        let board = Board::starting_position();
        let expected = "\
bR bN bB bQ bK bB bN bR 8
bp bp bp bp bp bp bp bp 7
   ##    ##    ##    ## 6
##    ##    ##    ##    5
   ##    ##    ##    ## 4
##    ##    ##    ##    3
wp wp wp wp wp wp wp wp 2
wR wN wB wQ wK wB wN wR 1
 a  b  c  d  e  f  g  h";
        assert_eq!(BoardView(&board).to_string(), expected);
    }

    #[test]
    fn empty_board_shading() {
        let output = BoardView(&Board::empty()).to_string();
        let first = output.lines().next().unwrap();
        assert_eq!(first, "   ##    ##    ##    ## 8");
        assert_eq!(output.lines().count(), 9);
    }
}
