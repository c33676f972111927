//! FEN setup and export for [`Game`], plus piece placement for [`Board`].
//!
//! FEN castling and en passant fields have no direct counterpart here. They
//! are mapped onto the moved-piece flags and the double-step marker of a
//! [`MoveHistory`]: a side without castling rights has its king marked as
//! moved, a missing right marks its corner rook as moved, and an en passant
//! target marks the pawn that just stepped past it.

use std::fmt::Write;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;
use crate::error::FenError;
use crate::game::Game;
use crate::history::MoveHistory;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling letters with the color and rook column they refer to.
const CASTLING_FLAGS: [(char, Color, i8); 4] = [
    ('K', Color::White, 7),
    ('Q', Color::White, 0),
    ('k', Color::Black, 7),
    ('q', Color::Black, 0),
];

impl Board {
    /// Parse the piece placement field of a FEN string.
    ///
    /// # Errors
    ///
    /// Returns a [`FenError`] for a malformed field or a board that fails
    /// [`Board::validate`].
    pub fn from_placement(placement: &str) -> Result<Board, FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::WrongRankCount { found: rows.len() });
        }

        let mut board = Board::empty();
        for (rank_index, row_str) in rows.iter().enumerate() {
            let mut col: usize = 0;
            for c in row_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    col += digit as usize;
                    continue;
                }

                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                if col >= 8 {
                    return Err(FenError::BadRankLength {
                        rank_index,
                        length: col + 1,
                    });
                }
                board.place(Square::at(rank_index as i8, col as i8), piece);
                col += 1;
            }

            if col != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: col,
                });
            }
        }

        board.validate()?;
        Ok(board)
    }

    /// Return the piece placement field of a FEN string, rank 8 first.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in 0..Square::SIDE {
            let mut empty = 0;
            for col in 0..Square::SIDE {
                match self.piece_at(Square::at(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if row < Square::SIDE - 1 {
                out.push('/');
            }
        }
        out
    }
}

/// Mark everything FEN implies has already moved.
fn moved_from_fen(board: &Board, castling: &str) -> Result<Bitboard, FenError> {
    let mut rights = [false; 4];
    if castling != "-" {
        for c in castling.chars() {
            let slot = CASTLING_FLAGS
                .iter()
                .position(|&(flag, _, _)| flag == c)
                .ok_or(FenError::InvalidCastlingChar { character: c })?;
            rights[slot] = true;
        }
    }

    let mut moved = Bitboard::EMPTY;
    for (sq, piece) in Color::ALL.into_iter().flat_map(|color| board.pieces(color)) {
        if piece.kind() == PieceKind::Pawn && sq.row() != piece.color().pawn_row() {
            moved.insert(sq);
        }
    }

    for (slot, &(_, color, rook_col)) in CASTLING_FLAGS.iter().enumerate() {
        if rights[slot] {
            continue;
        }
        let corner = Square::at(color.back_row(), rook_col);
        if board.piece_at(corner) == Some(Piece::new(PieceKind::Rook, color)) {
            moved.insert(corner);
        }
    }

    for color in Color::ALL {
        let any_right = CASTLING_FLAGS
            .iter()
            .zip(rights)
            .any(|(&(_, c, _), has)| c == color && has);
        if !any_right && let Some(king) = board.king_square(color) {
            moved.insert(king);
        }
    }

    Ok(moved)
}

/// Resolve an en passant target into the square of the pawn that just double-stepped.
fn double_step_from_fen(board: &Board, field: &str, to_move: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || FenError::InvalidEnPassant {
        found: field.to_string(),
    };
    let target = Square::from_algebraic(field).ok_or_else(invalid)?;
    let pawn_owner = to_move.flip();
    let pawn = target.offset(pawn_owner.forward(), 0).ok_or_else(invalid)?;
    if !board.is_empty(target) || board.piece_at(pawn) != Some(Piece::new(PieceKind::Pawn, pawn_owner)) {
        return Err(invalid());
    }
    Ok(Some(pawn))
}

impl Game {
    /// Set up a game from a FEN string.
    ///
    /// Both the 6-field form and the 4-field form without move counters are
    /// accepted. The halfmove clock is checked but not kept.
    ///
    /// # Errors
    ///
    /// Returns a [`FenError`] describing the first malformed field.
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let board = Board::from_placement(fields[0])?;

        let to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let moved = moved_from_fen(&board, fields[2])?;
        let double_step = double_step_from_fen(&board, fields[3], to_move)?;

        let mut fullmove_number = 1;
        if fields.len() == 6 {
            fields[4].parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
                field: "halfmove clock",
                found: fields[4].to_string(),
            })?;
            fullmove_number = fields[5]
                .parse::<u16>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| FenError::InvalidMoveCounter {
                    field: "fullmove number",
                    found: fields[5].to_string(),
                })?;
        }

        Ok(Game::from_parts(
            board,
            MoveHistory::with_state(moved, double_step),
            to_move,
            fullmove_number,
        ))
    }

    /// Export the position as a 6-field FEN string.
    ///
    /// Castling rights are reconstructed from the moved-piece flags and the
    /// halfmove clock is always written as 0.
    pub fn to_fen(&self) -> String {
        let board = self.board();
        let history = self.history();
        let to_move = self.turn();

        let mut fen = board.placement();
        let _ = write!(fen, " {to_move} ");

        let mut any = false;
        for &(flag, color, rook_col) in &CASTLING_FLAGS {
            let king_home = board
                .king_square(color)
                .is_some_and(|king| king.row() == color.back_row() && !history.has_moved(king));
            let corner = Square::at(color.back_row(), rook_col);
            let rook_home = board.piece_at(corner) == Some(Piece::new(PieceKind::Rook, color))
                && !history.has_moved(corner);
            if king_home && rook_home {
                fen.push(flag);
                any = true;
            }
        }
        if !any {
            fen.push('-');
        }

        let target = history.double_step().and_then(|pawn| {
            let owner = board.piece_at(pawn)?.color();
            pawn.offset(-owner.forward(), 0)
        });
        match target {
            Some(sq) => {
                let _ = write!(fen, " {sq}");
            }
            None => fen.push_str(" -"),
        }

        let _ = write!(fen, " 0 {}", self.fullmove_number());
        fen
    }
}

impl FromStr for Game {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Game, FenError> {
        Game::from_fen(fen)
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::board::Board;
    use crate::color::Color;
    use crate::error::{BoardError, FenError};
    use crate::game::{Game, GameStatus};
    use crate::square::Square;

    fn roundtrip(fen: &str) {
        let game: Game = fen.parse().unwrap();
        assert_eq!(game.to_fen(), fen, "FEN roundtrip failed");
    }

    #[test]
    fn roundtrip_starting() {
        roundtrip(STARTING_FEN);
    }

    #[test]
    fn roundtrip_kiwipete() {
        roundtrip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn roundtrip_endgame() {
        roundtrip("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    }

    #[test]
    fn roundtrip_en_passant_target() {
        roundtrip("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn starting_position_matches_fen() {
        let game: Game = STARTING_FEN.parse().unwrap();
        assert_eq!(*game.board(), Board::starting_position());
        assert_eq!(game, Game::new());
    }

    #[test]
    fn four_field_form() {
        let game = Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap();
        assert_eq!(game.fullmove_number(), 1);
        assert_eq!(game.to_fen(), STARTING_FEN);
    }

    #[test]
    fn missing_rights_mark_pieces_moved() {
        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let history = game.history();
        assert!(!history.has_moved(Square::E1));
        assert!(!history.has_moved(Square::H1));
        assert!(history.has_moved(Square::A1));
        assert!(!history.has_moved(Square::E8));
        assert!(!history.has_moved(Square::A8));
        assert!(history.has_moved(Square::H8));
    }

    #[test]
    fn no_rights_mark_king_moved() {
        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(game.history().has_moved(Square::E1));
        assert!(game.history().has_moved(Square::E8));
        assert!(
            game.legal_moves()
                .iter()
                .filter(|mv| mv.from == Square::E1)
                .all(|mv| mv.to != Square::G1 && mv.to != Square::C1)
        );
    }

    #[test]
    fn advanced_pawn_cannot_double_step() {
        let game = Game::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert!(game.history().has_moved(Square::E3));
        assert!(game.legal_moves().iter().all(|mv| mv.to != Square::E5));
    }

    #[test]
    fn en_passant_marks_double_stepped_pawn() {
        let game = Game::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        assert_eq!(game.history().double_step(), Some(Square::D5));
        assert!(game.legal_moves().iter().any(|mv| mv.from == Square::E5 && mv.to == Square::D6));
    }

    #[test]
    fn mated_position_is_terminal() {
        let game = Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(game.status(), GameStatus::Won(Color::Black));
        assert!(game.in_check());
    }

    #[test]
    fn error_wrong_field_count() {
        assert_eq!(
            "e4 e5".parse::<Game>(),
            Err(FenError::WrongFieldCount { found: 2 })
        );
    }

    #[test]
    fn error_wrong_rank_count() {
        assert!(matches!(
            Game::from_fen("8/8/8 w - - 0 1"),
            Err(FenError::WrongRankCount { found: 3 })
        ));
    }

    #[test]
    fn error_bad_rank_length() {
        assert!(matches!(
            Game::from_fen("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPieceChar { character: '9' })
        ));
        assert!(matches!(
            Game::from_fen("ppppppppp/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::BadRankLength { rank_index: 0, .. })
        ));
    }

    #[test]
    fn error_invalid_piece_and_color() {
        assert!(matches!(
            Game::from_fen("rnbqkbnx/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPieceChar { character: 'x' })
        ));
        assert!(matches!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::InvalidColor { .. })
        ));
    }

    #[test]
    fn error_invalid_castling_and_en_passant() {
        assert!(matches!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KX - 0 1"),
            Err(FenError::InvalidCastlingChar { character: 'X' })
        ));
        assert!(matches!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn error_invalid_move_counters() {
        assert!(matches!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1"),
            Err(FenError::InvalidMoveCounter { field: "halfmove clock", .. })
        ));
        assert!(matches!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0"),
            Err(FenError::InvalidMoveCounter { field: "fullmove number", .. })
        ));
    }

    #[test]
    fn error_invalid_board() {
        assert_eq!(
            Game::from_fen("kk6/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidBoard {
                source: BoardError::TooManyKings {
                    color: "Black",
                    count: 2
                }
            })
        );
        assert!(matches!(
            Game::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn placement_of_empty_board() {
        assert_eq!(Board::empty().placement(), "8/8/8/8/8/8/8/8");
    }
}
