//! Chess rules: board representation, move generation, legality, and game flow.

mod bitboard;
mod board;
mod chess_move;
mod color;
mod error;
mod fen;
mod game;
mod history;
mod legality;
pub mod movegen;
pub mod perft;
mod piece;
mod piece_kind;
mod square;

pub use bitboard::Bitboard;
pub use board::Board;
pub use chess_move::{Move, MoveKind, MoveRequest, PromotionPiece};
pub use color::Color;
pub use error::{BoardError, FenError, GameError, MoveError};
pub use fen::STARTING_FEN;
pub use game::{Command, Game, GameResult, GameStatus, Response, Termination};
pub use history::{MoveHistory, MoveRecord};
pub use legality::{MoveOutcome, attempt_move, has_legal_move, is_legal, legal_moves};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use square::Square;
