//! Error types for move validation, game commands, and position setup.

use crate::square::Square;

/// Why a requested move was refused. The game state is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// No piece stands on the source square.
    #[error("illegal move: no piece on {from}")]
    EmptySource {
        /// The requested source square.
        from: Square,
    },
    /// The piece on the source square belongs to the other player.
    #[error("illegal move: the piece on {from} belongs to the opponent")]
    NotYourPiece {
        /// The requested source square.
        from: Square,
    },
    /// The piece cannot reach the destination.
    #[error("illegal move: {from} cannot move to {to}")]
    Unreachable {
        /// The requested source square.
        from: Square,
        /// The requested destination square.
        to: Square,
    },
    /// The move would leave the mover's own king attacked.
    #[error("illegal move: {from} to {to} leaves the king in check")]
    LeavesKingInCheck {
        /// The requested source square.
        from: Square,
        /// The requested destination square.
        to: Square,
    },
}

/// Errors returned by [`Game::apply`](crate::game::Game::apply).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The move was rejected.
    #[error(transparent)]
    Illegal(#[from] MoveError),
    /// The game already reached a result.
    #[error("the game is over")]
    GameOver,
}

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The FEN string does not have 4 or 6 space-separated fields.
    #[error("expected 4 or 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling rights field.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// The en passant field is not "-" or a square behind an opponent pawn.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter is not a valid number.
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The parsed board fails structural validation.
    #[error("invalid board: {source}")]
    InvalidBoard {
        /// The underlying board validation error.
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side has more than one king.
    #[error("expected at most 1 king for {color}, found {count}")]
    TooManyKings {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
}
