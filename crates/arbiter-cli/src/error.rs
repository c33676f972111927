//! Command session errors.

use arbiter_core::FenError;

/// Errors that can occur while reading and interpreting player input.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The line is not a move, `draw`, or `resign`.
    #[error("unrecognized command: \"{line}\"")]
    InvalidCommand {
        /// The offending input line.
        line: String,
    },

    /// A square name could not be parsed.
    #[error("invalid square: \"{square}\"")]
    InvalidSquare {
        /// The square text that failed to parse.
        square: String,
    },

    /// The third token of a move is neither a promotion letter nor `draw?`.
    #[error("invalid move suffix: \"{suffix}\"")]
    InvalidSuffix {
        /// The unrecognized suffix.
        suffix: String,
    },

    /// The configured starting position could not be set up.
    #[error("invalid starting position: {source}")]
    InvalidFen {
        /// The underlying FEN error.
        #[from]
        source: FenError,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
