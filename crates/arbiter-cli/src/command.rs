//! Player command parsing.
//!
//! A move is two square names separated by whitespace, optionally followed
//! by a promotion letter (`N`, `B`, `R`, `Q`) and/or `draw?` to offer a draw
//! along with the move:
//!
//! - `e2 e4`
//! - `e7 e8 N`
//! - `e2 e4 draw?`
//!
//! `draw` accepts a pending draw offer and `resign` gives up.

use arbiter_core::{Command, Move, MoveRequest, PromotionPiece, Square};

use crate::error::CliError;

/// Token that turns a move into a move plus draw offer.
const DRAW_OFFER: &str = "draw?";

/// Parse a single line of player input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, CliError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["draw"] => Ok(Command::AcceptDraw),
        ["resign"] => Ok(Command::Resign),
        [from, to, suffixes @ ..] if suffixes.len() <= 2 => parse_move(from, to, suffixes),
        _ => Err(CliError::InvalidCommand {
            line: line.trim().to_string(),
        }),
    }
}

fn parse_square(text: &str) -> Result<Square, CliError> {
    Square::from_algebraic(text).ok_or_else(|| CliError::InvalidSquare {
        square: text.to_string(),
    })
}

fn parse_move(from: &str, to: &str, suffixes: &[&str]) -> Result<Command, CliError> {
    let mut mv = Move::new(parse_square(from)?, parse_square(to)?);
    let mut offer_draw = false;

    for (i, &suffix) in suffixes.iter().enumerate() {
        if suffix == DRAW_OFFER && !offer_draw {
            offer_draw = true;
        } else if i == 0
            && let Some(promotion) = PromotionPiece::from_symbol(suffix)
        {
            mv.promotion = Some(promotion);
        } else {
            return Err(CliError::InvalidSuffix {
                suffix: suffix.to_string(),
            });
        }
    }

    let request = MoveRequest {
        mv,
        offer_draw,
    };
    Ok(Command::Move(request))
}
