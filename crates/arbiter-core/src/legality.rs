//! Legality filtering by simulation: play the move on a copy, keep it only if
//! the mover's king is not left attacked.

use tracing::debug;

use crate::board::Board;
use crate::chess_move::{Move, MoveKind, PromotionPiece};
use crate::color::Color;
use crate::error::MoveError;
use crate::history::MoveHistory;
use crate::movegen::{candidate_moves, castling_rook, in_check};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// What a committed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub kind: MoveKind,
    /// The opponent piece removed from the board, if any.
    pub captured: Option<Piece>,
    /// The opponent's king is now attacked.
    pub gives_check: bool,
}

/// Side effects of playing a move on a board copy, needed to update the history.
struct Played {
    kind: MoveKind,
    captured: Option<Piece>,
    en_passant_victim: Option<Square>,
    rook: Option<(Square, Square)>,
}

/// Play `mv` for `piece` on a copy of `board` without any legality check.
///
/// A pawn moving diagonally onto an empty square captures en passant; a king
/// moving two columns brings its corner rook along; a pawn reaching its
/// farthest row becomes the requested piece, or a queen.
fn play(board: &Board, piece: Piece, mv: Move) -> (Board, Played) {
    let mut next = *board;
    let mut played = Played {
        kind: MoveKind::Normal,
        captured: next.relocate(mv.from, mv.to),
        en_passant_victim: None,
        rook: None,
    };

    match piece.kind() {
        PieceKind::Pawn if played.captured.is_none() && mv.from.col() != mv.to.col() => {
            let victim = Square::at(mv.from.row(), mv.to.col());
            played.captured = next.remove(victim);
            played.en_passant_victim = Some(victim);
            played.kind = MoveKind::EnPassant;
        }
        PieceKind::King => {
            if let Some((rook_from, rook_to)) = castling_rook(mv.from, mv.to) {
                next.relocate(rook_from, rook_to);
                played.rook = Some((rook_from, rook_to));
                played.kind = MoveKind::Castling;
            }
        }
        _ => {}
    }

    if piece.kind() == PieceKind::Pawn && mv.to.row() == piece.color().promotion_row() {
        let promoted = mv.promotion.unwrap_or(PromotionPiece::Queen).to_piece_kind();
        next.place(mv.to, Piece::new(promoted, piece.color()));
        played.kind = MoveKind::Promotion;
    }

    (next, played)
}

/// Validate `mv` for `mover` and apply it to `board` and `history`.
///
/// Either the whole move is applied, or nothing is: on error both `board`
/// and `history` are left exactly as they were.
///
/// # Errors
///
/// Returns a [`MoveError`] if the source square is empty or holds an
/// opponent piece, if the destination is not among the piece's generated
/// moves, or if the move would leave `mover`'s king attacked.
pub fn attempt_move(
    board: &mut Board,
    history: &mut MoveHistory,
    mover: Color,
    mv: Move,
) -> Result<MoveOutcome, MoveError> {
    let piece = board
        .piece_at(mv.from)
        .ok_or(MoveError::EmptySource { from: mv.from })?;
    if piece.color() != mover {
        return Err(MoveError::NotYourPiece { from: mv.from });
    }
    if !candidate_moves(board, history, mv.from).contains(mv.to) {
        return Err(MoveError::Unreachable {
            from: mv.from,
            to: mv.to,
        });
    }

    let (next, played) = play(board, piece, mv);
    if in_check(&next, mover) {
        debug!(%mv, "move rejected: king left in check");
        return Err(MoveError::LeavesKingInCheck {
            from: mv.from,
            to: mv.to,
        });
    }

    *board = next;
    history.record(piece, mv.from, mv.to);
    if let Some((rook_from, rook_to)) = played.rook {
        debug!(%rook_from, %rook_to, "castling rook relocated");
        history.record(Piece::new(PieceKind::Rook, mover), rook_from, rook_to);
    }
    if let Some(victim) = played.en_passant_victim {
        debug!(%victim, "en passant capture");
        history.forget(victim);
    }
    if played.kind == MoveKind::Promotion {
        debug!(square = %mv.to, piece = ?board.piece_at(mv.to), "pawn promoted");
    }

    let double_step = (piece.kind() == PieceKind::Pawn
        && (mv.to.row() - mv.from.row()).abs() == 2)
        .then_some(mv.to);
    history.set_double_step(double_step);

    Ok(MoveOutcome {
        kind: played.kind,
        captured: played.captured,
        gives_check: in_check(board, mover.flip()),
    })
}

/// Return `true` if `mv` is legal for `mover`, without changing anything.
pub fn is_legal(board: &Board, history: &MoveHistory, mover: Color, mv: Move) -> bool {
    match board.piece_at(mv.from) {
        Some(piece) if piece.color() == mover => {
            candidate_moves(board, history, mv.from).contains(mv.to)
                && !in_check(&play(board, piece, mv).0, mover)
        }
        _ => false,
    }
}

/// Every legal move for `color`. A promoting pawn move appears once per promotion piece.
pub fn legal_moves(board: &Board, history: &MoveHistory, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces(color) {
        for to in candidate_moves(board, history, from) {
            let mv = Move::new(from, to);
            if in_check(&play(board, piece, mv).0, color) {
                continue;
            }
            if piece.kind() == PieceKind::Pawn && to.row() == color.promotion_row() {
                moves.extend(
                    PromotionPiece::ALL
                        .into_iter()
                        .map(|promo| Move::with_promotion(from, to, promo)),
                );
            } else {
                moves.push(mv);
            }
        }
    }
    moves
}

/// Return `true` if `color` has at least one legal move.
pub fn has_legal_move(board: &Board, history: &MoveHistory, color: Color) -> bool {
    board.pieces(color).any(|(from, piece)| {
        candidate_moves(board, history, from)
            .any(|to| !in_check(&play(board, piece, Move::new(from, to)).0, color))
    })
}
