//! The turn state machine: whose move it is, check, draw offers, and results.

use tracing::{debug, info};

use crate::board::Board;
use crate::chess_move::{Move, MoveRequest};
use crate::color::Color;
use crate::error::GameError;
use crate::history::MoveHistory;
use crate::legality::{MoveOutcome, attempt_move, has_legal_move, legal_moves};
use crate::movegen::in_check;

/// A command from the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a move, optionally offering a draw.
    Move(MoveRequest),
    /// Accept the draw the opponent offered with their last move.
    AcceptDraw,
    /// Give up; the opponent wins.
    Resign,
}

/// Current state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing {
        to_move: Color,
        /// `to_move`'s king is attacked.
        in_check: bool,
        /// The previous move came with a draw offer.
        draw_offered: bool,
    },
    Won(Color),
    DrawnByAgreement,
    /// Stalemate: the side to move is not in check and has no legal move.
    DrawnByNoMoves,
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate { winner: Color },
    Resignation { winner: Color },
    Stalemate,
    DrawAgreed,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Won(Color),
    Drawn,
}

impl Termination {
    /// Return the result this termination produces.
    pub const fn result(self) -> GameResult {
        match self {
            Termination::Checkmate { winner } | Termination::Resignation { winner } => {
                GameResult::Won(winner)
            }
            Termination::Stalemate | Termination::DrawAgreed => GameResult::Drawn,
        }
    }
}

/// Reply to an accepted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The move was played and the game goes on.
    Moved(MoveOutcome),
    /// A draw was accepted but none had been offered. Nothing changed.
    NoDrawOffer,
    /// The command ended the game. `outcome` is set when a move ended it.
    Finished {
        outcome: Option<MoveOutcome>,
        termination: Termination,
    },
}

/// A game in progress: board, history, and turn state, owned together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    history: MoveHistory,
    to_move: Color,
    in_check: bool,
    draw_offered: bool,
    termination: Option<Termination>,
    fullmove_number: u16,
}

impl Game {
    /// Start a game from the standard initial position, White to move.
    pub fn new() -> Game {
        Game::from_parts(Board::starting_position(), MoveHistory::new(), Color::White, 1)
    }

    /// Assemble a game from a set-up position and evaluate it for the side to move.
    pub(crate) fn from_parts(
        board: Board,
        history: MoveHistory,
        to_move: Color,
        fullmove_number: u16,
    ) -> Game {
        let mut game = Game {
            in_check: in_check(&board, to_move),
            board,
            history,
            to_move,
            draw_offered: false,
            termination: None,
            fullmove_number,
        };
        game.termination = game.evaluate_turn();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Return the side to move, or `None` once the game is over.
    pub fn side_to_move(&self) -> Option<Color> {
        self.termination.is_none().then_some(self.to_move)
    }

    /// The side whose turn it is or was when the game ended.
    pub(crate) fn turn(&self) -> Color {
        self.to_move
    }

    /// Return `true` if the side to move (or the mated side) is in check.
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Return `true` if the previous move offered a draw.
    pub fn draw_offer_pending(&self) -> bool {
        self.draw_offered
    }

    /// Starts at 1 and increments after each Black move.
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn status(&self) -> GameStatus {
        match self.termination {
            None => GameStatus::Playing {
                to_move: self.to_move,
                in_check: self.in_check,
                draw_offered: self.draw_offered,
            },
            Some(Termination::Checkmate { winner } | Termination::Resignation { winner }) => {
                GameStatus::Won(winner)
            }
            Some(Termination::DrawAgreed) => GameStatus::DrawnByAgreement,
            Some(Termination::Stalemate) => GameStatus::DrawnByNoMoves,
        }
    }

    /// Return how the game ended, if it has.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Return the final result, if the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.termination.map(Termination::result)
    }

    /// Every legal move for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.termination.is_some() {
            return Vec::new();
        }
        legal_moves(&self.board, &self.history, self.to_move)
    }

    /// Process one command from the side to move.
    ///
    /// # Errors
    ///
    /// [`GameError::Illegal`] if a move is rejected, and [`GameError::GameOver`]
    /// once the game has ended. Board, history, and turn are unchanged in both
    /// cases; a rejected move still uses up a pending draw offer.
    pub fn apply(&mut self, command: Command) -> Result<Response, GameError> {
        if self.termination.is_some() {
            return Err(GameError::GameOver);
        }

        match command {
            Command::Move(request) => self.play(request),
            Command::AcceptDraw if self.draw_offered => Ok(self.finish(None, Termination::DrawAgreed)),
            Command::AcceptDraw => {
                debug!(player = self.to_move.name(), "draw accepted but none offered");
                Ok(Response::NoDrawOffer)
            }
            Command::Resign => {
                let winner = self.to_move.flip();
                Ok(self.finish(None, Termination::Resignation { winner }))
            }
        }
    }

    fn play(&mut self, request: MoveRequest) -> Result<Response, GameError> {
        let mover = self.to_move;
        let outcome = match attempt_move(&mut self.board, &mut self.history, mover, request.mv) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(player = mover.name(), %err, "move rejected");
                // A pending offer only covers the command right after it.
                self.draw_offered = false;
                return Err(err.into());
            }
        };

        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.to_move = mover.flip();
        self.in_check = outcome.gives_check;
        self.draw_offered = request.offer_draw;

        match self.evaluate_turn() {
            Some(termination) => Ok(self.finish(Some(outcome), termination)),
            None => Ok(Response::Moved(outcome)),
        }
    }

    /// End-of-turn check for the side about to move.
    fn evaluate_turn(&self) -> Option<Termination> {
        if has_legal_move(&self.board, &self.history, self.to_move) {
            return None;
        }
        if self.in_check {
            Some(Termination::Checkmate {
                winner: self.to_move.flip(),
            })
        } else {
            Some(Termination::Stalemate)
        }
    }

    fn finish(&mut self, outcome: Option<MoveOutcome>, termination: Termination) -> Response {
        info!(?termination, "game over");
        self.termination = Some(termination);
        self.draw_offered = false;
        Response::Finished {
            outcome,
            termination,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
