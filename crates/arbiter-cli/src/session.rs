//! The interactive read loop: prompt, read a command, apply it, report.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use arbiter_core::{Game, GameError, GameResult, MoveOutcome, Response, Termination};

use crate::command::parse_command;
use crate::error::CliError;
use crate::render::BoardView;

/// Message printed for any rejected or unreadable command.
const REJECTED: &str = "Illegal move, try again";

/// Knobs for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Echo each input line before responding to it.
    pub echo_commands: bool,
    /// Print the board at start-up and after each accepted move.
    pub show_board: bool,
    /// Start from this FEN position instead of the standard one.
    pub starting_fen: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            echo_commands: true,
            show_board: true,
            starting_fen: None,
        }
    }
}

/// One game played over a line-based reader and a writer.
pub struct Session {
    game: Game,
    config: SessionConfig,
}

impl Session {
    /// Create a session, setting up the configured starting position.
    pub fn new(config: SessionConfig) -> Result<Self, CliError> {
        let game = match &config.starting_fen {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };
        Ok(Self { game, config })
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the loop until the game ends or input runs out.
    ///
    /// Returns the result if the game finished.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut out: W) -> Result<Option<GameResult>, CliError> {
        info!("session started");

        if self.config.show_board {
            writeln!(out, "{}", BoardView(self.game.board()))?;
        }

        // A position set up from FEN may already be decided.
        if let Some(termination) = self.game.termination() {
            self.report_end(&mut out, termination)?;
            return Ok(self.game.result());
        }

        self.prompt(&mut out)?;
        for line in reader.lines() {
            let line = line?;
            if self.config.echo_commands {
                writeln!(out, "{line}")?;
            }

            if let Some(termination) = self.handle_line(&mut out, &line)? {
                self.report_end(&mut out, termination)?;
                info!("session finished");
                return Ok(self.game.result());
            }
            self.prompt(&mut out)?;
        }

        info!("input closed before the game ended");
        out.flush()?;
        Ok(None)
    }

    /// Apply one input line, returning the termination if it ended the game.
    fn handle_line<W: Write>(&mut self, out: &mut W, line: &str) -> Result<Option<Termination>, CliError> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                warn!(error = %err, "could not parse command");
                writeln!(out, "\n{REJECTED}")?;
                return Ok(None);
            }
        };

        match self.game.apply(command) {
            Ok(Response::Moved(outcome)) => {
                self.show_move(out, outcome)?;
                Ok(None)
            }
            Ok(Response::NoDrawOffer) => Ok(None),
            Ok(Response::Finished {
                outcome,
                termination,
            }) => {
                if let Some(outcome) = outcome {
                    self.show_move(out, outcome)?;
                }
                Ok(Some(termination))
            }
            Err(GameError::Illegal(_)) => {
                writeln!(out, "\n{REJECTED}")?;
                Ok(None)
            }
            Err(GameError::GameOver) => Ok(self.game.termination()),
        }
    }

    /// Report an accepted move: the check announcement comes before the board.
    fn show_move<W: Write>(&self, out: &mut W, outcome: MoveOutcome) -> Result<(), CliError> {
        if outcome.gives_check {
            writeln!(out, "\nCheck")?;
        }
        if self.config.show_board {
            writeln!(out, "\n{}", BoardView(self.game.board()))?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        if let Some(color) = self.game.side_to_move() {
            write!(out, "\n{}'s move: ", color.name())?;
            out.flush()?;
        }
        Ok(())
    }

    fn report_end<W: Write>(&self, out: &mut W, termination: Termination) -> Result<(), CliError> {
        if matches!(termination, Termination::Checkmate { .. }) {
            writeln!(out, "\nCheckmate")?;
        }
        match termination.result() {
            GameResult::Won(winner) => writeln!(out, "\n{} wins", winner.name())?,
            GameResult::Drawn => writeln!(out, "draw")?,
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use arbiter_core::Color;

    use super::*;

    fn run(input: &str, config: SessionConfig) -> (Option<GameResult>, String) {
        let mut session = Session::new(config).unwrap();
        let mut out = Vec::new();
        let result = session.run(input.as_bytes(), &mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    fn quiet() -> SessionConfig {
        SessionConfig {
            show_board: false,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn fools_mate_transcript() {
        let (result, out) = run("f2 f3\ne7 e5\ng2 g4\nd8 h4\n", quiet());
        assert_eq!(result, Some(GameResult::Won(Color::Black)));
        assert_eq!(
            out,
            "\nWhite's move: f2 f3\n\
             \nBlack's move: e7 e5\n\
             \nWhite's move: g2 g4\n\
             \nBlack's move: d8 h4\n\
             \nCheck\n\
             \nCheckmate\n\
             \nBlack wins\n"
        );
    }

    #[test]
    fn illegal_move_is_reported_and_turn_kept() {
        let (result, out) = run("e2 e5\nnonsense\ne2 e4\n", quiet());
        assert_eq!(result, None);
        assert_eq!(
            out,
            "\nWhite's move: e2 e5\n\
             \nIllegal move, try again\n\
             \nWhite's move: nonsense\n\
             \nIllegal move, try again\n\
             \nWhite's move: e2 e4\n\
             \nBlack's move: "
        );
    }

    #[test]
    fn check_is_announced() {
        let config = SessionConfig {
            starting_fen: Some("4k3/8/8/8/8/8/8/R3K3 w - - 0 1".to_string()),
            ..quiet()
        };
        let (_, out) = run("a1 a8\n", config);
        assert!(out.contains("a1 a8\n\nCheck\n"));
    }

    #[test]
    fn check_is_announced_before_board() {
        let config = SessionConfig {
            starting_fen: Some("4k3/8/8/8/8/8/8/R3K3 w - - 0 1".to_string()),
            ..SessionConfig::default()
        };
        let (_, out) = run("a1 a8\n", config);
        let after_move = out.split("a1 a8\n").nth(1).unwrap();
        assert!(after_move.starts_with("\nCheck\n\nwR ##    ## bK ##    ## 8\n"));
    }

    #[test]
    fn mating_move_announces_check_then_checkmate() {
        let (_, out) = run("f2 f3\ne7 e5\ng2 g4\nd8 h4\n", SessionConfig::default());
        let after_mate = out.split("d8 h4\n").nth(1).unwrap();
        assert!(after_mate.starts_with("\nCheck\n\n"));
        assert!(after_mate.ends_with(" a  b  c  d  e  f  g  h\n\nCheckmate\n\nBlack wins\n"));
    }

    #[test]
    fn draw_by_agreement() {
        let (result, out) = run("e2 e4 draw?\ndraw\n", quiet());
        assert_eq!(result, Some(GameResult::Drawn));
        assert!(out.ends_with("draw\ndraw\n"));
    }

    #[test]
    fn draw_without_offer_keeps_playing() {
        let (result, out) = run("draw\n", quiet());
        assert_eq!(result, None);
        assert_eq!(out, "\nWhite's move: draw\n\nWhite's move: ");
    }

    #[test]
    fn resignation() {
        let (result, out) = run("resign\n", quiet());
        assert_eq!(result, Some(GameResult::Won(Color::Black)));
        assert!(out.ends_with("resign\n\nBlack wins\n"));
    }

    #[test]
    fn board_is_shown_after_accepted_move() {
        let (_, out) = run("e2 e4\n", SessionConfig::default());
        let boards = out.matches(" a  b  c  d  e  f  g  h").count();
        assert_eq!(boards, 2);
        assert!(out.contains("   ##    ## wp ##    ## 4"));
    }

    #[test]
    fn decided_start_position_reports_immediately() {
        let config = SessionConfig {
            starting_fen: Some("k7/1Q6/1K6/8/8/8/8/8 b - - 0 1".to_string()),
            ..quiet()
        };
        let (result, out) = run("a8 b8\n", config);
        assert_eq!(result, Some(GameResult::Won(Color::White)));
        assert_eq!(out, "\nCheckmate\n\nWhite wins\n");
    }

    #[test]
    fn bad_starting_fen_is_an_error() {
        let config = SessionConfig {
            starting_fen: Some("not a fen".to_string()),
            ..SessionConfig::default()
        };
        assert!(matches!(Session::new(config), Err(CliError::InvalidFen { .. })));
    }
}
