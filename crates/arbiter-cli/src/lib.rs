//! Text front end for arbiter: command parsing, board rendering, and the read loop.

pub mod command;
pub mod error;
pub mod render;
pub mod session;

pub use command::parse_command;
pub use error::CliError;
pub use render::BoardView;
pub use session::{Session, SessionConfig};
