//! The engine puts all pieces together behind a small line-oriented text
//! protocol, in the manner of a UCI engine. It is used for manual play and
//! end-to-end tests of the binary.
//!
//! [`Engine::run`] is the "main loop" of the engine which reads commands from
//! the input stream and writes responses to the output stream. The engine owns
//! a [`Sandbox`] table: queries (`moves`, `next`, `forward`, `fingerprint`)
//! look at its board and `play` plays a full turn on it.

use std::io::{BufRead, Write};

use anyhow::Context;
use itertools::Itertools;
use log::{debug, info};

use crate::checkers::board::Board;
use crate::checkers::classify::MarkerSet;
use crate::checkers::core::{Move, Square};
use crate::engine::protocol::Command;
use crate::source::Sandbox;
use crate::turn::{play_turn, Policy};

mod protocol;

/// Connects the rules engine to the text protocol and handles I/O.
pub struct Engine<'a, R: BufRead, W: Write> {
    table: Sandbox,
    markers: MarkerSet,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with the starting board and
    /// provided I/O. `markers` are used to classify the `squares` command.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W, markers: MarkerSet) -> Self {
        Self {
            table: Sandbox::default(),
            markers,
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes commands until `quit`
    /// is sent or the input is closed.
    ///
    /// A command that can not be parsed or executed is answered with an
    /// `info string` line and skipped, the loop carries on.
    ///
    /// # Errors
    ///
    /// Only I/O errors stop the loop.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("reading from input")?;
            if read == 0 {
                break;
            }
            let command = Command::parse(&line);
            debug!("received {command:?}");
            if command == Command::Quit {
                break;
            }
            if let Err(e) = self.handle(command) {
                writeln!(self.output, "info string {e:#}")?;
            }
            self.output.flush()?;
        }
        info!("shutting down");
        Ok(())
    }

    fn handle(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::SetPosition { notation } => self.handle_position(notation.as_deref()),
            Command::SetSquares { markers } => self.handle_squares(&markers),
            Command::Moves => self.handle_moves(),
            Command::Next { landing } => self.handle_next(&landing),
            Command::Forward => {
                writeln!(self.output, "forward {}", self.board().forward_direction())?;
                Ok(())
            },
            Command::Fingerprint => {
                writeln!(self.output, "fingerprint {}", self.board().fingerprint())?;
                Ok(())
            },
            Command::Play { policy } => self.handle_play(policy),
            Command::Restart => {
                self.table.restart();
                Ok(())
            },
            Command::Display => {
                writeln!(self.output, "{:?}", self.board())?;
                Ok(())
            },
            Command::Quit => Ok(()),
            Command::Unknown(command) => {
                anyhow::bail!("unsupported command: '{command}'")
            },
        }
    }

    fn board(&self) -> Board {
        self.table.board()
    }

    /// Replaces the board on the table.
    fn handle_position(&mut self, notation: Option<&str>) -> anyhow::Result<()> {
        let board = match notation {
            None => Board::starting(),
            Some(notation) => Board::from_notation(notation)?,
        };
        self.table = Sandbox::new(board);
        Ok(())
    }

    /// Replaces the board with the one built out of rendered markers.
    fn handle_squares(&mut self, markers: &[String]) -> anyhow::Result<()> {
        let board = Board::from_markers(markers.iter().map(String::as_str), &self.markers)?;
        self.table = Sandbox::new(board);
        Ok(())
    }

    fn handle_moves(&mut self) -> anyhow::Result<()> {
        let moves = self.board().generate_moves();
        writeln!(self.output, "moves {}", format_moves(&moves))?;
        Ok(())
    }

    fn handle_next(&mut self, landing: &str) -> anyhow::Result<()> {
        let landing = Square::try_from(landing)?;
        match self.board().next_capture_from(landing) {
            Some(next_move) => writeln!(self.output, "next {next_move}")?,
            None => writeln!(self.output, "next none")?,
        }
        Ok(())
    }

    /// Plays a full turn of the active side on the table.
    fn handle_play(&mut self, policy: Policy) -> anyhow::Result<()> {
        let played = play_turn(&mut self.table.clone(), &mut self.table, policy)?;
        writeln!(self.output, "played {}", format_moves(&played))?;
        Ok(())
    }
}

fn format_moves(moves: &[Move]) -> String {
    if moves.is_empty() {
        "none".to_owned()
    } else {
        moves.iter().join(" ")
    }
}
