//! Line-oriented terminal prompts with validate-and-reprompt loops.

use std::{
    io::{self, BufRead, Write},
    num::NonZeroU32,
};

use gridmaus_core::{Coordinate, Directive, Movement, Velocity};
use gridmaus_system_session::{MovementSource, SourceError};

const DIVIDER_WIDTH: usize = 60;

/// Pairs an input reader with an output writer for interactive play.
#[derive(Debug)]
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes a full line.
    pub(crate) fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prints the per-turn status block shown before each manual move.
    pub(crate) fn show_status(&mut self, position: &Coordinate, velocity: Velocity) -> io::Result<()> {
        writeln!(self.output, "{}", "-".repeat(DIVIDER_WIDTH))?;
        writeln!(self.output, "Coordinates: {position}")?;
        writeln!(self.output, "Current velocity: {velocity}")
    }

    /// Asks until the answer is a whole number greater than zero.
    pub(crate) fn read_positive(&mut self, message: &str) -> io::Result<NonZeroU32> {
        loop {
            let answer = self.ask(message)?;
            match answer.trim().parse::<NonZeroU32>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Please enter a whole number greater than zero.")?,
            }
        }
    }

    /// Asks until the answer names a directive for `axis`.
    pub(crate) fn read_directive(&mut self, axis: usize) -> io::Result<Directive> {
        loop {
            let answer = self.ask(&format!("Movement in dimension {axis}: "))?;
            match answer.parse::<Directive>() {
                Ok(directive) => return Ok(directive),
                Err(error) => self.say(&error.to_string())?,
            }
        }
    }

    fn ask(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line)
    }
}

/// Movement source that asks a human for one directive per axis.
///
/// The velocity is shown by the caller as part of the turn status, so the
/// source itself ignores it.
#[derive(Debug)]
pub(crate) struct HumanSource<'a, R, W> {
    console: &'a mut Console<R, W>,
    dimensions: usize,
}

impl<'a, R, W> HumanSource<'a, R, W> {
    pub(crate) fn new(console: &'a mut Console<R, W>, dimensions: usize) -> Self {
        Self {
            console,
            dimensions,
        }
    }
}

impl<R, W> MovementSource for HumanSource<'_, R, W>
where
    R: BufRead,
    W: Write,
{
    fn next_movement(&mut self, _velocity: Velocity) -> Result<Movement, SourceError> {
        let directives = (0..self.dimensions)
            .map(|axis| self.console.read_directive(axis))
            .collect::<io::Result<Vec<_>>>()?;
        Ok(Movement::new(directives))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmaus_core::Directive::{Decrease, Hold, Increase};

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn read_positive_reprompts_until_valid() {
        let mut console = console("zero\n0\n-3\n 7 \n");
        let value = console.read_positive("Size: ").expect("answer");
        assert_eq!(value.get(), 7);

        let transcript = String::from_utf8(console.output).expect("utf8");
        assert_eq!(transcript.matches("Size: ").count(), 4);
        assert_eq!(
            transcript
                .matches("Please enter a whole number greater than zero.")
                .count(),
            3
        );
    }

    #[test]
    fn read_directive_reprompts_on_unknown_symbols() {
        let mut console = console("left\n++\n-1\n");
        let directive = console.read_directive(2).expect("answer");
        assert_eq!(directive, Decrease);

        let transcript = String::from_utf8(console.output).expect("utf8");
        assert_eq!(transcript.matches("Movement in dimension 2: ").count(), 3);
        assert!(transcript.contains("unrecognised movement symbol `left`"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut console = console("");
        let error = console.read_positive("Size: ").expect_err("eof");
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn human_source_collects_one_directive_per_axis() {
        let mut console = console("+\n\n-\n");
        let mut source = HumanSource::new(&mut console, 3);

        let movement = source.next_movement(Velocity::ZERO).expect("movement");
        assert_eq!(movement, Movement::new(vec![Increase, Hold, Decrease]));
    }

    #[test]
    fn human_source_reports_truncated_input() {
        let mut console = console("+\n");
        let mut source = HumanSource::new(&mut console, 2);

        let result = source.next_movement(Velocity::ZERO);
        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[test]
    fn status_block_shows_position_and_velocity() {
        let mut console = console("");
        console
            .show_status(&Coordinate::new(vec![1, 4]), Velocity::new(-0.5))
            .expect("write");

        let transcript = String::from_utf8(console.output).expect("utf8");
        assert!(transcript.contains("Coordinates: (1, 4)"));
        assert!(transcript.contains("Current velocity: -0.5"));
    }
}
