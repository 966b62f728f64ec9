use std::io::{self, BufRead, Write};

use log::warn;

use crate::{
    common::{Coord, InputError, PlayerId},
    output::{GameEvent, OutputSink},
    player::InputProvider,
};

/// Parse `"row col"` (whitespace or comma separated) into a coordinate.
pub fn parse_coord(input: &str) -> Result<Coord, InputError> {
    let mut parts = input
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|p| !p.is_empty());
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InputError::InvalidInput(format!(
            "expected \"row col\", got {:?}",
            input.trim()
        )));
    };
    let number = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| InputError::InvalidInput(format!("{s:?} is not a number")))
    };
    Ok(Coord::new(number(row)?, number(col)?))
}

enum LineSource {
    Stdin,
    Reader(Box<dyn BufRead + Send>),
}

/// Reads coordinates typed on a terminal.
///
/// Both players may hold a `ConsoleInput::stdin()`; they share the process
/// wide stdin buffer, and only the active player reads from it.
pub struct ConsoleInput {
    source: LineSource,
}

impl ConsoleInput {
    pub fn stdin() -> Self {
        Self {
            source: LineSource::Stdin,
        }
    }

    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self {
            source: LineSource::Reader(Box::new(reader)),
        }
    }

    fn read_line(&mut self, line: &mut String) -> io::Result<usize> {
        match &mut self.source {
            LineSource::Stdin => io::stdin().read_line(line),
            LineSource::Reader(reader) => reader.read_line(line),
        }
    }
}

impl InputProvider for ConsoleInput {
    fn next_coordinate(&mut self, player: PlayerId) -> Result<Coord, InputError> {
        print!("{player}, enter row and column to attack: ");
        // A failed flush only delays the prompt.
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.read_line(&mut line) {
            Ok(0) => Err(InputError::Closed),
            Ok(_) => parse_coord(&line),
            Err(e) => {
                warn!("Reading input for {} failed: {}", player, e);
                Err(InputError::Closed)
            }
        }
    }
}

/// Sink that prints events to stdout.
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn notify(&mut self, event: GameEvent) {
        println!("{event}");
    }
}
