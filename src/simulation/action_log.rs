//! Per-rotation CSV action log.
//!
//! One row per move. Call [`ActionLog::finish`] to flush; a log that is
//! only dropped swallows flush errors.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::board::{Roll, Square};
use crate::core::{PlayerId, SimError};

const HEADER: &str = "game,turn,player_id,player_name,strategy,start,roll,chosen,end,won";

/// One move as written to the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord<'a> {
    pub game: u64,
    pub turn: u32,
    pub player: PlayerId,
    pub player_name: &'a str,
    pub strategy: &'a str,
    pub start: Square,
    pub roll: Roll,
    /// Square the strategy picked, before bounds and redirects.
    pub chosen: Square,
    pub end: Square,
    pub won: bool,
}

/// Buffered CSV writer bound to one file.
#[derive(Debug)]
pub struct ActionLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ActionLog {
    /// Create (or truncate) the file and write the header.
    pub fn create(path: &Path) -> Result<Self, SimError> {
        let file = File::create(path).map_err(|source| SimError::ActionLog {
            path: path.to_path_buf(),
            source,
        })?;

        let mut log = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        };
        let result = writeln!(log.writer, "{HEADER}");
        log.io(result)?;
        Ok(log)
    }

    pub fn record(&mut self, entry: &MoveRecord<'_>) -> Result<(), SimError> {
        let result = writeln!(
            self.writer,
            "{},{},{},{},{},{},{},{},{},{}",
            entry.game,
            entry.turn,
            entry.player.raw(),
            csv_field(entry.player_name),
            csv_field(entry.strategy),
            entry.start,
            entry.roll,
            entry.chosen,
            entry.end,
            entry.won,
        );
        self.io(result)
    }

    /// Flush everything to disk.
    pub fn finish(mut self) -> Result<(), SimError> {
        let result = self.writer.flush();
        self.io(result)
    }

    fn io(&self, result: io::Result<()>) -> Result<(), SimError> {
        result.map_err(|source| SimError::ActionLog {
            path: self.path.clone(),
            source,
        })
    }
}

/// Quote a field if it contains a separator, quote or newline.
fn csv_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}
