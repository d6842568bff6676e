//! JSON Lines event log.
//!
//! One object per line, tagged by `event`:
//!
//! ```text
//! {"event":"start","seed":42}
//! {"event":"lock","kind":"t","lines_cleared":1,"line_clear_score":100,"score":110,"rows":1}
//! {"event":"game_over","score":110,"rows":1}
//! {"event":"reset","score":110,"rows":1}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::types::CoreLastEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogRecord {
    Start {
        seed: u32,
    },
    /// Emitted before the reset, with the totals of the abandoned game.
    Reset {
        score: u32,
        rows: u32,
    },
    Lock {
        kind: &'static str,
        lines_cleared: u32,
        line_clear_score: u32,
        score: u32,
        rows: u32,
    },
    GameOver {
        score: u32,
        rows: u32,
    },
}

impl From<&CoreLastEvent> for LogRecord {
    fn from(ev: &CoreLastEvent) -> Self {
        Self::Lock {
            kind: ev.kind.as_str(),
            lines_cleared: ev.lines_cleared,
            line_clear_score: ev.line_clear_score,
            score: ev.score,
            rows: ev.rows,
        }
    }
}

/// Append-only record sink. A disabled log accepts and drops every record.
#[derive(Debug)]
pub struct EventLog<W: Write = File> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl EventLog<File> {
    /// Open `path` for appending, or return a disabled log for `None`.
    pub fn open(path: Option<&Path>) -> io::Result<Self> {
        let out = match path {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
            None => None,
        };
        Ok(Self {
            out,
            buf: Vec::with_capacity(256),
        })
    }
}

impl<W: Write> EventLog<W> {
    pub fn from_writer(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Write one record as a single line and flush it.
    pub fn record(&mut self, record: &LogRecord) -> io::Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record)?;
        self.buf.push(b'\n');
        out.write_all(&self.buf)?;
        out.flush()
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}
