//! Merge-diff of two sorted zone streams
//!
//! Both inputs must be sorted by whole-line byte order. The engine keeps one
//! validated line per side and repeatedly compares the two heads: equal lines
//! cancel out, the smaller line is unique to its side and is emitted, and once
//! one side runs dry the rest of the other side is drained.
//!
//! Lines are compared as raw bytes. Lines that are not valid records (wrong
//! shape, wrong type, not UTF-8) never take part in the comparison. They are
//! skipped as the cursor advances and logged at debug level.

use std::cmp::Ordering;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::edit::Edit;
use super::record::Record;
use super::source::LineSource;
use crate::utils::NS_RECORD_TYPE;

/// Which input a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// First input (`-1`)
    Left,
    /// Second input (`-2`)
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// How unique lines are labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// The second input is the newer zone: its unique lines are additions
    #[default]
    Forward,
    /// The first input is the newer zone: its unique lines are additions
    Reverse,
}

impl Polarity {
    fn edit_for(self, side: Side, name: &str, value: &str) -> Edit {
        match (self, side) {
            (Polarity::Forward, Side::Right) | (Polarity::Reverse, Side::Left) => {
                Edit::add(name, value)
            }
            (Polarity::Forward, Side::Left) | (Polarity::Reverse, Side::Right) => {
                Edit::remove(name, value)
            }
        }
    }
}

/// Settings consumed by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Required value of the record type column, `None` accepts any type
    pub record_type: Option<String>,
    pub polarity: Polarity,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            record_type: Some(NS_RECORD_TYPE.to_string()),
            polarity: Polarity::Forward,
        }
    }
}

/// Fatal error while diffing
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to read {side} input after line {line}")]
    Read {
        side: Side,
        line: u64,
        #[source]
        source: io::Error,
    },
}

/// Per-input counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SideStats {
    /// Lines read, valid or not
    pub lines: u64,
    /// Lines rejected as records
    pub skipped: u64,
}

/// Counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub left: SideStats,
    pub right: SideStats,
    pub adds: u64,
    pub removes: u64,
}

/// One input positioned on its next valid record
///
/// `name` and `value` hold the fields of the current record and are reused
/// from line to line.
struct Cursor<S> {
    source: S,
    side: Side,
    has_record: bool,
    name: String,
    value: String,
}

impl<S: LineSource> Cursor<S> {
    fn new(source: S, side: Side) -> Self {
        Self {
            source,
            side,
            has_record: false,
            name: String::new(),
            value: String::new(),
        }
    }

    /// Advance to the next line that parses as a record, skipping the rest
    fn advance(
        &mut self,
        record_type: Option<&str>,
        stats: &mut SideStats,
    ) -> Result<(), DiffError> {
        loop {
            let more = self.source.advance().map_err(|source| DiffError::Read {
                side: self.side,
                line: self.source.line_number(),
                source,
            })?;

            if !more {
                self.has_record = false;
                return Ok(());
            }
            stats.lines += 1;

            match Record::parse_bytes(self.source.current_line(), record_type) {
                Ok(record) => {
                    self.name.clear();
                    self.name.push_str(record.name());
                    self.value.clear();
                    self.value.push_str(record.value());
                    self.has_record = true;
                    return Ok(());
                }
                Err(reason) => {
                    stats.skipped += 1;
                    tracing::debug!(
                        side = %self.side,
                        line = self.source.line_number(),
                        "skipping {}",
                        reason
                    );
                }
            }
        }
    }

    fn line(&self) -> Option<&[u8]> {
        self.has_record.then(|| self.source.current_line())
    }
}

enum Step {
    /// Heads are equal, both move on
    Both,
    /// The head of this side is unique to it
    Emit(Side),
    /// The other side is exhausted
    Drain(Side),
}

/// Lazy merge-diff over two line sources
///
/// Yields edits in input order. The iterator is fused: after the inputs are
/// exhausted or a read fails it only returns `None`.
pub struct MergeDiff<L, R> {
    left: Cursor<L>,
    right: Cursor<R>,
    options: DiffOptions,
    stats: DiffStats,
    started: bool,
    pending: Option<Side>,
    draining: Option<Side>,
    done: bool,
}

impl<L: LineSource, R: LineSource> MergeDiff<L, R> {
    pub fn new(left: L, right: R, options: DiffOptions) -> Self {
        Self {
            left: Cursor::new(left, Side::Left),
            right: Cursor::new(right, Side::Right),
            options,
            stats: DiffStats::default(),
            started: false,
            pending: None,
            draining: None,
            done: false,
        }
    }

    /// Counters collected so far
    pub fn stats(&self) -> &DiffStats {
        &self.stats
    }

    fn advance(&mut self, side: Side) -> Result<(), DiffError> {
        let record_type = self.options.record_type.as_deref();
        match side {
            Side::Left => self.left.advance(record_type, &mut self.stats.left),
            Side::Right => self.right.advance(record_type, &mut self.stats.right),
        }
    }

    fn emit(&mut self, side: Side) -> Edit {
        let edit = match side {
            Side::Left => self
                .options
                .polarity
                .edit_for(side, &self.left.name, &self.left.value),
            Side::Right => self
                .options
                .polarity
                .edit_for(side, &self.right.name, &self.right.value),
        };

        if edit.is_add() {
            self.stats.adds += 1;
        } else {
            self.stats.removes += 1;
        }
        edit
    }

    fn step(&mut self) -> Result<Option<Edit>, DiffError> {
        if !self.started {
            self.started = true;
            self.advance(Side::Left)?;
            self.advance(Side::Right)?;
        }

        // The cursor behind the last emitted edit moves on lazily
        if let Some(side) = self.pending.take() {
            self.advance(side)?;
        }

        loop {
            let step = match (self.left.line(), self.right.line()) {
                (Some(left), Some(right)) => match left.cmp(right) {
                    Ordering::Equal => Step::Both,
                    // The left line may still match a later right line
                    Ordering::Greater => Step::Emit(Side::Right),
                    Ordering::Less => Step::Emit(Side::Left),
                },
                (Some(_), None) => Step::Drain(Side::Left),
                (None, Some(_)) => Step::Drain(Side::Right),
                (None, None) => return Ok(None),
            };

            let side = match step {
                Step::Both => {
                    self.advance(Side::Left)?;
                    self.advance(Side::Right)?;
                    continue;
                }
                Step::Emit(side) => side,
                Step::Drain(side) => {
                    self.note_drain(side);
                    side
                }
            };

            let edit = self.emit(side);
            self.pending = Some(side);
            return Ok(Some(edit));
        }
    }

    fn note_drain(&mut self, side: Side) {
        if self.draining != Some(side) {
            self.draining = Some(side);
            tracing::debug!(side = %side, "other input exhausted, draining");
        }
    }
}

impl<L: LineSource, R: LineSource> Iterator for MergeDiff<L, R> {
    type Item = Result<Edit, DiffError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.step() {
            Ok(Some(edit)) => Some(Ok(edit)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<L: LineSource, R: LineSource> std::iter::FusedIterator for MergeDiff<L, R> {}
