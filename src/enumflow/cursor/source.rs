//! Source adapters bridging native containers and producers into the cursor
//! protocol.
//!
//! Two adapters with two rewind policies:
//! - [`PairsCursor`] wraps an owned entry buffer and rewinds freely;
//! - [`IterCursor`] wraps an arbitrary Rust iterator, which can only be
//!   consumed once: rewinding after consumption fails with a
//!   source-exhausted error. Facades normally shield callers from that by
//!   wrapping one-shot sources in the buffering cache on first traversal.

use crate::enumflow::cursor::{invalid_read, Cursor, Entry};
use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::value::Value;
use std::rc::Rc;

/// Rewindable cursor over an owned, shared entry buffer.
pub struct PairsCursor {
    entries: Rc<Vec<Entry>>,
    pos: usize,
}

impl PairsCursor {
    /// Creates a cursor over explicit `(key, value)` pairs.
    pub fn new(entries: Rc<Vec<Entry>>) -> Self {
        PairsCursor { entries, pos: 0 }
    }

    /// Creates a cursor over values, assigning dense ascending integer keys.
    pub fn from_values(values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Value::Integer(i as i64), v))
            .collect();
        PairsCursor::new(Rc::new(entries))
    }
}

impl Cursor for PairsCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        Ok(self.pos < self.entries.len())
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.entries
            .get(self.pos)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| invalid_read("source"))
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.entries
            .get(self.pos)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| invalid_read("source"))
    }

    fn next(&mut self) -> EngineResult<()> {
        if self.pos < self.entries.len() {
            self.pos += 1;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.pos = 0;
        Ok(())
    }

    fn known_count(&self) -> Option<usize> {
        Some(self.entries.len().saturating_sub(self.pos))
    }
}

/// One-shot cursor over a boxed Rust iterator of values.
///
/// Keys are dense ascending integers assigned as elements are pulled.
pub struct IterCursor {
    iter: Box<dyn Iterator<Item = Value>>,
    head: Option<Entry>,
    pulled: usize,
    started: bool,
}

impl IterCursor {
    pub fn new(iter: Box<dyn Iterator<Item = Value>>) -> Self {
        IterCursor {
            iter,
            head: None,
            pulled: 0,
            started: false,
        }
    }

    fn ensure_started(&mut self) {
        if !self.started {
            self.started = true;
            self.pull();
        }
    }

    fn pull(&mut self) {
        self.head = self.iter.next().map(|v| {
            let entry = (Value::Integer(self.pulled as i64), v);
            self.pulled += 1;
            entry
        });
    }
}

impl Cursor for IterCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.ensure_started();
        Ok(self.head.is_some())
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.ensure_started();
        self.head
            .as_ref()
            .map(|(_, v)| v.clone())
            .ok_or_else(|| invalid_read("source"))
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.ensure_started();
        self.head
            .as_ref()
            .map(|(k, _)| k.clone())
            .ok_or_else(|| invalid_read("source"))
    }

    fn next(&mut self) -> EngineResult<()> {
        self.ensure_started();
        if self.head.is_some() {
            self.pull();
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        if self.pulled == 0 {
            return Ok(());
        }
        Err(EngineError::source_exhausted(
            "one-shot producer cannot be rewound after consumption",
        ))
    }
}
