//! The cursor protocol and its implementations.
//!
//! A [`Cursor`] is a stateful pull iterator over `(key, value)` entries.
//! Every data source and every combinator implements the same five-method
//! protocol, so combinators compose freely: each one wraps one or two inner
//! cursors and transforms their output on demand.
//!
//! Protocol contract:
//! - callers must check [`Cursor::valid`] before reading
//!   [`Cursor::current`] or [`Cursor::key`];
//! - a cursor is single-owner mutable state and must not be shared between
//!   two in-flight consumers;
//! - [`Cursor::rewind`] restarts rewindable cursors; one-shot sources fail
//!   with a source-exhausted error instead of silently yielding nothing.

pub mod cache;
pub mod concat;
pub mod filter;
pub mod flip;
pub mod grouping;
pub mod join;
pub mod ordered;
pub mod select;
pub mod setops;
pub mod source;
pub mod unique;
pub mod window;

use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::value::Value;
use std::rc::Rc;

/// One traversed element: `(key, value)`.
pub type Entry = (Value, Value);

/// Element selector: `(value, key) -> value`.
pub type Selector = Rc<dyn Fn(&Value, &Value) -> EngineResult<Value>>;

/// Element predicate: `(value, key) -> bool`.
pub type Predicate = Rc<dyn Fn(&Value, &Value) -> EngineResult<bool>>;

/// Pairwise result selector: `(outer value, inner value) -> value`.
pub type PairSelector = Rc<dyn Fn(&Value, &Value) -> EngineResult<Value>>;

/// Stateful pull iterator over entries.
///
/// All methods take `&mut self`: combinators that defer work (filter
/// pre-advance, eager sort, partitioning) perform it on first touch, so even
/// read accessors may need to mutate.
pub trait Cursor {
    /// True when the cursor is positioned on an element.
    fn valid(&mut self) -> EngineResult<bool>;

    /// The value at the current position.
    fn current(&mut self) -> EngineResult<Value>;

    /// The key at the current position.
    fn key(&mut self) -> EngineResult<Value>;

    /// Advances to the next position.
    fn next(&mut self) -> EngineResult<()>;

    /// Resets the position to the start.
    fn rewind(&mut self) -> EngineResult<()>;

    /// Count capability: the number of remaining elements when the cursor
    /// can answer without traversing.
    fn known_count(&self) -> Option<usize> {
        None
    }
}

/// Error for reading a cursor that is not positioned on an element.
pub(crate) fn invalid_read(operation: &str) -> EngineError {
    EngineError::evaluation_error(
        "cursor read while not positioned on an element",
        Some(operation.to_string()),
    )
}

/// Drains a cursor into an entry buffer, from its current position to
/// exhaustion.
pub(crate) fn drain_entries(cursor: &mut dyn Cursor) -> EngineResult<Vec<Entry>> {
    let mut entries = Vec::new();
    while cursor.valid()? {
        entries.push((cursor.key()?, cursor.current()?));
        cursor.next()?;
    }
    Ok(entries)
}

/// Adapter exposing a cursor as a standard fallible Rust iterator.
pub struct CursorIter {
    cursor: Box<dyn Cursor>,
    failed: bool,
}

impl CursorIter {
    pub fn new(cursor: Box<dyn Cursor>) -> Self {
        CursorIter {
            cursor,
            failed: false,
        }
    }
}

impl Iterator for CursorIter {
    type Item = EngineResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let step = (|| -> EngineResult<Option<Entry>> {
            if !self.cursor.valid()? {
                return Ok(None);
            }
            let entry = (self.cursor.key()?, self.cursor.current()?);
            self.cursor.next()?;
            Ok(Some(entry))
        })();
        match step {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
