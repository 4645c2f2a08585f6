//! Sequential concatenation combinator.
//!
//! Yields every element of the first cursor, then every element of the
//! second. Keys are preserved from each side, so duplicate keys downstream
//! are legitimate and the caller's concern.

use crate::enumflow::cursor::Cursor;
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;

pub struct ConcatCursor {
    first: Box<dyn Cursor>,
    second: Box<dyn Cursor>,
}

impl ConcatCursor {
    pub fn new(first: Box<dyn Cursor>, second: Box<dyn Cursor>) -> Self {
        ConcatCursor { first, second }
    }

    fn on_first(&mut self) -> EngineResult<bool> {
        self.first.valid()
    }
}

impl Cursor for ConcatCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        Ok(self.first.valid()? || self.second.valid()?)
    }

    fn current(&mut self) -> EngineResult<Value> {
        if self.on_first()? {
            self.first.current()
        } else {
            self.second.current()
        }
    }

    fn key(&mut self) -> EngineResult<Value> {
        if self.on_first()? {
            self.first.key()
        } else {
            self.second.key()
        }
    }

    fn next(&mut self) -> EngineResult<()> {
        if self.on_first()? {
            self.first.next()
        } else {
            self.second.next()
        }
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.first.rewind()?;
        self.second.rewind()
    }

    fn known_count(&self) -> Option<usize> {
        match (self.first.known_count(), self.second.known_count()) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        }
    }
}
