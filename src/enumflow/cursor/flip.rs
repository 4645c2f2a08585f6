//! Key/value swap combinator.
//!
//! Flip projects keys into value position and values into key position on
//! each pull. It backs `keys()` and, combined with filter, key-predicate
//! filtering without a dedicated combinator.

use crate::enumflow::cursor::Cursor;
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;

pub struct FlipCursor {
    inner: Box<dyn Cursor>,
}

impl FlipCursor {
    pub fn new(inner: Box<dyn Cursor>) -> Self {
        FlipCursor { inner }
    }
}

impl Cursor for FlipCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.inner.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.inner.key()
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.inner.current()
    }

    fn next(&mut self) -> EngineResult<()> {
        self.inner.next()
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.inner.rewind()
    }

    fn known_count(&self) -> Option<usize> {
        self.inner.known_count()
    }
}
