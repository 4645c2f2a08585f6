//! Windowing combinators.
//!
//! Take, Skip and TakeWhile are index- or predicate-bounded streaming
//! combinators with O(1) memory. SkipWhile pre-consumes matching elements
//! exactly once per traversal. TakeLast and SkipLast need the final window
//! boundary, which is only known once the source is exhausted, so they ride
//! the seekable buffering cache. Chunk regroups the stream into fixed-size
//! arrays.

use crate::enumflow::cursor::cache::{CacheCursor, SharedCache};
use crate::enumflow::cursor::{invalid_read, Cursor, Predicate};
use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::value::Value;

/// Yields at most the first `n` elements, keys preserved.
pub struct TakeCursor {
    inner: Box<dyn Cursor>,
    limit: usize,
    taken: usize,
}

impl TakeCursor {
    pub fn new(inner: Box<dyn Cursor>, limit: usize) -> Self {
        TakeCursor {
            inner,
            limit,
            taken: 0,
        }
    }
}

impl Cursor for TakeCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        if self.taken >= self.limit {
            return Ok(false);
        }
        self.inner.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        if self.taken >= self.limit {
            return Err(invalid_read("take"));
        }
        self.inner.current()
    }

    fn key(&mut self) -> EngineResult<Value> {
        if self.taken >= self.limit {
            return Err(invalid_read("take"));
        }
        self.inner.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        if self.taken < self.limit {
            self.taken += 1;
            self.inner.next()?;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.taken = 0;
        self.inner.rewind()
    }

    fn known_count(&self) -> Option<usize> {
        let remaining_limit = self.limit.saturating_sub(self.taken);
        self.inner
            .known_count()
            .map(|count| count.min(remaining_limit))
    }
}

/// Discards the first `n` elements, keys preserved.
pub struct SkipCursor {
    inner: Box<dyn Cursor>,
    count: usize,
    skipped: bool,
}

impl SkipCursor {
    pub fn new(inner: Box<dyn Cursor>, count: usize) -> Self {
        SkipCursor {
            inner,
            count,
            skipped: false,
        }
    }

    fn settle(&mut self) -> EngineResult<()> {
        if self.skipped {
            return Ok(());
        }
        for _ in 0..self.count {
            if !self.inner.valid()? {
                break;
            }
            self.inner.next()?;
        }
        self.skipped = true;
        Ok(())
    }
}

impl Cursor for SkipCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.settle()?;
        self.inner.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.inner.current()
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.inner.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        self.settle()?;
        self.inner.next()
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.inner.rewind()?;
        self.skipped = false;
        Ok(())
    }
}

/// Yields elements while the predicate holds, then ends the sequence.
///
/// The predicate is evaluated once per element; the result is cached per
/// position.
pub struct TakeWhileCursor {
    inner: Box<dyn Cursor>,
    predicate: Predicate,
    checked: bool,
    done: bool,
}

impl TakeWhileCursor {
    pub fn new(inner: Box<dyn Cursor>, predicate: Predicate) -> Self {
        TakeWhileCursor {
            inner,
            predicate,
            checked: false,
            done: false,
        }
    }

    fn check(&mut self) -> EngineResult<()> {
        if self.done || self.checked {
            return Ok(());
        }
        if self.inner.valid()? {
            let value = self.inner.current()?;
            let key = self.inner.key()?;
            if !(self.predicate)(&value, &key)? {
                self.done = true;
            }
        }
        self.checked = true;
        Ok(())
    }
}

impl Cursor for TakeWhileCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.check()?;
        if self.done {
            return Ok(false);
        }
        self.inner.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        if !self.valid()? {
            return Err(invalid_read("take_while"));
        }
        self.inner.current()
    }

    fn key(&mut self) -> EngineResult<Value> {
        if !self.valid()? {
            return Err(invalid_read("take_while"));
        }
        self.inner.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        if self.valid()? {
            self.inner.next()?;
            self.checked = false;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.inner.rewind()?;
        self.checked = false;
        self.done = false;
        Ok(())
    }
}

/// Discards the leading run of matching elements, then yields the remainder.
///
/// The skip happens exactly once per traversal; once the first non-matching
/// element is reached the predicate is never evaluated again.
pub struct SkipWhileCursor {
    inner: Box<dyn Cursor>,
    predicate: Predicate,
    skipped: bool,
}

impl SkipWhileCursor {
    pub fn new(inner: Box<dyn Cursor>, predicate: Predicate) -> Self {
        SkipWhileCursor {
            inner,
            predicate,
            skipped: false,
        }
    }

    fn settle(&mut self) -> EngineResult<()> {
        if self.skipped {
            return Ok(());
        }
        while self.inner.valid()? {
            let value = self.inner.current()?;
            let key = self.inner.key()?;
            if !(self.predicate)(&value, &key)? {
                break;
            }
            self.inner.next()?;
        }
        self.skipped = true;
        Ok(())
    }
}

impl Cursor for SkipWhileCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.settle()?;
        self.inner.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.inner.current()
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.inner.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        self.settle()?;
        self.inner.next()
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.inner.rewind()?;
        self.skipped = false;
        Ok(())
    }
}

/// Yields the trailing `n` elements.
///
/// Requires full buffering: the window start `len - min(n, len)` is only
/// known at exhaustion. Shorter-than-`n` sequences are yielded whole.
pub struct TakeLastCursor {
    view: CacheCursor,
    count: usize,
    start: Option<usize>,
}

impl TakeLastCursor {
    pub fn new(inner: Box<dyn Cursor>, count: usize) -> Self {
        TakeLastCursor {
            view: CacheCursor::new(SharedCache::new(inner)),
            count,
            start: None,
        }
    }

    fn settle(&mut self) -> EngineResult<()> {
        if self.start.is_none() {
            let len = self.view.cache().full_len()?;
            let start = len - self.count.min(len);
            self.view.seek(start);
            self.start = Some(start);
        }
        Ok(())
    }
}

impl Cursor for TakeLastCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.settle()?;
        self.view.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.view.current()
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.view.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        self.settle()?;
        self.view.next()
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.settle()?;
        self.view.seek(self.start.unwrap_or(0));
        Ok(())
    }

    fn known_count(&self) -> Option<usize> {
        self.view.known_count()
    }
}

/// Discards the trailing `n` elements.
///
/// Requires full buffering, like [`TakeLastCursor`]. Shorter-than-`n`
/// sequences yield nothing.
pub struct SkipLastCursor {
    view: CacheCursor,
    count: usize,
    limit: Option<usize>,
}

impl SkipLastCursor {
    pub fn new(inner: Box<dyn Cursor>, count: usize) -> Self {
        SkipLastCursor {
            view: CacheCursor::new(SharedCache::new(inner)),
            count,
            limit: None,
        }
    }

    fn settle(&mut self) -> EngineResult<usize> {
        if let Some(limit) = self.limit {
            return Ok(limit);
        }
        let len = self.view.cache().full_len()?;
        let limit = len - self.count.min(len);
        self.limit = Some(limit);
        Ok(limit)
    }
}

impl Cursor for SkipLastCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        let limit = self.settle()?;
        Ok(self.view.position() < limit)
    }

    fn current(&mut self) -> EngineResult<Value> {
        if !self.valid()? {
            return Err(invalid_read("skip_last"));
        }
        self.view.current()
    }

    fn key(&mut self) -> EngineResult<Value> {
        if !self.valid()? {
            return Err(invalid_read("skip_last"));
        }
        self.view.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        if self.valid()? {
            self.view.next()?;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.view.seek(0);
        Ok(())
    }

    fn known_count(&self) -> Option<usize> {
        self.limit
            .map(|limit| limit.saturating_sub(self.view.position()))
    }
}

/// Regroups the stream into fixed-size `Array` chunks under dense integer
/// keys; the final chunk may be shorter, and no chunk is empty.
pub struct ChunkCursor {
    inner: Box<dyn Cursor>,
    size: usize,
    chunk: Option<Vec<Value>>,
    index: usize,
    started: bool,
}

impl ChunkCursor {
    pub fn new(inner: Box<dyn Cursor>, size: usize) -> Self {
        ChunkCursor {
            inner,
            size,
            chunk: None,
            index: 0,
            started: false,
        }
    }

    /// The size constraint is checked lazily, on first pull, like every
    /// other traversal-time error.
    fn settle(&mut self) -> EngineResult<()> {
        if self.started {
            return Ok(());
        }
        if self.size == 0 {
            return Err(EngineError::invalid_argument(
                "chunk size must be positive",
                Some("0".to_string()),
            ));
        }
        self.started = true;
        self.fill()
    }

    fn fill(&mut self) -> EngineResult<()> {
        let mut collected = Vec::with_capacity(self.size);
        while collected.len() < self.size && self.inner.valid()? {
            collected.push(self.inner.current()?);
            self.inner.next()?;
        }
        self.chunk = if collected.is_empty() {
            None
        } else {
            Some(collected)
        };
        Ok(())
    }
}

impl Cursor for ChunkCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.settle()?;
        Ok(self.chunk.is_some())
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.chunk
            .as_ref()
            .map(|chunk| Value::Array(chunk.clone()))
            .ok_or_else(|| invalid_read("chunk"))
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.settle()?;
        if self.chunk.is_none() {
            return Err(invalid_read("chunk"));
        }
        Ok(Value::Integer(self.index as i64))
    }

    fn next(&mut self) -> EngineResult<()> {
        self.settle()?;
        if self.chunk.is_some() {
            self.index += 1;
            self.fill()?;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.inner.rewind()?;
        self.chunk = None;
        self.index = 0;
        self.started = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumflow::cursor::source::PairsCursor;

    fn digits(n: i64) -> Box<dyn Cursor> {
        Box::new(PairsCursor::from_values(
            (1..=n).map(Value::Integer).collect(),
        ))
    }

    fn values(cursor: &mut dyn Cursor) -> Vec<Value> {
        let mut out = Vec::new();
        while cursor.valid().unwrap() {
            out.push(cursor.current().unwrap());
            cursor.next().unwrap();
        }
        out
    }

    #[test]
    fn test_take_last_window() {
        let mut cursor = TakeLastCursor::new(digits(5), 2);
        assert_eq!(
            values(&mut cursor),
            vec![Value::Integer(4), Value::Integer(5)]
        );
    }

    #[test]
    fn test_take_last_clamps_to_whole_sequence() {
        let mut cursor = TakeLastCursor::new(digits(5), 10);
        assert_eq!(values(&mut cursor).len(), 5);
    }

    #[test]
    fn test_skip_last_clamps_to_empty() {
        let mut cursor = SkipLastCursor::new(digits(5), 10);
        assert_eq!(values(&mut cursor), Vec::<Value>::new());
    }

    #[test]
    fn test_chunk_final_group_shorter() {
        let mut cursor = ChunkCursor::new(digits(5), 2);
        let chunks = values(&mut cursor);
        assert_eq!(chunks.len(), 3);
        assert_eq!(
            chunks[2],
            Value::Array(vec![Value::Integer(5)])
        );
    }

    #[test]
    fn test_chunk_zero_errors_lazily() {
        let mut cursor = ChunkCursor::new(digits(3), 0);
        let err = cursor.valid().unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument { .. }));
    }
}
