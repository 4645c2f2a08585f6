//! Projection combinators.
//!
//! [`SelectCursor`] applies an element selector, and optionally a key
//! selector, on demand, once per pulled element, with no buffering.
//! [`ReindexCursor`] is the key-renumbering variant backing `values()`.

use crate::enumflow::cursor::{invalid_read, Cursor, Entry, Selector};
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;

/// Applies `(value, key) -> value'` and an optional key selector per pull.
///
/// The projected pair is cached per position so a selector runs at most once
/// per element, however many times accessors are called; selector errors
/// propagate immediately and abort traversal.
pub struct SelectCursor {
    inner: Box<dyn Cursor>,
    selector: Selector,
    key_selector: Option<Selector>,
    projected: Option<Entry>,
}

impl SelectCursor {
    pub fn new(inner: Box<dyn Cursor>, selector: Selector, key_selector: Option<Selector>) -> Self {
        SelectCursor {
            inner,
            selector,
            key_selector,
            projected: None,
        }
    }

    fn project(&mut self) -> EngineResult<&Entry> {
        if self.projected.is_none() {
            let value = self.inner.current()?;
            let key = self.inner.key()?;
            let new_value = (self.selector)(&value, &key)?;
            let new_key = match &self.key_selector {
                Some(sel) => sel(&value, &key)?,
                None => key,
            };
            self.projected = Some((new_key, new_value));
        }
        Ok(self.projected.as_ref().unwrap())
    }
}

impl Cursor for SelectCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.inner.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        if !self.inner.valid()? {
            return Err(invalid_read("select"));
        }
        Ok(self.project()?.1.clone())
    }

    fn key(&mut self) -> EngineResult<Value> {
        if !self.inner.valid()? {
            return Err(invalid_read("select"));
        }
        Ok(self.project()?.0.clone())
    }

    fn next(&mut self) -> EngineResult<()> {
        self.projected = None;
        self.inner.next()
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.projected = None;
        self.inner.rewind()
    }

    fn known_count(&self) -> Option<usize> {
        // Projection never changes cardinality.
        self.inner.known_count()
    }
}

/// Re-emits the inner cursor's values under dense ascending integer keys.
pub struct ReindexCursor {
    inner: Box<dyn Cursor>,
    index: usize,
}

impl ReindexCursor {
    pub fn new(inner: Box<dyn Cursor>) -> Self {
        ReindexCursor { inner, index: 0 }
    }
}

impl Cursor for ReindexCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.inner.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.inner.current()
    }

    fn key(&mut self) -> EngineResult<Value> {
        if !self.inner.valid()? {
            return Err(invalid_read("values"));
        }
        Ok(Value::Integer(self.index as i64))
    }

    fn next(&mut self) -> EngineResult<()> {
        self.inner.next()?;
        self.index += 1;
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.index = 0;
        self.inner.rewind()
    }

    fn known_count(&self) -> Option<usize> {
        self.inner.known_count()
    }
}
