//! Seekable buffering cache over a one-shot cursor.
//!
//! [`SharedCache`] pulls lazily from a one-shot inner cursor into a growing
//! buffer, exactly once, and hands out any number of independent
//! [`CacheCursor`] views over that buffer. The views are seekable (they
//! rewind freely), which is what makes one-shot sources re-enumerable and
//! what the trailing-window combinators build on.

use crate::enumflow::cursor::{invalid_read, Cursor, Entry};
use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::value::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Lazily-filled shared buffer over a one-shot inner cursor.
pub struct SharedCache {
    inner: RefCell<Box<dyn Cursor>>,
    buffer: RefCell<Vec<Entry>>,
    /// False until the first fill; the inner cursor is advanced before each
    /// read except the first, so the cache never pulls ahead of demand.
    primed: Cell<bool>,
    exhausted: Cell<bool>,
    /// Set when filling the buffer hit an error; replayed to every view.
    failure: RefCell<Option<EngineError>>,
}

impl SharedCache {
    pub fn new(inner: Box<dyn Cursor>) -> Rc<Self> {
        Rc::new(SharedCache {
            inner: RefCell::new(inner),
            buffer: RefCell::new(Vec::new()),
            primed: Cell::new(false),
            exhausted: Cell::new(false),
            failure: RefCell::new(None),
        })
    }

    /// Returns the entry at `index`, pulling from the inner cursor as needed.
    /// `Ok(None)` means the source ended before `index`.
    fn entry_at(&self, index: usize) -> EngineResult<Option<Entry>> {
        if let Some(err) = self.failure.borrow().as_ref() {
            return Err(err.clone());
        }
        while self.buffer.borrow().len() <= index && !self.exhausted.get() {
            if let Err(err) = self.fill_one() {
                *self.failure.borrow_mut() = Some(err.clone());
                return Err(err);
            }
        }
        Ok(self.buffer.borrow().get(index).cloned())
    }

    fn fill_one(&self) -> EngineResult<()> {
        let mut inner = self.inner.borrow_mut();
        if self.primed.get() {
            inner.next()?;
        } else {
            self.primed.set(true);
        }
        if inner.valid()? {
            let entry = (inner.key()?, inner.current()?);
            self.buffer.borrow_mut().push(entry);
        } else {
            self.exhausted.set(true);
            log::trace!(
                "one-shot source exhausted after {} cached entries",
                self.buffer.borrow().len()
            );
        }
        Ok(())
    }

    /// Drains the inner cursor completely and returns the total length.
    pub fn full_len(&self) -> EngineResult<usize> {
        if let Some(err) = self.failure.borrow().as_ref() {
            return Err(err.clone());
        }
        while !self.exhausted.get() {
            if let Err(err) = self.fill_one() {
                *self.failure.borrow_mut() = Some(err.clone());
                return Err(err);
            }
        }
        Ok(self.buffer.borrow().len())
    }

    /// The cached length, when the source is already fully drained.
    pub fn len_if_exhausted(&self) -> Option<usize> {
        if self.exhausted.get() {
            Some(self.buffer.borrow().len())
        } else {
            None
        }
    }
}

/// Independent seekable view over a [`SharedCache`].
pub struct CacheCursor {
    cache: Rc<SharedCache>,
    pos: usize,
}

impl CacheCursor {
    pub fn new(cache: Rc<SharedCache>) -> Self {
        CacheCursor { cache, pos: 0 }
    }

    /// Positions the view at an absolute index.
    pub fn seek(&mut self, index: usize) {
        self.pos = index;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn cache(&self) -> &Rc<SharedCache> {
        &self.cache
    }
}

impl Cursor for CacheCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        Ok(self.cache.entry_at(self.pos)?.is_some())
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.cache
            .entry_at(self.pos)?
            .map(|(_, v)| v)
            .ok_or_else(|| invalid_read("cache"))
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.cache
            .entry_at(self.pos)?
            .map(|(k, _)| k)
            .ok_or_else(|| invalid_read("cache"))
    }

    fn next(&mut self) -> EngineResult<()> {
        self.pos += 1;
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.pos = 0;
        Ok(())
    }

    fn known_count(&self) -> Option<usize> {
        self.cache
            .len_if_exhausted()
            .map(|len| len.saturating_sub(self.pos))
    }
}
