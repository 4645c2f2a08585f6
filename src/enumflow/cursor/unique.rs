//! Distinct-by combinator.

use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::{Cursor, Selector};
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;

/// Suppresses elements whose projected key was already emitted.
///
/// Previously emitted projected keys are kept in a growing list and probed
/// linearly through the comparer, worst case O(n^2). The comparer is an
/// arbitrary predicate, not a hash function, so no hash-based dedup is
/// possible. The first-seen element of each equivalence class wins.
pub struct UniqueCursor {
    inner: Box<dyn Cursor>,
    selector: Selector,
    comparer: Comparer,
    seen: Vec<Value>,
    settled: bool,
}

impl UniqueCursor {
    pub fn new(inner: Box<dyn Cursor>, selector: Selector, comparer: Comparer) -> Self {
        UniqueCursor {
            inner,
            selector,
            comparer,
            seen: Vec::new(),
            settled: false,
        }
    }

    fn seen_before(&self, candidate: &Value) -> EngineResult<bool> {
        for prior in &self.seen {
            if self.comparer.equals(prior, candidate)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Advances past elements whose projected key duplicates a seen one, and
    /// records the key the cursor settles on.
    fn settle(&mut self) -> EngineResult<()> {
        if self.settled {
            return Ok(());
        }
        while self.inner.valid()? {
            let value = self.inner.current()?;
            let key = self.inner.key()?;
            let projected = (self.selector)(&value, &key)?;
            if !self.seen_before(&projected)? {
                self.seen.push(projected);
                break;
            }
            self.inner.next()?;
        }
        self.settled = true;
        Ok(())
    }
}

impl Cursor for UniqueCursor {
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
        self.inner.next()?;
        self.settled = false;
        self.settle()
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.inner.rewind()?;
        self.seen.clear();
        self.settled = false;
        self.settle()
    }
}
