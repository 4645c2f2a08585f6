//! Pairwise combinators: nested-loop equality join and lock-step zip.

use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::{drain_entries, invalid_read, Cursor, PairSelector, Selector};
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;

/// One buffered inner element: original key, value, projected join key.
struct InnerEntry {
    key: Value,
    value: Value,
    projected: Value,
}

/// Nested-loop equality join.
///
/// The inner sequence is buffered fully (keys, values, projected keys) on
/// first touch; every outer element is then scanned against every buffered
/// projected key through the comparer, O(n*m). This is the honest cost when
/// equality is an arbitrary predicate rather than a hashable key. Each match
/// emits `result_selector(outer value, inner value)` under the outer key;
/// non-matches on either side contribute nothing.
pub struct JoinCursor {
    outer: Box<dyn Cursor>,
    inner: Option<Box<dyn Cursor>>,
    outer_key_selector: Selector,
    inner_key_selector: Selector,
    result_selector: PairSelector,
    comparer: Comparer,
    buffered: Option<Vec<InnerEntry>>,
    outer_projected: Option<Value>,
    inner_pos: usize,
    settled: bool,
}

impl JoinCursor {
    pub fn new(
        outer: Box<dyn Cursor>,
        inner: Box<dyn Cursor>,
        outer_key_selector: Selector,
        inner_key_selector: Selector,
        result_selector: PairSelector,
        comparer: Comparer,
    ) -> Self {
        JoinCursor {
            outer,
            inner: Some(inner),
            outer_key_selector,
            inner_key_selector,
            result_selector,
            comparer,
            buffered: None,
            outer_projected: None,
            inner_pos: 0,
            settled: false,
        }
    }

    fn ensure_buffered(&mut self) -> EngineResult<()> {
        if self.buffered.is_none() {
            let mut inner = self.inner.take().expect("inner cursor already buffered");
            let mut buffered = Vec::new();
            for (key, value) in drain_entries(inner.as_mut())? {
                let projected = (self.inner_key_selector)(&value, &key)?;
                buffered.push(InnerEntry {
                    key,
                    value,
                    projected,
                });
            }
            self.buffered = Some(buffered);
        }
        Ok(())
    }

    fn outer_projection(&mut self) -> EngineResult<Value> {
        if self.outer_projected.is_none() {
            let value = self.outer.current()?;
            let key = self.outer.key()?;
            self.outer_projected = Some((self.outer_key_selector)(&value, &key)?);
        }
        Ok(self.outer_projected.clone().unwrap())
    }

    /// Positions on the next (outer, inner) match at or after the current
    /// scan position.
    fn settle(&mut self) -> EngineResult<()> {
        if self.settled {
            return Ok(());
        }
        self.ensure_buffered()?;
        while self.outer.valid()? {
            let projected = self.outer_projection()?;
            let len = self.buffered.as_ref().unwrap().len();
            while self.inner_pos < len {
                let candidate = &self.buffered.as_ref().unwrap()[self.inner_pos].projected;
                if self.comparer.equals(&projected, candidate)? {
                    self.settled = true;
                    return Ok(());
                }
                self.inner_pos += 1;
            }
            self.outer.next()?;
            self.outer_projected = None;
            self.inner_pos = 0;
        }
        self.settled = true;
        Ok(())
    }
}

impl Cursor for JoinCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.settle()?;
        self.outer.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.settle()?;
        if !self.outer.valid()? {
            return Err(invalid_read("join"));
        }
        let outer_value = self.outer.current()?;
        let inner_value = self.buffered.as_ref().unwrap()[self.inner_pos].value.clone();
        (self.result_selector)(&outer_value, &inner_value)
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.outer.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        self.settle()?;
        if self.outer.valid()? {
            self.inner_pos += 1;
            self.settled = false;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.outer.rewind()?;
        self.outer_projected = None;
        self.inner_pos = 0;
        self.settled = false;
        Ok(())
    }
}

/// Walks two cursors in lock-step, emitting
/// `result_selector(left value, right value)` under the left key, and stops
/// at the shorter sequence's exhaustion.
pub struct ZipCursor {
    left: Box<dyn Cursor>,
    right: Box<dyn Cursor>,
    result_selector: PairSelector,
}

impl ZipCursor {
    pub fn new(
        left: Box<dyn Cursor>,
        right: Box<dyn Cursor>,
        result_selector: PairSelector,
    ) -> Self {
        ZipCursor {
            left,
            right,
            result_selector,
        }
    }
}

impl Cursor for ZipCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        Ok(self.left.valid()? && self.right.valid()?)
    }

    fn current(&mut self) -> EngineResult<Value> {
        if !self.valid()? {
            return Err(invalid_read("zip"));
        }
        let left = self.left.current()?;
        let right = self.right.current()?;
        (self.result_selector)(&left, &right)
    }

    fn key(&mut self) -> EngineResult<Value> {
        if !self.valid()? {
            return Err(invalid_read("zip"));
        }
        self.left.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        if self.valid()? {
            self.left.next()?;
            self.right.next()?;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.left.rewind()?;
        self.right.rewind()
    }

    fn known_count(&self) -> Option<usize> {
        match (self.left.known_count(), self.right.known_count()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        }
    }
}
