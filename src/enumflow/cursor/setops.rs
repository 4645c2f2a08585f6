//! Set-algebra filtering combinator.
//!
//! Except and Intersect share one primitive: buffer the projected keys of
//! the "other" sequence once, then stream-filter the primary sequence
//! against that buffer through the comparer. Union does not live here: it
//! is the concatenation of both sequences pushed through the Unique
//! combinator.

use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::{drain_entries, Cursor, Selector};
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;

/// Whether elements matching the buffered key set are kept or dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetFilterMode {
    /// Keep matches: intersect.
    Keep,
    /// Drop matches: except.
    Drop,
}

/// Streams the primary cursor, admitting elements by membership of their
/// projected key in the other sequence's buffered projected keys.
pub struct SetFilterCursor {
    primary: Box<dyn Cursor>,
    other: Option<Box<dyn Cursor>>,
    selector: Selector,
    other_selector: Selector,
    comparer: Comparer,
    mode: SetFilterMode,
    buffered: Option<Vec<Value>>,
    settled: bool,
}

impl SetFilterCursor {
    pub fn new(
        primary: Box<dyn Cursor>,
        other: Box<dyn Cursor>,
        selector: Selector,
        other_selector: Selector,
        comparer: Comparer,
        mode: SetFilterMode,
    ) -> Self {
        SetFilterCursor {
            primary,
            other: Some(other),
            selector,
            other_selector,
            comparer,
            mode,
            buffered: None,
            settled: false,
        }
    }

    fn ensure_buffered(&mut self) -> EngineResult<()> {
        if self.buffered.is_none() {
            let mut other = self.other.take().expect("other cursor already buffered");
            let mut keys = Vec::new();
            for (key, value) in drain_entries(other.as_mut())? {
                keys.push((self.other_selector)(&value, &key)?);
            }
            self.buffered = Some(keys);
        }
        Ok(())
    }

    fn member(&self, projected: &Value) -> EngineResult<bool> {
        for key in self.buffered.as_ref().unwrap() {
            if self.comparer.equals(key, projected)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn admits(&mut self, projected: &Value) -> EngineResult<bool> {
        let member = self.member(projected)?;
        Ok(match self.mode {
            SetFilterMode::Keep => member,
            SetFilterMode::Drop => !member,
        })
    }

    fn settle(&mut self) -> EngineResult<()> {
        if self.settled {
            return Ok(());
        }
        self.ensure_buffered()?;
        while self.primary.valid()? {
            let value = self.primary.current()?;
            let key = self.primary.key()?;
            let projected = (self.selector)(&value, &key)?;
            if self.admits(&projected)? {
                break;
            }
            self.primary.next()?;
        }
        self.settled = true;
        Ok(())
    }
}

impl Cursor for SetFilterCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.settle()?;
        self.primary.valid()
    }

    fn current(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.primary.current()
    }

    fn key(&mut self) -> EngineResult<Value> {
        self.settle()?;
        self.primary.key()
    }

    fn next(&mut self) -> EngineResult<()> {
        self.settle()?;
        self.primary.next()?;
        self.settled = false;
        self.settle()
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.primary.rewind()?;
        self.settled = false;
        Ok(())
    }
}
