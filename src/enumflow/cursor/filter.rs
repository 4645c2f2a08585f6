//! Predicate filtering combinator.

use crate::enumflow::cursor::{Cursor, Predicate};
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;

/// Skips elements failing a `(value, key) -> bool` predicate.
///
/// The cursor pre-advances past non-matching elements on first touch, after
/// `rewind()`, and after each `next()`, so `valid()` alone (without a
/// preceding `next()`) correctly reports whether any remaining match
/// exists.
pub struct FilterCursor {
    inner: Box<dyn Cursor>,
    predicate: Predicate,
    settled: bool,
}

impl FilterCursor {
    pub fn new(inner: Box<dyn Cursor>, predicate: Predicate) -> Self {
        FilterCursor {
            inner,
            predicate,
            settled: false,
        }
    }

    /// Advances the inner cursor to the next matching element, if any.
    fn settle(&mut self) -> EngineResult<()> {
        if self.settled {
            return Ok(());
        }
        while self.inner.valid()? {
            let value = self.inner.current()?;
            let key = self.inner.key()?;
            if (self.predicate)(&value, &key)? {
                break;
            }
            self.inner.next()?;
        }
        self.settled = true;
        Ok(())
    }
}

impl Cursor for FilterCursor {
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
        self.settled = false;
        self.settle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumflow::cursor::source::PairsCursor;
    use std::rc::Rc;

    fn evens() -> FilterCursor {
        let source = PairsCursor::from_values(
            (1..=6).map(Value::Integer).collect(),
        );
        FilterCursor::new(
            Box::new(source),
            Rc::new(|v: &Value, _k: &Value| match v {
                Value::Integer(i) => Ok(i % 2 == 0),
                _ => Ok(false),
            }),
        )
    }

    #[test]
    fn test_valid_reports_match_without_next() {
        let mut cursor = evens();
        assert!(cursor.valid().unwrap());
        assert_eq!(cursor.current().unwrap(), Value::Integer(2));
    }

    #[test]
    fn test_filter_skips_between_matches() {
        let mut cursor = evens();
        let mut seen = Vec::new();
        while cursor.valid().unwrap() {
            seen.push(cursor.current().unwrap());
            cursor.next().unwrap();
        }
        assert_eq!(
            seen,
            vec![Value::Integer(2), Value::Integer(4), Value::Integer(6)]
        );
    }

    #[test]
    fn test_rewind_re_settles() {
        let mut cursor = evens();
        cursor.next().unwrap();
        cursor.rewind().unwrap();
        assert_eq!(cursor.current().unwrap(), Value::Integer(2));
    }
}
