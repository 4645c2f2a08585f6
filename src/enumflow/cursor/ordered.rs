//! Eager stable sort combinator.
//!
//! Ordering is not streaming: on first touch the cursor drains its input,
//! decorates each element with its original index and one projected key per
//! sort rule, stable-sorts the decorated list (ties broken by original
//! index), and re-emits sequential integer keys starting at 0.

use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::{drain_entries, invalid_read, Cursor, Entry, Selector};
use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::value::Value;
use std::cmp::Ordering;

/// One step of an ordered sequence's comparer chain.
///
/// Descending rules carry an inverted comparer; there is no separate
/// descending sort path.
#[derive(Clone)]
pub struct SortRule {
    pub selector: Selector,
    pub comparer: Comparer,
}

pub struct OrderedCursor {
    source: Box<dyn Cursor>,
    rules: Vec<SortRule>,
    sorted: Option<Vec<Entry>>,
    pos: usize,
}

impl OrderedCursor {
    pub fn new(source: Box<dyn Cursor>, rules: Vec<SortRule>) -> Self {
        OrderedCursor {
            source,
            rules,
            sorted: None,
            pos: 0,
        }
    }

    /// Drains and sorts the source. Runs once; the sorted buffer is reused
    /// across rewinds since the source is already consumed.
    fn ensure_sorted(&mut self) -> EngineResult<()> {
        if self.sorted.is_some() {
            return Ok(());
        }
        let entries = drain_entries(self.source.as_mut())?;
        log::debug!(
            "sorting {} elements with {} rule(s)",
            entries.len(),
            self.rules.len()
        );

        // Project each sort key exactly once per element per rule.
        let mut decorated: Vec<(usize, Vec<Value>, Entry)> = Vec::with_capacity(entries.len());
        for (index, (key, value)) in entries.into_iter().enumerate() {
            let mut sort_keys = Vec::with_capacity(self.rules.len());
            for rule in &self.rules {
                sort_keys.push((rule.selector)(&value, &key)?);
            }
            decorated.push((index, sort_keys, (key, value)));
        }

        // The comparer can fail (incomparable values); capture the first
        // failure and surface it after the sort, aborting traversal.
        let mut sort_err: Option<EngineError> = None;
        let rules = &self.rules;
        decorated.sort_by(|a, b| {
            if sort_err.is_some() {
                return Ordering::Equal;
            }
            for (rule, (left, right)) in rules.iter().zip(a.1.iter().zip(b.1.iter())) {
                match rule.comparer.compare(left, right) {
                    Ok(Ordering::Equal) => continue,
                    Ok(ordering) => return ordering,
                    Err(err) => {
                        sort_err = Some(err);
                        return Ordering::Equal;
                    }
                }
            }
            a.0.cmp(&b.0)
        });
        if let Some(err) = sort_err {
            return Err(err);
        }

        self.sorted = Some(
            decorated
                .into_iter()
                .map(|(_, _, (_, value))| value)
                .enumerate()
                .map(|(i, value)| (Value::Integer(i as i64), value))
                .collect(),
        );
        Ok(())
    }

    fn entry(&mut self) -> EngineResult<&Entry> {
        self.ensure_sorted()?;
        self.sorted
            .as_ref()
            .unwrap()
            .get(self.pos)
            .ok_or_else(|| invalid_read("order_by"))
    }
}

impl Cursor for OrderedCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.ensure_sorted()?;
        Ok(self.pos < self.sorted.as_ref().unwrap().len())
    }

    fn current(&mut self) -> EngineResult<Value> {
        Ok(self.entry()?.1.clone())
    }

    fn key(&mut self) -> EngineResult<Value> {
        Ok(self.entry()?.0.clone())
    }

    fn next(&mut self) -> EngineResult<()> {
        self.ensure_sorted()?;
        if self.pos < self.sorted.as_ref().unwrap().len() {
            self.pos += 1;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.pos = 0;
        Ok(())
    }

    fn known_count(&self) -> Option<usize> {
        self.sorted
            .as_ref()
            .map(|sorted| sorted.len().saturating_sub(self.pos))
    }
}
