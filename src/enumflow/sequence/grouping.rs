//! Grouped sequence facades.
//!
//! `group_by` produces a [`GroupedEnumerable`]: a lazy handle whose first
//! consumption eagerly partitions the source into first-seen-ordered
//! [`Grouping`]s. Each grouping remembers its originating group key and
//! dereferences to a plain [`Enumerable`] over its members (member keys
//! preserved), so the full operator set applies within a group.

use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::grouping::{partition, GroupCursor};
use crate::enumflow::cursor::{Cursor, Entry, Selector};
use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::sequence::enumerable::Enumerable;
use crate::enumflow::value::Value;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;

/// One group: its key and its members in first-seen order.
#[derive(Clone)]
pub struct Grouping {
    key: Value,
    items: Enumerable,
}

impl Grouping {
    pub(crate) fn new(key: Value, entries: Vec<Entry>) -> Self {
        Grouping {
            key,
            items: Enumerable::from_pairs(entries),
        }
    }

    /// The key this group was formed under.
    pub fn group_key(&self) -> &Value {
        &self.key
    }

    /// The members as a plain sequence.
    pub fn items(&self) -> Enumerable {
        self.items.clone()
    }
}

impl Deref for Grouping {
    type Target = Enumerable;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl std::fmt::Debug for Grouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grouping").field("key", &self.key).finish()
    }
}

/// Lazy result of `group_by`.
///
/// Partitioning runs on first consumption and is kept in a single-assignment
/// cell, so the groupings are shared by every later read. State built before
/// a partitioning error is discarded, not reused.
#[derive(Clone)]
pub struct GroupedEnumerable {
    source: Enumerable,
    selector: Selector,
    comparer: Comparer,
    groups: Rc<OnceCell<Rc<Vec<Grouping>>>>,
}

impl GroupedEnumerable {
    pub(crate) fn new(source: Enumerable, selector: Selector, comparer: Comparer) -> Self {
        GroupedEnumerable {
            source,
            selector,
            comparer,
            groups: Rc::new(OnceCell::new()),
        }
    }

    fn materialize(&self) -> EngineResult<Rc<Vec<Grouping>>> {
        if let Some(groups) = self.groups.get() {
            return Ok(groups.clone());
        }
        let mut cursor = self.source.cursor()?;
        let buckets = partition(cursor.as_mut(), &self.selector, &self.comparer)?;
        let groups = Rc::new(
            buckets
                .into_iter()
                .map(|bucket| Grouping::new(bucket.key, bucket.entries))
                .collect::<Vec<_>>(),
        );
        let _ = self.groups.set(groups.clone());
        Ok(groups)
    }

    /// The groups, in first-seen order.
    pub fn groups(&self) -> EngineResult<Vec<Grouping>> {
        Ok(self.materialize()?.as_ref().clone())
    }

    /// Number of groups.
    pub fn count(&self) -> EngineResult<usize> {
        Ok(self.materialize()?.len())
    }

    /// First group; errors over an empty source.
    pub fn first(&self) -> EngineResult<Grouping> {
        self.first_or_default()?
            .ok_or_else(|| EngineError::empty_sequence("first"))
    }

    /// First group, or `None` over an empty source.
    pub fn first_or_default(&self) -> EngineResult<Option<Grouping>> {
        Ok(self.materialize()?.first().cloned())
    }

    /// Cursor face: a sequence of `(group key, Array(member values))`
    /// entries, for chaining the plain operator set over groups.
    pub fn as_enumerable(&self) -> Enumerable {
        let source = self.source.clone();
        let selector = self.selector.clone();
        let comparer = self.comparer.clone();
        Enumerable::from_factory(Rc::new(move || {
            Ok(Box::new(GroupCursor::new(
                source.cursor()?,
                selector.clone(),
                comparer.clone(),
            )) as Box<dyn Cursor>)
        }))
    }

    /// Materializes into nested form: rendered group key to member values.
    ///
    /// Group keys must be scalar or textually representable.
    pub fn to_nested(&self) -> EngineResult<HashMap<String, Vec<Value>>> {
        let mut nested = HashMap::new();
        for grouping in self.materialize()?.iter() {
            let key = grouping.group_key().key_string()?;
            nested.insert(key, grouping.items.to_values()?);
        }
        Ok(nested)
    }
}

impl std::fmt::Debug for GroupedEnumerable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupedEnumerable")
            .field("partitioned", &self.groups.get().is_some())
            .finish()
    }
}
