//! Eager partition combinator.
//!
//! Grouping drains its input and partitions it into buckets keyed by a
//! projected group key, preserving first-seen group order and first-seen
//! member order within each group. Group-key equality goes through the
//! pluggable comparer, so new-group detection is a linear probe over the
//! existing group keys, not a hash lookup.

use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::{invalid_read, Cursor, Entry, Selector};
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;

/// One partition bucket: the group key and its members in insertion order.
pub struct GroupBucket {
    pub key: Value,
    pub entries: Vec<Entry>,
}

/// Drains `source` and partitions it into first-seen-ordered buckets.
pub fn partition(
    source: &mut dyn Cursor,
    selector: &Selector,
    comparer: &Comparer,
) -> EngineResult<Vec<GroupBucket>> {
    let mut buckets: Vec<GroupBucket> = Vec::new();
    while source.valid()? {
        let value = source.current()?;
        let key = source.key()?;
        let group_key = selector(&value, &key)?;

        let mut target = None;
        for (index, bucket) in buckets.iter().enumerate() {
            if comparer.equals(&bucket.key, &group_key)? {
                target = Some(index);
                break;
            }
        }
        match target {
            Some(index) => buckets[index].entries.push((key, value)),
            None => buckets.push(GroupBucket {
                key: group_key,
                entries: vec![(key, value)],
            }),
        }
        source.next()?;
    }
    log::debug!("partitioned input into {} group(s)", buckets.len());
    Ok(buckets)
}

/// Cursor face of grouping: yields one entry per group, the group key in key
/// position and the member values as an `Array` in value position.
pub struct GroupCursor {
    source: Box<dyn Cursor>,
    selector: Selector,
    comparer: Comparer,
    buckets: Option<Vec<GroupBucket>>,
    pos: usize,
}

impl GroupCursor {
    pub fn new(source: Box<dyn Cursor>, selector: Selector, comparer: Comparer) -> Self {
        GroupCursor {
            source,
            selector,
            comparer,
            buckets: None,
            pos: 0,
        }
    }

    fn ensure_partitioned(&mut self) -> EngineResult<()> {
        if self.buckets.is_none() {
            self.buckets = Some(partition(
                self.source.as_mut(),
                &self.selector,
                &self.comparer,
            )?);
        }
        Ok(())
    }

    fn bucket(&mut self) -> EngineResult<&GroupBucket> {
        self.ensure_partitioned()?;
        self.buckets
            .as_ref()
            .unwrap()
            .get(self.pos)
            .ok_or_else(|| invalid_read("group_by"))
    }
}

impl Cursor for GroupCursor {
    fn valid(&mut self) -> EngineResult<bool> {
        self.ensure_partitioned()?;
        Ok(self.pos < self.buckets.as_ref().unwrap().len())
    }

    fn current(&mut self) -> EngineResult<Value> {
        let bucket = self.bucket()?;
        Ok(Value::Array(
            bucket.entries.iter().map(|(_, v)| v.clone()).collect(),
        ))
    }

    fn key(&mut self) -> EngineResult<Value> {
        Ok(self.bucket()?.key.clone())
    }

    fn next(&mut self) -> EngineResult<()> {
        self.ensure_partitioned()?;
        if self.pos < self.buckets.as_ref().unwrap().len() {
            self.pos += 1;
        }
        Ok(())
    }

    fn rewind(&mut self) -> EngineResult<()> {
        self.pos = 0;
        Ok(())
    }

    fn known_count(&self) -> Option<usize> {
        self.buckets
            .as_ref()
            .map(|buckets| buckets.len().saturating_sub(self.pos))
    }
}
