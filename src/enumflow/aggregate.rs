//! Terminal reducers: single-pass streaming consumers that force traversal
//! and return a non-lazy result.
//!
//! Every reducer pulls from a head cursor until it is exhausted or the
//! answer is determined: `first`, `single`, `any`, `all` and `contains`
//! short-circuit by simply ceasing to call `next()`.

use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::{Cursor, Entry, Predicate};
use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::value::Value;
use std::collections::HashMap;

/// Accumulator callback: `(accumulated, value) -> accumulated`.
pub type Accumulator = dyn Fn(&Value, &Value) -> EngineResult<Value>;

/// Folds the sequence with an explicit seed.
pub fn fold(cursor: &mut dyn Cursor, seed: Value, f: &Accumulator) -> EngineResult<Value> {
    let mut acc = seed;
    while cursor.valid()? {
        let value = cursor.current()?;
        acc = f(&acc, &value)?;
        cursor.next()?;
    }
    Ok(acc)
}

/// Seedless fold: the first element is the seed. Empty input is an error.
pub fn reduce(cursor: &mut dyn Cursor, f: &Accumulator) -> EngineResult<Value> {
    if !cursor.valid()? {
        return Err(EngineError::empty_sequence("reduce"));
    }
    let seed = cursor.current()?;
    cursor.next()?;
    fold(cursor, seed, f)
}

/// Element count, using the cursor's count capability when available.
pub fn count(cursor: &mut dyn Cursor) -> EngineResult<usize> {
    if let Some(known) = cursor.known_count() {
        return Ok(known);
    }
    let mut total = 0;
    while cursor.valid()? {
        total += 1;
        cursor.next()?;
    }
    Ok(total)
}

/// Numeric sum; Integer arithmetic until a Float widens it. Empty input
/// sums to Integer(0).
pub fn sum(cursor: &mut dyn Cursor) -> EngineResult<Value> {
    let mut acc = Value::Integer(0);
    while cursor.valid()? {
        let value = cursor.current()?;
        acc = acc.add(&value)?;
        cursor.next()?;
    }
    Ok(acc)
}

/// Numeric mean over one traversal.
pub fn average(cursor: &mut dyn Cursor) -> EngineResult<Value> {
    let mut total = 0.0;
    let mut seen = 0usize;
    while cursor.valid()? {
        total += cursor.current()?.as_f64()?;
        seen += 1;
        cursor.next()?;
    }
    if seen == 0 {
        return Err(EngineError::empty_sequence("average"));
    }
    Ok(Value::Float(total / seen as f64))
}

/// Smallest element under the comparer's ordering.
pub fn min(cursor: &mut dyn Cursor, comparer: &Comparer) -> EngineResult<Value> {
    extremum(cursor, comparer, "min", std::cmp::Ordering::Less)
}

/// Largest element under the comparer's ordering.
pub fn max(cursor: &mut dyn Cursor, comparer: &Comparer) -> EngineResult<Value> {
    extremum(cursor, comparer, "max", std::cmp::Ordering::Greater)
}

fn extremum(
    cursor: &mut dyn Cursor,
    comparer: &Comparer,
    operation: &str,
    keep: std::cmp::Ordering,
) -> EngineResult<Value> {
    if !cursor.valid()? {
        return Err(EngineError::empty_sequence(operation));
    }
    let mut best = cursor.current()?;
    cursor.next()?;
    while cursor.valid()? {
        let candidate = cursor.current()?;
        if comparer.compare(&candidate, &best)? == keep {
            best = candidate;
        }
        cursor.next()?;
    }
    Ok(best)
}

/// First element; error over an empty sequence.
pub fn first(cursor: &mut dyn Cursor) -> EngineResult<Value> {
    if !cursor.valid()? {
        return Err(EngineError::empty_sequence("first"));
    }
    cursor.current()
}

/// First element, or None over an empty sequence.
pub fn first_or_default(cursor: &mut dyn Cursor) -> EngineResult<Option<Value>> {
    if !cursor.valid()? {
        return Ok(None);
    }
    Ok(Some(cursor.current()?))
}

/// The only element. Zero elements and more-than-one are distinct failure
/// kinds; the second match short-circuits the traversal.
pub fn single(cursor: &mut dyn Cursor) -> EngineResult<Value> {
    match single_or_default(cursor, "single")? {
        Some(value) => Ok(value),
        None => Err(EngineError::empty_sequence("single")),
    }
}

/// The only element, or None when there is none. More than one element is
/// still an error.
pub fn single_or_default(cursor: &mut dyn Cursor, operation: &str) -> EngineResult<Option<Value>> {
    if !cursor.valid()? {
        return Ok(None);
    }
    let value = cursor.current()?;
    cursor.next()?;
    if cursor.valid()? {
        return Err(EngineError::ambiguous_match(operation, 2));
    }
    Ok(Some(value))
}

/// True when at least one element exists.
pub fn any(cursor: &mut dyn Cursor) -> EngineResult<bool> {
    cursor.valid()
}

/// True when every element satisfies the predicate; short-circuits on the
/// first failure.
pub fn all(cursor: &mut dyn Cursor, predicate: &Predicate) -> EngineResult<bool> {
    while cursor.valid()? {
        let value = cursor.current()?;
        let key = cursor.key()?;
        if !predicate(&value, &key)? {
            return Ok(false);
        }
        cursor.next()?;
    }
    Ok(true)
}

/// Membership test under the comparer; short-circuits on the first hit.
pub fn contains(cursor: &mut dyn Cursor, target: &Value, comparer: &Comparer) -> EngineResult<bool> {
    while cursor.valid()? {
        if comparer.equals(&cursor.current()?, target)? {
            return Ok(true);
        }
        cursor.next()?;
    }
    Ok(false)
}

/// Lock-step pairwise equality. Unequal lengths are inequality; the first
/// pairwise mismatch returns false immediately.
pub fn sequence_equal(
    left: &mut dyn Cursor,
    right: &mut dyn Cursor,
    comparer: &Comparer,
) -> EngineResult<bool> {
    loop {
        let left_valid = left.valid()?;
        let right_valid = right.valid()?;
        if left_valid != right_valid {
            return Ok(false);
        }
        if !left_valid {
            return Ok(true);
        }
        if !comparer.equals(&left.current()?, &right.current()?)? {
            return Ok(false);
        }
        left.next()?;
        right.next()?;
    }
}

/// Fully materializes the values, discarding keys.
pub fn to_values(cursor: &mut dyn Cursor) -> EngineResult<Vec<Value>> {
    let mut values = Vec::new();
    while cursor.valid()? {
        values.push(cursor.current()?);
        cursor.next()?;
    }
    Ok(values)
}

/// Fully materializes `(key, value)` pairs in traversal order.
pub fn to_pairs(cursor: &mut dyn Cursor) -> EngineResult<Vec<Entry>> {
    let mut pairs = Vec::new();
    while cursor.valid()? {
        pairs.push((cursor.key()?, cursor.current()?));
        cursor.next()?;
    }
    Ok(pairs)
}

/// Fully materializes into a map under textually-rendered keys.
///
/// Keys must be scalar or textually representable; a later duplicate key
/// overwrites the earlier entry.
pub fn to_map(cursor: &mut dyn Cursor) -> EngineResult<HashMap<String, Value>> {
    let mut map = HashMap::new();
    while cursor.valid()? {
        let key = cursor.key()?.key_string()?;
        map.insert(key, cursor.current()?);
        cursor.next()?;
    }
    Ok(map)
}
