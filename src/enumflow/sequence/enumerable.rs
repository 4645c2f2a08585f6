//! The chainable sequence facade.
//!
//! An [`Enumerable`] is an immutable, cheap-to-clone handle over a
//! cursor-producing source. Every chain method allocates a new facade
//! wrapping a new combinator cursor factory around the previous head; no
//! operator ever mutates the receiver, and no source data is touched until a
//! terminal operation pulls.
//!
//! Sources come in three rewind policies, fixed by constructor:
//! - rewindable containers ([`Enumerable::from_values`],
//!   [`Enumerable::from_pairs`], [`Enumerable::from_map`]) build a fresh
//!   cursor per traversal;
//! - one-shot producers ([`Enumerable::from_iter`], [`Enumerable::from_fn`])
//!   are transparently wrapped in the buffering cache on first traversal,
//!   through a single-assignment cell, so the facade stays re-enumerable;
//! - raw cursors ([`Enumerable::from_cursor`]) are handed out exactly once
//!   and fail with a source-exhausted error on a second traversal.

use crate::enumflow::aggregate;
use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::cache::{CacheCursor, SharedCache};
use crate::enumflow::cursor::concat::ConcatCursor;
use crate::enumflow::cursor::filter::FilterCursor;
use crate::enumflow::cursor::flip::FlipCursor;
use crate::enumflow::cursor::join::{JoinCursor, ZipCursor};
use crate::enumflow::cursor::ordered::SortRule;
use crate::enumflow::cursor::select::{ReindexCursor, SelectCursor};
use crate::enumflow::cursor::setops::{SetFilterCursor, SetFilterMode};
use crate::enumflow::cursor::source::{IterCursor, PairsCursor};
use crate::enumflow::cursor::unique::UniqueCursor;
use crate::enumflow::cursor::window::{
    ChunkCursor, SkipCursor, SkipLastCursor, SkipWhileCursor, TakeCursor, TakeLastCursor,
    TakeWhileCursor,
};
use crate::enumflow::cursor::{Cursor, CursorIter, Entry, Predicate, Selector};
use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::sequence::grouping::GroupedEnumerable;
use crate::enumflow::sequence::ordered::OrderedEnumerable;
use crate::enumflow::value::Value;
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Factory producing a fresh head cursor per traversal.
pub(crate) type CursorFactory = Rc<dyn Fn() -> EngineResult<Box<dyn Cursor>>>;

/// One-shot source state: the producer cursor until first traversal, the
/// buffering cache afterwards.
struct OneShotCell {
    producer: RefCell<Option<Box<dyn Cursor>>>,
    cache: OnceCell<Rc<SharedCache>>,
}

#[derive(Clone)]
enum Source {
    Reusable(CursorFactory),
    OneShot(Rc<OneShotCell>),
    Consumable(Rc<RefCell<Option<Box<dyn Cursor>>>>),
}

/// Lazy, chainable sequence of `(key, value)` entries.
///
/// List-style construction assigns dense ascending integer keys; keyed
/// construction carries arbitrary scalar keys. Combinators preserve keys
/// unless documented otherwise; `values()` re-indexes.
#[derive(Clone)]
pub struct Enumerable {
    source: Source,
}

impl Enumerable {
    // ---- construction ----------------------------------------------------

    /// Sequence over owned values under dense ascending integer keys.
    pub fn from_values(values: Vec<Value>) -> Self {
        let entries: Vec<Entry> = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Value::Integer(i as i64), v))
            .collect();
        Enumerable::from_pairs(entries)
    }

    /// Sequence over explicit `(key, value)` pairs.
    pub fn from_pairs(entries: Vec<Entry>) -> Self {
        let shared = Rc::new(entries);
        Enumerable::from_factory(Rc::new(move || {
            Ok(Box::new(PairsCursor::new(shared.clone())) as Box<dyn Cursor>)
        }))
    }

    /// Sequence over a map's entries, keys as strings.
    ///
    /// Iteration order follows the map and is therefore unspecified; use
    /// [`Enumerable::from_pairs`] when order matters.
    pub fn from_map(map: HashMap<String, Value>) -> Self {
        let entries: Vec<Entry> = map
            .into_iter()
            .map(|(k, v)| (Value::String(k), v))
            .collect();
        Enumerable::from_pairs(entries)
    }

    /// The empty sequence.
    pub fn empty() -> Self {
        Enumerable::from_pairs(Vec::new())
    }

    /// Sequence over a one-shot Rust iterator.
    ///
    /// The iterator is consumed once; the facade wraps it in the buffering
    /// cache on first traversal and stays re-enumerable.
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Value> + 'static,
        I::IntoIter: 'static,
    {
        let cursor = IterCursor::new(Box::new(iter.into_iter()));
        Enumerable {
            source: Source::OneShot(Rc::new(OneShotCell {
                producer: RefCell::new(Some(Box::new(cursor))),
                cache: OnceCell::new(),
            })),
        }
    }

    /// Sequence over a producer function pulled until it returns `None`.
    /// Cached on first traversal, like [`Enumerable::from_iter`].
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut() -> Option<Value> + 'static,
    {
        Enumerable::from_iter(std::iter::from_fn(f))
    }

    /// Sequence over a raw cursor, handed out exactly once.
    ///
    /// A second traversal fails with a source-exhausted error rather than
    /// yielding silent emptiness.
    pub fn from_cursor(cursor: Box<dyn Cursor>) -> Self {
        Enumerable {
            source: Source::Consumable(Rc::new(RefCell::new(Some(cursor)))),
        }
    }

    pub(crate) fn from_factory(factory: CursorFactory) -> Self {
        Enumerable {
            source: Source::Reusable(factory),
        }
    }

    // ---- traversal entry points ------------------------------------------

    /// Builds the head cursor for one traversal.
    ///
    /// This is the `getIterator()` entry point: rewindable sources build a
    /// fresh cursor, one-shot sources are wrapped in the buffering cache on
    /// the first call, raw cursors are surrendered once.
    pub fn cursor(&self) -> EngineResult<Box<dyn Cursor>> {
        match &self.source {
            Source::Reusable(factory) => factory(),
            Source::OneShot(cell) => {
                let cache = match cell.cache.get() {
                    Some(cache) => cache.clone(),
                    None => {
                        let producer = cell
                            .producer
                            .borrow_mut()
                            .take()
                            .expect("one-shot producer consumed without cache");
                        log::debug!("wrapping one-shot source in buffering cache");
                        let cache = SharedCache::new(producer);
                        let _ = cell.cache.set(cache.clone());
                        cache
                    }
                };
                Ok(Box::new(CacheCursor::new(cache)))
            }
            Source::Consumable(slot) => slot.borrow_mut().take().ok_or_else(|| {
                EngineError::source_exhausted(
                    "raw cursor source was already enumerated and cannot be traversed again",
                )
            }),
        }
    }

    /// Standard fallible iterator over `(key, value)` entries.
    pub fn iter(&self) -> SequenceIter {
        match self.cursor() {
            Ok(cursor) => SequenceIter::Ready(CursorIter::new(cursor)),
            Err(err) => SequenceIter::Failed(Some(err)),
        }
    }

    /// Wraps this facade's head cursor in another combinator.
    fn derive<F>(&self, build: F) -> Enumerable
    where
        F: Fn(Box<dyn Cursor>) -> EngineResult<Box<dyn Cursor>> + 'static,
    {
        let parent = self.clone();
        Enumerable::from_factory(Rc::new(move || build(parent.cursor()?)))
    }

    // ---- projection ------------------------------------------------------

    /// Projects each element through `(value, key) -> value`, keys
    /// preserved.
    pub fn select<F>(&self, selector: F) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        let selector: Selector = Rc::new(selector);
        self.derive(move |inner| {
            Ok(Box::new(SelectCursor::new(inner, selector.clone(), None)) as Box<dyn Cursor>)
        })
    }

    /// Projects elements and keys in one pass.
    pub fn select_with_key<F, K>(&self, selector: F, key_selector: K) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
        K: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        let selector: Selector = Rc::new(selector);
        let key_selector: Selector = Rc::new(key_selector);
        self.derive(move |inner| {
            Ok(Box::new(SelectCursor::new(
                inner,
                selector.clone(),
                Some(key_selector.clone()),
            )) as Box<dyn Cursor>)
        })
    }

    /// Keeps elements satisfying `(value, key) -> bool`.
    pub fn filter<F>(&self, predicate: F) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<bool> + 'static,
    {
        let predicate: Predicate = Rc::new(predicate);
        self.derive(move |inner| {
            Ok(Box::new(FilterCursor::new(inner, predicate.clone())) as Box<dyn Cursor>)
        })
    }

    /// Keeps entries whose key satisfies the predicate: a Flip, a value
    /// filter, and a Flip back.
    pub fn filter_keys<F>(&self, predicate: F) -> Enumerable
    where
        F: Fn(&Value) -> EngineResult<bool> + 'static,
    {
        self.flip().filter(move |v, _k| predicate(v)).flip()
    }

    /// Swaps key and value roles on each pull.
    pub fn flip(&self) -> Enumerable {
        self.derive(|inner| Ok(Box::new(FlipCursor::new(inner)) as Box<dyn Cursor>))
    }

    /// The keys, as a value sequence under dense integer keys.
    pub fn keys(&self) -> Enumerable {
        self.flip().values()
    }

    /// The values, re-indexed under dense ascending integer keys.
    pub fn values(&self) -> Enumerable {
        self.derive(|inner| Ok(Box::new(ReindexCursor::new(inner)) as Box<dyn Cursor>))
    }

    // ---- distinctness ----------------------------------------------------

    /// Suppresses duplicate elements, identity equality, first-seen wins.
    pub fn distinct(&self) -> Enumerable {
        self.distinct_with(|v, _k| Ok(v.clone()), Comparer::identity())
    }

    /// Suppresses elements sharing a projected key, identity equality.
    pub fn distinct_by<F>(&self, selector: F) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.distinct_with(selector, Comparer::identity())
    }

    /// Distinct primitive: projected keys compared through an explicit
    /// comparer.
    pub fn distinct_with<F>(&self, selector: F, comparer: Comparer) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        let selector: Selector = Rc::new(selector);
        self.derive(move |inner| {
            Ok(
                Box::new(UniqueCursor::new(inner, selector.clone(), comparer.clone()))
                    as Box<dyn Cursor>,
            )
        })
    }

    // ---- set algebra -----------------------------------------------------

    /// Elements of either sequence, duplicates suppressed, first-seen order
    /// preserved. Streams the concatenation through the distinct
    /// combinator.
    pub fn union(&self, other: &Enumerable) -> Enumerable {
        self.union_by(other, |v, _k| Ok(v.clone()), Comparer::identity())
    }

    /// Union primitive over projected keys and an explicit comparer.
    pub fn union_by<F>(&self, other: &Enumerable, selector: F, comparer: Comparer) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.concat(other).distinct_with(selector, comparer)
    }

    /// Elements of this sequence absent from `other`.
    pub fn except(&self, other: &Enumerable) -> Enumerable {
        self.except_by(other, |v, _k| Ok(v.clone()), Comparer::identity())
    }

    /// Except primitive over projected keys and an explicit comparer.
    pub fn except_by<F>(&self, other: &Enumerable, selector: F, comparer: Comparer) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.set_filter(other, selector, comparer, SetFilterMode::Drop)
    }

    /// Elements of this sequence present in `other`.
    pub fn intersect(&self, other: &Enumerable) -> Enumerable {
        self.intersect_by(other, |v, _k| Ok(v.clone()), Comparer::identity())
    }

    /// Intersect primitive over projected keys and an explicit comparer.
    pub fn intersect_by<F>(&self, other: &Enumerable, selector: F, comparer: Comparer) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.set_filter(other, selector, comparer, SetFilterMode::Keep)
    }

    fn set_filter<F>(
        &self,
        other: &Enumerable,
        selector: F,
        comparer: Comparer,
        mode: SetFilterMode,
    ) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        let selector: Selector = Rc::new(selector);
        let other = other.clone();
        self.derive(move |inner| {
            Ok(Box::new(SetFilterCursor::new(
                inner,
                other.cursor()?,
                selector.clone(),
                selector.clone(),
                comparer.clone(),
                mode,
            )) as Box<dyn Cursor>)
        })
    }

    /// This sequence followed by `other`, keys preserved from both sides.
    pub fn concat(&self, other: &Enumerable) -> Enumerable {
        let other = other.clone();
        self.derive(move |inner| {
            Ok(Box::new(ConcatCursor::new(inner, other.cursor()?)) as Box<dyn Cursor>)
        })
    }

    // ---- windowing -------------------------------------------------------

    /// At most the first `count` elements.
    pub fn take(&self, count: usize) -> Enumerable {
        self.derive(move |inner| Ok(Box::new(TakeCursor::new(inner, count)) as Box<dyn Cursor>))
    }

    /// Everything after the first `count` elements.
    pub fn skip(&self, count: usize) -> Enumerable {
        self.derive(move |inner| Ok(Box::new(SkipCursor::new(inner, count)) as Box<dyn Cursor>))
    }

    /// Leading elements while the predicate holds.
    pub fn take_while<F>(&self, predicate: F) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<bool> + 'static,
    {
        let predicate: Predicate = Rc::new(predicate);
        self.derive(move |inner| {
            Ok(Box::new(TakeWhileCursor::new(inner, predicate.clone())) as Box<dyn Cursor>)
        })
    }

    /// Everything from the first element failing the predicate onwards.
    pub fn skip_while<F>(&self, predicate: F) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<bool> + 'static,
    {
        let predicate: Predicate = Rc::new(predicate);
        self.derive(move |inner| {
            Ok(Box::new(SkipWhileCursor::new(inner, predicate.clone())) as Box<dyn Cursor>)
        })
    }

    /// The trailing `count` elements; shorter sequences are yielded whole.
    pub fn take_last(&self, count: usize) -> Enumerable {
        self.derive(move |inner| Ok(Box::new(TakeLastCursor::new(inner, count)) as Box<dyn Cursor>))
    }

    /// Everything but the trailing `count` elements; shorter sequences
    /// yield nothing.
    pub fn skip_last(&self, count: usize) -> Enumerable {
        self.derive(move |inner| Ok(Box::new(SkipLastCursor::new(inner, count)) as Box<dyn Cursor>))
    }

    /// Fixed-size `Array` chunks under dense integer keys; the final chunk
    /// may be shorter. `size` must be positive.
    pub fn chunk(&self, size: usize) -> Enumerable {
        self.derive(move |inner| Ok(Box::new(ChunkCursor::new(inner, size)) as Box<dyn Cursor>))
    }

    // ---- pairwise --------------------------------------------------------

    /// Nested-loop equality join against `inner`, value-mode key equality.
    pub fn join<FO, FI, FR>(
        &self,
        inner: &Enumerable,
        outer_key_selector: FO,
        inner_key_selector: FI,
        result_selector: FR,
    ) -> Enumerable
    where
        FO: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
        FI: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
        FR: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.join_with(
            inner,
            outer_key_selector,
            inner_key_selector,
            result_selector,
            Comparer::value(),
        )
    }

    /// Join primitive with an explicit comparer over the projected keys.
    pub fn join_with<FO, FI, FR>(
        &self,
        inner: &Enumerable,
        outer_key_selector: FO,
        inner_key_selector: FI,
        result_selector: FR,
        comparer: Comparer,
    ) -> Enumerable
    where
        FO: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
        FI: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
        FR: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        let outer_key: Selector = Rc::new(outer_key_selector);
        let inner_key: Selector = Rc::new(inner_key_selector);
        let result: Selector = Rc::new(result_selector);
        let inner = inner.clone();
        self.derive(move |outer| {
            Ok(Box::new(JoinCursor::new(
                outer,
                inner.cursor()?,
                outer_key.clone(),
                inner_key.clone(),
                result.clone(),
                comparer.clone(),
            )) as Box<dyn Cursor>)
        })
    }

    /// Lock-step pairing with `other`, stopping at the shorter sequence.
    pub fn zip<F>(&self, other: &Enumerable, result_selector: F) -> Enumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        let result: Selector = Rc::new(result_selector);
        let other = other.clone();
        self.derive(move |left| {
            Ok(Box::new(ZipCursor::new(left, other.cursor()?, result.clone())) as Box<dyn Cursor>)
        })
    }

    // ---- ordering and grouping -------------------------------------------

    /// Ascending stable sort by a projected key, natural ordering.
    pub fn order_by<F>(&self, selector: F) -> OrderedEnumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.order_by_with(selector, Comparer::value())
    }

    /// Descending stable sort: the same comparer behind the inverting
    /// adapter.
    pub fn order_by_descending<F>(&self, selector: F) -> OrderedEnumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.order_by_with(selector, Comparer::value().invert())
    }

    /// Ordering primitive with an explicit comparer.
    pub fn order_by_with<F>(&self, selector: F, comparer: Comparer) -> OrderedEnumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        OrderedEnumerable::new(
            self.clone(),
            SortRule {
                selector: Rc::new(selector),
                comparer,
            },
        )
    }

    /// Partitions into first-seen-ordered groups, identity key equality.
    pub fn group_by<F>(&self, selector: F) -> GroupedEnumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.group_by_with(selector, Comparer::identity())
    }

    /// Grouping primitive with an explicit comparer over group keys.
    pub fn group_by_with<F>(&self, selector: F, comparer: Comparer) -> GroupedEnumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        GroupedEnumerable::new(self.clone(), Rc::new(selector), comparer)
    }

    // ---- terminal reducers -----------------------------------------------

    /// Folds the sequence with an explicit seed.
    pub fn aggregate<F>(&self, seed: Value, f: F) -> EngineResult<Value>
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        aggregate::fold(self.cursor()?.as_mut(), seed, &f)
    }

    /// Seedless fold; the first element seeds the accumulator.
    pub fn reduce<F>(&self, f: F) -> EngineResult<Value>
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        aggregate::reduce(self.cursor()?.as_mut(), &f)
    }

    /// Element count, via the count capability when the head cursor has one.
    pub fn count(&self) -> EngineResult<usize> {
        aggregate::count(self.cursor()?.as_mut())
    }

    /// Numeric sum; empty sequences sum to zero.
    pub fn sum(&self) -> EngineResult<Value> {
        aggregate::sum(self.cursor()?.as_mut())
    }

    /// Numeric sum of a projection.
    pub fn sum_by<F>(&self, selector: F) -> EngineResult<Value>
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.select(selector).sum()
    }

    /// Numeric mean; errors over an empty sequence.
    pub fn average(&self) -> EngineResult<Value> {
        aggregate::average(self.cursor()?.as_mut())
    }

    /// Numeric mean of a projection.
    pub fn average_by<F>(&self, selector: F) -> EngineResult<Value>
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.select(selector).average()
    }

    /// Smallest element under natural ordering.
    pub fn min(&self) -> EngineResult<Value> {
        self.min_with(Comparer::value())
    }

    /// Smallest element under an explicit comparer.
    pub fn min_with(&self, comparer: Comparer) -> EngineResult<Value> {
        aggregate::min(self.cursor()?.as_mut(), &comparer)
    }

    /// Largest element under natural ordering.
    pub fn max(&self) -> EngineResult<Value> {
        self.max_with(Comparer::value())
    }

    /// Largest element under an explicit comparer.
    pub fn max_with(&self, comparer: Comparer) -> EngineResult<Value> {
        aggregate::max(self.cursor()?.as_mut(), &comparer)
    }

    /// First element; errors over an empty sequence.
    pub fn first(&self) -> EngineResult<Value> {
        aggregate::first(self.cursor()?.as_mut())
    }

    /// First element, or `None` over an empty sequence.
    pub fn first_or_default(&self) -> EngineResult<Option<Value>> {
        aggregate::first_or_default(self.cursor()?.as_mut())
    }

    /// The only element; zero elements and more than one are distinct
    /// errors.
    pub fn single(&self) -> EngineResult<Value> {
        aggregate::single(self.cursor()?.as_mut())
    }

    /// The only element, or `None` when empty; more than one is still an
    /// error.
    pub fn single_or_default(&self) -> EngineResult<Option<Value>> {
        aggregate::single_or_default(self.cursor()?.as_mut(), "single_or_default")
    }

    /// True when the sequence has at least one element.
    pub fn any(&self) -> EngineResult<bool> {
        aggregate::any(self.cursor()?.as_mut())
    }

    /// True when any element satisfies the predicate; short-circuits.
    pub fn any_match<F>(&self, predicate: F) -> EngineResult<bool>
    where
        F: Fn(&Value, &Value) -> EngineResult<bool> + 'static,
    {
        self.filter(predicate).any()
    }

    /// True when every element satisfies the predicate; short-circuits on
    /// the first failure.
    pub fn all<F>(&self, predicate: F) -> EngineResult<bool>
    where
        F: Fn(&Value, &Value) -> EngineResult<bool> + 'static,
    {
        let predicate: Predicate = Rc::new(predicate);
        aggregate::all(self.cursor()?.as_mut(), &predicate)
    }

    /// Membership under value equality.
    pub fn contains(&self, target: &Value) -> EngineResult<bool> {
        self.contains_with(target, Comparer::value())
    }

    /// Membership under an explicit comparer.
    pub fn contains_with(&self, target: &Value, comparer: Comparer) -> EngineResult<bool> {
        aggregate::contains(self.cursor()?.as_mut(), target, &comparer)
    }

    /// Lock-step pairwise equality with `other`, value mode.
    pub fn sequence_equal(&self, other: &Enumerable) -> EngineResult<bool> {
        self.sequence_equal_with(other, Comparer::value())
    }

    /// Pairwise equality under an explicit comparer.
    pub fn sequence_equal_with(
        &self,
        other: &Enumerable,
        comparer: Comparer,
    ) -> EngineResult<bool> {
        aggregate::sequence_equal(self.cursor()?.as_mut(), other.cursor()?.as_mut(), &comparer)
    }

    /// Materializes the values in traversal order, discarding keys.
    pub fn to_values(&self) -> EngineResult<Vec<Value>> {
        aggregate::to_values(self.cursor()?.as_mut())
    }

    /// Materializes `(key, value)` pairs in traversal order.
    pub fn to_pairs(&self) -> EngineResult<Vec<Entry>> {
        aggregate::to_pairs(self.cursor()?.as_mut())
    }

    /// Materializes into a map under textually-rendered keys.
    ///
    /// Errors with an invalid-key failure when a key is neither scalar nor
    /// textually representable.
    pub fn to_map(&self) -> EngineResult<HashMap<String, Value>> {
        aggregate::to_map(self.cursor()?.as_mut())
    }
}

impl std::fmt::Debug for Enumerable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            Source::Reusable(_) => "reusable",
            Source::OneShot(_) => "one-shot",
            Source::Consumable(_) => "consumable",
        };
        f.debug_struct("Enumerable").field("source", &source).finish()
    }
}

/// Fallible entry iterator behind [`Enumerable::iter`].
pub enum SequenceIter {
    Ready(CursorIter),
    Failed(Option<EngineError>),
}

impl Iterator for SequenceIter {
    type Item = EngineResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SequenceIter::Ready(iter) => iter.next(),
            SequenceIter::Failed(err) => err.take().map(Err),
        }
    }
}

impl IntoIterator for &Enumerable {
    type Item = EngineResult<Entry>;
    type IntoIter = SequenceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
