//! Ordered sequence facade.
//!
//! An [`OrderedEnumerable`] remembers the unsorted source and its chain of
//! sort rules, so `then_by` adds a stable secondary rule over the
//! already-established order instead of re-sorting blind. For everything
//! else it dereferences to a plain [`Enumerable`] view over the sorted
//! result, so the full operator set chains straight off an ordering.

use crate::enumflow::comparer::Comparer;
use crate::enumflow::cursor::ordered::{OrderedCursor, SortRule};
use crate::enumflow::cursor::Cursor;
use crate::enumflow::sequence::enumerable::Enumerable;
use crate::enumflow::error::EngineResult;
use crate::enumflow::value::Value;
use std::ops::Deref;
use std::rc::Rc;

#[derive(Clone)]
pub struct OrderedEnumerable {
    source: Enumerable,
    rules: Rc<Vec<SortRule>>,
    view: Enumerable,
}

impl OrderedEnumerable {
    pub(crate) fn new(source: Enumerable, rule: SortRule) -> Self {
        OrderedEnumerable::with_rules(source, Rc::new(vec![rule]))
    }

    fn with_rules(source: Enumerable, rules: Rc<Vec<SortRule>>) -> Self {
        let view_source = source.clone();
        let view_rules = rules.clone();
        let view = Enumerable::from_factory(Rc::new(move || {
            Ok(Box::new(OrderedCursor::new(
                view_source.cursor()?,
                view_rules.as_ref().clone(),
            )) as Box<dyn Cursor>)
        }));
        OrderedEnumerable {
            source,
            rules,
            view,
        }
    }

    /// Adds an ascending secondary sort rule, natural ordering.
    pub fn then_by<F>(&self, selector: F) -> OrderedEnumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.then_by_with(selector, Comparer::value())
    }

    /// Adds a descending secondary rule: the comparer behind the inverting
    /// adapter.
    pub fn then_by_descending<F>(&self, selector: F) -> OrderedEnumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        self.then_by_with(selector, Comparer::value().invert())
    }

    /// Secondary sort primitive with an explicit comparer.
    pub fn then_by_with<F>(&self, selector: F, comparer: Comparer) -> OrderedEnumerable
    where
        F: Fn(&Value, &Value) -> EngineResult<Value> + 'static,
    {
        let mut rules = self.rules.as_ref().clone();
        rules.push(SortRule {
            selector: Rc::new(selector),
            comparer,
        });
        OrderedEnumerable::with_rules(self.source.clone(), Rc::new(rules))
    }

    /// The sorted result as a plain sequence.
    pub fn as_enumerable(&self) -> Enumerable {
        self.view.clone()
    }
}

impl Deref for OrderedEnumerable {
    type Target = Enumerable;

    fn deref(&self) -> &Self::Target {
        &self.view
    }
}

impl std::fmt::Debug for OrderedEnumerable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedEnumerable")
            .field("rules", &self.rules.len())
            .finish()
    }
}
