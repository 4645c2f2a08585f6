//! # enumflow
//!
//! A lazy, composable enumeration/query engine: chainable sequence facades
//! over a uniform cursor protocol, with deferred execution, stable multi-key
//! ordering, pluggable equality/ordering, set algebra, windowing, nested-loop
//! joins and short-circuiting terminal reducers.
//!
//! ## Features
//!
//! - **Deferred Execution**: composing a pipeline touches no source data;
//!   selectors and predicates run only when a terminal operation pulls
//! - **Keyed Sequences**: every element carries a key: dense integers for
//!   list-like sources, arbitrary scalars for keyed sources
//! - **Pluggable Comparers**: value equality with numeric coercion, strict
//!   identity equality, or user callbacks; descending order is an inverting
//!   adapter over any comparer
//! - **One-Shot Sources**: producer-backed sequences are wrapped in a
//!   buffering cache on first traversal and stay re-enumerable
//! - **Short-Circuiting Reducers**: `first`, `single`, `any`, `all` stop
//!   pulling as soon as the answer is determined
//!
//! ## Quick Start
//!
//! ```rust
//! use enumflow::{Enumerable, Value};
//!
//! let numbers = Enumerable::from_values((1..=10).map(Value::Integer).collect());
//!
//! let result = numbers
//!     .filter(|v, _k| Ok(matches!(v, Value::Integer(i) if i % 2 == 0)))
//!     .select(|v, _k| v.add(&Value::Integer(100)))
//!     .take(3)
//!     .to_values()
//!     .unwrap();
//!
//! assert_eq!(
//!     result,
//!     vec![Value::Integer(102), Value::Integer(104), Value::Integer(106)]
//! );
//! ```
//!
//! The engine is strictly single-threaded: facades share state via `Rc`,
//! cursors are single-owner mutable state, and early termination is simply
//! the consumer ceasing to pull.

#![allow(clippy::collapsible_if)]
#![allow(clippy::large_enum_variant)]

pub mod enumflow;

pub use enumflow::{
    Comparer, Cursor, CursorIter, EngineError, EngineResult, Entry, Enumerable,
    GroupedEnumerable, Grouping, OrderedEnumerable, SequenceIter, Value,
};
