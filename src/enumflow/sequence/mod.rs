//! Public sequence facades: the chainable, immutable handles users compose
//! pipelines with.

pub mod enumerable;
pub mod grouping;
pub mod ordered;

pub use enumerable::{Enumerable, SequenceIter};
pub use grouping::{GroupedEnumerable, Grouping};
pub use ordered::OrderedEnumerable;
