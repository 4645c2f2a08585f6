// Lazy enumeration engine for enumflow
// Provides the cursor protocol, combinator cursors, sequence facades,
// comparer contract and terminal reducers

pub mod aggregate;
pub mod comparer;
pub mod cursor;
pub mod error;
pub mod sequence;
pub mod value;

// Re-export main API
pub use comparer::Comparer;
pub use cursor::{Cursor, CursorIter, Entry};
pub use error::{EngineError, EngineResult};
pub use sequence::{Enumerable, GroupedEnumerable, Grouping, OrderedEnumerable, SequenceIter};
pub use value::Value;

// Version and feature info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const FEATURES: &[&str] = &[
    "deferred_execution", // pipelines touch no data until a terminal pulls
    "keyed_sequences",    // every entry carries a key; flip, keys, values
    "stable_ordering",    // order_by/then_by with original-index tiebreak
    "grouping",           // first-seen-ordered partitions with group keys
    "set_algebra",        // union, except, intersect over pluggable comparers
    "windowing",          // take/skip families, trailing windows, chunk
    "pairwise",           // join, zip, sequence_equal
    "reducers",           // aggregate, count, sum, average, min, max, first, single
    "one_shot_caching",   // producers auto-wrapped in a buffering cache
];
