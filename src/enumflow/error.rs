/*!
# Engine Error Handling

This module provides error handling for the enumeration engine. All terminal
operations return well-structured errors with context information for
debugging and user feedback.

## Error Categories

- **Empty Sequence**: element-requiring reducers invoked over zero matches
- **Ambiguous Match**: single-element reducers finding more than one match
- **Key Errors**: materializing with keys that cannot be represented
- **Argument Errors**: out-of-domain operator arguments (chunk size, counts)
- **Type Errors**: value type mismatches during comparison or arithmetic
- **Source Errors**: re-enumerating an exhausted one-shot source
- **Evaluation Errors**: invalid cursor reads and user callback failures

## Error Timing

Every error is raised synchronously and lazily: at the moment traversal
reaches the violating state, never while the operator pipeline is being
composed. There are no retries; a raised error aborts the in-progress
terminal operation and any combinator state accumulated before it is
discarded.

## Examples

```rust
use enumflow::EngineError;

let error = EngineError::empty_sequence("first");
println!("{}", error); // "Empty sequence: 'first' requires at least one element"

let error = EngineError::type_error("numeric", "String", Some("abc".to_string()));
println!("{}", error); // "Type error: expected numeric, got String for value 'abc'"
```
*/

use std::fmt;

/// Error types for enumeration and reduction operations.
///
/// Each variant carries the context relevant to its failure mode. Errors are
/// raised at traversal time only; composing a pipeline never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An element-requiring reducer ran over a sequence with no matching
    /// elements.
    EmptySequence {
        /// Name of the reducer that required an element
        operation: String,
    },

    /// A single-element reducer matched more than one element.
    AmbiguousMatch {
        /// Name of the reducer
        operation: String,
        /// Number of matches observed before short-circuiting (always >= 2)
        matches: usize,
    },

    /// A materializing operation met a key that is neither scalar nor
    /// textually representable.
    InvalidKey {
        /// Description of the failure
        message: String,
        /// Type name of the offending key, if available
        key_type: Option<String>,
    },

    /// An operator received an out-of-domain argument.
    InvalidArgument {
        /// Description of the constraint that was violated
        message: String,
        /// The offending argument, rendered, if available
        argument: Option<String>,
    },

    /// A value had the wrong type for a comparison or arithmetic operation.
    TypeError {
        /// Expected type description
        expected: String,
        /// Actual type encountered
        actual: String,
        /// The value that caused the error, if available
        value: Option<String>,
    },

    /// A one-shot source was enumerated again after exhaustion without a
    /// buffering cache in between.
    SourceExhausted {
        /// Description of the source and how it was consumed
        message: String,
    },

    /// A cursor was read while invalid, or a user callback failed.
    EvaluationError {
        /// Description of the failure
        message: String,
        /// Name of the operation in progress, if available
        operation: Option<String>,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::EmptySequence { operation } => {
                write!(
                    f,
                    "Empty sequence: '{}' requires at least one element",
                    operation
                )
            }
            EngineError::AmbiguousMatch { operation, matches } => {
                write!(
                    f,
                    "Ambiguous match: '{}' expected exactly one element, found {}",
                    operation, matches
                )
            }
            EngineError::InvalidKey { message, key_type } => {
                if let Some(kt) = key_type {
                    write!(f, "Invalid key of type {}: {}", kt, message)
                } else {
                    write!(f, "Invalid key: {}", message)
                }
            }
            EngineError::InvalidArgument { message, argument } => {
                if let Some(arg) = argument {
                    write!(f, "Invalid argument {}: {}", arg, message)
                } else {
                    write!(f, "Invalid argument: {}", message)
                }
            }
            EngineError::TypeError {
                expected,
                actual,
                value,
            } => {
                if let Some(val) = value {
                    write!(
                        f,
                        "Type error: expected {}, got {} for value '{}'",
                        expected, actual, val
                    )
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, actual)
                }
            }
            EngineError::SourceExhausted { message } => {
                write!(f, "Source exhausted: {}", message)
            }
            EngineError::EvaluationError { message, operation } => {
                if let Some(op) = operation {
                    write!(f, "Evaluation error in '{}': {}", op, message)
                } else {
                    write!(f, "Evaluation error: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// Create an empty-sequence error for the named operation
    pub fn empty_sequence(operation: impl Into<String>) -> Self {
        EngineError::EmptySequence {
            operation: operation.into(),
        }
    }

    /// Create an ambiguous-match error for the named operation
    pub fn ambiguous_match(operation: impl Into<String>, matches: usize) -> Self {
        EngineError::AmbiguousMatch {
            operation: operation.into(),
            matches,
        }
    }

    /// Create an invalid-key error
    pub fn invalid_key(message: impl Into<String>, key_type: Option<String>) -> Self {
        EngineError::InvalidKey {
            message: message.into(),
            key_type,
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>, argument: Option<String>) -> Self {
        EngineError::InvalidArgument {
            message: message.into(),
            argument,
        }
    }

    /// Create a type error
    pub fn type_error(
        expected: impl Into<String>,
        actual: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        EngineError::TypeError {
            expected: expected.into(),
            actual: actual.into(),
            value,
        }
    }

    /// Create a source-exhausted error
    pub fn source_exhausted(message: impl Into<String>) -> Self {
        EngineError::SourceExhausted {
            message: message.into(),
        }
    }

    /// Create an evaluation error
    pub fn evaluation_error(message: impl Into<String>, operation: Option<String>) -> Self {
        EngineError::EvaluationError {
            message: message.into(),
            operation,
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
