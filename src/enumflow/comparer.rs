//! Pluggable equality and ordering.
//!
//! A [`Comparer`] decides whether two values are equal and, where supported,
//! how they order. Two built-in modes cover the common cases:
//!
//! - **value mode** ([`Comparer::value`]): equality with numeric coercion,
//!   ordering deferred to the value's own 3-way comparison capability
//!   ([`Value::try_compare`]). The default for lookups and `sequence_equal`.
//! - **identity mode** ([`Comparer::identity`]): exact equality with strict
//!   type matching and no coercion. The default for distinct and the set
//!   operators.
//!
//! Custom comparers wrap a user callback: a full 3-way ordering function
//! ([`Comparer::from_fn`]) or an equality-only predicate
//! ([`Comparer::from_eq`]). Descending order is always expressed by wrapping
//! a comparer in the inverting adapter ([`Comparer::invert`]), never by a
//! separate sort algorithm.

use crate::enumflow::error::{EngineError, EngineResult};
use crate::enumflow::value::Value;
use std::cmp::Ordering;
use std::rc::Rc;

/// User-supplied 3-way ordering callback.
pub type OrderingFn = Rc<dyn Fn(&Value, &Value) -> EngineResult<Ordering>>;

/// User-supplied equality predicate.
pub type EqualityFn = Rc<dyn Fn(&Value, &Value) -> EngineResult<bool>>;

#[derive(Clone)]
enum ComparerKind {
    Value,
    Identity,
    Ordering(OrderingFn),
    Equality(EqualityFn),
}

/// Pluggable equality/ordering function over [`Value`]s.
///
/// Cheap to clone; operator calls each hold their own handle.
#[derive(Clone)]
pub struct Comparer {
    kind: ComparerKind,
    inverted: bool,
}

impl Comparer {
    /// Value-equality mode: numeric coercion, natural ordering.
    pub fn value() -> Self {
        Comparer {
            kind: ComparerKind::Value,
            inverted: false,
        }
    }

    /// Identity mode: exact equality, strict type matching, no coercion.
    pub fn identity() -> Self {
        Comparer {
            kind: ComparerKind::Identity,
            inverted: false,
        }
    }

    /// Custom comparer from a 3-way ordering function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> EngineResult<Ordering> + 'static,
    {
        Comparer {
            kind: ComparerKind::Ordering(Rc::new(f)),
            inverted: false,
        }
    }

    /// Custom comparer from an equality-only predicate.
    ///
    /// Such a comparer can answer `equals` but not `compare`; using it where
    /// ordering is required is a type error.
    pub fn from_eq<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> EngineResult<bool> + 'static,
    {
        Comparer {
            kind: ComparerKind::Equality(Rc::new(f)),
            inverted: false,
        }
    }

    /// Inverting adapter: flips the result of `compare`.
    ///
    /// Equality is unaffected. Inverting twice restores the original order.
    pub fn invert(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    /// Tests two values for equality under this comparer.
    pub fn equals(&self, left: &Value, right: &Value) -> EngineResult<bool> {
        match &self.kind {
            ComparerKind::Value => Ok(left.eq_value(right)),
            ComparerKind::Identity => Ok(left.eq_identity(right)),
            ComparerKind::Equality(f) => f(left, right),
            ComparerKind::Ordering(f) => Ok(f(left, right)? == Ordering::Equal),
        }
    }

    /// Orders two values under this comparer.
    ///
    /// Built-in modes defer to the value's 3-way comparison capability and
    /// report a type error for incomparable combinations. Equality-only
    /// comparers cannot order.
    pub fn compare(&self, left: &Value, right: &Value) -> EngineResult<Ordering> {
        let ordering = match &self.kind {
            ComparerKind::Value | ComparerKind::Identity => {
                left.try_compare(right).ok_or_else(|| {
                    EngineError::type_error(
                        left.type_name(),
                        right.type_name(),
                        Some(right.to_string()),
                    )
                })?
            }
            ComparerKind::Ordering(f) => f(left, right)?,
            ComparerKind::Equality(_) => {
                return Err(EngineError::type_error(
                    "ordering comparer",
                    "equality-only comparer",
                    None,
                ));
            }
        };
        if self.inverted {
            Ok(ordering.reverse())
        } else {
            Ok(ordering)
        }
    }
}

impl std::fmt::Debug for Comparer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &self.kind {
            ComparerKind::Value => "value",
            ComparerKind::Identity => "identity",
            ComparerKind::Ordering(_) => "ordering-fn",
            ComparerKind::Equality(_) => "equality-fn",
        };
        f.debug_struct("Comparer")
            .field("mode", &mode)
            .field("inverted", &self.inverted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_mode_coerces() {
        let cmp = Comparer::value();
        assert!(cmp.equals(&Value::Integer(1), &Value::Float(1.0)).unwrap());
        assert_eq!(
            cmp.compare(&Value::Integer(1), &Value::Float(2.0)).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_identity_mode_is_strict() {
        let cmp = Comparer::identity();
        assert!(!cmp.equals(&Value::Integer(1), &Value::Float(1.0)).unwrap());
        assert!(cmp.equals(&Value::Integer(1), &Value::Integer(1)).unwrap());
    }

    #[test]
    fn test_invert_reverses_ordering() {
        let cmp = Comparer::value().invert();
        assert_eq!(
            cmp.compare(&Value::Integer(1), &Value::Integer(2)).unwrap(),
            Ordering::Greater
        );
        let restored = cmp.invert();
        assert_eq!(
            restored
                .compare(&Value::Integer(1), &Value::Integer(2))
                .unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_equality_comparer_cannot_order() {
        let cmp = Comparer::from_eq(|a, b| Ok(a.eq_value(b)));
        assert!(cmp.equals(&Value::Integer(3), &Value::Integer(3)).unwrap());
        assert!(cmp.compare(&Value::Integer(1), &Value::Integer(2)).is_err());
    }

    #[test]
    fn test_incomparable_is_type_error() {
        let cmp = Comparer::value();
        let err = cmp
            .compare(&Value::Integer(1), &Value::String("a".into()))
            .unwrap_err();
        assert!(matches!(err, EngineError::TypeError { .. }));
    }
}
