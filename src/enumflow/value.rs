//! Core value model for the enumeration engine.
//!
//! This module contains [`Value`], the dynamic value type carried through
//! every cursor and facade. It supports scalar types (integers, floats,
//! strings, booleans), temporal types (dates, timestamps) and arrays, and
//! provides the equality, comparison and rendering capabilities the comparer
//! contract and the terminal reducers build on.

use crate::enumflow::error::{EngineError, EngineResult};
use chrono::{NaiveDate, NaiveDateTime};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A value carried by a sequence entry, as element or as key.
///
/// This enum represents all data types the engine traverses. Keys are values
/// too: list-like sequences carry dense `Integer` keys, keyed sequences carry
/// arbitrary scalar keys, and the Flip combinator may move any value into key
/// position.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean value (true/false)
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Date (YYYY-MM-DD)
    Date(NaiveDate),
    /// Timestamp (YYYY-MM-DD HH:MM:SS[.nnn])
    Timestamp(NaiveDateTime),
    /// Array of values
    Array(Vec<Value>),
}

impl Value {
    /// Returns the type name used in error reporting.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Date(_) => "Date",
            Value::Timestamp(_) => "Timestamp",
            Value::Array(_) => "Array",
        }
    }

    /// True for scalar and temporal values, false for arrays.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_))
    }

    /// Exact equality with strict type matching and no numeric coercion.
    ///
    /// This is the identity mode used by distinct and the set operators:
    /// `Integer(1)` and `Float(1.0)` are NOT identical.
    pub fn eq_identity(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => (a - b).abs() < f64::EPSILON,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.eq_identity(y))
            }
            _ => false,
        }
    }

    /// Equality with numeric type coercion.
    ///
    /// This is the default value mode: `Integer(1)` equals `Float(1.0)`.
    /// Two Nulls compare equal; Null never equals a non-null.
    pub fn eq_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Float(b)) => (*a as f64 - b).abs() < f64::EPSILON,
            (Value::Float(a), Value::Integer(b)) => (a - *b as f64).abs() < f64::EPSILON,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.eq_value(y))
            }
            _ => self.eq_identity(other),
        }
    }

    /// 3-way comparison capability.
    ///
    /// Returns `Some(ordering)` for values that know how to order themselves
    /// (same-family scalars, with Integer/Float coercion; Null sorts before
    /// everything). Returns `None` for incomparable combinations, which the
    /// comparer surfaces as a type error.
    pub fn try_compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Some(float_cmp(*a, *b)),
            (Value::Integer(a), Value::Float(b)) => Some(float_cmp(*a as f64, *b)),
            (Value::Float(a), Value::Integer(b)) => Some(float_cmp(*a, *b as f64)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Numeric view of the value, for sum/average accumulation.
    pub fn as_f64(&self) -> EngineResult<f64> {
        match self {
            Value::Integer(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            other => Err(EngineError::type_error(
                "numeric",
                other.type_name(),
                Some(other.to_string()),
            )),
        }
    }

    /// Numeric addition, widening Integer to Float only when needed.
    pub fn add(&self, other: &Value) -> EngineResult<Value> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
            (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(*a as f64 + b)),
            (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a + *b as f64)),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
            (left, right) => {
                let bad = if matches!(left, Value::Integer(_) | Value::Float(_)) {
                    right
                } else {
                    left
                };
                Err(EngineError::type_error(
                    "numeric",
                    bad.type_name(),
                    Some(bad.to_string()),
                ))
            }
        }
    }

    /// Renders the value as a map key.
    ///
    /// Scalar and temporal values are representable; Null renders as the
    /// empty string. Arrays are not valid keys.
    pub fn key_string(&self) -> EngineResult<String> {
        match self {
            Value::Null => Ok(String::new()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Integer(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::Date(d) => Ok(d.format("%Y-%m-%d").to_string()),
            Value::Timestamp(ts) => Ok(ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
            Value::Array(_) => Err(EngineError::invalid_key(
                "array values cannot be used as keys",
                Some(self.type_name().to_string()),
            )),
        }
    }
}

fn float_cmp(a: f64, b: f64) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Display implementation for clean string formatting
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d),
            Value::Timestamp(t) => write!(f, "{}", t),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Custom Serialize implementation for Value.
///
/// Scalars pass through natively; temporal values serialize as formatted
/// strings so the wire shape is stable across serde backends:
/// - Date → "YYYY-MM-DD"
/// - Timestamp → "YYYY-MM-DD HH:MM:SS.nnn"
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            Value::Timestamp(ts) => {
                serializer.serialize_str(&ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
            }
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for elem in arr {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}
