//! Numeric coercion between Value and f64.
//!
//! Curve interpolation runs in double space regardless of the stored kind;
//! these helpers extract the working double and re-materialize the result in
//! the curve's established kind (Int rounds to the nearest integer).

use crate::{Value, ValueKind};

/// Extract the numeric payload of a value, if it has one.
#[inline]
pub fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i) => Some(*i as f64),
        Value::Double(d) => Some(*d),
        _ => None,
    }
}

/// Re-materialize an interpolated double in the given kind.
///
/// Only meaningful for numeric kinds; callers must have checked
/// `kind.is_numeric()` first.
#[inline]
pub fn from_f64(kind: ValueKind, v: f64) -> Value {
    match kind {
        ValueKind::Int => Value::Int(v.round() as i64),
        _ => Value::Double(v),
    }
}
