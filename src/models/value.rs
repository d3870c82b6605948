//! Cell values and their native ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

/// Date format used when a date cell is stringified.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single cell of a record.
///
/// Values of different kinds order as `Empty < Bool < number < Date < Text`.
/// Integers and floats share the number rank and compare exactly, without
/// rounding the integer to `f64`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Field missing from the record, or explicitly null.
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    /// True when the cell carries no data.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Empty => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Date(_) => 3,
            Value::Text(_) => 4,
        }
    }

    /// Case-insensitive substring test against the stringified value.
    ///
    /// `needle` must already be lowercase. An empty cell stringifies to `""`.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            Value::Empty => needle.is_empty(),
            Value::Text(s) => s.to_lowercase().contains(needle),
            other => other.to_string().to_lowercase().contains(needle),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Empty, Value::Empty) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Value::Float(a), Value::Float(b)) => cmp_float(*a, *b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Numeric order with `-0.0 == 0.0`; NaN falls back to `total_cmp` placement.
fn cmp_float(a: f64, b: f64) -> Ordering {
    if a == b { Ordering::Equal } else { a.total_cmp(&b) }
}

/// Exact comparison of an integer against a float.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63 is exactly representable; i64 covers [-2^63, 2^63).
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() { Ordering::Greater } else { Ordering::Less };
    }
    if f >= BOUND {
        return Ordering::Less;
    }
    if f < -BOUND {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let frac = f - whole;
            if frac > 0.0 {
                Ordering::Less
            } else if frac < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Empty,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Empty),
            },
            // Strings stay text, even date-shaped ones; typed rows produce dates.
            serde_json::Value::String(s) => Value::Text(s),
            // Nested data is not addressable by a column; keep its JSON text.
            nested => Value::Text(nested.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or_default()
    }
}
