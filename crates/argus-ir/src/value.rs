//! Python values produced by generation.
//!
//! Values compare and hash structurally. `Display` renders Python literal
//! syntax so a test case can be spliced directly into a call expression.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An `f64` with total ordering, so floats can live inside sets and dict keys.
///
/// Equality follows `f64::total_cmp`: `-0.0 != 0.0` and `NaN == NaN`.
#[derive(Debug, Clone, Copy)]
pub struct PyFloat(pub f64);

impl PartialEq for PyFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for PyFloat {}

impl PartialOrd for PyFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PyFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for PyFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for PyFloat {
    /// Mirrors Python's `repr(float)`: scientific notation below 1e-4 and at
    /// or above 1e16, otherwise positional with at least one decimal digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
        }
        let magnitude = v.abs();
        if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
            let sci = format!("{v:e}");
            let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            return write!(f, "{mantissa}e{sign}{:02}", exponent.abs());
        }
        if v.fract() == 0.0 {
            write!(f, "{v:.1}")
        } else {
            write!(f, "{v}")
        }
    }
}

impl From<f64> for PyFloat {
    fn from(v: f64) -> Self {
        PyFloat(v)
    }
}

/// A generated Python value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(PyFloat),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(BTreeSet<Value>),
    Dict(BTreeMap<Value, Value>),
}

impl Value {
    pub fn float(v: f64) -> Self {
        Value::Float(PyFloat(v))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Element count for strings and containers, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) | Value::Tuple(items) => Some(items.len()),
            Value::Set(items) => Some(items.len()),
            Value::Dict(entries) => Some(entries.len()),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => None,
        }
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => {
                f.write_str("'")?;
                for c in s.chars() {
                    match c {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
            Value::List(items) => {
                f.write_str("[")?;
                write_seq(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_seq(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Set(items) if items.is_empty() => f.write_str("set()"),
            Value::Set(items) => {
                f.write_str("{")?;
                write_seq(f, items)?;
                f.write_str("}")
            }
            Value::Dict(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// One argument tuple for the function under test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TestCase {
    pub args: Vec<Value>,
}

impl TestCase {
    pub fn new(args: Vec<Value>) -> Self {
        Self { args }
    }
}

impl fmt::Display for TestCase {
    /// Renders the argument list without surrounding parentheses, e.g.
    /// `1, 'ab', [True]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_seq(f, &self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_repr() {
        assert_eq!(PyFloat(2.0).to_string(), "2.0");
        assert_eq!(PyFloat(-17.0).to_string(), "-17.0");
        assert_eq!(PyFloat(4.888).to_string(), "4.888");
        assert_eq!(PyFloat(0.0).to_string(), "0.0");
        assert_eq!(PyFloat(1e-5).to_string(), "1e-05");
        assert_eq!(PyFloat(1.5e16).to_string(), "1.5e+16");
        assert_eq!(PyFloat(f64::INFINITY).to_string(), "inf");
        assert_eq!(PyFloat(f64::NAN).to_string(), "nan");
    }

    #[test]
    fn test_float_total_equality() {
        assert_eq!(PyFloat(f64::NAN), PyFloat(f64::NAN));
        assert_ne!(PyFloat(0.0), PyFloat(-0.0));
        assert!(PyFloat(-1.0) < PyFloat(1.0));
    }

    #[test]
    fn test_value_len() {
        assert_eq!(Value::str("abc").len(), Some(3));
        assert_eq!(Value::Int(3).len(), None);
        assert_eq!(Value::Tuple(vec![Value::Int(1)]).len(), Some(1));
    }
}
