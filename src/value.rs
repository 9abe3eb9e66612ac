// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property value type.
//!
//! This module provides the `PropValue` type, a self-describing value that a
//! container stores as-is. Values are compared structurally and printed via
//! their own `Debug`/`Display` behavior; the container performs no coercion.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A value stored in a property container.
///
/// `PropValue` covers the common scalar shapes plus nested lists and maps,
/// so arbitrarily structured values can be stored without the container
/// knowing anything about them. `PropValue::Null` doubles as the no-value
/// sentinel: a lenient container treats assigning `Null` as deletion.
///
/// # Examples
///
/// ```
/// use slotbox::value::PropValue;
///
/// let v = PropValue::from("bar");
/// assert_eq!(v, PropValue::Str("bar".to_string()));
/// assert!(!v.is_null());
///
/// // Option maps onto the sentinel.
/// let none: Option<i64> = None;
/// assert!(PropValue::from(none).is_null());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropValue {
    /// The no-value sentinel.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    List(Vec<PropValue>),
    /// A nested string-keyed map of values.
    Map(BTreeMap<String, PropValue>),
}

impl PropValue {
    /// Returns `true` if this value is the no-value sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbox::value::PropValue;
    ///
    /// assert!(PropValue::Null.is_null());
    /// assert!(!PropValue::Bool(false).is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Returns the string contents if this value is a `Str`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbox::value::PropValue;
    ///
    /// let v = PropValue::from("hello");
    /// assert_eq!(v.as_str(), Some("hello"));
    /// assert_eq!(PropValue::Int(1).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Int(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Int(n.into())
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Float(n)
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(list: Vec<PropValue>) -> Self {
        PropValue::List(list)
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(map: BTreeMap<String, PropValue>) -> Self {
        PropValue::Map(map)
    }
}

impl<T> From<Option<T>> for PropValue
where
    T: Into<PropValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => PropValue::Null,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => write!(f, "null"),
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Int(n) => write!(f, "{}", n),
            PropValue::Float(n) => write!(f, "{}", n),
            PropValue::Str(s) => write!(f, "{}", s),
            PropValue::List(list) => {
                write!(f, "[")?;
                for (i, v) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            PropValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null() {
        assert!(PropValue::Null.is_null());
        assert!(!PropValue::Str(String::new()).is_null());
        assert!(!PropValue::Int(0).is_null());
    }

    #[test]
    fn test_from_str() {
        let v = PropValue::from("bar");
        assert_eq!(v, PropValue::Str("bar".to_string()));
    }

    #[test]
    fn test_from_string() {
        let v = PropValue::from("bar".to_string());
        assert_eq!(v.as_str(), Some("bar"));
    }

    #[test]
    fn test_from_ints() {
        assert_eq!(PropValue::from(7i32), PropValue::Int(7));
        assert_eq!(PropValue::from(7i64), PropValue::Int(7));
    }

    #[test]
    fn test_from_option() {
        let none: Option<&str> = None;
        assert_eq!(PropValue::from(none), PropValue::Null);
        assert_eq!(PropValue::from(Some("x")), PropValue::Str("x".to_string()));
    }

    #[test]
    fn test_equality_is_structural() {
        let a = PropValue::List(vec![PropValue::Int(1), PropValue::from("two")]);
        let b = PropValue::List(vec![PropValue::Int(1), PropValue::from("two")]);
        assert_eq!(a, b);
        assert_ne!(a, PropValue::List(vec![PropValue::Int(1)]));
    }

    #[test]
    fn test_display_scalars() {
        assert_eq!(PropValue::Null.to_string(), "null");
        assert_eq!(PropValue::Bool(true).to_string(), "true");
        assert_eq!(PropValue::Int(-3).to_string(), "-3");
        assert_eq!(PropValue::from("foobar").to_string(), "foobar");
    }

    #[test]
    fn test_display_nested() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), PropValue::Int(1));
        let v = PropValue::List(vec![PropValue::Map(map), PropValue::Null]);
        assert_eq!(v.to_string(), "[{a: 1}, null]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let v = PropValue::List(vec![
            PropValue::Int(1),
            PropValue::from("two"),
            PropValue::Null,
        ]);
        let json = serde_json::to_string(&v).unwrap();
        let back: PropValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
