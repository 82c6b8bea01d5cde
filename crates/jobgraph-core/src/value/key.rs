use crate::value::Value;
use derive_more::Display;

///
/// Key
///
/// Primary-key value of one row. Keys are totally ordered so graph
/// lookups and seen-set bookkeeping stay deterministic.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Key {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Text(String),
}

impl Key {
    /// Convert a scalar value into a key, if it has a key shape.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(Self::Int(*i)),
            Value::Text(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
