mod document;
mod key;
mod serialize;


pub use document::Document;
pub use key::Key;

use derive_more::Display;
use time::OffsetDateTime;

///
/// ScalarType
///
/// Column and schema scalar shapes. `Json` accepts any value and covers the
/// JSON text columns (requirement lists, phone lists, score maps).
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum ScalarType {
    Bool,
    Float,
    Int,
    Json,
    Text,
    Timestamp,
}

impl ScalarType {
    /// Whether a non-null value fits this scalar type.
    ///
    /// `Float` also admits integers; nothing else is coerced.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::Float => matches!(value, Value::Float(_) | Value::Int(_)),
            Self::Int => matches!(value, Value::Int(_)),
            Self::Json => true,
            Self::Text => matches!(value, Value::Text(_)),
            Self::Timestamp => matches!(value, Value::Timestamp(_)),
        }
    }
}

///
/// Value
///
/// Dynamic value carried by rows and produced in output documents.
///

#[derive(Clone, Debug, Default, PartialEq)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    /// Nested output document; field order is significant.
    Document(Document),
    Float(f64),
    Int(i64),
    /// Ordered list; order is the persistence order of the source rows.
    List(Vec<Self>),
    #[default]
    Null,
    Text(String),
    Timestamp(OffsetDateTime),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Short shape name used in type-mismatch diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Document(_) => "Document",
            Self::Float(_) => "Float",
            Self::Int(_) => "Int",
            Self::List(_) => "List",
            Self::Null => "null",
            Self::Text(_) => "Text",
            Self::Timestamp(_) => "Timestamp",
        }
    }

    /// Render as a `serde_json` value; documents keep their field order.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

macro_rules! impl_value_from {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    Document => Document,
    f64 => Float,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    String => Text,
    &str => Text,
    OffsetDateTime => Timestamp,
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(i) => Self::Int(i),
            Key::Text(s) => Self::Text(s),
        }
    }
}
