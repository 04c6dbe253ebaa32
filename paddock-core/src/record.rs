use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// A single upstream field value.
///
/// CSV cells are always `Str`. JSON integers become `Int`; other numbers keep
/// their textual form as `Str`. Nested arrays and objects are not meaningful
/// to the pipeline and are carried as `Null`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scalar {
    /// Absent / JSON null / nested structure.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integral number.
    Int(i64),
    /// Text, untrimmed.
    Str(String),
}

impl Scalar {
    /// Convert a JSON value into a scalar.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_i64().map_or_else(|| Self::Str(n.to_string()), Self::Int),
            Value::String(s) => Self::Str(s.clone()),
        }
    }

    /// True for values that count as "not provided": `Null` or the empty string.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            Self::Bool(_) | Self::Int(_) => false,
        }
    }

    /// Borrow the text of a `Str` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One upstream row/object with its field names exactly as received.
///
/// Field order is preserved; it decides which value wins when two names
/// collapse to the same canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    fields: Vec<(String, Scalar)>,
}

impl RawRecord {
    /// Empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Build from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build from a JSON object; returns `None` for any other JSON shape.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            fields: obj
                .iter()
                .map(|(k, v)| (k.clone(), Scalar::from_json(v)))
                .collect(),
        })
    }

    /// Iterate fields in upstream order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Derive the canonical (snake_case keyed) form of this record.
    #[must_use]
    pub fn canonicalize(&self) -> CanonicalRecord {
        crate::normalize::canonicalize(self.fields.iter().map(|(k, v)| (k.as_str(), v.clone())))
    }
}

/// A record keyed by canonical snake_case field names.
///
/// Produced only through [`crate::normalize::canonicalize`]; values are the
/// upstream values unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalRecord {
    fields: BTreeMap<String, Scalar>,
}

impl CanonicalRecord {
    pub(crate) const fn from_map(fields: BTreeMap<String, Scalar>) -> Self {
        Self { fields }
    }

    /// Look up a canonical key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.fields.get(key)
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
