//! Metric values and the insertion-ordered metrics map

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::float;

/// A single metric value.
///
/// Serialized as a bare JSON scalar. JSON does not keep the integer variant,
/// so on read a non-negative integer that fits in `i64` comes back as
/// [`MetricValue::Int`] and larger ones as [`MetricValue::UInt64`]. Equality
/// compares integers by numeric value across both variants.
///
/// Non-finite floats are written as the tokens `"NaN"`, `"inf"` and `"-inf"`
/// (see [`crate::float`]). Those three strings are reserved: a
/// [`MetricValue::Text`] holding one of them reads back as a float.
#[derive(Debug, Clone)]
pub enum MetricValue {
    /// Floating-point value
    Float(f64),
    /// Signed integer value
    Int(i64),
    /// Unsigned 64-bit integer value
    UInt64(u64),
    /// String value
    Text(String),
}

impl MetricValue {
    /// Get the value as `f64` if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::UInt64(v) => Some(*v as f64),
            Self::Text(_) => None,
        }
    }

    /// Get the value as a string slice if it is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for MetricValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => float::same(*a, *b),
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt64(a), Self::UInt64(b)) => a == b,
            (Self::Int(a), Self::UInt64(b)) | (Self::UInt64(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Float(v) => float::serialize(v, serializer),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::UInt64(v) => serializer.serialize_u64(*v),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetricValueVisitor;

        impl Visitor<'_> for MetricValueVisitor {
            type Value = MetricValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<MetricValue, E> {
                Ok(MetricValue::Float(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MetricValue, E> {
                Ok(MetricValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MetricValue, E> {
                Ok(i64::try_from(v).map_or(MetricValue::UInt64(v), MetricValue::Int))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MetricValue, E> {
                Ok(float::from_token(v).map_or_else(|| MetricValue::Text(v.to_string()), MetricValue::Float))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<MetricValue, E> {
                Ok(float::from_token(&v).map_or(MetricValue::Text(v), MetricValue::Float))
            }
        }

        deserializer.deserialize_any(MetricValueVisitor)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for MetricValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for MetricValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        Self::UInt64(v)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        Self::UInt64(u64::try_from(v).unwrap_or(u64::MAX))
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Insertion-ordered collection of named metrics.
///
/// Names are unique. Adding a name twice keeps the last value in the
/// position of the first insertion (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics {
    entries: IndexMap<String, MetricValue>,
}

impl Metrics {
    /// Create an empty metrics collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric, returning the value it replaced, if any.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) -> Option<MetricValue> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), value.into());
        if let Some(old) = &previous {
            debug!(metric = %name, old = %old, "metric overwritten");
        }
        previous
    }

    /// Get a metric by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.entries.get(name)
    }

    /// Check whether a metric with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct metric names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no metrics were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate metrics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Metric names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<MetricValue>> FromIterator<(K, V)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metrics = Self::new();
        for (name, value) in iter {
            metrics.add(name, value);
        }
        metrics
    }
}
