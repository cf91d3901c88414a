//! JSON codec for `f64` values that may be non-finite
//!
//! JSON has no NaN or infinity, so they are written as the string tokens
//! `"NaN"`, `"inf"` and `"-inf"`. Finite values are plain JSON numbers.
//! Use with `#[serde(with = "crate::float")]`.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;

/// Token written for NaN.
pub const NAN_TOKEN: &str = "NaN";
/// Token written for positive infinity.
pub const INF_TOKEN: &str = "inf";
/// Token written for negative infinity.
pub const NEG_INF_TOKEN: &str = "-inf";

/// The string token for a non-finite value, `None` for finite ones.
#[must_use]
pub fn token(v: f64) -> Option<&'static str> {
    if v.is_nan() {
        Some(NAN_TOKEN)
    } else if v.is_infinite() {
        Some(if v.is_sign_positive() { INF_TOKEN } else { NEG_INF_TOKEN })
    } else {
        None
    }
}

/// Parse a non-finite token.
#[must_use]
pub fn from_token(s: &str) -> Option<f64> {
    match s {
        NAN_TOKEN => Some(f64::NAN),
        INF_TOKEN => Some(f64::INFINITY),
        NEG_INF_TOKEN => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

/// Float equality used by reports: bitwise, except that all NaNs are equal.
#[must_use]
pub fn same(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

/// Serialize an `f64`, writing non-finite values as tokens.
///
/// # Errors
///
/// Returns the serializer's error.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match token(*v) {
        Some(t) => serializer.serialize_str(t),
        None => serializer.serialize_f64(*v),
    }
}

/// Deserialize an `f64` written by [`serialize`].
///
/// # Errors
///
/// Returns error for anything other than a number or a non-finite token.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct F64Visitor;

    impl Visitor<'_> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a number or one of {NAN_TOKEN:?}, {INF_TOKEN:?}, {NEG_INF_TOKEN:?}")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            from_token(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(F64Visitor)
}
