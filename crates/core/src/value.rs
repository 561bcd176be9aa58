//! Canonical value model for the silt cache engine
//!
//! One enum serves both roles the engine needs a value type for:
//! - the cached result payload stored against a key
//! - the contribution values folded into a composite cache key
//!   (statement id, bound parameters, paging bounds, environment id)
//!
//! ## Null vs absent
//!
//! `CacheValue::Null` is a stored value: it records that a lookup completed
//! and produced no rows, and it is what the transactional layer writes to
//! release a blocking backend after a miss. "Absent" is `Option::None` at the
//! cache API surface. The two are never interchangeable.
//!
//! ## Type equality
//!
//! Different variants are NEVER equal, even when the contained values look
//! alike: `Int(1) != Float(1.0)`, `Bytes(b"x") != Str("x")`.
//! Float equality follows IEEE-754: `NaN != NaN`, `-0.0 == 0.0`.

use serde::{Deserialize, Serialize};

/// Canonical value for cache payloads and key contributions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CacheValue {
    /// Explicit "no rows" marker, distinct from an absent entry
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    Str(String),
    /// Raw bytes (a serialized result payload)
    Bytes(Vec<u8>),
    /// Ordered sequence of values (result rows, or an array-valued parameter)
    Rows(Vec<CacheValue>),
}

// Hand-written so Float keeps IEEE-754 semantics instead of bitwise equality
impl PartialEq for CacheValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CacheValue::Null, CacheValue::Null) => true,
            (CacheValue::Bool(a), CacheValue::Bool(b)) => a == b,
            (CacheValue::Int(a), CacheValue::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (CacheValue::Float(a), CacheValue::Float(b)) => a == b,
            (CacheValue::Str(a), CacheValue::Str(b)) => a == b,
            (CacheValue::Bytes(a), CacheValue::Bytes(b)) => a == b,
            (CacheValue::Rows(a), CacheValue::Rows(b)) => a == b,
            // Different variants are never equal
            _ => false,
        }
    }
}

impl CacheValue {
    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            CacheValue::Null => "Null",
            CacheValue::Bool(_) => "Bool",
            CacheValue::Int(_) => "Int",
            CacheValue::Float(_) => "Float",
            CacheValue::Str(_) => "Str",
            CacheValue::Bytes(_) => "Bytes",
            CacheValue::Rows(_) => "Rows",
        }
    }

    /// Check if this is the explicit null marker
    pub fn is_null(&self) -> bool {
        matches!(self, CacheValue::Null)
    }

    /// Check if this is a row sequence
    pub fn is_rows(&self) -> bool {
        matches!(self, CacheValue::Rows(_))
    }
}

impl From<bool> for CacheValue {
    fn from(v: bool) -> Self {
        CacheValue::Bool(v)
    }
}

impl From<i64> for CacheValue {
    fn from(v: i64) -> Self {
        CacheValue::Int(v)
    }
}

impl From<f64> for CacheValue {
    fn from(v: f64) -> Self {
        CacheValue::Float(v)
    }
}

impl From<&str> for CacheValue {
    fn from(v: &str) -> Self {
        CacheValue::Str(v.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(v: String) -> Self {
        CacheValue::Str(v)
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(v: Vec<u8>) -> Self {
        CacheValue::Bytes(v)
    }
}

impl From<Vec<CacheValue>> for CacheValue {
    fn from(v: Vec<CacheValue>) -> Self {
        CacheValue::Rows(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_variant_equality() {
        assert_eq!(CacheValue::Null, CacheValue::Null);
        assert_eq!(CacheValue::Int(7), CacheValue::Int(7));
        assert_eq!(CacheValue::from("abc"), CacheValue::Str("abc".to_string()));
        assert_ne!(CacheValue::Int(7), CacheValue::Int(8));
    }

    #[test]
    fn test_cross_variant_inequality() {
        assert_ne!(CacheValue::Int(1), CacheValue::Float(1.0));
        assert_ne!(
            CacheValue::Bytes(b"x".to_vec()),
            CacheValue::Str("x".to_string())
        );
        assert_ne!(CacheValue::Null, CacheValue::Int(0));
    }

    #[test]
    fn test_float_ieee_semantics() {
        assert_ne!(CacheValue::Float(f64::NAN), CacheValue::Float(f64::NAN));
        assert_eq!(CacheValue::Float(-0.0), CacheValue::Float(0.0));
    }

    #[test]
    fn test_rows_equality_is_elementwise() {
        let a = CacheValue::Rows(vec![CacheValue::Int(1), CacheValue::Str("x".into())]);
        let b = CacheValue::Rows(vec![CacheValue::Int(1), CacheValue::Str("x".into())]);
        let c = CacheValue::Rows(vec![CacheValue::Str("x".into()), CacheValue::Int(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_null_marker_helpers() {
        assert!(CacheValue::Null.is_null());
        assert!(!CacheValue::Int(0).is_null());
        assert!(CacheValue::Rows(vec![]).is_rows());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(CacheValue::Null.type_name(), "Null");
        assert_eq!(CacheValue::Rows(vec![]).type_name(), "Rows");
        assert_eq!(CacheValue::Bytes(vec![]).type_name(), "Bytes");
    }
}
