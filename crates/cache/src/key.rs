//! Composite cache keys
//!
//! A [`CacheKey`] fingerprints one query invocation by folding its
//! contributing values (statement id, bound parameter values in call order,
//! paging bounds, environment id) into a running hash and checksum while
//! retaining the raw contribution sequence.
//!
//! ## Collision defense
//!
//! Equality is a four-stage compare: folded hash, additive checksum,
//! contribution count, then a positional element-wise pass over the retained
//! sequence. Two keys that collide on the first three stages still compare
//! unequal when any contribution differs. All four stages are load-bearing;
//! the hash alone is only the bucket-selection shortcut.
//!
//! ## The disabled key
//!
//! [`CacheKey::disabled`] is the sentinel for "key composition intentionally
//! bypassed". It accepts no contributions; updating it is a programming error
//! and panics.

use rustc_hash::FxHasher;
use silt_core::CacheValue;
use std::hash::{Hash, Hasher};

/// Multiplier for the running hash fold
const MULTIPLIER: i32 = 37;

/// Initial hash seed
const SEED: i32 = 17;

/// Fixed non-zero hash contributed by a null value, so a null contribution
/// stays distinguishable from "no further contributions"
const NULL_CONTRIBUTION_HASH: i32 = 1;

/// Order-sensitive composite fingerprint of one query invocation
///
/// Built empty, fed contributions in a fixed deterministic order, then handed
/// to the cache layer. Cloning duplicates the contribution sequence and
/// carries hash, checksum, and count over without recomputation; callers that
/// keep mutating a similar key afterwards clone first.
#[derive(Debug, Clone)]
pub struct CacheKey {
    hash: i32,
    checksum: i64,
    count: u32,
    parts: Vec<CacheValue>,
    disabled: bool,
}

impl CacheKey {
    /// Create an empty key ready to accept contributions
    pub fn new() -> Self {
        CacheKey {
            hash: SEED,
            checksum: 0,
            count: 0,
            parts: Vec::new(),
            disabled: false,
        }
    }

    /// The sentinel key for queries whose key composition is disabled
    ///
    /// The disabled key never accepts contributions; see [`CacheKey::update`].
    pub fn disabled() -> Self {
        CacheKey {
            disabled: true,
            ..CacheKey::new()
        }
    }

    /// Contribute one value to the key
    ///
    /// A [`CacheValue::Rows`] contribution is decomposed recursively: each
    /// element is contributed in order, so the retained sequence holds only
    /// leaf values. A [`CacheValue::Null`] contributes the fixed sentinel
    /// hash and is kept in the sequence for the positional equality stage.
    ///
    /// # Panics
    ///
    /// Panics when called on the disabled key: it exists only to mark
    /// "caching intentionally bypassed", and mutating it would silently
    /// corrupt that meaning.
    pub fn update(&mut self, value: impl Into<CacheValue>) {
        assert!(
            !self.disabled,
            "the disabled cache key cannot accept contributions"
        );
        match value.into() {
            CacheValue::Rows(items) => {
                for item in items {
                    self.update(item);
                }
            }
            leaf => self.contribute(leaf),
        }
    }

    /// Contribute a sequence of values in order
    pub fn update_all<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<CacheValue>,
    {
        for value in values {
            self.update(value);
        }
    }

    fn contribute(&mut self, value: CacheValue) {
        let part_hash = match &value {
            CacheValue::Null => NULL_CONTRIBUTION_HASH,
            other => leaf_hash(other),
        };

        self.count = self.count.wrapping_add(1);
        self.checksum = self.checksum.wrapping_add(part_hash as i64);
        let weighted = part_hash.wrapping_mul(self.count as i32);
        self.hash = MULTIPLIER.wrapping_mul(self.hash).wrapping_add(weighted);
        self.parts.push(value);
    }

    /// Number of contributions folded into this key
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether this is the disabled sentinel key
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Default for CacheKey {
    fn default() -> Self {
        CacheKey::new()
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        // Short-circuit stages: hash, checksum, count. Equal counts imply
        // equal-length part sequences, so the zip below never truncates.
        if self.hash != other.hash {
            return false;
        }
        if self.checksum != other.checksum {
            return false;
        }
        if self.count != other.count {
            return false;
        }
        self.parts
            .iter()
            .zip(other.parts.iter())
            .all(|(a, b)| a == b)
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Only the folded hash feeds the map bucket; the full four-stage
        // compare runs through Eq on bucket collision.
        state.write_i32(self.hash);
    }
}

/// Deterministic 32-bit hash of one leaf contribution
///
/// Feeds the variant discriminant first so values of different types never
/// alias, floats via `to_bits`.
fn leaf_hash(value: &CacheValue) -> i32 {
    let mut hasher = FxHasher::default();
    hash_value(value, &mut hasher);
    hasher.finish() as i32
}

fn hash_value(value: &CacheValue, hasher: &mut FxHasher) {
    std::mem::discriminant(value).hash(hasher);
    match value {
        CacheValue::Null => {}
        CacheValue::Bool(b) => b.hash(hasher),
        CacheValue::Int(n) => n.hash(hasher),
        CacheValue::Float(f) => f.to_bits().hash(hasher),
        CacheValue::Str(s) => s.hash(hasher),
        CacheValue::Bytes(b) => b.hash(hasher),
        CacheValue::Rows(rows) => {
            rows.len().hash(hasher);
            for row in rows {
                hash_value(row, hasher);
            }
        }
    }
}
