//! Core value types shared by the generator, the batch driver and the
//! exporters.

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

/// A single term of a generated sequence. Terms grow without bound.
pub type Term = BigUint;

/// Identifies one generated sequence: the recurrence order and the
/// requested length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceKey {
    pub initial: usize,
    pub length: usize,
}

impl SequenceKey {
    pub fn new(initial: usize, length: usize) -> Self {
        Self { initial, length }
    }

    /// Number of entries a sequence for this key contains.
    pub fn expected_len(&self) -> usize {
        self.initial.max(self.length)
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.initial, self.length)
    }
}

/// A fully materialized self-summing sequence.
///
/// Serialized as a list of decimal strings so terms of any size survive
/// a round-trip through JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence(Vec<Term>);

impl Deref for Sequence {
    type Target = [Term];

    fn deref(&self) -> &[Term] {
        &self.0
    }
}

impl From<Vec<Term>> for Sequence {
    fn from(values: Vec<Term>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[u64; N]> for Sequence {
    fn from(values: [u64; N]) -> Self {
        Self(values.into_iter().map(BigUint::from).collect())
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|v| v.to_str_radix(10)))
    }
}

impl<'de> Deserialize<'de> for Sequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let digits = Vec::<String>::deserialize(deserializer)?;
        digits
            .iter()
            .map(|d| d.parse::<BigUint>().map_err(serde::de::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

/// Batch result: sequences keyed by `(initial, length)`.
///
/// Iteration is in ascending key order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceCollection {
    entries: BTreeMap<SequenceKey, Sequence>,
}

impl SequenceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sequence, replacing any previous entry for the same key.
    pub fn insert(&mut self, key: SequenceKey, sequence: Sequence) -> Option<Sequence> {
        self.entries.insert(key, sequence)
    }

    pub fn get(&self, key: &SequenceKey) -> Option<&Sequence> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &SequenceKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SequenceKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SequenceKey, &Sequence)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a SequenceCollection {
    type Item = (&'a SequenceKey, &'a Sequence);
    type IntoIter = std::collections::btree_map::Iter<'a, SequenceKey, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(SequenceKey, Sequence)> for SequenceCollection {
    fn from_iter<I: IntoIterator<Item = (SequenceKey, Sequence)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
