//! Batch driver: builds a [`SequenceCollection`] for many recurrence orders
//! sharing one length.

use crate::sequence::{calc_sequence_with, validate_initial, DiagnosticSink, NullSink};
use crate::{Result, SequenceCollection, SequenceKey};

/// Smallest order produced by [`build_collection_range`]
pub const RANGE_START: usize = 2;

/// One batch of sequences to generate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRequest {
    pub initials: Vec<usize>,
    pub length: usize,
}

impl BatchRequest {
    pub fn new(initials: Vec<usize>, length: usize) -> Self {
        Self { initials, length }
    }

    /// Every order from 2 up to and including `max_initial`
    pub fn range(max_initial: usize, length: usize) -> Self {
        Self::new((RANGE_START..=max_initial).collect(), length)
    }

    pub fn run(&self) -> Result<SequenceCollection> {
        self.run_with(&NullSink)
    }

    pub fn run_with(&self, sink: &dyn DiagnosticSink) -> Result<SequenceCollection> {
        build_collection_with(self.initials.iter().copied(), self.length, sink)
    }
}

/// Generate one sequence per requested order, keyed by `(initial, length)`.
///
/// Duplicate orders collapse into a single entry. Every order is validated
/// before anything is computed, so an invalid value fails the whole batch.
pub fn build_collection<I>(initials: I, length: usize) -> Result<SequenceCollection>
where
    I: IntoIterator<Item = usize>,
{
    build_collection_with(initials, length, &NullSink)
}

/// Same as [`build_collection`], reporting progress to `sink`.
pub fn build_collection_with<I>(
    initials: I,
    length: usize,
    sink: &dyn DiagnosticSink,
) -> Result<SequenceCollection>
where
    I: IntoIterator<Item = usize>,
{
    let initials: Vec<usize> = initials.into_iter().collect();
    for &initial in &initials {
        validate_initial(initial)?;
    }

    let mut collection = SequenceCollection::new();
    for initial in initials {
        let sequence = calc_sequence_with(initial, length, sink)?;
        collection.insert(SequenceKey::new(initial, length), sequence);
    }

    tracing::info!(
        "Built {} sequences of length {}",
        collection.len(),
        length
    );
    Ok(collection)
}

/// Generate sequences for every order from 2 to `max_initial` inclusive.
///
/// A `max_initial` below 2 produces an empty collection.
pub fn build_collection_range(max_initial: usize, length: usize) -> Result<SequenceCollection> {
    build_collection(RANGE_START..=max_initial, length)
}
