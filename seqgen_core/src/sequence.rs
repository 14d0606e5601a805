//! Self-summing sequence generator.
//!
//! A sequence of order `initial` is seeded with `0, 1, …, initial-1`; every
//! following term is the sum of the `initial` terms before it. Order 2 gives
//! the Fibonacci numbers.

use crate::{Error, Result, Sequence, SequenceKey, Term};

/// Receives diagnostic messages produced while generating sequences.
///
/// Keeps progress reporting out of the generator so that it stays a pure
/// function of its parameters.
pub trait DiagnosticSink {
    fn emit(&self, message: &str);
}

/// Discards all diagnostics
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _message: &str) {}
}

/// Forwards diagnostics to `tracing` at debug level
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str),
{
    fn emit(&self, message: &str) {
        self(message)
    }
}

/// Reject parameters the recurrence is not defined for.
pub fn validate_initial(initial: usize) -> Result<()> {
    if initial == 0 {
        return Err(Error::InvalidParameter(
            "initial must be at least 1 (an order-0 recurrence has no seed)".into(),
        ));
    }
    Ok(())
}

/// Calculate the self-summing sequence of order `initial`.
///
/// Returns `max(initial, length)` terms: the seed is never truncated.
///
/// # Example
/// ```
/// use seqgen_core::calc_sequence;
/// let fib = calc_sequence(2, 5).unwrap();
/// assert_eq!(fib.to_string(), "[0, 1, 1, 2, 3]");
/// ```
pub fn calc_sequence(initial: usize, length: usize) -> Result<Sequence> {
    calc_sequence_with(initial, length, &NullSink)
}

/// Same as [`calc_sequence`], reporting progress to `sink`.
pub fn calc_sequence_with(
    initial: usize,
    length: usize,
    sink: &dyn DiagnosticSink,
) -> Result<Sequence> {
    validate_initial(initial)?;
    let key = SequenceKey::new(initial, length);

    sink.emit(&format!(
        "Will calculate a sequence starting with {} numbers and showing {} terms from that sequence.",
        initial, length
    ));

    let mut values: Vec<Term> = Vec::with_capacity(key.expected_len());
    values.extend((0..initial).map(Term::from));

    // Sum of the trailing `initial` terms, slid forward one term per step
    let mut window: Term = values.iter().sum();

    for index in initial..length {
        if index > initial {
            window -= &values[index - 1 - initial];
            window += &values[index - 1];
        }
        values.push(window.clone());
    }

    Ok(Sequence::from(values))
}
