use crate::error::Error;

/// The tri-state outcome of a continuation (spec §3): either it never
/// surfaced anything (`Empty`), it completed with a value tuple (`Value`),
/// or it failed (`Exception`).
///
/// `T` is the value-tuple type, e.g. `()`, `(i32,)`, `(String, u64)`.
/// Unlike the source language there is no separate `Result<>` (void)
/// specialisation: `T = ()` already carries no payload.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The chain aborted without surfacing anything.
    Empty,
    /// Successful completion carrying the value tuple.
    Value(T),
    /// Failure, possibly cancellation (see [`Error::is_cancellation`]).
    Exception(Error),
}

impl<T> Outcome<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, Outcome::Exception(_))
    }

    /// Consumes the outcome, returning the value tuple if it is `Value`.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Value(t) => Some(t),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the error if it is `Exception`.
    pub fn into_exception(self) -> Option<Error> {
        match self {
            Outcome::Exception(e) => Some(e),
            _ => None,
        }
    }
}

/// Constructs a `Value` outcome from a ready tuple.
///
/// This is the Rust counterpart of the source language's `make_result(args…)`
/// — there is no separate ref-decaying step since the tuple is taken by
/// value.
pub fn make_result<T>(value: T) -> Outcome<T> {
    Outcome::Value(value)
}

/// Constructs an `Exception` outcome from an error, convertible to any
/// `Outcome<T>`.
pub fn make_exceptional<T>(error: Error) -> Outcome<T> {
    Outcome::Exception(error)
}

/// A type-erased marker convertible to any `Outcome<T>`, denoting an
/// aborted chain (spec §3's "empty" state marker).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyResult;

impl<T> From<EmptyResult> for Outcome<T> {
    fn from(_: EmptyResult) -> Self {
        Outcome::Empty
    }
}

/// Returns the aborted-chain marker.
pub fn empty_result() -> EmptyResult {
    EmptyResult
}

/// A type-erased marker convertible to any `Outcome<T>`, denoting
/// cancellation (a falsy `Error` routed on the error path).
#[derive(Debug, Clone, Copy, Default)]
pub struct CancellationResult;

impl<T> From<CancellationResult> for Outcome<T> {
    fn from(_: CancellationResult) -> Self {
        Outcome::Exception(Error::cancelled())
    }
}

/// Returns the cancellation marker.
pub fn cancellation_result() -> CancellationResult {
    CancellationResult
}

/// A type-erased marker convertible to any `Outcome<T>`, wrapping a real
/// error.
#[derive(Debug)]
pub struct ExceptionalResult(pub Error);

impl<T> From<ExceptionalResult> for Outcome<T> {
    fn from(marker: ExceptionalResult) -> Self {
        Outcome::Exception(marker.0)
    }
}

/// Wraps `error` into the exceptional-state marker.
pub fn exceptional_result(error: Error) -> ExceptionalResult {
    ExceptionalResult(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn value_roundtrip() {
        let outcome: Outcome<(i32, i32)> = make_result((1, 2));
        assert!(outcome.is_value());
        assert_eq!(outcome.into_value(), Some((1, 2)));
    }

    #[test]
    fn empty_marker_converts() {
        let outcome: Outcome<(i32,)> = empty_result().into();
        assert!(outcome.is_empty());
    }

    #[test]
    fn cancellation_marker_converts() {
        let outcome: Outcome<()> = cancellation_result().into();
        assert!(outcome.is_exception());
        assert!(outcome.into_exception().unwrap().is_cancellation());
    }

    #[test]
    fn exceptional_marker_converts() {
        let outcome: Outcome<()> = exceptional_result(Error::new(Boom)).into();
        assert!(matches!(outcome, Outcome::Exception(ref e) if e.is_failure()));
    }
}
