use continuable_core::error::Error;
use continuable_core::result::Outcome;

/// The object a callable continuation invokes to deliver its result
/// (spec §3, "Promise").
///
/// The source language's promise is invocable either with the success
/// tuple or with `(exception_tag, Error)`; Rust has no overloaded call
/// operator, so the two forms collapse onto the explicit setters below,
/// all consuming `self` since a promise is single-shot.
pub struct Promise<T> {
    complete: Box<dyn FnOnce(Outcome<T>) + Send>,
}

impl<T: Send + 'static> Promise<T> {
    /// Wraps a raw completion callback.
    pub fn new(complete: impl FnOnce(Outcome<T>) + Send + 'static) -> Self {
        Promise {
            complete: Box::new(complete),
        }
    }

    /// Delivers a successful value tuple.
    pub fn set_value(self, value: T) {
        (self.complete)(Outcome::Value(value));
    }

    /// Delivers a failure.
    pub fn set_exception(self, error: Error) {
        (self.complete)(Outcome::Exception(error));
    }

    /// Delivers the cancellation marker.
    pub fn set_canceled(self) {
        self.set_exception(Error::cancelled());
    }

    /// Delivers a pre-built outcome directly (used internally by the chain
    /// transform, which already classified its result into one).
    pub fn resolve(self, outcome: Outcome<T>) {
        (self.complete)(outcome);
    }
}
