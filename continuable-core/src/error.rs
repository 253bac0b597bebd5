use std::error::Error as StdError;
use std::fmt;

/// The opaque error carrier that flows along a continuation's error edge.
///
/// A default-constructed `Error` carries no underlying cause and projects to
/// `false` through [`Error::is_failure`] — it denotes *cancellation* rather
/// than a real failure (spec §3, §7). Any `Error` built from an actual
/// `std::error::Error` projects `true`.
///
/// `Error` is move-only in spirit (it has no `Clone` impl): a continuation
/// hands its error off exactly once, the same way the promise contract only
/// ever delivers one outcome.
pub struct Error(Option<Box<dyn StdError + Send + Sync>>);

impl Error {
    /// Builds a real (truthy) error from any `std::error::Error`.
    pub fn new<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error(Some(Box::new(source)))
    }

    /// Builds the cancellation (falsy) marker.
    pub fn cancelled() -> Self {
        Error(None)
    }

    /// `true` for a real failure, `false` for cancellation.
    ///
    /// This is the "boolean contextually-convertible projection" of spec §3.
    pub fn is_failure(&self) -> bool {
        self.0.is_some()
    }

    /// `true` for the cancellation marker.
    pub fn is_cancellation(&self) -> bool {
        self.0.is_none()
    }
}

impl Default for Error {
    /// A default-constructed `Error` is the cancellation marker.
    fn default() -> Self {
        Error::cancelled()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(source) => f.debug_tuple("Error").field(source).finish(),
            None => f.write_str("Error::cancelled"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(source) => write!(f, "{source}"),
            None => f.write_str("cancelled"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.0 {
            Some(source) => Some(source.as_ref()),
            None => None,
        }
    }
}

impl<E> From<E> for Error
where
    E: StdError + Send + Sync + 'static,
{
    fn from(source: E) -> Self {
        Error::new(source)
    }
}
