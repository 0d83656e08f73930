use super::Error;

/// Error when a lookup that must yield exactly one row yields none.
///
/// Row sources raise this; readers returning a single entity let it
/// propagate unchanged.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    /// Names the row source, for example `model=UserModel`.
    context: Box<str>,
}

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "record not found: {}", self.context)
    }
}

impl Error {
    /// Creates a record not found error.
    pub fn record_not_found(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError {
            context: context.into().into(),
        }))
    }

    /// Returns `true` if this error is a record not found error.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RecordNotFound(_))
    }
}
