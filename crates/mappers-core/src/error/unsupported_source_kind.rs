use super::Error;

/// Error when a data source can not be read from.
///
/// This occurs when:
/// - The model id does not belong to the schema
/// - The model is abstract and has no rows of its own
#[derive(Debug)]
pub(super) struct UnsupportedSourceKind {
    message: Box<str>,
}

impl std::error::Error for UnsupportedSourceKind {}

impl core::fmt::Display for UnsupportedSourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported data source: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported source kind error.
    pub fn unsupported_source_kind(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedSourceKind(
            UnsupportedSourceKind {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported source kind error.
    pub fn is_unsupported_source_kind(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedSourceKind(_))
    }
}
