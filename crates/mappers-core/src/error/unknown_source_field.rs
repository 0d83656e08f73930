use super::Error;

/// Error when a configured source field name does not exist on the source.
#[derive(Debug)]
pub(super) struct UnknownSourceField {
    field: Box<str>,
    source: Box<str>,
}

impl std::error::Error for UnknownSourceField {}

impl core::fmt::Display for UnknownSourceField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "can not find `{}` field in the `{}` model",
            self.field, self.source
        )
    }
}

impl Error {
    /// Creates an unknown source field error.
    pub fn unknown_source_field(field: impl Into<String>, source: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownSourceField(UnknownSourceField {
            field: field.into().into(),
            source: source.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown source field error.
    pub fn is_unknown_source_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownSourceField(_))
    }
}
