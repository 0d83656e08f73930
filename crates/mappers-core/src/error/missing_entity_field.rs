use super::Error;

/// Error when an entity field resolves neither by name nor by configuration.
#[derive(Debug)]
pub(super) struct MissingEntityField {
    field: Box<str>,
    source: Box<str>,
}

impl std::error::Error for MissingEntityField {}

impl core::fmt::Display for MissingEntityField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "can not find `{}` field in the `{}` model",
            self.field, self.source
        )
    }
}

impl Error {
    /// Creates a missing entity field error carrying the first unresolved
    /// field and the source it was looked up in.
    pub fn missing_entity_field(field: impl Into<String>, source: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingEntityField(MissingEntityField {
            field: field.into().into(),
            source: source.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing entity field error.
    pub fn is_missing_entity_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingEntityField(_))
    }
}
