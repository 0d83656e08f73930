use super::Error;

/// Error when a configuration key does not name a declared entity field.
#[derive(Debug)]
pub(super) struct UnknownEntityField {
    field: Box<str>,
    entity: Box<str>,
}

impl std::error::Error for UnknownEntityField {}

impl core::fmt::Display for UnknownEntityField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "config refers to `{}` field, which is not declared on the `{}` entity",
            self.field, self.entity
        )
    }
}

impl Error {
    /// Creates an unknown entity field error.
    pub fn unknown_entity_field(field: impl Into<String>, entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownEntityField(UnknownEntityField {
            field: field.into().into(),
            entity: entity.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown entity field error.
    pub fn is_unknown_entity_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownEntityField(_))
    }
}
