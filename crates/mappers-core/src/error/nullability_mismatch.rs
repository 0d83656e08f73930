use super::Error;

/// Error when a nullable source field feeds a non-optional entity field.
#[derive(Debug)]
pub(super) struct NullabilityMismatch {
    field: Box<str>,
    source_field: Box<str>,
    source: Box<str>,
}

impl std::error::Error for NullabilityMismatch {}

impl core::fmt::Display for NullabilityMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "entity field `{}` must be optional: source field `{}.{}` is nullable",
            self.field, self.source, self.source_field
        )
    }
}

impl Error {
    /// Creates a nullability mismatch error.
    pub fn nullability_mismatch(
        field: impl Into<String>,
        source_field: impl Into<String>,
        source: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::NullabilityMismatch(NullabilityMismatch {
            field: field.into().into(),
            source_field: source_field.into().into(),
            source: source.into().into(),
        }))
    }

    /// Returns `true` if this error is a nullability mismatch error.
    pub fn is_nullability_mismatch(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NullabilityMismatch(_))
    }
}
