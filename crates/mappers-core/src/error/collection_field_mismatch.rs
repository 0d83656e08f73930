use super::Error;

/// Error when a nested entity field maps onto a multi-valued relation.
///
/// A collection relation yields many related rows, which can not be
/// flattened into the single row one entity is decoded from.
#[derive(Debug)]
pub(super) struct CollectionFieldMismatch {
    field: Box<str>,
    source: Box<str>,
}

impl std::error::Error for CollectionFieldMismatch {}

impl core::fmt::Display for CollectionFieldMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "nested entity field `{}` can not be mapped to the `{}.{}` collection",
            self.field, self.source, self.field
        )
    }
}

impl Error {
    /// Creates a collection field mismatch error.
    pub fn collection_field_mismatch(field: impl Into<String>, source: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::CollectionFieldMismatch(
            CollectionFieldMismatch {
                field: field.into().into(),
                source: source.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a collection field mismatch error.
    pub fn is_collection_field_mismatch(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CollectionFieldMismatch(_))
    }
}
