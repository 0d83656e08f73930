use super::Error;

/// Error when the source field backing a nested entity is not a single-valued relation.
#[derive(Debug)]
pub(super) struct RelatedFieldNotRelation {
    field: Box<str>,
    source: Box<str>,
}

impl std::error::Error for RelatedFieldNotRelation {}

impl core::fmt::Display for RelatedFieldNotRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "source field `{}.{}` must be a single-valued relation to expand a nested entity",
            self.source, self.field
        )
    }
}

impl Error {
    /// Creates a related-field-not-relation error.
    pub fn related_field_not_relation(
        field: impl Into<String>,
        source: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::RelatedFieldNotRelation(
            RelatedFieldNotRelation {
                field: field.into().into(),
                source: source.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a related-field-not-relation error.
    pub fn is_related_field_not_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RelatedFieldNotRelation(_))
    }
}
