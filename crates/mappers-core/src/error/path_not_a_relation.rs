use super::Error;

/// Error when a non-terminal hop of a configured path is a plain field.
#[derive(Debug)]
pub(super) struct PathNotARelation {
    field: Box<str>,
    hop: Box<str>,
    source: Box<str>,
}

impl std::error::Error for PathNotARelation {}

impl core::fmt::Display for PathNotARelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "path of entity field `{}` hops through `{}.{}`, which is not a relation",
            self.field, self.source, self.hop
        )
    }
}

impl Error {
    /// Creates a path-not-a-relation error.
    pub fn path_not_a_relation(
        field: impl Into<String>,
        hop: impl Into<String>,
        source: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::PathNotARelation(PathNotARelation {
            field: field.into().into(),
            hop: hop.into().into(),
            source: source.into().into(),
        }))
    }

    /// Returns `true` if this error is a path-not-a-relation error.
    pub fn is_path_not_a_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PathNotARelation(_))
    }
}
