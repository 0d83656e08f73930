use super::Error;

/// Error when a non-terminal hop of a configured path is a multi-valued relation.
#[derive(Debug)]
pub(super) struct PathIsCollection {
    field: Box<str>,
    hop: Box<str>,
    source: Box<str>,
}

impl std::error::Error for PathIsCollection {}

impl core::fmt::Display for PathIsCollection {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "path of entity field `{}` hops through `{}.{}`, which is a collection",
            self.field, self.source, self.hop
        )
    }
}

impl Error {
    /// Creates a path-is-collection error.
    pub fn path_is_collection(
        field: impl Into<String>,
        hop: impl Into<String>,
        source: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::PathIsCollection(PathIsCollection {
            field: field.into().into(),
            hop: hop.into().into(),
            source: source.into().into(),
        }))
    }

    /// Returns `true` if this error is a path-is-collection error.
    pub fn is_path_is_collection(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PathIsCollection(_))
    }
}
