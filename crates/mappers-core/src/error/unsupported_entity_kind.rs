use super::Error;

/// Error when an entity definition matches none of the supported conventions.
#[derive(Debug)]
pub(super) struct UnsupportedEntityKind {
    entity: Box<str>,
}

impl std::error::Error for UnsupportedEntityKind {}

impl core::fmt::Display for UnsupportedEntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "`{}` is not a supported entity: it must declare its fields and a record, fields or assign constructor",
            self.entity
        )
    }
}

impl Error {
    /// Creates an unsupported entity kind error.
    pub fn unsupported_entity_kind(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedEntityKind(
            UnsupportedEntityKind {
                entity: entity.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported entity kind error.
    pub fn is_unsupported_entity_kind(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedEntityKind(_))
    }
}
