use super::Error;

/// Error when a reader declares a return type no converter exists for.
#[derive(Debug)]
pub(super) struct UnsupportedReturnType {
    ty: Box<str>,
    entity: Box<str>,
}

impl std::error::Error for UnsupportedReturnType {}

impl core::fmt::Display for UnsupportedReturnType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported reader return type `{}` for entity `{}`; expected the entity, a list of it, or an optional of it",
            self.ty, self.entity
        )
    }
}

impl Error {
    /// Creates an unsupported return type error.
    pub fn unsupported_return_type(ty: impl Into<String>, entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedReturnType(
            UnsupportedReturnType {
                ty: ty.into().into(),
                entity: entity.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported return type error.
    pub fn is_unsupported_return_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedReturnType(_))
    }
}
