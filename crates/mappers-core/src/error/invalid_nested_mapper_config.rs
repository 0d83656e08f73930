use super::Error;

/// Error when a nested entity field is configured with something other than
/// a nested mapper, or a nested mapper is attached to a plain field.
#[derive(Debug)]
pub(super) struct InvalidNestedMapperConfig {
    field: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidNestedMapperConfig {}

impl core::fmt::Display for InvalidNestedMapperConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid nested mapper config for `{}` field: {}",
            self.field, self.message
        )
    }
}

impl Error {
    /// Creates an invalid nested mapper config error.
    pub fn invalid_nested_mapper_config(
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidNestedMapperConfig(
            InvalidNestedMapperConfig {
                field: field.into().into(),
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid nested mapper config error.
    pub fn is_invalid_nested_mapper_config(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidNestedMapperConfig(_))
    }
}
