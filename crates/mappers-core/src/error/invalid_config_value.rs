use super::Error;

/// Error when a configuration key or value has the wrong shape.
///
/// This occurs when:
/// - A configuration key is empty
/// - A value is not a field name, a path, an evaluated marker, or a nested mapper
/// - A path has fewer than two segments or contains an empty segment
/// - A declarative configuration document is not a mapping
#[derive(Debug)]
pub(super) struct InvalidConfigValue {
    key: Option<Box<str>>,
    message: Box<str>,
}

impl std::error::Error for InvalidConfigValue {}

impl core::fmt::Display for InvalidConfigValue {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.key {
            Some(key) => write!(
                f,
                "invalid config value for `{}` field: {}",
                key, self.message
            ),
            None => write!(f, "invalid config: {}", self.message),
        }
    }
}

impl Error {
    /// Creates an invalid config value error for the given configuration key.
    pub fn invalid_config_value(key: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfigValue(InvalidConfigValue {
            key: Some(key.into().into()),
            message: message.into().into(),
        }))
    }

    /// Creates an invalid config error that is not tied to a single key.
    pub fn invalid_config(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfigValue(InvalidConfigValue {
            key: None,
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid config value error.
    pub fn is_invalid_config_value(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConfigValue(_))
    }
}
