mod adhoc;
mod collection_field_mismatch;
mod invalid_config_value;
mod invalid_nested_mapper_config;
mod invalid_result;
mod invalid_schema;
mod missing_entity_field;
mod nullability_mismatch;
mod path_is_collection;
mod path_not_a_relation;
mod record_not_found;
mod related_field_not_relation;
mod too_many_records;
mod type_conversion;
mod unknown_entity_field;
mod unknown_source_field;
mod unsupported_entity_kind;
mod unsupported_return_type;
mod unsupported_source_kind;

use adhoc::AdhocError;
use collection_field_mismatch::CollectionFieldMismatch;
use invalid_config_value::InvalidConfigValue;
use invalid_nested_mapper_config::InvalidNestedMapperConfig;
use invalid_result::InvalidResult;
use invalid_schema::InvalidSchema;
use missing_entity_field::MissingEntityField;
use nullability_mismatch::NullabilityMismatch;
use path_is_collection::PathIsCollection;
use path_not_a_relation::PathNotARelation;
use record_not_found::RecordNotFoundError;
use related_field_not_relation::RelatedFieldNotRelation;
use std::sync::Arc;
use too_many_records::TooManyRecordsError;
use type_conversion::TypeConversionError;
use unknown_entity_field::UnknownEntityField;
use unknown_source_field::UnknownSourceField;
use unsupported_entity_kind::UnsupportedEntityKind;
use unsupported_return_type::UnsupportedReturnType;
use unsupported_source_kind::UnsupportedSourceKind;

/// Returns early with an ad hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while building a mapper or reading through one.
///
/// Every failure of the mapping layer, from a malformed configuration to a
/// reader that found no row, is an `Error`. The [`Display`] output is the
/// human-readable reason; the `is_*` predicates identify the failing check.
///
/// [`Display`]: core::fmt::Display
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Wraps this error as the cause of `consequent`.
    ///
    /// The outermost context displays first and the root cause last, joined
    /// by `": "`.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    /// Returns the error at the end of the context chain.
    pub fn root(&self) -> &Error {
        self.chain().last().unwrap()
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns `true` if any error in the context chain satisfies `f`.
    ///
    /// Nested mappers wrap the failure of a child mapping in context naming
    /// the parent field, so predicates usually need to look past the top.
    pub fn any(&self, f: impl Fn(&Error) -> bool) -> bool {
        self.chain().any(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    CollectionFieldMismatch(CollectionFieldMismatch),
    InvalidConfigValue(InvalidConfigValue),
    InvalidNestedMapperConfig(InvalidNestedMapperConfig),
    InvalidResult(InvalidResult),
    InvalidSchema(InvalidSchema),
    MissingEntityField(MissingEntityField),
    NullabilityMismatch(NullabilityMismatch),
    PathIsCollection(PathIsCollection),
    PathNotARelation(PathNotARelation),
    RecordNotFound(RecordNotFoundError),
    RelatedFieldNotRelation(RelatedFieldNotRelation),
    TooManyRecords(TooManyRecordsError),
    TypeConversion(TypeConversionError),
    UnknownEntityField(UnknownEntityField),
    UnknownSourceField(UnknownSourceField),
    UnsupportedEntityKind(UnsupportedEntityKind),
    UnsupportedReturnType(UnsupportedReturnType),
    UnsupportedSourceKind(UnsupportedSourceKind),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            CollectionFieldMismatch(err) => core::fmt::Display::fmt(err, f),
            InvalidConfigValue(err) => core::fmt::Display::fmt(err, f),
            InvalidNestedMapperConfig(err) => core::fmt::Display::fmt(err, f),
            InvalidResult(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            MissingEntityField(err) => core::fmt::Display::fmt(err, f),
            NullabilityMismatch(err) => core::fmt::Display::fmt(err, f),
            PathIsCollection(err) => core::fmt::Display::fmt(err, f),
            PathNotARelation(err) => core::fmt::Display::fmt(err, f),
            RecordNotFound(err) => core::fmt::Display::fmt(err, f),
            RelatedFieldNotRelation(err) => core::fmt::Display::fmt(err, f),
            TooManyRecords(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            UnknownEntityField(err) => core::fmt::Display::fmt(err, f),
            UnknownSourceField(err) => core::fmt::Display::fmt(err, f),
            UnsupportedEntityKind(err) => core::fmt::Display::fmt(err, f),
            UnsupportedReturnType(err) => core::fmt::Display::fmt(err, f),
            UnsupportedSourceKind(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown mapper error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(err: std::num::TryFromIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Anything usable as context for an [`Error`].
pub trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
