use crate::{model::FieldKind, value::ValueTag};
use thiserror::Error as ThisError;

///
/// Error
///
/// Umbrella error for callers that drive generation and copying together.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Copy(#[from] CopyError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl Error {
    /// Stable class label for logs and metrics.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Copy(CopyError::Conversion(_)) => "conversion",
            Self::Copy(_) => "copy",
            Self::Generation(_) => "generation",
        }
    }
}

impl From<ConversionError> for Error {
    fn from(err: ConversionError) -> Self {
        Self::Copy(CopyError::Conversion(err))
    }
}

///
/// GenerationError
///
/// A copier could not be built because a type cannot be introspected.
/// Never cached; a later request for the same key retries generation.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum GenerationError {
    #[error("bean '{path}' declares property '{name}' more than once")]
    DuplicateProperty {
        path: &'static str,
        name: &'static str,
    },

    #[error("bean '{path}' declares a property with an empty name")]
    EmptyPropertyName { path: &'static str },

    #[error("type '{path}' cannot be introspected: {message}")]
    Introspection { path: &'static str, message: String },

    #[error("cached copier for {source_path} -> {target_path} has an unexpected type")]
    SlotMismatch {
        source_path: &'static str,
        target_path: &'static str,
    },
}

impl GenerationError {
    /// Construct an introspection failure for a type path.
    pub fn introspection(path: &'static str, message: impl Into<String>) -> Self {
        Self::Introspection {
            path,
            message: message.into(),
        }
    }
}

///
/// CopyError
///
/// Failures raised while a copier runs. No rollback is performed: properties
/// assigned before the failing one keep their new values.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum CopyError {
    /// Converter failures surface unwrapped.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("property '{property}' needs a converter but none was supplied")]
    MissingConverter { property: &'static str },

    #[error("{found} value is not assignable to property '{property}' of type {target}")]
    NotAssignable {
        property: &'static str,
        target: FieldKind,
        found: ValueTag,
    },
}

impl CopyError {
    /// Name of the property whose assignment failed.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::Conversion(err) => err.property(),
            Self::MissingConverter { property } | Self::NotAssignable { property, .. } => property,
        }
    }
}

///
/// ConversionError
///
/// Failure reported by a `Converter`, or a converter result that the target
/// property cannot hold.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ConversionError {
    #[error("converter failed for property '{property}': {message}")]
    Custom { property: String, message: String },

    #[error("converter returned a {found} value not assignable to property '{property}' of type {target}")]
    NotAssignable {
        property: String,
        target: FieldKind,
        found: ValueTag,
    },

    #[error("value for property '{property}' is out of range for {target}")]
    OutOfRange { property: String, target: FieldKind },

    #[error("cannot parse '{input}' as {target} for property '{property}'")]
    Parse {
        property: String,
        target: FieldKind,
        input: String,
    },

    #[error("cannot convert {found} into {target} for property '{property}'")]
    Unsupported {
        property: String,
        target: FieldKind,
        found: ValueTag,
    },
}

impl ConversionError {
    pub fn custom(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            property: property.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::Custom { property, .. }
            | Self::NotAssignable { property, .. }
            | Self::OutOfRange { property, .. }
            | Self::Parse { property, .. }
            | Self::Unsupported { property, .. } => property,
        }
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid copier config: {0}")]
    Parse(#[from] toml::de::Error),
}
