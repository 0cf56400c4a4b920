//! Error types for platdeps-core

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input was missing or empty. Indicates a caller bug.
    Argument,
    /// Input was present but semantically wrong.
    Format,
    /// The requested construction is ambiguous.
    InvalidOperation,
    /// A key does not belong to the model it was used with.
    LookupMiss,
    /// Reading the document failed.
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required string input was empty.
    #[error("{param} cannot be empty")]
    EmptyValue { param: &'static str },

    /// A malformed version, numeric version or version range.
    #[error(transparent)]
    Version(#[from] platdeps_version::Error),

    /// A name expression with no alternatives, e.g. `||`.
    #[error("Dependency name expression '{expression}' is not a valid expression.")]
    InvalidExpression { expression: String },

    /// A dependency with several name alternatives and no explicit id.
    #[error(
        "Platform dependency with name expression '{expression}' needs to explicitly define its ID because the expression contains more than one dependency name."
    )]
    AmbiguousDependencyId { expression: String },

    /// Two platforms anywhere in the tree share a RID.
    #[error("Duplicate platforms were found with RID '{rid}'.")]
    DuplicatePlatform { rid: String },

    /// Two components on one platform share a name and type.
    #[error(
        "Detected duplicate components in platform '{rid}'. Each component's name and type should represent a unique identity within a platform."
    )]
    DuplicateComponent { rid: String },

    /// A dependency with neither a usage nor an override.
    #[error("Usage must be set for platform dependencies that do not have an override set.")]
    UsageNotSet,

    /// A usage key missing from the model's dependency usages.
    #[error(
        "Platform dependency with type '{dependency_type}' and ID '{id}' references a dependency usage '{usage}' that is undefined."
    )]
    UndefinedUsage {
        dependency_type: String,
        id: String,
        usage: String,
    },

    /// An override reference with no match in the platform hierarchy.
    #[error(
        "Platform dependency with type '{dependency_type}' and ID '{id}' overrides a dependency with type '{override_type}' and ID '{override_id}' that doesn't exist in its platform hierarchy."
    )]
    OverrideNotFound {
        dependency_type: String,
        id: String,
        override_type: String,
        override_id: String,
    },

    /// A platform key that was not issued by this model.
    #[error("Platform with key {key} does not exist within this model.")]
    PlatformNotInModel { key: usize },

    /// A component key that was not issued by this model, or one no
    /// platform declares.
    #[error("Component with key {key} does not exist within this model.")]
    ComponentNotInModel { key: usize },

    /// A dependency key that was not issued by this model, or one no
    /// component declares.
    #[error("Platform dependency with key {key} does not exist within this model.")]
    DependencyNotInModel { key: usize },

    /// JSON that does not match the document shape.
    #[error("Unable to deserialize the platform dependencies document: {message}")]
    DocumentParse { message: String },

    /// A document file with no content.
    #[error("Unable to deserialize the content in file '{path}'.")]
    EmptyDocument { path: PathBuf },

    /// The model could not be written as JSON.
    #[error("Failed to serialize the platform dependencies document: {message}")]
    DocumentSerialize { message: String },

    /// Reading a document file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyValue { .. } => ErrorKind::Argument,
            Self::Version(e) if e.is_argument_error() => ErrorKind::Argument,
            Self::AmbiguousDependencyId { .. } => ErrorKind::InvalidOperation,
            Self::PlatformNotInModel { .. }
            | Self::ComponentNotInModel { .. }
            | Self::DependencyNotInModel { .. } => ErrorKind::LookupMiss,
            Self::Io { .. } => ErrorKind::Io,
            Self::Version(_)
            | Self::InvalidExpression { .. }
            | Self::DuplicatePlatform { .. }
            | Self::DuplicateComponent { .. }
            | Self::UsageNotSet
            | Self::UndefinedUsage { .. }
            | Self::OverrideNotFound { .. }
            | Self::DocumentParse { .. }
            | Self::EmptyDocument { .. }
            | Self::DocumentSerialize { .. } => ErrorKind::Format,
        }
    }
}
