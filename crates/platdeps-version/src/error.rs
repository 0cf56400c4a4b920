//! Error types for platdeps-version

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing or constructing versions and ranges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required string input was empty.
    #[error("{param} cannot be empty")]
    EmptyValue { param: &'static str },

    /// Text that is not a valid `major.minor.patch[-pre][+build]` version.
    #[error("Invalid version: {version}")]
    InvalidReleaseVersion { version: String },

    /// A prerelease label containing an invalid identifier.
    #[error("Invalid prerelease label: '{prerelease}'")]
    InvalidPrerelease { prerelease: String },

    /// Build metadata containing an invalid identifier.
    #[error("Invalid build metadata: '{build_metadata}'")]
    InvalidBuildMetadata { build_metadata: String },

    /// Text that is not a valid dotted numeric version.
    #[error("Invalid numeric version '{version}': {reason}")]
    InvalidNumericVersion { version: String, reason: String },

    /// A malformed interval expression.
    #[error("Version range '{range}' is invalid. {reason}")]
    InvalidVersionRange { range: String, reason: String },
}

impl Error {
    /// Returns `true` for errors caused by empty required input rather than
    /// malformed content.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::EmptyValue { .. })
    }
}
