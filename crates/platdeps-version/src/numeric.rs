//! Dotted numeric versions used as the bounds of a [`VersionRange`].
//!
//! These are the loose `major.minor[.build[.revision]]` numbers that appear in
//! dependency name expressions such as `libicu:[63.0,64.0)`. They are not
//! SemVer: no prerelease or build metadata, and between two and four
//! components.
//!
//! [`VersionRange`]: crate::VersionRange

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A dotted numeric version with two to four components.
///
/// Each component is a `u32`, so values up to `4294967295` are accepted;
/// anything larger is rejected as out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericVersion {
    major: u32,
    minor: u32,
    build: Option<u32>,
    revision: Option<u32>,
}

impl NumericVersion {
    /// Create a two-component version.
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    /// Add a third component.
    pub fn with_build(mut self, build: u32) -> Self {
        self.build = Some(build);
        self
    }

    /// Add a fourth component. Implies a build component of `0` if none was
    /// set.
    pub fn with_revision(mut self, revision: u32) -> Self {
        self.build.get_or_insert(0);
        self.revision = Some(revision);
        self
    }

    /// Parse `major.minor[.build[.revision]]`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = |reason: &str| Error::InvalidNumericVersion {
            version: input.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() < 2 || parts.len() > 4 {
            return Err(invalid("expected between 2 and 4 dot-separated components"));
        }

        let mut numbers = [0u32; 4];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("components must be non-negative integers"));
            }
            *slot = part
                .parse()
                .map_err(|_| invalid("component is out of range"))?;
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            build: (parts.len() > 2).then_some(numbers[2]),
            revision: (parts.len() > 3).then_some(numbers[3]),
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn build(&self) -> Option<u32> {
        self.build
    }

    pub fn revision(&self) -> Option<u32> {
        self.revision
    }
}

impl Ord for NumericVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None < Some(_)`: an omitted component sorts before any given one.
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.build.cmp(&other.build))
            .then(self.revision.cmp(&other.revision))
    }
}

impl PartialOrd for NumericVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NumericVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
        }
        if let Some(revision) = self.revision {
            write!(f, ".{revision}")?;
        }
        Ok(())
    }
}

impl FromStr for NumericVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
