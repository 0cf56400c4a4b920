//! Interval notation for dependency version constraints.
//!
//! | Notation      | Meaning          |
//! |---------------|------------------|
//! | `1.0`         | `x >= 1.0`       |
//! | `[1.0,)`      | `x >= 1.0`       |
//! | `(1.0,)`      | `x > 1.0`        |
//! | `[1.0]`       | `x == 1.0`       |
//! | `(,1.0]`      | `x <= 1.0`       |
//! | `(,1.0)`      | `x < 1.0`        |
//! | `[1.0,2.0]`   | `1.0 <= x <= 2.0`|
//! | `(1.0,2.0)`   | `1.0 < x < 2.0`  |
//! | `[1.0,2.0)`   | `1.0 <= x < 2.0` |
//!
//! # Examples
//!
//! ```
//! use platdeps_version::{NumericVersion, VersionRange};
//!
//! let range = VersionRange::parse("[1.0,2.0)").unwrap();
//! assert!(range.contains(&NumericVersion::new(1, 5)));
//! assert!(!range.contains(&NumericVersion::new(2, 0)));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::numeric::NumericVersion;

const MIN_EXCLUSIVE: char = '(';
const MIN_INCLUSIVE: char = '[';
const MAX_EXCLUSIVE: char = ')';
const MAX_INCLUSIVE: char = ']';

/// A parsed version interval. An absent bound means the range is open on
/// that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRange {
    minimum: Option<NumericVersion>,
    is_minimum_inclusive: bool,
    maximum: Option<NumericVersion>,
    is_maximum_inclusive: bool,
}

impl VersionRange {
    /// Parse interval notation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyValue`] for empty input and
    /// [`Error::InvalidVersionRange`] when more than two bounds are given,
    /// the minimum exceeds the maximum, or a single version is enclosed in
    /// exclusive brackets (`(1.0)`), which matches nothing.
    pub fn parse(range: &str) -> Result<Self> {
        let (Some(first), Some(last)) = (range.chars().next(), range.chars().last()) else {
            return Err(Error::EmptyValue {
                param: "version range",
            });
        };
        let invalid = |reason: &str| Error::InvalidVersionRange {
            range: range.to_string(),
            reason: reason.to_string(),
        };

        let is_minimum_inclusive = first == MIN_INCLUSIVE || first != MIN_EXCLUSIVE;
        let is_maximum_inclusive = last == MAX_INCLUSIVE;

        let bounds: Vec<&str> = range
            .trim_start_matches([MIN_EXCLUSIVE, MIN_INCLUSIVE])
            .trim_end_matches([MAX_EXCLUSIVE, MAX_INCLUSIVE])
            .split(',')
            .collect();

        let (minimum, maximum) = match bounds.as_slice() {
            [single] => {
                let version = parse_bound(single, range)?;
                // A lone version in inclusive brackets is an exact match.
                let maximum = is_maximum_inclusive.then_some(version);
                (Some(version), maximum)
            }
            [min, max] => (
                parse_optional_bound(min, range)?,
                parse_optional_bound(max, range)?,
            ),
            _ => {
                return Err(invalid(
                    "A maximum of 2 version numbers are allowed in the range.",
                ));
            }
        };

        if let (Some(min), Some(max)) = (minimum, maximum) {
            if min > max {
                return Err(invalid(
                    "The minimum version must be less than the maximum version.",
                ));
            }
        }

        if !is_minimum_inclusive && maximum.is_none() && bounds.len() == 1 {
            return Err(invalid(
                "The exclusive notation used for both minimum and maximum causes no possible version matches.",
            ));
        }

        Ok(Self {
            minimum,
            is_minimum_inclusive,
            maximum,
            is_maximum_inclusive,
        })
    }

    pub fn minimum(&self) -> Option<&NumericVersion> {
        self.minimum.as_ref()
    }

    pub fn is_minimum_inclusive(&self) -> bool {
        self.is_minimum_inclusive
    }

    pub fn maximum(&self) -> Option<&NumericVersion> {
        self.maximum.as_ref()
    }

    pub fn is_maximum_inclusive(&self) -> bool {
        self.is_maximum_inclusive
    }

    /// Whether the range pins exactly one version (`[1.0]`).
    pub fn is_exact(&self) -> bool {
        self.is_minimum_inclusive
            && self.is_maximum_inclusive
            && self.minimum.is_some()
            && self.minimum == self.maximum
    }

    /// Check whether `version` falls inside the interval.
    pub fn contains(&self, version: &NumericVersion) -> bool {
        let above_minimum = match &self.minimum {
            None => true,
            Some(min) if self.is_minimum_inclusive => version >= min,
            Some(min) => version > min,
        };
        let below_maximum = match &self.maximum {
            None => true,
            Some(max) if self.is_maximum_inclusive => version <= max,
            Some(max) => version < max,
        };
        above_minimum && below_maximum
    }
}

fn parse_bound(text: &str, range: &str) -> Result<NumericVersion> {
    NumericVersion::parse(text).map_err(|e| Error::InvalidVersionRange {
        range: range.to_string(),
        reason: e.to_string(),
    })
}

fn parse_optional_bound(text: &str, range: &str) -> Result<Option<NumericVersion>> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        parse_bound(text, range).map(Some)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            if let Some(version) = &self.minimum {
                return write!(f, "{MIN_INCLUSIVE}{version}{MAX_INCLUSIVE}");
            }
        }

        let open = if self.is_minimum_inclusive {
            MIN_INCLUSIVE
        } else {
            MIN_EXCLUSIVE
        };
        let close = if self.is_maximum_inclusive {
            MAX_INCLUSIVE
        } else {
            MAX_EXCLUSIVE
        };
        write!(f, "{open}")?;
        if let Some(min) = &self.minimum {
            write!(f, "{min}")?;
        }
        write!(f, ",")?;
        if let Some(max) = &self.maximum {
            write!(f, "{max}")?;
        }
        write!(f, "{close}")
    }
}

impl FromStr for VersionRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
